use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::{check_collection, check_names, StorageBackend};
use crate::codec::{decode, encode};
use crate::error::StoreError;

/// Typed document store over a [`StorageBackend`].
///
/// Values go in as anything `Serialize` and come back out as anything
/// `DeserializeOwned`; the backend only ever sees encoded bytes.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

impl Store {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// The backend every call is forwarded to.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Save `value` as `resource` in `collection`, replacing any previous record.
    ///
    /// The value is encoded before the backend is touched, so an
    /// unserializable value leaves the filesystem unchanged.
    pub async fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        check_names(collection, resource)?;
        let data = encode(value)?;
        self.backend.write_record(collection, resource, &data).await
    }

    /// Load `resource` from `collection` into a `T`.
    pub async fn read<T: DeserializeOwned>(
        &self,
        collection: &str,
        resource: &str,
    ) -> Result<T, StoreError> {
        check_names(collection, resource)?;
        let data = self.backend.read_record(collection, resource).await?;
        decode(&data)
    }

    /// Raw text of every record in `collection`. Order is unspecified.
    pub async fn read_all(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        check_collection(collection)?;
        self.backend.read_all_records(collection).await
    }

    /// Like [`Store::read_all`], decoding each record into a `T`.
    pub async fn read_all_as<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        self.read_all(collection)
            .await?
            .iter()
            .map(|record| decode(record.as_bytes()))
            .collect()
    }

    /// Remove `resource` from `collection`.
    pub async fn delete(&self, collection: &str, resource: &str) -> Result<(), StoreError> {
        check_names(collection, resource)?;
        self.backend.delete_record(collection, resource).await
    }
}
