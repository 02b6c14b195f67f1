use async_trait::async_trait;

use crate::error::StoreError;

/// Storage backend abstraction for collection/resource addressed records.
///
/// Backends deal in already-encoded bytes so the trait stays object safe;
/// typed access goes through [`crate::Store`]. Every method is expected to
/// provide its own synchronization: callers never lock externally.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Returns the backend identifier (e.g., "local").
    fn backend_name(&self) -> &'static str;

    /// Atomically replace the record at `(collection, resource)` with `data`,
    /// creating the collection on first write.
    async fn write_record(
        &self,
        collection: &str,
        resource: &str,
        data: &[u8],
    ) -> Result<(), StoreError>;

    /// Read the raw bytes of one record.
    ///
    /// Fails with [`StoreError::NotFound`] if the record was never written.
    async fn read_record(&self, collection: &str, resource: &str) -> Result<Vec<u8>, StoreError>;

    /// Read the raw text of every record in a collection, in backend order.
    ///
    /// A missing collection is [`StoreError::NotFound`]; an existing but
    /// empty one yields an empty vector.
    async fn read_all_records(&self, collection: &str) -> Result<Vec<String>, StoreError>;

    /// Remove one record. Fails with [`StoreError::NotFound`] if absent.
    async fn delete_record(&self, collection: &str, resource: &str) -> Result<(), StoreError>;
}

/// Reject an empty collection name.
pub fn check_collection(collection: &str) -> Result<(), StoreError> {
    if collection.is_empty() {
        return Err(StoreError::InvalidArgument("missing collection name".to_string()));
    }
    Ok(())
}

/// Reject an empty resource name.
pub fn check_resource(resource: &str) -> Result<(), StoreError> {
    if resource.is_empty() {
        return Err(StoreError::InvalidArgument("missing resource name".to_string()));
    }
    Ok(())
}

/// Reject an empty collection or resource name, collection first.
pub fn check_names(collection: &str, resource: &str) -> Result<(), StoreError> {
    check_collection(collection)?;
    check_resource(resource)
}
