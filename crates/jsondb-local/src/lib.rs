//! Local filesystem backend for the jsondb document store.
//!
//! Records live at `{root}/{collection}/{resource}.json`. Writes go through a
//! sibling `.temp` file and an atomic rename, and every collection has its own
//! reader/writer lock.

mod lock;
mod options;
mod paths;
mod storage;

use std::path::Path;
use std::sync::Arc;

pub use jsondb_core::{Store, StoreError};
pub use lock::{CollectionLock, LockRegistry};
pub use options::{StoreOptions, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
pub use paths::clean_path;
pub use storage::LocalStorage;

/// Open a typed [`Store`] backed by the directory at `root`.
pub async fn open(root: impl AsRef<Path>, options: StoreOptions) -> Result<Store, StoreError> {
    let storage = LocalStorage::open(root, options).await?;
    Ok(Store::new(Arc::new(storage)))
}
