use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use jsondb_core::codec::{RECORD_EXTENSION, TEMP_SUFFIX};
use jsondb_core::{
    check_collection, check_names, log_debug, log_trace, log_warn, ConsoleLogger, Logger,
    StorageBackend, StoreError,
};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

use crate::lock::LockRegistry;
use crate::options::StoreOptions;
use crate::paths::clean_path;

/// Local filesystem storage backend.
///
/// Each collection is a directory and each resource one file:
/// ```text
/// {base_dir}/
///   {collection}/
///     {resource}.json
///     {resource}.json.temp   (only while a write is in flight)
/// ```
///
/// Operations on one collection are serialized through a per-collection
/// reader/writer lock: reads share it, writes and deletes hold it
/// exclusively. Different collections never contend.
pub struct LocalStorage {
    base_dir: PathBuf,
    locks: LockRegistry,
    log: Arc<dyn Logger>,
    #[cfg_attr(not(unix), allow(dead_code))]
    dir_mode: u32,
    #[cfg_attr(not(unix), allow(dead_code))]
    file_mode: u32,
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage")
            .field("base_dir", &self.base_dir)
            .field("locks", &self.locks.len())
            .finish_non_exhaustive()
    }
}

impl LocalStorage {
    /// Open a store rooted at `base_dir`, creating the directory if absent.
    pub async fn open(
        base_dir: impl AsRef<Path>,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        let base_dir = clean_path(base_dir.as_ref());
        let log: Arc<dyn Logger> = match options.logger {
            Some(logger) => logger,
            None => Arc::new(ConsoleLogger::default()),
        };

        let storage = Self {
            base_dir,
            locks: LockRegistry::new(),
            log,
            dir_mode: options.dir_mode,
            file_mode: options.file_mode,
        };

        match fs::metadata(&storage.base_dir).await {
            Ok(meta) if meta.is_dir() => {
                log_debug!(
                    storage.log,
                    "Using '{}' (database already exists)",
                    storage.base_dir.display()
                );
                return Ok(storage);
            }
            Ok(_) => {
                return Err(StoreError::Io(format!(
                    "Database path {} exists and is not a directory",
                    storage.base_dir.display()
                )));
            }
            Err(_) => {}
        }

        log_debug!(storage.log, "Creating the database at '{}'", storage.base_dir.display());
        storage.create_dir(&storage.base_dir).await?;
        Ok(storage)
    }

    /// The cleaned root directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the directory of a collection.
    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.base_dir.join(collection)
    }

    /// Get the path to a record file.
    fn record_path(&self, collection: &str, resource: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", resource, RECORD_EXTENSION))
    }

    /// Get the sibling temp path a record is staged at before the rename.
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }

    /// Create a directory and its parents with the configured mode.
    async fn create_dir(&self, dir: &Path) -> Result<(), StoreError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(self.dir_mode);
        builder.create(dir).await.map_err(|e| {
            StoreError::Io(format!("Failed to create dir {}: {}", dir.display(), e))
        })
    }

    /// Write `data` to `path`, truncating anything already there.
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), StoreError> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(self.file_mode);

        let mut file = options.open(path).await.map_err(|e| {
            StoreError::Io(format!("Failed to create temp file {}: {}", path.display(), e))
        })?;
        file.write_all(data).await.map_err(|e| {
            StoreError::Io(format!("Failed to write temp file {}: {}", path.display(), e))
        })?;
        // tokio completes writes in the background; flush before the rename sees the file
        file.flush().await.map_err(|e| {
            StoreError::Io(format!("Failed to flush temp file {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}

/// True if `e` means the path, or one of its parents, does not exist.
///
/// A file squatting on the collection name surfaces as `NotADirectory`; the
/// record under it is just as absent.
fn is_missing(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
    )
}

#[async_trait]
impl StorageBackend for LocalStorage {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    #[instrument(skip(self, data), level = "debug", fields(data_len = data.len()))]
    async fn write_record(
        &self,
        collection: &str,
        resource: &str,
        data: &[u8],
    ) -> Result<(), StoreError> {
        check_names(collection, resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.write().await;

        self.create_dir(&self.collection_dir(collection)).await?;
        let path = self.record_path(collection, resource);
        let temp_path = Self::temp_path(&path);

        if let Err(e) = self.write_file(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::Io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )));
        }

        log_debug!(self.log, "Saved {}/{} ({} bytes)", collection, resource, data.len());
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn read_record(&self, collection: &str, resource: &str) -> Result<Vec<u8>, StoreError> {
        check_names(collection, resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.read().await;

        let path = self.record_path(collection, resource);
        match fs::read(&path).await {
            Ok(data) => {
                log_trace!(self.log, "Loaded {}/{} ({} bytes)", collection, resource, data.len());
                Ok(data)
            }
            Err(e) if is_missing(&e) => Err(StoreError::NotFound(format!(
                "record not found: {}",
                path.display()
            ))),
            Err(e) => Err(StoreError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn read_all_records(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        check_collection(collection)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.read().await;

        let dir = self.collection_dir(collection);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(format!(
                    "collection not found: {}",
                    dir.display()
                )));
            }
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to read dir {}: {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StoreError::Io(format!("Failed to read dir entry in {}: {}", dir.display(), e))
        })? {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
                log_warn!(self.log, "Skipping non-record entry {}", path.display());
                continue;
            }

            // Anything named *.json must read as a record, directories included
            let record = fs::read_to_string(&path).await.map_err(|e| {
                StoreError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;
            records.push(record);
        }

        log_debug!(self.log, "Listed {} records in {}", records.len(), collection);
        Ok(records)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_record(&self, collection: &str, resource: &str) -> Result<(), StoreError> {
        check_names(collection, resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.write().await;

        let path = self.record_path(collection, resource);
        match fs::remove_file(&path).await {
            Ok(()) => {
                log_debug!(self.log, "Deleted {}/{}", collection, resource);
                Ok(())
            }
            Err(e) if is_missing(&e) => Err(StoreError::NotFound(format!(
                "resource does not exist: {}",
                path.display()
            ))),
            Err(e) => Err(StoreError::Io(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
