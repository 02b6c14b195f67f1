use std::sync::Arc;

use jsondb_core::Logger;

/// Default permission bits for collection directories (unix only).
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Default permission bits for record files (unix only).
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Options for opening a [`crate::LocalStorage`].
#[derive(Clone)]
pub struct StoreOptions {
    /// Logger to report through. `None` means a `ConsoleLogger` at info level.
    pub logger: Option<Arc<dyn Logger>>,
    /// Mode for directories the store creates.
    pub dir_mode: u32,
    /// Mode for record files the store creates.
    pub file_mode: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            logger: None,
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl std::fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreOptions")
            .field("custom_logger", &self.logger.is_some())
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("file_mode", &format_args!("{:o}", self.file_mode))
            .finish()
    }
}

impl StoreOptions {
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }
}
