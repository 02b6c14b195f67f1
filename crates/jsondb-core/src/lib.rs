//! Core traits and types for the jsondb document store.
//!
//! This crate defines what every backend shares:
//! - `StorageBackend`: raw-bytes record operations keyed by (collection, resource)
//! - `Store`: typed facade that encodes/decodes records as indented JSON
//! - `Logger`: leveled logging capability injected into backends
//! - `StoreError`: the error type returned by every operation

mod backend;
pub mod codec;
mod error;
mod logger;
mod store;

pub use backend::{check_collection, check_names, check_resource, StorageBackend};
pub use error::StoreError;
pub use logger::{ConsoleLogger, Logger};
pub use store::Store;

/// Re-exported so callers can build a [`ConsoleLogger`] without depending on `tracing`.
pub use tracing::level_filters::LevelFilter;

/// Version of the jsondb crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
