mod registry;

pub use registry::{CollectionLock, LockRegistry};
