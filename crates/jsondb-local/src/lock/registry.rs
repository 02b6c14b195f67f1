use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;

/// Shared/exclusive lock guarding one collection.
pub type CollectionLock = Arc<RwLock<()>>;

/// Registry handing out exactly one [`CollectionLock`] per collection name.
///
/// Locks are created on first use and kept for the lifetime of the registry.
/// The map's own shard lock is only held while looking up or inserting an
/// entry; the returned `Arc` is cloned out before anyone awaits on it.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<String, CollectionLock>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lock for `collection`, creating it if this is the first request.
    pub fn get_or_create(&self, collection: &str) -> CollectionLock {
        if let Some(lock) = self.locks.get(collection) {
            return Arc::clone(lock.value());
        }

        // Two callers can both miss above; entry() makes sure only one insert wins.
        Arc::clone(
            self.locks
                .entry(collection.to_string())
                .or_insert_with(|| Arc::new(RwLock::new(())))
                .value(),
        )
    }

    /// Number of collections that have a lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_same_name_same_lock() {
        let registry = LockRegistry::new();
        assert!(registry.is_empty());

        let a1 = registry.get_or_create("users");
        let a2 = registry.get_or_create("users");
        let b = registry.get_or_create("orders");

        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creation_yields_one_lock() {
        use tokio::sync::Barrier;

        let registry = Arc::new(LockRegistry::new());
        const NUM_TASKS: usize = 16;
        let barrier = Arc::new(Barrier::new(NUM_TASKS));
        let mut handles = vec![];

        for _ in 0..NUM_TASKS {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                registry.get_or_create("hot")
            }));
        }

        let mut locks = vec![];
        for handle in handles {
            locks.push(handle.await.expect("task panicked"));
        }

        assert_eq!(registry.len(), 1);
        for lock in &locks[1..] {
            assert!(Arc::ptr_eq(&locks[0], lock));
        }
    }

    #[tokio::test]
    async fn test_writer_excludes_reader_on_same_collection() {
        let registry = LockRegistry::new();
        let lock = registry.get_or_create("users");
        let _guard = lock.write().await;

        // A reader on the same collection has to wait
        let same = registry.get_or_create("users");
        let blocked = tokio::time::timeout(Duration::from_millis(50), same.read()).await;
        assert!(blocked.is_err());

        // A reader on another collection does not
        let other = registry.get_or_create("orders");
        let free = tokio::time::timeout(Duration::from_millis(50), other.read()).await;
        assert!(free.is_ok());
    }

    #[tokio::test]
    async fn test_readers_share() {
        let registry = LockRegistry::new();
        let lock = registry.get_or_create("users");
        let _r1 = lock.read().await;
        let r2 = tokio::time::timeout(Duration::from_millis(50), lock.read()).await;
        assert!(r2.is_ok());
    }
}
