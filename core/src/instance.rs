//! Process-wide database instance cache. Connections to the same database
//! file share one engine instance; in-memory databases are never shared.

use crate::engine::{EngineDatabase, EngineFactory};
use crate::err::Result;
use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, Weak};

pub const IN_MEMORY_PATH: &str = ":memory:";

lazy_static! {
    static ref INSTANCE_CACHE: Mutex<HashMap<String, Weak<dyn EngineDatabase>>> =
        Mutex::new(HashMap::new());
}

/// Look up or open the database at `path`. Returns the shared instance and
/// whether this call created it.
pub fn get_or_create(
    path: &str,
    options: &BTreeMap<String, String>,
    factory: &dyn EngineFactory,
) -> Result<(Arc<dyn EngineDatabase>, bool)> {
    if path.is_empty() || path == IN_MEMORY_PATH {
        let db = factory.open(IN_MEMORY_PATH, options)?;
        return Ok((db, true));
    }
    let mut cache = INSTANCE_CACHE.lock().unwrap();
    if let Some(db) = cache.get(path).and_then(Weak::upgrade) {
        return Ok((db, false));
    }
    let db = factory.open(path, options)?;
    cache.insert(path.to_string(), Arc::downgrade(&db));
    Ok((db, true))
}

/// Drop the cache entry for `path` if no connection holds the instance
/// anymore. Called on disconnect.
pub fn evict_if_stale(path: &str) {
    let mut cache = INSTANCE_CACHE.lock().unwrap();
    if let Some(entry) = cache.get(path) {
        if entry.upgrade().is_none() {
            cache.remove(path);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::EngineSession;

    struct TestDb(String);

    impl EngineDatabase for TestDb {
        fn connect(self: Arc<Self>) -> Result<Box<dyn EngineSession>> {
            Err(crate::Error::engine("sessions not used here"))
        }

        fn path(&self) -> &str {
            &self.0
        }
    }

    struct TestFactory;

    impl EngineFactory for TestFactory {
        fn open(
            &self,
            path: &str,
            _options: &BTreeMap<String, String>,
        ) -> Result<Arc<dyn EngineDatabase>> {
            Ok(Arc::new(TestDb(path.to_string())))
        }

        fn option_names(&self) -> Vec<String> {
            vec![]
        }
    }

    #[test]
    fn file_databases_are_shared() {
        let opts = BTreeMap::new();
        let (a, created_a) = get_or_create("/tmp/shared_cache.db", &opts, &TestFactory).unwrap();
        let (b, created_b) = get_or_create("/tmp/shared_cache.db", &opts, &TestFactory).unwrap();
        assert!(created_a);
        assert!(!created_b);
        assert!(Arc::ptr_eq(&a, &b));
        drop((a, b));
        evict_if_stale("/tmp/shared_cache.db");
        let (_c, created_c) = get_or_create("/tmp/shared_cache.db", &opts, &TestFactory).unwrap();
        assert!(created_c);
    }

    #[test]
    fn in_memory_is_never_cached() {
        let opts = BTreeMap::new();
        let (_a, created_a) = get_or_create(IN_MEMORY_PATH, &opts, &TestFactory).unwrap();
        let (_b, created_b) = get_or_create(IN_MEMORY_PATH, &opts, &TestFactory).unwrap();
        assert!(created_a);
        assert!(created_b);
    }
}
