//! A scripted engine used by the unit-test suite. Sessions accept any SQL:
//! canned entries return their recorded result, parameterized statements
//! echo their parameters back as a single row, and everything else runs as
//! a statement with no result set. Every executed statement is logged so
//! tests can assert on session-init and batch behavior.

use super::{
    DataChunk, EngineDatabase, EngineFactory, EnginePrepared, EngineResult, EngineSession,
    EngineType, EngineValue, InterruptHandle,
};
use crate::err::{Error, Result};
use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

pub const LIBRARY_VERSION: &str = "v1.3.0";

lazy_static! {
    static ref SHARED: Arc<MockEngineFactory> = Arc::new(MockEngineFactory::default());
}

/// The factory handle registered as the process default.
pub fn shared_factory() -> Arc<dyn EngineFactory> {
    SHARED.clone()
}

/// Typed access for tests that need to script databases.
pub fn factory() -> Arc<MockEngineFactory> {
    SHARED.clone()
}

#[derive(Default)]
pub struct MockEngineFactory {
    databases: Mutex<HashMap<String, Arc<MockDatabase>>>,
}

impl MockEngineFactory {
    pub fn database(&self, path: &str) -> Arc<MockDatabase> {
        self.databases
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(MockDatabase::new(path)))
            .clone()
    }
}

impl EngineFactory for MockEngineFactory {
    fn open(
        &self,
        path: &str,
        _options: &BTreeMap<String, String>,
    ) -> Result<Arc<dyn EngineDatabase>> {
        Ok(self.database(path))
    }

    fn option_names(&self) -> Vec<String> {
        [
            "access_mode",
            "allow_unsigned_extensions",
            "allowed_directories",
            "allowed_paths",
            "autoinstall_known_extensions",
            "autoload_known_extensions",
            "custom_user_agent",
            "default_null_order",
            "default_order",
            "enable_external_access",
            "max_memory",
            "memory_limit",
            "temp_directory",
            "threads",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct CannedResult {
    pub names: Vec<String>,
    pub types: Vec<EngineType>,
    pub chunks: Vec<DataChunk>,
    pub rows_changed: Option<i64>,
}

impl CannedResult {
    pub fn new(names: &[&str], types: &[EngineType]) -> Self {
        CannedResult {
            names: names.iter().map(|s| s.to_string()).collect(),
            types: types.to_vec(),
            chunks: vec![],
            rows_changed: None,
        }
    }

    pub fn chunk(mut self, rows: Vec<Vec<EngineValue>>) -> Self {
        self.chunks.push(DataChunk::new(rows));
        self
    }

    pub fn rows_changed(mut self, n: i64) -> Self {
        self.rows_changed = Some(n);
        self
    }
}

pub struct MockDatabase {
    path: String,
    results: Mutex<HashMap<String, CannedResult>>,
    errors: Mutex<HashMap<String, String>>,
    executed: Mutex<Vec<String>>,
}

impl MockDatabase {
    fn new(path: &str) -> Self {
        MockDatabase {
            path: path.to_string(),
            results: Mutex::new(HashMap::new()),
            errors: Mutex::new(HashMap::new()),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn script_result(&self, sql: &str, canned: CannedResult) {
        self.results.lock().unwrap().insert(sql.to_string(), canned);
    }

    pub fn script_error(&self, sql: &str, message: &str) {
        self.errors
            .lock()
            .unwrap()
            .insert(sql.to_string(), message.to_string());
    }

    /// SQL texts executed on any session of this database, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.results.lock().unwrap().clear();
        self.errors.lock().unwrap().clear();
        self.executed.lock().unwrap().clear();
    }

    fn record(&self, sql: &str) {
        self.executed.lock().unwrap().push(sql.to_string());
    }
}

impl std::fmt::Debug for MockDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDatabase").field("path", &self.path).finish()
    }
}

impl EngineDatabase for MockDatabase {
    fn connect(self: Arc<Self>) -> Result<Box<dyn EngineSession>> {
        Ok(Box::new(MockSession {
            database: self,
            interrupted: Arc::new(AtomicBool::new(false)),
            autocommit: true,
        }))
    }

    fn path(&self) -> &str {
        &self.path
    }
}

pub struct MockSession {
    database: Arc<MockDatabase>,
    interrupted: Arc<AtomicBool>,
    autocommit: bool,
}

impl EngineSession for MockSession {
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn EnginePrepared>> {
        if let Some(message) = self.database.errors.lock().unwrap().get(sql) {
            return Err(Error::engine(message.clone()));
        }
        let canned = self.database.results.lock().unwrap().get(sql).cloned();
        Ok(Box::new(MockPrepared {
            database: self.database.clone(),
            interrupted: self.interrupted.clone(),
            sql: sql.to_string(),
            canned,
        }))
    }

    fn set_autocommit(&mut self, autocommit: bool) {
        self.autocommit = autocommit;
    }

    fn commit(&mut self) -> Result<()> {
        self.database.record("COMMIT");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.database.record("ROLLBACK");
        Ok(())
    }

    fn interrupt_handle(&self) -> InterruptHandle {
        let flag = self.interrupted.clone();
        InterruptHandle::new(move || flag.store(true, Ordering::SeqCst))
    }

    fn library_version(&self) -> String {
        LIBRARY_VERSION.to_string()
    }

    fn keywords(&mut self) -> Result<Vec<String>> {
        Ok(["ANALYZE", "PIVOT", "QUALIFY", "STRUCT", "SUMMARIZE"]
            .iter()
            .map(|s| s.to_string())
            .collect())
    }
}

#[derive(Debug)]
struct MockPrepared {
    database: Arc<MockDatabase>,
    interrupted: Arc<AtomicBool>,
    sql: String,
    canned: Option<CannedResult>,
}

impl MockPrepared {
    fn param_marker_count(&self) -> usize {
        // good enough for test SQL; markers inside literals do not occur there
        self.sql.matches('?').count()
    }
}

impl EnginePrepared for MockPrepared {
    fn param_count(&self) -> usize {
        self.param_marker_count()
    }

    fn column_names(&self) -> Vec<String> {
        match &self.canned {
            Some(c) => c.names.clone(),
            None if self.param_marker_count() > 0 => (0..self.param_marker_count())
                .map(|i| format!("col{i}"))
                .collect(),
            None => vec![],
        }
    }

    fn column_types(&self) -> Vec<EngineType> {
        match &self.canned {
            Some(c) => c.types.clone(),
            None if self.param_marker_count() > 0 => {
                vec![EngineType::Unknown; self.param_marker_count()]
            }
            None => vec![],
        }
    }

    fn execute(&mut self, params: Vec<EngineValue>) -> Result<Box<dyn EngineResult>> {
        if self.interrupted.swap(false, Ordering::SeqCst) {
            return Err(Error::engine("INTERRUPT Error: Interrupted!"));
        }
        self.database.record(&self.sql);
        if let Some(canned) = &self.canned {
            return Ok(Box::new(MockResult {
                names: canned.names.clone(),
                types: canned.types.clone(),
                chunks: canned.chunks.clone().into(),
                rows_changed: canned.rows_changed,
            }));
        }
        if !params.is_empty() {
            // echo parameters back as a single row
            let names = (0..params.len()).map(|i| format!("col{i}")).collect();
            let types = params.iter().map(EngineValue::engine_type).collect();
            return Ok(Box::new(MockResult {
                names,
                types,
                chunks: vec![DataChunk::new(vec![params])].into(),
                rows_changed: None,
            }));
        }
        let rows_changed = self
            .sql
            .trim_start()
            .to_ascii_lowercase()
            .starts_with("insert")
            .then_some(1);
        Ok(Box::new(MockResult {
            names: vec![],
            types: vec![],
            chunks: std::collections::VecDeque::new(),
            rows_changed,
        }))
    }
}

struct MockResult {
    names: Vec<String>,
    types: Vec<EngineType>,
    chunks: std::collections::VecDeque<DataChunk>,
    rows_changed: Option<i64>,
}

impl EngineResult for MockResult {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn column_types(&self) -> Vec<EngineType> {
        self.types.clone()
    }

    fn rows_changed(&self) -> Option<i64> {
        self.rows_changed
    }

    fn next_chunk(&mut self) -> Result<Option<DataChunk>> {
        Ok(self.chunks.pop_front())
    }
}
