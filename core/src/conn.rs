//! Engine-side connection assembly: option parsing, DSN completion,
//! instance-cache lookup, and session-init execution.

use crate::engine::{
    engine_factory, EngineDatabase, EnginePrepared, EngineSession, InterruptHandle,
};
use crate::err::{Error, Result};
use crate::instance;
use crate::odbc_uri::{self, ParsedConnectionString};
use crate::session_init::{
    read_sql_file, SessionInitSqlFile, SQL_FILE_OPTION, SQL_FILE_SHA256_OPTION,
};
use shared_sql_utils::DsnSource;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result of a successful connect: the live connection plus everything the
/// odbc layer turns into diagnostics.
pub struct ConnectOutcome {
    pub connection: EngineConnection,
    pub warnings: Vec<Error>,
    /// Present when a session-init file ran; its text goes into an
    /// informational diagnostic for traceability.
    pub session_init: Option<SessionInitSqlFile>,
}

pub struct EngineConnection {
    database: Option<Arc<dyn EngineDatabase>>,
    pub session: Box<dyn EngineSession>,
    interrupt: InterruptHandle,
    db_path: String,
    pub dsn: String,
}

impl std::fmt::Debug for EngineConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConnection")
            .field("db_path", &self.db_path)
            .field("dsn", &self.dsn)
            .finish()
    }
}

impl EngineConnection {
    /// Open (or join) the database named by the connection string and run
    /// any session-init SQL. `autocommit` seeds the engine session.
    pub fn connect(connection_string: &str, autocommit: bool) -> Result<ConnectOutcome> {
        let factory = engine_factory();
        let option_names = factory.option_names();
        let mut parsed = odbc_uri::parse(connection_string, &option_names)?;

        if let Some(dsn) = parsed.dsn().map(str::to_string) {
            if let Ok(source) = DsnSource::new(&dsn) {
                odbc_uri::complete_from_dsn(&mut parsed, &source, &option_names);
            }
        }

        let db_path = parsed
            .get("database")
            .unwrap_or(instance::IN_MEMORY_PATH)
            .to_string();
        let dsn = parsed.dsn().unwrap_or("").to_string();

        let init_file = parsed.get(SQL_FILE_OPTION).unwrap_or("").to_string();
        let init_sha = parsed.get(SQL_FILE_SHA256_OPTION).unwrap_or("").to_string();
        let session_init = read_sql_file(&init_file, &init_sha)?;

        let engine_options = engine_option_map(&parsed);

        let (database, db_created) = instance::get_or_create(&db_path, &engine_options, &*factory)?;
        log::debug!("connected to {db_path} (created: {db_created})");
        let mut session = database.clone().connect()?;
        session.set_autocommit(autocommit);
        let interrupt = session.interrupt_handle();

        let mut connection = EngineConnection {
            database: Some(database),
            session,
            interrupt,
            db_path,
            dsn,
        };

        if !session_init.is_empty() {
            if db_created && !session_init.db_init_sql.is_empty() {
                connection.run_init_statement(&session_init.db_init_sql)?;
            }
            if !session_init.conn_init_sql.is_empty() {
                connection.run_init_statement(&session_init.conn_init_sql)?;
            }
        }

        Ok(ConnectOutcome {
            connection,
            warnings: std::mem::take(&mut parsed.warnings),
            session_init: (!session_init.is_empty()).then_some(session_init),
        })
    }

    pub fn prepare(&mut self, sql: &str) -> Result<Box<dyn EnginePrepared>> {
        self.session.prepare(sql)
    }

    pub fn commit(&mut self) -> Result<()> {
        self.session.commit()
    }

    pub fn rollback(&mut self) -> Result<()> {
        self.session.rollback()
    }

    /// Handle usable from any thread while an execute is in flight.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    pub fn database_path(&self) -> &str {
        &self.db_path
    }

    /// Run one statement on this session outside the statement machinery;
    /// the result is drained and discarded.
    pub fn run_transient(&mut self, sql: &str) -> Result<()> {
        let mut prepared = self.session.prepare(sql)?;
        let mut result = prepared.execute(vec![])?;
        while result.next_chunk()?.is_some() {}
        Ok(())
    }

    fn run_init_statement(&mut self, sql: &str) -> Result<()> {
        self.run_transient(sql)
            .map_err(|e| Error::SessionInitExecution(e.to_string(), sql.to_string()))
    }
}

impl Drop for EngineConnection {
    fn drop(&mut self) {
        let path = self.db_path.clone();
        // release our hold before probing the cache entry
        self.database.take();
        if path != instance::IN_MEMORY_PATH {
            instance::evict_if_stale(&path);
        }
    }
}

fn engine_option_map(parsed: &ParsedConnectionString) -> BTreeMap<String, String> {
    let mut engine_options = parsed.options.clone();
    for local in odbc_uri::ODBC_LOCAL_KEYS {
        engine_options.remove(local);
    }
    engine_options.remove(SQL_FILE_OPTION);
    engine_options.remove(SQL_FILE_SHA256_OPTION);
    normalize_windows_path_separators(&mut engine_options, "allowed_paths");
    normalize_windows_path_separators(&mut engine_options, "allowed_directories");
    engine_options
}

// The engine rejects back slashes in path-list options.
#[cfg(windows)]
fn normalize_windows_path_separators(options: &mut BTreeMap<String, String>, key: &str) {
    if let Some(value) = options.get_mut(key) {
        *value = value.replace('\\', "/");
    }
}

#[cfg(not(windows))]
fn normalize_windows_path_separators(_options: &mut BTreeMap<String, String>, _key: &str) {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::mock;

    #[test]
    fn connect_in_memory_reports_no_warnings() {
        let outcome = EngineConnection::connect("database=:memory:", true).unwrap();
        assert!(outcome.warnings.is_empty());
        assert!(outcome.session_init.is_none());
        assert_eq!(":memory:", outcome.connection.database_path());
    }

    #[test]
    fn unknown_options_surface_as_warnings() {
        let outcome =
            EngineConnection::connect("database=:memory:;threds=4", true).unwrap();
        assert_eq!(1, outcome.warnings.len());
        assert!(outcome.warnings[0].to_string().contains("threds"));
    }

    #[test]
    fn transient_statements_reach_the_engine() {
        let db = mock::factory().database("/tmp/conn_transient.db");
        db.clear();
        let mut outcome =
            EngineConnection::connect("database=/tmp/conn_transient.db", true).unwrap();
        outcome
            .connection
            .run_transient("CREATE TABLE t(i INTEGER)")
            .unwrap();
        assert!(db
            .executed()
            .contains(&"CREATE TABLE t(i INTEGER)".to_string()));
    }
}
