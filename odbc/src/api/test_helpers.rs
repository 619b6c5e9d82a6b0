//! Fixtures the api tests share: a connected statement over the scripted
//! mock engine, torn down through the same entrypoints a host would use.

use crate::api::{SQLAllocHandle, SQLDriverConnect, SQLFreeHandle};
use crate::handles::definitions::{OdbcHandle, Statement};
use definitions::{Handle, HandleType, SqlReturn};
use duckdb_odbc_core::engine::mock::{self, MockDatabase};
use std::sync::Arc;

pub(crate) struct TestConnection {
    pub env: Handle,
    pub conn: Handle,
    pub stmt: Handle,
    pub database: Arc<MockDatabase>,
}

impl TestConnection {
    /// Allocate env/dbc/stmt and connect to the scripted mock database at
    /// `path`. Paths must be unique per test; the mock registry is global.
    pub fn connect(path: &str) -> TestConnection {
        let database = mock::factory().database(path);
        database.clear();

        let mut env: Handle = std::ptr::null_mut();
        assert_eq!(
            SqlReturn::SUCCESS,
            SQLAllocHandle(HandleType::SQL_HANDLE_ENV, std::ptr::null_mut(), &mut env)
        );
        let mut conn: Handle = std::ptr::null_mut();
        assert_eq!(
            SqlReturn::SUCCESS,
            SQLAllocHandle(HandleType::SQL_HANDLE_DBC, env, &mut conn)
        );
        let connection_string = format!("database={path}");
        let (conn_str_ptr, _owned) = cstr::to_char_ptr(&connection_string);
        let ret = SQLDriverConnect(
            conn.cast(),
            std::ptr::null_mut(),
            conn_str_ptr,
            connection_string.len() as i16,
            std::ptr::null_mut(),
            0,
            std::ptr::null_mut(),
            0,
        );
        assert!(ret.succeeded(), "driver connect failed: {ret:?}");
        let mut stmt: Handle = std::ptr::null_mut();
        assert_eq!(
            SqlReturn::SUCCESS,
            SQLAllocHandle(HandleType::SQL_HANDLE_STMT, conn, &mut stmt)
        );
        TestConnection {
            env,
            conn,
            stmt,
            database,
        }
    }

    pub fn statement(&self) -> &Statement {
        unsafe {
            (*self.stmt.cast::<OdbcHandle>())
                .as_statement()
                .expect("stmt handle")
        }
    }

    pub fn stmt_handle(&self) -> definitions::HStmt {
        self.stmt.cast()
    }
}

impl Drop for TestConnection {
    fn drop(&mut self) {
        // freeing the env cascades to the connection and statement
        SQLFreeHandle(HandleType::SQL_HANDLE_ENV, self.env);
    }
}

/// First diagnostic SQLSTATE recorded on a handle.
pub(crate) fn first_sqlstate(handle: Handle) -> Option<String> {
    let odbc_handle = unsafe { &*handle.cast::<OdbcHandle>() };
    let errors = odbc_handle.errors().read().unwrap();
    errors.first().map(|r| r.error.get_sql_state())
}
