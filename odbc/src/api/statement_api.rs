//! Prepare and execute.

use crate::api::fetch::populate_ird_from_shape;
use crate::api::handle_api::close_cursor;
use crate::api::parameters::{execute_with_params, ExecOutcome};
use crate::errors::ODBCError;
use crate::handles::definitions::{OdbcHandleRef, Statement, StatementState};
use crate::must_be_valid;
use cstr::{input_text_to_string_a, input_text_to_string_w, WideChar};
use definitions::{Char, Handle, HandleType, HStmt, Integer, SqlReturn};
use duckdb_odbc_core::type_info::ColumnMetadata;

fn sql_prepare_internal(
    handle: &crate::handles::definitions::OdbcHandle,
    sql: &str,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    let conn_handle = stmt.connection;
    if conn_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let conn = must_be_valid!(unsafe { (*conn_handle).as_connection() });

    let prepared = {
        let mut engine_guard = conn.engine_connection.write().unwrap();
        let Some(engine) = engine_guard.as_mut() else {
            handle.add_diag_info(
                ODBCError::FunctionSequenceError(function_name),
                function_name,
            );
            return SqlReturn::ERROR;
        };
        match engine.prepare(sql) {
            Ok(prepared) => prepared,
            Err(e) => {
                handle.add_diag_info(ODBCError::Core(e), function_name);
                return SqlReturn::ERROR;
            }
        }
    };

    close_cursor(stmt);

    // the IPD learns the parameter count at prepare; types default until
    // the client binds
    let param_count = prepared.param_count();
    {
        let ipd = stmt.ipd();
        let mut info = ipd.info.write().unwrap();
        info.reset_records();
        if param_count > 0 {
            info.record_mut(param_count - 1);
        }
    }

    let metadata: Vec<ColumnMetadata> = prepared
        .column_names()
        .into_iter()
        .zip(prepared.column_types())
        .map(|(name, ty)| ColumnMetadata::new(name, ty))
        .collect();
    populate_ird_from_shape(stmt, &metadata);

    *stmt.prepared.write().unwrap() = Some(prepared);
    *stmt.row_count.write().unwrap() = None;
    *stmt.state.write().unwrap() = StatementState::Prepared;
    SqlReturn::SUCCESS
}

/// Run a driver-composed query (catalog functions, GetTypeInfo) and open
/// its result as this statement's cursor.
pub(crate) fn open_result_cursor(
    handle: &crate::handles::definitions::OdbcHandle,
    stmt: &Statement,
    sql: &str,
    function_name: &'static str,
) -> SqlReturn {
    let conn_handle = stmt.connection;
    if conn_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let conn = must_be_valid!(unsafe { (*conn_handle).as_connection() });
    let result = {
        let mut engine_guard = conn.engine_connection.write().unwrap();
        let Some(engine) = engine_guard.as_mut() else {
            handle.add_diag_info(
                ODBCError::FunctionSequenceError(function_name),
                function_name,
            );
            return SqlReturn::ERROR;
        };
        let executed = engine
            .prepare(sql)
            .and_then(|mut prepared| prepared.execute(vec![]));
        match executed {
            Ok(result) => result,
            Err(e) => {
                handle.add_diag_info(ODBCError::Core(e), function_name);
                return SqlReturn::ERROR;
            }
        }
    };
    open_cursor_over(stmt, duckdb_odbc_core::EngineCursor::new(result, false));
    SqlReturn::SUCCESS
}

/// Open a cursor the driver materialized itself (catalog stubs with a
/// documented shape and zero rows).
pub(crate) fn open_empty_cursor(
    stmt: &Statement,
    names: &[&str],
    types: &[duckdb_odbc_core::EngineType],
) -> SqlReturn {
    let result = Box::new(duckdb_odbc_core::EmptyResult::new(names, types));
    open_cursor_over(stmt, duckdb_odbc_core::EngineCursor::new(result, false));
    SqlReturn::SUCCESS
}

fn open_cursor_over(stmt: &Statement, cursor: duckdb_odbc_core::EngineCursor) {
    *stmt.cursor.write().unwrap() = Some(cursor);
    *stmt.var_data_cache.write().unwrap() = Some(std::collections::HashMap::new());
    *stmt.row_count.write().unwrap() = None;
    *stmt.state.write().unwrap() = StatementState::Executed;
    crate::api::fetch::populate_ird(stmt);
}

pub(crate) fn sql_execute_internal(
    handle: &crate::handles::definitions::OdbcHandle,
    stmt: &Statement,
    function_name: &'static str,
) -> SqlReturn {
    if stmt.prepared.read().unwrap().is_none() {
        handle.add_diag_info(
            ODBCError::FunctionSequenceError(function_name),
            function_name,
        );
        return SqlReturn::ERROR;
    }
    *stmt.cursor.write().unwrap() = None;
    match unsafe { execute_with_params(handle, stmt, 0, function_name) } {
        ExecOutcome::Done(ret) => ret,
        ExecOutcome::NeedData => SqlReturn::NEED_DATA,
    }
}

#[no_mangle]
pub extern "C" fn SQLPrepare(
    statement_handle: HStmt,
    statement_text: *const Char,
    text_length: Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let sql = unsafe { input_text_to_string_a(statement_text, text_length as isize) };
    sql_prepare_internal(handle, &sql, "SQLPrepare")
}

#[no_mangle]
pub extern "C" fn SQLPrepareW(
    statement_handle: HStmt,
    statement_text: *const WideChar,
    text_length: Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let sql = unsafe { input_text_to_string_w(statement_text, text_length as isize) };
    sql_prepare_internal(handle, &sql, "SQLPrepareW")
}

#[no_mangle]
pub extern "C" fn SQLExecute(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    sql_execute_internal(handle, stmt, "SQLExecute")
}

#[no_mangle]
pub extern "C" fn SQLExecDirect(
    statement_handle: HStmt,
    statement_text: *const Char,
    text_length: Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let sql = unsafe { input_text_to_string_a(statement_text, text_length as isize) };
    let prepare_ret = sql_prepare_internal(handle, &sql, "SQLExecDirect");
    if !prepare_ret.succeeded() {
        return prepare_ret;
    }
    let stmt = must_be_valid!(handle.as_statement());
    sql_execute_internal(handle, stmt, "SQLExecDirect")
}

#[no_mangle]
pub extern "C" fn SQLExecDirectW(
    statement_handle: HStmt,
    statement_text: *const WideChar,
    text_length: Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let sql = unsafe { input_text_to_string_w(statement_text, text_length as isize) };
    let prepare_ret = sql_prepare_internal(handle, &sql, "SQLExecDirectW");
    if !prepare_ret.succeeded() {
        return prepare_ret;
    }
    let stmt = must_be_valid!(handle.as_statement());
    sql_execute_internal(handle, stmt, "SQLExecDirectW")
}

#[no_mangle]
pub extern "C" fn SQLCancel(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    let stmt = must_be_valid!(handle.as_statement());
    let conn_handle = stmt.connection;
    if conn_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let conn = must_be_valid!(unsafe { (*conn_handle).as_connection() });
    // the interrupt handle lives outside the session lock so a busy
    // execute on another thread cannot block the cancel
    if let Some(interrupt) = conn.interrupt.read().unwrap().as_ref() {
        interrupt.interrupt();
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLCancelHandle(handle_type: HandleType, handle: Handle) -> SqlReturn {
    if handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    match handle_type {
        HandleType::SQL_HANDLE_STMT => SQLCancel(handle.cast()),
        HandleType::SQL_HANDLE_DBC => {
            let handle = OdbcHandleRef::from(handle);
            let conn = must_be_valid!(handle.as_connection());
            if let Some(interrupt) = conn.interrupt.read().unwrap().as_ref() {
                interrupt.interrupt();
            }
            SqlReturn::SUCCESS
        }
        _ => SqlReturn::INVALID_HANDLE,
    }
}
