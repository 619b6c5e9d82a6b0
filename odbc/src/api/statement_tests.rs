use crate::api::test_helpers::{first_sqlstate, TestConnection};
use crate::api::{
    SQLAllocHandle, SQLCloseCursor, SQLExecDirect, SQLExecute, SQLFetch, SQLFreeHandle,
    SQLFreeStmt, SQLGetData, SQLMoreResults, SQLNumResultCols, SQLPrepare, SQLRowCount,
    SQLSetStmtAttr,
};
use crate::handles::definitions::OdbcHandle;
use cstr::to_char_ptr;
use definitions::{
    CDataType, Handle, HandleType, Len, SqlReturn, StatementAttribute, SQL_NTS,
};
use duckdb_odbc_core::engine::mock::CannedResult;
use duckdb_odbc_core::{EngineType, EngineValue};

fn exec_direct(test: &TestConnection, sql: &str) -> SqlReturn {
    let (sql_ptr, _owned) = to_char_ptr(sql);
    SQLExecDirect(test.stmt_handle(), sql_ptr, SQL_NTS as i32)
}

#[test]
fn basic_select_fetches_rows_then_no_data() {
    let test = TestConnection::connect("/tmp/stmt_basic_select.db");
    test.database.script_result(
        "SELECT 1 UNION ALL SELECT 2",
        CannedResult::new(&["n"], &[EngineType::Integer]).chunk(vec![
            vec![EngineValue::Integer(1)],
            vec![EngineValue::Integer(2)],
        ]),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT 1 UNION ALL SELECT 2"));

    let mut column_count: i16 = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLNumResultCols(test.stmt_handle(), &mut column_count)
    );
    assert_eq!(1, column_count);

    for expected in [1i32, 2] {
        assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
        let mut value: i32 = 0;
        let mut indicator: Len = 0;
        assert_eq!(
            SqlReturn::SUCCESS,
            SQLGetData(
                test.stmt_handle(),
                1,
                CDataType::SQL_C_SLONG as i16,
                (&mut value as *mut i32).cast(),
                std::mem::size_of::<i32>() as Len,
                &mut indicator,
            )
        );
        assert_eq!(expected, value);
    }
    assert_eq!(SqlReturn::NO_DATA, SQLFetch(test.stmt_handle()));
}

#[test]
fn execute_without_prepare_is_a_sequence_error() {
    let test = TestConnection::connect("/tmp/stmt_no_prepare.db");
    assert_eq!(SqlReturn::ERROR, SQLExecute(test.stmt_handle()));
    assert_eq!(Some("HY010".to_string()), first_sqlstate(test.stmt));
}

#[test]
fn prepare_then_execute_runs_the_statement() {
    let test = TestConnection::connect("/tmp/stmt_prepare_execute.db");
    let (sql_ptr, _owned) = to_char_ptr("CREATE TABLE t(i INTEGER)");
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLPrepare(test.stmt_handle(), sql_ptr, SQL_NTS as i32)
    );
    // nothing ran yet
    assert!(test.database.executed().is_empty());
    assert_eq!(SqlReturn::SUCCESS, SQLExecute(test.stmt_handle()));
    assert_eq!(vec!["CREATE TABLE t(i INTEGER)".to_string()], test.database.executed());
}

#[test]
fn row_count_reports_dml_changes_and_minus_one_for_selects() {
    let test = TestConnection::connect("/tmp/stmt_row_count.db");
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "INSERT INTO t VALUES (1)"));
    let mut count: Len = 0;
    assert_eq!(SqlReturn::SUCCESS, SQLRowCount(test.stmt_handle(), &mut count));
    assert_eq!(1, count);

    test.database.script_result(
        "SELECT 1",
        CannedResult::new(&["n"], &[EngineType::Integer])
            .chunk(vec![vec![EngineValue::Integer(1)]]),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT 1"));
    assert_eq!(SqlReturn::SUCCESS, SQLRowCount(test.stmt_handle(), &mut count));
    assert_eq!(-1, count);
}

#[test]
fn close_cursor_without_cursor_is_invalid_state() {
    let test = TestConnection::connect("/tmp/stmt_close_cursor.db");
    assert_eq!(SqlReturn::ERROR, SQLCloseCursor(test.stmt_handle()));
    assert_eq!(Some("24000".to_string()), first_sqlstate(test.stmt));
}

#[test]
fn more_results_closes_the_single_result_set() {
    let test = TestConnection::connect("/tmp/stmt_more_results.db");
    test.database.script_result(
        "SELECT 1",
        CannedResult::new(&["n"], &[EngineType::Integer])
            .chunk(vec![vec![EngineValue::Integer(1)]]),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT 1"));
    assert_eq!(SqlReturn::NO_DATA, SQLMoreResults(test.stmt_handle()));
    assert!(test.statement().cursor.read().unwrap().is_none());
}

#[test]
fn free_stmt_close_returns_statement_to_prepared() {
    let test = TestConnection::connect("/tmp/stmt_free_close.db");
    test.database.script_result(
        "SELECT 1",
        CannedResult::new(&["n"], &[EngineType::Integer])
            .chunk(vec![vec![EngineValue::Integer(1)]]),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT 1"));
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLFreeStmt(test.stmt_handle(), definitions::FreeStmtOption::SQL_CLOSE as u16)
    );
    assert!(test.statement().cursor.read().unwrap().is_none());
    // the prepared statement survives a cursor close
    assert!(test.statement().prepared.read().unwrap().is_some());
}

#[test]
fn freed_explicit_descriptor_reverts_to_the_implicit_ard() {
    let test = TestConnection::connect("/tmp/stmt_explicit_desc.db");

    // allocate an explicit descriptor on the connection
    let mut desc: Handle = std::ptr::null_mut();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLAllocHandle(HandleType::SQL_HANDLE_DESC, test.conn, &mut desc)
    );

    // install it as the statement's ARD
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLSetStmtAttr(
            test.stmt_handle(),
            StatementAttribute::SQL_ATTR_APP_ROW_DESC as i32,
            desc.cast(),
            0,
        )
    );
    let implicit = test.statement().attributes.read().unwrap().implicit_app_row_desc;
    let installed = test.statement().attributes.read().unwrap().app_row_desc;
    assert_eq!(installed, desc.cast::<OdbcHandle>());
    assert_ne!(installed, implicit);

    // freeing the explicit descriptor restores the implicit one
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLFreeHandle(HandleType::SQL_HANDLE_DESC, desc)
    );
    let reverted = test.statement().attributes.read().unwrap().app_row_desc;
    assert_eq!(implicit, reverted);

    // and the statement still fetches correctly afterwards
    test.database.script_result(
        "SELECT 1",
        CannedResult::new(&["n"], &[EngineType::Integer])
            .chunk(vec![vec![EngineValue::Integer(1)]]),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT 1"));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
}

#[test]
fn connection_free_destroys_leaked_statements() {
    let database = duckdb_odbc_core::engine::mock::factory().database("/tmp/stmt_leak.db");
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
    let mut stmt: Handle = std::ptr::null_mut();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLAllocHandle(HandleType::SQL_HANDLE_STMT, conn, &mut stmt)
    );
    // the host "forgets" the statement; freeing the connection must not leak
    // or double free
    assert_eq!(SqlReturn::SUCCESS, SQLFreeHandle(HandleType::SQL_HANDLE_DBC, conn));
    assert_eq!(SqlReturn::SUCCESS, SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env));
}
