use crate::api::test_helpers::{first_sqlstate, TestConnection};
use crate::api::{SQLAllocHandle, SQLDriverConnect, SQLFreeHandle};
use crate::handles::definitions::OdbcHandle;
use cstr::to_char_ptr;
use definitions::{Handle, HandleType, SqlReturn};
use duckdb_odbc_core::engine::mock;
use std::io::Write;

fn raw_connect(conn: Handle, connection_string: &str) -> SqlReturn {
    let (ptr, _owned) = to_char_ptr(connection_string);
    SQLDriverConnect(
        conn.cast(),
        std::ptr::null_mut(),
        ptr,
        connection_string.len() as i16,
        std::ptr::null_mut(),
        0,
        std::ptr::null_mut(),
        0,
    )
}

fn alloc_env_dbc() -> (Handle, Handle) {
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
    (env, conn)
}

#[test]
fn unknown_option_connects_with_a_did_you_mean_warning() {
    let (env, conn) = alloc_env_dbc();
    let ret = raw_connect(conn, "database=/tmp/connect_warn.db;acces_mode=read_only");
    assert_eq!(SqlReturn::SUCCESS_WITH_INFO, ret);
    assert_eq!(Some("01S09".to_string()), first_sqlstate(conn));
    let handle = unsafe { &*conn.cast::<OdbcHandle>() };
    let errors = handle.errors().read().unwrap();
    let message = errors[0].error.get_error_message();
    assert!(message.contains("acces_mode"), "{message}");
    assert!(message.contains("access_mode"), "{message}");
    drop(errors);
    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
}

#[test]
fn session_init_options_are_dsn_only() {
    let (env, conn) = alloc_env_dbc();
    let ret = raw_connect(conn, "database=:memory:;session_init_sql_file=/tmp/init.sql");
    assert_eq!(SqlReturn::ERROR, ret);
    assert_eq!(Some("01S09".to_string()), first_sqlstate(conn));
    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
}

#[test]
fn second_connect_reports_already_established() {
    let (env, conn) = alloc_env_dbc();
    assert_eq!(
        SqlReturn::SUCCESS,
        raw_connect(conn, "database=/tmp/connect_twice.db")
    );
    assert_eq!(SqlReturn::ERROR, raw_connect(conn, "database=/tmp/connect_twice.db"));
    assert_eq!(Some("01S00".to_string()), first_sqlstate(conn));
    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
}

#[test]
fn session_init_file_runs_on_connect() {
    // the DSN source resolves through $ODBCINI
    let dir = tempfile::tempdir().unwrap();
    let init_path = dir.path().join("init.sql");
    let mut init_file = std::fs::File::create(&init_path).unwrap();
    write!(
        init_file,
        "CREATE TABLE tab1(col1 int); /* DUCKDB_CONNECTION_INIT_BELOW_MARKER */ INSERT INTO tab1 VALUES(42);"
    )
    .unwrap();
    init_file.flush().unwrap();

    let ini_path = dir.path().join("odbc.ini");
    let mut ini_file = std::fs::File::create(&ini_path).unwrap();
    write!(
        ini_file,
        "[quack_init]\ndatabase = /tmp/connect_session_init.db\nsession_init_sql_file = {}\n",
        init_path.display()
    )
    .unwrap();
    ini_file.flush().unwrap();
    std::env::set_var("ODBCINI", &ini_path);

    let database = mock::factory().database("/tmp/connect_session_init.db");
    database.clear();

    let (env, conn) = alloc_env_dbc();
    let ret = raw_connect(conn, "dsn=quack_init");
    assert_eq!(SqlReturn::SUCCESS_WITH_INFO, ret);

    let executed = database.executed();
    assert!(executed.contains(&"CREATE TABLE tab1(col1 int);".to_string()), "{executed:?}");
    assert!(executed.contains(&"INSERT INTO tab1 VALUES(42);".to_string()), "{executed:?}");

    // the file text is surfaced as an informational diagnostic
    let handle = unsafe { &*conn.cast::<OdbcHandle>() };
    let errors = handle.errors().read().unwrap();
    assert!(errors
        .iter()
        .any(|r| r.error.get_error_message().contains("CREATE TABLE tab1")));
    drop(errors);

    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
    std::env::remove_var("ODBCINI");
}

#[test]
fn disconnect_releases_the_engine_connection() {
    let test = TestConnection::connect("/tmp/connect_release.db");
    let conn_handle = unsafe { &*test.conn.cast::<OdbcHandle>() };
    assert!(conn_handle
        .as_connection()
        .unwrap()
        .engine_connection
        .read()
        .unwrap()
        .is_some());
    assert_eq!(SqlReturn::SUCCESS, crate::api::SQLDisconnect(test.conn.cast()));
    assert!(conn_handle
        .as_connection()
        .unwrap()
        .engine_connection
        .read()
        .unwrap()
        .is_none());
}
