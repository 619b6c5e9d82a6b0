use crate::api::test_helpers::{first_sqlstate, TestConnection};
use crate::api::{SQLGetFunctions, SQLGetInfo, SQLGetInfoW};
use cstr::from_widechar_ref_lossy;
use definitions::{
    InfoType, SqlReturn, SQL_API_ODBC3_ALL_FUNCTIONS, SQL_API_ODBC3_ALL_FUNCTIONS_SIZE,
    SQL_API_SQLFETCH, SQL_API_SQLFETCHSCROLL, SQL_API_SQLTABLES,
};
use duckdb_odbc_core::engine::mock;

#[test]
fn dbms_name_truncates_per_the_contract() {
    let test = TestConnection::connect("/tmp/info_dbms_name.db");
    let mut buf = [0u8; 4];
    let mut len: i16 = 0;
    let ret = SQLGetInfo(
        test.conn.cast(),
        InfoType::SQL_DBMS_NAME as u16,
        buf.as_mut_ptr().cast(),
        buf.len() as i16,
        &mut len,
    );
    assert_eq!(SqlReturn::SUCCESS_WITH_INFO, ret);
    assert_eq!(6, len);
    assert_eq!(b"Duc\0", &buf);
    assert_eq!(Some("01004".to_string()), first_sqlstate(test.conn));
}

#[test]
fn dbms_version_comes_from_the_engine() {
    let test = TestConnection::connect("/tmp/info_dbms_ver.db");
    let mut buf = [0u16; 32];
    let mut len: i16 = 0;
    let ret = SQLGetInfoW(
        test.conn.cast(),
        InfoType::SQL_DBMS_VER as u16,
        buf.as_mut_ptr().cast(),
        (buf.len() * 2) as i16,
        &mut len,
    );
    assert_eq!(SqlReturn::SUCCESS, ret);
    let text = from_widechar_ref_lossy(&buf[..(len as usize) / 2]);
    assert_eq!(mock::LIBRARY_VERSION, text);
}

#[test]
fn unknown_info_type_is_informational_not_fatal() {
    let test = TestConnection::connect("/tmp/info_unknown.db");
    let mut buf = [0u8; 16];
    let mut len: i16 = 0;
    let ret = SQLGetInfo(
        test.conn.cast(),
        64999,
        buf.as_mut_ptr().cast(),
        buf.len() as i16,
        &mut len,
    );
    assert_eq!(SqlReturn::SUCCESS, ret);
    assert_eq!(Some("01000".to_string()), first_sqlstate(test.conn));
}

#[test]
fn numeric_info_with_null_pointer_is_rejected() {
    let test = TestConnection::connect("/tmp/info_null_ptr.db");
    let ret = SQLGetInfo(
        test.conn.cast(),
        InfoType::SQL_TXN_CAPABLE as u16,
        std::ptr::null_mut(),
        0,
        std::ptr::null_mut(),
    );
    assert_eq!(SqlReturn::ERROR, ret);
    assert_eq!(Some("HY024".to_string()), first_sqlstate(test.conn));
}

#[test]
fn get_functions_reports_single_ids() {
    let test = TestConnection::connect("/tmp/info_functions.db");
    for id in [SQL_API_SQLFETCH, SQL_API_SQLFETCHSCROLL, SQL_API_SQLTABLES] {
        let mut supported: u16 = 0;
        assert_eq!(
            SqlReturn::SUCCESS,
            SQLGetFunctions(test.conn.cast(), id, &mut supported)
        );
        assert_eq!(1, supported, "function id {id}");
    }
    let mut supported: u16 = 1;
    // SQLBrowseConnect is a stub, not a supported function
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetFunctions(test.conn.cast(), definitions::SQL_API_SQLBROWSECONNECT, &mut supported)
    );
    assert_eq!(0, supported);
}

#[test]
fn odbc3_bitmap_sets_bits_for_implemented_functions() {
    let test = TestConnection::connect("/tmp/info_functions_bitmap.db");
    let mut bitmap = [0u16; SQL_API_ODBC3_ALL_FUNCTIONS_SIZE];
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetFunctions(
            test.conn.cast(),
            SQL_API_ODBC3_ALL_FUNCTIONS,
            bitmap.as_mut_ptr()
        )
    );
    let is_set =
        |id: u16| bitmap[usize::from(id >> 4)] & (1 << (id & 0xF)) != 0;
    assert!(is_set(SQL_API_SQLFETCH));
    assert!(is_set(SQL_API_SQLFETCHSCROLL));
    assert!(is_set(definitions::SQL_API_SQLGETDIAGREC));
    assert!(!is_set(definitions::SQL_API_SQLBROWSECONNECT));
}
