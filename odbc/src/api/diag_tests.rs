use crate::api::test_helpers::TestConnection;
use crate::api::{SQLExecDirect, SQLGetDiagField, SQLGetDiagRec};
use crate::errors::ODBCError;
use crate::handles::definitions::OdbcHandle;
use cstr::to_char_ptr;
use definitions::{DiagType, HandleType, Integer, SqlReturn, SQL_NTS};

fn handle_of(test: &TestConnection) -> &OdbcHandle {
    unsafe { &*test.stmt.cast::<OdbcHandle>() }
}

fn read_diag_rec(test: &TestConnection, rec: i16) -> (SqlReturn, String, String, i32) {
    let mut state = [0u8; 6];
    let mut native: Integer = 0;
    let mut message = [0u8; 512];
    let mut message_len: i16 = 0;
    let ret = SQLGetDiagRec(
        HandleType::SQL_HANDLE_STMT,
        test.stmt,
        rec,
        state.as_mut_ptr(),
        &mut native,
        message.as_mut_ptr(),
        message.len() as i16,
        &mut message_len,
    );
    let sqlstate = String::from_utf8_lossy(&state[..5]).into_owned();
    let message = String::from_utf8_lossy(&message[..message_len.max(0) as usize]).into_owned();
    (ret, sqlstate, message, native)
}

#[test]
fn engine_errors_surface_with_their_sqlstate() {
    let test = TestConnection::connect("/tmp/diag_engine_error.db");
    test.database
        .script_error("SELECT busted", "Parser Error: syntax error at 'busted'");
    let (sql_ptr, _owned) = to_char_ptr("SELECT busted");
    assert_eq!(
        SqlReturn::ERROR,
        SQLExecDirect(test.stmt_handle(), sql_ptr, SQL_NTS as i32)
    );
    let (ret, sqlstate, message, native) = read_diag_rec(&test, 1);
    assert_eq!(SqlReturn::SUCCESS, ret);
    assert_eq!("42000", sqlstate);
    assert!(message.contains("Parser Error"), "{message}");
    // message text carries the component prefix
    assert!(message.starts_with("ODBC_"), "{message}");
    assert!(message.contains("SQLExecDirect"), "{message}");
    assert_eq!(0, native);
}

#[test]
fn records_repeat_until_the_next_entrypoint_clears_them() {
    let test = TestConnection::connect("/tmp/diag_repeat.db");
    test.database.script_error("SELECT busted", "nope");
    let (sql_ptr, _owned) = to_char_ptr("SELECT busted");
    assert_eq!(
        SqlReturn::ERROR,
        SQLExecDirect(test.stmt_handle(), sql_ptr, SQL_NTS as i32)
    );
    let first = read_diag_rec(&test, 1);
    let second = read_diag_rec(&test, 1);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2, second.2);
    // reading past the last record reports no data
    assert_eq!(SqlReturn::NO_DATA, read_diag_rec(&test, 2).0);
}

#[test]
fn diag_number_and_class_origin_fields() {
    let test = TestConnection::connect("/tmp/diag_fields.db");
    handle_of(&test).add_diag_info(ODBCError::OutStringTruncated(4), "SQLGetData");
    handle_of(&test).add_diag_info(ODBCError::Unimplemented("SQLBulkOperations"), "SQLBulkOperations");

    let mut count: Integer = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetDiagField(
            HandleType::SQL_HANDLE_STMT,
            test.stmt,
            0,
            DiagType::SQL_DIAG_NUMBER as i16,
            (&mut count as *mut Integer).cast(),
            0,
            std::ptr::null_mut(),
        )
    );
    assert_eq!(2, count);

    let mut origin = [0u8; 32];
    let mut origin_len: i16 = 0;
    // 01004 is an ISO class
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetDiagField(
            HandleType::SQL_HANDLE_STMT,
            test.stmt,
            1,
            DiagType::SQL_DIAG_CLASS_ORIGIN as i16,
            origin.as_mut_ptr().cast(),
            origin.len() as i16,
            &mut origin_len,
        )
    );
    assert_eq!(
        "ISO 9075",
        std::str::from_utf8(&origin[..origin_len as usize]).unwrap()
    );

    // HYC00 is ODBC's own class
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetDiagField(
            HandleType::SQL_HANDLE_STMT,
            test.stmt,
            2,
            DiagType::SQL_DIAG_CLASS_ORIGIN as i16,
            origin.as_mut_ptr().cast(),
            origin.len() as i16,
            &mut origin_len,
        )
    );
    assert_eq!(
        "ODBC 3.0",
        std::str::from_utf8(&origin[..origin_len as usize]).unwrap()
    );
}

#[test]
fn sqlstate_field_reads_by_record_index() {
    let test = TestConnection::connect("/tmp/diag_sqlstate_field.db");
    handle_of(&test).add_diag_info(ODBCError::InvalidCursorState, "SQLGetData");
    let mut state = [0u8; 8];
    let mut state_len: i16 = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetDiagField(
            HandleType::SQL_HANDLE_STMT,
            test.stmt,
            1,
            DiagType::SQL_DIAG_SQLSTATE as i16,
            state.as_mut_ptr().cast(),
            state.len() as i16,
            &mut state_len,
        )
    );
    assert_eq!("24000", std::str::from_utf8(&state[..5]).unwrap());
}
