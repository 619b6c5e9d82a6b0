use crate::api::test_helpers::{first_sqlstate, TestConnection};
use crate::api::{
    SQLBindParameter, SQLExecDirect, SQLExecute, SQLFetch, SQLGetData, SQLNumParams, SQLParamData,
    SQLPrepare, SQLPutData, SQLSetStmtAttr,
};
use cstr::{to_char_ptr, to_widechar_vec};
use definitions::{
    CDataType, Len, Numeric, ParamType, Pointer, SqlDataType, SqlReturn, StatementAttribute, ULen,
    USmallInt, MAX_NUMERIC_LEN, SQL_DATA_AT_EXEC, SQL_NTS,
};
fn prepare(test: &TestConnection, sql: &str) {
    let (sql_ptr, _owned) = to_char_ptr(sql);
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLPrepare(test.stmt_handle(), sql_ptr, SQL_NTS as i32)
    );
}

#[test]
fn bind_parameter_index_zero_is_invalid() {
    let test = TestConnection::connect("/tmp/param_index_zero.db");
    let mut value: i32 = 1;
    let ret = SQLBindParameter(
        test.stmt_handle(),
        0,
        ParamType::SQL_PARAM_INPUT as i16,
        CDataType::SQL_C_SLONG as i16,
        SqlDataType::SQL_INTEGER as i16,
        0,
        0,
        (&mut value as *mut i32).cast(),
        0,
        std::ptr::null_mut(),
    );
    assert_eq!(SqlReturn::ERROR, ret);
    assert_eq!(Some("07009".to_string()), first_sqlstate(test.stmt));
}

#[test]
fn output_parameters_are_unsupported() {
    let test = TestConnection::connect("/tmp/param_output.db");
    let mut value: i32 = 1;
    let ret = SQLBindParameter(
        test.stmt_handle(),
        1,
        ParamType::SQL_PARAM_OUTPUT as i16,
        CDataType::SQL_C_SLONG as i16,
        SqlDataType::SQL_INTEGER as i16,
        0,
        0,
        (&mut value as *mut i32).cast(),
        0,
        std::ptr::null_mut(),
    );
    assert_eq!(SqlReturn::ERROR, ret);
    assert_eq!(Some("HYC00".to_string()), first_sqlstate(test.stmt));
}

#[test]
fn unknown_sql_type_is_inconsistent() {
    let test = TestConnection::connect("/tmp/param_bad_type.db");
    let mut value: i32 = 1;
    let ret = SQLBindParameter(
        test.stmt_handle(),
        1,
        ParamType::SQL_PARAM_INPUT as i16,
        CDataType::SQL_C_SLONG as i16,
        SqlDataType::SQL_GUID as i16,
        0,
        0,
        (&mut value as *mut i32).cast(),
        0,
        std::ptr::null_mut(),
    );
    assert_eq!(SqlReturn::ERROR, ret);
    assert_eq!(Some("HY021".to_string()), first_sqlstate(test.stmt));
}

#[test]
fn parameter_round_trip_through_execute() {
    let test = TestConnection::connect("/tmp/param_round_trip.db");
    prepare(&test, "SELECT ?");

    let mut param_count: i16 = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLNumParams(test.stmt_handle(), &mut param_count)
    );
    assert_eq!(1, param_count);

    let mut value: i64 = 42_424_242;
    let mut indicator: Len = std::mem::size_of::<i64>() as Len;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindParameter(
            test.stmt_handle(),
            1,
            ParamType::SQL_PARAM_INPUT as i16,
            CDataType::SQL_C_SBIGINT as i16,
            SqlDataType::SQL_BIGINT as i16,
            0,
            0,
            (&mut value as *mut i64).cast(),
            std::mem::size_of::<i64>() as Len,
            &mut indicator,
        )
    );
    assert_eq!(SqlReturn::SUCCESS, SQLExecute(test.stmt_handle()));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));

    let mut fetched: i64 = 0;
    let mut fetched_ind: Len = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetData(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_SBIGINT as i16,
            (&mut fetched as *mut i64).cast(),
            std::mem::size_of::<i64>() as Len,
            &mut fetched_ind,
        )
    );
    assert_eq!(42_424_242, fetched);
}

#[test]
fn numeric_parameter_decodes_the_mantissa() {
    let test = TestConnection::connect("/tmp/param_numeric.db");
    prepare(&test, "SELECT ?");

    let mut numeric = Numeric {
        precision: 38,
        scale: 0,
        sign: 1,
        val: [
            0x4E, 0xF3, 0x38, 0xDE, 0x50, 0x90, 0x49, 0xC4, 0x13, 0x33, 0x02, 0xF0, 0xF6, 0xB0,
            0x49, 0x09,
        ],
    };
    let mut indicator: Len = MAX_NUMERIC_LEN as Len;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindParameter(
            test.stmt_handle(),
            1,
            ParamType::SQL_PARAM_INPUT as i16,
            CDataType::SQL_C_NUMERIC as i16,
            SqlDataType::SQL_NUMERIC as i16,
            38,
            0,
            (&mut numeric as *mut Numeric).cast(),
            std::mem::size_of::<Numeric>() as Len,
            &mut indicator,
        )
    );
    assert_eq!(SqlReturn::SUCCESS, SQLExecute(test.stmt_handle()));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));

    let mut buf = [0u8; 64];
    let mut len: Len = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetData(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_CHAR as i16,
            buf.as_mut_ptr().cast(),
            buf.len() as Len,
            &mut len,
        )
    );
    assert_eq!(38, len);
    assert_eq!(
        "12345678901234567890123456789012345678",
        std::str::from_utf8(&buf[..len as usize]).unwrap()
    );
}

#[test]
fn wide_parameter_narrow_result_round_trips() {
    let test = TestConnection::connect("/tmp/param_wide.db");
    prepare(&test, "SELECT ?");

    let text = "Здравейте";
    let mut wide = to_widechar_vec(text);
    let mut indicator: Len = (wide.len() * 2) as Len;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindParameter(
            test.stmt_handle(),
            1,
            ParamType::SQL_PARAM_INPUT as i16,
            CDataType::SQL_C_WCHAR as i16,
            SqlDataType::SQL_WVARCHAR as i16,
            0,
            0,
            wide.as_mut_ptr().cast(),
            indicator,
            &mut indicator,
        )
    );
    assert_eq!(SqlReturn::SUCCESS, SQLExecute(test.stmt_handle()));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));

    let mut buf = [0u8; 64];
    let mut len: Len = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetData(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_CHAR as i16,
            buf.as_mut_ptr().cast(),
            buf.len() as Len,
            &mut len,
        )
    );
    assert_eq!(text.len() as Len, len);
    assert_eq!(text, std::str::from_utf8(&buf[..len as usize]).unwrap());
}

#[test]
fn batch_execute_processes_every_parameter_set() {
    let test = TestConnection::connect("/tmp/param_batch.db");
    prepare(&test, "INSERT INTO t VALUES (?)");

    let mut values: [i32; 3] = [10, 20, 30];
    let mut indicators: [Len; 3] = [4, 4, 4];
    let mut statuses: [USmallInt; 3] = [99; 3];
    let mut processed: ULen = 0;

    assert_eq!(
        SqlReturn::SUCCESS,
        SQLSetStmtAttr(
            test.stmt_handle(),
            StatementAttribute::SQL_ATTR_PARAMSET_SIZE as i32,
            3 as ULen as Pointer,
            0
        )
    );
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLSetStmtAttr(
            test.stmt_handle(),
            StatementAttribute::SQL_ATTR_PARAM_STATUS_PTR as i32,
            statuses.as_mut_ptr().cast(),
            0
        )
    );
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLSetStmtAttr(
            test.stmt_handle(),
            StatementAttribute::SQL_ATTR_PARAMS_PROCESSED_PTR as i32,
            (&mut processed as *mut ULen).cast(),
            0
        )
    );
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindParameter(
            test.stmt_handle(),
            1,
            ParamType::SQL_PARAM_INPUT as i16,
            CDataType::SQL_C_SLONG as i16,
            SqlDataType::SQL_INTEGER as i16,
            0,
            0,
            values.as_mut_ptr().cast(),
            std::mem::size_of::<i32>() as Len,
            indicators.as_mut_ptr(),
        )
    );

    assert_eq!(SqlReturn::SUCCESS, SQLExecute(test.stmt_handle()));
    assert_eq!(3, processed);
    assert!(statuses.iter().all(|&s| s == definitions::SQL_PARAM_SUCCESS));
    // three inserts reached the engine
    assert_eq!(3, test.database.executed().len());
    let mut count: Len = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        crate::api::SQLRowCount(test.stmt_handle(), &mut count)
    );
    assert_eq!(3, count);
}

#[test]
fn data_at_exec_streams_chunks_through_put_data() {
    let test = TestConnection::connect("/tmp/param_dae.db");
    prepare(&test, "SELECT ?");

    let mut token_marker: i32 = 7;
    let mut indicator: Len = SQL_DATA_AT_EXEC;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindParameter(
            test.stmt_handle(),
            1,
            ParamType::SQL_PARAM_INPUT as i16,
            CDataType::SQL_C_CHAR as i16,
            SqlDataType::SQL_VARCHAR as i16,
            0,
            0,
            (&mut token_marker as *mut i32).cast(),
            0,
            &mut indicator,
        )
    );
    assert_eq!(SqlReturn::NEED_DATA, SQLExecute(test.stmt_handle()));

    let mut token: Pointer = std::ptr::null_mut();
    assert_eq!(SqlReturn::NEED_DATA, SQLParamData(test.stmt_handle(), &mut token));
    // the token is the bound data pointer
    assert_eq!((&mut token_marker as *mut i32).cast::<std::ffi::c_void>(), token);

    for chunk in ["quack", " quack"] {
        let (ptr, _owned) = to_char_ptr(chunk);
        assert_eq!(
            SqlReturn::SUCCESS,
            SQLPutData(test.stmt_handle(), ptr.cast(), chunk.len() as Len)
        );
    }
    // the second ParamData call resumes the execute
    assert_eq!(SqlReturn::SUCCESS, SQLParamData(test.stmt_handle(), &mut token));

    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
    let mut buf = [0u8; 32];
    let mut len: Len = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetData(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_CHAR as i16,
            buf.as_mut_ptr().cast(),
            buf.len() as Len,
            &mut len,
        )
    );
    assert_eq!("quack quack", std::str::from_utf8(&buf[..len as usize]).unwrap());
}

#[test]
fn timestamp_parameter_round_trips_with_nanosecond_fraction() {
    let test = TestConnection::connect("/tmp/param_timestamp.db");
    prepare(&test, "SELECT ?");

    let mut ts = definitions::Timestamp {
        year: 2024,
        month: 2,
        day: 29,
        hour: 11,
        minute: 22,
        second: 33,
        fraction: 123_456_000,
    };
    let mut indicator: Len = std::mem::size_of::<definitions::Timestamp>() as Len;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindParameter(
            test.stmt_handle(),
            1,
            ParamType::SQL_PARAM_INPUT as i16,
            CDataType::SQL_C_TYPE_TIMESTAMP as i16,
            SqlDataType::SQL_TYPE_TIMESTAMP as i16,
            0,
            0,
            (&mut ts as *mut definitions::Timestamp).cast(),
            indicator,
            &mut indicator,
        )
    );
    assert_eq!(SqlReturn::SUCCESS, SQLExecute(test.stmt_handle()));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));

    let mut fetched = definitions::Timestamp::default();
    let mut fetched_ind: Len = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetData(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_TYPE_TIMESTAMP as i16,
            (&mut fetched as *mut definitions::Timestamp).cast(),
            std::mem::size_of::<definitions::Timestamp>() as Len,
            &mut fetched_ind,
        )
    );
    assert_eq!(ts, fetched);
}
