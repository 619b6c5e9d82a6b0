use crate::api::test_helpers::{first_sqlstate, TestConnection};
use crate::api::{
    SQLBindCol, SQLEndTran, SQLExecDirect, SQLFetch, SQLFetchScroll, SQLGetData, SQLSetStmtAttr,
};
use cstr::to_char_ptr;
use definitions::{
    CDataType, CompletionType, CursorType, FetchOrientation, HandleType, Len, SqlReturn,
    StatementAttribute, ULen, USmallInt, SQL_NTS, SQL_ROW_NOROW, SQL_ROW_SUCCESS,
};
use duckdb_odbc_core::engine::mock::CannedResult;
use duckdb_odbc_core::{EngineType, EngineValue};

fn exec_direct(test: &TestConnection, sql: &str) -> SqlReturn {
    let (sql_ptr, _owned) = to_char_ptr(sql);
    SQLExecDirect(test.stmt_handle(), sql_ptr, SQL_NTS as i32)
}

fn script_numbers(test: &TestConnection, sql: &str, n: i32, chunk_size: usize) {
    let rows: Vec<Vec<EngineValue>> = (1..=n).map(|i| vec![EngineValue::Integer(i)]).collect();
    let mut canned = CannedResult::new(&["n"], &[EngineType::Integer]);
    for chunk in rows.chunks(chunk_size) {
        canned = canned.chunk(chunk.to_vec());
    }
    test.database.script_result(sql, canned);
}

fn set_stmt_attr(test: &TestConnection, attr: StatementAttribute, value: usize) {
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLSetStmtAttr(test.stmt_handle(), attr as i32, value as definitions::Pointer, 0)
    );
}

#[test]
fn batched_fetch_scatters_column_wise() {
    let test = TestConnection::connect("/tmp/fetch_batch_col.db");
    script_numbers(&test, "SELECT n FROM numbers", 7, 3);

    set_stmt_attr(&test, StatementAttribute::SQL_ATTR_ROW_ARRAY_SIZE, 4);
    let mut values = [0i32; 4];
    let mut indicators = [0 as Len; 4];
    let mut statuses = [0 as USmallInt; 4];
    let mut rows_fetched: ULen = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLSetStmtAttr(
            test.stmt_handle(),
            StatementAttribute::SQL_ATTR_ROW_STATUS_PTR as i32,
            statuses.as_mut_ptr().cast(),
            0
        )
    );
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLSetStmtAttr(
            test.stmt_handle(),
            StatementAttribute::SQL_ATTR_ROWS_FETCHED_PTR as i32,
            (&mut rows_fetched as *mut ULen).cast(),
            0
        )
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT n FROM numbers"));
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindCol(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_SLONG as i16,
            values.as_mut_ptr().cast(),
            std::mem::size_of::<i32>() as Len,
            indicators.as_mut_ptr(),
        )
    );

    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
    assert_eq!(4, rows_fetched);
    assert_eq!([1, 2, 3, 4], values);
    assert!(statuses.iter().all(|&s| s == SQL_ROW_SUCCESS));

    // second rowset has three rows; the last slot reports NOROW
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
    assert_eq!(3, rows_fetched);
    assert_eq!([5, 6, 7], values[..3]);
    assert_eq!(SQL_ROW_NOROW, statuses[3]);

    assert_eq!(SqlReturn::NO_DATA, SQLFetch(test.stmt_handle()));
    assert_eq!(0, rows_fetched);
}

#[test]
fn batched_fetch_scatters_row_wise() {
    #[repr(C)]
    #[derive(Clone, Copy, Default)]
    struct Row {
        n: i32,
        n_ind: Len,
    }

    let test = TestConnection::connect("/tmp/fetch_batch_row.db");
    script_numbers(&test, "SELECT n FROM numbers", 4, 4);

    set_stmt_attr(&test, StatementAttribute::SQL_ATTR_ROW_ARRAY_SIZE, 2);
    set_stmt_attr(
        &test,
        StatementAttribute::SQL_ATTR_ROW_BIND_TYPE,
        std::mem::size_of::<Row>(),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT n FROM numbers"));

    let mut rows = [Row::default(); 2];
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLBindCol(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_SLONG as i16,
            (&mut rows[0].n as *mut i32).cast(),
            std::mem::size_of::<i32>() as Len,
            &mut rows[0].n_ind,
        )
    );

    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
    assert_eq!(1, rows[0].n);
    assert_eq!(2, rows[1].n);
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
    assert_eq!(3, rows[0].n);
    assert_eq!(4, rows[1].n);
}

#[test]
fn static_cursor_scrolls_absolute_and_prior() {
    let test = TestConnection::connect("/tmp/fetch_scroll.db");
    script_numbers(&test, "SELECT n FROM numbers", 10, 4);

    set_stmt_attr(
        &test,
        StatementAttribute::SQL_ATTR_CURSOR_TYPE,
        CursorType::SQL_CURSOR_STATIC as usize,
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT n FROM numbers"));

    let mut value: i32 = 0;
    let mut indicator: Len = 0;
    let mut fetch_and_read = |orientation: FetchOrientation, offset: Len| -> i32 {
        assert_eq!(
            SqlReturn::SUCCESS,
            SQLFetchScroll(test.stmt_handle(), orientation as u16, offset)
        );
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
        value
    };

    // rows are 1-based for ABSOLUTE
    assert_eq!(5, fetch_and_read(FetchOrientation::SQL_FETCH_ABSOLUTE, 5));
    assert_eq!(4, fetch_and_read(FetchOrientation::SQL_FETCH_PRIOR, 0));
    assert_eq!(1, fetch_and_read(FetchOrientation::SQL_FETCH_FIRST, 0));
    assert_eq!(10, fetch_and_read(FetchOrientation::SQL_FETCH_LAST, 0));
    assert_eq!(7, fetch_and_read(FetchOrientation::SQL_FETCH_RELATIVE, -3));
}

#[test]
fn forward_only_cursor_rejects_scrolling() {
    let test = TestConnection::connect("/tmp/fetch_forward_only.db");
    script_numbers(&test, "SELECT n FROM numbers", 3, 3);
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT n FROM numbers"));
    assert_eq!(
        SqlReturn::ERROR,
        SQLFetchScroll(
            test.stmt_handle(),
            FetchOrientation::SQL_FETCH_ABSOLUTE as u16,
            2
        )
    );
    assert_eq!(Some("HY106".to_string()), first_sqlstate(test.stmt));
}

#[test]
fn get_data_streams_in_buffer_sized_pieces() {
    let test = TestConnection::connect("/tmp/fetch_get_data_stream.db");
    let text = "abcdefghij"; // L = 10
    test.database.script_result(
        "SELECT t",
        CannedResult::new(&["t"], &[EngineType::Varchar])
            .chunk(vec![vec![EngineValue::Varchar(text.to_string())]]),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT t"));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));

    // k = 4 bytes leaves 3 payload bytes per call: ceil(10/3) = 4 reads
    let mut collected = String::new();
    let mut buf = [0u8; 4];
    let mut remaining_reported = Vec::new();
    let mut returns = Vec::new();
    loop {
        let mut len: Len = 0;
        let ret = SQLGetData(
            test.stmt_handle(),
            1,
            CDataType::SQL_C_CHAR as i16,
            buf.as_mut_ptr().cast(),
            buf.len() as Len,
            &mut len,
        );
        if ret == SqlReturn::NO_DATA {
            break;
        }
        returns.push(ret);
        remaining_reported.push(len);
        let piece = std::ffi::CStr::from_bytes_until_nul(&buf).unwrap();
        collected.push_str(piece.to_str().unwrap());
    }
    assert_eq!(text, collected);
    assert_eq!(vec![10, 7, 4, 1], remaining_reported);
    assert_eq!(
        vec![
            SqlReturn::SUCCESS_WITH_INFO,
            SqlReturn::SUCCESS_WITH_INFO,
            SqlReturn::SUCCESS_WITH_INFO,
            SqlReturn::SUCCESS
        ],
        returns
    );
}

#[test]
fn null_values_set_the_indicator() {
    let test = TestConnection::connect("/tmp/fetch_null.db");
    test.database.script_result(
        "SELECT t",
        CannedResult::new(&["t"], &[EngineType::Varchar]).chunk(vec![vec![EngineValue::Null]]),
    );
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT t"));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
    let mut buf = [0u8; 8];
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
    assert_eq!(definitions::SQL_NULL_DATA, len);
}

#[test]
fn commit_preserves_the_open_cursor() {
    let test = TestConnection::connect("/tmp/fetch_commit.db");
    script_numbers(&test, "SELECT n FROM numbers", 2, 1);
    assert_eq!(SqlReturn::SUCCESS, exec_direct(&test, "SELECT n FROM numbers"));
    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));

    // commit materializes the remaining chunks before the engine would
    // invalidate the streaming result
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLEndTran(
            HandleType::SQL_HANDLE_DBC,
            test.conn,
            CompletionType::SQL_COMMIT as i16
        )
    );
    assert!(test.database.executed().contains(&"COMMIT".to_string()));

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
    assert_eq!(2, value);
}
