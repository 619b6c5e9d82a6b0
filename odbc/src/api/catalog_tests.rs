use crate::api::test_helpers::TestConnection;
use crate::api::{SQLFetch, SQLGetData, SQLNumResultCols, SQLPrimaryKeys, SQLTables};
use cstr::to_char_ptr;
use definitions::{CDataType, Len, SqlReturn, SQL_NTS};
use duckdb_odbc_core::engine::mock::CannedResult;
use duckdb_odbc_core::{EngineType, EngineValue};

fn get_string(test: &TestConnection, col: u16) -> String {
    let mut buf = [0u8; 128];
    let mut len: Len = 0;
    let ret = SQLGetData(
        test.stmt_handle(),
        col,
        CDataType::SQL_C_CHAR as i16,
        buf.as_mut_ptr().cast(),
        buf.len() as Len,
        &mut len,
    );
    assert!(ret.succeeded());
    String::from_utf8_lossy(&buf[..len.max(0) as usize]).into_owned()
}

#[test]
fn tables_runs_the_composed_catalog_query() {
    let test = TestConnection::connect("/tmp/catalog_tables.db");
    let expected_query = duckdb_odbc_core::catalog::tables_query("", "ducks", "%", "TABLE", false);
    test.database.script_result(
        &expected_query,
        CannedResult::new(
            &["TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "TABLE_TYPE", "REMARKS"],
            &[
                EngineType::Varchar,
                EngineType::Varchar,
                EngineType::Varchar,
                EngineType::Varchar,
                EngineType::Varchar,
            ],
        )
        .chunk(vec![vec![
            EngineValue::Varchar("memory".into()),
            EngineValue::Varchar("ducks".into()),
            EngineValue::Varchar("test_table_2".into()),
            EngineValue::Varchar("TABLE".into()),
            EngineValue::Varchar(String::new()),
        ]]),
    );

    let (schema, _schema_owned) = to_char_ptr("ducks");
    let (table, _table_owned) = to_char_ptr("%");
    let (table_type, _type_owned) = to_char_ptr("TABLE");
    let ret = SQLTables(
        test.stmt_handle(),
        std::ptr::null(),
        0,
        schema,
        SQL_NTS as i16,
        table,
        SQL_NTS as i16,
        table_type,
        SQL_NTS as i16,
    );
    assert_eq!(SqlReturn::SUCCESS, ret);

    assert_eq!(SqlReturn::SUCCESS, SQLFetch(test.stmt_handle()));
    assert_eq!("memory", get_string(&test, 1));
    assert_eq!("ducks", get_string(&test, 2));
    assert_eq!("test_table_2", get_string(&test, 3));
    assert_eq!("TABLE", get_string(&test, 4));
    assert_eq!("", get_string(&test, 5));
    assert_eq!(SqlReturn::NO_DATA, SQLFetch(test.stmt_handle()));
}

#[test]
fn unimplemented_catalog_functions_return_the_documented_shape() {
    let test = TestConnection::connect("/tmp/catalog_stub.db");
    let ret = SQLPrimaryKeys(
        test.stmt_handle(),
        std::ptr::null(),
        0,
        std::ptr::null(),
        0,
        std::ptr::null(),
        0,
    );
    assert_eq!(SqlReturn::SUCCESS, ret);
    let mut count: i16 = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLNumResultCols(test.stmt_handle(), &mut count)
    );
    assert_eq!(6, count);
    assert_eq!(SqlReturn::NO_DATA, SQLFetch(test.stmt_handle()));
}
