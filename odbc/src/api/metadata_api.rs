//! Catalog functions: SQLTables and SQLColumns compose SQL against the
//! engine catalog; the rest prepare their documented column shape and
//! return zero rows, or report HYC00.

use crate::api::statement_api::{open_empty_cursor, open_result_cursor};
use crate::api::util::unsupported_function;
use crate::handles::definitions::OdbcHandleRef;
use crate::must_be_valid;
use cstr::{input_text_to_string_a, input_text_to_string_w, WideChar};
use definitions::{Char, HDbc, HStmt, Integer, SmallInt, SqlReturn, USmallInt};
use duckdb_odbc_core::catalog::{columns_query, tables_query};
use duckdb_odbc_core::EngineType;

fn statement_metadata_id(handle: &crate::handles::definitions::OdbcHandle) -> bool {
    let Some(stmt) = handle.as_statement() else {
        return false;
    };
    if stmt.attributes.read().unwrap().metadata_id {
        return true;
    }
    let conn = stmt.connection;
    if conn.is_null() {
        return false;
    }
    unsafe {
        (*conn)
            .as_connection()
            .map(|c| c.attributes.read().unwrap().metadata_id)
            .unwrap_or(false)
    }
}

#[allow(clippy::too_many_arguments)]
fn sql_tables_internal(
    handle: OdbcHandleRef,
    catalog: String,
    schema: String,
    table: String,
    table_type: String,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    let metadata_id = statement_metadata_id(handle);
    let query = tables_query(&catalog, &schema, &table, &table_type, metadata_id);
    open_result_cursor(handle, stmt, &query, function_name)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLTables(
    statement_handle: HStmt,
    catalog_name: *const Char,
    catalog_name_length: SmallInt,
    schema_name: *const Char,
    schema_name_length: SmallInt,
    table_name: *const Char,
    table_name_length: SmallInt,
    table_type: *const Char,
    table_type_length: SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        sql_tables_internal(
            handle,
            input_text_to_string_a(catalog_name, isize::from(catalog_name_length)),
            input_text_to_string_a(schema_name, isize::from(schema_name_length)),
            input_text_to_string_a(table_name, isize::from(table_name_length)),
            input_text_to_string_a(table_type, isize::from(table_type_length)),
            "SQLTables",
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLTablesW(
    statement_handle: HStmt,
    catalog_name: *const WideChar,
    catalog_name_length: SmallInt,
    schema_name: *const WideChar,
    schema_name_length: SmallInt,
    table_name: *const WideChar,
    table_name_length: SmallInt,
    table_type: *const WideChar,
    table_type_length: SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        sql_tables_internal(
            handle,
            input_text_to_string_w(catalog_name, isize::from(catalog_name_length)),
            input_text_to_string_w(schema_name, isize::from(schema_name_length)),
            input_text_to_string_w(table_name, isize::from(table_name_length)),
            input_text_to_string_w(table_type, isize::from(table_type_length)),
            "SQLTablesW",
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn sql_columns_internal(
    handle: OdbcHandleRef,
    catalog: String,
    schema: String,
    table: String,
    column: String,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    let metadata_id = statement_metadata_id(handle);
    let query = columns_query(&catalog, &schema, &table, &column, metadata_id);
    open_result_cursor(handle, stmt, &query, function_name)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLColumns(
    statement_handle: HStmt,
    catalog_name: *const Char,
    catalog_name_length: SmallInt,
    schema_name: *const Char,
    schema_name_length: SmallInt,
    table_name: *const Char,
    table_name_length: SmallInt,
    column_name: *const Char,
    column_name_length: SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        sql_columns_internal(
            handle,
            input_text_to_string_a(catalog_name, isize::from(catalog_name_length)),
            input_text_to_string_a(schema_name, isize::from(schema_name_length)),
            input_text_to_string_a(table_name, isize::from(table_name_length)),
            input_text_to_string_a(column_name, isize::from(column_name_length)),
            "SQLColumns",
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLColumnsW(
    statement_handle: HStmt,
    catalog_name: *const WideChar,
    catalog_name_length: SmallInt,
    schema_name: *const WideChar,
    schema_name_length: SmallInt,
    table_name: *const WideChar,
    table_name_length: SmallInt,
    column_name: *const WideChar,
    column_name_length: SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        sql_columns_internal(
            handle,
            input_text_to_string_w(catalog_name, isize::from(catalog_name_length)),
            input_text_to_string_w(schema_name, isize::from(schema_name_length)),
            input_text_to_string_w(table_name, isize::from(table_name_length)),
            input_text_to_string_w(column_name, isize::from(column_name_length)),
            "SQLColumnsW",
        )
    }
}

const V: EngineType = EngineType::Varchar;
const I: EngineType = EngineType::Integer;
const S: EngineType = EngineType::SmallInt;

// The empty catalog stubs keep their documented column shape so callers
// can still describe the result before seeing zero rows. The variadic
// name arguments are irrelevant to the shape and deliberately ignored.

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLPrimaryKeys(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
) -> SqlReturn {
    primary_keys_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLPrimaryKeysW(
    statement_handle: HStmt,
    _catalog_name: *const WideChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WideChar,
    _schema_name_length: SmallInt,
    _table_name: *const WideChar,
    _table_name_length: SmallInt,
) -> SqlReturn {
    primary_keys_stub(statement_handle)
}

fn primary_keys_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &["TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "COLUMN_NAME", "KEY_SEQ", "PK_NAME"],
        &[V, V, V, V, S, V],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLForeignKeys(
    statement_handle: HStmt,
    _pk_catalog_name: *const Char,
    _pk_catalog_name_length: SmallInt,
    _pk_schema_name: *const Char,
    _pk_schema_name_length: SmallInt,
    _pk_table_name: *const Char,
    _pk_table_name_length: SmallInt,
    _fk_catalog_name: *const Char,
    _fk_catalog_name_length: SmallInt,
    _fk_schema_name: *const Char,
    _fk_schema_name_length: SmallInt,
    _fk_table_name: *const Char,
    _fk_table_name_length: SmallInt,
) -> SqlReturn {
    foreign_keys_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLForeignKeysW(
    statement_handle: HStmt,
    _pk_catalog_name: *const WideChar,
    _pk_catalog_name_length: SmallInt,
    _pk_schema_name: *const WideChar,
    _pk_schema_name_length: SmallInt,
    _pk_table_name: *const WideChar,
    _pk_table_name_length: SmallInt,
    _fk_catalog_name: *const WideChar,
    _fk_catalog_name_length: SmallInt,
    _fk_schema_name: *const WideChar,
    _fk_schema_name_length: SmallInt,
    _fk_table_name: *const WideChar,
    _fk_table_name_length: SmallInt,
) -> SqlReturn {
    foreign_keys_stub(statement_handle)
}

fn foreign_keys_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &[
            "PKTABLE_CAT", "PKTABLE_SCHEM", "PKTABLE_NAME", "PKCOLUMN_NAME", "FKTABLE_CAT",
            "FKTABLE_SCHEM", "FKTABLE_NAME", "FKCOLUMN_NAME", "KEY_SEQ", "UPDATE_RULE",
            "DELETE_RULE", "FK_NAME", "PK_NAME", "DEFERRABILITY",
        ],
        &[V, V, V, V, V, V, V, V, S, S, S, V, V, S],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLProcedures(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _proc_name: *const Char,
    _proc_name_length: SmallInt,
) -> SqlReturn {
    procedures_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLProceduresW(
    statement_handle: HStmt,
    _catalog_name: *const WideChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WideChar,
    _schema_name_length: SmallInt,
    _proc_name: *const WideChar,
    _proc_name_length: SmallInt,
) -> SqlReturn {
    procedures_stub(statement_handle)
}

fn procedures_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &[
            "PROCEDURE_CAT", "PROCEDURE_SCHEM", "PROCEDURE_NAME", "NUM_INPUT_PARAMS",
            "NUM_OUTPUT_PARAMS", "NUM_RESULT_SETS", "REMARKS", "PROCEDURE_TYPE",
        ],
        &[V, V, V, I, I, I, V, S],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLProcedureColumns(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _proc_name: *const Char,
    _proc_name_length: SmallInt,
    _column_name: *const Char,
    _column_name_length: SmallInt,
) -> SqlReturn {
    procedure_columns_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLProcedureColumnsW(
    statement_handle: HStmt,
    _catalog_name: *const WideChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WideChar,
    _schema_name_length: SmallInt,
    _proc_name: *const WideChar,
    _proc_name_length: SmallInt,
    _column_name: *const WideChar,
    _column_name_length: SmallInt,
) -> SqlReturn {
    procedure_columns_stub(statement_handle)
}

fn procedure_columns_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &[
            "PROCEDURE_CAT", "PROCEDURE_SCHEM", "PROCEDURE_NAME", "COLUMN_NAME", "COLUMN_TYPE",
            "DATA_TYPE", "TYPE_NAME", "COLUMN_SIZE", "BUFFER_LENGTH", "DECIMAL_DIGITS",
            "NUM_PREC_RADIX", "NULLABLE", "REMARKS", "COLUMN_DEF", "SQL_DATA_TYPE",
            "SQL_DATETIME_SUB", "CHAR_OCTET_LENGTH", "ORDINAL_POSITION", "IS_NULLABLE",
        ],
        &[V, V, V, V, S, S, V, I, I, S, S, S, V, V, S, S, I, I, V],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLTablePrivileges(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
) -> SqlReturn {
    table_privileges_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLTablePrivilegesW(
    statement_handle: HStmt,
    _catalog_name: *const WideChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WideChar,
    _schema_name_length: SmallInt,
    _table_name: *const WideChar,
    _table_name_length: SmallInt,
) -> SqlReturn {
    table_privileges_stub(statement_handle)
}

fn table_privileges_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &[
            "TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "GRANTOR", "GRANTEE", "PRIVILEGE",
            "IS_GRANTABLE",
        ],
        &[V, V, V, V, V, V, V],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLColumnPrivileges(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
    _column_name: *const Char,
    _column_name_length: SmallInt,
) -> SqlReturn {
    column_privileges_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLColumnPrivilegesW(
    statement_handle: HStmt,
    _catalog_name: *const WideChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WideChar,
    _schema_name_length: SmallInt,
    _table_name: *const WideChar,
    _table_name_length: SmallInt,
    _column_name: *const WideChar,
    _column_name_length: SmallInt,
) -> SqlReturn {
    column_privileges_stub(statement_handle)
}

fn column_privileges_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &[
            "TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "COLUMN_NAME", "GRANTOR", "GRANTEE",
            "PRIVILEGE", "IS_GRANTABLE",
        ],
        &[V, V, V, V, V, V, V, V],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLSpecialColumns(
    statement_handle: HStmt,
    _identifier_type: SmallInt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
    _scope: SmallInt,
    _nullable: SmallInt,
) -> SqlReturn {
    special_columns_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLSpecialColumnsW(
    statement_handle: HStmt,
    _identifier_type: SmallInt,
    _catalog_name: *const WideChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WideChar,
    _schema_name_length: SmallInt,
    _table_name: *const WideChar,
    _table_name_length: SmallInt,
    _scope: SmallInt,
    _nullable: SmallInt,
) -> SqlReturn {
    special_columns_stub(statement_handle)
}

fn special_columns_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &[
            "SCOPE", "COLUMN_NAME", "DATA_TYPE", "TYPE_NAME", "COLUMN_SIZE", "BUFFER_LENGTH",
            "DECIMAL_DIGITS", "PSEUDO_COLUMN",
        ],
        &[S, V, S, V, I, I, S, S],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLStatistics(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
    _unique: USmallInt,
    _reserved: USmallInt,
) -> SqlReturn {
    statistics_stub(statement_handle)
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLStatisticsW(
    statement_handle: HStmt,
    _catalog_name: *const WideChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WideChar,
    _schema_name_length: SmallInt,
    _table_name: *const WideChar,
    _table_name_length: SmallInt,
    _unique: USmallInt,
    _reserved: USmallInt,
) -> SqlReturn {
    statistics_stub(statement_handle)
}

fn statistics_stub(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    open_empty_cursor(
        stmt,
        &[
            "TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "NON_UNIQUE", "INDEX_QUALIFIER",
            "INDEX_NAME", "TYPE", "ORDINAL_POSITION", "COLUMN_NAME", "ASC_OR_DESC",
            "CARDINALITY", "PAGES", "FILTER_CONDITION",
        ],
        &[V, V, V, S, V, V, S, S, V, V, I, I, V],
    )
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLNativeSql(
    connection_handle: HDbc,
    _in_statement_text: *const Char,
    _in_statement_len: Integer,
    _out_statement_text: *mut Char,
    _buffer_len: Integer,
    _out_statement_len: *mut Integer,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    unsupported_function(OdbcHandleRef::from(connection_handle), "SQLNativeSql")
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLNativeSqlW(
    connection_handle: HDbc,
    _in_statement_text: *const WideChar,
    _in_statement_len: Integer,
    _out_statement_text: *mut WideChar,
    _buffer_len: Integer,
    _out_statement_len: *mut Integer,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    unsupported_function(OdbcHandleRef::from(connection_handle), "SQLNativeSqlW")
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLBrowseConnect(
    connection_handle: HDbc,
    _in_connection_string: *const Char,
    _string_length: SmallInt,
    _out_connection_string: *mut Char,
    _buffer_length: SmallInt,
    _out_buffer_length: *mut SmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    unsupported_function(OdbcHandleRef::from(connection_handle), "SQLBrowseConnect")
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLBrowseConnectW(
    connection_handle: HDbc,
    _in_connection_string: *const WideChar,
    _string_length: SmallInt,
    _out_connection_string: *mut WideChar,
    _buffer_length: SmallInt,
    _out_buffer_length: *mut SmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    unsupported_function(OdbcHandleRef::from(connection_handle), "SQLBrowseConnectW")
}

#[no_mangle]
pub extern "C" fn SQLBulkOperations(
    statement_handle: HStmt,
    _operation: USmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    unsupported_function(OdbcHandleRef::from(statement_handle), "SQLBulkOperations")
}
