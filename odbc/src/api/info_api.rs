//! SQLGetInfo, SQLGetFunctions, SQLGetTypeInfo.

use crate::api::data::i16_len;
use crate::api::statement_api::open_result_cursor;
use crate::api::util::ptr_safe_write;
use crate::errors::ODBCError;
use crate::handles::definitions::{OdbcHandle, OdbcHandleRef};
use crate::must_be_valid;
use constants::{DBMS_NAME, DRIVER_NAME, ODBC_VERSION};
use definitions::{
    is_numeric_info_type, HDbc, HStmt, InfoType, Pointer, SmallInt, SqlReturn, USmallInt,
    SQL_AF_ALL, SQL_AF_AVG, SQL_AF_COUNT, SQL_AF_DISTINCT, SQL_AF_MAX, SQL_AF_MIN, SQL_AF_SUM,
    SQL_AM_NONE, SQL_ASYNC_DBC_NOT_CAPABLE, SQL_ASYNC_NOTIFICATION_NOT_CAPABLE, SQL_BRC_EXPLICIT,
    SQL_BS_ROW_COUNT_EXPLICIT, SQL_BS_SELECT_EXPLICIT, SQL_CA1_ABSOLUTE, SQL_CA1_NEXT,
    SQL_CA1_RELATIVE, SQL_CA2_CRC_EXACT, SQL_CA2_READ_ONLY_CONCURRENCY, SQL_CB_CLOSE, SQL_CB_NULL,
    SQL_CB_PRESERVE, SQL_CL_START, SQL_CN_ANY, SQL_CU_DML_STATEMENTS, SQL_CU_TABLE_DEFINITION,
    SQL_FN_CVT_CAST, SQL_GB_GROUP_BY_EQUALS_SELECT, SQL_GD_ANY_COLUMN, SQL_GD_ANY_ORDER,
    SQL_GD_BLOCK, SQL_GD_BOUND, SQL_IC_MIXED, SQL_IC_SENSITIVE, SQL_INFO_N, SQL_INFO_Y,
    SQL_NC_LOW, SQL_NNC_NON_NULL, SQL_OAC_LEVEL1, SQL_OIC_CORE, SQL_PARC_BATCH, SQL_PAS_NO_SELECT,
    SQL_SC_SQL92_ENTRY, SQL_SO_FORWARD_ONLY, SQL_SO_STATIC, SQL_SP_BETWEEN, SQL_SP_COMPARISON,
    SQL_SP_EXISTS, SQL_SP_IN, SQL_SP_ISNOTNULL, SQL_SP_ISNULL, SQL_SP_LIKE,
    SQL_SP_QUANTIFIED_COMPARISON, SQL_SRJO_CROSS_JOIN, SQL_SRJO_INNER_JOIN,
    SQL_SRJO_LEFT_OUTER_JOIN, SQL_SRJO_RIGHT_OUTER_JOIN, SQL_SU_DML_STATEMENTS,
    SQL_SU_TABLE_DEFINITION, SQL_SVE_CASE, SQL_SVE_CAST, SQL_SVE_COALESCE, SQL_SVE_NULLIF,
    SQL_TC_ALL, SQL_TXN_SERIALIZABLE,
};
use definitions::{
    SQL_API_ALL_FUNCTIONS, SQL_API_ODBC3_ALL_FUNCTIONS, SQL_API_ODBC3_ALL_FUNCTIONS_SIZE,
    SQL_API_SQLALLOCHANDLE, SQL_API_SQLBINDCOL, SQL_API_SQLBINDPARAMETER, SQL_API_SQLCANCEL,
    SQL_API_SQLCLOSECURSOR, SQL_API_SQLCOLATTRIBUTE, SQL_API_SQLCOLUMNS, SQL_API_SQLCONNECT,
    SQL_API_SQLCOPYDESC, SQL_API_SQLDESCRIBECOL, SQL_API_SQLDESCRIBEPARAM,
    SQL_API_SQLDISCONNECT, SQL_API_SQLDRIVERCONNECT, SQL_API_SQLENDTRAN, SQL_API_SQLEXECDIRECT,
    SQL_API_SQLEXECUTE, SQL_API_SQLFETCH, SQL_API_SQLFETCHSCROLL, SQL_API_SQLFREEHANDLE,
    SQL_API_SQLFREESTMT, SQL_API_SQLGETCONNECTATTR, SQL_API_SQLGETDATA, SQL_API_SQLGETDESCFIELD,
    SQL_API_SQLGETDESCREC, SQL_API_SQLGETDIAGFIELD, SQL_API_SQLGETDIAGREC, SQL_API_SQLGETENVATTR,
    SQL_API_SQLGETFUNCTIONS, SQL_API_SQLGETINFO, SQL_API_SQLGETSTMTATTR, SQL_API_SQLGETTYPEINFO,
    SQL_API_SQLMORERESULTS, SQL_API_SQLNUMPARAMS, SQL_API_SQLNUMRESULTCOLS,
    SQL_API_SQLPARAMDATA, SQL_API_SQLPREPARE, SQL_API_SQLPUTDATA, SQL_API_SQLROWCOUNT,
    SQL_API_SQLSETCONNECTATTR, SQL_API_SQLSETDESCFIELD, SQL_API_SQLSETDESCREC,
    SQL_API_SQLSETENVATTR, SQL_API_SQLSETPOS, SQL_API_SQLSETSTMTATTR, SQL_API_SQLTABLES,
};
use duckdb_odbc_core::type_info::type_info_values_query;
use num_traits::FromPrimitive;

/// Functions reachable through the ODBC 2 id space.
const ODBC2_FUNCTIONS: &[u16] = &[
    SQL_API_SQLBINDCOL,
    SQL_API_SQLCANCEL,
    SQL_API_SQLCOLATTRIBUTE,
    SQL_API_SQLCONNECT,
    SQL_API_SQLDESCRIBECOL,
    SQL_API_SQLDISCONNECT,
    SQL_API_SQLEXECDIRECT,
    SQL_API_SQLEXECUTE,
    SQL_API_SQLFETCH,
    SQL_API_SQLFREESTMT,
    SQL_API_SQLNUMRESULTCOLS,
    SQL_API_SQLPREPARE,
    SQL_API_SQLROWCOUNT,
    SQL_API_SQLCOLUMNS,
    SQL_API_SQLDRIVERCONNECT,
    SQL_API_SQLGETDATA,
    SQL_API_SQLGETFUNCTIONS,
    SQL_API_SQLGETINFO,
    SQL_API_SQLGETTYPEINFO,
    SQL_API_SQLPARAMDATA,
    SQL_API_SQLPUTDATA,
    SQL_API_SQLTABLES,
    SQL_API_SQLDESCRIBEPARAM,
    SQL_API_SQLMORERESULTS,
    SQL_API_SQLNUMPARAMS,
    SQL_API_SQLSETPOS,
    SQL_API_SQLBINDPARAMETER,
];

/// Functions added by ODBC 3.
const ODBC3_FUNCTIONS: &[u16] = &[
    SQL_API_SQLALLOCHANDLE,
    SQL_API_SQLCLOSECURSOR,
    SQL_API_SQLCOPYDESC,
    SQL_API_SQLENDTRAN,
    SQL_API_SQLFETCHSCROLL,
    SQL_API_SQLFREEHANDLE,
    SQL_API_SQLGETCONNECTATTR,
    SQL_API_SQLGETDESCFIELD,
    SQL_API_SQLGETDESCREC,
    SQL_API_SQLGETDIAGFIELD,
    SQL_API_SQLGETDIAGREC,
    SQL_API_SQLGETENVATTR,
    SQL_API_SQLGETSTMTATTR,
    SQL_API_SQLSETCONNECTATTR,
    SQL_API_SQLSETDESCFIELD,
    SQL_API_SQLSETDESCREC,
    SQL_API_SQLSETENVATTR,
    SQL_API_SQLSETSTMTATTR,
];

enum InfoValue {
    Str(&'static str),
    String(String),
    U16(u16),
    U32(u32),
}

fn connection_dsn(handle: &OdbcHandle) -> String {
    handle
        .as_connection()
        .map(|c| c.attributes.read().unwrap().dsn.clone())
        .unwrap_or_default()
}

fn driver_version() -> String {
    let mut parts = constants::DRIVER_LOG_VERSION.split('.');
    let major = parts.next().unwrap_or("0");
    let minor = parts.next().unwrap_or("0");
    let patch = parts.next().unwrap_or("0");
    format!("{major:0>2}.{minor:0>2}.{patch:0>4}")
}

fn info_value(handle: &OdbcHandle, info_type: InfoType) -> Option<InfoValue> {
    let conn = handle.as_connection()?;
    Some(match info_type {
        InfoType::SQL_DRIVER_NAME => InfoValue::Str(DRIVER_NAME),
        InfoType::SQL_DRIVER_VER => InfoValue::String(driver_version()),
        InfoType::SQL_DRIVER_ODBC_VER | InfoType::SQL_ODBC_VER => InfoValue::Str(ODBC_VERSION),
        InfoType::SQL_DBMS_NAME => InfoValue::Str(DBMS_NAME),
        InfoType::SQL_DBMS_VER => {
            // SELECT library_version FROM pragma_version(), through the seam
            let version = conn
                .engine_connection
                .write()
                .unwrap()
                .as_mut()
                .map(|e| e.session.library_version())
                .unwrap_or_default();
            InfoValue::String(version)
        }
        InfoType::SQL_KEYWORDS => {
            let mut engine_guard = conn.engine_connection.write().unwrap();
            let keywords = engine_guard
                .as_mut()
                .and_then(|e| e.session.keywords().ok())
                .unwrap_or_default();
            InfoValue::String(keywords.join(","))
        }
        InfoType::SQL_DATA_SOURCE_NAME | InfoType::SQL_SERVER_NAME => {
            InfoValue::String(connection_dsn(handle))
        }
        InfoType::SQL_USER_NAME => InfoValue::Str(""),
        InfoType::SQL_IDENTIFIER_QUOTE_CHAR => InfoValue::Str("\""),
        InfoType::SQL_SEARCH_PATTERN_ESCAPE => InfoValue::Str("\\"),
        InfoType::SQL_CATALOG_NAME_SEPARATOR => InfoValue::Str("."),
        InfoType::SQL_CATALOG_TERM => InfoValue::Str("database"),
        InfoType::SQL_SCHEMA_TERM => InfoValue::Str("schema"),
        InfoType::SQL_TABLE_TERM => InfoValue::Str("table"),
        InfoType::SQL_PROCEDURE_TERM => InfoValue::Str("procedure"),
        InfoType::SQL_CATALOG_NAME
        | InfoType::SQL_COLUMN_ALIAS
        | InfoType::SQL_ACCESSIBLE_TABLES
        | InfoType::SQL_EXPRESSIONS_IN_ORDERBY
        | InfoType::SQL_LIKE_ESCAPE_CLAUSE
        | InfoType::SQL_MULTIPLE_ACTIVE_TXN
        | InfoType::SQL_ORDER_BY_COLUMNS_IN_SELECT => InfoValue::Str(SQL_INFO_Y),
        InfoType::SQL_ACCESSIBLE_PROCEDURES
        | InfoType::SQL_PROCEDURES
        | InfoType::SQL_DATA_SOURCE_READ_ONLY
        | InfoType::SQL_INTEGRITY
        | InfoType::SQL_MULT_RESULT_SETS
        | InfoType::SQL_NEED_LONG_DATA_LEN
        | InfoType::SQL_DESCRIBE_PARAMETER => InfoValue::Str(SQL_INFO_N),
        InfoType::SQL_SPECIAL_CHARACTERS => InfoValue::Str(""),
        InfoType::SQL_COLLATION_SEQ => InfoValue::Str("UTF-8"),

        InfoType::SQL_MAX_DRIVER_CONNECTIONS
        | InfoType::SQL_MAX_CONCURRENT_ACTIVITIES
        | InfoType::SQL_MAX_COLUMN_NAME_LEN
        | InfoType::SQL_MAX_CURSOR_NAME_LEN
        | InfoType::SQL_MAX_SCHEMA_NAME_LEN
        | InfoType::SQL_MAX_CATALOG_NAME_LEN
        | InfoType::SQL_MAX_TABLE_NAME_LEN
        | InfoType::SQL_MAX_IDENTIFIER_LEN
        | InfoType::SQL_MAX_COLUMNS_IN_GROUP_BY
        | InfoType::SQL_MAX_COLUMNS_IN_ORDER_BY
        | InfoType::SQL_MAX_COLUMNS_IN_SELECT => InfoValue::U16(0),
        InfoType::SQL_ODBC_API_CONFORMANCE => InfoValue::U16(SQL_OAC_LEVEL1),
        InfoType::SQL_CONCAT_NULL_BEHAVIOR => InfoValue::U16(SQL_CB_NULL),
        InfoType::SQL_CURSOR_COMMIT_BEHAVIOR => InfoValue::U16(SQL_CB_PRESERVE),
        InfoType::SQL_CURSOR_ROLLBACK_BEHAVIOR => InfoValue::U16(SQL_CB_CLOSE),
        InfoType::SQL_TXN_CAPABLE => InfoValue::U16(SQL_TC_ALL),
        InfoType::SQL_IDENTIFIER_CASE => InfoValue::U16(SQL_IC_MIXED),
        InfoType::SQL_QUOTED_IDENTIFIER_CASE => InfoValue::U16(SQL_IC_SENSITIVE),
        InfoType::SQL_NULL_COLLATION => InfoValue::U16(SQL_NC_LOW),
        InfoType::SQL_GROUP_BY => InfoValue::U16(SQL_GB_GROUP_BY_EQUALS_SELECT),
        InfoType::SQL_CORRELATION_NAME => InfoValue::U16(SQL_CN_ANY),
        InfoType::SQL_NON_NULLABLE_COLUMNS => InfoValue::U16(SQL_NNC_NON_NULL),
        InfoType::SQL_CATALOG_LOCATION => InfoValue::U16(SQL_CL_START),

        InfoType::SQL_GETDATA_EXTENSIONS => {
            InfoValue::U32(SQL_GD_ANY_COLUMN | SQL_GD_ANY_ORDER | SQL_GD_BLOCK | SQL_GD_BOUND)
        }
        InfoType::SQL_SCROLL_OPTIONS => InfoValue::U32(SQL_SO_FORWARD_ONLY | SQL_SO_STATIC),
        InfoType::SQL_TXN_ISOLATION_OPTION | InfoType::SQL_DEFAULT_TXN_ISOLATION => {
            InfoValue::U32(SQL_TXN_SERIALIZABLE)
        }
        InfoType::SQL_FORWARD_ONLY_CURSOR_ATTRIBUTES1 => InfoValue::U32(SQL_CA1_NEXT),
        InfoType::SQL_STATIC_CURSOR_ATTRIBUTES1 => {
            InfoValue::U32(SQL_CA1_NEXT | SQL_CA1_ABSOLUTE | SQL_CA1_RELATIVE)
        }
        InfoType::SQL_FORWARD_ONLY_CURSOR_ATTRIBUTES2
        | InfoType::SQL_STATIC_CURSOR_ATTRIBUTES2 => {
            InfoValue::U32(SQL_CA2_READ_ONLY_CONCURRENCY | SQL_CA2_CRC_EXACT)
        }
        InfoType::SQL_DYNAMIC_CURSOR_ATTRIBUTES1
        | InfoType::SQL_DYNAMIC_CURSOR_ATTRIBUTES2
        | InfoType::SQL_KEYSET_CURSOR_ATTRIBUTES1
        | InfoType::SQL_KEYSET_CURSOR_ATTRIBUTES2 => InfoValue::U32(0),
        InfoType::SQL_ODBC_INTERFACE_CONFORMANCE => InfoValue::U32(SQL_OIC_CORE),
        InfoType::SQL_SQL_CONFORMANCE => InfoValue::U32(SQL_SC_SQL92_ENTRY),
        InfoType::SQL_AGGREGATE_FUNCTIONS => InfoValue::U32(
            SQL_AF_AVG
                | SQL_AF_COUNT
                | SQL_AF_MAX
                | SQL_AF_MIN
                | SQL_AF_SUM
                | SQL_AF_DISTINCT
                | SQL_AF_ALL,
        ),
        InfoType::SQL_CONVERT_FUNCTIONS => InfoValue::U32(SQL_FN_CVT_CAST),
        InfoType::SQL_NUMERIC_FUNCTIONS
        | InfoType::SQL_STRING_FUNCTIONS
        | InfoType::SQL_SYSTEM_FUNCTIONS
        | InfoType::SQL_TIMEDATE_FUNCTIONS
        | InfoType::SQL_TIMEDATE_ADD_INTERVALS
        | InfoType::SQL_TIMEDATE_DIFF_INTERVALS
        | InfoType::SQL_OJ_CAPABILITIES
        | InfoType::SQL_DATETIME_LITERALS => InfoValue::U32(0),
        InfoType::SQL_SQL92_PREDICATES => InfoValue::U32(
            SQL_SP_EXISTS
                | SQL_SP_ISNOTNULL
                | SQL_SP_ISNULL
                | SQL_SP_LIKE
                | SQL_SP_IN
                | SQL_SP_BETWEEN
                | SQL_SP_COMPARISON
                | SQL_SP_QUANTIFIED_COMPARISON,
        ),
        InfoType::SQL_SQL92_RELATIONAL_JOIN_OPERATORS => InfoValue::U32(
            SQL_SRJO_CROSS_JOIN
                | SQL_SRJO_INNER_JOIN
                | SQL_SRJO_LEFT_OUTER_JOIN
                | SQL_SRJO_RIGHT_OUTER_JOIN,
        ),
        InfoType::SQL_SQL92_VALUE_EXPRESSIONS => {
            InfoValue::U32(SQL_SVE_CASE | SQL_SVE_CAST | SQL_SVE_COALESCE | SQL_SVE_NULLIF)
        }
        InfoType::SQL_CATALOG_USAGE => {
            InfoValue::U32(SQL_CU_DML_STATEMENTS | SQL_CU_TABLE_DEFINITION)
        }
        InfoType::SQL_SCHEMA_USAGE => {
            InfoValue::U32(SQL_SU_DML_STATEMENTS | SQL_SU_TABLE_DEFINITION)
        }
        InfoType::SQL_BATCH_SUPPORT => {
            InfoValue::U32(SQL_BS_SELECT_EXPLICIT | SQL_BS_ROW_COUNT_EXPLICIT)
        }
        InfoType::SQL_BATCH_ROW_COUNT => InfoValue::U32(SQL_BRC_EXPLICIT),
        InfoType::SQL_PARAM_ARRAY_ROW_COUNTS => InfoValue::U32(SQL_PARC_BATCH),
        InfoType::SQL_PARAM_ARRAY_SELECTS => InfoValue::U32(SQL_PAS_NO_SELECT),
        InfoType::SQL_ASYNC_MODE => InfoValue::U32(SQL_AM_NONE),
        InfoType::SQL_ASYNC_DBC_FUNCTIONS => InfoValue::U32(SQL_ASYNC_DBC_NOT_CAPABLE),
        InfoType::SQL_ASYNC_NOTIFICATION => InfoValue::U32(SQL_ASYNC_NOTIFICATION_NOT_CAPABLE),
        InfoType::SQL_DRIVER_AWARE_POOLING_SUPPORTED => InfoValue::U32(0),
    })
}

unsafe fn get_info_internal(
    handle: OdbcHandleRef,
    info_type: USmallInt,
    info_value_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    wide: bool,
    function_name: &'static str,
) -> SqlReturn {
    let Some(known) = InfoType::from_u16(info_type) else {
        // BI tools probe freely; unknown types succeed with a note
        handle.add_diag_info(ODBCError::UnknownInfoType(info_type), function_name);
        ptr_safe_write(string_length_ptr, 0);
        return SqlReturn::SUCCESS;
    };
    if info_value_ptr.is_null() && is_numeric_info_type(known) {
        handle.add_diag_info(
            ODBCError::InvalidAttrValue(format!("InfoValuePtr for type {info_type}")),
            function_name,
        );
        return SqlReturn::ERROR;
    }
    let Some(value) = info_value(handle, known) else {
        return SqlReturn::INVALID_HANDLE;
    };
    match value {
        InfoValue::Str(text) => write_info_string(
            text,
            info_value_ptr,
            buffer_length,
            string_length_ptr,
            wide,
            handle,
            function_name,
        ),
        InfoValue::String(text) => write_info_string(
            &text,
            info_value_ptr,
            buffer_length,
            string_length_ptr,
            wide,
            handle,
            function_name,
        ),
        InfoValue::U16(v) => i16_len::set_output_fixed_data(&v, info_value_ptr, string_length_ptr),
        InfoValue::U32(v) => i16_len::set_output_fixed_data(&v, info_value_ptr, string_length_ptr),
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn write_info_string(
    text: &str,
    info_value_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    wide: bool,
    handle: &OdbcHandle,
    function_name: &'static str,
) -> SqlReturn {
    let ret = if wide {
        i16_len::set_output_wstring_as_bytes(
            text,
            info_value_ptr,
            buffer_length.max(0) as usize,
            string_length_ptr,
        )
    } else {
        i16_len::set_output_string(
            text,
            info_value_ptr.cast(),
            buffer_length.max(0) as usize,
            string_length_ptr,
        )
    };
    if ret == SqlReturn::SUCCESS_WITH_INFO {
        handle.add_diag_info(
            ODBCError::OutStringTruncated(buffer_length.max(0) as usize),
            function_name,
        );
    }
    ret
}

#[no_mangle]
pub extern "C" fn SQLGetInfo(
    connection_handle: HDbc,
    info_type: USmallInt,
    info_value_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    unsafe {
        get_info_internal(
            handle,
            info_type,
            info_value_ptr,
            buffer_length,
            string_length_ptr,
            false,
            "SQLGetInfo",
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLGetInfoW(
    connection_handle: HDbc,
    info_type: USmallInt,
    info_value_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    unsafe {
        get_info_internal(
            handle,
            info_type,
            info_value_ptr,
            buffer_length,
            string_length_ptr,
            true,
            "SQLGetInfoW",
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLGetFunctions(
    connection_handle: HDbc,
    function_id: USmallInt,
    supported_ptr: *mut USmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    must_be_valid!(handle.as_connection());
    if supported_ptr.is_null() {
        handle.add_diag_info(
            ODBCError::InvalidAttrValue("SupportedPtr".into()),
            "SQLGetFunctions",
        );
        return SqlReturn::ERROR;
    }
    unsafe {
        match function_id {
            SQL_API_ALL_FUNCTIONS => {
                // 100-slot ODBC 2 table, one flag per function id
                for id in 0..100u16 {
                    *supported_ptr.add(id as usize) =
                        u16::from(ODBC2_FUNCTIONS.contains(&id) || ODBC3_FUNCTIONS.contains(&id));
                }
            }
            SQL_API_ODBC3_ALL_FUNCTIONS => {
                let slice = std::slice::from_raw_parts_mut(
                    supported_ptr,
                    SQL_API_ODBC3_ALL_FUNCTIONS_SIZE,
                );
                slice.fill(0);
                for id in ODBC2_FUNCTIONS.iter().chain(ODBC3_FUNCTIONS.iter()) {
                    slice[usize::from(id >> 4)] |= 1 << (id & 0xF);
                }
            }
            id => {
                *supported_ptr =
                    u16::from(ODBC2_FUNCTIONS.contains(&id) || ODBC3_FUNCTIONS.contains(&id));
            }
        }
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLGetTypeInfo(statement_handle: HStmt, data_type: SmallInt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    let query = type_info_values_query(data_type);
    open_result_cursor(handle, stmt, &query, "SQLGetTypeInfo")
}

#[no_mangle]
pub extern "C" fn SQLGetTypeInfoW(statement_handle: HStmt, data_type: SmallInt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    let query = type_info_values_query(data_type);
    open_result_cursor(handle, stmt, &query, "SQLGetTypeInfoW")
}
