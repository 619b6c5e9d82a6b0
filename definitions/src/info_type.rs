use num_derive::FromPrimitive;

/// `InfoType` values the driver answers in `SQLGetInfo`. Unlisted values
/// are tolerated at the call site with an informational diagnostic.
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum InfoType {
    SQL_MAX_DRIVER_CONNECTIONS = 0,
    SQL_MAX_CONCURRENT_ACTIVITIES = 1,
    SQL_DATA_SOURCE_NAME = 2,
    SQL_DRIVER_NAME = 6,
    SQL_DRIVER_VER = 7,
    SQL_ODBC_API_CONFORMANCE = 9,
    SQL_ODBC_VER = 10,
    SQL_SEARCH_PATTERN_ESCAPE = 14,
    SQL_SERVER_NAME = 13,
    SQL_DBMS_NAME = 17,
    SQL_DBMS_VER = 18,
    SQL_ACCESSIBLE_TABLES = 19,
    SQL_ACCESSIBLE_PROCEDURES = 20,
    SQL_PROCEDURES = 21,
    SQL_CONCAT_NULL_BEHAVIOR = 22,
    SQL_CURSOR_COMMIT_BEHAVIOR = 23,
    SQL_CURSOR_ROLLBACK_BEHAVIOR = 24,
    SQL_DATA_SOURCE_READ_ONLY = 25,
    SQL_DEFAULT_TXN_ISOLATION = 26,
    SQL_EXPRESSIONS_IN_ORDERBY = 27,
    SQL_IDENTIFIER_CASE = 28,
    SQL_IDENTIFIER_QUOTE_CHAR = 29,
    SQL_MAX_COLUMN_NAME_LEN = 30,
    SQL_MAX_CURSOR_NAME_LEN = 31,
    SQL_MAX_SCHEMA_NAME_LEN = 32,
    SQL_MAX_CATALOG_NAME_LEN = 34,
    SQL_MAX_TABLE_NAME_LEN = 35,
    SQL_MULT_RESULT_SETS = 36,
    SQL_MULTIPLE_ACTIVE_TXN = 37,
    SQL_SCHEMA_TERM = 39,
    SQL_PROCEDURE_TERM = 40,
    SQL_CATALOG_NAME_SEPARATOR = 41,
    SQL_CATALOG_TERM = 42,
    SQL_SCROLL_OPTIONS = 44,
    SQL_TABLE_TERM = 45,
    SQL_TXN_CAPABLE = 46,
    SQL_USER_NAME = 47,
    SQL_CONVERT_FUNCTIONS = 48,
    SQL_NUMERIC_FUNCTIONS = 49,
    SQL_STRING_FUNCTIONS = 50,
    SQL_SYSTEM_FUNCTIONS = 51,
    SQL_TIMEDATE_FUNCTIONS = 52,
    SQL_TXN_ISOLATION_OPTION = 72,
    SQL_INTEGRITY = 73,
    SQL_CORRELATION_NAME = 74,
    SQL_NON_NULLABLE_COLUMNS = 75,
    SQL_DRIVER_ODBC_VER = 77,
    SQL_GETDATA_EXTENSIONS = 81,
    SQL_NULL_COLLATION = 85,
    SQL_COLUMN_ALIAS = 87,
    SQL_GROUP_BY = 88,
    SQL_KEYWORDS = 89,
    SQL_ORDER_BY_COLUMNS_IN_SELECT = 90,
    SQL_SCHEMA_USAGE = 91,
    SQL_CATALOG_USAGE = 92,
    SQL_QUOTED_IDENTIFIER_CASE = 93,
    SQL_SPECIAL_CHARACTERS = 94,
    SQL_MAX_COLUMNS_IN_GROUP_BY = 97,
    SQL_MAX_COLUMNS_IN_ORDER_BY = 99,
    SQL_MAX_COLUMNS_IN_SELECT = 100,
    SQL_TIMEDATE_ADD_INTERVALS = 109,
    SQL_TIMEDATE_DIFF_INTERVALS = 110,
    SQL_NEED_LONG_DATA_LEN = 111,
    SQL_LIKE_ESCAPE_CLAUSE = 113,
    SQL_CATALOG_LOCATION = 114,
    SQL_OJ_CAPABILITIES = 115,
    SQL_SQL_CONFORMANCE = 118,
    SQL_DATETIME_LITERALS = 119,
    SQL_BATCH_ROW_COUNT = 120,
    SQL_BATCH_SUPPORT = 121,
    SQL_DYNAMIC_CURSOR_ATTRIBUTES1 = 144,
    SQL_DYNAMIC_CURSOR_ATTRIBUTES2 = 145,
    SQL_FORWARD_ONLY_CURSOR_ATTRIBUTES1 = 146,
    SQL_FORWARD_ONLY_CURSOR_ATTRIBUTES2 = 147,
    SQL_KEYSET_CURSOR_ATTRIBUTES1 = 150,
    SQL_KEYSET_CURSOR_ATTRIBUTES2 = 151,
    SQL_ODBC_INTERFACE_CONFORMANCE = 152,
    SQL_PARAM_ARRAY_ROW_COUNTS = 153,
    SQL_PARAM_ARRAY_SELECTS = 154,
    SQL_SQL92_PREDICATES = 160,
    SQL_SQL92_RELATIONAL_JOIN_OPERATORS = 161,
    SQL_SQL92_VALUE_EXPRESSIONS = 165,
    SQL_STATIC_CURSOR_ATTRIBUTES1 = 167,
    SQL_STATIC_CURSOR_ATTRIBUTES2 = 168,
    SQL_AGGREGATE_FUNCTIONS = 169,
    SQL_CATALOG_NAME = 10003,
    SQL_COLLATION_SEQ = 10004,
    SQL_MAX_IDENTIFIER_LEN = 10005,
    SQL_ASYNC_MODE = 10021,
    SQL_ASYNC_DBC_FUNCTIONS = 10023,
    SQL_DRIVER_AWARE_POOLING_SUPPORTED = 10024,
    SQL_ASYNC_NOTIFICATION = 10025,
    SQL_DESCRIBE_PARAMETER = 10002,
}

/// Info types whose value is numeric; a null `InfoValuePtr` for these is an
/// invalid-attribute error instead of a no-op.
pub fn is_numeric_info_type(info_type: InfoType) -> bool {
    !matches!(
        info_type,
        InfoType::SQL_DATA_SOURCE_NAME
            | InfoType::SQL_DRIVER_NAME
            | InfoType::SQL_DRIVER_VER
            | InfoType::SQL_ODBC_VER
            | InfoType::SQL_SEARCH_PATTERN_ESCAPE
            | InfoType::SQL_SERVER_NAME
            | InfoType::SQL_DBMS_NAME
            | InfoType::SQL_DBMS_VER
            | InfoType::SQL_ACCESSIBLE_TABLES
            | InfoType::SQL_ACCESSIBLE_PROCEDURES
            | InfoType::SQL_PROCEDURES
            | InfoType::SQL_DATA_SOURCE_READ_ONLY
            | InfoType::SQL_EXPRESSIONS_IN_ORDERBY
            | InfoType::SQL_IDENTIFIER_QUOTE_CHAR
            | InfoType::SQL_MULT_RESULT_SETS
            | InfoType::SQL_MULTIPLE_ACTIVE_TXN
            | InfoType::SQL_SCHEMA_TERM
            | InfoType::SQL_PROCEDURE_TERM
            | InfoType::SQL_CATALOG_NAME_SEPARATOR
            | InfoType::SQL_CATALOG_TERM
            | InfoType::SQL_TABLE_TERM
            | InfoType::SQL_USER_NAME
            | InfoType::SQL_INTEGRITY
            | InfoType::SQL_DRIVER_ODBC_VER
            | InfoType::SQL_COLUMN_ALIAS
            | InfoType::SQL_KEYWORDS
            | InfoType::SQL_ORDER_BY_COLUMNS_IN_SELECT
            | InfoType::SQL_SPECIAL_CHARACTERS
            | InfoType::SQL_NEED_LONG_DATA_LEN
            | InfoType::SQL_LIKE_ESCAPE_CLAUSE
            | InfoType::SQL_CATALOG_NAME
            | InfoType::SQL_COLLATION_SEQ
            | InfoType::SQL_DESCRIBE_PARAMETER
    )
}
