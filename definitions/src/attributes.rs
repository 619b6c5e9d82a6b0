use crate::Pointer;
use num_derive::FromPrimitive;

/// Governs behaviour of `SQLSetEnvAttr`/`SQLGetEnvAttr`.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
#[repr(i32)]
pub enum EnvironmentAttribute {
    SQL_ATTR_ODBC_VERSION = 200,
    SQL_ATTR_CONNECTION_POOLING = 201,
    SQL_ATTR_CP_MATCH = 202,
    SQL_ATTR_OUTPUT_NTS = 10001,
}

/// Possible values for the `SQL_ATTR_ODBC_VERSION` attribute.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
#[repr(u32)]
pub enum AttrOdbcVersion {
    SQL_OV_ODBC2 = 2,
    SQL_OV_ODBC3 = 3,
    SQL_OV_ODBC3_80 = 380,
}

impl From<AttrOdbcVersion> for Pointer {
    fn from(source: AttrOdbcVersion) -> Pointer {
        source as u32 as usize as Pointer
    }
}

/// Connection pooling scheme set on the environment. The driver records
/// the value but performs no pooling itself.
#[allow(non_camel_case_types)]
#[repr(u32)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum AttrConnectionPooling {
    #[default]
    SQL_CP_OFF = 0,
    SQL_CP_ONE_PER_DRIVER = 1,
    SQL_CP_ONE_PER_HENV = 2,
    SQL_CP_DRIVER_AWARE = 3,
}

impl From<AttrConnectionPooling> for Pointer {
    fn from(source: AttrConnectionPooling) -> Pointer {
        source as u32 as usize as Pointer
    }
}

/// Determines how a connection is chosen from a connection pool.
#[allow(non_camel_case_types)]
#[repr(u32)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum AttrCpMatch {
    #[default]
    SQL_CP_STRICT_MATCH = 0,
    SQL_CP_RELAXED_MATCH = 1,
}

impl From<AttrCpMatch> for Pointer {
    fn from(source: AttrCpMatch) -> Pointer {
        source as u32 as usize as Pointer
    }
}

const SQL_ATTR_ASYNC_ENABLE: i32 = 4;
const SQL_ATTR_METADATA_ID: i32 = 10014;

/// Statement attributes for `SQLSetStmtAttr`/`SQLGetStmtAttr`.
#[allow(non_camel_case_types)]
#[repr(i32)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum StatementAttribute {
    SQL_ATTR_CURSOR_SCROLLABLE = -1,
    SQL_ATTR_CURSOR_SENSITIVITY = -2,
    SQL_ATTR_QUERY_TIMEOUT = 0,
    SQL_ATTR_MAX_ROWS = 1,
    SQL_ATTR_NOSCAN = 2,
    SQL_ATTR_MAX_LENGTH = 3,
    SQL_ATTR_ASYNC_ENABLE = SQL_ATTR_ASYNC_ENABLE,
    SQL_ATTR_ROW_BIND_TYPE = 5,
    SQL_ATTR_CURSOR_TYPE = 6,
    SQL_ATTR_CONCURRENCY = 7,
    SQL_ATTR_KEYSET_SIZE = 8,
    SQL_ROWSET_SIZE = 9,
    SQL_ATTR_SIMULATE_CURSOR = 10,
    SQL_ATTR_RETRIEVE_DATA = 11,
    SQL_ATTR_USE_BOOKMARKS = 12,
    SQL_ATTR_ROW_NUMBER = 14,
    SQL_ATTR_ENABLE_AUTO_IPD = 15,
    SQL_ATTR_FETCH_BOOKMARK_PTR = 16,
    SQL_ATTR_PARAM_BIND_OFFSET_PTR = 17,
    SQL_ATTR_PARAM_BIND_TYPE = 18,
    SQL_ATTR_PARAM_OPERATION_PTR = 19,
    SQL_ATTR_PARAM_STATUS_PTR = 20,
    SQL_ATTR_PARAMS_PROCESSED_PTR = 21,
    SQL_ATTR_PARAMSET_SIZE = 22,
    SQL_ATTR_ROW_BIND_OFFSET_PTR = 23,
    SQL_ATTR_ROW_OPERATION_PTR = 24,
    SQL_ATTR_ROW_STATUS_PTR = 25,
    SQL_ATTR_ROWS_FETCHED_PTR = 26,
    SQL_ATTR_ROW_ARRAY_SIZE = 27,
    SQL_ATTR_ASYNC_STMT_EVENT = 29,
    SQL_ATTR_APP_ROW_DESC = 10010,
    SQL_ATTR_APP_PARAM_DESC = 10011,
    SQL_ATTR_IMP_ROW_DESC = 10012,
    SQL_ATTR_IMP_PARAM_DESC = 10013,
    SQL_ATTR_METADATA_ID = SQL_ATTR_METADATA_ID,
}

/// Connection attributes for `SQLSetConnectAttr`/`SQLGetConnectAttr`.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
#[repr(i32)]
pub enum ConnectionAttribute {
    SQL_ATTR_ASYNC_ENABLE = SQL_ATTR_ASYNC_ENABLE,
    SQL_ATTR_ACCESS_MODE = 101,
    SQL_ATTR_AUTOCOMMIT = 102,
    SQL_ATTR_LOGIN_TIMEOUT = 103,
    SQL_ATTR_TRACE = 104,
    SQL_ATTR_TRACEFILE = 105,
    SQL_ATTR_TRANSLATE_LIB = 106,
    SQL_ATTR_TRANSLATE_OPTION = 107,
    SQL_ATTR_TXN_ISOLATION = 108,
    SQL_ATTR_CURRENT_CATALOG = 109,
    SQL_ATTR_ODBC_CURSORS = 110,
    SQL_ATTR_QUIET_MODE = 111,
    SQL_ATTR_PACKET_SIZE = 112,
    SQL_ATTR_CONNECTION_TIMEOUT = 113,
    SQL_ATTR_DISCONNECT_BEHAVIOR = 114,
    SQL_ATTR_ASYNC_DBC_FUNCTIONS_ENABLE = 117,
    SQL_ATTR_ASYNC_DBC_EVENT = 119,
    SQL_ATTR_ENLIST_IN_DTC = 1207,
    SQL_ATTR_ENLIST_IN_XA = 1208,
    SQL_ATTR_CONNECTION_DEAD = 1209,
    SQL_ATTR_AUTO_IPD = 10001,
    SQL_ATTR_METADATA_ID = SQL_ATTR_METADATA_ID,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum CursorScrollable {
    SQL_NONSCROLLABLE = 0,
    SQL_SCROLLABLE = 1,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum CursorSensitivity {
    SQL_UNSPECIFIED = 0,
    SQL_INSENSITIVE = 1,
    SQL_SENSITIVE = 2,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum AsyncEnable {
    SQL_ASYNC_ENABLE_OFF = 0,
    SQL_ASYNC_ENABLE_ON = 1,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum Concurrency {
    SQL_CONCUR_READ_ONLY = 1,
    SQL_CONCUR_LOCK = 2,
    SQL_CONCUR_ROWVER = 3,
    SQL_CONCUR_VALUES = 4,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum CursorType {
    SQL_CURSOR_FORWARD_ONLY = 0,
    SQL_CURSOR_KEYSET_DRIVEN = 1,
    SQL_CURSOR_DYNAMIC = 2,
    SQL_CURSOR_STATIC = 3,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum NoScan {
    SQL_NOSCAN_OFF = 0,
    SQL_NOSCAN_ON = 1,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum BindType {
    SQL_BIND_BY_COLUMN = 0,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum RetrieveData {
    SQL_RD_OFF = 0,
    SQL_RD_ON = 1,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum UseBookmarks {
    SQL_UB_OFF = 0,
    SQL_UB_VARIABLE = 2,
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(usize)]
pub enum SimulateCursor {
    SQL_SC_NON_UNIQUE = 0,
    SQL_SC_TRY_UNIQUE = 1,
    SQL_SC_UNIQUE = 2,
}
