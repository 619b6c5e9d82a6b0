//! ODBC types whose representation is compatible with the ODBC C API.
//!
//! This layer is not generated; it covers the symbols this driver actually
//! exports and dispatches on. Symbols deprecated since ODBC 3 are left out.

pub use self::{
    attributes::*, c_data_type::*, desc::*, diag_type::*, fetch_orientation::*, functions::*,
    info_type::*, interval::*, nullability::*, param_type::*, row_status::*, sql_data_type::*,
    sqlreturn::*,
};
use cstr::WideChar;
use num_derive::FromPrimitive;
use std::os::raw::{c_int, c_void};

mod attributes;
mod c_data_type;
mod desc;
mod diag_type;
mod fetch_orientation;
mod functions;
mod info_type;
mod interval;
mod nullability;
mod param_type;
mod row_status;
mod sql_data_type;
mod sqlreturn;

// These types can never be instantiated in Rust code.
pub enum Obj {}

pub enum Env {}

pub enum Dbc {}

pub enum Stmt {}

pub enum Description {}

pub type Handle = *mut Obj;
pub type HEnv = *mut Env;
pub type HDbc = *mut Dbc;
pub type HStmt = *mut Stmt;
pub type HDesc = *mut Description;

pub type SmallInt = i16;
pub type USmallInt = u16;
pub type Integer = i32;
pub type UInteger = u32;
pub type Pointer = *mut c_void;
pub type Char = u8;
pub type SChar = i8;
pub type WChar = WideChar;

pub type Len = isize;
pub type ULen = usize;

pub type HWnd = Pointer;

pub type RetCode = i16;

// Special length/indicator values
pub const SQL_NULL_DATA: isize = -1;
pub const SQL_DATA_AT_EXEC: isize = -2;
pub const SQL_NTS: isize = -3;
pub const SQL_NO_TOTAL: isize = -4;
/// `SQL_LEN_DATA_AT_EXEC(length)` encodes as `-100 - length`.
pub const SQL_LEN_DATA_AT_EXEC_OFFSET: isize = -100;

pub const SQL_ROW_NUMBER_UNKNOWN: isize = -2;
pub const SQL_COLUMN_NUMBER_UNKNOWN: isize = -2;

/// Maximum diagnostic message length
pub const MAX_MESSAGE_LENGTH: SmallInt = 512;
pub const SQLSTATE_SIZE: usize = 5;

// Attribute string length markers
pub const IS_POINTER: i32 = -4;
pub const IS_UINTEGER: i32 = -5;
pub const IS_INTEGER: i32 = -6;
pub const IS_USMALLINT: i32 = -7;
pub const IS_SMALLINT: i32 = -8;

/// SQL Free Statement options
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum FreeStmtOption {
    SQL_CLOSE = 0,
    SQL_DROP = 1,
    SQL_UNBIND = 2,
    SQL_RESET_PARAMS = 3,
}

/// Represented in C headers as SQLSMALLINT
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum HandleType {
    SQL_HANDLE_ENV = 1,
    SQL_HANDLE_DBC = 2,
    SQL_HANDLE_STMT = 3,
    SQL_HANDLE_DESC = 4,
}

/// Options for `SQLDriverConnect`
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum DriverConnectOption {
    SQL_DRIVER_NOPROMPT = 0,
    SQL_DRIVER_COMPLETE = 1,
    SQL_DRIVER_PROMPT = 2,
    SQL_DRIVER_COMPLETE_REQUIRED = 3,
}

/// Completion types for `SQLEndTran`
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum CompletionType {
    SQL_COMMIT = 0,
    SQL_ROLLBACK = 1,
}

/// Operations for `SQLSetPos`
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum SetPosOperation {
    SQL_POSITION = 0,
    SQL_REFRESH = 1,
    SQL_UPDATE = 2,
    SQL_DELETE = 3,
}

/// `SQL_DATE_STRUCT`
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Date {
    pub year: SmallInt,
    pub month: USmallInt,
    pub day: USmallInt,
}

/// `SQL_TIME_STRUCT`
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Time {
    pub hour: USmallInt,
    pub minute: USmallInt,
    pub second: USmallInt,
}

/// `SQL_TIMESTAMP_STRUCT`; `fraction` is in nanoseconds.
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Timestamp {
    pub year: SmallInt,
    pub month: USmallInt,
    pub day: USmallInt,
    pub hour: USmallInt,
    pub minute: USmallInt,
    pub second: USmallInt,
    pub fraction: UInteger,
}

/// `SQL_YEAR_MONTH_STRUCT`
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct YearMonth {
    pub year: UInteger,
    pub month: UInteger,
}

/// `SQL_DAY_SECOND_STRUCT`
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct DaySecond {
    pub day: UInteger,
    pub hour: UInteger,
    pub minute: UInteger,
    pub second: UInteger,
    pub fraction: UInteger,
}

/// `SQL_INTERVAL_UNION`
#[repr(C)]
#[derive(Copy, Clone)]
pub union IntervalUnion {
    pub year_month: YearMonth,
    pub day_second: DaySecond,
}

/// `SQL_INTERVAL_STRUCT`; `interval_sign` is 1 for negative intervals.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct IntervalStruct {
    pub interval_type: c_int,
    pub interval_sign: SmallInt,
    pub interval_value: IntervalUnion,
}

/// `SQLGUID`
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Guid {
    pub d1: u32,
    pub d2: u16,
    pub d3: u16,
    pub d4: [u8; 8],
}

pub const MAX_NUMERIC_LEN: usize = 16;

/// `SQL_NUMERIC_STRUCT`; `val` is a little-endian unsigned magnitude.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Numeric {
    pub precision: Char,
    /// Number of decimal digits to the right of the decimal point.
    pub scale: SChar,
    /// 1 if positive, 0 if negative
    pub sign: Char,
    pub val: [Char; MAX_NUMERIC_LEN],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum SqlBool {
    SQL_FALSE = 0,
    SQL_TRUE,
}

// Transaction isolation bitmasks
pub const SQL_TXN_SERIALIZABLE: u32 = 0x00000008;

// SQL_CURSOR_COMMIT_BEHAVIOR / SQL_CURSOR_ROLLBACK_BEHAVIOR values
pub const SQL_CB_DELETE: u16 = 0;
pub const SQL_CB_CLOSE: u16 = 1;
pub const SQL_CB_PRESERVE: u16 = 2;

// SQL_TXN_CAPABLE values
pub const SQL_TC_NONE: u16 = 0;
pub const SQL_TC_DML: u16 = 1;
pub const SQL_TC_ALL: u16 = 2;

// SQL_SCROLL_OPTIONS bitmasks
pub const SQL_SO_FORWARD_ONLY: u32 = 0x00000001;
pub const SQL_SO_KEYSET_DRIVEN: u32 = 0x00000002;
pub const SQL_SO_DYNAMIC: u32 = 0x00000004;
pub const SQL_SO_STATIC: u32 = 0x00000010;

// SQL_GETDATA_EXTENSIONS bitmasks
pub const SQL_GD_ANY_COLUMN: u32 = 0x00000001;
pub const SQL_GD_ANY_ORDER: u32 = 0x00000002;
pub const SQL_GD_BLOCK: u32 = 0x00000004;
pub const SQL_GD_BOUND: u32 = 0x00000008;

// Cursor attribute bitmasks (SQL_*_CURSOR_ATTRIBUTES1/2)
pub const SQL_CA1_NEXT: u32 = 0x00000001;
pub const SQL_CA1_ABSOLUTE: u32 = 0x00000002;
pub const SQL_CA1_RELATIVE: u32 = 0x00000004;
pub const SQL_CA2_READ_ONLY_CONCURRENCY: u32 = 0x00000001;
pub const SQL_CA2_CRC_EXACT: u32 = 0x00001000;

// SQL_ODBC_INTERFACE_CONFORMANCE values
pub const SQL_OIC_CORE: u32 = 0x00000001;

// SQL_SQL_CONFORMANCE values
pub const SQL_SC_SQL92_ENTRY: u32 = 0x00000001;

// SQL_IDENTIFIER_CASE values
pub const SQL_IC_UPPER: u16 = 1;
pub const SQL_IC_LOWER: u16 = 2;
pub const SQL_IC_SENSITIVE: u16 = 3;
pub const SQL_IC_MIXED: u16 = 4;

// SQL_CONCAT_NULL_BEHAVIOR values
pub const SQL_CB_NULL: u16 = 0;
pub const SQL_CB_NON_NULL: u16 = 1;

// SQL_NULL_COLLATION values
pub const SQL_NC_HIGH: u16 = 0;
pub const SQL_NC_LOW: u16 = 1;

// SQL_GROUP_BY values
pub const SQL_GB_GROUP_BY_EQUALS_SELECT: u16 = 2;

// SQL_CATALOG_USAGE bitmasks
pub const SQL_CU_DML_STATEMENTS: u32 = 0x00000001;
pub const SQL_CU_TABLE_DEFINITION: u32 = 0x00000002;

// SQL_CATALOG_LOCATION values
pub const SQL_CL_START: u16 = 0x0001;

// SQL_SCHEMA_USAGE bitmasks
pub const SQL_SU_DML_STATEMENTS: u32 = 0x00000001;
pub const SQL_SU_TABLE_DEFINITION: u32 = 0x00000002;

// SQL_BATCH_SUPPORT / SQL_BATCH_ROW_COUNT bitmasks
pub const SQL_BS_SELECT_EXPLICIT: u32 = 0x00000001;
pub const SQL_BS_ROW_COUNT_EXPLICIT: u32 = 0x00000002;
pub const SQL_BRC_EXPLICIT: u32 = 0x00000002;

// SQL_PARAM_ARRAY_ROW_COUNTS / SQL_PARAM_ARRAY_SELECTS values
pub const SQL_PARC_BATCH: u32 = 1;
pub const SQL_PARC_NO_BATCH: u32 = 2;
pub const SQL_PAS_NO_SELECT: u32 = 3;

// SQL_ASYNC_MODE values
pub const SQL_AM_NONE: u32 = 0;

// SQL_ASYNC_NOTIFICATION values
pub const SQL_ASYNC_NOTIFICATION_NOT_CAPABLE: u32 = 0;

// SQL_ASYNC_DBC_FUNCTIONS values
pub const SQL_ASYNC_DBC_NOT_CAPABLE: u32 = 0;

// SQL_CORRELATION_NAME values
pub const SQL_CN_ANY: u16 = 2;

// SQL_AGGREGATE_FUNCTIONS bitmasks
pub const SQL_AF_AVG: u32 = 0x00000001;
pub const SQL_AF_COUNT: u32 = 0x00000002;
pub const SQL_AF_MAX: u32 = 0x00000004;
pub const SQL_AF_MIN: u32 = 0x00000008;
pub const SQL_AF_SUM: u32 = 0x00000010;
pub const SQL_AF_DISTINCT: u32 = 0x00000020;
pub const SQL_AF_ALL: u32 = 0x00000040;

// SQL_CONVERT_FUNCTIONS bitmask
pub const SQL_FN_CVT_CAST: u32 = 0x00000002;

// SQL_SQL92_PREDICATES bitmasks
pub const SQL_SP_EXISTS: u32 = 0x00000001;
pub const SQL_SP_ISNOTNULL: u32 = 0x00000002;
pub const SQL_SP_ISNULL: u32 = 0x00000004;
pub const SQL_SP_LIKE: u32 = 0x00000200;
pub const SQL_SP_IN: u32 = 0x00000400;
pub const SQL_SP_BETWEEN: u32 = 0x00000800;
pub const SQL_SP_COMPARISON: u32 = 0x00001000;
pub const SQL_SP_QUANTIFIED_COMPARISON: u32 = 0x00002000;

// SQL_SQL92_RELATIONAL_JOIN_OPERATORS bitmasks
pub const SQL_SRJO_CROSS_JOIN: u32 = 0x00000002;
pub const SQL_SRJO_INNER_JOIN: u32 = 0x00000010;
pub const SQL_SRJO_LEFT_OUTER_JOIN: u32 = 0x00000040;
pub const SQL_SRJO_RIGHT_OUTER_JOIN: u32 = 0x00000100;

// SQL_SQL92_VALUE_EXPRESSIONS bitmasks
pub const SQL_SVE_CASE: u32 = 0x00000001;
pub const SQL_SVE_CAST: u32 = 0x00000002;
pub const SQL_SVE_COALESCE: u32 = 0x00000004;
pub const SQL_SVE_NULLIF: u32 = 0x00000008;

// SQL_ODBC_API_CONFORMANCE values
pub const SQL_OAC_LEVEL1: u16 = 1;

// SQL_NON_NULLABLE_COLUMNS values
pub const SQL_NNC_NON_NULL: u16 = 1;

// SQL_ODBC_API_CONFORMANCE / misc info strings
pub const SQL_INFO_Y: &str = "Y";
pub const SQL_INFO_N: &str = "N";

// Autocommit values for SQL_ATTR_AUTOCOMMIT
pub const SQL_AUTOCOMMIT_OFF: usize = 0;
pub const SQL_AUTOCOMMIT_ON: usize = 1;

// Access mode values for SQL_ATTR_ACCESS_MODE
pub const SQL_MODE_READ_WRITE: usize = 0;
pub const SQL_MODE_READ_ONLY: usize = 1;
