use num_derive::FromPrimitive;

/// Descriptor field identifiers used by `SQLGetDescField`/`SQLSetDescField`
/// and `SQLColAttribute`.
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum Desc {
    SQL_DESC_COUNT = 1001,
    SQL_DESC_TYPE = 1002,
    SQL_DESC_LENGTH = 1003,
    SQL_DESC_OCTET_LENGTH_PTR = 1004,
    SQL_DESC_PRECISION = 1005,
    SQL_DESC_SCALE = 1006,
    SQL_DESC_DATETIME_INTERVAL_CODE = 1007,
    SQL_DESC_NULLABLE = 1008,
    SQL_DESC_INDICATOR_PTR = 1009,
    SQL_DESC_DATA_PTR = 1010,
    SQL_DESC_NAME = 1011,
    SQL_DESC_UNNAMED = 1012,
    SQL_DESC_OCTET_LENGTH = 1013,
    SQL_DESC_ALLOC_TYPE = 1099,

    SQL_DESC_ARRAY_SIZE = 20,
    SQL_DESC_ARRAY_STATUS_PTR = 21,
    SQL_DESC_AUTO_UNIQUE_VALUE = 11,
    SQL_DESC_BASE_COLUMN_NAME = 22,
    SQL_DESC_BASE_TABLE_NAME = 23,
    SQL_DESC_BIND_OFFSET_PTR = 24,
    SQL_DESC_BIND_TYPE = 25,
    SQL_DESC_CASE_SENSITIVE = 12,
    SQL_DESC_CATALOG_NAME = 17,
    SQL_DESC_CONCISE_TYPE = 2,
    SQL_DESC_DATETIME_INTERVAL_PRECISION = 26,
    SQL_DESC_DISPLAY_SIZE = 6,
    SQL_DESC_FIXED_PREC_SCALE = 9,
    SQL_DESC_LABEL = 18,
    SQL_DESC_LITERAL_PREFIX = 27,
    SQL_DESC_LITERAL_SUFFIX = 28,
    SQL_DESC_LOCAL_TYPE_NAME = 29,
    SQL_DESC_MAXIMUM_SCALE = 30,
    SQL_DESC_MINIMUM_SCALE = 31,
    SQL_DESC_NUM_PREC_RADIX = 32,
    SQL_DESC_PARAMETER_TYPE = 33,
    SQL_DESC_ROWS_PROCESSED_PTR = 34,
    SQL_DESC_ROWVER = 35,
    SQL_DESC_SCHEMA_NAME = 16,
    SQL_DESC_SEARCHABLE = 13,
    SQL_DESC_TYPE_NAME = 14,
    SQL_DESC_TABLE_NAME = 15,
    SQL_DESC_UNSIGNED = 8,
    SQL_DESC_UPDATABLE = 10,
}

impl Desc {
    /// Header fields live on the descriptor itself rather than a record.
    pub fn is_header_field(&self) -> bool {
        matches!(
            self,
            Desc::SQL_DESC_ALLOC_TYPE
                | Desc::SQL_DESC_ARRAY_SIZE
                | Desc::SQL_DESC_ARRAY_STATUS_PTR
                | Desc::SQL_DESC_BIND_OFFSET_PTR
                | Desc::SQL_DESC_BIND_TYPE
                | Desc::SQL_DESC_COUNT
                | Desc::SQL_DESC_ROWS_PROCESSED_PTR
        )
    }

    /// Character (string) fields; everything else returns a numeric value.
    pub fn is_string_field(&self) -> bool {
        matches!(
            self,
            Desc::SQL_DESC_BASE_COLUMN_NAME
                | Desc::SQL_DESC_BASE_TABLE_NAME
                | Desc::SQL_DESC_CATALOG_NAME
                | Desc::SQL_DESC_LABEL
                | Desc::SQL_DESC_LITERAL_PREFIX
                | Desc::SQL_DESC_LITERAL_SUFFIX
                | Desc::SQL_DESC_LOCAL_TYPE_NAME
                | Desc::SQL_DESC_NAME
                | Desc::SQL_DESC_SCHEMA_NAME
                | Desc::SQL_DESC_TABLE_NAME
                | Desc::SQL_DESC_TYPE_NAME
        )
    }
}

/// SQL_DESC_ALLOC_TYPE values.
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum AllocType {
    SQL_DESC_ALLOC_AUTO = 1,
    SQL_DESC_ALLOC_USER = 2,
}

// SQL_DESC_UNNAMED values
pub const SQL_NAMED: i16 = 0;
pub const SQL_UNNAMED: i16 = 1;

// SQL_DESC_SEARCHABLE values
pub const SQL_PRED_NONE: i32 = 0;
pub const SQL_PRED_CHAR: i32 = 1;
pub const SQL_PRED_BASIC: i32 = 2;
pub const SQL_SEARCHABLE: i32 = 3;

// SQL_DESC_UPDATABLE values
pub const SQL_ATTR_READONLY: i32 = 0;
pub const SQL_ATTR_WRITE: i32 = 1;
pub const SQL_ATTR_READWRITE_UNKNOWN: i32 = 2;
