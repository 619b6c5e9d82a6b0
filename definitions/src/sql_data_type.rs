use num_derive::FromPrimitive;

#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, Hash)]
pub enum SqlDataType {
    SQL_UNKNOWN_TYPE = 0,
    SQL_CHAR = 1,
    SQL_NUMERIC = 2,
    SQL_DECIMAL = 3,
    SQL_INTEGER = 4,
    SQL_SMALLINT = 5,
    SQL_FLOAT = 6,
    SQL_REAL = 7,
    SQL_DOUBLE = 8,
    SQL_DATETIME = 9,
    SQL_INTERVAL = 10,
    SQL_TIMESTAMP = 11,
    SQL_VARCHAR = 12,
    SQL_TYPE_DATE = 91,
    SQL_TYPE_TIME = 92,
    SQL_TYPE_TIMESTAMP = 93,
    SQL_LONGVARCHAR = -1,
    SQL_BINARY = -2,
    SQL_VARBINARY = -3,
    SQL_LONGVARBINARY = -4,
    SQL_BIGINT = -5,
    SQL_TINYINT = -6,
    SQL_BIT = -7,
    SQL_WCHAR = -8,
    SQL_WVARCHAR = -9,
    SQL_WLONGVARCHAR = -10,
    SQL_GUID = -11,
    SQL_INTERVAL_YEAR = 101,
    SQL_INTERVAL_MONTH = 102,
    SQL_INTERVAL_DAY = 103,
    SQL_INTERVAL_HOUR = 104,
    SQL_INTERVAL_MINUTE = 105,
    SQL_INTERVAL_SECOND = 106,
    SQL_INTERVAL_YEAR_TO_MONTH = 107,
    SQL_INTERVAL_DAY_TO_HOUR = 108,
    SQL_INTERVAL_DAY_TO_MINUTE = 109,
    SQL_INTERVAL_DAY_TO_SECOND = 110,
    SQL_INTERVAL_HOUR_TO_MINUTE = 111,
    SQL_INTERVAL_HOUR_TO_SECOND = 112,
    SQL_INTERVAL_MINUTE_TO_SECOND = 113,
}

/// `SQL_ALL_TYPES` for `SQLGetTypeInfo`.
pub const SQL_ALL_TYPES: i16 = 0;

impl SqlDataType {
    pub fn is_interval(&self) -> bool {
        (*self as i16) >= 101 && (*self as i16) <= 113
    }

    pub fn is_datetime(&self) -> bool {
        matches!(
            self,
            SqlDataType::SQL_TYPE_DATE
                | SqlDataType::SQL_TYPE_TIME
                | SqlDataType::SQL_TYPE_TIMESTAMP
        )
    }

    /// The verbose type reported in SQL_DESC_TYPE: datetime and interval
    /// concise types collapse to SQL_DATETIME / SQL_INTERVAL.
    pub fn verbose(&self) -> SqlDataType {
        if self.is_interval() {
            SqlDataType::SQL_INTERVAL
        } else if self.is_datetime() {
            SqlDataType::SQL_DATETIME
        } else {
            *self
        }
    }
}
