use num_derive::FromPrimitive;

#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum CDataType {
    SQL_ARD_TYPE = -99,
    SQL_APD_TYPE = -100,
    SQL_C_UTINYINT = -28,
    SQL_C_UBIGINT = -27,
    SQL_C_STINYINT = -26,
    SQL_C_SBIGINT = -25,
    SQL_C_ULONG = -18,
    SQL_C_USHORT = -17,
    SQL_C_SLONG = -16,
    SQL_C_SSHORT = -15,
    SQL_C_GUID = -11,
    SQL_C_WCHAR = -8,
    SQL_C_BIT = -7,
    SQL_C_BINARY = -2,
    SQL_C_CHAR = 1,
    SQL_C_NUMERIC = 2,
    SQL_C_FLOAT = 7,
    SQL_C_DOUBLE = 8,
    SQL_C_DATE = 9,
    SQL_C_TIME = 10,
    SQL_C_TIMESTAMP = 11,
    SQL_C_TYPE_DATE = 91,
    SQL_C_TYPE_TIME = 92,
    SQL_C_TYPE_TIMESTAMP = 93,
    SQL_C_DEFAULT = 99,
    SQL_C_INTERVAL_YEAR = 101,
    SQL_C_INTERVAL_MONTH = 102,
    SQL_C_INTERVAL_DAY = 103,
    SQL_C_INTERVAL_HOUR = 104,
    SQL_C_INTERVAL_MINUTE = 105,
    SQL_C_INTERVAL_SECOND = 106,
    SQL_C_INTERVAL_YEAR_TO_MONTH = 107,
    SQL_C_INTERVAL_DAY_TO_HOUR = 108,
    SQL_C_INTERVAL_DAY_TO_MINUTE = 109,
    SQL_C_INTERVAL_DAY_TO_SECOND = 110,
    SQL_C_INTERVAL_HOUR_TO_MINUTE = 111,
    SQL_C_INTERVAL_HOUR_TO_SECOND = 112,
    SQL_C_INTERVAL_MINUTE_TO_SECOND = 113,
}

impl CDataType {
    /// Size in bytes of the fixed C type, used for column-wise binding
    /// strides and SQL_C_DEFAULT resolution. Variable-length types return
    /// None.
    pub fn fixed_size(&self) -> Option<usize> {
        use std::mem::size_of;
        match self {
            CDataType::SQL_C_BIT | CDataType::SQL_C_UTINYINT | CDataType::SQL_C_STINYINT => {
                Some(size_of::<u8>())
            }
            CDataType::SQL_C_SSHORT | CDataType::SQL_C_USHORT => Some(size_of::<i16>()),
            CDataType::SQL_C_SLONG | CDataType::SQL_C_ULONG => Some(size_of::<i32>()),
            CDataType::SQL_C_SBIGINT | CDataType::SQL_C_UBIGINT => Some(size_of::<i64>()),
            CDataType::SQL_C_FLOAT => Some(size_of::<f32>()),
            CDataType::SQL_C_DOUBLE => Some(size_of::<f64>()),
            CDataType::SQL_C_NUMERIC => Some(size_of::<crate::Numeric>()),
            CDataType::SQL_C_DATE | CDataType::SQL_C_TYPE_DATE => Some(size_of::<crate::Date>()),
            CDataType::SQL_C_TIME | CDataType::SQL_C_TYPE_TIME => Some(size_of::<crate::Time>()),
            CDataType::SQL_C_TIMESTAMP | CDataType::SQL_C_TYPE_TIMESTAMP => {
                Some(size_of::<crate::Timestamp>())
            }
            CDataType::SQL_C_GUID => Some(size_of::<crate::Guid>()),
            CDataType::SQL_C_INTERVAL_YEAR
            | CDataType::SQL_C_INTERVAL_MONTH
            | CDataType::SQL_C_INTERVAL_DAY
            | CDataType::SQL_C_INTERVAL_HOUR
            | CDataType::SQL_C_INTERVAL_MINUTE
            | CDataType::SQL_C_INTERVAL_SECOND
            | CDataType::SQL_C_INTERVAL_YEAR_TO_MONTH
            | CDataType::SQL_C_INTERVAL_DAY_TO_HOUR
            | CDataType::SQL_C_INTERVAL_DAY_TO_MINUTE
            | CDataType::SQL_C_INTERVAL_DAY_TO_SECOND
            | CDataType::SQL_C_INTERVAL_HOUR_TO_MINUTE
            | CDataType::SQL_C_INTERVAL_HOUR_TO_SECOND
            | CDataType::SQL_C_INTERVAL_MINUTE_TO_SECOND => {
                Some(size_of::<crate::IntervalStruct>())
            }
            _ => None,
        }
    }
}
