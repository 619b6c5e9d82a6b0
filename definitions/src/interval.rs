use crate::SqlDataType;

// SQL_DESC_DATETIME_INTERVAL_CODE values for datetime types
pub const SQL_CODE_DATE: i16 = 1;
pub const SQL_CODE_TIME: i16 = 2;
pub const SQL_CODE_TIMESTAMP: i16 = 3;

// SQL_DESC_DATETIME_INTERVAL_CODE values for interval types
pub const SQL_CODE_YEAR: i16 = 1;
pub const SQL_CODE_MONTH: i16 = 2;
pub const SQL_CODE_DAY: i16 = 3;
pub const SQL_CODE_HOUR: i16 = 4;
pub const SQL_CODE_MINUTE: i16 = 5;
pub const SQL_CODE_SECOND: i16 = 6;
pub const SQL_CODE_YEAR_TO_MONTH: i16 = 7;
pub const SQL_CODE_DAY_TO_HOUR: i16 = 8;
pub const SQL_CODE_DAY_TO_MINUTE: i16 = 9;
pub const SQL_CODE_DAY_TO_SECOND: i16 = 10;
pub const SQL_CODE_HOUR_TO_MINUTE: i16 = 11;
pub const SQL_CODE_HOUR_TO_SECOND: i16 = 12;
pub const SQL_CODE_MINUTE_TO_SECOND: i16 = 13;

// SQL_INTERVAL_STRUCT interval_type values (SQLINTERVAL enum in the C
// headers); these match the interval codes above.
pub const SQL_IS_YEAR: i32 = 1;
pub const SQL_IS_MONTH: i32 = 2;
pub const SQL_IS_DAY: i32 = 3;
pub const SQL_IS_HOUR: i32 = 4;
pub const SQL_IS_MINUTE: i32 = 5;
pub const SQL_IS_SECOND: i32 = 6;
pub const SQL_IS_YEAR_TO_MONTH: i32 = 7;
pub const SQL_IS_DAY_TO_HOUR: i32 = 8;
pub const SQL_IS_DAY_TO_MINUTE: i32 = 9;
pub const SQL_IS_DAY_TO_SECOND: i32 = 10;
pub const SQL_IS_HOUR_TO_MINUTE: i32 = 11;
pub const SQL_IS_HOUR_TO_SECOND: i32 = 12;
pub const SQL_IS_MINUTE_TO_SECOND: i32 = 13;

/// Datetime/interval subcode for a concise SQL type, if it has one.
pub fn datetime_interval_code(sql_type: SqlDataType) -> Option<i16> {
    match sql_type {
        SqlDataType::SQL_TYPE_DATE => Some(SQL_CODE_DATE),
        SqlDataType::SQL_TYPE_TIME => Some(SQL_CODE_TIME),
        SqlDataType::SQL_TYPE_TIMESTAMP => Some(SQL_CODE_TIMESTAMP),
        t if t.is_interval() => Some((t as i16) - 100),
        _ => None,
    }
}

/// The concise interval SQL type for a subcode, inverse of
/// [`datetime_interval_code`] for intervals.
pub fn interval_type_for_code(code: i16) -> Option<SqlDataType> {
    use num_traits::FromPrimitive;
    if (SQL_CODE_YEAR..=SQL_CODE_MINUTE_TO_SECOND).contains(&code) {
        SqlDataType::from_i16(code + 100)
    } else {
        None
    }
}
