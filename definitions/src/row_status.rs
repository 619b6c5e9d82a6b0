use crate::USmallInt;

pub const SQL_ROW_SUCCESS: USmallInt = 0;
pub const SQL_ROW_SUCCESS_WITH_INFO: USmallInt = 6;
pub const SQL_ROW_ERROR: USmallInt = 5;
pub const SQL_ROW_NOROW: USmallInt = 3;

pub const SQL_PARAM_SUCCESS: USmallInt = 0;
pub const SQL_PARAM_SUCCESS_WITH_INFO: USmallInt = 6;
pub const SQL_PARAM_ERROR: USmallInt = 5;
pub const SQL_PARAM_UNUSED: USmallInt = 7;
