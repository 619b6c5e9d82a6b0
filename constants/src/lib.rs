use lazy_static::lazy_static;
use std::collections::HashSet;

pub const VENDOR_IDENTIFIER: &str = "DuckDB";
pub const DRIVER_NAME: &str = "DuckDB ODBC Driver";
pub const DBMS_NAME: &str = "DuckDB";
pub const ODBC_VERSION: &str = "03.51";
pub const DRIVER_LOG_VERSION: &str = env!("CARGO_PKG_VERSION");

// SQL states
pub const NOT_IMPLEMENTED: &str = "HYC00";
pub const GENERAL_ERROR: &str = "HY000";
pub const INVALID_ATTR_IDENTIFIER: &str = "HY092";
pub const INVALID_ATTR_VALUE: &str = "HY024";
pub const INVALID_SQL_TYPE: &str = "HY004";
pub const INVALID_STRING_OR_BUFFER_LENGTH: &str = "HY090";
pub const UNABLE_TO_CONNECT: &str = "08001";
pub const CONNECTION_NOT_OPEN: &str = "08003";
pub const CONNECTION_IN_USE: &str = "08002";
pub const RIGHT_TRUNCATED: &str = "01004";
pub const OPTION_CHANGED: &str = "01S02";
pub const CONNECTION_ESTABLISHED_INFO: &str = "01S00";
pub const INVALID_CONNECTION_STRING_ATTR: &str = "01S09";
pub const GENERAL_WARNING: &str = "01000";
pub const INVALID_DESCRIPTOR_INDEX: &str = "07009";
pub const RESTRICTED_DATA_TYPE: &str = "07006";
pub const INVALID_CURSOR_STATE: &str = "24000";
pub const CURSOR_NOT_SCROLLABLE: &str = "HY106";
pub const FUNCTION_SEQUENCE_ERROR: &str = "HY010";
pub const NO_CURSOR_OPEN: &str = "HY109";
pub const UNSUPPORTED_FIELD_DESCRIPTOR: &str = "HY091";
pub const INCONSISTENT_DESCRIPTOR: &str = "HY021";
pub const DRIVER_UNABLE_TO_ESTABLISH: &str = "IM003";
pub const SYNTAX_ERROR_OR_ACCESS_VIOLATION: &str = "42000";
pub const INVALID_DATETIME_FORMAT: &str = "22007";
pub const INTEGRAL_TRUNCATION: &str = "22003";
pub const FRACTIONAL_TRUNCATION: &str = "01S07";
pub const INVALID_CHARACTER_VALUE: &str = "22018";
pub const INDICATOR_VARIABLE_REQUIRED: &str = "22002";

pub const SQL_ALL_CATALOGS: &str = "%";
pub const SQL_ALL_SCHEMAS: &str = "%";
pub const SQL_ALL_TABLE_TYPES: &str = "%";

lazy_static! {
    /// SQLSTATE classes defined by ISO SQL/CLI; every other class the driver
    /// emits is ODBC-specific. Drives SQL_DIAG_CLASS_ORIGIN.
    pub static ref ISO_SQLSTATE_CLASSES: HashSet<&'static str> = [
        "00", "01", "02", "07", "08", "0A", "21", "22", "23", "24", "25", "26", "28", "2B", "2C",
        "2D", "2E", "33", "34", "35", "37", "3C", "3D", "3F", "40", "42", "44",
    ]
    .into_iter()
    .collect();
}

/// Class origin of a 5-character SQLSTATE per the ODBC diagnostics contract.
pub fn sqlstate_class_origin(sqlstate: &str) -> &'static str {
    match sqlstate.get(0..2) {
        Some(class) if ISO_SQLSTATE_CLASSES.contains(class) => "ISO 9075",
        _ => "ODBC 3.0",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn class_origin_iso_for_truncation() {
        assert_eq!("ISO 9075", sqlstate_class_origin(RIGHT_TRUNCATED));
        assert_eq!("ISO 9075", sqlstate_class_origin(INVALID_CURSOR_STATE));
        assert_eq!("ISO 9075", sqlstate_class_origin(SYNTAX_ERROR_OR_ACCESS_VIOLATION));
    }

    #[test]
    fn class_origin_odbc_for_driver_states() {
        assert_eq!("ODBC 3.0", sqlstate_class_origin(NOT_IMPLEMENTED));
        assert_eq!("ODBC 3.0", sqlstate_class_origin(GENERAL_ERROR));
        assert_eq!("ODBC 3.0", sqlstate_class_origin(DRIVER_UNABLE_TO_ESTABLISH));
    }
}
