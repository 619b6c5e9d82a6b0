use constants::{
    CONNECTION_ESTABLISHED_INFO, CURSOR_NOT_SCROLLABLE, FRACTIONAL_TRUNCATION,
    FUNCTION_SEQUENCE_ERROR, GENERAL_ERROR, GENERAL_WARNING, INCONSISTENT_DESCRIPTOR,
    INTEGRAL_TRUNCATION, INVALID_ATTR_IDENTIFIER, INVALID_ATTR_VALUE, INVALID_CHARACTER_VALUE,
    INVALID_CURSOR_STATE, INVALID_DATETIME_FORMAT, INVALID_DESCRIPTOR_INDEX,
    INVALID_STRING_OR_BUFFER_LENGTH, NOT_IMPLEMENTED, NO_CURSOR_OPEN, OPTION_CHANGED,
    RESTRICTED_DATA_TYPE, RIGHT_TRUNCATED, UNSUPPORTED_FIELD_DESCRIPTOR, VENDOR_IDENTIFIER,
};

#[derive(Debug)]
pub enum ODBCError {
    Unimplemented(&'static str),
    DriverManagerFunction(&'static str),
    InvalidHandleType(&'static str),
    InvalidAttrValue(String),
    InvalidAttrIdentifier(i32),
    ReadOnlyAttr(&'static str),
    OptionValueChanged(&'static str, &'static str),
    InvalidDescriptorIndex(i32),
    InvalidDescriptorField(i16, bool),
    InconsistentDescriptor(i16),
    RestrictedDataType(&'static str, String),
    OutStringTruncated(usize),
    InvalidStringOrBufferLength(isize),
    InvalidCursorState,
    CursorNotScrollable,
    FunctionSequenceError(&'static str),
    NoCursorOpen,
    ConnectionAlreadyEstablished,
    IntegralTruncation(String),
    FractionalTruncation(String),
    InvalidCharacterValue(String),
    InvalidDatetimeFormat(String),
    IndicatorVariableRequired,
    UnknownInfoType(u16),
    SessionInitRan(String),
    General(String),
    Core(duckdb_odbc_core::Error),
}

impl std::fmt::Display for ODBCError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.get_error_message())
    }
}

impl From<duckdb_odbc_core::Error> for ODBCError {
    fn from(error: duckdb_odbc_core::Error) -> Self {
        ODBCError::Core(error)
    }
}

impl ODBCError {
    pub fn get_sql_state(&self) -> String {
        match self {
            ODBCError::Unimplemented(_) => NOT_IMPLEMENTED,
            ODBCError::DriverManagerFunction(_) | ODBCError::General(_) => GENERAL_ERROR,
            ODBCError::InvalidHandleType(_) => GENERAL_ERROR,
            ODBCError::InvalidAttrValue(_) => INVALID_ATTR_VALUE,
            ODBCError::InvalidAttrIdentifier(_) | ODBCError::ReadOnlyAttr(_) => {
                INVALID_ATTR_IDENTIFIER
            }
            ODBCError::OptionValueChanged(_, _) => OPTION_CHANGED,
            ODBCError::InvalidDescriptorIndex(_) => INVALID_DESCRIPTOR_INDEX,
            ODBCError::InvalidDescriptorField(_, _) => UNSUPPORTED_FIELD_DESCRIPTOR,
            ODBCError::InconsistentDescriptor(_) => INCONSISTENT_DESCRIPTOR,
            ODBCError::RestrictedDataType(_, _) => RESTRICTED_DATA_TYPE,
            ODBCError::OutStringTruncated(_) => RIGHT_TRUNCATED,
            ODBCError::InvalidStringOrBufferLength(_) => INVALID_STRING_OR_BUFFER_LENGTH,
            ODBCError::InvalidCursorState => INVALID_CURSOR_STATE,
            ODBCError::CursorNotScrollable => CURSOR_NOT_SCROLLABLE,
            ODBCError::FunctionSequenceError(_) => FUNCTION_SEQUENCE_ERROR,
            ODBCError::NoCursorOpen => NO_CURSOR_OPEN,
            ODBCError::ConnectionAlreadyEstablished => CONNECTION_ESTABLISHED_INFO,
            ODBCError::IntegralTruncation(_) => INTEGRAL_TRUNCATION,
            ODBCError::FractionalTruncation(_) => FRACTIONAL_TRUNCATION,
            ODBCError::InvalidCharacterValue(_) => INVALID_CHARACTER_VALUE,
            ODBCError::InvalidDatetimeFormat(_) => INVALID_DATETIME_FORMAT,
            ODBCError::IndicatorVariableRequired => constants::INDICATOR_VARIABLE_REQUIRED,
            ODBCError::UnknownInfoType(_) | ODBCError::SessionInitRan(_) => GENERAL_WARNING,
            ODBCError::Core(e) => return e.get_sql_state().to_string(),
        }
        .to_string()
    }

    pub fn get_error_message(&self) -> String {
        match self {
            ODBCError::Unimplemented(fn_name) => format!(
                "[{VENDOR_IDENTIFIER}][API] The feature {fn_name} is not implemented"
            ),
            ODBCError::DriverManagerFunction(fn_name) => format!(
                "[{VENDOR_IDENTIFIER}][API] {fn_name} is implemented by the driver manager"
            ),
            ODBCError::InvalidHandleType(reason) => {
                format!("[{VENDOR_IDENTIFIER}][API] Invalid handle: {reason}")
            }
            ODBCError::InvalidAttrValue(attr) => {
                format!("[{VENDOR_IDENTIFIER}][API] Invalid value for attribute {attr}")
            }
            ODBCError::InvalidAttrIdentifier(attr) => {
                format!("[{VENDOR_IDENTIFIER}][API] Attribute {attr} not supported")
            }
            ODBCError::ReadOnlyAttr(attr) => {
                format!("[{VENDOR_IDENTIFIER}][API] Attribute {attr} is read only")
            }
            ODBCError::OptionValueChanged(attr, value) => format!(
                "[{VENDOR_IDENTIFIER}][API] Invalid value for attribute {attr}, changed to {value}"
            ),
            ODBCError::InvalidDescriptorIndex(index) => {
                format!("[{VENDOR_IDENTIFIER}][API] Invalid descriptor index: {index}")
            }
            ODBCError::InvalidDescriptorField(field, read_only) => format!(
                "[{VENDOR_IDENTIFIER}][API] Invalid descriptor field identifier: {field}{}",
                if *read_only { " (read-only field)" } else { "" }
            ),
            ODBCError::InconsistentDescriptor(sql_type) => format!(
                "[{VENDOR_IDENTIFIER}][API] Inconsistent descriptor information; type {sql_type} is not supported"
            ),
            ODBCError::RestrictedDataType(from, to) => format!(
                "[{VENDOR_IDENTIFIER}][API] Conversion from {from} to {to} is not supported"
            ),
            ODBCError::OutStringTruncated(buffer_len) => format!(
                "[{VENDOR_IDENTIFIER}][API] String or binary data right truncated; buffer length was {buffer_len}"
            ),
            ODBCError::InvalidStringOrBufferLength(len) => {
                format!("[{VENDOR_IDENTIFIER}][API] Invalid string or buffer length {len}")
            }
            ODBCError::InvalidCursorState => {
                format!("[{VENDOR_IDENTIFIER}][API] Invalid cursor state")
            }
            ODBCError::CursorNotScrollable => format!(
                "[{VENDOR_IDENTIFIER}][API] The cursor is forward-only; only SQL_FETCH_NEXT is supported"
            ),
            ODBCError::FunctionSequenceError(fn_name) => {
                format!("[{VENDOR_IDENTIFIER}][API] Function sequence error calling {fn_name}")
            }
            ODBCError::NoCursorOpen => format!("[{VENDOR_IDENTIFIER}][API] No cursor is open"),
            ODBCError::ConnectionAlreadyEstablished => {
                format!("[{VENDOR_IDENTIFIER}][API] Connection already established")
            }
            ODBCError::IntegralTruncation(value) => format!(
                "[{VENDOR_IDENTIFIER}][API] Integral truncation converting value {value}"
            ),
            ODBCError::FractionalTruncation(value) => format!(
                "[{VENDOR_IDENTIFIER}][API] Fractional truncation converting value {value}"
            ),
            ODBCError::InvalidCharacterValue(value) => format!(
                "[{VENDOR_IDENTIFIER}][API] Invalid character value for cast: {value}"
            ),
            ODBCError::InvalidDatetimeFormat(value) => {
                format!("[{VENDOR_IDENTIFIER}][API] Invalid datetime format: {value}")
            }
            ODBCError::IndicatorVariableRequired => format!(
                "[{VENDOR_IDENTIFIER}][API] Indicator variable required but not supplied"
            ),
            ODBCError::UnknownInfoType(info_type) => format!(
                "[{VENDOR_IDENTIFIER}][API] Unknown information type {info_type}; returning empty value"
            ),
            ODBCError::SessionInitRan(file_text) => {
                format!("[{VENDOR_IDENTIFIER}][API] Session init SQL:\n{file_text}")
            }
            ODBCError::General(message) => format!("[{VENDOR_IDENTIFIER}][API] {message}"),
            ODBCError::Core(e) => format!("[{VENDOR_IDENTIFIER}][Core] {e}"),
        }
    }

    pub fn get_native_err_code(&self) -> i32 {
        match self {
            // only the engine carries native error codes
            ODBCError::Core(e) => e.code(),
            _ => 0,
        }
    }
}
