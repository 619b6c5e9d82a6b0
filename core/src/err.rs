use constants::{
    DRIVER_UNABLE_TO_ESTABLISH, GENERAL_ERROR, INVALID_CONNECTION_STRING_ATTR,
    SYNTAX_ERROR_OR_ACCESS_VIOLATION,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Raised by the engine; the SQLSTATE travels with the message so the
    /// odbc layer can surface it unchanged.
    #[error("{message}")]
    Engine { sqlstate: String, message: String },
    #[error("Invalid connection string")]
    InvalidConnectionString,
    #[error("Invalid keyword: '{keyword}'. {suggestion}")]
    UnknownConnectionOption { keyword: String, suggestion: String },
    #[error("Options '{0}' and '{1}' can only be specified in DSN configuration in a file or registry.", session_init::SQL_FILE_OPTION, session_init::SQL_FILE_SHA256_OPTION)]
    DsnOnlyOption,
    #[error("Specified session init SQL file not found, path: {0}")]
    SessionInitFileNotFound(String),
    #[error("Specified session init SQL file size: {0} exceeds max allowed size: {1}")]
    SessionInitFileTooLarge(u64, u64),
    #[error("Session init SQL file SHA-256 mismatch, expected: {0}, actual: {1}")]
    SessionInitShaMismatch(String, String),
    #[error("Connection init marker can only be specified once")]
    SessionInitMarkerRepeated,
    #[error("Connection init error:\n{0}\n{1}")]
    SessionInitExecution(String, String),
    #[error("error reading session init SQL file: {0}")]
    SessionInitIo(#[from] std::io::Error),
}

use crate::session_init;

impl Error {
    pub fn get_sql_state(&self) -> &str {
        match self {
            Error::Engine { sqlstate, .. } => sqlstate,
            Error::InvalidConnectionString => GENERAL_ERROR,
            Error::UnknownConnectionOption { .. } | Error::DsnOnlyOption => {
                INVALID_CONNECTION_STRING_ATTR
            }
            Error::SessionInitFileNotFound(_)
            | Error::SessionInitFileTooLarge(_, _)
            | Error::SessionInitShaMismatch(_, _)
            | Error::SessionInitMarkerRepeated
            | Error::SessionInitIo(_) => DRIVER_UNABLE_TO_ESTABLISH,
            Error::SessionInitExecution(_, _) => SYNTAX_ERROR_OR_ACCESS_VIOLATION,
        }
    }

    pub fn code(&self) -> i32 {
        // the embedded engine does not expose numeric error codes
        0
    }

    /// Engine error with the default syntax/access SQLSTATE class.
    pub fn engine(message: impl Into<String>) -> Error {
        Error::Engine {
            sqlstate: SYNTAX_ERROR_OR_ACCESS_VIOLATION.to_string(),
            message: message.into(),
        }
    }
}
