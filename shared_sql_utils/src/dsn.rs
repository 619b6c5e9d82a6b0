use crate::odbcinst::private_profile_string;
use thiserror::Error;

const ODBCINI: &str = "ODBC.INI";

#[derive(Error, Debug)]
pub enum DsnError {
    #[error("Invalid DSN: {0}\nDSN may not be longer than 32 characters, and may not contain any of the following characters: [ ] {{ }} ( ) , ; ? * = ! @ \\")]
    Dsn(String),
    #[error("{0}")]
    Generic(String),
}

const INVALID_DSN_CHARS: &[char] = &[
    '[', ']', '{', '}', '(', ')', ',', ';', '?', '*', '=', '!', '@', '\\',
];

pub fn validate_dsn(dsn: &str) -> Result<(), DsnError> {
    if dsn.len() > 32 || dsn.chars().any(|c| INVALID_DSN_CHARS.contains(&c)) {
        return Err(DsnError::Dsn(dsn.to_string()));
    }
    Ok(())
}

/// Key/value source for a named DSN backed by the platform odbc.ini (or
/// registry, through the driver-manager helper).
#[derive(Debug, Default)]
pub struct DsnSource {
    pub dsn: String,
}

impl DsnSource {
    pub fn new(dsn: &str) -> Result<Self, DsnError> {
        validate_dsn(dsn)?;
        Ok(DsnSource {
            dsn: dsn.to_string(),
        })
    }

    /// Look up a single key in this DSN's section. Keys the connection
    /// string already supplied are not re-read; the caller drives that.
    pub fn get(&self, key: &str) -> Option<String> {
        if self.dsn.is_empty() {
            return None;
        }
        private_profile_string(&self.dsn, key, ODBCINI)
    }
}

#[cfg(test)]
mod test {
    use super::validate_dsn;

    #[test]
    fn accepts_plain_names() {
        assert!(validate_dsn("DuckDB").is_ok());
        assert!(validate_dsn("my_local_duck").is_ok());
    }

    #[test]
    fn rejects_invalid_characters_and_length() {
        assert!(validate_dsn("bad;dsn").is_err());
        assert!(validate_dsn("with[bracket").is_err());
        assert!(validate_dsn(&"x".repeat(33)).is_err());
    }
}
