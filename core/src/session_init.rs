//! Optional session-init SQL file: the part above the marker runs once
//! when the database is created, the part below runs on every connection.

use crate::err::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

pub const SQL_FILE_OPTION: &str = "session_init_sql_file";
pub const SQL_FILE_SHA256_OPTION: &str = "session_init_sql_file_sha256";

pub const SQL_FILE_MAX_SIZE_BYTES: u64 = 1 << 20; // 1MB

static CONN_INIT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*\s*DUCKDB_CONNECTION_INIT_BELOW_MARKER\s*\*/").unwrap());

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionInitSqlFile {
    pub db_init_sql: String,
    pub conn_init_sql: String,
    pub orig_file_text: String,
}

impl SessionInitSqlFile {
    pub fn is_empty(&self) -> bool {
        self.db_init_sql.is_empty() && self.conn_init_sql.is_empty() && self.orig_file_text.is_empty()
    }
}

/// Split file text on the connection-init marker. Public for tests; the
/// connect path goes through [`read_sql_file`].
pub fn split_by_marker(text: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = CONN_INIT_MARKER.split(text).collect();
    if parts.len() > 2 {
        return Err(Error::SessionInitMarkerRepeated);
    }
    let db_init = parts.first().copied().unwrap_or("").trim().to_string();
    let conn_init = parts.get(1).copied().unwrap_or("").trim().to_string();
    Ok((db_init, conn_init))
}

/// Read and validate the session-init file named in the DSN. The SHA-256
/// check is case-insensitive on the expected hex digest.
pub fn read_sql_file(path: &str, expected_sha256: &str) -> Result<SessionInitSqlFile> {
    if path.is_empty() {
        return Ok(SessionInitSqlFile::default());
    }
    let metadata = std::fs::metadata(path)
        .map_err(|_| Error::SessionInitFileNotFound(path.to_string()))?;
    if metadata.len() > SQL_FILE_MAX_SIZE_BYTES {
        return Err(Error::SessionInitFileTooLarge(
            metadata.len(),
            SQL_FILE_MAX_SIZE_BYTES,
        ));
    }
    let orig_file_text = std::fs::read_to_string(path)?;

    if !expected_sha256.is_empty() {
        let mut hasher = Sha256::new();
        hasher.update(orig_file_text.as_bytes());
        let actual = format!("{:x}", hasher.finalize());
        let expected = expected_sha256.to_lowercase();
        if actual != expected {
            return Err(Error::SessionInitShaMismatch(expected, actual));
        }
    }

    let (db_init_sql, conn_init_sql) = split_by_marker(&orig_file_text)?;
    Ok(SessionInitSqlFile {
        db_init_sql,
        conn_init_sql,
        orig_file_text,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn splits_on_marker() {
        let (db, conn) = split_by_marker(
            "CREATE TABLE tab1(col1 int); /* DUCKDB_CONNECTION_INIT_BELOW_MARKER */ INSERT INTO tab1 VALUES(42);",
        )
        .unwrap();
        assert_eq!("CREATE TABLE tab1(col1 int);", db);
        assert_eq!("INSERT INTO tab1 VALUES(42);", conn);
    }

    #[test]
    fn no_marker_means_db_init_only() {
        let (db, conn) = split_by_marker("SELECT 1;").unwrap();
        assert_eq!("SELECT 1;", db);
        assert_eq!("", conn);
    }

    #[test]
    fn repeated_marker_is_rejected() {
        let text = "a; /*DUCKDB_CONNECTION_INIT_BELOW_MARKER*/ b; /* DUCKDB_CONNECTION_INIT_BELOW_MARKER */ c;";
        assert!(matches!(
            split_by_marker(text),
            Err(Error::SessionInitMarkerRepeated)
        ));
    }

    #[test]
    fn verifies_sha256_case_insensitively() {
        let mut file = tempfile_with("SELECT 42;");
        // digest of "SELECT 42;"
        let sha = {
            let mut hasher = Sha256::new();
            hasher.update(b"SELECT 42;");
            format!("{:X}", hasher.finalize())
        };
        let read = read_sql_file(file.path().to_str().unwrap(), &sha).unwrap();
        assert_eq!("SELECT 42;", read.db_init_sql);
        file.flush().unwrap();
    }

    #[test]
    fn sha256_mismatch_fails() {
        let file = tempfile_with("SELECT 42;");
        let err = read_sql_file(file.path().to_str().unwrap(), &"0".repeat(64)).unwrap_err();
        assert!(matches!(err, Error::SessionInitShaMismatch(_, _)));
    }

    #[test]
    fn missing_file_fails() {
        assert!(matches!(
            read_sql_file("/nonexistent/init.sql", ""),
            Err(Error::SessionInitFileNotFound(_))
        ));
    }

    fn tempfile_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
