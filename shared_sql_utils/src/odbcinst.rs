use thiserror::Error;

pub(crate) const MAX_VALUE_LENGTH: usize = 1024;
pub const ODBCINSTINI: &str = "ODBCINST.INI";

// The setting used to set the driver log level
pub const LOGLEVEL: &str = "loglevel";
// The setting used to set the driver shared-library path
pub const DRIVER: &str = "driver";

#[derive(Error, Debug, Clone)]
pub enum SettingError {
    #[error("Setting value exceeds the maximum length of {MAX_VALUE_LENGTH} characters.")]
    Value,
    #[error("Section {0} not found in {1}")]
    NotFound(String, String),
    #[error("{0}")]
    Generic(String),
}

#[cfg(feature = "odbcinst")]
mod ffi {
    use cstr::{Char, WideChar};

    #[cfg_attr(target_os = "linux", link(name = "odbcinst", kind = "dylib"))]
    #[cfg_attr(target_os = "macos", link(name = "iodbcinst", kind = "dylib"))]
    #[cfg_attr(target_os = "windows", link(name = "odbccp32", kind = "raw-dylib"))]
    extern "C" {
        pub fn SQLGetPrivateProfileString(
            section: *const Char,
            entry: *const Char,
            default: *const Char,
            buffer: *mut Char,
            buffer_size: i32,
            filename: *const Char,
        ) -> i32;
        #[allow(dead_code)]
        pub fn SQLGetPrivateProfileStringW(
            section: *const WideChar,
            entry: *const WideChar,
            default: *const WideChar,
            buffer: *mut WideChar,
            buffer_size: i32,
            filename: *const WideChar,
        ) -> i32;
    }
}

/// Read a single `key` under `[section]` of the named ini file through the
/// driver manager's profile-string API.
#[cfg(feature = "odbcinst")]
pub fn private_profile_string(section: &str, key: &str, filename: &str) -> Option<String> {
    use cstr::{input_text_to_string_a, to_char_ptr};
    let mut buf = [0u8; MAX_VALUE_LENGTH];
    let len = unsafe {
        ffi::SQLGetPrivateProfileString(
            to_char_ptr(section).0,
            to_char_ptr(key).0,
            to_char_ptr("").0,
            buf.as_mut_ptr(),
            buf.len() as i32,
            to_char_ptr(filename).0,
        )
    };
    if len < 1 {
        return None;
    }
    Some(unsafe { input_text_to_string_a(buf.as_ptr(), len as isize) })
}

/// Fallback profile lookup scanning the conventional ini locations
/// (`$ODBCINI`/`$ODBCSYSINI`, `~/.odbc.ini`, `/etc/odbc.ini` and their
/// odbcinst counterparts) without linking the installer library.
#[cfg(not(feature = "odbcinst"))]
pub fn private_profile_string(section: &str, key: &str, filename: &str) -> Option<String> {
    for path in candidate_ini_paths(filename) {
        if let Ok(contents) = std::fs::read_to_string(&path) {
            if let Some(value) = scan_ini(&contents, section, key) {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(not(feature = "odbcinst"))]
fn candidate_ini_paths(filename: &str) -> Vec<std::path::PathBuf> {
    use std::path::PathBuf;
    let lower = filename.to_lowercase();
    let mut paths = Vec::new();
    if lower == "odbc.ini" {
        if let Ok(explicit) = std::env::var("ODBCINI") {
            paths.push(PathBuf::from(explicit));
        }
        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".odbc.ini"));
        }
    }
    if let Ok(sysdir) = std::env::var("ODBCSYSINI") {
        paths.push(PathBuf::from(sysdir).join(&lower));
    }
    paths.push(PathBuf::from("/etc").join(lower));
    paths
}

#[cfg(not(feature = "odbcinst"))]
fn scan_ini(contents: &str, section: &str, key: &str) -> Option<String> {
    let mut in_section = false;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = header.trim().eq_ignore_ascii_case(section);
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            if k.trim().eq_ignore_ascii_case(key) {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

/// Installer settings for this driver read from odbcinst.ini.
#[derive(Debug, Default)]
pub struct DriverSettings {
    pub driver: String,
    pub log_level: String,
}

impl DriverSettings {
    pub fn from_private_profile_string() -> Result<Self, SettingError> {
        let driver = private_profile_string(constants::DRIVER_NAME, DRIVER, ODBCINSTINI);
        let log_level = private_profile_string(constants::DRIVER_NAME, LOGLEVEL, ODBCINSTINI);
        if driver.is_none() && log_level.is_none() {
            return Err(SettingError::NotFound(
                constants::DRIVER_NAME.to_string(),
                ODBCINSTINI.to_string(),
            ));
        }
        Ok(DriverSettings {
            driver: driver.unwrap_or_default(),
            log_level: log_level.unwrap_or_default(),
        })
    }
}

#[cfg(all(test, not(feature = "odbcinst")))]
mod test {
    use super::scan_ini;

    const INI: &str = "\n[DuckDB]\ndatabase = /tmp/quack.db\n; comment\naccess_mode=read_only\n\n[Other]\ndatabase=elsewhere\n";

    #[test]
    fn scans_section_case_insensitively() {
        assert_eq!(
            Some("/tmp/quack.db".to_string()),
            scan_ini(INI, "duckdb", "DATABASE")
        );
    }

    #[test]
    fn ignores_other_sections() {
        assert_eq!(None, scan_ini(INI, "DuckDB", "missing"));
        assert_eq!(
            Some("elsewhere".to_string()),
            scan_ini(INI, "Other", "database")
        );
    }

    #[test]
    fn trims_whitespace_around_values() {
        assert_eq!(
            Some("read_only".to_string()),
            scan_ini(INI, "DuckDB", "access_mode")
        );
    }
}
