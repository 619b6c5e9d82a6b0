//! Connection-string parsing: `key=value` pairs separated by `;`, keys
//! case-insensitive, values opaque. Unknown keys are reported with a
//! candidate suggestion so a typo in `allowed_paths` does not silently
//! drop the option.

use crate::err::{Error, Result};
use crate::session_init::{SQL_FILE_OPTION, SQL_FILE_SHA256_OPTION};
use itertools::Itertools;
use std::collections::BTreeMap;

const ROW_DEL: char = ';';
const KEY_VAL_DEL: char = '=';

/// Keys any client may send that the driver drops without comment.
pub const IGNORE_KEYS: [&str; 4] = ["driver", "trusted_connection", "uid", "pwd"];

/// Keys the driver itself consumes rather than forwarding to the engine.
pub const ODBC_LOCAL_KEYS: [&str; 2] = ["database", "dsn"];

#[derive(Debug, Default)]
pub struct ParsedConnectionString {
    /// Known options in input order, keyed by normalized name.
    pub options: BTreeMap<String, String>,
    /// `01S09`-class warnings for unrecognized keys.
    pub warnings: Vec<Error>,
}

impl ParsedConnectionString {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn dsn(&self) -> Option<&str> {
        self.get("dsn")
    }
}

fn is_known_key(key: &str, option_names: &[String]) -> bool {
    ODBC_LOCAL_KEYS.contains(&key)
        || key == SQL_FILE_OPTION
        || key == SQL_FILE_SHA256_OPTION
        || option_names.iter().any(|n| n == key)
}

/// Parse a full connection string against the engine's option registry.
pub fn parse(input: &str, option_names: &[String]) -> Result<ParsedConnectionString> {
    let mut parsed = ParsedConnectionString::default();
    for entry in input.split(ROW_DEL) {
        if entry.trim().is_empty() {
            continue;
        }
        let (key, value) = entry
            .split_once(KEY_VAL_DEL)
            .ok_or(Error::InvalidConnectionString)?;
        let key = key.trim().to_lowercase();
        let value = value.trim().to_string();
        if IGNORE_KEYS.contains(&key.as_str()) {
            continue;
        }
        if key == SQL_FILE_OPTION || key == SQL_FILE_SHA256_OPTION {
            // honored only when they come from the DSN source
            return Err(Error::DsnOnlyOption);
        }
        if !is_known_key(&key, option_names) {
            parsed.warnings.push(Error::UnknownConnectionOption {
                suggestion: candidates_message(&key, option_names),
                keyword: key,
            });
            continue;
        }
        parsed.options.insert(key, value);
    }
    Ok(parsed)
}

/// Fill options the connection string did not provide from the DSN source
/// (odbc.ini or registry). The session-init options are only ever read
/// from here.
pub fn complete_from_dsn(
    parsed: &mut ParsedConnectionString,
    dsn: &shared_sql_utils::DsnSource,
    option_names: &[String],
) {
    let mut keys: Vec<String> = option_names.to_vec();
    keys.extend(ODBC_LOCAL_KEYS.iter().map(|s| s.to_string()));
    keys.push(SQL_FILE_OPTION.to_string());
    keys.push(SQL_FILE_SHA256_OPTION.to_string());
    for key in keys {
        if parsed.options.contains_key(&key) {
            continue;
        }
        if let Some(value) = dsn.get(&key) {
            parsed.options.insert(key, value);
        }
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// "Did you mean" message listing the closest option names.
pub fn candidates_message(input: &str, option_names: &[String]) -> String {
    let threshold = input.len().max(3);
    let candidates: Vec<&str> = option_names
        .iter()
        .map(|name| (levenshtein(input, name), name))
        .sorted()
        .take(3)
        .filter(|(score, _)| *score <= threshold)
        .map(|(_, name)| name.as_str())
        .collect();
    if candidates.is_empty() {
        String::new()
    } else {
        format!("Did you mean: {}", candidates.join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn names() -> Vec<String> {
        ["access_mode", "allowed_paths", "threads", "max_memory"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn splits_and_normalizes() {
        let parsed =
            parse("Database = /tmp/a.db ; DSN=quack; ACCESS_MODE=read_only", &names()).unwrap();
        assert_eq!(Some("/tmp/a.db"), parsed.get("database"));
        assert_eq!(Some("quack"), parsed.dsn());
        assert_eq!(Some("read_only"), parsed.get("access_mode"));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn drops_ignored_keys() {
        let parsed = parse("Driver=DuckDB;UID=me;PWD=secret;database=:memory:", &names()).unwrap();
        assert_eq!(1, parsed.options.len());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn missing_equals_is_an_error() {
        assert!(matches!(
            parse("database", &names()),
            Err(Error::InvalidConnectionString)
        ));
    }

    #[test]
    fn unknown_key_warns_with_suggestion() {
        let parsed = parse("database=:memory:;acces_mode=read_only", &names()).unwrap();
        assert_eq!(1, parsed.warnings.len());
        match &parsed.warnings[0] {
            Error::UnknownConnectionOption { keyword, suggestion } => {
                assert_eq!("acces_mode", keyword);
                assert!(suggestion.contains("access_mode"), "{suggestion}");
            }
            other => panic!("unexpected warning {other:?}"),
        }
        // the bogus key is not forwarded
        assert!(parsed.get("acces_mode").is_none());
    }

    #[test]
    fn session_init_options_rejected_in_connection_string() {
        assert!(matches!(
            parse("session_init_sql_file=/tmp/init.sql", &names()),
            Err(Error::DsnOnlyOption)
        ));
    }
}
