//! Helpers shared by the diagnostic entrypoints.

use crate::handles::definitions::DiagRecord;
use cstr::WideChar;
use definitions::{Char, SQLSTATE_SIZE};
use std::ptr::copy_nonoverlapping;

///
/// set_sql_state writes the 5-character SQLSTATE plus terminator.
///
/// # Safety
/// Writes through a raw C pointer sized for six narrow characters.
///
pub unsafe fn set_sql_state(sql_state: &str, output_ptr: *mut Char) {
    if output_ptr.is_null() {
        return;
    }
    let mut state = [0u8; SQLSTATE_SIZE + 1];
    state[..sql_state.len().min(SQLSTATE_SIZE)]
        .copy_from_slice(&sql_state.as_bytes()[..sql_state.len().min(SQLSTATE_SIZE)]);
    copy_nonoverlapping(state.as_ptr(), output_ptr, SQLSTATE_SIZE + 1);
}

///
/// set_sql_state_w writes the 5-character SQLSTATE plus terminator as
/// UTF-16.
///
/// # Safety
/// Writes through a raw C pointer sized for six wide characters.
///
pub unsafe fn set_sql_state_w(sql_state: &str, output_ptr: *mut WideChar) {
    if output_ptr.is_null() {
        return;
    }
    let mut state = [0u16; SQLSTATE_SIZE + 1];
    for (i, b) in sql_state.bytes().take(SQLSTATE_SIZE).enumerate() {
        state[i] = u16::from(b);
    }
    copy_nonoverlapping(state.as_ptr(), output_ptr, SQLSTATE_SIZE + 1);
}

/// The class origin of this record's SQLSTATE per ISO SQL/CLI vs ODBC.
pub fn class_origin(record: &DiagRecord) -> &'static str {
    constants::sqlstate_class_origin(&record.error.get_sql_state())
}

/// Subclass origin follows the same derivation as the class origin.
pub fn subclass_origin(record: &DiagRecord) -> &'static str {
    class_origin(record)
}
