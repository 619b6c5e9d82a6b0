use crate::errors::ODBCError;
use crate::handles::definitions::OdbcHandleRef;
use definitions::SqlReturn;

/// Shared unsupported-function path: record HYC00 and fail.
pub(crate) fn unsupported_function(
    handle: OdbcHandleRef,
    fn_name: &'static str,
) -> SqlReturn {
    handle.clear_diagnostics();
    handle.add_diag_info(ODBCError::Unimplemented(fn_name), fn_name);
    SqlReturn::ERROR
}

/// Write through an out pointer only when the caller supplied one.
///
/// # Safety
/// `ptr` must be valid for writes when non-null.
pub(crate) unsafe fn ptr_safe_write<T>(ptr: *mut T, value: T) {
    if !ptr.is_null() {
        *ptr = value;
    }
}

/// Aggregate per-cell and per-row outcomes into the statement-level return.
pub(crate) fn aggregate_returns(acc: SqlReturn, next: SqlReturn) -> SqlReturn {
    match (acc, next) {
        (SqlReturn::ERROR, _) | (_, SqlReturn::ERROR) => SqlReturn::ERROR,
        (SqlReturn::SUCCESS_WITH_INFO, _) | (_, SqlReturn::SUCCESS_WITH_INFO) => {
            SqlReturn::SUCCESS_WITH_INFO
        }
        _ => SqlReturn::SUCCESS,
    }
}
