//! Data-at-exec protocol: SQLParamData / SQLPutData.

use crate::api::parameters::{param_data_step, put_data_chunk};
use crate::must_be_valid;
use definitions::{HStmt, Len, Pointer, SqlReturn};

#[no_mangle]
pub extern "C" fn SQLParamData(statement_handle: HStmt, value_ptr_ptr: *mut Pointer) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = crate::handles::definitions::OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    unsafe { param_data_step(handle, stmt, value_ptr_ptr, "SQLParamData") }
}

#[no_mangle]
pub extern "C" fn SQLPutData(
    statement_handle: HStmt,
    data_ptr: Pointer,
    str_len_or_ind_ptr: Len,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = crate::handles::definitions::OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    unsafe { put_data_chunk(handle, stmt, data_ptr, str_len_or_ind_ptr, "SQLPutData") }
}
