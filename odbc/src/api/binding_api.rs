//! SQLBindCol / SQLBindParameter.

use crate::api::parameters;
use crate::errors::ODBCError;
use crate::handles::definitions::{BoundColInfo, OdbcHandleRef};
use crate::must_be_valid;
use definitions::{HStmt, Len, Pointer, SmallInt, SqlReturn, ULen, USmallInt};

#[no_mangle]
pub extern "C" fn SQLBindCol(
    statement_handle: HStmt,
    col_number: USmallInt,
    target_type: SmallInt,
    target_value: Pointer,
    buffer_length: Len,
    length_or_indicator: *mut Len,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    if col_number < 1 {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorIndex(i32::from(col_number)),
            "SQLBindCol",
        );
        return SqlReturn::ERROR;
    }
    if buffer_length < 0 {
        handle.add_diag_info(
            ODBCError::InvalidStringOrBufferLength(buffer_length),
            "SQLBindCol",
        );
        return SqlReturn::ERROR;
    }

    let ard = stmt.ard();
    let mut info = ard.info.write().unwrap();
    if target_value.is_null() {
        // unbind the column
        if let Some(record) = info.records.get_mut((col_number - 1) as usize) {
            record.data_ptr = std::ptr::null_mut();
            record.indicator_ptr = std::ptr::null_mut();
            record.octet_length_ptr = std::ptr::null_mut();
        }
        stmt.bound_cols.write().unwrap().remove(&col_number);
        return SqlReturn::SUCCESS;
    }

    let record = info.record_mut((col_number - 1) as usize);
    record.concise_type = target_type;
    record.data_ptr = target_value;
    record.octet_length = buffer_length;
    record.length = buffer_length.max(0) as ULen;
    record.indicator_ptr = length_or_indicator;
    record.octet_length_ptr = length_or_indicator;

    stmt.bound_cols.write().unwrap().insert(
        col_number,
        BoundColInfo {
            target_type,
            target_buffer: target_value,
            buffer_length,
            length_or_indicator,
        },
    );
    SqlReturn::SUCCESS
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLBindParameter(
    statement_handle: HStmt,
    parameter_number: USmallInt,
    input_output_type: SmallInt,
    value_type: SmallInt,
    parameter_type: SmallInt,
    column_size: ULen,
    decimal_digits: SmallInt,
    parameter_value_ptr: Pointer,
    buffer_length: Len,
    str_len_or_ind_ptr: *mut Len,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    match unsafe {
        parameters::bind_parameter(
            stmt,
            parameter_number,
            input_output_type,
            value_type,
            parameter_type,
            column_size,
            decimal_digits,
            parameter_value_ptr,
            buffer_length,
            str_len_or_ind_ptr,
        )
    } {
        Ok(()) => SqlReturn::SUCCESS,
        Err(e) => {
            handle.add_diag_info(e, "SQLBindParameter");
            SqlReturn::ERROR
        }
    }
}
