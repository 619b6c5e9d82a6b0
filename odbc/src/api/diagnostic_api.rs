//! SQLGetDiagRec / SQLGetDiagField. These never clear the handle's
//! diagnostics; repeated calls return the same records.

use crate::api::data::{i16_len, isize_len};
use crate::api::diag::{class_origin, set_sql_state, set_sql_state_w, subclass_origin};
use crate::api::util::ptr_safe_write;
use crate::handles::definitions::{OdbcHandle, OdbcHandleRef};
use cstr::WideChar;
use definitions::{
    Char, DiagType, Handle, HandleType, Integer, Len, Pointer, SmallInt, SqlReturn,
    SQL_DIAG_UNKNOWN_STATEMENT, SQL_ROW_NUMBER_UNKNOWN,
};
use num_traits::FromPrimitive;

fn validate_handle(handle_type: HandleType, handle: &OdbcHandle) -> bool {
    match handle_type {
        HandleType::SQL_HANDLE_ENV => handle.as_env().is_some(),
        HandleType::SQL_HANDLE_DBC => handle.as_connection().is_some(),
        HandleType::SQL_HANDLE_STMT => handle.as_statement().is_some(),
        HandleType::SQL_HANDLE_DESC => handle.as_descriptor().is_some(),
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn get_diag_rec_internal(
    handle_type: HandleType,
    handle: Handle,
    rec_number: SmallInt,
    state: Pointer,
    native_error_ptr: *mut Integer,
    message_text: Pointer,
    buffer_length: SmallInt,
    text_length_ptr: *mut SmallInt,
    wide: bool,
) -> SqlReturn {
    if handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let odbc_handle = OdbcHandleRef::from(handle);
    if !validate_handle(handle_type, odbc_handle) {
        return SqlReturn::INVALID_HANDLE;
    }
    if rec_number < 1 || buffer_length < 0 {
        return SqlReturn::ERROR;
    }
    let errors = odbc_handle.errors().read().unwrap();
    let Some(record) = errors.get((rec_number - 1) as usize) else {
        return SqlReturn::NO_DATA;
    };
    ptr_safe_write(native_error_ptr, record.error.get_native_err_code());
    let message = record.message_text();
    if wide {
        set_sql_state_w(&record.error.get_sql_state(), state.cast::<WideChar>());
        i16_len::set_output_wstring(
            &message,
            message_text.cast::<WideChar>(),
            buffer_length as usize,
            text_length_ptr,
        )
    } else {
        set_sql_state(&record.error.get_sql_state(), state.cast::<Char>());
        i16_len::set_output_string(
            &message,
            message_text.cast::<Char>(),
            buffer_length as usize,
            text_length_ptr,
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLGetDiagRec(
    handle_type: HandleType,
    handle: Handle,
    rec_number: SmallInt,
    state: *mut Char,
    native_error_ptr: *mut Integer,
    message_text: *mut Char,
    buffer_length: SmallInt,
    text_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsafe {
        get_diag_rec_internal(
            handle_type,
            handle,
            rec_number,
            state.cast(),
            native_error_ptr,
            message_text.cast(),
            buffer_length,
            text_length_ptr,
            false,
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLGetDiagRecW(
    handle_type: HandleType,
    handle: Handle,
    rec_number: SmallInt,
    state: *mut WideChar,
    native_error_ptr: *mut Integer,
    message_text: *mut WideChar,
    buffer_length: SmallInt,
    text_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsafe {
        get_diag_rec_internal(
            handle_type,
            handle,
            rec_number,
            state.cast(),
            native_error_ptr,
            message_text.cast(),
            buffer_length,
            text_length_ptr,
            true,
        )
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn get_diag_field_internal(
    handle_type: HandleType,
    handle: Handle,
    rec_number: SmallInt,
    diag_identifier: SmallInt,
    diag_info_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    wide: bool,
) -> SqlReturn {
    if handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let odbc_handle = OdbcHandleRef::from(handle);
    if !validate_handle(handle_type, odbc_handle) {
        return SqlReturn::INVALID_HANDLE;
    }
    let Some(diag_type) = DiagType::from_i16(diag_identifier) else {
        return SqlReturn::ERROR;
    };

    // header fields ignore the record number
    match diag_type {
        DiagType::SQL_DIAG_NUMBER => {
            let count = odbc_handle.errors().read().unwrap().len();
            ptr_safe_write(diag_info_ptr.cast::<Integer>(), count as Integer);
            return SqlReturn::SUCCESS;
        }
        // the driver manager fills the return code
        DiagType::SQL_DIAG_RETURNCODE => return SqlReturn::SUCCESS,
        DiagType::SQL_DIAG_ROW_COUNT => {
            let count = odbc_handle
                .as_statement()
                .and_then(|s| *s.row_count.read().unwrap())
                .unwrap_or(0);
            ptr_safe_write(diag_info_ptr.cast::<Len>(), count as Len);
            return SqlReturn::SUCCESS;
        }
        DiagType::SQL_DIAG_CURSOR_ROW_COUNT => {
            ptr_safe_write(diag_info_ptr.cast::<Len>(), 0);
            return SqlReturn::SUCCESS;
        }
        DiagType::SQL_DIAG_DYNAMIC_FUNCTION => {
            return if wide {
                i16_len::set_output_wstring_as_bytes(
                    "",
                    diag_info_ptr,
                    buffer_length.max(0) as usize,
                    string_length_ptr,
                )
            } else {
                i16_len::set_output_string(
                    "",
                    diag_info_ptr.cast::<Char>(),
                    buffer_length.max(0) as usize,
                    string_length_ptr,
                )
            };
        }
        DiagType::SQL_DIAG_DYNAMIC_FUNCTION_CODE => {
            ptr_safe_write(diag_info_ptr.cast::<Integer>(), SQL_DIAG_UNKNOWN_STATEMENT);
            return SqlReturn::SUCCESS;
        }
        _ => {}
    }

    if rec_number < 1 || buffer_length < 0 {
        return SqlReturn::ERROR;
    }
    let errors = odbc_handle.errors().read().unwrap();
    let Some(record) = errors.get((rec_number - 1) as usize) else {
        return SqlReturn::NO_DATA;
    };

    let write_string = |text: &str| {
        if wide {
            i16_len::set_output_wstring_as_bytes(
                text,
                diag_info_ptr,
                buffer_length.max(0) as usize,
                string_length_ptr,
            )
        } else {
            i16_len::set_output_string(
                text,
                diag_info_ptr.cast::<Char>(),
                buffer_length.max(0) as usize,
                string_length_ptr,
            )
        }
    };

    match diag_type {
        DiagType::SQL_DIAG_SQLSTATE => write_string(&record.error.get_sql_state()),
        DiagType::SQL_DIAG_MESSAGE_TEXT => write_string(&record.message_text()),
        DiagType::SQL_DIAG_CLASS_ORIGIN => write_string(class_origin(record)),
        DiagType::SQL_DIAG_SUBCLASS_ORIGIN => write_string(subclass_origin(record)),
        DiagType::SQL_DIAG_SERVER_NAME => write_string(&record.server_name),
        DiagType::SQL_DIAG_CONNECTION_NAME => write_string(&record.server_name),
        DiagType::SQL_DIAG_NATIVE => {
            isize_len::set_output_fixed_data(
                &record.error.get_native_err_code(),
                diag_info_ptr,
                std::ptr::null_mut(),
            )
        }
        DiagType::SQL_DIAG_COLUMN_NUMBER => {
            ptr_safe_write(
                diag_info_ptr.cast::<Integer>(),
                record
                    .column_number
                    .unwrap_or(definitions::SQL_COLUMN_NUMBER_UNKNOWN as Integer),
            );
            SqlReturn::SUCCESS
        }
        DiagType::SQL_DIAG_ROW_NUMBER => {
            ptr_safe_write(
                diag_info_ptr.cast::<Len>(),
                record.row_number.unwrap_or(SQL_ROW_NUMBER_UNKNOWN),
            );
            SqlReturn::SUCCESS
        }
        _ => SqlReturn::ERROR,
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLGetDiagField(
    handle_type: HandleType,
    handle: Handle,
    rec_number: SmallInt,
    diag_identifier: SmallInt,
    diag_info_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsafe {
        get_diag_field_internal(
            handle_type,
            handle,
            rec_number,
            diag_identifier,
            diag_info_ptr,
            buffer_length,
            string_length_ptr,
            false,
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLGetDiagFieldW(
    handle_type: HandleType,
    handle: Handle,
    rec_number: SmallInt,
    diag_identifier: SmallInt,
    diag_info_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsafe {
        get_diag_field_internal(
            handle_type,
            handle,
            rec_number,
            diag_identifier,
            diag_info_ptr,
            buffer_length,
            string_length_ptr,
            true,
        )
    }
}
