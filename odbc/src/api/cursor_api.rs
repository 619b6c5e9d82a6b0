//! Fetch, scroll, GetData, and cursor bookkeeping.

use crate::api::fetch::{fetch_rowset, get_data};
use crate::api::handle_api::close_cursor;
use crate::api::util::unsupported_function;
use crate::errors::ODBCError;
use crate::handles::definitions::OdbcHandleRef;
use crate::must_be_valid;
use cstr::WideChar;
use definitions::{
    CDataType, Char, FetchOrientation, HStmt, Len, Pointer, SetPosOperation, SmallInt, SqlReturn,
    ULen, USmallInt,
};
use num_traits::FromPrimitive;

#[no_mangle]
pub extern "C" fn SQLFetch(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    unsafe { fetch_rowset(handle, stmt, FetchOrientation::SQL_FETCH_NEXT, 0, "SQLFetch") }
}

#[no_mangle]
pub extern "C" fn SQLFetchScroll(
    statement_handle: HStmt,
    fetch_orientation: USmallInt,
    fetch_offset: Len,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    let Some(orientation) = FetchOrientation::from_u16(fetch_orientation) else {
        handle.add_diag_info(
            ODBCError::InvalidAttrValue(format!("fetch orientation {fetch_orientation}")),
            "SQLFetchScroll",
        );
        return SqlReturn::ERROR;
    };
    unsafe { fetch_rowset(handle, stmt, orientation, fetch_offset, "SQLFetchScroll") }
}

#[no_mangle]
pub extern "C" fn SQLGetData(
    statement_handle: HStmt,
    col_or_param_num: USmallInt,
    target_type: SmallInt,
    target_value_ptr: Pointer,
    buffer_length: Len,
    str_len_or_ind_ptr: *mut Len,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    let Some(target_type) = CDataType::from_i16(target_type) else {
        handle.add_diag_info(
            ODBCError::RestrictedDataType("column", format!("C type {target_type}")),
            "SQLGetData",
        );
        return SqlReturn::ERROR;
    };
    unsafe {
        get_data(
            handle,
            stmt,
            col_or_param_num,
            target_type,
            target_value_ptr,
            buffer_length,
            str_len_or_ind_ptr,
            "SQLGetData",
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLCloseCursor(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    if stmt.cursor.read().unwrap().is_none() {
        handle.add_diag_info(ODBCError::InvalidCursorState, "SQLCloseCursor");
        return SqlReturn::ERROR;
    }
    close_cursor(stmt);
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLMoreResults(statement_handle: HStmt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    // statements produce a single result set
    if stmt.cursor.read().unwrap().is_some() {
        close_cursor(stmt);
    }
    SqlReturn::NO_DATA
}

#[no_mangle]
pub extern "C" fn SQLSetPos(
    statement_handle: HStmt,
    _row_number: ULen,
    operation: USmallInt,
    _lock_type: USmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    match SetPosOperation::from_u16(operation) {
        // positioning within the rowset is a no-op for a rowset of one
        Some(SetPosOperation::SQL_POSITION) => SqlReturn::SUCCESS,
        _ => unsupported_function(handle, "SQLSetPos"),
    }
}

#[no_mangle]
pub extern "C" fn SQLGetCursorName(
    statement_handle: HStmt,
    _cursor_name: *mut Char,
    _buffer_length: SmallInt,
    _name_length_ptr: *mut SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    handle.add_diag_info(
        ODBCError::DriverManagerFunction("SQLGetCursorName"),
        "SQLGetCursorName",
    );
    SqlReturn::ERROR
}

#[no_mangle]
pub extern "C" fn SQLGetCursorNameW(
    statement_handle: HStmt,
    _cursor_name: *mut WideChar,
    _buffer_length: SmallInt,
    _name_length_ptr: *mut SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    handle.add_diag_info(
        ODBCError::DriverManagerFunction("SQLGetCursorNameW"),
        "SQLGetCursorNameW",
    );
    SqlReturn::ERROR
}

#[no_mangle]
pub extern "C" fn SQLSetCursorName(
    statement_handle: HStmt,
    _cursor_name: *const Char,
    _name_length: SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    handle.add_diag_info(
        ODBCError::DriverManagerFunction("SQLSetCursorName"),
        "SQLSetCursorName",
    );
    SqlReturn::ERROR
}

#[no_mangle]
pub extern "C" fn SQLSetCursorNameW(
    statement_handle: HStmt,
    _cursor_name: *const WideChar,
    _name_length: SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    handle.add_diag_info(
        ODBCError::DriverManagerFunction("SQLSetCursorNameW"),
        "SQLSetCursorNameW",
    );
    SqlReturn::ERROR
}
