//! Connect, driver-connect, and disconnect.

use crate::api::data::i16_len;
use crate::errors::ODBCError;
use crate::handles::definitions::{ConnectionState, OdbcHandleRef};
use crate::must_be_valid;
use cstr::{input_text_to_string_a, input_text_to_string_w, WideChar};
use definitions::{Char, HDbc, HWnd, SmallInt, SqlReturn, USmallInt};
use duckdb_odbc_core::EngineConnection;

fn sql_driver_connect_internal(
    handle: OdbcHandleRef,
    connection_string: &str,
    function_name: &'static str,
) -> SqlReturn {
    let conn = must_be_valid!(handle.as_connection());
    if conn.engine_connection.read().unwrap().is_some() {
        handle.add_diag_info(ODBCError::ConnectionAlreadyEstablished, function_name);
        return SqlReturn::ERROR;
    }
    let autocommit = conn.attributes.read().unwrap().autocommit;
    let outcome = match EngineConnection::connect(connection_string, autocommit) {
        Ok(outcome) => outcome,
        Err(e) => {
            handle.add_diag_info(ODBCError::Core(e), function_name);
            return SqlReturn::ERROR;
        }
    };

    let mut with_info = false;
    for warning in outcome.warnings {
        handle.add_diag_info(ODBCError::Core(warning), function_name);
        with_info = true;
    }
    if let Some(session_init) = outcome.session_init {
        // the file text travels in a diagnostic so hosts can trace what ran
        handle.add_diag_info(
            ODBCError::SessionInitRan(session_init.orig_file_text),
            function_name,
        );
        with_info = true;
    }

    conn.attributes.write().unwrap().dsn = outcome.connection.dsn.clone();
    *conn.interrupt.write().unwrap() = Some(outcome.connection.interrupt_handle());
    *conn.engine_connection.write().unwrap() = Some(outcome.connection);
    *conn.state.write().unwrap() = ConnectionState::Connected;
    log::info!("connection established");

    if with_info {
        SqlReturn::SUCCESS_WITH_INFO
    } else {
        SqlReturn::SUCCESS
    }
}

#[no_mangle]
pub extern "C" fn SQLConnect(
    connection_handle: HDbc,
    server_name: *const Char,
    name_length_1: SmallInt,
    _user_name: *const Char,
    _name_length_2: SmallInt,
    _authentication: *const Char,
    _name_length_3: SmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    let dsn = unsafe { input_text_to_string_a(server_name, isize::from(name_length_1)) };
    sql_driver_connect_internal(handle, &format!("DSN={dsn}"), "SQLConnect")
}

#[no_mangle]
pub extern "C" fn SQLConnectW(
    connection_handle: HDbc,
    server_name: *const WideChar,
    name_length_1: SmallInt,
    _user_name: *const WideChar,
    _name_length_2: SmallInt,
    _authentication: *const WideChar,
    _name_length_3: SmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    let dsn = unsafe { input_text_to_string_w(server_name, isize::from(name_length_1)) };
    sql_driver_connect_internal(handle, &format!("DSN={dsn}"), "SQLConnectW")
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLDriverConnect(
    connection_handle: HDbc,
    _window_handle: HWnd,
    in_connection_string: *const Char,
    string_length_1: SmallInt,
    out_connection_string: *mut Char,
    buffer_length: SmallInt,
    string_length_2: *mut SmallInt,
    _driver_completion: USmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    // prompting is never supported; NOPROMPT and COMPLETE behave the same
    let connection_string =
        unsafe { input_text_to_string_a(in_connection_string, isize::from(string_length_1)) };
    let ret = sql_driver_connect_internal(handle, &connection_string, "SQLDriverConnect");
    if ret.succeeded() {
        let out_ret = unsafe {
            i16_len::set_output_string(
                &connection_string,
                out_connection_string,
                buffer_length.max(0) as usize,
                string_length_2,
            )
        };
        if out_ret == SqlReturn::SUCCESS_WITH_INFO {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
    }
    ret
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLDriverConnectW(
    connection_handle: HDbc,
    _window_handle: HWnd,
    in_connection_string: *const WideChar,
    string_length_1: SmallInt,
    out_connection_string: *mut WideChar,
    buffer_length: SmallInt,
    string_length_2: *mut SmallInt,
    _driver_completion: USmallInt,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    let connection_string =
        unsafe { input_text_to_string_w(in_connection_string, isize::from(string_length_1)) };
    let ret = sql_driver_connect_internal(handle, &connection_string, "SQLDriverConnectW");
    if ret.succeeded() {
        let out_ret = unsafe {
            i16_len::set_output_wstring(
                &connection_string,
                out_connection_string,
                buffer_length.max(0) as usize,
                string_length_2,
            )
        };
        if out_ret == SqlReturn::SUCCESS_WITH_INFO {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
    }
    ret
}

#[no_mangle]
pub extern "C" fn SQLDisconnect(connection_handle: HDbc) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    let conn = must_be_valid!(handle.as_connection());
    // dropping the engine connection releases the shared instance
    *conn.engine_connection.write().unwrap() = None;
    *conn.interrupt.write().unwrap() = None;
    *conn.state.write().unwrap() = ConnectionState::Allocated;
    log::info!("connection closed");
    SqlReturn::SUCCESS
}
