//! Environment, connection, and statement attributes. Statement attributes
//! that alias descriptor header fields are forwarded to the corresponding
//! descriptor so explicit descriptors observe them too.

use crate::api::data::i32_len;
use crate::api::util::ptr_safe_write;
use crate::errors::ODBCError;
use crate::handles::definitions::{OdbcHandle, OdbcHandleRef};
use crate::must_be_valid;
use cstr::{input_text_to_string_a, input_text_to_string_w, WideChar};
use definitions::{
    AttrConnectionPooling, AttrCpMatch, AttrOdbcVersion, ConnectionAttribute, CursorScrollable,
    CursorType, EnvironmentAttribute, HDbc, HEnv, HStmt, Integer, Len, NoScan, Pointer,
    RetrieveData, SqlBool, SqlReturn, StatementAttribute, ULen, UseBookmarks, SQL_AUTOCOMMIT_OFF,
    SQL_AUTOCOMMIT_ON, SQL_MODE_READ_ONLY, SQL_MODE_READ_WRITE, SQL_TXN_SERIALIZABLE,
};
use num_traits::FromPrimitive;

#[no_mangle]
pub extern "C" fn SQLGetEnvAttr(
    environment_handle: HEnv,
    attribute: Integer,
    value_ptr: Pointer,
    _buffer_length: Integer,
    string_length: *mut Integer,
) -> SqlReturn {
    if environment_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(environment_handle);
    handle.clear_diagnostics();
    let env = must_be_valid!(handle.as_env());
    let attributes = env.attributes.read().unwrap();
    unsafe {
        if value_ptr.is_null() {
            ptr_safe_write(string_length, 0);
            return SqlReturn::SUCCESS;
        }
        match EnvironmentAttribute::from_i32(attribute) {
            Some(EnvironmentAttribute::SQL_ATTR_ODBC_VERSION) => {
                *value_ptr.cast::<Integer>() = attributes.odbc_ver as u32 as i32;
            }
            Some(EnvironmentAttribute::SQL_ATTR_OUTPUT_NTS) => {
                *value_ptr.cast::<Integer>() = attributes.output_nts as i32;
            }
            Some(EnvironmentAttribute::SQL_ATTR_CONNECTION_POOLING) => {
                *value_ptr.cast::<u32>() = attributes.connection_pooling as u32;
            }
            Some(EnvironmentAttribute::SQL_ATTR_CP_MATCH) => {
                *value_ptr.cast::<u32>() = attributes.cp_match as u32;
            }
            None => {
                handle.add_diag_info(
                    ODBCError::InvalidAttrIdentifier(attribute),
                    "SQLGetEnvAttr",
                );
                return SqlReturn::ERROR;
            }
        }
        ptr_safe_write(string_length, std::mem::size_of::<Integer>() as Integer);
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLSetEnvAttr(
    environment_handle: HEnv,
    attribute: Integer,
    value: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    if environment_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(environment_handle);
    handle.clear_diagnostics();
    let env = must_be_valid!(handle.as_env());
    let mut attributes = env.attributes.write().unwrap();
    match EnvironmentAttribute::from_i32(attribute) {
        Some(EnvironmentAttribute::SQL_ATTR_ODBC_VERSION) => {
            match AttrOdbcVersion::from_u32(value as u32) {
                Some(version) => {
                    attributes.odbc_ver = version;
                    SqlReturn::SUCCESS
                }
                None => {
                    drop(attributes);
                    handle.add_diag_info(
                        ODBCError::InvalidAttrValue("SQL_ATTR_ODBC_VERSION".into()),
                        "SQLSetEnvAttr",
                    );
                    SqlReturn::ERROR
                }
            }
        }
        Some(EnvironmentAttribute::SQL_ATTR_OUTPUT_NTS) => {
            match SqlBool::from_i32(value as i32) {
                Some(SqlBool::SQL_TRUE) => SqlReturn::SUCCESS,
                _ => {
                    drop(attributes);
                    handle.add_diag_info(
                        ODBCError::InvalidAttrValue("SQL_ATTR_OUTPUT_NTS".into()),
                        "SQLSetEnvAttr",
                    );
                    SqlReturn::ERROR
                }
            }
        }
        Some(EnvironmentAttribute::SQL_ATTR_CONNECTION_POOLING) => {
            match AttrConnectionPooling::from_u32(value as u32) {
                Some(pooling) => {
                    attributes.connection_pooling = pooling;
                    SqlReturn::SUCCESS
                }
                None => {
                    attributes.connection_pooling = AttrConnectionPooling::SQL_CP_OFF;
                    drop(attributes);
                    handle.add_diag_info(
                        ODBCError::OptionValueChanged(
                            "SQL_ATTR_CONNECTION_POOLING",
                            "SQL_CP_OFF",
                        ),
                        "SQLSetEnvAttr",
                    );
                    SqlReturn::SUCCESS_WITH_INFO
                }
            }
        }
        Some(EnvironmentAttribute::SQL_ATTR_CP_MATCH) => {
            match AttrCpMatch::from_u32(value as u32) {
                Some(matching) => {
                    attributes.cp_match = matching;
                    SqlReturn::SUCCESS
                }
                None => {
                    attributes.cp_match = AttrCpMatch::SQL_CP_STRICT_MATCH;
                    drop(attributes);
                    handle.add_diag_info(
                        ODBCError::OptionValueChanged("SQL_ATTR_CP_MATCH", "SQL_CP_STRICT_MATCH"),
                        "SQLSetEnvAttr",
                    );
                    SqlReturn::SUCCESS_WITH_INFO
                }
            }
        }
        None => {
            drop(attributes);
            handle.add_diag_info(ODBCError::InvalidAttrIdentifier(attribute), "SQLSetEnvAttr");
            SqlReturn::ERROR
        }
    }
}

unsafe fn get_connect_attr_internal(
    handle: OdbcHandleRef,
    attribute: Integer,
    value_ptr: Pointer,
    buffer_length: Integer,
    string_length_ptr: *mut Integer,
    wide: bool,
    function_name: &'static str,
) -> SqlReturn {
    let conn = must_be_valid!(handle.as_connection());
    let attributes = conn.attributes.read().unwrap();
    match ConnectionAttribute::from_i32(attribute) {
        Some(ConnectionAttribute::SQL_ATTR_AUTOCOMMIT) => {
            *value_ptr.cast::<u32>() = if attributes.autocommit {
                SQL_AUTOCOMMIT_ON as u32
            } else {
                SQL_AUTOCOMMIT_OFF as u32
            };
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_ACCESS_MODE) => {
            *value_ptr.cast::<u32>() = attributes.access_mode as u32;
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_CURRENT_CATALOG) => {
            let catalog = attributes.current_catalog.clone().unwrap_or_default();
            if wide {
                i32_len::set_output_wstring_as_bytes(
                    &catalog,
                    value_ptr,
                    buffer_length.max(0) as usize,
                    string_length_ptr,
                )
            } else {
                i32_len::set_output_string(
                    &catalog,
                    value_ptr.cast(),
                    buffer_length.max(0) as usize,
                    string_length_ptr,
                )
            }
        }
        Some(ConnectionAttribute::SQL_ATTR_LOGIN_TIMEOUT) => {
            *value_ptr.cast::<u32>() = attributes.login_timeout.unwrap_or(0);
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_CONNECTION_TIMEOUT) => {
            *value_ptr.cast::<u32>() = attributes.connection_timeout.unwrap_or(0);
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_TXN_ISOLATION) => {
            *value_ptr.cast::<u32>() = SQL_TXN_SERIALIZABLE;
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_CONNECTION_DEAD) => {
            let dead = conn.engine_connection.read().unwrap().is_none();
            *value_ptr.cast::<u32>() = u32::from(dead);
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_METADATA_ID) => {
            *value_ptr.cast::<u32>() = u32::from(attributes.metadata_id);
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_ASYNC_ENABLE)
        | Some(ConnectionAttribute::SQL_ATTR_ASYNC_DBC_FUNCTIONS_ENABLE) => {
            *value_ptr.cast::<u32>() = 0;
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_AUTO_IPD) => {
            *value_ptr.cast::<u32>() = SqlBool::SQL_FALSE as u32;
            SqlReturn::SUCCESS
        }
        _ => {
            drop(attributes);
            handle.add_diag_info(ODBCError::InvalidAttrIdentifier(attribute), function_name);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLGetConnectAttr(
    connection_handle: HDbc,
    attribute: Integer,
    value_ptr: Pointer,
    buffer_length: Integer,
    string_length_ptr: *mut Integer,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    unsafe {
        get_connect_attr_internal(
            handle,
            attribute,
            value_ptr,
            buffer_length,
            string_length_ptr,
            false,
            "SQLGetConnectAttr",
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLGetConnectAttrW(
    connection_handle: HDbc,
    attribute: Integer,
    value_ptr: Pointer,
    buffer_length: Integer,
    string_length_ptr: *mut Integer,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    unsafe {
        get_connect_attr_internal(
            handle,
            attribute,
            value_ptr,
            buffer_length,
            string_length_ptr,
            true,
            "SQLGetConnectAttrW",
        )
    }
}

unsafe fn set_connect_attr_internal(
    handle: OdbcHandleRef,
    attribute: Integer,
    value_ptr: Pointer,
    catalog_value: Option<String>,
    function_name: &'static str,
) -> SqlReturn {
    let conn = must_be_valid!(handle.as_connection());
    match ConnectionAttribute::from_i32(attribute) {
        Some(ConnectionAttribute::SQL_ATTR_AUTOCOMMIT) => {
            let autocommit = value_ptr as usize == SQL_AUTOCOMMIT_ON;
            conn.attributes.write().unwrap().autocommit = autocommit;
            if let Some(engine) = conn.engine_connection.write().unwrap().as_mut() {
                engine.session.set_autocommit(autocommit);
            }
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_ACCESS_MODE) => {
            let mode = value_ptr as usize;
            if mode != SQL_MODE_READ_WRITE && mode != SQL_MODE_READ_ONLY {
                handle.add_diag_info(
                    ODBCError::InvalidAttrValue("SQL_ATTR_ACCESS_MODE".into()),
                    function_name,
                );
                return SqlReturn::ERROR;
            }
            conn.attributes.write().unwrap().access_mode = mode;
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_CURRENT_CATALOG) => {
            let Some(catalog) = catalog_value else {
                handle.add_diag_info(
                    ODBCError::InvalidAttrValue("SQL_ATTR_CURRENT_CATALOG".into()),
                    function_name,
                );
                return SqlReturn::ERROR;
            };
            if let Some(engine) = conn.engine_connection.write().unwrap().as_mut() {
                let use_stmt = format!("USE \"{}\"", catalog.replace('"', "\"\""));
                if let Err(e) = engine.run_transient(&use_stmt) {
                    handle.add_diag_info(ODBCError::Core(e), function_name);
                    return SqlReturn::ERROR;
                }
            }
            conn.attributes.write().unwrap().current_catalog = Some(catalog);
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_LOGIN_TIMEOUT) => {
            conn.attributes.write().unwrap().login_timeout = Some(value_ptr as u32);
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_CONNECTION_TIMEOUT) => {
            conn.attributes.write().unwrap().connection_timeout = Some(value_ptr as u32);
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_METADATA_ID) => {
            conn.attributes.write().unwrap().metadata_id = value_ptr as usize != 0;
            SqlReturn::SUCCESS
        }
        Some(ConnectionAttribute::SQL_ATTR_TXN_ISOLATION) => {
            if value_ptr as u32 == SQL_TXN_SERIALIZABLE {
                SqlReturn::SUCCESS
            } else {
                handle.add_diag_info(
                    ODBCError::OptionValueChanged("SQL_ATTR_TXN_ISOLATION", "SERIALIZABLE"),
                    function_name,
                );
                SqlReturn::SUCCESS_WITH_INFO
            }
        }
        Some(ConnectionAttribute::SQL_ATTR_ASYNC_ENABLE)
        | Some(ConnectionAttribute::SQL_ATTR_ASYNC_DBC_FUNCTIONS_ENABLE) => {
            if value_ptr as usize == 0 {
                SqlReturn::SUCCESS
            } else {
                // async is advertised as not capable
                handle.add_diag_info(
                    ODBCError::OptionValueChanged("SQL_ATTR_ASYNC_ENABLE", "off"),
                    function_name,
                );
                SqlReturn::SUCCESS_WITH_INFO
            }
        }
        Some(ConnectionAttribute::SQL_ATTR_CONNECTION_DEAD) => {
            handle.add_diag_info(ODBCError::ReadOnlyAttr("SQL_ATTR_CONNECTION_DEAD"), function_name);
            SqlReturn::ERROR
        }
        _ => {
            handle.add_diag_info(ODBCError::InvalidAttrIdentifier(attribute), function_name);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLSetConnectAttr(
    connection_handle: HDbc,
    attribute: Integer,
    value_ptr: Pointer,
    string_length: Integer,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    let catalog = if ConnectionAttribute::from_i32(attribute)
        == Some(ConnectionAttribute::SQL_ATTR_CURRENT_CATALOG)
    {
        Some(unsafe { input_text_to_string_a(value_ptr.cast(), string_length as isize) })
    } else {
        None
    };
    unsafe { set_connect_attr_internal(handle, attribute, value_ptr, catalog, "SQLSetConnectAttr") }
}

#[no_mangle]
pub extern "C" fn SQLSetConnectAttrW(
    connection_handle: HDbc,
    attribute: Integer,
    value_ptr: Pointer,
    string_length: Integer,
) -> SqlReturn {
    if connection_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(connection_handle);
    handle.clear_diagnostics();
    let catalog = if ConnectionAttribute::from_i32(attribute)
        == Some(ConnectionAttribute::SQL_ATTR_CURRENT_CATALOG)
    {
        // length is in bytes for wide connection attributes
        let chars = if string_length < 0 {
            string_length as isize
        } else {
            (string_length as usize / std::mem::size_of::<WideChar>()) as isize
        };
        Some(unsafe { input_text_to_string_w(value_ptr.cast(), chars) })
    } else {
        None
    };
    unsafe {
        set_connect_attr_internal(handle, attribute, value_ptr, catalog, "SQLSetConnectAttrW")
    }
}

unsafe fn get_stmt_attr_internal(
    handle: OdbcHandleRef,
    attribute: Integer,
    value_ptr: Pointer,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    if value_ptr.is_null() {
        return SqlReturn::SUCCESS;
    }
    let attributes = stmt.attributes.read().unwrap();
    match StatementAttribute::from_i32(attribute) {
        Some(StatementAttribute::SQL_ATTR_APP_ROW_DESC) => {
            *value_ptr.cast::<Pointer>() = attributes.app_row_desc.cast();
        }
        Some(StatementAttribute::SQL_ATTR_APP_PARAM_DESC) => {
            *value_ptr.cast::<Pointer>() = attributes.app_param_desc.cast();
        }
        Some(StatementAttribute::SQL_ATTR_IMP_ROW_DESC) => {
            *value_ptr.cast::<Pointer>() = attributes.imp_row_desc.cast();
        }
        Some(StatementAttribute::SQL_ATTR_IMP_PARAM_DESC) => {
            *value_ptr.cast::<Pointer>() = attributes.imp_param_desc.cast();
        }
        Some(StatementAttribute::SQL_ATTR_CURSOR_SCROLLABLE) => {
            *value_ptr.cast::<ULen>() = attributes.cursor_scrollable as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_CURSOR_SENSITIVITY) => {
            *value_ptr.cast::<ULen>() = attributes.cursor_sensitivity as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_CURSOR_TYPE) => {
            *value_ptr.cast::<ULen>() = attributes.cursor_type as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_CONCURRENCY) => {
            *value_ptr.cast::<ULen>() = attributes.concurrency as ULen;
        }
        // accepted but always reads back zero
        Some(StatementAttribute::SQL_ATTR_QUERY_TIMEOUT) => {
            *value_ptr.cast::<ULen>() = 0;
        }
        Some(StatementAttribute::SQL_ATTR_MAX_LENGTH) => {
            *value_ptr.cast::<ULen>() = attributes.max_length;
        }
        Some(StatementAttribute::SQL_ATTR_MAX_ROWS) => {
            *value_ptr.cast::<ULen>() = attributes.max_rows;
        }
        Some(StatementAttribute::SQL_ATTR_NOSCAN) => {
            *value_ptr.cast::<ULen>() = attributes.no_scan as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_RETRIEVE_DATA) => {
            *value_ptr.cast::<ULen>() = attributes.retrieve_data as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_USE_BOOKMARKS) => {
            *value_ptr.cast::<ULen>() = attributes.use_bookmarks as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_ENABLE_AUTO_IPD) => {
            *value_ptr.cast::<ULen>() = attributes.enable_auto_ipd as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_METADATA_ID) => {
            *value_ptr.cast::<ULen>() = ULen::from(attributes.metadata_id);
        }
        Some(StatementAttribute::SQL_ATTR_ASYNC_ENABLE) => {
            *value_ptr.cast::<ULen>() = attributes.async_enable as ULen;
        }
        Some(StatementAttribute::SQL_ATTR_ROW_NUMBER) => {
            drop(attributes);
            let row = stmt
                .cursor
                .read()
                .unwrap()
                .as_ref()
                .and_then(|c| c.rowset_start())
                .map_or(0, |r| r + 1);
            *value_ptr.cast::<ULen>() = row;
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_ROW_ARRAY_SIZE)
        | Some(StatementAttribute::SQL_ROWSET_SIZE) => {
            drop(attributes);
            *value_ptr.cast::<ULen>() = stmt.ard().info.read().unwrap().header.array_size;
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_ROW_BIND_TYPE) => {
            drop(attributes);
            *value_ptr.cast::<ULen>() = stmt.ard().info.read().unwrap().header.bind_type;
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_ROW_BIND_OFFSET_PTR) => {
            drop(attributes);
            *value_ptr.cast::<*mut Len>() = stmt.ard().info.read().unwrap().header.bind_offset_ptr;
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_ROW_STATUS_PTR) => {
            drop(attributes);
            *value_ptr.cast::<Pointer>() =
                stmt.ird().info.read().unwrap().header.array_status_ptr.cast();
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_ROWS_FETCHED_PTR) => {
            drop(attributes);
            *value_ptr.cast::<Pointer>() =
                stmt.ird().info.read().unwrap().header.rows_processed_ptr.cast();
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_PARAMSET_SIZE) => {
            drop(attributes);
            *value_ptr.cast::<ULen>() = stmt.apd().info.read().unwrap().header.array_size;
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_PARAM_BIND_TYPE) => {
            drop(attributes);
            *value_ptr.cast::<ULen>() = stmt.apd().info.read().unwrap().header.bind_type;
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_PARAM_BIND_OFFSET_PTR) => {
            drop(attributes);
            *value_ptr.cast::<*mut Len>() = stmt.apd().info.read().unwrap().header.bind_offset_ptr;
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_PARAM_STATUS_PTR) => {
            drop(attributes);
            *value_ptr.cast::<Pointer>() =
                stmt.ipd().info.read().unwrap().header.array_status_ptr.cast();
            return SqlReturn::SUCCESS;
        }
        Some(StatementAttribute::SQL_ATTR_PARAMS_PROCESSED_PTR) => {
            drop(attributes);
            *value_ptr.cast::<Pointer>() =
                stmt.ipd().info.read().unwrap().header.rows_processed_ptr.cast();
            return SqlReturn::SUCCESS;
        }
        _ => {
            drop(attributes);
            handle.add_diag_info(ODBCError::InvalidAttrIdentifier(attribute), function_name);
            return SqlReturn::ERROR;
        }
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLGetStmtAttr(
    statement_handle: HStmt,
    attribute: Integer,
    value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length_ptr: *mut Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe { get_stmt_attr_internal(handle, attribute, value_ptr, "SQLGetStmtAttr") }
}

#[no_mangle]
pub extern "C" fn SQLGetStmtAttrW(
    statement_handle: HStmt,
    attribute: Integer,
    value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length_ptr: *mut Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe { get_stmt_attr_internal(handle, attribute, value_ptr, "SQLGetStmtAttrW") }
}

unsafe fn set_stmt_attr_internal(
    handle: OdbcHandleRef,
    attribute: Integer,
    value_ptr: Pointer,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    let value = value_ptr as ULen;
    match StatementAttribute::from_i32(attribute) {
        Some(StatementAttribute::SQL_ATTR_APP_ROW_DESC) => {
            let mut attributes = stmt.attributes.write().unwrap();
            if value_ptr.is_null() {
                attributes.app_row_desc = attributes.implicit_app_row_desc;
                return SqlReturn::SUCCESS;
            }
            let desc_handle: *mut OdbcHandle = value_ptr.cast();
            if (*desc_handle).as_descriptor().is_none() {
                drop(attributes);
                handle.add_diag_info(
                    ODBCError::InvalidAttrValue("SQL_ATTR_APP_ROW_DESC".into()),
                    function_name,
                );
                return SqlReturn::ERROR;
            }
            attributes.app_row_desc = desc_handle;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_APP_PARAM_DESC) => {
            let mut attributes = stmt.attributes.write().unwrap();
            if value_ptr.is_null() {
                attributes.app_param_desc = attributes.implicit_app_param_desc;
                return SqlReturn::SUCCESS;
            }
            let desc_handle: *mut OdbcHandle = value_ptr.cast();
            if (*desc_handle).as_descriptor().is_none() {
                drop(attributes);
                handle.add_diag_info(
                    ODBCError::InvalidAttrValue("SQL_ATTR_APP_PARAM_DESC".into()),
                    function_name,
                );
                return SqlReturn::ERROR;
            }
            attributes.app_param_desc = desc_handle;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_IMP_ROW_DESC)
        | Some(StatementAttribute::SQL_ATTR_IMP_PARAM_DESC) => {
            handle.add_diag_info(
                ODBCError::ReadOnlyAttr("implementation descriptors"),
                function_name,
            );
            SqlReturn::ERROR
        }
        Some(StatementAttribute::SQL_ATTR_CURSOR_SCROLLABLE) => {
            let mut attributes = stmt.attributes.write().unwrap();
            match CursorScrollable::from_usize(value) {
                Some(CursorScrollable::SQL_NONSCROLLABLE) => {
                    attributes.cursor_scrollable = CursorScrollable::SQL_NONSCROLLABLE;
                    attributes.cursor_type = CursorType::SQL_CURSOR_FORWARD_ONLY;
                    SqlReturn::SUCCESS
                }
                Some(CursorScrollable::SQL_SCROLLABLE) => {
                    attributes.cursor_scrollable = CursorScrollable::SQL_SCROLLABLE;
                    attributes.cursor_type = CursorType::SQL_CURSOR_STATIC;
                    SqlReturn::SUCCESS
                }
                None => {
                    drop(attributes);
                    handle.add_diag_info(
                        ODBCError::InvalidAttrValue("SQL_ATTR_CURSOR_SCROLLABLE".into()),
                        function_name,
                    );
                    SqlReturn::ERROR
                }
            }
        }
        Some(StatementAttribute::SQL_ATTR_CURSOR_TYPE) => {
            let mut attributes = stmt.attributes.write().unwrap();
            match CursorType::from_usize(value) {
                Some(CursorType::SQL_CURSOR_FORWARD_ONLY) => {
                    attributes.cursor_type = CursorType::SQL_CURSOR_FORWARD_ONLY;
                    attributes.cursor_scrollable = CursorScrollable::SQL_NONSCROLLABLE;
                    SqlReturn::SUCCESS
                }
                Some(CursorType::SQL_CURSOR_STATIC) => {
                    attributes.cursor_type = CursorType::SQL_CURSOR_STATIC;
                    attributes.cursor_scrollable = CursorScrollable::SQL_SCROLLABLE;
                    SqlReturn::SUCCESS
                }
                // keyset and dynamic cursors degrade to static
                Some(CursorType::SQL_CURSOR_KEYSET_DRIVEN) | Some(CursorType::SQL_CURSOR_DYNAMIC) => {
                    attributes.cursor_type = CursorType::SQL_CURSOR_STATIC;
                    attributes.cursor_scrollable = CursorScrollable::SQL_SCROLLABLE;
                    drop(attributes);
                    handle.add_diag_info(
                        ODBCError::OptionValueChanged(
                            "SQL_ATTR_CURSOR_TYPE",
                            "SQL_CURSOR_STATIC",
                        ),
                        function_name,
                    );
                    SqlReturn::SUCCESS_WITH_INFO
                }
                None => {
                    drop(attributes);
                    handle.add_diag_info(
                        ODBCError::InvalidAttrValue("SQL_ATTR_CURSOR_TYPE".into()),
                        function_name,
                    );
                    SqlReturn::ERROR
                }
            }
        }
        Some(StatementAttribute::SQL_ATTR_QUERY_TIMEOUT) => {
            // accepted and ignored; reads back as zero
            stmt.attributes.write().unwrap().query_timeout = value;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_MAX_LENGTH) => {
            stmt.attributes.write().unwrap().max_length = value;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_MAX_ROWS) => {
            stmt.attributes.write().unwrap().max_rows = value;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_NOSCAN) => {
            match NoScan::from_usize(value) {
                Some(noscan) => {
                    stmt.attributes.write().unwrap().no_scan = noscan;
                    SqlReturn::SUCCESS
                }
                None => {
                    handle.add_diag_info(
                        ODBCError::InvalidAttrValue("SQL_ATTR_NOSCAN".into()),
                        function_name,
                    );
                    SqlReturn::ERROR
                }
            }
        }
        Some(StatementAttribute::SQL_ATTR_RETRIEVE_DATA) => {
            match RetrieveData::from_usize(value) {
                Some(retrieve) => {
                    stmt.attributes.write().unwrap().retrieve_data = retrieve;
                    SqlReturn::SUCCESS
                }
                None => {
                    handle.add_diag_info(
                        ODBCError::InvalidAttrValue("SQL_ATTR_RETRIEVE_DATA".into()),
                        function_name,
                    );
                    SqlReturn::ERROR
                }
            }
        }
        Some(StatementAttribute::SQL_ATTR_USE_BOOKMARKS) => {
            match UseBookmarks::from_usize(value) {
                Some(UseBookmarks::SQL_UB_OFF) => SqlReturn::SUCCESS,
                _ => {
                    handle.add_diag_info(
                        ODBCError::OptionValueChanged("SQL_ATTR_USE_BOOKMARKS", "off"),
                        function_name,
                    );
                    SqlReturn::SUCCESS_WITH_INFO
                }
            }
        }
        Some(StatementAttribute::SQL_ATTR_METADATA_ID) => {
            stmt.attributes.write().unwrap().metadata_id = value != 0;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_ASYNC_ENABLE) => {
            if value == 0 {
                SqlReturn::SUCCESS
            } else {
                handle.add_diag_info(
                    ODBCError::OptionValueChanged("SQL_ATTR_ASYNC_ENABLE", "off"),
                    function_name,
                );
                SqlReturn::SUCCESS_WITH_INFO
            }
        }
        Some(StatementAttribute::SQL_ATTR_CONCURRENCY) => {
            if value == definitions::Concurrency::SQL_CONCUR_READ_ONLY as ULen {
                SqlReturn::SUCCESS
            } else {
                handle.add_diag_info(
                    ODBCError::OptionValueChanged("SQL_ATTR_CONCURRENCY", "SQL_CONCUR_READ_ONLY"),
                    function_name,
                );
                SqlReturn::SUCCESS_WITH_INFO
            }
        }
        Some(StatementAttribute::SQL_ATTR_ROW_ARRAY_SIZE)
        | Some(StatementAttribute::SQL_ROWSET_SIZE) => {
            if value == 0 {
                handle.add_diag_info(
                    ODBCError::InvalidAttrValue("SQL_ATTR_ROW_ARRAY_SIZE".into()),
                    function_name,
                );
                return SqlReturn::ERROR;
            }
            stmt.ard().info.write().unwrap().header.array_size = value;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_ROW_BIND_TYPE) => {
            stmt.ard().info.write().unwrap().header.bind_type = value;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_ROW_BIND_OFFSET_PTR) => {
            stmt.ard().info.write().unwrap().header.bind_offset_ptr = value_ptr.cast();
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_ROW_STATUS_PTR) => {
            stmt.ird().info.write().unwrap().header.array_status_ptr = value_ptr.cast();
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_ROWS_FETCHED_PTR) => {
            stmt.ird().info.write().unwrap().header.rows_processed_ptr = value_ptr.cast();
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_PARAMSET_SIZE) => {
            if value == 0 {
                handle.add_diag_info(
                    ODBCError::InvalidAttrValue("SQL_ATTR_PARAMSET_SIZE".into()),
                    function_name,
                );
                return SqlReturn::ERROR;
            }
            stmt.apd().info.write().unwrap().header.array_size = value;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_PARAM_BIND_TYPE) => {
            stmt.apd().info.write().unwrap().header.bind_type = value;
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_PARAM_BIND_OFFSET_PTR) => {
            stmt.apd().info.write().unwrap().header.bind_offset_ptr = value_ptr.cast();
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_PARAM_STATUS_PTR) => {
            stmt.ipd().info.write().unwrap().header.array_status_ptr = value_ptr.cast();
            SqlReturn::SUCCESS
        }
        Some(StatementAttribute::SQL_ATTR_PARAMS_PROCESSED_PTR) => {
            stmt.ipd().info.write().unwrap().header.rows_processed_ptr = value_ptr.cast();
            SqlReturn::SUCCESS
        }
        _ => {
            handle.add_diag_info(ODBCError::InvalidAttrIdentifier(attribute), function_name);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLSetStmtAttr(
    statement_handle: HStmt,
    attribute: Integer,
    value_ptr: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe { set_stmt_attr_internal(handle, attribute, value_ptr, "SQLSetStmtAttr") }
}

#[no_mangle]
pub extern "C" fn SQLSetStmtAttrW(
    statement_handle: HStmt,
    attribute: Integer,
    value_ptr: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe { set_stmt_attr_internal(handle, attribute, value_ptr, "SQLSetStmtAttrW") }
}
