//! Handle allocation and destruction: parent/child bookkeeping and the
//! repair work freeing a handle triggers on its relatives.

use crate::api::parameters::reset_params;
use crate::errors::ODBCError;
use crate::handles::definitions::{
    Connection, ConnectionState, Descriptor, Env, EnvState, OdbcHandle, OdbcHandleRef, Statement,
    StatementState,
};
use crate::must_be_valid;
use definitions::{FreeStmtOption, Handle, HandleType, SqlReturn, USmallInt};
use num_traits::FromPrimitive;

const NULL_HANDLE_ERROR: &str = "handle cannot be null";
const HANDLE_MUST_BE_ENV_ERROR: &str = "handle must be env";
const HANDLE_MUST_BE_CONN_ERROR: &str = "handle must be conn";

#[no_mangle]
pub extern "C" fn SQLAllocHandle(
    handle_type: HandleType,
    input_handle: Handle,
    output_handle: *mut Handle,
) -> SqlReturn {
    logger::Logger::initialize();
    match sql_alloc_handle(handle_type, input_handle.cast(), output_handle) {
        Ok(_) => SqlReturn::SUCCESS,
        Err(_) => SqlReturn::INVALID_HANDLE,
    }
}

fn sql_alloc_handle(
    handle_type: HandleType,
    input_handle: *mut OdbcHandle,
    output_handle: *mut Handle,
) -> Result<(), ODBCError> {
    match handle_type {
        HandleType::SQL_HANDLE_ENV => {
            let env = Env::with_state(EnvState::Allocated);
            let mh = Box::new(OdbcHandle::Env(env));
            unsafe {
                *output_handle = Box::into_raw(mh).cast();
            }
            Ok(())
        }
        HandleType::SQL_HANDLE_DBC => {
            if input_handle.is_null() {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            let env = unsafe {
                (*input_handle)
                    .as_env()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_ENV_ERROR))?
            };
            let conn = Connection::with_state(input_handle, ConnectionState::Allocated);
            let mh_ptr = Box::into_raw(Box::new(OdbcHandle::Connection(conn)));
            env.connections.write().unwrap().insert(mh_ptr);
            *env.state.write().unwrap() = EnvState::ConnectionAllocated;
            unsafe { *output_handle = mh_ptr.cast() }
            Ok(())
        }
        HandleType::SQL_HANDLE_STMT => {
            if input_handle.is_null() {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            let conn = unsafe {
                (*input_handle)
                    .as_connection()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?
            };
            let stmt = Statement::with_state(input_handle, StatementState::Allocated);
            let mh_ptr = Box::into_raw(Box::new(OdbcHandle::Statement(stmt)));
            conn.statements.write().unwrap().insert(mh_ptr);
            *conn.state.write().unwrap() = ConnectionState::StatementAllocated;
            unsafe { *output_handle = mh_ptr.cast() }
            Ok(())
        }
        HandleType::SQL_HANDLE_DESC => {
            if input_handle.is_null() {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            let conn = unsafe {
                (*input_handle)
                    .as_connection()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?
            };
            let desc = Descriptor::explicit(input_handle);
            let mh_ptr = Box::into_raw(Box::new(OdbcHandle::Descriptor(desc)));
            conn.descriptors.write().unwrap().insert(mh_ptr);
            unsafe { *output_handle = mh_ptr.cast() }
            Ok(())
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLFreeHandle(handle_type: HandleType, handle: Handle) -> SqlReturn {
    if handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    match sql_free_handle(handle_type, handle.cast()) {
        Ok(_) => SqlReturn::SUCCESS,
        Err(_) => SqlReturn::INVALID_HANDLE,
    }
}

pub(crate) fn sql_free_handle(
    handle_type: HandleType,
    handle: *mut OdbcHandle,
) -> Result<(), ODBCError> {
    match handle_type {
        HandleType::SQL_HANDLE_ENV => {
            let env = unsafe {
                (*handle)
                    .as_env()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_ENV_ERROR))?
            };
            // destroy any connection the host failed to free
            let connections: Vec<*mut OdbcHandle> =
                env.connections.write().unwrap().drain().collect();
            for conn in connections {
                sql_free_handle(HandleType::SQL_HANDLE_DBC, conn)?;
            }
            unsafe {
                drop(Box::from_raw(handle));
            }
            Ok(())
        }
        HandleType::SQL_HANDLE_DBC => {
            let conn = unsafe {
                (*handle)
                    .as_connection()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?
            };
            // some hosts leak statements; the connection owns and frees them
            let statements: Vec<*mut OdbcHandle> =
                conn.statements.write().unwrap().drain().collect();
            for stmt in statements {
                unsafe {
                    drop(Box::from_raw(stmt));
                }
            }
            let descriptors: Vec<*mut OdbcHandle> =
                conn.descriptors.write().unwrap().drain().collect();
            for desc in descriptors {
                unsafe {
                    drop(Box::from_raw(desc));
                }
            }
            let env = conn.env;
            if !env.is_null() {
                unsafe {
                    if let Some(env) = (*env).as_env() {
                        env.connections.write().unwrap().remove(&handle);
                    }
                }
            }
            unsafe {
                drop(Box::from_raw(handle));
            }
            Ok(())
        }
        HandleType::SQL_HANDLE_STMT => {
            let stmt = unsafe {
                (*handle)
                    .as_statement()
                    .ok_or(ODBCError::InvalidHandleType("handle must be stmt"))?
            };
            close_cursor(stmt);
            let conn = stmt.connection;
            if !conn.is_null() {
                unsafe {
                    if let Some(conn) = (*conn).as_connection() {
                        conn.statements.write().unwrap().remove(&handle);
                    }
                }
            }
            unsafe {
                drop(Box::from_raw(handle));
            }
            Ok(())
        }
        HandleType::SQL_HANDLE_DESC => {
            let desc = unsafe {
                (*handle)
                    .as_descriptor()
                    .ok_or(ODBCError::InvalidHandleType("handle must be desc"))?
            };
            let conn = desc.connection;
            if !conn.is_null() {
                unsafe {
                    if let Some(conn) = (*conn).as_connection() {
                        // statements referencing this descriptor fall back to
                        // their implicit one
                        for stmt_ptr in conn.statements.read().unwrap().iter() {
                            if let Some(stmt) = (**stmt_ptr).as_statement() {
                                stmt.revert_descriptor(handle);
                            }
                        }
                        conn.descriptors.write().unwrap().remove(&handle);
                    }
                }
            }
            unsafe {
                drop(Box::from_raw(handle));
            }
            Ok(())
        }
    }
}

/// Close an open cursor and drop streaming state; the statement returns to
/// its pre-execute state.
pub(crate) fn close_cursor(stmt: &Statement) {
    *stmt.cursor.write().unwrap() = None;
    *stmt.var_data_cache.write().unwrap() = None;
    let mut state = stmt.state.write().unwrap();
    *state = if stmt.prepared.read().unwrap().is_some() {
        StatementState::Prepared
    } else {
        StatementState::Allocated
    };
}

#[no_mangle]
pub extern "C" fn SQLFreeStmt(statement_handle: definitions::HStmt, option: USmallInt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    match FreeStmtOption::from_u16(option) {
        Some(FreeStmtOption::SQL_CLOSE) => {
            close_cursor(stmt);
            SqlReturn::SUCCESS
        }
        Some(FreeStmtOption::SQL_DROP) => {
            match sql_free_handle(HandleType::SQL_HANDLE_STMT, handle) {
                Ok(_) => SqlReturn::SUCCESS,
                Err(_) => SqlReturn::INVALID_HANDLE,
            }
        }
        Some(FreeStmtOption::SQL_UNBIND) => {
            stmt.bound_cols.write().unwrap().clear();
            stmt.ard().info.write().unwrap().reset_records();
            SqlReturn::SUCCESS
        }
        Some(FreeStmtOption::SQL_RESET_PARAMS) => {
            reset_params(stmt);
            SqlReturn::SUCCESS
        }
        None => {
            handle.add_diag_info(
                ODBCError::InvalidAttrValue(format!("FreeStmt option {option}")),
                "SQLFreeStmt",
            );
            SqlReturn::ERROR
        }
    }
}
