//! SQLEndTran. Open cursors are materialized before a commit because the
//! engine invalidates streaming results at the transaction boundary.

use crate::errors::ODBCError;
use crate::handles::definitions::{OdbcHandle, OdbcHandleRef};
use crate::must_be_valid;
use definitions::{CompletionType, Handle, HandleType, SmallInt, SqlReturn};
use num_traits::FromPrimitive;

fn end_tran_on_connection(
    handle: &OdbcHandle,
    completion: CompletionType,
    function_name: &'static str,
) -> SqlReturn {
    let conn = must_be_valid!(handle.as_connection());

    // cursors must survive the commit; pull their remaining chunks first
    for stmt_ptr in conn.statements.read().unwrap().iter() {
        let stmt = unsafe { (**stmt_ptr).as_statement() };
        if let Some(stmt) = stmt {
            if let Some(cursor) = stmt.cursor.write().unwrap().as_mut() {
                if let Err(e) = cursor.materialize() {
                    handle.add_diag_info(ODBCError::Core(e), function_name);
                    return SqlReturn::ERROR;
                }
            }
        }
    }

    let mut engine_guard = conn.engine_connection.write().unwrap();
    let Some(engine) = engine_guard.as_mut() else {
        handle.add_diag_info(
            ODBCError::FunctionSequenceError(function_name),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    let result = match completion {
        CompletionType::SQL_COMMIT => engine.commit(),
        CompletionType::SQL_ROLLBACK => engine.rollback(),
    };
    match result {
        Ok(()) => SqlReturn::SUCCESS,
        Err(e) => {
            drop(engine_guard);
            handle.add_diag_info(ODBCError::Core(e), function_name);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLEndTran(
    handle_type: HandleType,
    handle: Handle,
    completion_type: SmallInt,
) -> SqlReturn {
    if handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let odbc_handle = OdbcHandleRef::from(handle);
    odbc_handle.clear_diagnostics();
    let Some(completion) = CompletionType::from_i16(completion_type) else {
        odbc_handle.add_diag_info(
            ODBCError::InvalidAttrValue(format!("completion type {completion_type}")),
            "SQLEndTran",
        );
        return SqlReturn::ERROR;
    };
    match handle_type {
        HandleType::SQL_HANDLE_DBC => {
            end_tran_on_connection(odbc_handle, completion, "SQLEndTran")
        }
        HandleType::SQL_HANDLE_ENV => {
            let env = must_be_valid!(odbc_handle.as_env());
            let connections: Vec<_> =
                env.connections.read().unwrap().iter().copied().collect();
            for conn_ptr in connections {
                let conn_handle = unsafe { &*conn_ptr };
                let ret = end_tran_on_connection(conn_handle, completion, "SQLEndTran");
                if ret != SqlReturn::SUCCESS {
                    return ret;
                }
            }
            SqlReturn::SUCCESS
        }
        _ => SqlReturn::INVALID_HANDLE,
    }
}
