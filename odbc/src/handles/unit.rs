use crate::api::{SQLAllocHandle, SQLFreeHandle};
use crate::handles::definitions::{
    DescRole, Descriptor, EnvState, OdbcHandle, StatementState,
};
use definitions::{AttrOdbcVersion, Handle, HandleType, SqlReturn};

fn alloc(handle_type: HandleType, parent: Handle) -> Handle {
    let mut handle: Handle = std::ptr::null_mut();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLAllocHandle(handle_type, parent, &mut handle)
    );
    handle
}

#[test]
fn env_allocation_and_state() {
    let env = alloc(HandleType::SQL_HANDLE_ENV, std::ptr::null_mut());
    let odbc_handle = unsafe { &*env.cast::<OdbcHandle>() };
    let env_contents = odbc_handle.as_env().unwrap();
    assert_eq!(EnvState::Allocated, *env_contents.state.read().unwrap());
    assert_eq!(
        AttrOdbcVersion::SQL_OV_ODBC3_80,
        env_contents.attributes.read().unwrap().odbc_ver
    );
    assert_eq!(SqlReturn::SUCCESS, SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env));
}

#[test]
fn connection_requires_an_env_parent() {
    let mut handle: Handle = std::ptr::null_mut();
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLAllocHandle(HandleType::SQL_HANDLE_DBC, std::ptr::null_mut(), &mut handle)
    );
}

#[test]
fn statement_requires_a_connection_parent() {
    let env = alloc(HandleType::SQL_HANDLE_ENV, std::ptr::null_mut());
    let mut handle: Handle = std::ptr::null_mut();
    // an env is not a valid statement parent
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLAllocHandle(HandleType::SQL_HANDLE_STMT, env, &mut handle)
    );
    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
}

#[test]
fn statement_owns_its_four_implicit_descriptors() {
    let env = alloc(HandleType::SQL_HANDLE_ENV, std::ptr::null_mut());
    let conn = alloc(HandleType::SQL_HANDLE_DBC, env);
    let stmt = alloc(HandleType::SQL_HANDLE_STMT, conn);
    let odbc_handle = unsafe { &*stmt.cast::<OdbcHandle>() };
    let statement = odbc_handle.as_statement().unwrap();
    assert_eq!(StatementState::Allocated, *statement.state.read().unwrap());

    let attributes = statement.attributes.read().unwrap();
    let roles = [
        (attributes.implicit_app_row_desc, DescRole::ApplicationRow),
        (attributes.implicit_app_param_desc, DescRole::ApplicationParam),
        (attributes.imp_row_desc, DescRole::ImplementationRow),
        (attributes.imp_param_desc, DescRole::ImplementationParam),
    ];
    for (ptr, role) in roles {
        let desc: &Descriptor = unsafe { (*ptr).as_descriptor().unwrap() };
        assert_eq!(Some(role), desc.role);
    }
    // the current application descriptors start at the implicit ones
    assert_eq!(attributes.app_row_desc, attributes.implicit_app_row_desc);
    assert_eq!(attributes.app_param_desc, attributes.implicit_app_param_desc);
    drop(attributes);

    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
}

#[test]
fn freeing_a_statement_scrubs_the_connection_back_reference() {
    let env = alloc(HandleType::SQL_HANDLE_ENV, std::ptr::null_mut());
    let conn = alloc(HandleType::SQL_HANDLE_DBC, env);
    let stmt = alloc(HandleType::SQL_HANDLE_STMT, conn);

    let conn_contents = unsafe { (*conn.cast::<OdbcHandle>()).as_connection().unwrap() };
    assert_eq!(1, conn_contents.statements.read().unwrap().len());
    assert_eq!(SqlReturn::SUCCESS, SQLFreeHandle(HandleType::SQL_HANDLE_STMT, stmt));
    assert_eq!(0, conn_contents.statements.read().unwrap().len());

    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
}

#[test]
fn explicit_descriptors_are_tracked_by_the_connection() {
    let env = alloc(HandleType::SQL_HANDLE_ENV, std::ptr::null_mut());
    let conn = alloc(HandleType::SQL_HANDLE_DBC, env);
    let desc = alloc(HandleType::SQL_HANDLE_DESC, conn);

    let conn_contents = unsafe { (*conn.cast::<OdbcHandle>()).as_connection().unwrap() };
    assert_eq!(1, conn_contents.descriptors.read().unwrap().len());
    assert_eq!(SqlReturn::SUCCESS, SQLFreeHandle(HandleType::SQL_HANDLE_DESC, desc));
    assert_eq!(0, conn_contents.descriptors.read().unwrap().len());

    SQLFreeHandle(HandleType::SQL_HANDLE_ENV, env);
}
