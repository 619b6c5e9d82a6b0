use crate::errors::ODBCError;
use crate::handles::definitions::{DescRole, Descriptor};
use crate::handles::descriptor::{copy_desc, get_desc_field, set_desc_field, DescFieldValue};
use definitions::{AllocType, Desc, Pointer, SmallInt, SqlDataType, ULen};

fn explicit_desc() -> Descriptor {
    Descriptor::explicit(std::ptr::null_mut())
}

fn implicit_desc(role: DescRole) -> Descriptor {
    Descriptor::implicit(std::ptr::null_mut(), role)
}

unsafe fn set_small(
    desc: &Descriptor,
    rec: SmallInt,
    field: Desc,
    value: SmallInt,
) -> Result<(), ODBCError> {
    let mut value = value;
    set_desc_field(desc, rec, field, (&mut value as *mut SmallInt).cast(), 0)
}

#[test]
fn alloc_type_distinguishes_implicit_from_explicit() {
    let explicit = explicit_desc();
    let implicit = implicit_desc(DescRole::ApplicationRow);
    match get_desc_field(&explicit, 0, Desc::SQL_DESC_ALLOC_TYPE).unwrap() {
        DescFieldValue::Small(v) => assert_eq!(AllocType::SQL_DESC_ALLOC_USER as i16, v),
        other => panic!("unexpected {other:?}"),
    }
    match get_desc_field(&implicit, 0, Desc::SQL_DESC_ALLOC_TYPE).unwrap() {
        DescFieldValue::Small(v) => assert_eq!(AllocType::SQL_DESC_ALLOC_AUTO as i16, v),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn alloc_type_is_read_only_everywhere() {
    let desc = explicit_desc();
    let err = unsafe { set_small(&desc, 0, Desc::SQL_DESC_ALLOC_TYPE, 1) }.unwrap_err();
    assert_eq!("HY091", err.get_sql_state());
}

#[test]
fn read_only_record_fields_reject_writes() {
    let desc = explicit_desc();
    for field in [
        Desc::SQL_DESC_DISPLAY_SIZE,
        Desc::SQL_DESC_BASE_COLUMN_NAME,
        Desc::SQL_DESC_SEARCHABLE,
        Desc::SQL_DESC_NULLABLE,
        Desc::SQL_DESC_UPDATABLE,
    ] {
        let err = unsafe { set_small(&desc, 1, field, 1) }.unwrap_err();
        assert_eq!("HY091", err.get_sql_state(), "{field:?}");
    }
}

#[test]
fn ird_record_fields_are_driver_owned() {
    let ird = implicit_desc(DescRole::ImplementationRow);
    let err =
        unsafe { set_small(&ird, 1, Desc::SQL_DESC_TYPE, SqlDataType::SQL_INTEGER as i16) }
            .unwrap_err();
    assert_eq!("HY091", err.get_sql_state());

    // header array-status-ptr stays writable on the IRD
    let mut status: u16 = 0;
    let result = unsafe {
        set_desc_field(
            &ird,
            0,
            Desc::SQL_DESC_ARRAY_STATUS_PTR,
            (&mut status as *mut u16).cast(),
            0,
        )
    };
    assert!(result.is_ok());
}

#[test]
fn rows_processed_ptr_is_implementation_only() {
    let apd = implicit_desc(DescRole::ApplicationParam);
    let mut processed: ULen = 0;
    let err = unsafe {
        set_desc_field(
            &apd,
            0,
            Desc::SQL_DESC_ROWS_PROCESSED_PTR,
            (&mut processed as *mut ULen).cast(),
            0,
        )
    }
    .unwrap_err();
    assert_eq!("HY091", err.get_sql_state());
}

#[test]
fn data_ptr_is_application_only() {
    let ipd = implicit_desc(DescRole::ImplementationParam);
    let mut value: i32 = 0;
    let err = unsafe {
        set_desc_field(
            &ipd,
            1,
            Desc::SQL_DESC_DATA_PTR,
            (&mut value as *mut i32).cast::<std::ffi::c_void>(),
            0,
        )
    }
    .unwrap_err();
    assert_eq!("HY091", err.get_sql_state());
}

#[test]
fn unknown_type_fails_consistency_and_leaves_the_record() {
    let desc = explicit_desc();
    unsafe { set_small(&desc, 1, Desc::SQL_DESC_TYPE, SqlDataType::SQL_INTEGER as i16) }
        .unwrap();
    let before = desc.info.read().unwrap().record(0).unwrap().clone();

    let err = unsafe { set_small(&desc, 1, Desc::SQL_DESC_TYPE, SqlDataType::SQL_GUID as i16) }
        .unwrap_err();
    assert_eq!("HY021", err.get_sql_state());

    let after = desc.info.read().unwrap().record(0).unwrap().clone();
    assert_eq!(before.concise_type, after.concise_type);
    assert_eq!(before.sql_type, after.sql_type);
    assert_eq!(before.precision, after.precision);
}

#[test]
fn setting_type_populates_registry_defaults() {
    let desc = explicit_desc();
    unsafe { set_small(&desc, 1, Desc::SQL_DESC_TYPE, SqlDataType::SQL_TYPE_TIMESTAMP as i16) }
        .unwrap();
    let info = desc.info.read().unwrap();
    let record = info.record(0).unwrap();
    assert_eq!(SqlDataType::SQL_TYPE_TIMESTAMP as i16, record.concise_type);
    assert_eq!(SqlDataType::SQL_DATETIME as i16, record.sql_type);
    assert_eq!(definitions::SQL_CODE_TIMESTAMP, record.datetime_interval_code);
}

#[test]
fn writing_beyond_count_grows_the_records() {
    let desc = explicit_desc();
    assert_eq!(0, desc.info.read().unwrap().header.count);
    unsafe { set_small(&desc, 3, Desc::SQL_DESC_PRECISION, 12) }.unwrap();
    let info = desc.info.read().unwrap();
    assert_eq!(3, info.header.count);
    assert_eq!(12, info.record(2).unwrap().precision);
}

#[test]
fn record_index_zero_is_invalid() {
    let desc = explicit_desc();
    let err = unsafe { set_small(&desc, 0, Desc::SQL_DESC_PRECISION, 10) }.unwrap_err();
    assert_eq!("07009", err.get_sql_state());
}

#[test]
fn copy_desc_preserves_target_alloc_type() {
    let source = explicit_desc();
    unsafe {
        set_small(&source, 2, Desc::SQL_DESC_TYPE, SqlDataType::SQL_INTEGER as i16).unwrap();
        let mut size: ULen = 7;
        set_desc_field(
            &source,
            0,
            Desc::SQL_DESC_ARRAY_SIZE,
            (&mut size as *mut ULen).cast(),
            0,
        )
        .unwrap();
    }

    let target = implicit_desc(DescRole::ApplicationRow);
    copy_desc(&source, &target).unwrap();
    let info = target.info.read().unwrap();
    assert_eq!(AllocType::SQL_DESC_ALLOC_AUTO, info.header.alloc_type);
    assert_eq!(7, info.header.array_size);
    assert_eq!(2, info.header.count);
}

#[test]
fn copy_desc_rejects_an_ird_target() {
    let source = explicit_desc();
    let ird = implicit_desc(DescRole::ImplementationRow);
    assert!(copy_desc(&source, &ird).is_err());
}

#[test]
fn array_size_zero_is_rejected() {
    let desc = explicit_desc();
    let mut size: ULen = 0;
    let err = unsafe {
        set_desc_field(
            &desc,
            0,
            Desc::SQL_DESC_ARRAY_SIZE,
            (&mut size as *mut ULen).cast(),
            0,
        )
    }
    .unwrap_err();
    assert_eq!("HY024", err.get_sql_state());
}

#[test]
fn data_ptr_round_trips_through_get() {
    let desc = explicit_desc();
    let mut value: i32 = 0;
    let data_ptr: Pointer = (&mut value as *mut i32).cast();
    unsafe { set_desc_field(&desc, 1, Desc::SQL_DESC_DATA_PTR, data_ptr, 0) }.unwrap();
    match get_desc_field(&desc, 1, Desc::SQL_DESC_DATA_PTR).unwrap() {
        DescFieldValue::Ptr(p) => assert_eq!(data_ptr, p),
        other => panic!("unexpected {other:?}"),
    }
}
