//! The descriptor field surface: SQLGetDescField, SQLSetDescField,
//! SQLGetDescRec, SQLSetDescRec, SQLCopyDesc.

use crate::api::data::i32_len;
use crate::api::util::ptr_safe_write;
use crate::errors::ODBCError;
use crate::handles::definitions::OdbcHandleRef;
use crate::handles::descriptor::{copy_desc, get_desc_field, set_desc_field, DescFieldValue};
use crate::must_be_valid;
use cstr::WideChar;
use definitions::{
    Char, Desc, HDesc, Integer, Len, Nullability, Pointer, SmallInt, SqlReturn, ULen,
};
use num_traits::FromPrimitive;

#[allow(clippy::too_many_arguments)]
unsafe fn get_desc_field_internal(
    handle: OdbcHandleRef,
    rec_number: SmallInt,
    field_identifier: SmallInt,
    value_ptr: Pointer,
    buffer_length: Integer,
    string_length_ptr: *mut Integer,
    wide: bool,
    function_name: &'static str,
) -> SqlReturn {
    let desc = must_be_valid!(handle.as_descriptor());
    let Some(field) = Desc::from_i16(field_identifier) else {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorField(field_identifier, false),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    match get_desc_field(desc, rec_number, field) {
        Ok(DescFieldValue::Small(v)) => {
            ptr_safe_write(value_ptr.cast::<SmallInt>(), v);
            SqlReturn::SUCCESS
        }
        Ok(DescFieldValue::Int(v)) => {
            ptr_safe_write(value_ptr.cast::<Integer>(), v);
            SqlReturn::SUCCESS
        }
        Ok(DescFieldValue::Length(v)) => {
            ptr_safe_write(value_ptr.cast::<Len>(), v);
            SqlReturn::SUCCESS
        }
        Ok(DescFieldValue::ULength(v)) => {
            ptr_safe_write(value_ptr.cast::<ULen>(), v);
            SqlReturn::SUCCESS
        }
        Ok(DescFieldValue::Ptr(v)) => {
            ptr_safe_write(value_ptr.cast::<Pointer>(), v);
            SqlReturn::SUCCESS
        }
        Ok(DescFieldValue::Str(text)) => {
            if wide {
                i32_len::set_output_wstring_as_bytes(
                    &text,
                    value_ptr,
                    buffer_length.max(0) as usize,
                    string_length_ptr,
                )
            } else {
                i32_len::set_output_string(
                    &text,
                    value_ptr.cast::<Char>(),
                    buffer_length.max(0) as usize,
                    string_length_ptr,
                )
            }
        }
        Err(e) => {
            handle.add_diag_info(e, function_name);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLGetDescField(
    descriptor_handle: HDesc,
    rec_number: SmallInt,
    field_identifier: SmallInt,
    value_ptr: Pointer,
    buffer_length: Integer,
    string_length_ptr: *mut Integer,
) -> SqlReturn {
    if descriptor_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(descriptor_handle);
    handle.clear_diagnostics();
    unsafe {
        get_desc_field_internal(
            handle,
            rec_number,
            field_identifier,
            value_ptr,
            buffer_length,
            string_length_ptr,
            false,
            "SQLGetDescField",
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLGetDescFieldW(
    descriptor_handle: HDesc,
    rec_number: SmallInt,
    field_identifier: SmallInt,
    value_ptr: Pointer,
    buffer_length: Integer,
    string_length_ptr: *mut Integer,
) -> SqlReturn {
    if descriptor_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(descriptor_handle);
    handle.clear_diagnostics();
    unsafe {
        get_desc_field_internal(
            handle,
            rec_number,
            field_identifier,
            value_ptr,
            buffer_length,
            string_length_ptr,
            true,
            "SQLGetDescFieldW",
        )
    }
}

unsafe fn set_desc_field_internal(
    handle: OdbcHandleRef,
    rec_number: SmallInt,
    field_identifier: SmallInt,
    value_ptr: Pointer,
    buffer_length: Integer,
    function_name: &'static str,
) -> SqlReturn {
    let desc = must_be_valid!(handle.as_descriptor());
    let Some(field) = Desc::from_i16(field_identifier) else {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorField(field_identifier, false),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    match set_desc_field(desc, rec_number, field, value_ptr, buffer_length) {
        Ok(()) => SqlReturn::SUCCESS,
        Err(e) => {
            handle.add_diag_info(e, function_name);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLSetDescField(
    descriptor_handle: HDesc,
    rec_number: SmallInt,
    field_identifier: SmallInt,
    value_ptr: Pointer,
    buffer_length: Integer,
) -> SqlReturn {
    if descriptor_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(descriptor_handle);
    handle.clear_diagnostics();
    unsafe {
        set_desc_field_internal(
            handle,
            rec_number,
            field_identifier,
            value_ptr,
            buffer_length,
            "SQLSetDescField",
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLSetDescFieldW(
    descriptor_handle: HDesc,
    rec_number: SmallInt,
    field_identifier: SmallInt,
    value_ptr: Pointer,
    buffer_length: Integer,
) -> SqlReturn {
    if descriptor_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(descriptor_handle);
    handle.clear_diagnostics();
    unsafe {
        set_desc_field_internal(
            handle,
            rec_number,
            field_identifier,
            value_ptr,
            buffer_length,
            "SQLSetDescFieldW",
        )
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn get_desc_rec_internal(
    handle: OdbcHandleRef,
    rec_number: SmallInt,
    name: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    type_ptr: *mut SmallInt,
    sub_type_ptr: *mut SmallInt,
    length_ptr: *mut Len,
    precision_ptr: *mut SmallInt,
    scale_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
    wide: bool,
    function_name: &'static str,
) -> SqlReturn {
    let desc = must_be_valid!(handle.as_descriptor());
    if rec_number < 1 {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorIndex(i32::from(rec_number)),
            function_name,
        );
        return SqlReturn::ERROR;
    }
    let info = desc.info.read().unwrap();
    let Some(record) = info.record((rec_number - 1) as usize) else {
        return SqlReturn::NO_DATA;
    };
    ptr_safe_write(type_ptr, record.sql_type);
    ptr_safe_write(sub_type_ptr, record.datetime_interval_code);
    ptr_safe_write(length_ptr, record.octet_length);
    ptr_safe_write(precision_ptr, record.precision);
    ptr_safe_write(scale_ptr, record.scale);
    ptr_safe_write(
        nullable_ptr,
        Nullability::from_i16(record.nullable).map_or(record.nullable, |n| n as i16),
    );
    let record_name = record.name.clone();
    drop(info);
    if wide {
        crate::api::data::i16_len::set_output_wstring(
            &record_name,
            name.cast::<WideChar>(),
            buffer_length.max(0) as usize,
            string_length_ptr,
        )
    } else {
        crate::api::data::i16_len::set_output_string(
            &record_name,
            name.cast::<Char>(),
            buffer_length.max(0) as usize,
            string_length_ptr,
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLGetDescRec(
    descriptor_handle: HDesc,
    rec_number: SmallInt,
    name: *mut Char,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    type_ptr: *mut SmallInt,
    sub_type_ptr: *mut SmallInt,
    length_ptr: *mut Len,
    precision_ptr: *mut SmallInt,
    scale_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    if descriptor_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(descriptor_handle);
    handle.clear_diagnostics();
    unsafe {
        get_desc_rec_internal(
            handle,
            rec_number,
            name.cast(),
            buffer_length,
            string_length_ptr,
            type_ptr,
            sub_type_ptr,
            length_ptr,
            precision_ptr,
            scale_ptr,
            nullable_ptr,
            false,
            "SQLGetDescRec",
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLGetDescRecW(
    descriptor_handle: HDesc,
    rec_number: SmallInt,
    name: *mut WideChar,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    type_ptr: *mut SmallInt,
    sub_type_ptr: *mut SmallInt,
    length_ptr: *mut Len,
    precision_ptr: *mut SmallInt,
    scale_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    if descriptor_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(descriptor_handle);
    handle.clear_diagnostics();
    unsafe {
        get_desc_rec_internal(
            handle,
            rec_number,
            name.cast(),
            buffer_length,
            string_length_ptr,
            type_ptr,
            sub_type_ptr,
            length_ptr,
            precision_ptr,
            scale_ptr,
            nullable_ptr,
            true,
            "SQLGetDescRecW",
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLSetDescRec(
    descriptor_handle: HDesc,
    rec_number: SmallInt,
    desc_type: SmallInt,
    desc_sub_type: SmallInt,
    octet_length: Len,
    precision: SmallInt,
    scale: SmallInt,
    data_ptr: Pointer,
    string_length_ptr: *mut Len,
    indicator_ptr: *mut Len,
) -> SqlReturn {
    if descriptor_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(descriptor_handle);
    handle.clear_diagnostics();
    let desc = must_be_valid!(handle.as_descriptor());
    if rec_number < 1 {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorIndex(i32::from(rec_number)),
            "SQLSetDescRec",
        );
        return SqlReturn::ERROR;
    }
    if desc.is_implementation() && !desc.is_ipd() {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorField(Desc::SQL_DESC_TYPE as i16, true),
            "SQLSetDescRec",
        );
        return SqlReturn::ERROR;
    }
    let mut info = desc.info.write().unwrap();
    let record = info.record_mut((rec_number - 1) as usize);
    if let Err(e) = record.set_sql_type_checked(desc_type) {
        drop(info);
        handle.add_diag_info(e, "SQLSetDescRec");
        return SqlReturn::ERROR;
    }
    record.datetime_interval_code = desc_sub_type;
    record.octet_length = octet_length;
    record.precision = precision;
    record.scale = scale;
    record.data_ptr = data_ptr;
    record.octet_length_ptr = string_length_ptr;
    record.indicator_ptr = indicator_ptr;
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLCopyDesc(source_desc_handle: HDesc, target_desc_handle: HDesc) -> SqlReturn {
    if source_desc_handle.is_null() || target_desc_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let source_handle = OdbcHandleRef::from(source_desc_handle);
    let target_handle = OdbcHandleRef::from(target_desc_handle);
    target_handle.clear_diagnostics();
    let source = must_be_valid!(source_handle.as_descriptor());
    let target = must_be_valid!(target_handle.as_descriptor());
    match copy_desc(source, target) {
        Ok(()) => SqlReturn::SUCCESS,
        Err(e) => {
            target_handle.add_diag_info(e, "SQLCopyDesc");
            SqlReturn::ERROR
        }
    }
}
