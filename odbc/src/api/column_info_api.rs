//! Result-set and parameter shape: SQLNumResultCols, SQLRowCount,
//! SQLDescribeCol, SQLColAttribute, SQLNumParams, SQLDescribeParam.

use crate::api::data::i16_len;
use crate::api::util::ptr_safe_write;
use crate::errors::ODBCError;
use crate::handles::definitions::{OdbcHandleRef, Statement};
use crate::handles::descriptor::DescRecord;
use crate::must_be_valid;
use cstr::WideChar;
use definitions::{
    Char, Desc, HStmt, Len, Nullability, Pointer, SmallInt, SqlReturn, ULen, USmallInt,
};
use num_traits::FromPrimitive;

fn ird_record(stmt: &Statement, column_number: USmallInt) -> Option<DescRecord> {
    let ird = stmt.ird();
    let info = ird.info.read().unwrap();
    info.record((column_number as usize).checked_sub(1)?).cloned()
}

fn ipd_record(stmt: &Statement, param_number: USmallInt) -> Option<DescRecord> {
    let ipd = stmt.ipd();
    let info = ipd.info.read().unwrap();
    info.record((param_number as usize).checked_sub(1)?).cloned()
}

#[no_mangle]
pub extern "C" fn SQLNumResultCols(
    statement_handle: HStmt,
    column_count_ptr: *mut SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    let count = stmt.ird().info.read().unwrap().header.count;
    unsafe { ptr_safe_write(column_count_ptr, count) };
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLRowCount(statement_handle: HStmt, row_count_ptr: *mut Len) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    // -1 for statements that do not change rows (selects)
    let count = stmt.row_count.read().unwrap().unwrap_or(-1);
    unsafe { ptr_safe_write(row_count_ptr, count as Len) };
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLNumParams(statement_handle: HStmt, param_count_ptr: *mut SmallInt) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    let stmt = must_be_valid!(handle.as_statement());
    let count = stmt.ipd().info.read().unwrap().header.count;
    unsafe { ptr_safe_write(param_count_ptr, count) };
    SqlReturn::SUCCESS
}

#[allow(clippy::too_many_arguments)]
unsafe fn describe_col_internal(
    handle: OdbcHandleRef,
    column_number: USmallInt,
    wide: bool,
    column_name: Pointer,
    buffer_length: SmallInt,
    name_length_ptr: *mut SmallInt,
    data_type_ptr: *mut SmallInt,
    column_size_ptr: *mut ULen,
    decimal_digits_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    let Some(record) = ird_record(stmt, column_number) else {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorIndex(i32::from(column_number)),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    ptr_safe_write(data_type_ptr, record.concise_type);
    ptr_safe_write(column_size_ptr, record.length);
    ptr_safe_write(decimal_digits_ptr, record.scale);
    ptr_safe_write(
        nullable_ptr,
        Nullability::from_i16(record.nullable).map_or(record.nullable, |n| n as i16),
    );
    let ret = if wide {
        i16_len::set_output_wstring(
            &record.name,
            column_name.cast::<WideChar>(),
            buffer_length.max(0) as usize,
            name_length_ptr,
        )
    } else {
        i16_len::set_output_string(
            &record.name,
            column_name.cast::<Char>(),
            buffer_length.max(0) as usize,
            name_length_ptr,
        )
    };
    if ret == SqlReturn::SUCCESS_WITH_INFO {
        handle.add_diag_info(
            ODBCError::OutStringTruncated(buffer_length.max(0) as usize),
            function_name,
        );
    }
    ret
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLDescribeCol(
    statement_handle: HStmt,
    column_number: USmallInt,
    column_name: *mut Char,
    buffer_length: SmallInt,
    name_length_ptr: *mut SmallInt,
    data_type_ptr: *mut SmallInt,
    column_size_ptr: *mut ULen,
    decimal_digits_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        describe_col_internal(
            handle,
            column_number,
            false,
            column_name.cast(),
            buffer_length,
            name_length_ptr,
            data_type_ptr,
            column_size_ptr,
            decimal_digits_ptr,
            nullable_ptr,
            "SQLDescribeCol",
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLDescribeColW(
    statement_handle: HStmt,
    column_number: USmallInt,
    column_name: *mut WideChar,
    buffer_length: SmallInt,
    name_length_ptr: *mut SmallInt,
    data_type_ptr: *mut SmallInt,
    column_size_ptr: *mut ULen,
    decimal_digits_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        describe_col_internal(
            handle,
            column_number,
            true,
            column_name.cast(),
            buffer_length,
            name_length_ptr,
            data_type_ptr,
            column_size_ptr,
            decimal_digits_ptr,
            nullable_ptr,
            "SQLDescribeColW",
        )
    }
}

fn col_attr_string(record: &DescRecord, field: Desc) -> Option<&str> {
    Some(match field {
        Desc::SQL_DESC_BASE_COLUMN_NAME => &record.base_column_name,
        Desc::SQL_DESC_BASE_TABLE_NAME => &record.base_table_name,
        Desc::SQL_DESC_CATALOG_NAME => &record.catalog_name,
        Desc::SQL_DESC_LABEL => &record.label,
        Desc::SQL_DESC_LITERAL_PREFIX => &record.literal_prefix,
        Desc::SQL_DESC_LITERAL_SUFFIX => &record.literal_suffix,
        Desc::SQL_DESC_LOCAL_TYPE_NAME => &record.local_type_name,
        Desc::SQL_DESC_NAME => &record.name,
        Desc::SQL_DESC_SCHEMA_NAME => &record.schema_name,
        Desc::SQL_DESC_TABLE_NAME => &record.table_name,
        Desc::SQL_DESC_TYPE_NAME => &record.type_name,
        _ => return None,
    })
}

fn col_attr_numeric(stmt: &Statement, record: &DescRecord, field: Desc) -> Option<Len> {
    Some(match field {
        Desc::SQL_DESC_AUTO_UNIQUE_VALUE => Len::from(record.auto_unique_value),
        Desc::SQL_DESC_CASE_SENSITIVE => Len::from(record.case_sensitive),
        Desc::SQL_DESC_CONCISE_TYPE => Len::from(record.concise_type),
        Desc::SQL_DESC_TYPE => Len::from(record.sql_type),
        Desc::SQL_DESC_DATETIME_INTERVAL_CODE => Len::from(record.datetime_interval_code),
        Desc::SQL_DESC_DATETIME_INTERVAL_PRECISION => {
            record.datetime_interval_precision as Len
        }
        Desc::SQL_DESC_COUNT => stmt.ird().info.read().unwrap().header.count as Len,
        Desc::SQL_DESC_DISPLAY_SIZE => record.display_size,
        Desc::SQL_DESC_FIXED_PREC_SCALE => Len::from(record.fixed_prec_scale),
        Desc::SQL_DESC_LENGTH => record.length as Len,
        Desc::SQL_DESC_NULLABLE => Len::from(record.nullable),
        Desc::SQL_DESC_NUM_PREC_RADIX => record.num_prec_radix as Len,
        Desc::SQL_DESC_OCTET_LENGTH => record.octet_length,
        Desc::SQL_DESC_PRECISION => Len::from(record.precision),
        Desc::SQL_DESC_SCALE => Len::from(record.scale),
        Desc::SQL_DESC_SEARCHABLE => record.searchable as Len,
        Desc::SQL_DESC_UNNAMED => Len::from(record.unnamed),
        Desc::SQL_DESC_UNSIGNED => Len::from(record.unsigned),
        Desc::SQL_DESC_UPDATABLE => record.updatable as Len,
        _ => return None,
    })
}

#[allow(clippy::too_many_arguments)]
unsafe fn col_attribute_internal(
    handle: OdbcHandleRef,
    column_number: USmallInt,
    field_identifier: USmallInt,
    wide: bool,
    character_attribute_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    numeric_attribute_ptr: *mut Len,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    let Some(field) = Desc::from_u16(field_identifier) else {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorField(field_identifier as i16, false),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    if field == Desc::SQL_DESC_COUNT {
        let count = stmt.ird().info.read().unwrap().header.count;
        ptr_safe_write(numeric_attribute_ptr, Len::from(count));
        return SqlReturn::SUCCESS;
    }
    let Some(record) = ird_record(stmt, column_number) else {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorIndex(i32::from(column_number)),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    if let Some(text) = col_attr_string(&record, field) {
        // W entrypoints take the buffer length in characters and report
        // the length in bytes
        let ret = if wide {
            i16_len::set_output_wstring_byte_len(
                text,
                character_attribute_ptr,
                buffer_length.max(0) as usize,
                string_length_ptr,
            )
        } else {
            i16_len::set_output_string(
                text,
                character_attribute_ptr.cast::<Char>(),
                buffer_length.max(0) as usize,
                string_length_ptr,
            )
        };
        if ret == SqlReturn::SUCCESS_WITH_INFO {
            handle.add_diag_info(
                ODBCError::OutStringTruncated(buffer_length.max(0) as usize),
                function_name,
            );
        }
        return ret;
    }
    if let Some(value) = col_attr_numeric(stmt, &record, field) {
        ptr_safe_write(numeric_attribute_ptr, value);
        return SqlReturn::SUCCESS;
    }
    handle.add_diag_info(
        ODBCError::InvalidDescriptorField(field as i16, false),
        function_name,
    );
    SqlReturn::ERROR
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLColAttribute(
    statement_handle: HStmt,
    column_number: USmallInt,
    field_identifier: USmallInt,
    character_attribute_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    numeric_attribute_ptr: *mut Len,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        col_attribute_internal(
            handle,
            column_number,
            field_identifier,
            false,
            character_attribute_ptr,
            buffer_length,
            string_length_ptr,
            numeric_attribute_ptr,
            "SQLColAttribute",
        )
    }
}

#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn SQLColAttributeW(
    statement_handle: HStmt,
    column_number: USmallInt,
    field_identifier: USmallInt,
    character_attribute_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    numeric_attribute_ptr: *mut Len,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        col_attribute_internal(
            handle,
            column_number,
            field_identifier,
            true,
            character_attribute_ptr,
            buffer_length,
            string_length_ptr,
            numeric_attribute_ptr,
            "SQLColAttributeW",
        )
    }
}

unsafe fn describe_param_internal(
    handle: OdbcHandleRef,
    parameter_number: USmallInt,
    data_type_ptr: *mut SmallInt,
    parameter_size_ptr: *mut ULen,
    decimal_digits_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = must_be_valid!(handle.as_statement());
    let Some(record) = ipd_record(stmt, parameter_number) else {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorIndex(i32::from(parameter_number)),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    ptr_safe_write(data_type_ptr, record.concise_type);
    ptr_safe_write(parameter_size_ptr, record.length);
    ptr_safe_write(decimal_digits_ptr, record.scale);
    ptr_safe_write(nullable_ptr, record.nullable);
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLDescribeParam(
    statement_handle: HStmt,
    parameter_number: USmallInt,
    data_type_ptr: *mut SmallInt,
    parameter_size_ptr: *mut ULen,
    decimal_digits_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    if statement_handle.is_null() {
        return SqlReturn::INVALID_HANDLE;
    }
    let handle = OdbcHandleRef::from(statement_handle);
    handle.clear_diagnostics();
    unsafe {
        describe_param_internal(
            handle,
            parameter_number,
            data_type_ptr,
            parameter_size_ptr,
            decimal_digits_ptr,
            nullable_ptr,
            "SQLDescribeParam",
        )
    }
}
