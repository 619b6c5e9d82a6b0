//! Rowset fetch: advance the cursor, then scatter the rows into the
//! application buffers described by the ARD. SQLGetData streams the
//! current row's variable-length values through the statement cache.

use crate::api::data::{format_cached_cell, format_cell_value, row_status_for};
use crate::api::util::{aggregate_returns, ptr_safe_write};
use crate::errors::ODBCError;
use crate::handles::definitions::{OdbcHandle, Statement};
use crate::handles::descriptor::DescRecord;
use definitions::{
    CDataType, CursorType, FetchOrientation, Len, Pointer, SqlReturn, ULen, USmallInt,
    SQL_ROW_NOROW,
};
use duckdb_odbc_core::type_info::ColumnMetadata;
use num_traits::FromPrimitive;

/// Rebuild the IRD records from the open cursor's metadata (empty when the
/// statement has no result set).
pub(crate) fn populate_ird(stmt: &Statement) {
    let ird = stmt.ird();
    let mut info = ird.info.write().unwrap();
    info.reset_records();
    let cursor_guard = stmt.cursor.read().unwrap();
    let Some(cursor) = cursor_guard.as_ref() else {
        return;
    };
    for (i, md) in cursor.metadata().iter().enumerate() {
        fill_record_from_metadata(info.record_mut(i), md);
    }
}

/// IRD records for a prepared-but-not-executed statement, derived from the
/// prepare-time column shape.
pub(crate) fn populate_ird_from_shape(stmt: &Statement, metadata: &[ColumnMetadata]) {
    let ird = stmt.ird();
    let mut info = ird.info.write().unwrap();
    info.reset_records();
    for (i, md) in metadata.iter().enumerate() {
        fill_record_from_metadata(info.record_mut(i), md);
    }
}

pub(crate) fn fill_record_from_metadata(record: &mut DescRecord, md: &ColumnMetadata) {
    record.concise_type = md.sql_type as i16;
    record.sql_type = md.non_concise_type as i16;
    record.datetime_interval_code = md.sql_code.unwrap_or(0);
    record.precision = md.precision.unwrap_or(0);
    record.scale = md.scale.unwrap_or(0);
    record.length = md.column_size.unwrap_or(0).max(0) as ULen;
    record.octet_length = md.octet_length.unwrap_or(0) as Len;
    record.display_size = md.display_size.unwrap_or(0) as Len;
    record.nullable = md.nullability as i16;
    record.case_sensitive = md.is_case_sensitive;
    record.unsigned = md.is_unsigned;
    record.searchable = md.searchable;
    record.fixed_prec_scale = md.fixed_prec_scale;
    record.literal_prefix = md.literal_prefix.unwrap_or("").to_string();
    record.literal_suffix = md.literal_suffix.unwrap_or("").to_string();
    record.type_name = md.type_name.clone();
    record.local_type_name = md.type_name.clone();
    record.name = md.name.clone();
    record.label = md.label.clone();
    record.base_column_name = md.base_column_name.clone();
    record.base_table_name = md.base_table_name.clone();
    record.table_name = md.table_name.clone();
    record.catalog_name = md.catalog_name.clone();
    record.schema_name = md.schema_name.clone();
    record.unnamed = if md.name.is_empty() {
        definitions::SQL_UNNAMED
    } else {
        definitions::SQL_NAMED
    };
}

/// Fetch one rowset. Implements both SQLFetch (NEXT) and SQLFetchScroll.
///
/// # Safety
/// Writes the application buffers described by the ARD records.
pub(crate) unsafe fn fetch_rowset(
    handle: &OdbcHandle,
    stmt: &Statement,
    orientation: FetchOrientation,
    offset: isize,
    function_name: &'static str,
) -> SqlReturn {
    {
        let cursor_guard = stmt.cursor.read().unwrap();
        if cursor_guard.is_none() {
            handle.add_diag_info(
                ODBCError::FunctionSequenceError(function_name),
                function_name,
            );
            return SqlReturn::ERROR;
        }
    }

    let forward_only = {
        let attributes = stmt.attributes.read().unwrap();
        matches!(attributes.cursor_type, CursorType::SQL_CURSOR_FORWARD_ONLY)
    };
    if forward_only && orientation != FetchOrientation::SQL_FETCH_NEXT {
        handle.add_diag_info(ODBCError::CursorNotScrollable, function_name);
        return SqlReturn::ERROR;
    }

    let ard = stmt.ard();
    let (array_size, bind_type, bind_offset_ptr, ard_records) = {
        let info = ard.info.read().unwrap();
        (
            info.header.array_size.max(1),
            info.header.bind_type,
            info.header.bind_offset_ptr,
            info.records.clone(),
        )
    };
    let bind_offset: isize = if bind_offset_ptr.is_null() {
        0
    } else {
        *bind_offset_ptr
    };
    let ird = stmt.ird();
    let (row_status_ptr, rows_fetched_ptr) = {
        let info = ird.info.read().unwrap();
        (info.header.array_status_ptr, info.header.rows_processed_ptr)
    };

    // fresh row, fresh streaming state
    *stmt.var_data_cache.write().unwrap() = Some(std::collections::HashMap::new());

    let mut cursor_guard = stmt.cursor.write().unwrap();
    let cursor = cursor_guard.as_mut().expect("cursor checked above");

    let start = match cursor.seek(orientation, offset, array_size) {
        Ok(Some(start)) => start,
        Ok(None) => {
            ptr_safe_write(rows_fetched_ptr, 0);
            if !row_status_ptr.is_null() {
                for i in 0..array_size {
                    *row_status_ptr.add(i) = SQL_ROW_NOROW;
                }
            }
            return SqlReturn::NO_DATA;
        }
        Err(e) => {
            handle.add_diag_info(ODBCError::Core(e), function_name);
            return SqlReturn::ERROR;
        }
    };

    let mut overall = SqlReturn::SUCCESS;
    let mut rows_fetched: ULen = 0;

    for i in 0..array_size {
        let available = match cursor.has_row(start + i) {
            Ok(available) => available,
            Err(e) => {
                handle.add_diag_info(ODBCError::Core(e), function_name);
                return SqlReturn::ERROR;
            }
        };
        if !available {
            if !row_status_ptr.is_null() {
                for j in i..array_size {
                    *row_status_ptr.add(j) = SQL_ROW_NOROW;
                }
            }
            break;
        }
        let row = cursor
            .row(start + i)
            .expect("row was ensured available")
            .clone();
        rows_fetched += 1;

        let mut row_ret = SqlReturn::SUCCESS;
        for (col_index, record) in ard_records.iter().enumerate() {
            if record.data_ptr.is_null() {
                continue;
            }
            let Some(value) = row.get(col_index) else {
                continue;
            };
            let target_type = CDataType::from_i16(record.concise_type)
                .unwrap_or(CDataType::SQL_C_DEFAULT);
            let elem_size = element_size(record, target_type);
            let data_ptr: Pointer = record
                .data_ptr
                .cast::<u8>()
                .offset(bind_offset)
                .add(i * if bind_type > 0 { bind_type } else { elem_size })
                .cast();
            let ind_ptr = offset_indicator(record.indicator_ptr, bind_offset, i, bind_type);
            let cell_ret = format_cell_value(
                handle,
                (col_index + 1) as USmallInt,
                value.clone(),
                target_type,
                data_ptr,
                record.octet_length,
                ind_ptr,
                function_name,
            );
            row_ret = aggregate_returns(row_ret, cell_ret);
        }
        if !row_status_ptr.is_null() {
            *row_status_ptr.add(i) = row_status_for(row_ret);
        }
        overall = aggregate_returns(overall, row_ret);
    }

    ptr_safe_write(rows_fetched_ptr, rows_fetched);
    // scatter state is not GetData state; start streaming from scratch
    *stmt.var_data_cache.write().unwrap() = Some(std::collections::HashMap::new());

    if rows_fetched == 0 {
        return SqlReturn::NO_DATA;
    }
    overall
}

fn element_size(record: &DescRecord, target_type: CDataType) -> usize {
    target_type
        .fixed_size()
        .unwrap_or_else(|| record.octet_length.max(1) as usize)
}

unsafe fn offset_indicator(
    base: *mut Len,
    bind_offset: isize,
    index: usize,
    bind_type: ULen,
) -> *mut Len {
    if base.is_null() {
        return base;
    }
    let stride = if bind_type > 0 {
        bind_type
    } else {
        std::mem::size_of::<Len>()
    };
    base.cast::<u8>()
        .offset(bind_offset)
        .add(index * stride)
        .cast()
}

/// SQLGetData: stream (or convert) one column of the current row.
///
/// # Safety
/// Writes through application pointers.
pub(crate) unsafe fn get_data(
    handle: &OdbcHandle,
    stmt: &Statement,
    col_number: USmallInt,
    target_type: CDataType,
    target_value_ptr: Pointer,
    buffer_len: Len,
    str_len_or_ind_ptr: *mut Len,
    function_name: &'static str,
) -> SqlReturn {
    let (value, column_count) = {
        let cursor_guard = stmt.cursor.read().unwrap();
        let Some(cursor) = cursor_guard.as_ref() else {
            handle.add_diag_info(ODBCError::InvalidCursorState, function_name);
            return SqlReturn::ERROR;
        };
        let Some(row_index) = cursor.rowset_start() else {
            handle.add_diag_info(ODBCError::InvalidCursorState, function_name);
            return SqlReturn::ERROR;
        };
        let column_count = cursor.column_count();
        let value = cursor
            .row(row_index)
            .and_then(|row| row.get((col_number as usize).wrapping_sub(1)))
            .cloned();
        (value, column_count)
    };

    if col_number < 1 || col_number as usize > column_count {
        handle.add_diag_info(
            ODBCError::InvalidDescriptorIndex(i32::from(col_number)),
            function_name,
        );
        return SqlReturn::ERROR;
    }
    let Some(value) = value else {
        handle.add_diag_info(ODBCError::InvalidCursorState, function_name);
        return SqlReturn::ERROR;
    };

    // switching to a different column resets the streaming state
    let cached = {
        let mut cache_guard = stmt.var_data_cache.write().unwrap();
        let cache = cache_guard.get_or_insert_with(std::collections::HashMap::new);
        cache.retain(|col, _| *col == col_number);
        cache.remove(&col_number)
    };

    match cached {
        Some(cached) => format_cached_cell(
            handle,
            cached,
            col_number,
            target_type,
            target_value_ptr,
            buffer_len,
            str_len_or_ind_ptr,
            function_name,
        ),
        None => format_cell_value(
            handle,
            col_number,
            value,
            target_type,
            target_value_ptr,
            buffer_len,
            str_len_or_ind_ptr,
            function_name,
        ),
    }
}
