//! Parameter marshaling: bound application buffers become engine parameter
//! vectors at execute time, one vector per parameter set.

use crate::errors::ODBCError;
use crate::handles::definitions::{OdbcHandle, ParamsAtExec, Statement, StatementState};
use crate::handles::descriptor::DescRecord;
use cstr::{input_text_to_string_a, input_text_to_string_w, utf16_to_utf8_lenient, WideChar};
use definitions::{
    CDataType, Date, DaySecond, IntervalStruct, Len, Numeric, ParamType, Pointer, SmallInt,
    SqlDataType, SqlReturn, Time, Timestamp, ULen, USmallInt, YearMonth, SQL_DATA_AT_EXEC,
    SQL_IS_DAY, SQL_IS_DAY_TO_HOUR, SQL_IS_DAY_TO_MINUTE, SQL_IS_DAY_TO_SECOND, SQL_IS_HOUR,
    SQL_IS_HOUR_TO_MINUTE, SQL_IS_HOUR_TO_SECOND, SQL_IS_MINUTE, SQL_IS_MINUTE_TO_SECOND,
    SQL_IS_MONTH, SQL_IS_SECOND, SQL_IS_YEAR, SQL_IS_YEAR_TO_MONTH, SQL_LEN_DATA_AT_EXEC_OFFSET,
    SQL_NTS, SQL_NULL_DATA, SQL_PARAM_ERROR, SQL_PARAM_SUCCESS,
};
use duckdb_odbc_core::{
    decimal::magnitude_from_le_bytes, EngineCursor, EngineValue, TimeUnit,
};
use num_traits::FromPrimitive;
use std::collections::{HashMap, VecDeque};

type Result<T> = std::result::Result<T, ODBCError>;

const MICROS_PER_SEC: i64 = 1_000_000;

/// SQLBindParameter: validate, then fill the IPD and APD records.
pub(crate) unsafe fn bind_parameter(
    stmt: &Statement,
    parameter_number: USmallInt,
    input_output_type: i16,
    value_type: i16,
    parameter_type: i16,
    column_size: ULen,
    decimal_digits: SmallInt,
    parameter_value_ptr: Pointer,
    buffer_length: Len,
    str_len_or_ind_ptr: *mut Len,
) -> Result<()> {
    if parameter_number < 1 {
        return Err(ODBCError::InvalidDescriptorIndex(i32::from(
            parameter_number,
        )));
    }
    match ParamType::from_i16(input_output_type) {
        Some(ParamType::SQL_PARAM_INPUT) => {}
        _ => return Err(ODBCError::Unimplemented("output parameters")),
    }
    if CDataType::from_i16(value_type).is_none() {
        return Err(ODBCError::InvalidAttrValue(format!(
            "value type {value_type}"
        )));
    }

    let index = (parameter_number - 1) as usize;

    {
        let ipd = stmt.ipd();
        let mut info = ipd.info.write().unwrap();
        let record = info.record_mut(index);
        record.set_sql_type_checked(parameter_type)?;
        record.parameter_type = ParamType::SQL_PARAM_INPUT as i16;
        if column_size > 0 {
            record.length = column_size;
            record.precision = column_size as i16;
        }
        record.scale = decimal_digits;
    }

    {
        let apd = stmt.apd();
        let mut info = apd.info.write().unwrap();
        let record = info.record_mut(index);
        record.concise_type = value_type;
        record.data_ptr = parameter_value_ptr;
        record.octet_length = buffer_length;
        record.octet_length_ptr = str_len_or_ind_ptr;
        record.indicator_ptr = str_len_or_ind_ptr;
    }
    Ok(())
}

pub(crate) enum GatherOutcome {
    Values(Vec<EngineValue>),
    /// Ordinals of data-at-exec parameters still missing their data.
    NeedData(VecDeque<USmallInt>),
}

fn param_stride(record: &DescRecord, bind_type: ULen) -> usize {
    if bind_type > 0 {
        return bind_type;
    }
    CDataType::from_i16(record.concise_type)
        .and_then(|t| t.fixed_size())
        .unwrap_or_else(|| record.octet_length.max(0) as usize)
}

unsafe fn offset_ptr(base: Pointer, bind_offset: isize, index: usize, stride: usize) -> Pointer {
    if base.is_null() {
        return base;
    }
    base.cast::<u8>()
        .offset(bind_offset)
        .add(index * stride)
        .cast()
}

unsafe fn offset_len_ptr(
    base: *mut Len,
    bind_offset: isize,
    index: usize,
    bind_type: ULen,
) -> *mut Len {
    if base.is_null() {
        return base;
    }
    // row-wise layouts stride by the row size, column-wise by the element
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

/// Assemble the parameter vector for one parameter set, applying the bind
/// offset and array stride of the APD.
pub(crate) unsafe fn gather_parameter_set(
    stmt: &Statement,
    set_index: usize,
    collected: &HashMap<USmallInt, Vec<u8>>,
) -> Result<GatherOutcome> {
    let apd = stmt.apd();
    let ipd = stmt.ipd();
    let apd_info = apd.info.read().unwrap();
    let ipd_info = ipd.info.read().unwrap();

    let param_count = apd_info.header.count.max(ipd_info.header.count).max(0) as usize;
    let bind_offset = if apd_info.header.bind_offset_ptr.is_null() {
        0
    } else {
        *apd_info.header.bind_offset_ptr
    };
    let bind_type = apd_info.header.bind_type;

    let mut values = Vec::with_capacity(param_count);
    let mut need_data = VecDeque::new();

    for ordinal in 1..=param_count {
        let Some(apd_record) = apd_info.record(ordinal - 1) else {
            return Err(ODBCError::InvalidDescriptorIndex(ordinal as i32));
        };
        let ipd_record = ipd_info.record(ordinal - 1);
        let sql_type = ipd_record.map_or(SqlDataType::SQL_UNKNOWN_TYPE as i16, |r| r.concise_type);

        if let Some(bytes) = collected.get(&(ordinal as USmallInt)) {
            values.push(streamed_param_value(apd_record, sql_type, bytes)?);
            continue;
        }

        let stride = param_stride(apd_record, bind_type);
        let indicator_ptr =
            offset_len_ptr(apd_record.indicator_ptr, bind_offset, set_index, bind_type);
        let octet_length_ptr =
            offset_len_ptr(apd_record.octet_length_ptr, bind_offset, set_index, bind_type);
        let indicator = if indicator_ptr.is_null() { SQL_NTS } else { *indicator_ptr };
        let octet_length = if octet_length_ptr.is_null() {
            indicator
        } else {
            *octet_length_ptr
        };

        if indicator == SQL_NULL_DATA {
            values.push(EngineValue::Null);
            continue;
        }
        if indicator == SQL_DATA_AT_EXEC || indicator <= SQL_LEN_DATA_AT_EXEC_OFFSET {
            need_data.push_back(ordinal as USmallInt);
            // placeholder; replaced once PutData supplies the bytes
            values.push(EngineValue::Null);
            continue;
        }

        let data_ptr = offset_ptr(apd_record.data_ptr, bind_offset, set_index, stride);
        if data_ptr.is_null() {
            return Err(ODBCError::InvalidDescriptorIndex(ordinal as i32));
        }
        values.push(read_param_value(
            apd_record,
            sql_type,
            data_ptr,
            octet_length,
        )?);
    }

    if need_data.is_empty() {
        Ok(GatherOutcome::Values(values))
    } else {
        Ok(GatherOutcome::NeedData(need_data))
    }
}

/// A data-at-exec parameter whose chunks were accumulated by SQLPutData.
fn streamed_param_value(
    apd_record: &DescRecord,
    sql_type: i16,
    bytes: &[u8],
) -> Result<EngineValue> {
    let c_type = CDataType::from_i16(apd_record.concise_type)
        .ok_or_else(|| ODBCError::InvalidAttrValue(format!("{}", apd_record.concise_type)))?;
    let value = match c_type {
        CDataType::SQL_C_BINARY => EngineValue::Blob(bytes.to_vec()),
        CDataType::SQL_C_WCHAR => {
            let units: Vec<WideChar> = bytes
                .chunks_exact(2)
                .map(|c| WideChar::from_le_bytes([c[0], c[1]]))
                .collect();
            let (utf8, _) = utf16_to_utf8_lenient(&units);
            EngineValue::Varchar(String::from_utf8_lossy(&utf8).into_owned())
        }
        _ => EngineValue::Varchar(String::from_utf8_lossy(bytes).into_owned()),
    };
    adapt_to_sql_type(value, sql_type)
}

/// Read one parameter value from an application buffer.
///
/// # Safety
/// `data_ptr` must point at a live buffer of the bound C type.
pub(crate) unsafe fn read_param_value(
    apd_record: &DescRecord,
    sql_type: i16,
    data_ptr: Pointer,
    octet_length: Len,
) -> Result<EngineValue> {
    let c_type = CDataType::from_i16(apd_record.concise_type)
        .ok_or_else(|| ODBCError::InvalidAttrValue(format!("{}", apd_record.concise_type)))?;
    let value = match c_type {
        CDataType::SQL_C_BIT => EngineValue::Boolean(*data_ptr.cast::<u8>() != 0),
        CDataType::SQL_C_STINYINT => EngineValue::TinyInt(*data_ptr.cast::<i8>()),
        CDataType::SQL_C_UTINYINT => EngineValue::UTinyInt(*data_ptr.cast::<u8>()),
        CDataType::SQL_C_SSHORT => EngineValue::SmallInt(*data_ptr.cast::<i16>()),
        CDataType::SQL_C_USHORT => EngineValue::USmallInt(*data_ptr.cast::<u16>()),
        CDataType::SQL_C_SLONG => EngineValue::Integer(*data_ptr.cast::<i32>()),
        CDataType::SQL_C_ULONG => EngineValue::UInteger(*data_ptr.cast::<u32>()),
        CDataType::SQL_C_SBIGINT => EngineValue::BigInt(*data_ptr.cast::<i64>()),
        CDataType::SQL_C_UBIGINT => EngineValue::UBigInt(*data_ptr.cast::<u64>()),
        CDataType::SQL_C_FLOAT => EngineValue::Float(*data_ptr.cast::<f32>()),
        CDataType::SQL_C_DOUBLE => EngineValue::Double(*data_ptr.cast::<f64>()),
        CDataType::SQL_C_NUMERIC => {
            let numeric = *data_ptr.cast::<Numeric>();
            let magnitude = magnitude_from_le_bytes(&numeric.val);
            if magnitude > i128::MAX as u128 {
                return Err(ODBCError::IntegralTruncation(magnitude.to_string()));
            }
            let mut value = magnitude as i128;
            if numeric.sign == 0 {
                value = -value;
            }
            EngineValue::Decimal {
                value,
                width: numeric.precision,
                scale: numeric.scale.max(0) as u8,
            }
        }
        CDataType::SQL_C_CHAR => {
            let s = input_text_to_string_a(data_ptr.cast(), octet_length);
            EngineValue::Varchar(s)
        }
        CDataType::SQL_C_WCHAR => {
            let len = if octet_length < 0 {
                octet_length
            } else {
                octet_length / std::mem::size_of::<WideChar>() as isize
            };
            let s = input_text_to_string_w(data_ptr.cast(), len);
            EngineValue::Varchar(s)
        }
        CDataType::SQL_C_BINARY => {
            let len = octet_length.max(0) as usize;
            EngineValue::Blob(std::slice::from_raw_parts(data_ptr.cast::<u8>(), len).to_vec())
        }
        CDataType::SQL_C_DATE | CDataType::SQL_C_TYPE_DATE => {
            let date = *data_ptr.cast::<Date>();
            EngineValue::Date {
                days: days_from_civil(date.year, date.month, date.day)?,
            }
        }
        CDataType::SQL_C_TIME | CDataType::SQL_C_TYPE_TIME => {
            let time = *data_ptr.cast::<Time>();
            EngineValue::Time {
                micros: (i64::from(time.hour) * 3600
                    + i64::from(time.minute) * 60
                    + i64::from(time.second))
                    * MICROS_PER_SEC,
            }
        }
        CDataType::SQL_C_TIMESTAMP | CDataType::SQL_C_TYPE_TIMESTAMP => {
            let ts = *data_ptr.cast::<Timestamp>();
            let days = days_from_civil(ts.year, ts.month, ts.day)?;
            let seconds = i64::from(days) * 86_400
                + i64::from(ts.hour) * 3600
                + i64::from(ts.minute) * 60
                + i64::from(ts.second);
            // the struct fraction is nanoseconds
            EngineValue::Timestamp {
                value: seconds * MICROS_PER_SEC + i64::from(ts.fraction / 1_000),
                unit: TimeUnit::Microsecond,
            }
        }
        CDataType::SQL_C_INTERVAL_YEAR
        | CDataType::SQL_C_INTERVAL_MONTH
        | CDataType::SQL_C_INTERVAL_DAY
        | CDataType::SQL_C_INTERVAL_HOUR
        | CDataType::SQL_C_INTERVAL_MINUTE
        | CDataType::SQL_C_INTERVAL_SECOND
        | CDataType::SQL_C_INTERVAL_YEAR_TO_MONTH
        | CDataType::SQL_C_INTERVAL_DAY_TO_HOUR
        | CDataType::SQL_C_INTERVAL_DAY_TO_MINUTE
        | CDataType::SQL_C_INTERVAL_DAY_TO_SECOND
        | CDataType::SQL_C_INTERVAL_HOUR_TO_MINUTE
        | CDataType::SQL_C_INTERVAL_HOUR_TO_SECOND
        | CDataType::SQL_C_INTERVAL_MINUTE_TO_SECOND => {
            interval_value(*data_ptr.cast::<IntervalStruct>())?
        }
        other => {
            return Err(ODBCError::RestrictedDataType(
                "parameter",
                format!("{other:?}"),
            ))
        }
    };
    adapt_to_sql_type(value, sql_type)
}

/// Decode the ODBC interval struct per its subcode into the engine's
/// months/days/micros form.
unsafe fn interval_value(interval: IntervalStruct) -> Result<EngineValue> {
    let sign = if interval.interval_sign != 0 { -1i64 } else { 1i64 };
    let (months, days, micros) = match interval.interval_type {
        SQL_IS_YEAR | SQL_IS_MONTH | SQL_IS_YEAR_TO_MONTH => {
            let YearMonth { year, month } = interval.interval_value.year_month;
            (i64::from(year) * 12 + i64::from(month), 0i64, 0i64)
        }
        SQL_IS_DAY | SQL_IS_HOUR | SQL_IS_MINUTE | SQL_IS_SECOND | SQL_IS_DAY_TO_HOUR
        | SQL_IS_DAY_TO_MINUTE | SQL_IS_DAY_TO_SECOND | SQL_IS_HOUR_TO_MINUTE
        | SQL_IS_HOUR_TO_SECOND | SQL_IS_MINUTE_TO_SECOND => {
            let DaySecond {
                day,
                hour,
                minute,
                second,
                fraction,
            } = interval.interval_value.day_second;
            let micros = (i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second))
                * MICROS_PER_SEC
                + i64::from(fraction) / 1_000;
            (0i64, i64::from(day), micros)
        }
        other => {
            return Err(ODBCError::RestrictedDataType(
                "INTERVAL",
                format!("subcode {other}"),
            ))
        }
    };
    Ok(EngineValue::Interval {
        months: (sign * months) as i32,
        days: (sign * days) as i32,
        micros: sign * micros,
    })
}

/// Nudge the C-typed value toward the SQL type the statement expects; the
/// engine performs the final cast.
fn adapt_to_sql_type(value: EngineValue, sql_type: i16) -> Result<EngineValue> {
    use crate::api::data::IntoCData;
    let adapted = match SqlDataType::from_i16(sql_type) {
        Some(SqlDataType::SQL_NUMERIC) | Some(SqlDataType::SQL_DECIMAL) => match value {
            v @ EngineValue::Decimal { .. } => v,
            v => {
                let (decimal, scale) = v.to_decimal()?;
                EngineValue::Decimal {
                    value: decimal,
                    width: duckdb_odbc_core::decimal::digit_count(decimal),
                    scale,
                }
            }
        },
        Some(SqlDataType::SQL_DOUBLE) | Some(SqlDataType::SQL_FLOAT)
        | Some(SqlDataType::SQL_REAL) => match value {
            v @ (EngineValue::Double(_) | EngineValue::Float(_)) => v,
            v => EngineValue::Double(v.to_f64()?.0),
        },
        Some(SqlDataType::SQL_TYPE_DATE) => match value {
            v @ EngineValue::Date { .. } => v,
            EngineValue::Varchar(s) => EngineValue::Varchar(s),
            v => v,
        },
        _ => value,
    };
    Ok(adapted)
}

fn days_from_civil(year: i16, month: u16, day: u16) -> Result<i32> {
    chrono::NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .map(|d| {
            (d - chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()).num_days() as i32
        })
        .ok_or_else(|| ODBCError::InvalidDatetimeFormat(format!("{year}-{month}-{day}")))
}

pub(crate) enum ExecOutcome {
    Done(SqlReturn),
    NeedData,
}

/// Run the prepared statement over every parameter set. Resumable: when a
/// set hits data-at-exec parameters the call parks its progress in the
/// statement and yields SQL_NEED_DATA.
///
/// # Safety
/// Reads application parameter buffers recorded in the APD.
pub(crate) unsafe fn execute_with_params(
    handle: &OdbcHandle,
    stmt: &Statement,
    start_set: usize,
    function_name: &'static str,
) -> ExecOutcome {
    let paramset_size = {
        let apd = stmt.apd();
        let size = apd.info.read().unwrap().header.array_size;
        size.max(1)
    };
    let ipd = stmt.ipd();
    let (status_ptr, processed_ptr) = {
        let info = ipd.info.read().unwrap();
        (info.header.array_status_ptr, info.header.rows_processed_ptr)
    };

    // None until a set reports a change count, so selects read back -1
    let mut total_changed: Option<i64> = None;

    for set_index in start_set..paramset_size {
        let gathered = {
            let guard = stmt.param_exec.read().unwrap();
            gather_parameter_set(stmt, set_index, &guard.collected)
        };
        let values = match gathered {
            Ok(GatherOutcome::Values(values)) => values,
            Ok(GatherOutcome::NeedData(remaining)) => {
                let mut exec = stmt.param_exec.write().unwrap();
                exec.remaining = remaining;
                exec.current = None;
                exec.set_index = set_index;
                *stmt.state.write().unwrap() = StatementState::NeedData;
                return ExecOutcome::NeedData;
            }
            Err(e) => {
                if !status_ptr.is_null() {
                    *status_ptr.add(set_index) = SQL_PARAM_ERROR;
                }
                handle.add_diag_info(e, function_name);
                return ExecOutcome::Done(SqlReturn::ERROR);
            }
        };

        let exec_result = {
            let mut prepared_guard = stmt.prepared.write().unwrap();
            let Some(prepared) = prepared_guard.as_mut() else {
                handle.add_diag_info(
                    ODBCError::FunctionSequenceError(function_name),
                    function_name,
                );
                return ExecOutcome::Done(SqlReturn::ERROR);
            };
            prepared.execute(values)
        };

        // this set's data-at-exec buffers are spent
        stmt.param_exec.write().unwrap().collected.clear();

        match exec_result {
            Ok(result) => {
                if let Some(changed) = result.rows_changed() {
                    total_changed = Some(total_changed.unwrap_or(0) + changed);
                }
                if !status_ptr.is_null() {
                    *status_ptr.add(set_index) = SQL_PARAM_SUCCESS;
                }
                if !processed_ptr.is_null() {
                    *processed_ptr = set_index + 1;
                }
                let scrollable = {
                    let attributes = stmt.attributes.read().unwrap();
                    !matches!(
                        attributes.cursor_type,
                        definitions::CursorType::SQL_CURSOR_FORWARD_ONLY
                    )
                };
                let cursor = EngineCursor::new(result, scrollable);
                let has_columns = cursor.column_count() > 0;
                *stmt.cursor.write().unwrap() = has_columns.then_some(cursor);
            }
            Err(e) => {
                if !status_ptr.is_null() {
                    *status_ptr.add(set_index) = SQL_PARAM_ERROR;
                }
                handle.add_diag_info(ODBCError::Core(e), function_name);
                *stmt.row_count.write().unwrap() = total_changed;
                return ExecOutcome::Done(SqlReturn::ERROR);
            }
        }
    }

    *stmt.row_count.write().unwrap() = total_changed;
    *stmt.state.write().unwrap() = StatementState::Executed;
    stmt.param_exec.write().unwrap().reset();
    *stmt.var_data_cache.write().unwrap() = Some(HashMap::new());

    // surface the freshly opened cursor's shape through the IRD
    crate::api::fetch::populate_ird(stmt);

    ExecOutcome::Done(SqlReturn::SUCCESS)
}

/// Shared ParamData continuation: freeze the current buffer, hand out the
/// next data-at-exec token, or resume the parked execute.
pub(crate) unsafe fn param_data_step(
    handle: &OdbcHandle,
    stmt: &Statement,
    value_ptr_ptr: *mut Pointer,
    function_name: &'static str,
) -> SqlReturn {
    let next = {
        let mut exec = stmt.param_exec.write().unwrap();
        if exec.current.is_none() && exec.remaining.is_empty() {
            handle.add_diag_info(
                ODBCError::FunctionSequenceError(function_name),
                function_name,
            );
            return SqlReturn::ERROR;
        }
        exec.current = exec.remaining.pop_front();
        exec.current
    };
    match next {
        Some(ordinal) => {
            // hand the application its token (the bound data pointer)
            let apd = stmt.apd();
            let token = apd
                .info
                .read()
                .unwrap()
                .record((ordinal - 1) as usize)
                .map_or(std::ptr::null_mut(), |r| r.data_ptr);
            if !value_ptr_ptr.is_null() {
                *value_ptr_ptr = token;
            }
            stmt.param_exec
                .write()
                .unwrap()
                .collected
                .entry(ordinal)
                .or_default();
            SqlReturn::NEED_DATA
        }
        None => {
            let set_index = stmt.param_exec.read().unwrap().set_index;
            match execute_with_params(handle, stmt, set_index, function_name) {
                ExecOutcome::Done(ret) => ret,
                ExecOutcome::NeedData => SqlReturn::NEED_DATA,
            }
        }
    }
}

/// SQLPutData appends a chunk to the parameter ParamData selected.
///
/// # Safety
/// Reads `data_ptr` for `str_len_or_ind` bytes.
pub(crate) unsafe fn put_data_chunk(
    handle: &OdbcHandle,
    stmt: &Statement,
    data_ptr: Pointer,
    str_len_or_ind: Len,
    function_name: &'static str,
) -> SqlReturn {
    let mut exec = stmt.param_exec.write().unwrap();
    let Some(current) = exec.current else {
        handle.add_diag_info(
            ODBCError::FunctionSequenceError(function_name),
            function_name,
        );
        return SqlReturn::ERROR;
    };
    let bytes: Vec<u8> = if str_len_or_ind == SQL_NULL_DATA {
        Vec::new()
    } else if str_len_or_ind == SQL_NTS {
        input_text_to_string_a(data_ptr.cast(), SQL_NTS).into_bytes()
    } else if str_len_or_ind < 0 {
        handle.add_diag_info(
            ODBCError::InvalidStringOrBufferLength(str_len_or_ind),
            function_name,
        );
        return SqlReturn::ERROR;
    } else {
        std::slice::from_raw_parts(data_ptr.cast::<u8>(), str_len_or_ind as usize).to_vec()
    };
    exec.collected.entry(current).or_default().extend(bytes);
    SqlReturn::SUCCESS
}

/// Clears parameter bindings and any data-at-exec progress
/// (SQLFreeStmt(SQL_RESET_PARAMS)).
pub(crate) fn reset_params(stmt: &Statement) {
    stmt.apd().info.write().unwrap().reset_records();
    stmt.ipd().info.write().unwrap().reset_records();
    let mut exec: std::sync::RwLockWriteGuard<'_, ParamsAtExec> =
        stmt.param_exec.write().unwrap();
    exec.reset();
}
