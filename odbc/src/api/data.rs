//! Engine-value to C-type conversion and the truncation-aware output
//! writers every string/binary output in the driver goes through.

use crate::api::util::ptr_safe_write;
use crate::errors::ODBCError;
use crate::handles::definitions::{CachedData, OdbcHandle, Statement};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use cstr::{
    write_binary_slice_to_buffer, write_fixed_data, write_string_slice_to_buffer,
    write_wstring_slice_to_buffer, WideChar,
};
use definitions::{
    CDataType, Char, Date, DaySecond, IntervalStruct, IntervalUnion, Len, Numeric, Pointer,
    SmallInt, SqlReturn, Time, Timestamp, ULen, USmallInt, YearMonth, MAX_NUMERIC_LEN,
    SQL_IS_DAY, SQL_IS_DAY_TO_HOUR, SQL_IS_DAY_TO_MINUTE, SQL_IS_DAY_TO_SECOND, SQL_IS_HOUR,
    SQL_IS_HOUR_TO_MINUTE, SQL_IS_HOUR_TO_SECOND, SQL_IS_MINUTE, SQL_IS_MINUTE_TO_SECOND,
    SQL_IS_MONTH, SQL_IS_SECOND, SQL_IS_YEAR, SQL_IS_YEAR_TO_MONTH, SQL_NULL_DATA,
};
use duckdb_odbc_core::{
    decimal::{decimal_to_string, digit_count, mantissa_le_bytes, parse_decimal,
              strip_trailing_zeros},
    EngineType, EngineValue, TimeUnit,
};
use std::mem::size_of;

type Result<T> = std::result::Result<T, ODBCError>;

const MICROS_PER_SEC: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SEC;

/// IntoCData adds the C-type accessors to EngineValue. Numeric accessors
/// return the converted value plus an optional truncation warning.
pub(crate) trait IntoCData {
    fn to_i64(&self) -> Result<(i64, Option<ODBCError>)>;
    fn to_u64(&self) -> Result<(u64, Option<ODBCError>)>;
    fn to_f64(&self) -> Result<(f64, Option<ODBCError>)>;
    fn to_f32(&self) -> Result<(f32, Option<ODBCError>)>;
    fn to_bit(&self) -> Result<(u8, Option<ODBCError>)>;
    fn to_decimal(&self) -> Result<(i128, u8)>;
    fn to_char_string(&self) -> Result<String>;
    fn to_binary(&self) -> Result<Vec<u8>>;
    fn to_date_struct(&self) -> Result<(Date, Option<ODBCError>)>;
    fn to_time_struct(&self) -> Result<(Time, Option<ODBCError>)>;
    fn to_timestamp_struct(&self) -> Result<(Timestamp, Option<ODBCError>)>;
    fn to_interval_struct(&self, target_type: CDataType) -> Result<IntervalStruct>;
}

fn f64_to_bit(f: f64) -> Result<(u8, Option<ODBCError>)> {
    if f == 0.0 {
        Ok((0u8, None))
    } else if f == 1.0 {
        Ok((1u8, None))
    } else if f > 0.0 && f < 2.0 {
        Ok((
            f as u8,
            Some(ODBCError::FractionalTruncation(f.to_string())),
        ))
    } else {
        Err(ODBCError::IntegralTruncation(f.to_string()))
    }
}

fn ranged_i64(value: i128, source: &EngineValue) -> Result<(i64, Option<ODBCError>)> {
    if value > i128::from(i64::MAX) || value < i128::from(i64::MIN) {
        Err(ODBCError::IntegralTruncation(source.to_char_string()?))
    } else {
        Ok((value as i64, None))
    }
}

fn ranged_u64(value: i128, source: &EngineValue) -> Result<(u64, Option<ODBCError>)> {
    if value < 0 || value > i128::from(u64::MAX) {
        Err(ODBCError::IntegralTruncation(source.to_char_string()?))
    } else {
        Ok((value as u64, None))
    }
}

fn days_to_naive_date(days: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .checked_add_signed(chrono::Duration::days(i64::from(days)))
        .ok_or_else(|| ODBCError::InvalidDatetimeFormat(days.to_string()))
}

fn micros_to_naive_time(micros: i64) -> Result<NaiveTime> {
    let secs = (micros / MICROS_PER_SEC).rem_euclid(86_400);
    let frac_micros = micros.rem_euclid(MICROS_PER_SEC);
    NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, (frac_micros * 1_000) as u32)
        .ok_or_else(|| ODBCError::InvalidDatetimeFormat(micros.to_string()))
}

fn timestamp_to_naive(value: i64, unit: TimeUnit) -> Result<NaiveDateTime> {
    let datetime = match unit {
        TimeUnit::Second => chrono::DateTime::from_timestamp(value, 0),
        TimeUnit::Millisecond => chrono::DateTime::from_timestamp_millis(value),
        TimeUnit::Microsecond => chrono::DateTime::from_timestamp_micros(value),
        TimeUnit::Nanosecond => Some(chrono::DateTime::from_timestamp_nanos(value)),
    };
    datetime
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| ODBCError::InvalidDatetimeFormat(value.to_string()))
}

/// TIMESTAMP WITH TIME ZONE renders in the host's local offset at that
/// instant, per the platform timezone database.
fn timestamp_tz_to_naive(micros: i64) -> Result<NaiveDateTime> {
    let utc = chrono::DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| ODBCError::InvalidDatetimeFormat(micros.to_string()))?;
    Ok(chrono::Local.from_utc_datetime(&utc.naive_utc()).naive_local())
}

fn naive_to_timestamp_struct(dt: NaiveDateTime) -> Timestamp {
    Timestamp {
        year: dt.year() as i16,
        month: dt.month() as u16,
        day: dt.day() as u16,
        hour: dt.hour() as u16,
        minute: dt.minute() as u16,
        second: dt.second() as u16,
        // fraction is nanoseconds per the ODBC timestamp struct
        fraction: dt.nanosecond(),
    }
}

fn parse_datetime_text(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%F %T%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%+"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%F").map(|d| d.and_hms_opt(0, 0, 0).unwrap()))
        .map_err(|_| ODBCError::InvalidDatetimeFormat(s.to_string()))
}

fn format_interval(months: i32, days: i32, micros: i64) -> String {
    let mut parts = Vec::new();
    let years = months / 12;
    let rem_months = months % 12;
    if years != 0 {
        parts.push(format!("{years} year{}", if years.abs() == 1 { "" } else { "s" }));
    }
    if rem_months != 0 {
        parts.push(format!(
            "{rem_months} month{}",
            if rem_months.abs() == 1 { "" } else { "s" }
        ));
    }
    if days != 0 {
        parts.push(format!("{days} day{}", if days.abs() == 1 { "" } else { "s" }));
    }
    if micros != 0 || parts.is_empty() {
        let total_secs = micros / MICROS_PER_SEC;
        let frac = (micros % MICROS_PER_SEC).abs();
        let hours = total_secs / 3600;
        let minutes = (total_secs.abs() / 60) % 60;
        let seconds = total_secs.abs() % 60;
        if frac != 0 {
            parts.push(format!("{hours:02}:{minutes:02}:{seconds:02}.{frac:06}"));
        } else {
            parts.push(format!("{hours:02}:{minutes:02}:{seconds:02}"));
        }
    }
    parts.join(" ")
}

impl IntoCData for EngineValue {
    fn to_i64(&self) -> Result<(i64, Option<ODBCError>)> {
        match self {
            EngineValue::Boolean(b) => Ok((i64::from(*b), None)),
            EngineValue::TinyInt(i) => Ok((i64::from(*i), None)),
            EngineValue::SmallInt(i) => Ok((i64::from(*i), None)),
            EngineValue::Integer(i) => Ok((i64::from(*i), None)),
            EngineValue::BigInt(i) => Ok((*i, None)),
            EngineValue::HugeInt(i) => ranged_i64(*i, self),
            EngineValue::UTinyInt(u) => Ok((i64::from(*u), None)),
            EngineValue::USmallInt(u) => Ok((i64::from(*u), None)),
            EngineValue::UInteger(u) => Ok((i64::from(*u), None)),
            EngineValue::UBigInt(u) => ranged_i64(i128::from(*u), self),
            EngineValue::Float(f) => EngineValue::Double(f64::from(*f)).to_i64(),
            EngineValue::Double(f) => {
                if *f > i64::MAX as f64 || *f < i64::MIN as f64 {
                    Err(ODBCError::IntegralTruncation(f.to_string()))
                } else {
                    let warning = (f.fract() != 0.0)
                        .then(|| ODBCError::FractionalTruncation(f.to_string()));
                    Ok((*f as i64, warning))
                }
            }
            EngineValue::Decimal { value, scale, .. } => {
                let divisor = 10i128.pow(u32::from(*scale));
                let (quotient, remainder) = (value / divisor, value % divisor);
                let (quotient, warning) = if remainder != 0 {
                    (
                        quotient,
                        Some(ODBCError::FractionalTruncation(decimal_to_string(
                            *value, *scale,
                        ))),
                    )
                } else {
                    (quotient, None)
                };
                ranged_i64(quotient, self).map(|(v, w)| (v, warning.or(w)))
            }
            EngineValue::Varchar(s) => {
                if let Ok(i) = s.trim().parse::<i64>() {
                    return Ok((i, None));
                }
                let f: f64 = s
                    .trim()
                    .parse()
                    .map_err(|_| ODBCError::InvalidCharacterValue(s.clone()))?;
                EngineValue::Double(f).to_i64()
            }
            other => Err(ODBCError::RestrictedDataType(
                other.type_str(),
                "INT64".to_string(),
            )),
        }
    }

    fn to_u64(&self) -> Result<(u64, Option<ODBCError>)> {
        match self {
            EngineValue::Boolean(b) => Ok((u64::from(*b), None)),
            EngineValue::UTinyInt(u) => Ok((u64::from(*u), None)),
            EngineValue::USmallInt(u) => Ok((u64::from(*u), None)),
            EngineValue::UInteger(u) => Ok((u64::from(*u), None)),
            EngineValue::UBigInt(u) => Ok((*u, None)),
            EngineValue::HugeInt(i) => ranged_u64(*i, self),
            EngineValue::Double(f) => {
                if *f < 0.0 || *f > u64::MAX as f64 {
                    Err(ODBCError::IntegralTruncation(f.to_string()))
                } else {
                    let warning = (f.fract() != 0.0)
                        .then(|| ODBCError::FractionalTruncation(f.to_string()));
                    Ok((*f as u64, warning))
                }
            }
            EngineValue::Float(f) => EngineValue::Double(f64::from(*f)).to_u64(),
            EngineValue::Varchar(_) | EngineValue::Decimal { .. } => {
                let (v, warning) = self.to_i64()?;
                ranged_u64(i128::from(v), self).map(|(u, w)| (u, warning.or(w)))
            }
            _ => {
                let (v, warning) = self.to_i64()?;
                ranged_u64(i128::from(v), self).map(|(u, w)| (u, warning.or(w)))
            }
        }
    }

    fn to_f64(&self) -> Result<(f64, Option<ODBCError>)> {
        match self {
            EngineValue::Boolean(b) => Ok((if *b { 1.0 } else { 0.0 }, None)),
            EngineValue::TinyInt(i) => Ok((f64::from(*i), None)),
            EngineValue::SmallInt(i) => Ok((f64::from(*i), None)),
            EngineValue::Integer(i) => Ok((f64::from(*i), None)),
            EngineValue::BigInt(i) => Ok((*i as f64, None)),
            EngineValue::HugeInt(i) => Ok((*i as f64, None)),
            EngineValue::UTinyInt(u) => Ok((f64::from(*u), None)),
            EngineValue::USmallInt(u) => Ok((f64::from(*u), None)),
            EngineValue::UInteger(u) => Ok((f64::from(*u), None)),
            EngineValue::UBigInt(u) => Ok((*u as f64, None)),
            EngineValue::Float(f) => Ok((f64::from(*f), None)),
            EngineValue::Double(f) => Ok((*f, None)),
            EngineValue::Decimal { value, scale, .. } => {
                let s = decimal_to_string(*value, *scale);
                s.parse::<f64>()
                    .map(|f| (f, None))
                    .map_err(|_| ODBCError::InvalidCharacterValue(s))
            }
            EngineValue::Varchar(s) => s
                .trim()
                .parse::<f64>()
                .map(|f| (f, None))
                .map_err(|_| ODBCError::InvalidCharacterValue(s.clone())),
            other => Err(ODBCError::RestrictedDataType(
                other.type_str(),
                "DOUBLE".to_string(),
            )),
        }
    }

    fn to_f32(&self) -> Result<(f32, Option<ODBCError>)> {
        let (f, warning) = self.to_f64()?;
        if f.is_finite() && (f > f64::from(f32::MAX) || f < f64::from(f32::MIN)) {
            Err(ODBCError::IntegralTruncation(f.to_string()))
        } else {
            Ok((f as f32, warning))
        }
    }

    fn to_bit(&self) -> Result<(u8, Option<ODBCError>)> {
        match self {
            EngineValue::Boolean(b) => Ok((u8::from(*b), None)),
            EngineValue::Varchar(s) => {
                let f: f64 = s
                    .trim()
                    .parse()
                    .map_err(|_| ODBCError::InvalidCharacterValue(s.clone()))?;
                f64_to_bit(f)
            }
            _ => {
                let (f, _) = self.to_f64()?;
                f64_to_bit(f)
            }
        }
    }

    fn to_decimal(&self) -> Result<(i128, u8)> {
        match self {
            EngineValue::Decimal { value, scale, .. } => Ok((*value, *scale)),
            EngineValue::Boolean(b) => Ok((i128::from(*b), 0)),
            EngineValue::TinyInt(_)
            | EngineValue::SmallInt(_)
            | EngineValue::Integer(_)
            | EngineValue::BigInt(_)
            | EngineValue::UTinyInt(_)
            | EngineValue::USmallInt(_)
            | EngineValue::UInteger(_)
            | EngineValue::UBigInt(_) => {
                let (v, _) = self.to_i64()?;
                Ok((i128::from(v), 0))
            }
            EngineValue::HugeInt(i) => Ok((*i, 0)),
            EngineValue::Float(_) | EngineValue::Double(_) => {
                let (f, _) = self.to_f64()?;
                parse_decimal(&f.to_string())
                    .ok_or_else(|| ODBCError::InvalidCharacterValue(f.to_string()))
            }
            EngineValue::Varchar(s) => parse_decimal(s)
                .ok_or_else(|| ODBCError::InvalidCharacterValue(s.clone())),
            other => Err(ODBCError::RestrictedDataType(
                other.type_str(),
                "NUMERIC".to_string(),
            )),
        }
    }

    fn to_char_string(&self) -> Result<String> {
        Ok(match self {
            EngineValue::Null => String::new(),
            EngineValue::Boolean(b) => b.to_string(),
            EngineValue::TinyInt(i) => i.to_string(),
            EngineValue::SmallInt(i) => i.to_string(),
            EngineValue::Integer(i) => i.to_string(),
            EngineValue::BigInt(i) => i.to_string(),
            EngineValue::HugeInt(i) => i.to_string(),
            EngineValue::UTinyInt(u) => u.to_string(),
            EngineValue::USmallInt(u) => u.to_string(),
            EngineValue::UInteger(u) => u.to_string(),
            EngineValue::UBigInt(u) => u.to_string(),
            EngineValue::Float(f) => f.to_string(),
            EngineValue::Double(f) => f.to_string(),
            EngineValue::Decimal { value, scale, .. } => decimal_to_string(*value, *scale),
            EngineValue::Varchar(s) => s.clone(),
            EngineValue::Blob(b) => String::from_utf8_lossy(b).into_owned(),
            EngineValue::Date { days } => days_to_naive_date(*days)?.format("%F").to_string(),
            EngineValue::Time { micros } => {
                let time = micros_to_naive_time(*micros)?;
                if micros % MICROS_PER_SEC == 0 {
                    time.format("%T").to_string()
                } else {
                    time.format("%T%.6f").to_string()
                }
            }
            EngineValue::Timestamp { value, unit } => {
                let dt = timestamp_to_naive(*value, *unit)?;
                match unit {
                    TimeUnit::Second => dt.format("%F %T").to_string(),
                    TimeUnit::Millisecond => dt.format("%F %T%.3f").to_string(),
                    TimeUnit::Microsecond => dt.format("%F %T%.6f").to_string(),
                    TimeUnit::Nanosecond => dt.format("%F %T%.9f").to_string(),
                }
            }
            EngineValue::TimestampTz { micros } => {
                timestamp_tz_to_naive(*micros)?.format("%F %T%.6f").to_string()
            }
            EngineValue::Interval {
                months,
                days,
                micros,
            } => format_interval(*months, *days, *micros),
        })
    }

    fn to_binary(&self) -> Result<Vec<u8>> {
        match self {
            EngineValue::Blob(b) => Ok(b.clone()),
            EngineValue::Varchar(s) => Ok(s.clone().into_bytes()),
            other => other.to_char_string().map(String::into_bytes),
        }
    }

    fn to_date_struct(&self) -> Result<(Date, Option<ODBCError>)> {
        let (ts, _) = self.to_timestamp_struct()?;
        let has_time = ts.hour != 0 || ts.minute != 0 || ts.second != 0 || ts.fraction != 0;
        Ok((
            Date {
                year: ts.year,
                month: ts.month,
                day: ts.day,
            },
            has_time.then(|| ODBCError::FractionalTruncation(format!("{ts:?}"))),
        ))
    }

    fn to_time_struct(&self) -> Result<(Time, Option<ODBCError>)> {
        let (ts, _) = self.to_timestamp_struct()?;
        Ok((
            Time {
                hour: ts.hour,
                minute: ts.minute,
                second: ts.second,
            },
            (ts.fraction != 0).then(|| ODBCError::FractionalTruncation(format!("{ts:?}"))),
        ))
    }

    fn to_timestamp_struct(&self) -> Result<(Timestamp, Option<ODBCError>)> {
        match self {
            // dates zero-pad the time fields
            EngineValue::Date { days } => {
                let date = days_to_naive_date(*days)?;
                Ok((
                    naive_to_timestamp_struct(date.and_hms_opt(0, 0, 0).unwrap()),
                    None,
                ))
            }
            // times land on the epoch date
            EngineValue::Time { micros } => {
                let time = micros_to_naive_time(*micros)?;
                let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
                Ok((naive_to_timestamp_struct(date.and_time(time)), None))
            }
            EngineValue::Timestamp { value, unit } => Ok((
                naive_to_timestamp_struct(timestamp_to_naive(*value, *unit)?),
                None,
            )),
            EngineValue::TimestampTz { micros } => Ok((
                naive_to_timestamp_struct(timestamp_tz_to_naive(*micros)?),
                None,
            )),
            EngineValue::Varchar(s) => {
                Ok((naive_to_timestamp_struct(parse_datetime_text(s)?), None))
            }
            other => Err(ODBCError::RestrictedDataType(
                other.type_str(),
                "TIMESTAMP".to_string(),
            )),
        }
    }

    fn to_interval_struct(&self, target_type: CDataType) -> Result<IntervalStruct> {
        let EngineValue::Interval {
            months,
            days,
            micros,
        } = self
        else {
            return Err(ODBCError::RestrictedDataType(
                self.type_str(),
                format!("{target_type:?}"),
            ));
        };
        let negative = *months < 0 || *days < 0 || *micros < 0;
        let months = months.unsigned_abs();
        let days = days.unsigned_abs();
        let micros = micros.unsigned_abs() as i64;
        let total_secs = micros / MICROS_PER_SEC;
        let fraction = (micros % MICROS_PER_SEC) as u32 * 1_000;

        let year_month = |interval_type: i32, year: u32, month: u32| IntervalStruct {
            interval_type,
            interval_sign: i16::from(negative),
            interval_value: IntervalUnion {
                year_month: YearMonth { year, month },
            },
        };
        let day_second =
            |interval_type: i32, day: u32, hour: u32, minute: u32, second: u32, fraction: u32| {
                IntervalStruct {
                    interval_type,
                    interval_sign: i16::from(negative),
                    interval_value: IntervalUnion {
                        day_second: DaySecond {
                            day,
                            hour,
                            minute,
                            second,
                            fraction,
                        },
                    },
                }
            };

        // days roll into the time fields the way the engine stores them
        let total_days = days + (micros / MICROS_PER_DAY) as u32;
        let hours_in_day = ((total_secs / 3600) % 24) as u32;
        let all_hours = days * 24 + (total_secs / 3600) as u32;
        let minutes = ((total_secs / 60) % 60) as u32;
        let seconds = (total_secs % 60) as u32;

        Ok(match target_type {
            CDataType::SQL_C_INTERVAL_YEAR => year_month(SQL_IS_YEAR, months / 12, 0),
            CDataType::SQL_C_INTERVAL_MONTH => year_month(SQL_IS_MONTH, 0, months),
            CDataType::SQL_C_INTERVAL_YEAR_TO_MONTH => {
                year_month(SQL_IS_YEAR_TO_MONTH, months / 12, months % 12)
            }
            CDataType::SQL_C_INTERVAL_DAY => day_second(SQL_IS_DAY, total_days, 0, 0, 0, 0),
            CDataType::SQL_C_INTERVAL_HOUR => day_second(SQL_IS_HOUR, 0, all_hours, 0, 0, 0),
            CDataType::SQL_C_INTERVAL_MINUTE => {
                day_second(SQL_IS_MINUTE, 0, 0, all_hours * 60 + minutes, 0, 0)
            }
            CDataType::SQL_C_INTERVAL_SECOND => day_second(
                SQL_IS_SECOND,
                0,
                0,
                0,
                days * 86_400 + total_secs as u32,
                fraction,
            ),
            CDataType::SQL_C_INTERVAL_DAY_TO_HOUR => {
                day_second(SQL_IS_DAY_TO_HOUR, total_days, hours_in_day, 0, 0, 0)
            }
            CDataType::SQL_C_INTERVAL_DAY_TO_MINUTE => {
                day_second(SQL_IS_DAY_TO_MINUTE, total_days, hours_in_day, minutes, 0, 0)
            }
            CDataType::SQL_C_INTERVAL_DAY_TO_SECOND => day_second(
                SQL_IS_DAY_TO_SECOND,
                total_days,
                hours_in_day,
                minutes,
                seconds,
                fraction,
            ),
            CDataType::SQL_C_INTERVAL_HOUR_TO_MINUTE => {
                day_second(SQL_IS_HOUR_TO_MINUTE, 0, all_hours, minutes, 0, 0)
            }
            CDataType::SQL_C_INTERVAL_HOUR_TO_SECOND => {
                day_second(SQL_IS_HOUR_TO_SECOND, 0, all_hours, minutes, seconds, fraction)
            }
            CDataType::SQL_C_INTERVAL_MINUTE_TO_SECOND => day_second(
                SQL_IS_MINUTE_TO_SECOND,
                0,
                0,
                all_hours * 60 + minutes,
                seconds,
                fraction,
            ),
            other => {
                return Err(ODBCError::RestrictedDataType(
                    "INTERVAL",
                    format!("{other:?}"),
                ))
            }
        })
    }
}

/// SQL_C_DEFAULT resolves from the engine type and, for integers, the
/// caller's buffer size; BI tools bind INTEGER columns into 2-byte
/// buffers and expect a short back.
pub(crate) fn resolve_default_c_type(engine_type: &EngineType, buffer_len: Len) -> CDataType {
    let int_for_len = |natural: CDataType| match buffer_len {
        1 => CDataType::SQL_C_STINYINT,
        2 => CDataType::SQL_C_SSHORT,
        4 => CDataType::SQL_C_SLONG,
        8 => CDataType::SQL_C_SBIGINT,
        _ => natural,
    };
    let uint_for_len = |natural: CDataType| match buffer_len {
        1 => CDataType::SQL_C_UTINYINT,
        2 => CDataType::SQL_C_USHORT,
        4 => CDataType::SQL_C_ULONG,
        8 => CDataType::SQL_C_UBIGINT,
        _ => natural,
    };
    match engine_type {
        EngineType::Boolean => CDataType::SQL_C_BIT,
        EngineType::TinyInt => int_for_len(CDataType::SQL_C_STINYINT),
        EngineType::SmallInt => int_for_len(CDataType::SQL_C_SSHORT),
        EngineType::Integer => int_for_len(CDataType::SQL_C_SLONG),
        EngineType::BigInt => int_for_len(CDataType::SQL_C_SBIGINT),
        EngineType::UTinyInt => uint_for_len(CDataType::SQL_C_UTINYINT),
        EngineType::USmallInt => uint_for_len(CDataType::SQL_C_USHORT),
        EngineType::UInteger => uint_for_len(CDataType::SQL_C_ULONG),
        EngineType::UBigInt => uint_for_len(CDataType::SQL_C_UBIGINT),
        EngineType::HugeInt | EngineType::Decimal { .. } => CDataType::SQL_C_CHAR,
        EngineType::Float => CDataType::SQL_C_FLOAT,
        EngineType::Double => CDataType::SQL_C_DOUBLE,
        EngineType::Varchar | EngineType::Unknown => CDataType::SQL_C_CHAR,
        EngineType::Blob => CDataType::SQL_C_BINARY,
        EngineType::Date => CDataType::SQL_C_TYPE_DATE,
        EngineType::Time => CDataType::SQL_C_TYPE_TIME,
        EngineType::Timestamp(_) | EngineType::TimestampTz => CDataType::SQL_C_TYPE_TIMESTAMP,
        EngineType::Interval => CDataType::SQL_C_INTERVAL_DAY_TO_SECOND,
    }
}

/// Builds the SQL_C_NUMERIC struct: positive sign is 1, the mantissa is the
/// little-endian magnitude, precision counts the actual digits after
/// dropping a fraction of zero.
pub(crate) fn numeric_struct_from(value: i128, scale: u8) -> Numeric {
    let (value, scale) = if scale > 0 {
        strip_trailing_zeros(value, scale)
    } else {
        (value, scale)
    };
    let mut val = [0u8; MAX_NUMERIC_LEN];
    val.copy_from_slice(&mantissa_le_bytes(value));
    Numeric {
        precision: digit_count(value),
        scale: scale as i8,
        sign: u8::from(value >= 0),
        val,
    }
}

///
/// set_output_wstring_helper writes the UTF-16 message into the output
/// buffer, truncating to `buffer_len` characters including the
/// terminator. Returns the characters written (terminator excluded) and
/// whether truncation occurred.
///
/// # Safety
/// Writes through a raw C pointer.
///
unsafe fn set_output_wstring_helper(
    message: &[WideChar],
    output_ptr: *mut WideChar,
    buffer_len: usize,
) -> (usize, SqlReturn) {
    if buffer_len == 0 {
        return (0, SqlReturn::SUCCESS_WITH_INFO);
    }
    let written =
        write_wstring_slice_to_buffer(message, buffer_len as isize, output_ptr) as usize;
    // written includes the terminator
    if written - 1 < message.len() {
        (written - 1, SqlReturn::SUCCESS_WITH_INFO)
    } else {
        (message.len(), SqlReturn::SUCCESS)
    }
}

///
/// set_output_string_helper writes the UTF-8 message into the output
/// buffer, truncating to `buffer_len` bytes including the terminator.
///
/// # Safety
/// Writes through a raw C pointer.
///
unsafe fn set_output_string_helper(
    message: &[u8],
    output_ptr: *mut Char,
    buffer_len: usize,
) -> (usize, SqlReturn) {
    if buffer_len == 0 {
        return (0, SqlReturn::SUCCESS_WITH_INFO);
    }
    let written = write_string_slice_to_buffer(message, buffer_len as isize, output_ptr) as usize;
    if written - 1 < message.len() {
        (written - 1, SqlReturn::SUCCESS_WITH_INFO)
    } else {
        (message.len(), SqlReturn::SUCCESS)
    }
}

unsafe fn set_output_binary_helper(
    data: &[u8],
    output_ptr: *mut Char,
    buffer_len: usize,
) -> (usize, SqlReturn) {
    let written = write_binary_slice_to_buffer(data, buffer_len, output_ptr);
    if written < data.len() {
        (written, SqlReturn::SUCCESS_WITH_INFO)
    } else {
        (written, SqlReturn::SUCCESS)
    }
}

/// Writers whose length-out parameter is a SQLSMALLINT.
pub mod i16_len {
    use super::*;

    ///
    /// set_output_string writes the message as UTF-8; `buffer_len` and the
    /// reported length are both in bytes. The reported length is always
    /// the full untruncated length.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_string(
        message: &str,
        output_ptr: *mut Char,
        buffer_len: usize,
        text_length_ptr: *mut SmallInt,
    ) -> SqlReturn {
        ptr_safe_write(text_length_ptr, message.len() as SmallInt);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS;
        }
        let (_, ret) = set_output_string_helper(message.as_bytes(), output_ptr, buffer_len);
        ret
    }

    ///
    /// set_output_wstring writes the message as UTF-16; `buffer_len` and
    /// the reported length are both in characters.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_wstring(
        message: &str,
        output_ptr: *mut WideChar,
        buffer_len: usize,
        text_length_ptr: *mut SmallInt,
    ) -> SqlReturn {
        let message = cstr::to_widechar_vec(message);
        ptr_safe_write(text_length_ptr, message.len() as SmallInt);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS;
        }
        let (_, ret) = set_output_wstring_helper(&message, output_ptr, buffer_len);
        ret
    }

    ///
    /// set_output_wstring_as_bytes writes the message as UTF-16;
    /// `buffer_len` and the reported length are both in bytes.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_wstring_as_bytes(
        message: &str,
        output_ptr: Pointer,
        buffer_len: usize,
        text_length_ptr: *mut SmallInt,
    ) -> SqlReturn {
        let message = cstr::to_widechar_vec(message);
        ptr_safe_write(
            text_length_ptr,
            (message.len() * size_of::<WideChar>()) as SmallInt,
        );
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS;
        }
        let (_, ret) = set_output_wstring_helper(
            &message,
            output_ptr.cast::<WideChar>(),
            buffer_len / size_of::<WideChar>(),
        );
        ret
    }

    ///
    /// set_output_wstring_byte_len writes the message as UTF-16 with the
    /// buffer length in characters but the reported length in bytes, the
    /// convention of the wide column-attribute entrypoints.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_wstring_byte_len(
        message: &str,
        output_ptr: Pointer,
        buffer_len: usize,
        text_length_ptr: *mut SmallInt,
    ) -> SqlReturn {
        let message = cstr::to_widechar_vec(message);
        ptr_safe_write(
            text_length_ptr,
            (message.len() * size_of::<WideChar>()) as SmallInt,
        );
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS;
        }
        let (_, ret) =
            set_output_wstring_helper(&message, output_ptr.cast::<WideChar>(), buffer_len);
        ret
    }

    ///
    /// set_output_fixed_data writes a fixed-size value. ODBC permits the
    /// driver to assume the buffer is large enough.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_fixed_data<T: core::fmt::Debug>(
        data: &T,
        output_ptr: Pointer,
        data_len_ptr: *mut SmallInt,
    ) -> SqlReturn {
        ptr_safe_write(data_len_ptr, size_of::<T>() as SmallInt);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
        write_fixed_data(data, output_ptr);
        SqlReturn::SUCCESS
    }
}

/// Writers whose length-out parameter is a SQLINTEGER.
pub mod i32_len {
    use super::*;

    /// # Safety
    /// Writes through raw C pointers.
    pub unsafe fn set_output_string(
        message: &str,
        output_ptr: *mut Char,
        buffer_len: usize,
        text_length_ptr: *mut definitions::Integer,
    ) -> SqlReturn {
        ptr_safe_write(text_length_ptr, message.len() as definitions::Integer);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS;
        }
        let (_, ret) = set_output_string_helper(message.as_bytes(), output_ptr, buffer_len);
        ret
    }

    /// # Safety
    /// Writes through raw C pointers.
    pub unsafe fn set_output_wstring_as_bytes(
        message: &str,
        output_ptr: Pointer,
        buffer_len: usize,
        text_length_ptr: *mut definitions::Integer,
    ) -> SqlReturn {
        let message = cstr::to_widechar_vec(message);
        ptr_safe_write(
            text_length_ptr,
            (message.len() * size_of::<WideChar>()) as definitions::Integer,
        );
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS;
        }
        let (_, ret) = set_output_wstring_helper(
            &message,
            output_ptr.cast::<WideChar>(),
            buffer_len / size_of::<WideChar>(),
        );
        ret
    }

    /// # Safety
    /// Writes through raw C pointers.
    pub unsafe fn set_output_fixed_data<T: core::fmt::Debug>(
        data: &T,
        output_ptr: Pointer,
        data_len_ptr: *mut definitions::Integer,
    ) -> SqlReturn {
        ptr_safe_write(data_len_ptr, size_of::<T>() as definitions::Integer);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
        write_fixed_data(data, output_ptr);
        SqlReturn::SUCCESS
    }
}

/// Writers whose length-out parameter is a SQLLEN, used by SQLGetData with
/// per-column streaming state.
pub mod isize_len {
    use super::*;

    ///
    /// set_output_wstring_as_bytes streams the UTF-16 value from the
    /// remembered offset; the reported length is the remaining
    /// untruncated byte count.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_wstring_as_bytes(
        stmt: &Statement,
        message: Vec<WideChar>,
        col_num: USmallInt,
        index: usize,
        output_ptr: *mut WideChar,
        buffer_len: usize,
        text_length_ptr: *mut Len,
    ) -> SqlReturn {
        if output_ptr.is_null() {
            return SqlReturn::ERROR;
        }
        if index >= message.len() && index != 0 {
            ptr_safe_write(text_length_ptr, 0);
            stmt.insert_var_data_cache(col_num, CachedData::WChar(index, message));
            return SqlReturn::NO_DATA;
        }
        let (len, ret) = set_output_wstring_helper(
            message.get(index..).unwrap_or(&[]),
            output_ptr,
            buffer_len / size_of::<WideChar>(),
        );
        // the reported length is always the remaining data size
        ptr_safe_write(
            text_length_ptr,
            ((message.len() - index) * size_of::<WideChar>()) as Len,
        );
        stmt.insert_var_data_cache(col_num, CachedData::WChar(index + len, message));
        ret
    }

    ///
    /// set_output_string streams the UTF-8 value from the remembered
    /// offset; the reported length is the remaining untruncated byte
    /// count.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_string(
        stmt: &Statement,
        message: Vec<u8>,
        col_num: USmallInt,
        index: usize,
        output_ptr: *mut Char,
        buffer_len: usize,
        text_length_ptr: *mut Len,
    ) -> SqlReturn {
        if output_ptr.is_null() {
            return SqlReturn::ERROR;
        }
        if index >= message.len() && index != 0 {
            ptr_safe_write(text_length_ptr, 0);
            stmt.insert_var_data_cache(col_num, CachedData::Char(index, message));
            return SqlReturn::NO_DATA;
        }
        let (len, ret) =
            set_output_string_helper(message.get(index..).unwrap_or(&[]), output_ptr, buffer_len);
        ptr_safe_write(text_length_ptr, (message.len() - index) as Len);
        stmt.insert_var_data_cache(col_num, CachedData::Char(index + len, message));
        ret
    }

    ///
    /// set_output_binary streams raw bytes from the remembered offset; no
    /// terminator is appended.
    ///
    /// # Safety
    /// Writes through raw C pointers.
    ///
    pub unsafe fn set_output_binary(
        stmt: &Statement,
        data: Vec<u8>,
        col_num: USmallInt,
        index: usize,
        output_ptr: *mut Char,
        buffer_len: usize,
        text_length_ptr: *mut Len,
    ) -> SqlReturn {
        if output_ptr.is_null() {
            return SqlReturn::ERROR;
        }
        if index >= data.len() && index != 0 {
            ptr_safe_write(text_length_ptr, 0);
            stmt.insert_var_data_cache(col_num, CachedData::Bin(index, data));
            return SqlReturn::NO_DATA;
        }
        let (len, ret) =
            set_output_binary_helper(data.get(index..).unwrap_or(&[]), output_ptr, buffer_len);
        ptr_safe_write(text_length_ptr, (data.len() - index) as Len);
        stmt.insert_var_data_cache(col_num, CachedData::Bin(index + len, data));
        ret
    }

    /// # Safety
    /// Writes through raw C pointers.
    pub unsafe fn set_output_fixed_data<T: core::fmt::Debug>(
        data: &T,
        output_ptr: Pointer,
        data_len_ptr: *mut Len,
    ) -> SqlReturn {
        ptr_safe_write(data_len_ptr, size_of::<T>() as Len);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
        write_fixed_data(data, output_ptr);
        SqlReturn::SUCCESS
    }
}

macro_rules! fixed_data_with_warnings {
    ($handle:expr, $stmt:expr, $col_num:expr, $data:expr, $target_value_ptr:expr, $str_len_or_ind_ptr:expr, $function_name:expr) => {{
        $stmt.insert_var_data_cache($col_num, CachedData::Fixed);
        match $data {
            Ok((value, warning)) => {
                let sqlreturn = isize_len::set_output_fixed_data(
                    &value,
                    $target_value_ptr,
                    $str_len_or_ind_ptr,
                );
                if let Some(warning) = warning {
                    $handle.add_diag_info(warning, $function_name);
                    return SqlReturn::SUCCESS_WITH_INFO;
                }
                sqlreturn
            }
            Err(e) => {
                $handle.add_diag_info(e, $function_name);
                SqlReturn::ERROR
            }
        }
    }};
}

/// Writes one engine value into a caller buffer per the target C type.
/// Used both by the bound-column scatter and by SQLGetData; only the
/// latter streams through the per-column cache.
///
/// # Safety
/// Writes through raw C pointers supplied by the application.
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn format_cell_value(
    handle: &OdbcHandle,
    col_num: USmallInt,
    value: EngineValue,
    target_type: CDataType,
    target_value_ptr: Pointer,
    buffer_len: Len,
    str_len_or_ind_ptr: *mut Len,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = match handle.as_statement() {
        Some(s) => s,
        None => return SqlReturn::INVALID_HANDLE,
    };

    if value.is_null() {
        if str_len_or_ind_ptr.is_null() {
            handle.add_diag_info(ODBCError::IndicatorVariableRequired, function_name);
            return SqlReturn::ERROR;
        }
        *str_len_or_ind_ptr = SQL_NULL_DATA;
        return SqlReturn::SUCCESS;
    }

    let target_type = match target_type {
        CDataType::SQL_C_DEFAULT => resolve_default_c_type(&value.engine_type(), buffer_len),
        t => t,
    };

    match target_type {
        CDataType::SQL_C_CHAR => {
            let data = match value.to_char_string() {
                Ok(s) => s.into_bytes(),
                Err(e) => {
                    handle.add_diag_info(e, function_name);
                    return SqlReturn::ERROR;
                }
            };
            let ret = isize_len::set_output_string(
                stmt,
                data,
                col_num,
                0,
                target_value_ptr.cast::<Char>(),
                buffer_len.max(0) as usize,
                str_len_or_ind_ptr,
            );
            if ret == SqlReturn::SUCCESS_WITH_INFO {
                handle.add_diag_info(
                    ODBCError::OutStringTruncated(buffer_len.max(0) as usize),
                    function_name,
                );
            }
            ret
        }
        CDataType::SQL_C_WCHAR => {
            let data = match value.to_char_string() {
                Ok(s) => cstr::to_widechar_vec(&s),
                Err(e) => {
                    handle.add_diag_info(e, function_name);
                    return SqlReturn::ERROR;
                }
            };
            let ret = isize_len::set_output_wstring_as_bytes(
                stmt,
                data,
                col_num,
                0,
                target_value_ptr.cast::<WideChar>(),
                buffer_len.max(0) as usize,
                str_len_or_ind_ptr,
            );
            if ret == SqlReturn::SUCCESS_WITH_INFO {
                handle.add_diag_info(
                    ODBCError::OutStringTruncated(buffer_len.max(0) as usize),
                    function_name,
                );
            }
            ret
        }
        CDataType::SQL_C_BINARY => {
            let data = match value.to_binary() {
                Ok(b) => b,
                Err(e) => {
                    handle.add_diag_info(e, function_name);
                    return SqlReturn::ERROR;
                }
            };
            let ret = isize_len::set_output_binary(
                stmt,
                data,
                col_num,
                0,
                target_value_ptr.cast::<Char>(),
                buffer_len.max(0) as usize,
                str_len_or_ind_ptr,
            );
            if ret == SqlReturn::SUCCESS_WITH_INFO {
                handle.add_diag_info(
                    ODBCError::OutStringTruncated(buffer_len.max(0) as usize),
                    function_name,
                );
            }
            ret
        }
        CDataType::SQL_C_BIT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_bit(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_STINYINT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_i64().and_then(|(v, w)| {
                if v > i64::from(i8::MAX) || v < i64::from(i8::MIN) {
                    Err(ODBCError::IntegralTruncation(v.to_string()))
                } else {
                    Ok((v as i8, w))
                }
            }),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_UTINYINT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_u64().and_then(|(v, w)| {
                if v > u64::from(u8::MAX) {
                    Err(ODBCError::IntegralTruncation(v.to_string()))
                } else {
                    Ok((v as u8, w))
                }
            }),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_SSHORT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_i64().and_then(|(v, w)| {
                if v > i64::from(i16::MAX) || v < i64::from(i16::MIN) {
                    Err(ODBCError::IntegralTruncation(v.to_string()))
                } else {
                    Ok((v as i16, w))
                }
            }),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_USHORT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_u64().and_then(|(v, w)| {
                if v > u64::from(u16::MAX) {
                    Err(ODBCError::IntegralTruncation(v.to_string()))
                } else {
                    Ok((v as u16, w))
                }
            }),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_SLONG => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_i64().and_then(|(v, w)| {
                if v > i64::from(i32::MAX) || v < i64::from(i32::MIN) {
                    Err(ODBCError::IntegralTruncation(v.to_string()))
                } else {
                    Ok((v as i32, w))
                }
            }),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_ULONG => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_u64().and_then(|(v, w)| {
                if v > u64::from(u32::MAX) {
                    Err(ODBCError::IntegralTruncation(v.to_string()))
                } else {
                    Ok((v as u32, w))
                }
            }),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_SBIGINT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_i64(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_UBIGINT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_u64(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_FLOAT => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_f32(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_DOUBLE => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_f64(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_NUMERIC => {
            stmt.insert_var_data_cache(col_num, CachedData::Fixed);
            match value.to_decimal() {
                Ok((decimal, scale)) => {
                    let numeric = numeric_struct_from(decimal, scale);
                    isize_len::set_output_fixed_data(
                        &numeric,
                        target_value_ptr,
                        str_len_or_ind_ptr,
                    )
                }
                Err(e) => {
                    handle.add_diag_info(e, function_name);
                    SqlReturn::ERROR
                }
            }
        }
        CDataType::SQL_C_DATE | CDataType::SQL_C_TYPE_DATE => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_date_struct(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_TIME | CDataType::SQL_C_TYPE_TIME => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_time_struct(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        CDataType::SQL_C_TIMESTAMP | CDataType::SQL_C_TYPE_TIMESTAMP => fixed_data_with_warnings!(
            handle,
            stmt,
            col_num,
            value.to_timestamp_struct(),
            target_value_ptr,
            str_len_or_ind_ptr,
            function_name
        ),
        interval
        @ (CDataType::SQL_C_INTERVAL_YEAR
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
        | CDataType::SQL_C_INTERVAL_MINUTE_TO_SECOND) => {
            stmt.insert_var_data_cache(col_num, CachedData::Fixed);
            match value.to_interval_struct(interval) {
                Ok(interval_struct) => {
                    ptr_safe_write(
                        str_len_or_ind_ptr,
                        size_of::<IntervalStruct>() as Len,
                    );
                    if target_value_ptr.is_null() {
                        return SqlReturn::SUCCESS_WITH_INFO;
                    }
                    std::ptr::copy_nonoverlapping(
                        &interval_struct as *const IntervalStruct,
                        target_value_ptr.cast::<IntervalStruct>(),
                        1,
                    );
                    SqlReturn::SUCCESS
                }
                Err(e) => {
                    handle.add_diag_info(e, function_name);
                    SqlReturn::ERROR
                }
            }
        }
        other => {
            handle.add_diag_info(
                ODBCError::RestrictedDataType(value.type_str(), format!("{other:?}")),
                function_name,
            );
            SqlReturn::ERROR
        }
    }
}

/// Continues streaming for a column that SQLGetData already touched.
///
/// # Safety
/// Writes through raw C pointers supplied by the application.
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn format_cached_cell(
    handle: &OdbcHandle,
    cached: CachedData,
    col_num: USmallInt,
    target_type: CDataType,
    target_value_ptr: Pointer,
    buffer_len: Len,
    str_len_or_ind_ptr: *mut Len,
    function_name: &'static str,
) -> SqlReturn {
    let stmt = match handle.as_statement() {
        Some(s) => s,
        None => return SqlReturn::INVALID_HANDLE,
    };
    match cached {
        // fixed data cannot be streamed; it was fully returned already
        fixed @ CachedData::Fixed => {
            stmt.insert_var_data_cache(col_num, fixed);
            SqlReturn::NO_DATA
        }
        CachedData::Char(index, data) => {
            if target_type != CDataType::SQL_C_CHAR || index >= data.len() {
                stmt.insert_var_data_cache(col_num, CachedData::Char(index, data));
                return SqlReturn::NO_DATA;
            }
            let ret = isize_len::set_output_string(
                stmt,
                data,
                col_num,
                index,
                target_value_ptr.cast::<Char>(),
                buffer_len.max(0) as usize,
                str_len_or_ind_ptr,
            );
            if ret == SqlReturn::SUCCESS_WITH_INFO {
                handle.add_diag_info(
                    ODBCError::OutStringTruncated(buffer_len.max(0) as usize),
                    function_name,
                );
            }
            ret
        }
        CachedData::WChar(index, data) => {
            if target_type != CDataType::SQL_C_WCHAR || index >= data.len() {
                stmt.insert_var_data_cache(col_num, CachedData::WChar(index, data));
                return SqlReturn::NO_DATA;
            }
            let ret = isize_len::set_output_wstring_as_bytes(
                stmt,
                data,
                col_num,
                index,
                target_value_ptr.cast::<WideChar>(),
                buffer_len.max(0) as usize,
                str_len_or_ind_ptr,
            );
            if ret == SqlReturn::SUCCESS_WITH_INFO {
                handle.add_diag_info(
                    ODBCError::OutStringTruncated(buffer_len.max(0) as usize),
                    function_name,
                );
            }
            ret
        }
        CachedData::Bin(index, data) => {
            if target_type != CDataType::SQL_C_BINARY || index >= data.len() {
                stmt.insert_var_data_cache(col_num, CachedData::Bin(index, data));
                return SqlReturn::NO_DATA;
            }
            let ret = isize_len::set_output_binary(
                stmt,
                data,
                col_num,
                index,
                target_value_ptr.cast::<Char>(),
                buffer_len.max(0) as usize,
                str_len_or_ind_ptr,
            );
            if ret == SqlReturn::SUCCESS_WITH_INFO {
                handle.add_diag_info(
                    ODBCError::OutStringTruncated(buffer_len.max(0) as usize),
                    function_name,
                );
            }
            ret
        }
    }
}

/// Row-status value for a per-cell outcome.
pub(crate) fn row_status_for(ret: SqlReturn) -> USmallInt {
    match ret {
        SqlReturn::SUCCESS => definitions::SQL_ROW_SUCCESS,
        SqlReturn::SUCCESS_WITH_INFO => definitions::SQL_ROW_SUCCESS_WITH_INFO,
        _ => definitions::SQL_ROW_ERROR,
    }
}

/// Unused ULen marker for rows-processed pointers.
pub(crate) unsafe fn write_rows_processed(ptr: *mut ULen, value: ULen) {
    ptr_safe_write(ptr, value);
}
