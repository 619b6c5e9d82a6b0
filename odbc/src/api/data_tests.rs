use crate::api::data::{
    i16_len, numeric_struct_from, resolve_default_c_type, IntoCData,
};
use cstr::{from_widechar_ref_lossy, WideChar};
use definitions::{CDataType, SqlReturn, Timestamp};
use duckdb_odbc_core::{EngineType, EngineValue, TimeUnit};

mod writer_contract {
    use super::*;

    #[test]
    fn narrow_writer_truncates_and_reports_full_length() {
        let mut buf = [0u8; 4];
        let mut len: i16 = 0;
        let ret = unsafe {
            i16_len::set_output_string("DuckDB", buf.as_mut_ptr(), buf.len(), &mut len)
        };
        assert_eq!(SqlReturn::SUCCESS_WITH_INFO, ret);
        // the reported length is the untruncated length
        assert_eq!(6, len);
        assert_eq!(b"Duc\0", &buf);
    }

    #[test]
    fn narrow_writer_fits_and_terminates() {
        let mut buf = [0u8; 16];
        let mut len: i16 = 0;
        let ret = unsafe {
            i16_len::set_output_string("DuckDB", buf.as_mut_ptr(), buf.len(), &mut len)
        };
        assert_eq!(SqlReturn::SUCCESS, ret);
        assert_eq!(6, len);
        assert_eq!(b"DuckDB\0", &buf[..7]);
    }

    #[test]
    fn null_output_pointer_reports_length_only() {
        let mut len: i16 = 0;
        let ret = unsafe {
            i16_len::set_output_string("DuckDB", std::ptr::null_mut(), 0, &mut len)
        };
        assert_eq!(SqlReturn::SUCCESS, ret);
        assert_eq!(6, len);
    }

    #[test]
    fn wide_writer_counts_characters() {
        let mut buf = [0 as WideChar; 3];
        let mut len: i16 = 0;
        let ret = unsafe {
            i16_len::set_output_wstring("Здравейте", buf.as_mut_ptr(), buf.len(), &mut len)
        };
        assert_eq!(SqlReturn::SUCCESS_WITH_INFO, ret);
        assert_eq!(9, len);
        assert_eq!("Зд\0", from_widechar_ref_lossy(&buf));
    }

    #[test]
    fn wide_byte_len_writer_reports_bytes() {
        let mut buf = [0 as WideChar; 16];
        let mut len: i16 = 0;
        let ret = unsafe {
            i16_len::set_output_wstring_byte_len(
                "Здравейте",
                buf.as_mut_ptr().cast(),
                buf.len(),
                &mut len,
            )
        };
        assert_eq!(SqlReturn::SUCCESS, ret);
        // nine UTF-16 code units, reported in bytes
        assert_eq!(18, len);
        assert_eq!(
            vec![0x0417, 0x0434, 0x0440, 0x0430, 0x0432, 0x0435, 0x0439, 0x0442, 0x0435],
            buf[..9].to_vec()
        );
    }
}

mod numeric_struct {
    use super::*;

    #[test]
    fn thirty_eight_digit_numeric() {
        let value: i128 = 12345678901234567890123456789012345678;
        let numeric = numeric_struct_from(value, 0);
        assert_eq!(38, numeric.precision);
        assert_eq!(0, numeric.scale);
        assert_eq!(1, numeric.sign);
        assert_eq!(
            [
                0x4E, 0xF3, 0x38, 0xDE, 0x50, 0x90, 0x49, 0xC4, 0x13, 0x33, 0x02, 0xF0, 0xF6,
                0xB0, 0x49, 0x09
            ],
            numeric.val
        );
    }

    #[test]
    fn negative_values_keep_a_positive_mantissa() {
        let numeric = numeric_struct_from(-255, 0);
        assert_eq!(0, numeric.sign);
        assert_eq!(3, numeric.precision);
        assert_eq!(255, u128::from_le_bytes(numeric.val));
    }

    #[test]
    fn zero_fraction_drops_trailing_zeros() {
        // 123.00 is transported as 123 with scale 0 and precision 3
        let numeric = numeric_struct_from(12300, 2);
        assert_eq!(0, numeric.scale);
        assert_eq!(3, numeric.precision);
        assert_eq!(123, u128::from_le_bytes(numeric.val));
    }
}

mod conversions {
    use super::*;

    #[test]
    fn decimal_to_i64_truncates_fraction_with_warning() {
        let value = EngineValue::Decimal {
            value: 12345,
            width: 5,
            scale: 2,
        };
        let (converted, warning) = value.to_i64().unwrap();
        assert_eq!(123, converted);
        assert!(warning.is_some());
    }

    #[test]
    fn out_of_range_yields_integral_truncation() {
        let value = EngineValue::UBigInt(u64::MAX);
        assert!(value.to_i64().is_err());
    }

    #[test]
    fn varchar_parses_into_numbers() {
        assert_eq!(42, EngineValue::Varchar("42".into()).to_i64().unwrap().0);
        assert_eq!(
            2.5,
            EngineValue::Varchar("2.5".into()).to_f64().unwrap().0
        );
        assert!(EngineValue::Varchar("quack".into()).to_i64().is_err());
    }

    #[test]
    fn decimal_renders_with_scale() {
        let value = EngineValue::Decimal {
            value: 12345,
            width: 5,
            scale: 2,
        };
        assert_eq!("123.45", value.to_char_string().unwrap());
    }

    #[test]
    fn date_becomes_zero_padded_timestamp() {
        // 2024-02-29 is day 19782 from the epoch
        let value = EngineValue::Date { days: 19_782 };
        let (ts, _) = value.to_timestamp_struct().unwrap();
        assert_eq!(
            Timestamp {
                year: 2024,
                month: 2,
                day: 29,
                hour: 0,
                minute: 0,
                second: 0,
                fraction: 0
            },
            ts
        );
    }

    #[test]
    fn time_lands_on_the_epoch_date() {
        let value = EngineValue::Time {
            micros: ((11 * 3600) + (22 * 60) + 33) * 1_000_000 + 123_456,
        };
        let (ts, _) = value.to_timestamp_struct().unwrap();
        assert_eq!(1970, ts.year);
        assert_eq!(1, ts.month);
        assert_eq!(1, ts.day);
        assert_eq!(11, ts.hour);
        assert_eq!(22, ts.minute);
        assert_eq!(33, ts.second);
        // the struct fraction is nanoseconds
        assert_eq!(123_456_000, ts.fraction);
    }

    #[test]
    fn millisecond_timestamps_round_trip_their_unit() {
        let value = EngineValue::Timestamp {
            value: 1_700_000_000_123,
            unit: TimeUnit::Millisecond,
        };
        let (ts, _) = value.to_timestamp_struct().unwrap();
        assert_eq!(2023, ts.year);
        assert_eq!(123_000_000, ts.fraction);
    }

    #[test]
    fn interval_year_to_month_splits_months() {
        let value = EngineValue::Interval {
            months: 26,
            days: 0,
            micros: 0,
        };
        let interval = value
            .to_interval_struct(CDataType::SQL_C_INTERVAL_YEAR_TO_MONTH)
            .unwrap();
        assert_eq!(definitions::SQL_IS_YEAR_TO_MONTH, interval.interval_type);
        assert_eq!(0, interval.interval_sign);
        let ym = unsafe { interval.interval_value.year_month };
        assert_eq!(2, ym.year);
        assert_eq!(2, ym.month);
    }

    #[test]
    fn interval_day_to_second_splits_time_fields() {
        let micros = ((26 * 3600) + (3 * 60) + 4) * 1_000_000 + 500_000;
        let value = EngineValue::Interval {
            months: 0,
            days: 1,
            micros,
        };
        let interval = value
            .to_interval_struct(CDataType::SQL_C_INTERVAL_DAY_TO_SECOND)
            .unwrap();
        let ds = unsafe { interval.interval_value.day_second };
        // 26 hours roll one day over
        assert_eq!(2, ds.day);
        assert_eq!(2, ds.hour);
        assert_eq!(3, ds.minute);
        assert_eq!(4, ds.second);
        assert_eq!(500_000_000, ds.fraction);
    }

    #[test]
    fn negative_interval_sets_the_sign() {
        let value = EngineValue::Interval {
            months: -18,
            days: 0,
            micros: 0,
        };
        let interval = value
            .to_interval_struct(CDataType::SQL_C_INTERVAL_MONTH)
            .unwrap();
        assert_eq!(1, interval.interval_sign);
        let ym = unsafe { interval.interval_value.year_month };
        assert_eq!(18, ym.month);
    }
}

mod default_resolution {
    use super::*;

    #[test]
    fn integer_with_two_byte_buffer_resolves_to_short() {
        assert_eq!(
            CDataType::SQL_C_SSHORT,
            resolve_default_c_type(&EngineType::Integer, 2)
        );
        assert_eq!(
            CDataType::SQL_C_SLONG,
            resolve_default_c_type(&EngineType::Integer, 4)
        );
        assert_eq!(
            CDataType::SQL_C_SLONG,
            resolve_default_c_type(&EngineType::Integer, 0)
        );
    }

    #[test]
    fn variable_types_default_to_their_natural_c_type() {
        assert_eq!(
            CDataType::SQL_C_CHAR,
            resolve_default_c_type(&EngineType::Varchar, 64)
        );
        assert_eq!(
            CDataType::SQL_C_BINARY,
            resolve_default_c_type(&EngineType::Blob, 64)
        );
        assert_eq!(
            CDataType::SQL_C_TYPE_TIMESTAMP,
            resolve_default_c_type(&EngineType::Timestamp(TimeUnit::Microsecond), 0)
        );
        assert_eq!(
            CDataType::SQL_C_CHAR,
            resolve_default_c_type(&EngineType::Decimal { width: 18, scale: 3 }, 0)
        );
    }
}
