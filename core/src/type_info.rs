//! The compile-time ODBC type table and the engine-type mapping built on
//! it. `GetTypeInfo`, descriptor consistency checks, and IRD population all
//! read from here.

use crate::engine::{EngineType, TimeUnit};
use definitions::{
    datetime_interval_code, Nullability, SqlDataType, SQL_PRED_BASIC, SQL_PRED_CHAR,
    SQL_SEARCHABLE,
};

// MSDASQL reads this as the max string size when DuckDB is a linked ODBC
// source in MSSQL; anything over 8000 breaks string reads entirely.
pub const MAX_VARCHAR_COLUMN_SIZE: i32 = 8000;
pub const MAX_VARBINARY_COLUMN_SIZE: i32 = MAX_VARCHAR_COLUMN_SIZE;
pub const DECIMAL_MAX_WIDTH: u8 = 38;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub data_type: SqlDataType,
    pub column_size: Option<i32>,
    pub literal_prefix: Option<&'static str>,
    pub literal_suffix: Option<&'static str>,
    pub create_params: Option<&'static str>,
    pub nullable: Nullability,
    pub case_sensitive: bool,
    pub searchable: i32,
    pub unsigned_attribute: Option<bool>,
    pub fixed_prec_scale: bool,
    pub auto_unique_value: Option<bool>,
    pub local_type_name: Option<&'static str>,
    pub minimum_scale: Option<i16>,
    pub maximum_scale: Option<i16>,
    pub sql_datetime_sub: Option<i16>,
    pub num_prec_radix: Option<i32>,
    pub interval_precision: Option<i16>,
}

impl TypeInfo {
    /// The verbose type for SQL_DESC_TYPE.
    pub fn verbose_type(&self) -> SqlDataType {
        self.data_type.verbose()
    }
}

macro_rules! numeric_type {
    ($name:literal, $sql:expr, $size:expr, $unsigned:expr) => {
        TypeInfo {
            type_name: $name,
            data_type: $sql,
            column_size: Some($size),
            literal_prefix: None,
            literal_suffix: None,
            create_params: None,
            nullable: Nullability::SQL_NULLABLE,
            case_sensitive: false,
            searchable: SQL_PRED_BASIC,
            unsigned_attribute: Some($unsigned),
            fixed_prec_scale: false,
            auto_unique_value: Some(false),
            local_type_name: Some($name),
            minimum_scale: Some(0),
            maximum_scale: Some(0),
            sql_datetime_sub: None,
            num_prec_radix: Some(10),
            interval_precision: None,
        }
    };
}

macro_rules! timestamp_type {
    ($name:literal, $size:expr, $scale:expr) => {
        TypeInfo {
            type_name: $name,
            data_type: SqlDataType::SQL_TYPE_TIMESTAMP,
            column_size: Some($size),
            literal_prefix: Some("'"),
            literal_suffix: Some("'"),
            create_params: None,
            nullable: Nullability::SQL_NULLABLE,
            case_sensitive: false,
            searchable: SQL_PRED_BASIC,
            unsigned_attribute: None,
            fixed_prec_scale: false,
            auto_unique_value: None,
            local_type_name: Some($name),
            minimum_scale: Some($scale),
            maximum_scale: Some($scale),
            sql_datetime_sub: Some(definitions::SQL_CODE_TIMESTAMP),
            num_prec_radix: None,
            interval_precision: None,
        }
    };
}

/// Every type the driver advertises through `SQLGetTypeInfo`, ordered by
/// data type as the ODBC spec requires.
pub const TYPE_INFO_TABLE: &[TypeInfo] = &[
    TypeInfo {
        type_name: "BOOLEAN",
        data_type: SqlDataType::SQL_BIT,
        column_size: Some(1),
        literal_prefix: None,
        literal_suffix: None,
        create_params: None,
        nullable: Nullability::SQL_NULLABLE,
        case_sensitive: false,
        searchable: SQL_PRED_BASIC,
        unsigned_attribute: None,
        fixed_prec_scale: false,
        auto_unique_value: None,
        local_type_name: Some("BOOLEAN"),
        minimum_scale: None,
        maximum_scale: None,
        sql_datetime_sub: None,
        num_prec_radix: None,
        interval_precision: None,
    },
    numeric_type!("TINYINT", SqlDataType::SQL_TINYINT, 3, false),
    numeric_type!("UTINYINT", SqlDataType::SQL_TINYINT, 3, true),
    numeric_type!("BIGINT", SqlDataType::SQL_BIGINT, 19, false),
    numeric_type!("UBIGINT", SqlDataType::SQL_BIGINT, 20, true),
    numeric_type!("HUGEINT", SqlDataType::SQL_NUMERIC, 38, false),
    TypeInfo {
        type_name: "DECIMAL",
        create_params: Some("precision,scale"),
        fixed_prec_scale: false,
        minimum_scale: Some(0),
        maximum_scale: Some(DECIMAL_MAX_WIDTH as i16),
        ..numeric_type!("DECIMAL", SqlDataType::SQL_NUMERIC, 38, false)
    },
    numeric_type!("SMALLINT", SqlDataType::SQL_SMALLINT, 5, false),
    numeric_type!("USMALLINT", SqlDataType::SQL_SMALLINT, 5, true),
    numeric_type!("INTEGER", SqlDataType::SQL_INTEGER, 10, false),
    numeric_type!("UINTEGER", SqlDataType::SQL_INTEGER, 10, true),
    TypeInfo {
        type_name: "FLOAT",
        num_prec_radix: Some(2),
        ..numeric_type!("FLOAT", SqlDataType::SQL_FLOAT, 24, false)
    },
    TypeInfo {
        type_name: "DOUBLE",
        num_prec_radix: Some(2),
        ..numeric_type!("DOUBLE", SqlDataType::SQL_DOUBLE, 53, false)
    },
    TypeInfo {
        type_name: "VARCHAR",
        data_type: SqlDataType::SQL_VARCHAR,
        column_size: Some(MAX_VARCHAR_COLUMN_SIZE),
        literal_prefix: Some("'"),
        literal_suffix: Some("'"),
        create_params: Some("length"),
        nullable: Nullability::SQL_NULLABLE,
        case_sensitive: true,
        searchable: SQL_SEARCHABLE,
        unsigned_attribute: None,
        fixed_prec_scale: false,
        auto_unique_value: None,
        local_type_name: Some("VARCHAR"),
        minimum_scale: None,
        maximum_scale: None,
        sql_datetime_sub: None,
        num_prec_radix: None,
        interval_precision: None,
    },
    TypeInfo {
        type_name: "BLOB",
        data_type: SqlDataType::SQL_VARBINARY,
        column_size: Some(MAX_VARBINARY_COLUMN_SIZE),
        literal_prefix: Some("'"),
        literal_suffix: Some("'"),
        create_params: None,
        nullable: Nullability::SQL_NULLABLE,
        case_sensitive: false,
        searchable: SQL_PRED_CHAR,
        unsigned_attribute: None,
        fixed_prec_scale: false,
        auto_unique_value: None,
        local_type_name: Some("BLOB"),
        minimum_scale: None,
        maximum_scale: None,
        sql_datetime_sub: None,
        num_prec_radix: None,
        interval_precision: None,
    },
    TypeInfo {
        type_name: "DATE",
        data_type: SqlDataType::SQL_TYPE_DATE,
        column_size: Some(10),
        literal_prefix: Some("'"),
        literal_suffix: Some("'"),
        create_params: None,
        nullable: Nullability::SQL_NULLABLE,
        case_sensitive: false,
        searchable: SQL_PRED_BASIC,
        unsigned_attribute: None,
        fixed_prec_scale: false,
        auto_unique_value: None,
        local_type_name: Some("DATE"),
        minimum_scale: None,
        maximum_scale: None,
        sql_datetime_sub: Some(definitions::SQL_CODE_DATE),
        num_prec_radix: None,
        interval_precision: None,
    },
    TypeInfo {
        type_name: "TIME",
        data_type: SqlDataType::SQL_TYPE_TIME,
        column_size: Some(15),
        literal_prefix: Some("'"),
        literal_suffix: Some("'"),
        create_params: None,
        nullable: Nullability::SQL_NULLABLE,
        case_sensitive: false,
        searchable: SQL_PRED_BASIC,
        unsigned_attribute: None,
        fixed_prec_scale: false,
        auto_unique_value: None,
        local_type_name: Some("TIME"),
        minimum_scale: Some(6),
        maximum_scale: Some(6),
        sql_datetime_sub: Some(definitions::SQL_CODE_TIME),
        num_prec_radix: None,
        interval_precision: None,
    },
    timestamp_type!("TIMESTAMP_S", 19, 0),
    timestamp_type!("TIMESTAMP_MS", 23, 3),
    timestamp_type!("TIMESTAMP", 26, 6),
    timestamp_type!("TIMESTAMP_NS", 29, 9),
    timestamp_type!("TIMESTAMP WITH TIME ZONE", 32, 6),
    TypeInfo {
        type_name: "INTERVAL",
        data_type: SqlDataType::SQL_INTERVAL_DAY_TO_SECOND,
        column_size: Some(34),
        literal_prefix: Some("'"),
        literal_suffix: Some("'"),
        create_params: None,
        nullable: Nullability::SQL_NULLABLE,
        case_sensitive: false,
        searchable: SQL_PRED_BASIC,
        unsigned_attribute: None,
        fixed_prec_scale: false,
        auto_unique_value: None,
        local_type_name: Some("INTERVAL"),
        minimum_scale: None,
        maximum_scale: None,
        sql_datetime_sub: Some(definitions::SQL_CODE_DAY_TO_SECOND),
        num_prec_radix: None,
        interval_precision: Some(9),
    },
];

fn sql_data_type_from_i16(v: i16) -> Option<SqlDataType> {
    <SqlDataType as num_traits::FromPrimitive>::from_i16(v)
}

/// Collapses the SQL type aliases clients commonly bind with onto the
/// native rows of the table.
fn normalize_sql_type(data_type: i16) -> i16 {
    let normalized = match sql_data_type_from_i16(data_type) {
        Some(SqlDataType::SQL_CHAR)
        | Some(SqlDataType::SQL_WCHAR)
        | Some(SqlDataType::SQL_WVARCHAR)
        | Some(SqlDataType::SQL_LONGVARCHAR)
        | Some(SqlDataType::SQL_WLONGVARCHAR) => SqlDataType::SQL_VARCHAR,
        Some(SqlDataType::SQL_BINARY) | Some(SqlDataType::SQL_LONGVARBINARY) => {
            SqlDataType::SQL_VARBINARY
        }
        Some(SqlDataType::SQL_DECIMAL) => SqlDataType::SQL_NUMERIC,
        Some(SqlDataType::SQL_REAL) => SqlDataType::SQL_FLOAT,
        Some(SqlDataType::SQL_TIMESTAMP) => SqlDataType::SQL_TYPE_TIMESTAMP,
        Some(SqlDataType::SQL_DATETIME) => SqlDataType::SQL_TYPE_DATE,
        Some(t) if t.is_interval() => SqlDataType::SQL_INTERVAL_DAY_TO_SECOND,
        Some(t) => t,
        None => return data_type,
    };
    normalized as i16
}

/// Rows of the table matching the requested SQL type;
/// `SQL_ALL_TYPES` (0) returns the whole table.
pub fn find_data_types(data_type: i16) -> Vec<&'static TypeInfo> {
    if data_type == definitions::SQL_ALL_TYPES {
        return TYPE_INFO_TABLE.iter().collect();
    }
    let normalized = normalize_sql_type(data_type);
    TYPE_INFO_TABLE
        .iter()
        .filter(|t| t.data_type as i16 == normalized)
        .collect()
}

/// The canonical table row for an engine type.
pub fn type_info_for(engine_type: &EngineType) -> &'static TypeInfo {
    let name = engine_type.type_name();
    TYPE_INFO_TABLE
        .iter()
        .find(|t| t.type_name == name)
        // unknown engine types read back as VARCHAR of unknown size
        .unwrap_or_else(|| {
            TYPE_INFO_TABLE
                .iter()
                .find(|t| t.type_name == "VARCHAR")
                .expect("VARCHAR row is always present")
        })
}

/// The concise SQL type the driver reports for an engine type.
pub fn find_related_sql_type(engine_type: &EngineType) -> SqlDataType {
    type_info_for(engine_type).data_type
}

/// ODBC column size for a concrete engine type.
pub fn column_size(engine_type: &EngineType) -> Option<i32> {
    match engine_type {
        EngineType::Decimal { width, .. } => Some(i32::from(*width)),
        EngineType::Unknown => None,
        _ => type_info_for(engine_type).column_size,
    }
}

/// Maximum number of characters needed to display a value.
pub fn display_size(engine_type: &EngineType) -> Option<i32> {
    match engine_type {
        EngineType::Boolean => Some(5),
        // one character for the sign
        EngineType::TinyInt
        | EngineType::SmallInt
        | EngineType::Integer
        | EngineType::BigInt
        | EngineType::HugeInt => column_size(engine_type).map(|s| s + 1),
        EngineType::UTinyInt
        | EngineType::USmallInt
        | EngineType::UInteger
        | EngineType::UBigInt => column_size(engine_type),
        EngineType::Float => Some(14),
        EngineType::Double => Some(24),
        EngineType::Decimal { width, .. } => Some(i32::from(*width) + 2),
        _ => column_size(engine_type),
    }
}

/// Fractional-seconds precision for temporal engine types, None otherwise.
pub fn temporal_precision(engine_type: &EngineType) -> Option<i16> {
    match engine_type {
        EngineType::Time => Some(6),
        EngineType::Timestamp(unit) => Some(unit.precision()),
        EngineType::TimestampTz => Some(6),
        _ => None,
    }
}

/// Size in bytes of the transfer form of the type, for SQL_DESC_OCTET_LENGTH.
pub fn octet_length(engine_type: &EngineType) -> Option<i32> {
    match engine_type {
        EngineType::Boolean | EngineType::TinyInt | EngineType::UTinyInt => Some(1),
        EngineType::SmallInt | EngineType::USmallInt => Some(2),
        EngineType::Integer | EngineType::UInteger | EngineType::Float => Some(4),
        EngineType::BigInt
        | EngineType::UBigInt
        | EngineType::Double
        | EngineType::Time
        | EngineType::Timestamp(_)
        | EngineType::TimestampTz => Some(8),
        EngineType::HugeInt | EngineType::Decimal { .. } | EngineType::Interval => Some(16),
        EngineType::Date => Some(4),
        EngineType::Varchar => Some(MAX_VARCHAR_COLUMN_SIZE),
        EngineType::Blob => Some(MAX_VARBINARY_COLUMN_SIZE),
        EngineType::Unknown => None,
    }
}

/// Column metadata the fetch path and the IRD expose for one result
/// column.
#[derive(Debug, Clone)]
pub struct ColumnMetadata {
    pub name: String,
    pub label: String,
    pub base_column_name: String,
    pub base_table_name: String,
    pub table_name: String,
    pub catalog_name: String,
    pub schema_name: String,
    pub engine_type: EngineType,
    pub type_name: String,
    pub sql_type: SqlDataType,
    pub non_concise_type: SqlDataType,
    pub sql_code: Option<i16>,
    pub display_size: Option<i32>,
    pub column_size: Option<i32>,
    pub octet_length: Option<i32>,
    pub precision: Option<i16>,
    pub scale: Option<i16>,
    pub nullability: Nullability,
    pub is_unsigned: bool,
    pub is_case_sensitive: bool,
    pub searchable: i32,
    pub fixed_prec_scale: bool,
    pub literal_prefix: Option<&'static str>,
    pub literal_suffix: Option<&'static str>,
}

impl ColumnMetadata {
    pub fn new(name: String, engine_type: EngineType) -> ColumnMetadata {
        let info = type_info_for(&engine_type);
        let sql_type = info.data_type;
        let (precision, scale) = match engine_type {
            EngineType::Decimal { width, scale } => {
                (Some(i16::from(width)), Some(i16::from(scale)))
            }
            _ => match temporal_precision(&engine_type) {
                Some(p) => (Some(p), Some(p)),
                None => (info.column_size.map(|s| s as i16), None),
            },
        };
        ColumnMetadata {
            label: name.clone(),
            base_column_name: name.clone(),
            base_table_name: String::new(),
            table_name: String::new(),
            catalog_name: String::new(),
            schema_name: String::new(),
            type_name: engine_type.type_name().to_string(),
            sql_type,
            non_concise_type: sql_type.verbose(),
            sql_code: datetime_interval_code(sql_type),
            display_size: display_size(&engine_type),
            column_size: column_size(&engine_type),
            octet_length: octet_length(&engine_type),
            precision,
            scale,
            nullability: Nullability::SQL_NULLABLE,
            is_unsigned: engine_type.is_unsigned() || !matches!(info.unsigned_attribute, Some(false)),
            is_case_sensitive: info.case_sensitive,
            searchable: info.searchable,
            fixed_prec_scale: info.fixed_prec_scale,
            literal_prefix: info.literal_prefix,
            literal_suffix: info.literal_suffix,
            engine_type,
            name,
        }
    }
}

fn sql_literal(text: Option<&str>) -> String {
    match text {
        Some(t) => format!("'{}'", t.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

fn sql_int<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NULL".to_string(),
    }
}

/// Composes the VALUES query that materializes `SQLGetTypeInfo` through
/// the regular execute/fetch path.
pub fn type_info_values_query(data_type: i16) -> String {
    let rows = find_data_types(data_type);
    if rows.is_empty() {
        // zero rows, full column shape
        return "SELECT * FROM (VALUES (NULL::VARCHAR, NULL::SMALLINT, NULL::INTEGER, \
                NULL::VARCHAR, NULL::VARCHAR, NULL::VARCHAR, NULL::SMALLINT, NULL::SMALLINT, \
                NULL::SMALLINT, NULL::SMALLINT, NULL::SMALLINT, NULL::SMALLINT, NULL::VARCHAR, \
                NULL::SMALLINT, NULL::SMALLINT, NULL::SMALLINT, NULL::SMALLINT, NULL::INTEGER, \
                NULL::SMALLINT)) AS t(\"TYPE_NAME\", \"DATA_TYPE\", \"COLUMN_SIZE\", \
                \"LITERAL_PREFIX\", \"LITERAL_SUFFIX\", \"CREATE_PARAMS\", \"NULLABLE\", \
                \"CASE_SENSITIVE\", \"SEARCHABLE\", \"UNSIGNED_ATTRIBUTE\", \"FIXED_PREC_SCALE\", \
                \"AUTO_UNIQUE_VALUE\", \"LOCAL_TYPE_NAME\", \"MINIMUM_SCALE\", \"MAXIMUM_SCALE\", \
                \"SQL_DATA_TYPE\", \"SQL_DATETIME_SUB\", \"NUM_PREC_RADIX\", \"INTERVAL_PRECISION\") \
                WHERE 1=0"
            .to_string();
    }
    let values = rows
        .iter()
        .map(|t| {
            format!(
                "({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
                sql_literal(Some(t.type_name)),
                t.data_type as i16,
                sql_int(t.column_size),
                sql_literal(t.literal_prefix),
                sql_literal(t.literal_suffix),
                sql_literal(t.create_params),
                t.nullable as i16,
                i16::from(t.case_sensitive),
                t.searchable,
                sql_int(t.unsigned_attribute.map(i16::from)),
                i16::from(t.fixed_prec_scale),
                sql_int(t.auto_unique_value.map(i16::from)),
                sql_literal(t.local_type_name),
                sql_int(t.minimum_scale),
                sql_int(t.maximum_scale),
                t.verbose_type() as i16,
                sql_int(t.sql_datetime_sub),
                sql_int(t.num_prec_radix),
                sql_int(t.interval_precision),
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT * FROM (VALUES {values}) AS t(\"TYPE_NAME\", \"DATA_TYPE\", \"COLUMN_SIZE\", \
         \"LITERAL_PREFIX\", \"LITERAL_SUFFIX\", \"CREATE_PARAMS\", \"NULLABLE\", \
         \"CASE_SENSITIVE\", \"SEARCHABLE\", \"UNSIGNED_ATTRIBUTE\", \"FIXED_PREC_SCALE\", \
         \"AUTO_UNIQUE_VALUE\", \"LOCAL_TYPE_NAME\", \"MINIMUM_SCALE\", \"MAXIMUM_SCALE\", \
         \"SQL_DATA_TYPE\", \"SQL_DATETIME_SUB\", \"NUM_PREC_RADIX\", \"INTERVAL_PRECISION\") \
         ORDER BY \"DATA_TYPE\""
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn engine_types_map_to_sql_types() {
        assert_eq!(
            SqlDataType::SQL_INTEGER,
            find_related_sql_type(&EngineType::Integer)
        );
        assert_eq!(SqlDataType::SQL_BIT, find_related_sql_type(&EngineType::Boolean));
        assert_eq!(
            SqlDataType::SQL_NUMERIC,
            find_related_sql_type(&EngineType::Decimal { width: 12, scale: 3 })
        );
        assert_eq!(
            SqlDataType::SQL_TYPE_TIMESTAMP,
            find_related_sql_type(&EngineType::Timestamp(TimeUnit::Millisecond))
        );
        assert_eq!(
            SqlDataType::SQL_VARCHAR,
            find_related_sql_type(&EngineType::Unknown)
        );
    }

    #[test]
    fn timestamp_ms_shape() {
        let md = ColumnMetadata::new("ts".into(), EngineType::Timestamp(TimeUnit::Millisecond));
        assert_eq!(Some(23), md.column_size);
        assert_eq!(Some(23), md.display_size);
        assert_eq!(Some(3), md.precision);
        assert_eq!(Some(3), md.scale);
        assert_eq!(Some(definitions::SQL_CODE_TIMESTAMP), md.sql_code);
        assert_eq!(SqlDataType::SQL_DATETIME, md.non_concise_type);
    }

    #[test]
    fn unsigned_display_size_has_no_sign() {
        assert_eq!(Some(11), display_size(&EngineType::Integer));
        assert_eq!(Some(10), display_size(&EngineType::UInteger));
    }

    #[test]
    fn decimal_precision_follows_the_value_type() {
        let md = ColumnMetadata::new("d".into(), EngineType::Decimal { width: 38, scale: 0 });
        assert_eq!(Some(38), md.precision);
        assert_eq!(Some(0), md.scale);
        assert_eq!(Some(38), md.column_size);
        assert_eq!(Some(40), md.display_size);
    }

    #[test]
    fn alias_types_resolve_to_native_rows() {
        assert!(!find_data_types(SqlDataType::SQL_WVARCHAR as i16).is_empty());
        assert!(!find_data_types(SqlDataType::SQL_DECIMAL as i16).is_empty());
        assert!(!find_data_types(SqlDataType::SQL_INTERVAL_YEAR as i16).is_empty());
        assert!(find_data_types(SqlDataType::SQL_GUID as i16).is_empty());
    }

    #[test]
    fn all_types_query_lists_every_row() {
        let q = type_info_values_query(definitions::SQL_ALL_TYPES);
        assert!(q.contains("'TIMESTAMP_MS'"));
        assert!(q.contains("'VARCHAR'"));
        assert!(q.contains("ORDER BY \"DATA_TYPE\""));
    }
}
