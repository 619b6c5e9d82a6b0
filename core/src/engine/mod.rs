//! The facade through which the driver talks to the embedded SQL engine.
//!
//! Everything above this module only sees trait objects; the concrete
//! engine is registered once per process through [`factory`]. The unit-test
//! suite installs the scripted [`mock`] engine.

pub mod factory;
pub mod mock;

use crate::err::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use factory::{engine_factory, set_engine_factory};

/// Granularity of an engine timestamp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl TimeUnit {
    /// ODBC fractional-seconds precision for this granularity.
    pub fn precision(&self) -> i16 {
        match self {
            TimeUnit::Second => 0,
            TimeUnit::Millisecond => 3,
            TimeUnit::Microsecond => 6,
            TimeUnit::Nanosecond => 9,
        }
    }
}

/// Engine logical types, the row axis of the conversion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    HugeInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    Float,
    Double,
    Decimal { width: u8, scale: u8 },
    Varchar,
    Blob,
    Date,
    Time,
    Timestamp(TimeUnit),
    TimestampTz,
    Interval,
    Unknown,
}

impl EngineType {
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            EngineType::UTinyInt
                | EngineType::USmallInt
                | EngineType::UInteger
                | EngineType::UBigInt
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            EngineType::Boolean => "BOOLEAN",
            EngineType::TinyInt => "TINYINT",
            EngineType::SmallInt => "SMALLINT",
            EngineType::Integer => "INTEGER",
            EngineType::BigInt => "BIGINT",
            EngineType::HugeInt => "HUGEINT",
            EngineType::UTinyInt => "UTINYINT",
            EngineType::USmallInt => "USMALLINT",
            EngineType::UInteger => "UINTEGER",
            EngineType::UBigInt => "UBIGINT",
            EngineType::Float => "FLOAT",
            EngineType::Double => "DOUBLE",
            EngineType::Decimal { .. } => "DECIMAL",
            EngineType::Varchar => "VARCHAR",
            EngineType::Blob => "BLOB",
            EngineType::Date => "DATE",
            EngineType::Time => "TIME",
            EngineType::Timestamp(TimeUnit::Second) => "TIMESTAMP_S",
            EngineType::Timestamp(TimeUnit::Millisecond) => "TIMESTAMP_MS",
            EngineType::Timestamp(TimeUnit::Microsecond) => "TIMESTAMP",
            EngineType::Timestamp(TimeUnit::Nanosecond) => "TIMESTAMP_NS",
            EngineType::TimestampTz => "TIMESTAMP WITH TIME ZONE",
            EngineType::Interval => "INTERVAL",
            EngineType::Unknown => "UNKNOWN",
        }
    }
}

/// A single engine value. Temporal fields use the engine's epoch-relative
/// representation: days since 1970-01-01 for dates, microseconds since
/// midnight for times, epoch offsets in the unit's granularity for
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineValue {
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    HugeInt(i128),
    UTinyInt(u8),
    USmallInt(u16),
    UInteger(u32),
    UBigInt(u64),
    Float(f32),
    Double(f64),
    Decimal { value: i128, width: u8, scale: u8 },
    Varchar(String),
    Blob(Vec<u8>),
    Date { days: i32 },
    Time { micros: i64 },
    Timestamp { value: i64, unit: TimeUnit },
    TimestampTz { micros: i64 },
    Interval { months: i32, days: i32, micros: i64 },
}

impl EngineValue {
    pub fn is_null(&self) -> bool {
        matches!(self, EngineValue::Null)
    }

    pub fn engine_type(&self) -> EngineType {
        match self {
            EngineValue::Null => EngineType::Unknown,
            EngineValue::Boolean(_) => EngineType::Boolean,
            EngineValue::TinyInt(_) => EngineType::TinyInt,
            EngineValue::SmallInt(_) => EngineType::SmallInt,
            EngineValue::Integer(_) => EngineType::Integer,
            EngineValue::BigInt(_) => EngineType::BigInt,
            EngineValue::HugeInt(_) => EngineType::HugeInt,
            EngineValue::UTinyInt(_) => EngineType::UTinyInt,
            EngineValue::USmallInt(_) => EngineType::USmallInt,
            EngineValue::UInteger(_) => EngineType::UInteger,
            EngineValue::UBigInt(_) => EngineType::UBigInt,
            EngineValue::Float(_) => EngineType::Float,
            EngineValue::Double(_) => EngineType::Double,
            EngineValue::Decimal { width, scale, .. } => EngineType::Decimal {
                width: *width,
                scale: *scale,
            },
            EngineValue::Varchar(_) => EngineType::Varchar,
            EngineValue::Blob(_) => EngineType::Blob,
            EngineValue::Date { .. } => EngineType::Date,
            EngineValue::Time { .. } => EngineType::Time,
            EngineValue::Timestamp { unit, .. } => EngineType::Timestamp(*unit),
            EngineValue::TimestampTz { .. } => EngineType::TimestampTz,
            EngineValue::Interval { .. } => EngineType::Interval,
        }
    }

    pub fn type_str(&self) -> &'static str {
        self.engine_type().type_name()
    }
}

/// One page of an engine result, row major.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataChunk {
    pub rows: Vec<Vec<EngineValue>>,
}

impl DataChunk {
    pub fn new(rows: Vec<Vec<EngineValue>>) -> Self {
        DataChunk { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&EngineValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Cancels an in-flight execute from another thread. Clones share the
/// underlying token, so a connection can keep one outside the session lock.
#[derive(Clone)]
pub struct InterruptHandle(Arc<dyn Fn() + Send + Sync>);

impl InterruptHandle {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        InterruptHandle(Arc::new(f))
    }

    pub fn interrupt(&self) {
        (self.0)()
    }
}

impl std::fmt::Debug for InterruptHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("InterruptHandle")
    }
}

/// An opened database. Shared between all connections with the same path
/// through the instance cache.
pub trait EngineDatabase: Send + Sync {
    fn connect(self: Arc<Self>) -> Result<Box<dyn EngineSession>>;
    fn path(&self) -> &str;
}

/// One session on a database. Single threaded apart from `interrupt`.
pub trait EngineSession: Send {
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn EnginePrepared>>;
    fn set_autocommit(&mut self, autocommit: bool);
    fn commit(&mut self) -> Result<()>;
    fn rollback(&mut self) -> Result<()>;
    fn interrupt_handle(&self) -> InterruptHandle;
    fn library_version(&self) -> String;
    /// Reserved keywords of the engine's SQL dialect, for SQL_KEYWORDS.
    fn keywords(&mut self) -> Result<Vec<String>>;
}

/// A prepared statement; parameter and result shape are known after
/// prepare.
pub trait EnginePrepared: Send + std::fmt::Debug {
    fn param_count(&self) -> usize;
    fn column_names(&self) -> Vec<String>;
    fn column_types(&self) -> Vec<EngineType>;
    fn execute(&mut self, params: Vec<EngineValue>) -> Result<Box<dyn EngineResult>>;
}

/// A (possibly streaming) result.
pub trait EngineResult: Send {
    fn column_names(&self) -> Vec<String>;
    fn column_types(&self) -> Vec<EngineType>;
    /// Rows affected for DML statements; None for selects.
    fn rows_changed(&self) -> Option<i64>;
    fn next_chunk(&mut self) -> Result<Option<DataChunk>>;
}

/// A result with a fixed column shape and no rows, used by the catalog
/// functions the driver answers without consulting the engine.
pub struct EmptyResult {
    names: Vec<String>,
    types: Vec<EngineType>,
}

impl EmptyResult {
    pub fn new(names: &[&str], types: &[EngineType]) -> Self {
        EmptyResult {
            names: names.iter().map(|s| s.to_string()).collect(),
            types: types.to_vec(),
        }
    }
}

impl EngineResult for EmptyResult {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn column_types(&self) -> Vec<EngineType> {
        self.types.clone()
    }

    fn rows_changed(&self) -> Option<i64> {
        None
    }

    fn next_chunk(&mut self) -> Result<Option<DataChunk>> {
        Ok(None)
    }
}

/// Opens databases. Registered process-wide through [`set_engine_factory`].
pub trait EngineFactory: Send + Sync {
    fn open(
        &self,
        path: &str,
        options: &BTreeMap<String, String>,
    ) -> Result<Arc<dyn EngineDatabase>>;
    /// Names of the configuration options the engine understands, used for
    /// connection-string validation and suggestions.
    fn option_names(&self) -> Vec<String>;
}
