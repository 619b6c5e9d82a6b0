pub mod catalog;
pub mod conn;
pub mod cursor;
pub mod decimal;
pub mod engine;
mod err;
pub mod instance;
pub mod odbc_uri;
pub mod session_init;
pub mod type_info;

pub use conn::EngineConnection;
pub use cursor::EngineCursor;
pub use engine::{
    DataChunk, EmptyResult, EngineDatabase, EngineFactory, EnginePrepared, EngineResult,
    EngineSession, EngineType, EngineValue, InterruptHandle, TimeUnit,
};
pub use err::{Error, Result};
pub use type_info::{ColumnMetadata, TypeInfo};
