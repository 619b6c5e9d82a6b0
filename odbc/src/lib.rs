mod api;
mod errors;
mod handles;

pub use api::*;
pub use errors::ODBCError;
pub use handles::definitions::*;
