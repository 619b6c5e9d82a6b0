pub mod dsn;
pub mod odbcinst;

pub use dsn::{DsnError, DsnSource};
pub use odbcinst::DriverSettings;
