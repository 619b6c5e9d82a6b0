/// Indicates the overall success or failure of an ODBC function, as
/// represented in the C headers by `SQLRETURN`.
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SqlReturn(pub i16);

impl SqlReturn {
    pub const INVALID_HANDLE: SqlReturn = SqlReturn(-2);
    pub const ERROR: SqlReturn = SqlReturn(-1);
    pub const SUCCESS: SqlReturn = SqlReturn(0);
    pub const SUCCESS_WITH_INFO: SqlReturn = SqlReturn(1);
    pub const STILL_EXECUTING: SqlReturn = SqlReturn(2);
    pub const NEED_DATA: SqlReturn = SqlReturn(99);
    pub const NO_DATA: SqlReturn = SqlReturn(100);

    /// `SQL_SUCCEEDED` from the C headers.
    pub fn succeeded(&self) -> bool {
        *self == SqlReturn::SUCCESS || *self == SqlReturn::SUCCESS_WITH_INFO
    }
}
