use crate::errors::ODBCError;
use crate::handles::descriptor::DescriptorInfo;
use cstr::WideChar;
use definitions::{
    AsyncEnable, AttrConnectionPooling, AttrCpMatch, AttrOdbcVersion, Concurrency,
    CursorScrollable, CursorSensitivity, CursorType, HDbc, HDesc, HEnv, HStmt, Handle, Len, NoScan,
    Pointer, RetrieveData, SqlBool, ULen, USmallInt, UseBookmarks,
};
use duckdb_odbc_core::{EngineConnection, EngineCursor, EnginePrepared, InterruptHandle};
use std::{
    borrow::BorrowMut,
    collections::{HashMap, HashSet, VecDeque},
    ptr::null_mut,
    sync::RwLock,
};

/// One diagnostic record: the error plus the component and data source it
/// was raised for.
#[derive(Debug)]
pub struct DiagRecord {
    pub error: ODBCError,
    pub function: &'static str,
    pub server_name: String,
    pub column_number: Option<i32>,
    pub row_number: Option<isize>,
}

impl DiagRecord {
    pub fn new(error: ODBCError, function: &'static str, server_name: String) -> Self {
        DiagRecord {
            error,
            function,
            server_name,
            column_number: None,
            row_number: None,
        }
    }

    /// Message text composed per the diagnostics contract:
    /// `ODBC_<dsn>-><component>` on the first line, the message below.
    pub fn message_text(&self) -> String {
        format!(
            "ODBC_{}->{}\n{}",
            self.server_name,
            self.function,
            self.error.get_error_message()
        )
    }
}

#[derive(Debug)]
pub enum OdbcHandle {
    Env(Env),
    Connection(Connection),
    Statement(Statement),
    Descriptor(Descriptor),
}

impl OdbcHandle {
    pub fn as_env(&self) -> Option<&Env> {
        match self {
            OdbcHandle::Env(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_connection(&self) -> Option<&Connection> {
        match self {
            OdbcHandle::Connection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_statement(&self) -> Option<&Statement> {
        match self {
            OdbcHandle::Statement(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_descriptor(&self) -> Option<&Descriptor> {
        match self {
            OdbcHandle::Descriptor(d) => Some(d),
            _ => None,
        }
    }

    /// The data source name this handle ultimately belongs to, used in
    /// diagnostic messages and SQL_DIAG_SERVER_NAME.
    pub fn server_name(&self) -> String {
        let conn_ptr = match self {
            OdbcHandle::Env(_) => null_mut(),
            OdbcHandle::Connection(_) => return self.connection_dsn(),
            OdbcHandle::Statement(s) => s.connection,
            OdbcHandle::Descriptor(d) => d.connection,
        };
        if conn_ptr.is_null() {
            return String::new();
        }
        unsafe { (*conn_ptr).connection_dsn() }
    }

    fn connection_dsn(&self) -> String {
        self.as_connection()
            .map(|c| c.attributes.read().unwrap().dsn.clone())
            .unwrap_or_default()
    }

    /// Appends a new diagnostic record to the handle's stack.
    pub fn add_diag_info(&self, error: ODBCError, function: &'static str) {
        let record = DiagRecord::new(error, function, self.server_name());
        log::error!("{}", record.message_text());
        self.errors().write().unwrap().push(record);
    }

    pub fn errors(&self) -> &RwLock<Vec<DiagRecord>> {
        match self {
            OdbcHandle::Env(e) => &e.errors,
            OdbcHandle::Connection(c) => &c.errors,
            OdbcHandle::Statement(s) => &s.errors,
            OdbcHandle::Descriptor(d) => &d.errors,
        }
    }

    pub fn clear_diagnostics(&self) {
        self.errors().write().unwrap().clear();
    }

    /// The ODBC version recorded on the owning environment; drives
    /// version-dependent behavior.
    pub fn get_odbc_version(&self) -> AttrOdbcVersion {
        let env_ptr = match self {
            OdbcHandle::Env(_) => return self.env_odbc_version(),
            OdbcHandle::Connection(c) => c.env,
            OdbcHandle::Statement(s) => unsafe {
                s.connection
                    .as_ref()
                    .and_then(|c| c.as_connection())
                    .map_or(null_mut(), |c| c.env)
            },
            OdbcHandle::Descriptor(d) => unsafe {
                d.connection
                    .as_ref()
                    .and_then(|c| c.as_connection())
                    .map_or(null_mut(), |c| c.env)
            },
        };
        if env_ptr.is_null() {
            return AttrOdbcVersion::SQL_OV_ODBC3_80;
        }
        unsafe { (*env_ptr).env_odbc_version() }
    }

    fn env_odbc_version(&self) -> AttrOdbcVersion {
        self.as_env()
            .map(|e| e.attributes.read().unwrap().odbc_ver)
            .unwrap_or(AttrOdbcVersion::SQL_OV_ODBC3_80)
    }
}

pub type OdbcHandleRef = &'static mut OdbcHandle;

impl From<Handle> for OdbcHandleRef {
    fn from(handle: Handle) -> Self {
        unsafe { (*handle.cast::<OdbcHandle>()).borrow_mut() }
    }
}

impl From<HEnv> for OdbcHandleRef {
    fn from(handle: HEnv) -> Self {
        unsafe { (*handle.cast::<OdbcHandle>()).borrow_mut() }
    }
}

impl From<HDbc> for OdbcHandleRef {
    fn from(handle: HDbc) -> Self {
        unsafe { (*handle.cast::<OdbcHandle>()).borrow_mut() }
    }
}

impl From<HStmt> for OdbcHandleRef {
    fn from(handle: HStmt) -> Self {
        unsafe { (*handle.cast::<OdbcHandle>()).borrow_mut() }
    }
}

impl From<HDesc> for OdbcHandleRef {
    fn from(handle: HDesc) -> Self {
        unsafe { (*handle.cast::<OdbcHandle>()).borrow_mut() }
    }
}

#[derive(Debug)]
pub struct Env {
    pub attributes: RwLock<EnvAttributes>,
    pub state: RwLock<EnvState>,
    pub connections: RwLock<HashSet<*mut OdbcHandle>>,
    pub errors: RwLock<Vec<DiagRecord>>,
}

impl Env {
    pub fn with_state(state: EnvState) -> Self {
        Self {
            attributes: RwLock::new(EnvAttributes::default()),
            state: RwLock::new(state),
            connections: RwLock::new(HashSet::new()),
            errors: RwLock::new(vec![]),
        }
    }
}

#[derive(Debug)]
pub struct EnvAttributes {
    pub odbc_ver: AttrOdbcVersion,
    pub output_nts: SqlBool,
    pub connection_pooling: AttrConnectionPooling,
    pub cp_match: AttrCpMatch,
}

impl Default for EnvAttributes {
    fn default() -> Self {
        Self {
            odbc_ver: AttrOdbcVersion::SQL_OV_ODBC3_80,
            output_nts: SqlBool::SQL_TRUE,
            connection_pooling: AttrConnectionPooling::SQL_CP_OFF,
            cp_match: AttrCpMatch::SQL_CP_STRICT_MATCH,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum EnvState {
    Allocated,
    ConnectionAllocated,
}

#[derive(Debug)]
pub struct Connection {
    /// Pointer to the Env this Connection was allocated from.
    pub env: *mut OdbcHandle,
    /// The live engine connection; None until connect and after disconnect.
    pub engine_connection: RwLock<Option<EngineConnection>>,
    /// Kept outside the session so SQLCancel never has to take the
    /// connection lock.
    pub interrupt: RwLock<Option<InterruptHandle>>,
    pub attributes: RwLock<ConnectionAttributes>,
    pub state: RwLock<ConnectionState>,
    /// Back references to all live Statements allocated on this connection.
    pub statements: RwLock<HashSet<*mut OdbcHandle>>,
    /// Explicitly allocated descriptors owned by this connection.
    pub descriptors: RwLock<HashSet<*mut OdbcHandle>>,
    pub errors: RwLock<Vec<DiagRecord>>,
}

#[derive(Debug)]
pub struct ConnectionAttributes {
    pub dsn: String,
    pub current_catalog: Option<String>,
    pub login_timeout: Option<u32>,
    pub connection_timeout: Option<u32>,
    pub autocommit: bool,
    pub access_mode: ULen,
    pub metadata_id: bool,
}

impl Default for ConnectionAttributes {
    fn default() -> Self {
        Self {
            dsn: String::new(),
            current_catalog: None,
            login_timeout: None,
            connection_timeout: None,
            autocommit: true,
            access_mode: definitions::SQL_MODE_READ_WRITE,
            metadata_id: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Allocated,
    Connected,
    StatementAllocated,
}

impl Connection {
    pub fn with_state(env: *mut OdbcHandle, state: ConnectionState) -> Self {
        Self {
            env,
            engine_connection: RwLock::new(None),
            interrupt: RwLock::new(None),
            attributes: RwLock::new(ConnectionAttributes::default()),
            state: RwLock::new(state),
            statements: RwLock::new(HashSet::new()),
            descriptors: RwLock::new(HashSet::new()),
            errors: RwLock::new(vec![]),
        }
    }
}

/// Streaming state for SQLGetData: how much of the current variable-length
/// value has already been handed out, per column.
#[derive(Debug)]
pub enum CachedData {
    /// Fixed data cannot be streamed; a second GetData returns NO_DATA.
    Fixed,
    Char(usize, Vec<u8>),
    Bin(usize, Vec<u8>),
    WChar(usize, Vec<WideChar>),
}

/// Per-column binding captured by SQLBindCol, mirroring the ARD record for
/// the fetch fast path.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BoundColInfo {
    pub target_type: i16,
    pub target_buffer: Pointer,
    pub buffer_length: Len,
    pub length_or_indicator: *mut Len,
}

/// Data-at-exec bookkeeping between Execute, ParamData and PutData.
#[derive(Debug, Default)]
pub struct ParamsAtExec {
    /// Parameter records (1-based ordinals) still waiting for data.
    pub remaining: VecDeque<USmallInt>,
    /// The ordinal PutData currently appends to.
    pub current: Option<USmallInt>,
    pub collected: HashMap<USmallInt, Vec<u8>>,
    /// Parameter set the interrupted execute was working on.
    pub set_index: usize,
}

impl ParamsAtExec {
    pub fn reset(&mut self) {
        self.remaining.clear();
        self.current = None;
        self.collected.clear();
        self.set_index = 0;
    }
}

#[derive(Debug)]
pub struct Statement {
    pub connection: *mut OdbcHandle,
    pub prepared: RwLock<Option<Box<dyn EnginePrepared>>>,
    pub cursor: RwLock<Option<EngineCursor>>,
    /// Rows affected by the last execute, accumulated over parameter sets.
    pub row_count: RwLock<Option<i64>>,
    pub var_data_cache: RwLock<Option<HashMap<USmallInt, CachedData>>>,
    pub bound_cols: RwLock<HashMap<USmallInt, BoundColInfo>>,
    pub attributes: RwLock<StatementAttributes>,
    pub state: RwLock<StatementState>,
    pub param_exec: RwLock<ParamsAtExec>,
    pub errors: RwLock<Vec<DiagRecord>>,
}

#[derive(Debug)]
pub struct StatementAttributes {
    /// Current application descriptors; point at the implicit ones until an
    /// explicit descriptor is installed.
    pub app_row_desc: *mut OdbcHandle,
    pub app_param_desc: *mut OdbcHandle,
    /// The four implicit descriptors, owned by this statement.
    pub implicit_app_row_desc: *mut OdbcHandle,
    pub implicit_app_param_desc: *mut OdbcHandle,
    pub imp_row_desc: *mut OdbcHandle,
    pub imp_param_desc: *mut OdbcHandle,
    pub async_enable: AsyncEnable,
    pub cursor_scrollable: CursorScrollable,
    pub cursor_sensitivity: CursorSensitivity,
    pub concurrency: Concurrency,
    pub cursor_type: CursorType,
    pub enable_auto_ipd: SqlBool,
    pub max_length: ULen,
    pub max_rows: ULen,
    pub metadata_id: bool,
    pub no_scan: NoScan,
    pub query_timeout: ULen,
    pub retrieve_data: RetrieveData,
    pub row_number: ULen,
    pub simulate_cursor: ULen,
    pub use_bookmarks: UseBookmarks,
}

impl Drop for StatementAttributes {
    fn drop(&mut self) {
        unsafe {
            let _ = Box::from_raw(self.implicit_app_row_desc);
            let _ = Box::from_raw(self.implicit_app_param_desc);
            let _ = Box::from_raw(self.imp_row_desc);
            let _ = Box::from_raw(self.imp_param_desc);
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatementState {
    Allocated,
    Prepared,
    Executed,
    NeedData,
}

impl Statement {
    pub fn with_state(connection: *mut OdbcHandle, state: StatementState) -> Self {
        let implicit_ard = Box::into_raw(Box::new(OdbcHandle::Descriptor(Descriptor::implicit(
            connection,
            DescRole::ApplicationRow,
        ))));
        let implicit_apd = Box::into_raw(Box::new(OdbcHandle::Descriptor(Descriptor::implicit(
            connection,
            DescRole::ApplicationParam,
        ))));
        let ird = Box::into_raw(Box::new(OdbcHandle::Descriptor(Descriptor::implicit(
            connection,
            DescRole::ImplementationRow,
        ))));
        let ipd = Box::into_raw(Box::new(OdbcHandle::Descriptor(Descriptor::implicit(
            connection,
            DescRole::ImplementationParam,
        ))));
        Self {
            connection,
            prepared: RwLock::new(None),
            cursor: RwLock::new(None),
            row_count: RwLock::new(None),
            var_data_cache: RwLock::new(None),
            bound_cols: RwLock::new(HashMap::new()),
            attributes: RwLock::new(StatementAttributes {
                app_row_desc: implicit_ard,
                app_param_desc: implicit_apd,
                implicit_app_row_desc: implicit_ard,
                implicit_app_param_desc: implicit_apd,
                imp_row_desc: ird,
                imp_param_desc: ipd,
                async_enable: AsyncEnable::SQL_ASYNC_ENABLE_OFF,
                cursor_scrollable: CursorScrollable::SQL_NONSCROLLABLE,
                cursor_sensitivity: CursorSensitivity::SQL_INSENSITIVE,
                concurrency: Concurrency::SQL_CONCUR_READ_ONLY,
                cursor_type: CursorType::SQL_CURSOR_FORWARD_ONLY,
                enable_auto_ipd: SqlBool::SQL_FALSE,
                max_length: 0,
                max_rows: 0,
                metadata_id: false,
                no_scan: NoScan::SQL_NOSCAN_OFF,
                query_timeout: 0,
                retrieve_data: RetrieveData::SQL_RD_ON,
                row_number: 0,
                simulate_cursor: 0,
                use_bookmarks: UseBookmarks::SQL_UB_OFF,
            }),
            state: RwLock::new(state),
            param_exec: RwLock::new(ParamsAtExec::default()),
            errors: RwLock::new(vec![]),
        }
    }

    pub(crate) fn insert_var_data_cache(&self, col: u16, data: CachedData) {
        self.var_data_cache
            .write()
            .unwrap()
            .get_or_insert_with(HashMap::new)
            .insert(col, data);
    }

    /// Current ARD handle (implicit or installed explicit).
    pub fn ard(&self) -> &'static Descriptor {
        unsafe { descriptor_ref(self.attributes.read().unwrap().app_row_desc) }
    }

    /// Current APD handle (implicit or installed explicit).
    pub fn apd(&self) -> &'static Descriptor {
        unsafe { descriptor_ref(self.attributes.read().unwrap().app_param_desc) }
    }

    pub fn ird(&self) -> &'static Descriptor {
        unsafe { descriptor_ref(self.attributes.read().unwrap().imp_row_desc) }
    }

    pub fn ipd(&self) -> &'static Descriptor {
        unsafe { descriptor_ref(self.attributes.read().unwrap().imp_param_desc) }
    }

    /// Reverts any reference to a freed explicit descriptor back to the
    /// implicit one.
    pub fn revert_descriptor(&self, freed: *mut OdbcHandle) {
        let mut attributes = self.attributes.write().unwrap();
        if attributes.app_row_desc == freed {
            attributes.app_row_desc = attributes.implicit_app_row_desc;
        }
        if attributes.app_param_desc == freed {
            attributes.app_param_desc = attributes.implicit_app_param_desc;
        }
    }
}

/// # Safety
/// `ptr` must be a live descriptor handle allocated by this driver.
pub unsafe fn descriptor_ref(ptr: *mut OdbcHandle) -> &'static Descriptor {
    (*ptr)
        .as_descriptor()
        .expect("descriptor slot must hold a descriptor handle")
}

/// Which of the four descriptor roles an implicit descriptor plays.
/// Explicit descriptors have no fixed role; they act as application
/// descriptors wherever they are installed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DescRole {
    ApplicationRow,
    ApplicationParam,
    ImplementationRow,
    ImplementationParam,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DescriptorState {
    ImplicitlyAllocated,
    ExplicitlyAllocated,
}

#[derive(Debug)]
pub struct Descriptor {
    pub connection: *mut OdbcHandle,
    pub role: Option<DescRole>,
    pub state: DescriptorState,
    pub info: RwLock<DescriptorInfo>,
    pub errors: RwLock<Vec<DiagRecord>>,
}

impl Descriptor {
    pub fn implicit(connection: *mut OdbcHandle, role: DescRole) -> Self {
        Self {
            connection,
            role: Some(role),
            state: DescriptorState::ImplicitlyAllocated,
            info: RwLock::new(DescriptorInfo::automatic()),
            errors: RwLock::new(vec![]),
        }
    }

    pub fn explicit(connection: *mut OdbcHandle) -> Self {
        Self {
            connection,
            role: None,
            state: DescriptorState::ExplicitlyAllocated,
            info: RwLock::new(DescriptorInfo::user_allocated()),
            errors: RwLock::new(vec![]),
        }
    }

    /// Implementation descriptors (IRD/IPD) are driver populated.
    pub fn is_implementation(&self) -> bool {
        matches!(
            self.role,
            Some(DescRole::ImplementationRow) | Some(DescRole::ImplementationParam)
        )
    }

    pub fn is_ird(&self) -> bool {
        self.role == Some(DescRole::ImplementationRow)
    }

    pub fn is_ipd(&self) -> bool {
        self.role == Some(DescRole::ImplementationParam)
    }
}
