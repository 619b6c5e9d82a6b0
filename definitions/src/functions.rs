//! `SQL_API_*` function identifiers for `SQLGetFunctions`.

pub const SQL_API_ALL_FUNCTIONS: u16 = 0;
pub const SQL_API_ODBC3_ALL_FUNCTIONS: u16 = 999;
pub const SQL_API_ODBC3_ALL_FUNCTIONS_SIZE: usize = 250;

// ODBC 1.0/2.0 ids
pub const SQL_API_SQLALLOCCONNECT: u16 = 1;
pub const SQL_API_SQLALLOCENV: u16 = 2;
pub const SQL_API_SQLALLOCSTMT: u16 = 3;
pub const SQL_API_SQLBINDCOL: u16 = 4;
pub const SQL_API_SQLCANCEL: u16 = 5;
pub const SQL_API_SQLCOLATTRIBUTE: u16 = 6;
pub const SQL_API_SQLCONNECT: u16 = 7;
pub const SQL_API_SQLDESCRIBECOL: u16 = 8;
pub const SQL_API_SQLDISCONNECT: u16 = 9;
pub const SQL_API_SQLERROR: u16 = 10;
pub const SQL_API_SQLEXECDIRECT: u16 = 11;
pub const SQL_API_SQLEXECUTE: u16 = 12;
pub const SQL_API_SQLFETCH: u16 = 13;
pub const SQL_API_SQLFREECONNECT: u16 = 14;
pub const SQL_API_SQLFREEENV: u16 = 15;
pub const SQL_API_SQLFREESTMT: u16 = 16;
pub const SQL_API_SQLGETCURSORNAME: u16 = 17;
pub const SQL_API_SQLNUMRESULTCOLS: u16 = 18;
pub const SQL_API_SQLPREPARE: u16 = 19;
pub const SQL_API_SQLROWCOUNT: u16 = 20;
pub const SQL_API_SQLSETCURSORNAME: u16 = 21;
pub const SQL_API_SQLTRANSACT: u16 = 23;
pub const SQL_API_SQLCOLUMNS: u16 = 40;
pub const SQL_API_SQLDRIVERCONNECT: u16 = 41;
pub const SQL_API_SQLGETDATA: u16 = 43;
pub const SQL_API_SQLGETFUNCTIONS: u16 = 44;
pub const SQL_API_SQLGETINFO: u16 = 45;
pub const SQL_API_SQLGETTYPEINFO: u16 = 47;
pub const SQL_API_SQLPARAMDATA: u16 = 48;
pub const SQL_API_SQLPUTDATA: u16 = 49;
pub const SQL_API_SQLSPECIALCOLUMNS: u16 = 52;
pub const SQL_API_SQLSTATISTICS: u16 = 53;
pub const SQL_API_SQLTABLES: u16 = 54;
pub const SQL_API_SQLBROWSECONNECT: u16 = 55;
pub const SQL_API_SQLDESCRIBEPARAM: u16 = 58;
pub const SQL_API_SQLFOREIGNKEYS: u16 = 60;
pub const SQL_API_SQLMORERESULTS: u16 = 61;
pub const SQL_API_SQLNATIVESQL: u16 = 62;
pub const SQL_API_SQLNUMPARAMS: u16 = 63;
pub const SQL_API_SQLPRIMARYKEYS: u16 = 65;
pub const SQL_API_SQLPROCEDURECOLUMNS: u16 = 66;
pub const SQL_API_SQLPROCEDURES: u16 = 67;
pub const SQL_API_SQLSETPOS: u16 = 68;
pub const SQL_API_SQLTABLEPRIVILEGES: u16 = 70;
pub const SQL_API_SQLCOLUMNPRIVILEGES: u16 = 56;
pub const SQL_API_SQLBINDPARAMETER: u16 = 72;
pub const SQL_API_SQLBULKOPERATIONS: u16 = 24;

// ODBC 3.x ids
pub const SQL_API_SQLALLOCHANDLE: u16 = 1001;
pub const SQL_API_SQLCLOSECURSOR: u16 = 1003;
pub const SQL_API_SQLCOPYDESC: u16 = 1004;
pub const SQL_API_SQLENDTRAN: u16 = 1005;
pub const SQL_API_SQLFREEHANDLE: u16 = 1006;
pub const SQL_API_SQLGETCONNECTATTR: u16 = 1007;
pub const SQL_API_SQLGETDESCFIELD: u16 = 1008;
pub const SQL_API_SQLGETDESCREC: u16 = 1009;
pub const SQL_API_SQLGETDIAGFIELD: u16 = 1010;
pub const SQL_API_SQLGETDIAGREC: u16 = 1011;
pub const SQL_API_SQLGETENVATTR: u16 = 1012;
pub const SQL_API_SQLGETSTMTATTR: u16 = 1014;
pub const SQL_API_SQLSETCONNECTATTR: u16 = 1016;
pub const SQL_API_SQLSETDESCFIELD: u16 = 1017;
pub const SQL_API_SQLSETDESCREC: u16 = 1018;
pub const SQL_API_SQLSETENVATTR: u16 = 1019;
pub const SQL_API_SQLSETSTMTATTR: u16 = 1020;
pub const SQL_API_SQLFETCHSCROLL: u16 = 1021;
