pub(crate) mod data;
pub(crate) mod diag;
mod attribute_api;
mod binding_api;
mod column_info_api;
mod connection_api;
mod cursor_api;
mod descriptor_api;
mod diagnostic_api;
mod handle_api;
mod info_api;
mod metadata_api;
mod parameter_api;
mod statement_api;
mod transaction_api;
pub(crate) mod fetch;
pub(crate) mod parameters;
pub(crate) mod util;

pub use attribute_api::*;
pub use binding_api::*;
pub use column_info_api::*;
pub use connection_api::*;
pub use cursor_api::*;
pub use descriptor_api::*;
pub use diagnostic_api::*;
pub use handle_api::*;
pub use info_api::*;
pub use metadata_api::*;
pub use parameter_api::*;
pub use statement_api::*;
pub use transaction_api::*;

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod catalog_tests;
#[cfg(test)]
mod connect_tests;
#[cfg(test)]
mod data_tests;
#[cfg(test)]
mod descriptor_tests;
#[cfg(test)]
mod diag_tests;
#[cfg(test)]
mod fetch_tests;
#[cfg(test)]
mod get_info_tests;
#[cfg(test)]
mod parameter_tests;
#[cfg(test)]
mod statement_tests;

/// Logs the error against the handle and records the diagnostic.
#[macro_export]
macro_rules! add_diag_with_function {
    ($handle:expr, $error:expr, $fct_name:expr) => {
        $handle.add_diag_info($error, $fct_name)
    };
}

/// Unwraps an Option handle accessor or bails with SQL_INVALID_HANDLE.
#[macro_export]
macro_rules! must_be_valid {
    ($maybe_handle:expr) => {{
        // force the expression
        let maybe_handle = $maybe_handle;
        if maybe_handle.is_none() {
            return SqlReturn::INVALID_HANDLE;
        }
        maybe_handle.unwrap()
    }};
}

/// Unwraps a Result, recording the error as a diagnostic on failure.
#[macro_export]
macro_rules! odbc_unwrap {
    ($value:expr, $handle:expr, $fct_name:expr) => {{
        // force the expression
        match $value {
            Ok(value) => value,
            Err(error) => {
                $handle.add_diag_info(error.into(), $fct_name);
                return SqlReturn::ERROR;
            }
        }
    }};
}
