//! Common test utilities for dataverse-client
//!
//! - Row fixtures with table metadata
//! - A mock Web API bound to a `DataverseClient`
//! - Custom assertions

pub mod fixtures;
pub mod server;

pub use fixtures::{Account, Contact};
pub use server::MockWebApi;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
