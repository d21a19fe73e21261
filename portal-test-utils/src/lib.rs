//! Shared test setup for the portal crate.
//!
//! Provides an in-memory SQLite database, an in-memory session, table creation macros and
//! fixture helpers for inserting users, devices, clones and accounts.

pub mod constant;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod setup;

pub use error::TestError;
pub use setup::{TestAppState, TestSetup};

pub mod prelude {
    pub use crate::{
        constant::*, test_setup_with_portal_tables, test_setup_with_tables, TestError,
        TestSetup,
    };
}
