//! Server application core modules.
//!
//! This module contains all server-side functionality for the portal: HTTP routing,
//! session authentication, database repositories, the ownership/access resolver and the
//! clone assignment engine.

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
