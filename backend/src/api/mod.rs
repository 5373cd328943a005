//! HTTP API module.
//!
//! This module provides the HTTP server and API types for the api_taste form.

pub mod server;
pub mod types;

pub use server::{create_app, start_server};
pub use types::*;
