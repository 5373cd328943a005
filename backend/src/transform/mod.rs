//! Transformation module.
//!
//! This module turns a validated description into the api_taste document:
//! - Builder: canonical document construction
//! - Emitter: block YAML output with YAML 1.1 safe quoting
//! - Pipeline: validate-then-transform entry point

pub mod builder;
pub mod emitter;
pub mod pipeline;

pub use builder::*;
pub use pipeline::*;
