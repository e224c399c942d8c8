//! # LogSink Core Library
//!
//! Domain logic for the client log sink.
//!
//! ## Modules
//!
//! - `branding` - Product name, default port and log file name
//! - `domain` - Log entries, line rendering and sink configuration
//! - `service` - The append-only log file and the remote logger client

pub mod branding;
pub mod domain;
pub mod service;

// Re-export commonly used types
pub use domain::*;
pub use service::*;
