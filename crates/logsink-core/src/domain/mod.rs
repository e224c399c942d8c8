//! Domain entities and value objects
//!
//! This module contains the domain-level types for the log sink:
//! - `LogEntry` - one client message, coerced from a JSON body
//! - `SinkConfig` - where the sink listens and writes

pub mod config;
mod log_entry;

pub use config::*;
pub use log_entry::*;
