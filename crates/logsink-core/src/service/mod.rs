//! Domain services
//!
//! The append-only log file behind the sink and the client that feeds it.

mod log_file;
mod remote_logger;

pub use log_file::*;
pub use remote_logger::*;
