//! Logging and terminal display helpers.

pub mod display;
pub mod logging;

pub use logging::{init_logging, LogConfig};
