//! # pidscout Utilities
//!
//! Shared utilities for the pidscout workspace, chiefly logging
//! infrastructure built on `tracing`.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_for_picker, init_logging_with_level, LogFormat, LogGuard, LogLevel, LoggingError};
pub use tracing::{debug, error, info, trace, warn};
