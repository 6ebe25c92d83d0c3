//! # Types
//!
//! Process records and candidates shared by the lister, parser, filter and
//! selector.

pub mod process;

// Re-export all public types
pub use process::{Candidate, ProcessId, ProcessRecord};
