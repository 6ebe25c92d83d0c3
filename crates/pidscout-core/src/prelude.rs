//! Common module for library exports

pub use crate::config::{FilterConfig, HelperConfig};
pub use crate::error::{HelperError, PidscoutResult, SelectionError};
pub use crate::filter::filter_candidates;
pub use crate::host::AttachHost;
pub use crate::lister::{HelperProcessLister, ProcessLister};
pub use crate::parser::parse_records;
pub use crate::selector::{list_candidates, resolve_attach_target, select_process, AttachRequest, FailureReason, SelectionState};
pub use crate::types::{Candidate, ProcessId, ProcessRecord};
