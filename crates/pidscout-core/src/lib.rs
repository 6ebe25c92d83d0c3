//! # pidscout-core
//!
//! Process listing, filtering, and attach-target selection for pidscout.
//!
//! Given a process-name hint and filtering preferences, this crate decides
//! which running process a debugger should attach to:
//!
//! 1. [`lister`]: run the external helper and decode its process table
//! 2. [`parser`]: turn the table into [`ProcessRecord`]s
//! 3. [`filter`]: keep records matching the name hint and engine patterns,
//!    dropping blacklisted ones
//! 4. [`selector`]: auto-resolve a single candidate or ask the
//!    [`AttachHost`] to pick one
//!
//! ## Example
//!
//! ```rust,no_run
//! use pidscout_core::prelude::*;
//!
//! # async fn example(host: &dyn AttachHost) -> Result<(), Box<dyn std::error::Error>> {
//! let lister = HelperProcessLister::from_config(&HelperConfig::new("emmy_tool.exe"))?;
//! let config = FilterConfig::default().with_engine_patterns(["ue4editor"]);
//! let pid = select_process(&lister, host, "", &config).await?;
//! println!("Attach to {pid}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod host;
pub mod lister;
pub mod parser;
pub mod prelude;
pub mod selector;
pub mod types;

// Re-export commonly used types
pub use config::{FilterConfig, HelperConfig};
pub use error::{HelperError, PidscoutResult, SelectionError};
pub use host::AttachHost;
pub use lister::{HelperProcessLister, ProcessLister};
pub use selector::{resolve_attach_target, select_process, AttachRequest};
pub use types::{Candidate, ProcessId, ProcessRecord};
