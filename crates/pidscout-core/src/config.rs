//! # Configuration
//!
//! Explicit configuration values for the lister and the candidate filter.
//!
//! Callers build these once per request (from CLI flags, environment
//! variables, editor settings, ...) and pass them by reference. Nothing in
//! this crate reads configuration from global state.

use std::path::PathBuf;
use std::time::Duration;

/// Subcommand that makes the helper print its process table
pub const LIST_PROCESSES_SUBCOMMAND: &str = "list_processes";

/// Encoding label used when none is configured (the cp936 console code page)
pub const DEFAULT_ENCODING_LABEL: &str = "gbk";

/// How long the helper may run before it is killed
pub const DEFAULT_HELPER_TIMEOUT: Duration = Duration::from_secs(10);

/// Filtering preferences for one selection request
///
/// ## Defaults
///
/// - Engine filtering off
/// - Auto-attach on
/// - No engine patterns, no blacklist patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig
{
    /// Only keep processes classified as the target engine type
    pub filter_by_engine_type: bool,
    /// Resolve without prompting when exactly one candidate survives
    pub auto_attach_single_process: bool,
    /// Substrings identifying engine processes (matched case-insensitively)
    pub engine_process_name_patterns: Vec<String>,
    /// Substrings that exclude a process (matched case-insensitively)
    pub blacklist_patterns: Vec<String>,
}

impl Default for FilterConfig
{
    fn default() -> Self
    {
        Self {
            filter_by_engine_type: false,
            auto_attach_single_process: true,
            engine_process_name_patterns: Vec::new(),
            blacklist_patterns: Vec::new(),
        }
    }
}

impl FilterConfig
{
    /// Enable engine-type filtering with the given name patterns
    #[must_use]
    pub fn with_engine_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_by_engine_type = true;
        self.engine_process_name_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the blacklist patterns
    #[must_use]
    pub fn with_blacklist<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether a single surviving candidate is attached without prompting
    #[must_use]
    pub fn with_auto_attach(mut self, auto_attach: bool) -> Self
    {
        self.auto_attach_single_process = auto_attach;
        self
    }
}

/// How to run the process-listing helper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig
{
    /// Path to the helper executable
    pub helper_path: PathBuf,
    /// Argument that selects the process listing
    pub subcommand: String,
    /// WHATWG label of the encoding the helper writes (`gbk`, `windows-1252`, ...)
    pub encoding_label: String,
    /// Upper bound on the helper's run time
    pub timeout: Duration,
}

impl HelperConfig
{
    /// Configuration for `helper_path` with default subcommand, encoding and timeout
    pub fn new(helper_path: impl Into<PathBuf>) -> Self
    {
        Self {
            helper_path: helper_path.into(),
            subcommand: LIST_PROCESSES_SUBCOMMAND.to_string(),
            encoding_label: DEFAULT_ENCODING_LABEL.to_string(),
            timeout: DEFAULT_HELPER_TIMEOUT,
        }
    }
}
