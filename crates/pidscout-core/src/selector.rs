//! # Selector
//!
//! Resolves a name hint to exactly one process identifier.
//!
//! ## State Transitions
//!
//! ```text
//! Start ──list ok──▶ Listed ──parse + filter──▶ Filtered
//!   │                                             │
//!   └─list failed──▶ Failed(HelperExecution)      ├─ 0 candidates ──────────────▶ Failed(NoCandidates)
//!                                                 ├─ 1 candidate + auto-attach ─▶ AutoResolved ─▶ Resolved
//!                                                 └─ otherwise ─────────────────▶ AwaitingChoice
//!                                                                                   ├─ picked ──▶ Resolved
//!                                                                                   └─ dismissed ▶ Failed(Cancelled)
//! ```
//!
//! One call drives the whole machine. Nothing is kept between calls, so a
//! failed request leaves no state behind and independent requests can run
//! concurrently.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::config::FilterConfig;
use crate::error::{HelperError, PidscoutResult, SelectionError};
use crate::filter::filter_candidates;
use crate::host::{AttachHost, NO_CANDIDATES_MESSAGE};
use crate::lister::ProcessLister;
use crate::parser::parse_records;
use crate::types::{Candidate, ProcessId};

/// Where a selection request currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState
{
    /// Nothing has run yet
    Start,
    /// The helper produced a listing
    Listed,
    /// Records were parsed and filtered; carries the candidate count
    Filtered(usize),
    /// A single candidate was accepted without prompting
    AutoResolved,
    /// The host is showing the picker
    AwaitingChoice,
    /// A process was chosen
    Resolved(ProcessId),
    /// The request ended without a process
    Failed(FailureReason),
}

/// Why a selection request ended without a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason
{
    HelperExecution,
    NoCandidates,
    Cancelled,
}

impl From<&SelectionError> for FailureReason
{
    fn from(error: &SelectionError) -> Self
    {
        match error {
            SelectionError::HelperExecution(_) => Self::HelperExecution,
            SelectionError::NoCandidates => Self::NoCandidates,
            SelectionError::Cancelled => Self::Cancelled,
        }
    }
}

impl fmt::Display for FailureReason
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::HelperExecution => write!(f, "helper execution"),
            Self::NoCandidates => write!(f, "no candidates"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl fmt::Display for SelectionState
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::Start => write!(f, "start"),
            Self::Listed => write!(f, "listed"),
            Self::Filtered(count) => write!(f, "filtered ({count} candidates)"),
            Self::AutoResolved => write!(f, "auto-resolved"),
            Self::AwaitingChoice => write!(f, "awaiting choice"),
            Self::Resolved(pid) => write!(f, "resolved (PID {pid})"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Tracks and logs state transitions for one request
struct Transitions
{
    state: SelectionState,
}

impl Transitions
{
    fn new() -> Self
    {
        Self {
            state: SelectionState::Start,
        }
    }

    fn advance(&mut self, next: SelectionState)
    {
        debug!("Selection {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: SelectionError) -> SelectionError
    {
        self.advance(SelectionState::Failed(FailureReason::from(&error)));
        error
    }
}

/// List, parse and filter processes without any interaction
///
/// ## Errors
///
/// Returns the lister's [`HelperError`] if the listing cannot be produced.
pub async fn list_candidates<L>(lister: &L, name_hint: &str, config: &FilterConfig) -> Result<Vec<Candidate>, HelperError>
where
    L: ProcessLister + ?Sized,
{
    let text = lister.list().await?;
    Ok(filter_candidates(parse_records(&text), name_hint, config))
}

/// Resolve `name_hint` to a single process identifier
///
/// ## Errors
///
/// - [`SelectionError::HelperExecution`]: the listing failed
/// - [`SelectionError::NoCandidates`]: nothing survived filtering (also
///   reported through [`AttachHost::report_error`])
/// - [`SelectionError::Cancelled`]: the user dismissed the picker
///
/// ## Example
///
/// ```rust,no_run
/// use pidscout_core::config::{FilterConfig, HelperConfig};
/// use pidscout_core::host::AttachHost;
/// use pidscout_core::lister::HelperProcessLister;
/// use pidscout_core::selector::select_process;
///
/// # async fn example(host: &dyn AttachHost) -> Result<(), Box<dyn std::error::Error>> {
/// let lister = HelperProcessLister::from_config(&HelperConfig::new("emmy_tool.exe"))?;
/// let pid = select_process(&lister, host, "Game", &FilterConfig::default()).await?;
/// println!("Attach to {pid}");
/// # Ok(())
/// # }
/// ```
#[instrument(level = "debug", skip(lister, host, config))]
pub async fn select_process<L, H>(lister: &L, host: &H, name_hint: &str, config: &FilterConfig) -> PidscoutResult<ProcessId>
where
    L: ProcessLister + ?Sized,
    H: AttachHost + ?Sized,
{
    let mut transitions = Transitions::new();

    let text = match lister.list().await {
        Ok(text) => text,
        Err(err) => return Err(transitions.fail(err.into())),
    };
    transitions.advance(SelectionState::Listed);

    let candidates = filter_candidates(parse_records(&text), name_hint, config);
    transitions.advance(SelectionState::Filtered(candidates.len()));

    match candidates.as_slice() {
        [] => {
            host.report_error(NO_CANDIDATES_MESSAGE);
            Err(transitions.fail(SelectionError::NoCandidates))
        }
        [only] if config.auto_attach_single_process => {
            transitions.advance(SelectionState::AutoResolved);
            info!("Auto-attaching to the only matching process: {only}");
            transitions.advance(SelectionState::Resolved(only.pid()));
            Ok(only.pid())
        }
        _ => {
            transitions.advance(SelectionState::AwaitingChoice);
            let choice = host.present_choice(&candidates).await;
            match choice.and_then(|index| candidates.get(index)) {
                Some(chosen) => {
                    transitions.advance(SelectionState::Resolved(chosen.pid()));
                    Ok(chosen.pid())
                }
                None => {
                    if let Some(index) = choice {
                        warn!("Picker returned index {index} for {} candidates", candidates.len());
                    }
                    Err(transitions.fail(SelectionError::Cancelled))
                }
            }
        }
    }
}

/// An attach request as it arrives from a launch configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachRequest
{
    /// Explicit process identifier; values of zero mean "not set"
    pub pid: Option<u32>,
    /// Process-name hint used when no PID is given
    pub process_name: Option<String>,
}

impl AttachRequest
{
    /// Explicit, positive PID carried by the request
    #[must_use]
    pub fn explicit_pid(&self) -> Option<ProcessId>
    {
        self.pid.filter(|pid| *pid > 0).map(ProcessId)
    }

    /// Name hint, empty when none was given
    #[must_use]
    pub fn name_hint(&self) -> &str
    {
        self.process_name.as_deref().unwrap_or_default()
    }
}

/// Resolve the process an attach request refers to
///
/// An explicit positive PID is returned as-is without listing processes.
/// Otherwise the request's name hint goes through [`select_process`].
///
/// ## Errors
///
/// Same as [`select_process`].
pub async fn resolve_attach_target<L, H>(
    request: &AttachRequest,
    lister: &L,
    host: &H,
    config: &FilterConfig,
) -> PidscoutResult<ProcessId>
where
    L: ProcessLister + ?Sized,
    H: AttachHost + ?Sized,
{
    if let Some(pid) = request.explicit_pid() {
        debug!("Attach request names PID {pid}, skipping selection");
        return Ok(pid);
    }

    select_process(lister, host, request.name_hint(), config).await
}
