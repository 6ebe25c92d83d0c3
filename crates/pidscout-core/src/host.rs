//! # Host Capabilities
//!
//! The interactive surface the selector needs from its environment: a way to
//! let the user pick among candidates, and a way to tell the user something
//! went wrong. A terminal picker, an editor's quick-pick, or a scripted test
//! double can all provide it.

use async_trait::async_trait;

use crate::types::Candidate;

/// Prompt shown above the candidate list
pub const PICK_PROMPT: &str = "Select the process to attach";

/// Message reported when filtering leaves nothing to attach to
pub const NO_CANDIDATES_MESSAGE: &str = "No process for attach";

/// Interactive capabilities supplied by the caller
#[async_trait]
pub trait AttachHost: Send + Sync
{
    /// Let the user choose one of `candidates`
    ///
    /// Returns the index of the chosen candidate, or `None` if the user
    /// dismissed the prompt. Implementations must return rather than block
    /// forever when the prompt is dismissed.
    async fn present_choice(&self, candidates: &[Candidate]) -> Option<usize>;

    /// Show an error message to the user
    fn report_error(&self, message: &str);
}
