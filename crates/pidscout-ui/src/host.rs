//! [`AttachHost`] backed by the terminal picker

use std::io;

use async_trait::async_trait;
use pidscout_core::{AttachHost, Candidate};
use pidscout_utils::{error, warn};

use crate::terminal::pick_blocking;

/// Interactive host that asks the user in a full-screen terminal picker
///
/// A picker that fails to start (no TTY, terminal errors) is logged at
/// `warn` and counts as a dismissal, so the request ends as cancelled
/// instead of hanging. Callers mapping cancellation to an exit status
/// (exit code 3 for the `pidscout` binary) therefore also report an
/// unavailable picker that way.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalHost;

#[async_trait]
impl AttachHost for TerminalHost
{
    async fn present_choice(&self, candidates: &[Candidate]) -> Option<usize>
    {
        let candidates = candidates.to_vec();
        match tokio::task::spawn_blocking(move || pick_blocking(&candidates)).await {
            Ok(outcome) => picker_choice(outcome),
            Err(e) => {
                warn!("Process picker task failed, treating as dismissed: {e}");
                None
            }
        }
    }

    fn report_error(&self, message: &str)
    {
        error!("{message}");
        eprintln!("Error: {message}");
    }
}

/// Choice from a finished picker run; a picker error counts as a dismissal
fn picker_choice(outcome: io::Result<Option<usize>>) -> Option<usize>
{
    match outcome {
        Ok(choice) => choice,
        Err(e) => {
            warn!("Process picker unavailable, treating as dismissed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_picker_choice()
    {
        assert_eq!(picker_choice(Ok(Some(2))), Some(2));
        assert_eq!(picker_choice(Ok(None)), None);
    }

    #[test]
    fn test_unavailable_picker_is_dismissal()
    {
        let no_tty = io::Error::new(io::ErrorKind::Unsupported, "not a terminal");
        assert_eq!(picker_choice(Err(no_tty)), None);
    }
}
