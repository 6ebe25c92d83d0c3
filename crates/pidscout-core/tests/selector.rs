//! Tests for the attach-target selector

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pidscout_core::config::FilterConfig;
use pidscout_core::error::{HelperError, SelectionError};
use pidscout_core::host::{AttachHost, NO_CANDIDATES_MESSAGE};
use pidscout_core::lister::ProcessLister;
use pidscout_core::selector::{list_candidates, resolve_attach_target, select_process, AttachRequest};
use pidscout_core::types::{Candidate, ProcessId};

/// Lister returning a fixed table, or failing when `text` is `None`
struct StaticLister
{
    text: Option<String>,
    calls: AtomicUsize,
}

impl StaticLister
{
    fn with_rows(rows: &[(u32, &str, &str)]) -> Self
    {
        let text = rows
            .iter()
            .map(|(pid, title, path)| format!("{pid}\r\n{title}\r\n{path}\r\n0\r\n"))
            .collect();
        Self {
            text: Some(text),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self
    {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProcessLister for StaticLister
{
    async fn list(&self) -> Result<String, HelperError>
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or(HelperError::NonZeroExit {
            code: Some(1),
            stderr: "access denied".to_string(),
        })
    }
}

/// Host that answers every prompt with a fixed choice and records what it saw
struct ScriptedHost
{
    choice: Option<usize>,
    presented: Mutex<Vec<Vec<ProcessId>>>,
    errors: Mutex<Vec<String>>,
}

impl ScriptedHost
{
    fn choosing(choice: Option<usize>) -> Self
    {
        Self {
            choice,
            presented: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    fn presented(&self) -> Vec<Vec<ProcessId>>
    {
        self.presented.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String>
    {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttachHost for ScriptedHost
{
    async fn present_choice(&self, candidates: &[Candidate]) -> Option<usize>
    {
        self.presented
            .lock()
            .unwrap()
            .push(candidates.iter().map(Candidate::pid).collect());
        self.choice
    }

    fn report_error(&self, message: &str)
    {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

const GAME: (u32, &str, &str) = (1234, "Game", "C:\\G\\Game.exe");

#[tokio::test]
async fn test_no_candidates_fails_and_reports()
{
    let lister = StaticLister::with_rows(&[GAME]);
    let host = ScriptedHost::choosing(Some(0));

    let result = select_process(&lister, &host, "Editor", &FilterConfig::default()).await;

    assert!(matches!(result, Err(SelectionError::NoCandidates)));
    assert_eq!(host.errors(), vec![NO_CANDIDATES_MESSAGE.to_string()]);
    assert!(host.presented().is_empty());
}

#[tokio::test]
async fn test_empty_listing_fails_with_no_candidates()
{
    let lister = StaticLister::with_rows(&[]);
    let host = ScriptedHost::choosing(None);

    let result = select_process(&lister, &host, "", &FilterConfig::default()).await;
    assert!(matches!(result, Err(SelectionError::NoCandidates)));
}

#[tokio::test]
async fn test_single_candidate_auto_attaches()
{
    let lister = StaticLister::with_rows(&[GAME]);
    let host = ScriptedHost::choosing(None);

    let pid = select_process(&lister, &host, "", &FilterConfig::default()).await.unwrap();

    assert_eq!(pid, ProcessId(1234));
    assert!(host.presented().is_empty());
    assert!(host.errors().is_empty());
}

#[tokio::test]
async fn test_single_candidate_confirmed_when_auto_attach_off()
{
    let lister = StaticLister::with_rows(&[GAME]);
    let host = ScriptedHost::choosing(Some(0));
    let config = FilterConfig::default().with_auto_attach(false);

    let pid = select_process(&lister, &host, "", &config).await.unwrap();

    assert_eq!(pid, ProcessId(1234));
    assert_eq!(host.presented(), vec![vec![ProcessId(1234)]]);
}

#[tokio::test]
async fn test_single_candidate_dismissed_is_cancelled()
{
    let lister = StaticLister::with_rows(&[GAME]);
    let host = ScriptedHost::choosing(None);
    let config = FilterConfig::default().with_auto_attach(false);

    let err = select_process(&lister, &host, "", &config).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(host.presented().len(), 1);
    assert!(host.errors().is_empty());
}

#[tokio::test]
async fn test_multiple_candidates_prompt_for_choice()
{
    let lister = StaticLister::with_rows(&[GAME, (5678, "Game Server", "C:\\G\\GameServer.exe")]);
    let host = ScriptedHost::choosing(Some(1));

    let pid = select_process(&lister, &host, "Game", &FilterConfig::default()).await.unwrap();

    assert_eq!(pid, ProcessId(5678));
    assert_eq!(host.presented(), vec![vec![ProcessId(1234), ProcessId(5678)]]);
}

#[tokio::test]
async fn test_multiple_candidates_dismissed_is_cancelled()
{
    let lister = StaticLister::with_rows(&[GAME, (5678, "Game Server", "C:\\G\\GameServer.exe")]);
    let host = ScriptedHost::choosing(None);

    let result = select_process(&lister, &host, "", &FilterConfig::default()).await;
    assert!(matches!(result, Err(SelectionError::Cancelled)));
}

#[tokio::test]
async fn test_out_of_range_choice_is_cancelled()
{
    let lister = StaticLister::with_rows(&[GAME, (5678, "Game Server", "C:\\G\\GameServer.exe")]);
    let host = ScriptedHost::choosing(Some(5));

    let result = select_process(&lister, &host, "", &FilterConfig::default()).await;
    assert!(matches!(result, Err(SelectionError::Cancelled)));
}

#[tokio::test]
async fn test_engine_filter_narrows_to_single_candidate()
{
    let lister = StaticLister::with_rows(&[
        (11, "Unreal Editor", "C:\\UE\\UE4Editor-Win64.exe"),
        (22, "Untitled", "C:\\Windows\\notepad.exe"),
    ]);
    let host = ScriptedHost::choosing(None);
    let config = FilterConfig::default().with_engine_patterns(["ue4editor"]);

    let pid = select_process(&lister, &host, "", &config).await.unwrap();

    assert_eq!(pid, ProcessId(11));
    assert!(host.presented().is_empty());
}

#[tokio::test]
async fn test_blacklisted_process_never_offered()
{
    let lister = StaticLister::with_rows(&[
        (11, "Game", "C:\\G\\crashreporter\\Game.exe"),
        (22, "Game", "C:\\G\\Game.exe"),
    ]);
    let host = ScriptedHost::choosing(None);
    let config = FilterConfig::default().with_blacklist(["crashreporter"]);

    let pid = select_process(&lister, &host, "Game", &config).await.unwrap();
    assert_eq!(pid, ProcessId(22));
}

#[tokio::test]
async fn test_helper_failure_propagates()
{
    let lister = StaticLister::failing();
    let host = ScriptedHost::choosing(Some(0));

    let err = select_process(&lister, &host, "", &FilterConfig::default()).await.unwrap_err();

    assert!(matches!(err, SelectionError::HelperExecution(HelperError::NonZeroExit { .. })));
    assert!(host.presented().is_empty());
    assert!(host.errors().is_empty());
}

#[tokio::test]
async fn test_explicit_pid_skips_listing()
{
    let lister = StaticLister::with_rows(&[GAME]);
    let host = ScriptedHost::choosing(None);
    let request = AttachRequest {
        pid: Some(4321),
        process_name: Some("Game".to_string()),
    };

    let pid = resolve_attach_target(&request, &lister, &host, &FilterConfig::default()).await.unwrap();

    assert_eq!(pid, ProcessId(4321));
    assert_eq!(lister.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_request_without_pid_uses_name_hint()
{
    let lister = StaticLister::with_rows(&[GAME, (99, "Other", "C:\\other.exe")]);
    let host = ScriptedHost::choosing(None);
    let request = AttachRequest {
        pid: Some(0),
        process_name: Some("Other".to_string()),
    };

    let pid = resolve_attach_target(&request, &lister, &host, &FilterConfig::default()).await.unwrap();

    assert_eq!(pid, ProcessId(99));
    assert_eq!(lister.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_list_candidates_does_not_prompt()
{
    let lister = StaticLister::with_rows(&[GAME, (5678, "Game Server", "C:\\G\\GameServer.exe")]);

    let candidates = list_candidates(&lister, "Server", &FilterConfig::default()).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].label, "5678 : GameServer.exe");
}
