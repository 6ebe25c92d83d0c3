mod console;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pidscout_core::config::{DEFAULT_ENCODING_LABEL, LIST_PROCESSES_SUBCOMMAND};
use pidscout_core::selector::list_candidates;
use pidscout_core::{
    resolve_attach_target, AttachHost, AttachRequest, FilterConfig, HelperConfig, HelperProcessLister, SelectionError,
};
use pidscout_ui::TerminalHost;
use pidscout_utils::{error, info, init_logging, init_logging_for_picker, init_logging_with_level, warn, LogFormat, LogGuard, LogLevel};

use crate::console::ConsoleHost;

/// Resolve which running process a debugger should attach to.
#[derive(Parser, Debug)]
#[command(name = "pidscout")]
#[command(version)]
#[command(about = "Resolve which running process a debugger should attach to", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    helper: HelperArgs,

    #[command(flatten)]
    filter: FilterArgs,

    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true, env = "PIDSCOUT_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Log format: pretty or json
    #[arg(long, global = true, env = "PIDSCOUT_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Resolve the process to attach to and print its PID
    Pick
    {
        /// Process-name hint matched against window titles and executable names
        name: Option<String>,
        /// Attach to this PID directly, skipping the process listing
        #[arg(long)]
        pid: Option<u32>,
        /// Use a numbered prompt instead of the full-screen picker
        #[arg(long, default_value_t = false)]
        plain: bool,
    },
    /// Print the processes that pass the filters without prompting
    List
    {
        /// Process-name hint matched against window titles and executable names
        name: Option<String>,
    },
}

/// How to run the process-listing helper
#[derive(Args, Debug)]
struct HelperArgs
{
    /// Path to the process-listing helper executable
    #[arg(long, global = true, env = "PIDSCOUT_HELPER")]
    helper: Option<PathBuf>,

    /// Text encoding of the helper's output (WHATWG label)
    #[arg(long, global = true, env = "PIDSCOUT_ENCODING", default_value = DEFAULT_ENCODING_LABEL)]
    encoding: String,

    /// Seconds to wait for the helper before killing it
    #[arg(long, global = true, env = "PIDSCOUT_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
}

impl HelperArgs
{
    fn to_config(&self) -> Option<HelperConfig>
    {
        let helper_path = self.helper.clone()?;
        Some(HelperConfig {
            helper_path,
            subcommand: LIST_PROCESSES_SUBCOMMAND.to_string(),
            encoding_label: self.encoding.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Candidate filtering preferences
#[derive(Args, Debug)]
struct FilterArgs
{
    /// Only keep processes whose name matches an engine pattern
    #[arg(long, global = true, env = "PIDSCOUT_FILTER_ENGINE")]
    filter_engine: bool,

    /// Always confirm, even when only one process matches
    #[arg(long, global = true, env = "PIDSCOUT_NO_AUTO_ATTACH")]
    no_auto_attach: bool,

    /// Engine process-name pattern (repeatable, case-insensitive)
    #[arg(long = "engine-pattern", global = true, env = "PIDSCOUT_ENGINE_PATTERNS", value_delimiter = ',')]
    engine_patterns: Vec<String>,

    /// Exclude processes whose name, title or path contains this (repeatable)
    #[arg(long = "blacklist", global = true, env = "PIDSCOUT_BLACKLIST", value_delimiter = ',')]
    blacklist: Vec<String>,
}

impl FilterArgs
{
    fn to_config(&self) -> FilterConfig
    {
        FilterConfig {
            filter_by_engine_type: self.filter_engine,
            auto_attach_single_process: !self.no_auto_attach,
            engine_process_name_patterns: self.engine_patterns.clone(),
            blacklist_patterns: self.blacklist.clone(),
        }
    }
}

/// Process exit status for each outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome
{
    Resolved,
    Failed,
    NoCandidates,
    /// Dismissed by the user, or the picker could not be shown
    Cancelled,
}

impl Outcome
{
    fn code(self) -> u8
    {
        match self {
            Outcome::Resolved => 0,
            Outcome::Failed => 1,
            Outcome::NoCandidates => 2,
            Outcome::Cancelled => 3,
        }
    }
}

impl From<Outcome> for ExitCode
{
    fn from(outcome: Outcome) -> Self
    {
        ExitCode::from(outcome.code())
    }
}

fn main() -> ExitCode
{
    let cli = Cli::parse();

    // Dropped last so buffered file logs are flushed before exit
    let _log_guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return Outcome::Failed.into();
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            return Outcome::Failed.into();
        }
    };

    runtime.block_on(run_command(cli)).into()
}

/// Whether the full-screen picker will own the terminal
fn uses_picker(cli: &Cli) -> bool
{
    matches!(cli.command, Commands::Pick { plain: false, .. }) && std::io::stderr().is_terminal()
}

fn setup_logging(cli: &Cli) -> Result<LogGuard, pidscout_utils::LoggingError>
{
    if uses_picker(cli) {
        init_logging_for_picker(cli.log_level)
    } else if let Some(level) = cli.log_level {
        init_logging_with_level(level, cli.log_format)
    } else {
        init_logging()
    }
}

async fn run_command(cli: Cli) -> Outcome
{
    // An explicit PID needs no helper at all
    if let Commands::Pick { pid, .. } = cli.command {
        if let Some(pid) = (AttachRequest { pid, process_name: None }).explicit_pid() {
            info!("Using explicit PID {pid}");
            println!("{pid}");
            return Outcome::Resolved;
        }
    }

    let Some(helper_config) = cli.helper.to_config() else {
        eprintln!("Error: no helper given. Pass --helper <PATH> or set PIDSCOUT_HELPER.");
        return Outcome::Failed;
    };
    let lister = match HelperProcessLister::from_config(&helper_config) {
        Ok(lister) => lister,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            return Outcome::Failed;
        }
    };
    let filter = cli.filter.to_config();

    match &cli.command {
        Commands::Pick { name, pid, .. } => {
            let request = AttachRequest {
                pid: *pid,
                process_name: name.clone(),
            };
            let host: &dyn AttachHost = if uses_picker(&cli) { &TerminalHost } else { &ConsoleHost };
            pick(&request, &lister, host, &filter).await
        }
        Commands::List { name } => list(&lister, name.as_deref().unwrap_or_default(), &filter).await,
    }
}

async fn pick(request: &AttachRequest, lister: &HelperProcessLister, host: &dyn AttachHost, filter: &FilterConfig) -> Outcome
{
    match resolve_attach_target(request, lister, host, filter).await {
        Ok(pid) => {
            info!("Resolved attach target: PID {pid}");
            println!("{pid}");
            Outcome::Resolved
        }
        Err(SelectionError::Cancelled) => {
            info!("Process selection cancelled");
            Outcome::Cancelled
        }
        Err(SelectionError::NoCandidates) => {
            warn!("No process matched the name hint and filters");
            Outcome::NoCandidates
        }
        Err(e @ SelectionError::HelperExecution(_)) => {
            error!("{e}");
            eprintln!("Error: {e}");
            Outcome::Failed
        }
    }
}

async fn list(lister: &HelperProcessLister, name_hint: &str, filter: &FilterConfig) -> Outcome
{
    match list_candidates(lister, name_hint, filter).await {
        Ok(candidates) => {
            for candidate in &candidates {
                println!("{}\t{}\t{}", candidate.label, candidate.description(), candidate.detail());
            }
            info!("{} processes matched", candidates.len());
            Outcome::Resolved
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            Outcome::Failed
        }
    }
}
