//! # Logging Utilities
//!
//! Logging infrastructure for pidscout using `tracing`.
//!
//! ## Where logs go
//!
//! pidscout prints the resolved PID on stdout so it can be captured by
//! scripts and editor integrations. Logs therefore never go to stdout:
//!
//! - Console logging writes to **stderr**
//! - While the terminal picker owns the screen, logging is **file-only**
//!   (see [`init_logging_for_picker`])
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=pidscout_core=trace`)
//! - `PIDSCOUT_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
//! - `PIDSCOUT_LOG_FILE`: Optional path of an additional log file
//!
//! ## Example
//!
//! ```rust,no_run
//! use pidscout_utils::{LogFormat, LogLevel, init_logging_with_level};
//!
//! let _guard = init_logging_with_level(LogLevel::Debug, LogFormat::Pretty).expect("Failed to initialize logging");
//! tracing::debug!("Listing processes");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "PIDSCOUT_LOG_FORMAT";

/// Environment variable naming an additional log file
pub const LOG_FILE_ENV: &str = "PIDSCOUT_LOG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file logging alive; buffered lines are flushed when it is dropped
///
/// Hold it until the program exits.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LogGuard
{
    file: Option<PathBuf>,
    _worker: Option<WorkerGuard>,
}

impl LogGuard
{
    /// Path of the log file, if file logging is active
    #[must_use]
    pub fn file(&self) -> Option<&Path>
    {
        self.file.as_deref()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Human-readable lines (default)
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "text" | "dev" => Ok(LogFormat::Pretty),
            "json" | "prod" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {s}. Use 'pretty' or 'json'")),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    Error,
    Warn,
    /// Default
    Info,
    Debug,
    /// Most verbose
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "Unknown log level: {s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            )),
        }
    }
}

/// Initialize stderr logging from the environment
///
/// Reads `RUST_LOG`, `PIDSCOUT_LOG_FORMAT` and `PIDSCOUT_LOG_FILE`.
/// Defaults to `INFO` and the pretty format.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// file directory cannot be created.
pub fn init_logging() -> Result<LogGuard, LoggingError>
{
    let format = env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|s| LogFormat::from_str(&s).ok())
        .unwrap_or(LogFormat::Pretty);

    init_stderr_logging(format, None)
}

/// Initialize stderr logging with an explicit level and format
///
/// `RUST_LOG` is ignored; `PIDSCOUT_LOG_FILE` is still honoured.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// file directory cannot be created.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LogGuard, LoggingError>
{
    init_stderr_logging(format, Some(level.into()))
}

/// Initialize file-only logging while the terminal picker owns the screen
///
/// Logs go to `~/.pidscout/YYYY-MM-DD-pidscout.log`, or to the system
/// temporary directory when `HOME` is not set.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// directory cannot be created.
pub fn init_logging_for_picker(level: Option<LogLevel>) -> Result<LogGuard, LoggingError>
{
    let log_file = default_log_file()?;
    let (layer, worker) = file_layer(&log_file, LogFormat::Pretty, env_filter(level.map(Into::into)))?;

    Registry::default()
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    Ok(LogGuard {
        file: Some(log_file),
        _worker: Some(worker),
    })
}

/// Dated log file under `~/.pidscout`, creating the directory if needed
fn default_log_file() -> Result<PathBuf, LoggingError>
{
    let today = Utc::now().format("%Y-%m-%d");
    let dir = match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".pidscout"),
        Err(_) => env::temp_dir(),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(format!("{today}-pidscout.log")))
}

/// Build the level filter
///
/// An explicit level wins; otherwise `RUST_LOG` (which may carry per-crate
/// directives) is used, falling back to `INFO`.
fn env_filter(explicit: Option<Level>) -> EnvFilter
{
    match explicit {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
    }
}

fn init_stderr_logging(format: LogFormat, level: Option<Level>) -> Result<LogGuard, LoggingError>
{
    // EnvFilter is not Clone; each layer gets its own
    let mut layers: Vec<BoxedLayer> = vec![console_layer(format, env_filter(level))];
    let mut guard = LogGuard::default();

    if let Some(path) = env::var_os(LOG_FILE_ENV).map(PathBuf::from) {
        let (layer, worker) = file_layer(&path, format, env_filter(level))?;
        layers.push(layer);
        guard = LogGuard {
            file: Some(path),
            _worker: Some(worker),
        };
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    Ok(guard)
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    formatted_layer(format, io::stderr, true, filter)
}

fn file_layer(path: &Path, format: LogFormat, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard), LoggingError>
{
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InitializationFailed(format!("Not a file path: {}", path.display())))?;
    std::fs::create_dir_all(dir)?;

    // The date is already part of the default file name, so never roll
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    Ok((formatted_layer(format, writer, false, filter), guard))
}

fn formatted_layer<W>(format: LogFormat, writer: W, ansi: bool, filter: EnvFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339());

    match format {
        LogFormat::Pretty => layer.with_ansi(ansi).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// A subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("text").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("Warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_file_layer_flushes_when_guard_dropped()
    {
        let dir = env::temp_dir().join(format!("pidscout-logging-{}", std::process::id()));
        let path = dir.join("flush.log");
        let (layer, guard) = file_layer(&path, LogFormat::Pretty, EnvFilter::new("info")).unwrap();

        tracing::subscriber::with_default(Registry::default().with(layer), || {
            tracing::info!("Resolved attach target: PID 4242");
        });
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert!(contents.contains("Resolved attach target: PID 4242"));
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }
}
