//! # Process Lister
//!
//! Obtains the raw process table from an external helper program.
//!
//! The helper prints one record per process in a fixed text layout (see
//! [`crate::parser`]). Its output uses the console's legacy code page
//! rather than UTF-8, so the bytes are decoded with a configurable
//! [`encoding_rs::Encoding`].
//!
//! ## Why a trait?
//!
//! Other platforms enumerate processes with different helpers. The
//! selector only depends on [`ProcessLister`], so a provider can be swapped
//! (or faked in tests) without touching the selection logic.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use encoding_rs::Encoding;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::HelperConfig;
use crate::error::HelperError;

/// Source of the raw process-table text
#[async_trait]
pub trait ProcessLister: Send + Sync
{
    /// Produce the decoded process table
    ///
    /// ## Errors
    ///
    /// Returns a [`HelperError`] when the table cannot be produced or decoded.
    async fn list(&self) -> Result<String, HelperError>;
}

/// [`ProcessLister`] that runs a helper executable
///
/// Each call spawns one short-lived child process; no handle is kept
/// between calls. The child is killed if it outlives the timeout.
///
/// ## Example
///
/// ```rust,no_run
/// use pidscout_core::config::HelperConfig;
/// use pidscout_core::lister::{HelperProcessLister, ProcessLister};
///
/// # async fn example() -> Result<(), pidscout_core::error::HelperError> {
/// let lister = HelperProcessLister::from_config(&HelperConfig::new("emmy_tool.exe"))?;
/// let table = lister.list().await?;
/// println!("{table}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HelperProcessLister
{
    helper_path: PathBuf,
    subcommand: String,
    encoding: &'static Encoding,
    timeout: Duration,
}

impl HelperProcessLister
{
    /// Create a lister from helper configuration
    ///
    /// ## Errors
    ///
    /// Returns [`HelperError::UnknownEncoding`] if the encoding label is not
    /// recognised.
    pub fn from_config(config: &HelperConfig) -> Result<Self, HelperError>
    {
        let encoding = Encoding::for_label(config.encoding_label.trim().as_bytes())
            .ok_or_else(|| HelperError::UnknownEncoding(config.encoding_label.clone()))?;

        Ok(Self {
            helper_path: config.helper_path.clone(),
            subcommand: config.subcommand.clone(),
            encoding,
            timeout: config.timeout,
        })
    }

    /// Path of the helper executable
    #[must_use]
    pub fn helper_path(&self) -> &Path
    {
        &self.helper_path
    }

    /// Encoding used to decode the helper's output
    #[must_use]
    pub fn encoding(&self) -> &'static Encoding
    {
        self.encoding
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, HelperError>
    {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(std::borrow::Cow::into_owned)
            .ok_or(HelperError::Decode {
                encoding: self.encoding.name(),
            })
    }
}

#[async_trait]
impl ProcessLister for HelperProcessLister
{
    async fn list(&self) -> Result<String, HelperError>
    {
        debug!(
            helper = %self.helper_path.display(),
            subcommand = %self.subcommand,
            "Running process-listing helper"
        );

        let child = Command::new(&self.helper_path)
            .arg(&self.subcommand)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| HelperError::Spawn {
                path: self.helper_path.display().to_string(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| HelperError::Timeout(self.timeout))??;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(HelperError::NonZeroExit {
                code: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!("Process-listing helper wrote to stderr: {stderr}");
        }

        let text = self.decode(&output.stdout)?;
        debug!(bytes = output.stdout.len(), "Helper output decoded with {}", self.encoding.name());
        Ok(text)
    }
}
