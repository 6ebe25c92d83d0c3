//! Process identifiers, listing records, and filtered candidates.

use std::fmt;

/// Process identifier (PID)
///
/// A PID is the number the operating system assigns to each running
/// process. Values produced by the record parser are always positive.
///
/// ## Why wrap it in a struct?
///
/// Using a newtype pattern (`struct ProcessId(u32)`) instead of a raw `u32`
/// prevents accidentally passing a random number where a PID is expected.
///
/// ## Example
///
/// ```rust
/// use pidscout_core::types::ProcessId;
///
/// let pid = ProcessId::from(12345);
/// assert_eq!(u32::from(pid), 12345);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(pub u32);

impl From<u32> for ProcessId
{
    fn from(pid: u32) -> Self
    {
        ProcessId(pid)
    }
}

impl From<ProcessId> for u32
{
    fn from(pid: ProcessId) -> Self
    {
        pid.0
    }
}

impl fmt::Display for ProcessId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

/// One row of the helper's process table
///
/// Records are produced fresh by every listing. Two listings may contain
/// the same PID for different processes if the OS reused it, so records
/// carry no identity beyond the listing they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord
{
    /// Process identifier
    pub pid: ProcessId,
    /// Main window title (may be empty)
    pub title: String,
    /// Full path of the executable
    pub path: String,
}

impl ProcessRecord
{
    /// Create a new record
    pub fn new(pid: impl Into<ProcessId>, title: impl Into<String>, path: impl Into<String>) -> Self
    {
        Self {
            pid: pid.into(),
            title: title.into(),
            path: path.into(),
        }
    }

    /// Executable file name derived from [`ProcessRecord::path`]
    ///
    /// The helper reports Windows paths, so both `\` and `/` count as
    /// separators regardless of the host platform.
    ///
    /// ```rust
    /// use pidscout_core::types::ProcessRecord;
    ///
    /// let record = ProcessRecord::new(1234, "Game", "C:\\G\\Game.exe");
    /// assert_eq!(record.short_name(), "Game.exe");
    /// ```
    #[must_use]
    pub fn short_name(&self) -> &str
    {
        basename(&self.path)
    }
}

/// Last path component of `path`, ignoring trailing separators
fn basename(path: &str) -> &str
{
    let trimmed = path.trim_end_matches(['\\', '/']);
    trimmed.rsplit(['\\', '/']).next().unwrap_or(trimmed)
}

/// A process that survived filtering and can be offered for attachment
///
/// Candidates only live for the duration of one selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate
{
    /// The underlying listing record
    pub record: ProcessRecord,
    /// Executable file name (basename of the path)
    pub short_name: String,
    /// Display label: `"<pid> : <short_name>"`
    pub label: String,
}

impl Candidate
{
    /// Build a candidate from a record, deriving its short name and label
    #[must_use]
    pub fn from_record(record: ProcessRecord) -> Self
    {
        let short_name = record.short_name().to_string();
        let label = format!("{} : {}", record.pid, short_name);
        Self {
            record,
            short_name,
            label,
        }
    }

    /// Process identifier of this candidate
    #[must_use]
    pub fn pid(&self) -> ProcessId
    {
        self.record.pid
    }

    /// Secondary text shown beside the label (the window title)
    #[must_use]
    pub fn description(&self) -> &str
    {
        &self.record.title
    }

    /// Detail line shown under the label (the executable path)
    #[must_use]
    pub fn detail(&self) -> &str
    {
        &self.record.path
    }
}

impl fmt::Display for Candidate
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.record.title.is_empty() {
            write!(f, "{}", self.label)
        } else {
            write!(f, "{} ({})", self.label, self.record.title)
        }
    }
}
