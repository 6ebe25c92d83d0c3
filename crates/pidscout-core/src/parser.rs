//! # Record Parser
//!
//! Turns the helper's decoded text into [`ProcessRecord`]s.
//!
//! ## Format
//!
//! Each process occupies four `\r\n`-terminated lines:
//!
//! ```text
//! <pid>
//! <title>
//! <path>
//! <reserved>
//! ```
//!
//! There is no header or footer, and fields are not escaped. A field that
//! itself contains `\r\n` shifts every following record out of alignment;
//! the helper never emits such fields.

use tracing::debug;

use crate::types::{ProcessId, ProcessRecord};

/// Line terminator the helper writes between fields
pub const LINE_TERMINATOR: &str = "\r\n";

/// Number of lines per record
pub const LINES_PER_RECORD: usize = 4;

/// Parse the helper's process table
///
/// The text is split on [`LINE_TERMINATOR`] and read in groups of
/// [`LINES_PER_RECORD`] lines; a trailing partial group is ignored. The
/// fourth line of each group is reserved and never read.
///
/// A record whose PID line is not a positive integer is skipped; the
/// records around it are unaffected. Empty input yields no records.
///
/// ```rust
/// use pidscout_core::parser::parse_records;
///
/// let records = parse_records("1234\r\nGame\r\nC:\\G\\Game.exe\r\n\r\n");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].title, "Game");
/// ```
#[must_use]
pub fn parse_records(text: &str) -> Vec<ProcessRecord>
{
    let lines: Vec<&str> = text.split(LINE_TERMINATOR).collect();
    let record_count = lines.len() / LINES_PER_RECORD;

    let records: Vec<ProcessRecord> = lines
        .chunks_exact(LINES_PER_RECORD)
        .enumerate()
        .filter_map(|(index, group)| {
            let Some(pid) = parse_pid(group[0]) else {
                debug!(
                    line = index * LINES_PER_RECORD,
                    value = group[0],
                    "Skipping process record with invalid PID"
                );
                return None;
            };
            Some(ProcessRecord::new(pid, group[1], group[2]))
        })
        .collect();

    debug!("Parsed {} of {} process records", records.len(), record_count);
    records
}

/// Parse a PID field, accepting only positive integers
fn parse_pid(field: &str) -> Option<ProcessId>
{
    match field.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(pid) => Some(ProcessId(pid)),
    }
}
