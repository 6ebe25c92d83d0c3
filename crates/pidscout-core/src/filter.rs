//! # Candidate Filter
//!
//! Reduces the process listing to the processes a user may attach to.
//!
//! A record becomes a [`Candidate`] only if all three predicates hold:
//!
//! 1. **Name match** ([`matches_name`]): the hint is empty, or it appears in
//!    the title or the short name. Case-sensitive.
//! 2. **Engine classification** ([`matches_engine`]): engine filtering is
//!    off, or the short name contains one of the engine patterns.
//!    Case-insensitive.
//! 3. **Blacklist** ([`is_blacklisted`]): none of short name, title, or path
//!    contains a blacklist pattern. Case-insensitive. Exclusion wins over
//!    both inclusion predicates.
//!
//! An empty pattern is contained in every string, so it matches every
//! process. Output order is listing order; duplicates
//! are kept.

use tracing::trace;

use crate::config::FilterConfig;
use crate::types::{Candidate, ProcessRecord};

/// Whether a process matches the user's name hint
#[must_use]
pub fn matches_name(name_hint: &str, title: &str, short_name: &str) -> bool
{
    name_hint.is_empty() || title.contains(name_hint) || short_name.contains(name_hint)
}

/// Whether `short_name` contains any of `patterns`, ignoring case
#[must_use]
pub fn is_engine_process(short_name: &str, patterns: &[String]) -> bool
{
    let lower_name = short_name.to_lowercase();
    patterns
        .iter()
        .any(|pattern| lower_name.contains(&pattern.to_lowercase()))
}

/// Engine-type predicate; always passes when engine filtering is disabled
#[must_use]
pub fn matches_engine(short_name: &str, config: &FilterConfig) -> bool
{
    !config.filter_by_engine_type || is_engine_process(short_name, &config.engine_process_name_patterns)
}

/// Whether any blacklist pattern occurs in the short name, title, or path
#[must_use]
pub fn is_blacklisted(short_name: &str, title: &str, path: &str, config: &FilterConfig) -> bool
{
    if config.blacklist_patterns.is_empty() {
        return false;
    }

    let fields = [short_name.to_lowercase(), title.to_lowercase(), path.to_lowercase()];
    config
        .blacklist_patterns
        .iter()
        .map(|pattern| pattern.to_lowercase())
        .any(|pattern| fields.iter().any(|field| field.contains(&pattern)))
}

/// Whether a single record survives all three predicates
#[must_use]
pub fn accepts(record: &ProcessRecord, name_hint: &str, config: &FilterConfig) -> bool
{
    let short_name = record.short_name();

    if is_blacklisted(short_name, &record.title, &record.path, config) {
        trace!(pid = record.pid.0, "Excluded by blacklist");
        return false;
    }

    matches_name(name_hint, &record.title, short_name) && matches_engine(short_name, config)
}

/// Filter a listing down to attachable candidates, preserving order
///
/// ```rust
/// use pidscout_core::config::FilterConfig;
/// use pidscout_core::filter::filter_candidates;
/// use pidscout_core::types::ProcessRecord;
///
/// let records = vec![
///     ProcessRecord::new(1, "", "C:\\UE4Editor-Win64.exe"),
///     ProcessRecord::new(2, "", "C:\\notepad.exe"),
/// ];
/// let config = FilterConfig::default().with_engine_patterns(["ue4editor"]);
/// let candidates = filter_candidates(records, "", &config);
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].short_name, "UE4Editor-Win64.exe");
/// ```
pub fn filter_candidates<I>(records: I, name_hint: &str, config: &FilterConfig) -> Vec<Candidate>
where
    I: IntoIterator<Item = ProcessRecord>,
{
    records
        .into_iter()
        .filter(|record| accepts(record, name_hint, config))
        .map(Candidate::from_record)
        .collect()
}
