//! Plain-text host for terminals where the full-screen picker is unavailable

use async_trait::async_trait;
use pidscout_core::host::PICK_PROMPT;
use pidscout_core::{AttachHost, Candidate};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prints a numbered list on stderr and reads the choice from stdin
///
/// An empty line, end of input, or anything that is not a listed number
/// dismisses the prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHost;

#[async_trait]
impl AttachHost for ConsoleHost
{
    async fn present_choice(&self, candidates: &[Candidate]) -> Option<usize>
    {
        eprintln!("{PICK_PROMPT}:");
        for (i, candidate) in candidates.iter().enumerate() {
            eprintln!("  [{}] {candidate}", i + 1);
            eprintln!("      {}", candidate.detail());
        }
        eprint!("Enter a number (empty to cancel): ");

        let mut line = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => parse_choice(&line, candidates.len()),
        }
    }

    fn report_error(&self, message: &str)
    {
        eprintln!("Error: {message}");
    }
}

/// Convert a 1-based answer into a candidate index
fn parse_choice(input: &str, count: usize) -> Option<usize>
{
    let number: usize = input.trim().parse().ok()?;
    (1..=count).contains(&number).then(|| number - 1)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_choice()
    {
        assert_eq!(parse_choice("1\n", 2), Some(0));
        assert_eq!(parse_choice(" 2 ", 2), Some(1));
        assert_eq!(parse_choice("3", 2), None);
        assert_eq!(parse_choice("0", 2), None);
        assert_eq!(parse_choice("", 2), None);
        assert_eq!(parse_choice("abc", 2), None);
    }
}
