//! Tests for the helper output parser

use pidscout_core::parser::parse_records;
use pidscout_core::types::{ProcessId, ProcessRecord};

fn table(rows: &[[&str; 4]]) -> String
{
    rows.iter().map(|row| row.iter().map(|field| format!("{field}\r\n")).collect::<String>()).collect()
}

#[test]
fn test_parse_empty_input()
{
    assert!(parse_records("").is_empty());
}

#[test]
fn test_parse_single_record()
{
    let records = parse_records("1234\r\nGame\r\nC:\\G\\Game.exe\r\n0\r\n");
    assert_eq!(records, vec![ProcessRecord::new(1234, "Game", "C:\\G\\Game.exe")]);
}

#[test]
fn test_parse_uses_fixed_offsets()
{
    let text = table(&[
        ["10", "First", "C:\\a.exe", "reserved-a"],
        ["20", "", "C:\\b.exe", "reserved-b"],
        ["30", "Third", "C:\\c.exe", ""],
    ]);
    let records = parse_records(&text);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].pid, ProcessId(10));
    assert_eq!(records[0].title, "First");
    assert_eq!(records[0].path, "C:\\a.exe");
    assert_eq!(records[1].title, "");
    assert_eq!(records[2].pid, ProcessId(30));
    assert_eq!(records[2].path, "C:\\c.exe");
}

#[test]
fn test_parse_record_count_is_line_count_over_four()
{
    // 9 lines split from the text below: two full groups plus one stray line
    let text = "1\r\na\r\nC:\\a.exe\r\n\r\n2\r\nb\r\nC:\\b.exe\r\n\r\n3";
    let records = parse_records(text);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_parse_without_trailing_terminator()
{
    let records = parse_records("5\r\ntitle\r\nC:\\x.exe\r\nreserved");
    assert_eq!(records, vec![ProcessRecord::new(5, "title", "C:\\x.exe")]);
}

#[test]
fn test_parse_skips_non_numeric_pid()
{
    let text = table(&[
        ["100", "Before", "C:\\before.exe", ""],
        ["oops", "Broken", "C:\\broken.exe", ""],
        ["200", "After", "C:\\after.exe", ""],
    ]);
    let records = parse_records(&text);

    let pids: Vec<u32> = records.iter().map(|r| r.pid.0).collect();
    assert_eq!(pids, vec![100, 200]);
    assert_eq!(records[1].title, "After");
}

#[test]
fn test_parse_skips_zero_pid()
{
    let text = table(&[["0", "Idle", "", ""], ["4", "System", "System", ""]]);
    let records = parse_records(&text);
    assert_eq!(records, vec![ProcessRecord::new(4, "System", "System")]);
}

#[test]
fn test_parse_preserves_duplicates_and_order()
{
    let text = table(&[
        ["7", "b", "C:\\b.exe", ""],
        ["3", "a", "C:\\a.exe", ""],
        ["7", "b", "C:\\b.exe", ""],
    ]);
    let pids: Vec<u32> = parse_records(&text).iter().map(|r| r.pid.0).collect();
    assert_eq!(pids, vec![7, 3, 7]);
}

#[test]
fn test_parse_ignores_bare_newlines()
{
    // Only "\r\n" separates fields, so a lone "\n" stays inside the title
    let records = parse_records("9\r\nline\none\r\nC:\\x.exe\r\n\r\n");
    assert_eq!(records[0].title, "line\none");
}
