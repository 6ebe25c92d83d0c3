//! Tests for process types

use pidscout_core::types::{Candidate, ProcessId, ProcessRecord};

#[test]
fn test_process_id_from_u32()
{
    let pid = ProcessId::from(12345);
    assert_eq!(pid.0, 12345);
}

#[test]
fn test_process_id_to_u32()
{
    let pid = ProcessId::from(54321);
    let value: u32 = pid.into();
    assert_eq!(value, 54321);
}

#[test]
fn test_process_id_display()
{
    assert_eq!(ProcessId(1234).to_string(), "1234");
}

#[test]
fn test_record_short_name()
{
    let record = ProcessRecord::new(1, "", "C:\\Program Files\\Epic Games\\UE4Editor.exe");
    assert_eq!(record.short_name(), "UE4Editor.exe");
}

#[test]
fn test_record_short_name_empty_path()
{
    let record = ProcessRecord::new(4, "System", "");
    assert_eq!(record.short_name(), "");
}

#[test]
fn test_candidate_from_record()
{
    let candidate = Candidate::from_record(ProcessRecord::new(1234, "Game", "C:\\G\\Game.exe"));
    assert_eq!(candidate.pid(), ProcessId(1234));
    assert_eq!(candidate.short_name, "Game.exe");
    assert_eq!(candidate.label, "1234 : Game.exe");
    assert_eq!(candidate.description(), "Game");
    assert_eq!(candidate.detail(), "C:\\G\\Game.exe");
}
