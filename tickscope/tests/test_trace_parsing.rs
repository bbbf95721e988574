use tickscope::domain::{Phase, Timestamp};
use tickscope::trace_data::{RawEvent, TraceData};

#[test]
fn test_parse_trace_from_file_succeeds() {
    let result = TraceData::from_file("tests/fixtures/server_profile.json");
    assert!(result.is_ok(), "Failed to parse trace file: {:?}", result.err());
    assert_eq!(result.unwrap().event_count(), 19);
}

#[test]
fn test_parse_trace_extracts_fields() {
    let data = TraceData::from_file("tests/fixtures/server_profile.json").unwrap();

    assert_eq!(data.events[0], RawEvent::begin("tick (vehicles)", 1000));
    assert_eq!(data.events[1], RawEvent::end("tick (vehicles)", 9000));
    assert_eq!(data.events[17].phase, Phase::Other);
}

#[test]
fn test_parse_trace_keeps_malformed_records() {
    let data = TraceData::from_file("tests/fixtures/server_profile.json").unwrap();

    let missing_ts = &data.events[15];
    assert_eq!(missing_ts.name.as_deref(), Some("tick (chat)"));
    assert_eq!(missing_ts.timestamp, None);

    let missing_name = &data.events[16];
    assert_eq!(missing_name.name, None);
    assert_eq!(missing_name.timestamp, Some(Timestamp(73000)));
}

#[test]
fn test_parse_chrome_container() {
    let data = TraceData::from_file("tests/fixtures/chrome_container.json").unwrap();
    assert_eq!(data.event_count(), 4);
    assert_eq!(data.events[2], RawEvent::begin("event:x", 10));
}

#[test]
fn test_parse_invalid_file_returns_error() {
    let result = TraceData::from_file("nonexistent.json");
    assert!(result.is_err(), "Should fail for missing file");
    assert!(result.unwrap_err().to_string().contains("nonexistent.json"));
}

#[test]
fn test_parse_invalid_json_returns_error() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{{ invalid json").unwrap();

    let result = TraceData::from_file(temp_file.path());
    assert!(result.is_err(), "Should fail for invalid JSON");
}

#[test]
fn test_parse_empty_trace() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[]").unwrap();

    let data = TraceData::from_file(temp_file.path()).unwrap();
    assert_eq!(data.event_count(), 0);
}
