use std::fs;
use tempfile::tempdir;
use tickscope::analysis::{AnalysisConfig, ProfileReport};
use tickscope::export::{JsonReportExporter, MarkdownReportExporter};
use tickscope::trace_data::TraceData;

fn chrome_report() -> ProfileReport {
    let data = TraceData::from_file("tests/fixtures/chrome_container.json").unwrap();
    ProfileReport::build(&data.events, &AnalysisConfig::default())
}

#[test]
fn test_json_export_creates_valid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");

    let report = chrome_report();
    JsonReportExporter::new(&report).export(fs::File::create(&path).unwrap()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["ticks"][0]["name"], "tick (a)");
    assert_eq!(parsed["ticks"][0]["resource"], "a");
    assert_eq!(parsed["events"][0]["resource"], "event");
    assert_eq!(parsed["resources"][0]["resource"], "a");
    assert_eq!(parsed["resources"][1]["resource"], "event");
    assert!(parsed["ref_calls"].as_array().unwrap().is_empty());
}

#[test]
fn test_markdown_report_written_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");

    let report = chrome_report();
    MarkdownReportExporter::new(&report).export(fs::File::create(&path).unwrap()).unwrap();

    let doc = fs::read_to_string(&path).unwrap();
    assert!(doc.contains("# Server Optimization Report"));
    assert!(doc.contains("## Top Resources by Total CPU Time"));
    assert!(doc.contains("- a: 5.00 ms total"));
    assert!(doc.contains("- event: 0.01 ms total"));
}
