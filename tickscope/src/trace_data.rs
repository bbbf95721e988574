//! Trace data model and loader
//!
//! Loads a whole profiler trace into memory. Two layouts are accepted:
//!
//! - a bare JSON array of records (what the game-server profiler writes)
//! - a Chrome Trace Event container: `{"traceEvents": [...]}`
//!
//! Ingestion is permissive: a record with an unusable `name` or `ts` is kept
//! with that field absent, and the span matcher decides to skip it.

// Float timestamps are rounded into integer microseconds
#![allow(clippy::cast_possible_truncation)]

use crate::domain::{Phase, Timestamp, TraceError};
use log::info;
use serde_json::Value as JsonValue;
use std::path::Path;

/// One record from the input log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub name: Option<String>,
    pub timestamp: Option<Timestamp>,
    pub phase: Phase,
}

impl RawEvent {
    /// Well-formed begin record
    pub fn begin(name: impl Into<String>, ts: i64) -> Self {
        Self { name: Some(name.into()), timestamp: Some(Timestamp(ts)), phase: Phase::Begin }
    }

    /// Well-formed end record
    pub fn end(name: impl Into<String>, ts: i64) -> Self {
        Self { name: Some(name.into()), timestamp: Some(Timestamp(ts)), phase: Phase::End }
    }

    /// Convert a JSON record, leaving unusable fields absent.
    #[must_use]
    pub fn from_json(record: &JsonValue) -> Self {
        Self {
            name: record["name"].as_str().map(str::to_owned),
            timestamp: parse_timestamp(&record["ts"]),
            phase: Phase::from_code(record["ph"].as_str()),
        }
    }
}

/// Integer microseconds, or a float rounded to the nearest microsecond.
fn parse_timestamp(value: &JsonValue) -> Option<Timestamp> {
    if let Some(ts) = value.as_i64() {
        return Some(Timestamp(ts));
    }
    // u64 beyond i64::MAX lands here too and is rejected by the range check
    value
        .as_f64()
        .filter(|ts| ts.is_finite() && *ts >= i64::MIN as f64 && *ts < i64::MAX as f64)
        .map(|ts| Timestamp(ts.round() as i64))
}

/// Internal data model for a profiler trace (immutable, loaded from file)
#[derive(Debug, Clone, Default)]
pub struct TraceData {
    pub events: Vec<RawEvent>,
}

impl TraceData {
    /// Read and parse a trace file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a trace.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| TraceError::ReadFailed { path: path.to_path_buf(), source })?;
        let data = Self::from_json_str(&content)?;
        info!("Loaded {} trace records from {}", data.events.len(), path.display());
        Ok(data)
    }

    /// Parse trace JSON held in memory.
    ///
    /// # Errors
    /// Returns an error on invalid JSON or an unrecognised top-level layout.
    pub fn from_json_str(content: &str) -> Result<Self, TraceError> {
        let json: JsonValue = serde_json::from_str(content)?;

        let records = match &json {
            JsonValue::Array(records) => records,
            JsonValue::Object(map) => match map.get("traceEvents") {
                Some(JsonValue::Array(records)) => records,
                _ => return Err(TraceError::UnexpectedShape("an object without traceEvents")),
            },
            other => return Err(TraceError::UnexpectedShape(json_kind(other))),
        };

        Ok(Self { events: records.iter().map(RawEvent::from_json).collect() })
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_array() {
        let data = TraceData::from_json_str(
            r#"[{"name":"tick (a)","ts":0,"ph":"B"},{"name":"tick (a)","ts":5000,"ph":"E"}]"#,
        )
        .unwrap();

        assert_eq!(data.events, vec![RawEvent::begin("tick (a)", 0), RawEvent::end("tick (a)", 5000)]);
    }

    #[test]
    fn test_parses_trace_events_container() {
        let data = TraceData::from_json_str(
            r#"{"traceEvents":[{"name":"event:x","ts":10,"ph":"B","pid":1,"tid":2}],"displayTimeUnit":"ms"}"#,
        )
        .unwrap();

        assert_eq!(data.event_count(), 1);
        assert_eq!(data.events[0], RawEvent::begin("event:x", 10));
    }

    #[test]
    fn test_missing_fields_are_kept_absent() {
        let data = TraceData::from_json_str(
            r#"[{"ts":1,"ph":"B"},{"name":"tick (a)","ph":"E"},{"name":42,"ts":"3","ph":"B"},7]"#,
        )
        .unwrap();

        assert_eq!(data.event_count(), 4);
        assert_eq!(data.events[0].name, None);
        assert_eq!(data.events[1].timestamp, None);
        assert_eq!(data.events[2].name, None);
        assert_eq!(data.events[2].timestamp, None);
        assert_eq!(data.events[3], RawEvent { name: None, timestamp: None, phase: Phase::Other });
    }

    #[test]
    fn test_float_timestamps_round_to_micros() {
        let data = TraceData::from_json_str(r#"[{"name":"n","ts":1000.6,"ph":"X"}]"#).unwrap();
        assert_eq!(data.events[0].timestamp, Some(Timestamp(1001)));
        assert_eq!(data.events[0].phase, Phase::Other);
    }

    #[test]
    fn test_rejects_unexpected_layout() {
        let err = TraceData::from_json_str(r#""hello""#).unwrap_err();
        assert!(matches!(err, TraceError::UnexpectedShape("a string")));

        let err = TraceData::from_json_str(r#"{"events":[]}"#).unwrap_err();
        assert!(matches!(err, TraceError::UnexpectedShape(_)));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = TraceData::from_json_str("{ invalid json").unwrap_err();
        assert!(matches!(err, TraceError::InvalidJson(_)));
    }
}
