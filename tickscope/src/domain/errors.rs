//! Structured error types for tickscope
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Trace is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected trace layout: expected an array of events or a traceEvents object, found {0}")]
    UnexpectedShape(&'static str),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TuiError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_shape_display() {
        let err = TraceError::UnexpectedShape("a string");
        assert!(err.to_string().contains("found a string"));
    }

    #[test]
    fn test_read_failed_names_path() {
        let err = TraceError::ReadFailed {
            path: PathBuf::from("profile.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("profile.json"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: TraceError = json_err.into();
        assert!(err.to_string().starts_with("Trace is not valid JSON"));
    }
}
