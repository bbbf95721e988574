//! Report export functionality
//!
//! This module writes a finished [`ProfileReport`](crate::analysis::ProfileReport)
//! to files:
//! - a Markdown optimization report for people
//! - the complete report as JSON for other tools

pub mod json_report;
pub mod markdown;

pub use json_report::JsonReportExporter;
pub use markdown::{MarkdownReportExporter, DEFAULT_TOP_RESOURCES, DEFAULT_TOP_ROWS};
