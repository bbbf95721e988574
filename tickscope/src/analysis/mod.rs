//! Analysis logic for profiler traces
//!
//! This module contains the pure pairing and aggregation logic, separated
//! from the console, document and TUI presentation layers.

pub mod aggregator;
pub mod report;
pub mod span_matcher;

pub use aggregator::{
    percent_of_total, rank_resources, summarize, summarize_durations, ResourceTotal, SummaryRow,
    DEFAULT_SPIKE_THRESHOLD_MS,
};
pub use report::{AnalysisConfig, ProfileReport};
pub use span_matcher::{match_spans, DurationTable, MatchStats, MatchedSpans, SpanMatcher};
