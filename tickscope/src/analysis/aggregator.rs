//! Summary statistics over matched span durations.
//!
//! Two rankings are produced from a [`MatchedSpans`] pass:
//!
//! - **[`SummaryRow`]** per event name within a category, sorted by average
//!   time (descending)
//! - **[`ResourceTotal`]** per owning resource across all categories, sorted
//!   by summed time (descending)
//!
//! Every matched duration lands in exactly one summary row and exactly one
//! resource total, so both rankings account for the same CPU time.

// Counts and microsecond sums are converted to f64 for ms statistics
#![allow(clippy::cast_precision_loss)]

use super::span_matcher::{DurationTable, MatchedSpans};
use crate::classification::extract_resource;
use crate::domain::Elapsed;
use serde::Serialize;
use std::collections::HashMap;

/// Default threshold above which a single duration counts as a spike.
pub const DEFAULT_SPIKE_THRESHOLD_MS: f64 = 5.0;

/// Aggregate over all durations sharing a name within a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub resource: String,
    pub count: usize,
    pub total_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
    pub min_ms: f64,
    /// `count / max duration in seconds`.
    ///
    /// Uses the longest single duration as the observation window, so this
    /// is an approximation rather than a wall-clock rate.
    pub frequency_per_sec: f64,
    /// Durations strictly above the spike threshold
    pub spike_count: usize,
}

/// Aggregate over all durations attributed to one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceTotal {
    pub resource: String,
    pub total_ms: f64,
    pub count: usize,
}

/// Summarize the durations recorded for one name.
///
/// Returns `None` for an empty list: a name with no durations has no row.
#[must_use]
pub fn summarize_durations(
    name: &str,
    durations: &[Elapsed],
    spike_threshold_ms: f64,
) -> Option<SummaryRow> {
    let min = durations.iter().min()?;
    let max = durations.iter().max()?;

    let count = durations.len();
    let total: i128 = durations.iter().map(|d| i128::from(d.0)).sum();
    let total_ms = total as f64 / 1_000.0;

    let frequency_per_sec =
        if max.0 == 0 { 0.0 } else { count as f64 / max.as_seconds() };

    let spike_count = durations.iter().filter(|d| d.as_millis() > spike_threshold_ms).count();

    Some(SummaryRow {
        name: name.to_owned(),
        resource: extract_resource(name).to_owned(),
        count,
        total_ms,
        avg_ms: total_ms / count as f64,
        max_ms: max.as_millis(),
        min_ms: min.as_millis(),
        frequency_per_sec,
        spike_count,
    })
}

/// Summarize every name in a category table, most expensive average first.
///
/// Ties keep the table's first-pairing order.
#[must_use]
pub fn summarize(table: &DurationTable, spike_threshold_ms: f64) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = table
        .iter()
        .filter_map(|entry| summarize_durations(&entry.name, &entry.elapsed, spike_threshold_ms))
        .collect();

    // Stable sort keeps insertion order for equal averages
    rows.sort_by(|a, b| b.avg_ms.total_cmp(&a.avg_ms));
    rows
}

/// Rank resources by total time across all categories.
///
/// Ties keep the order in which resources were first seen.
#[must_use]
pub fn rank_resources(spans: &MatchedSpans) -> Vec<ResourceTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ResourceTotal> = Vec::new();

    for span in spans.durations() {
        let idx = *index.entry(span.resource).or_insert_with(|| {
            totals.push(ResourceTotal {
                resource: span.resource.to_owned(),
                total_ms: 0.0,
                count: 0,
            });
            totals.len() - 1
        });
        let entry = &mut totals[idx];
        entry.total_ms += span.elapsed.as_millis();
        entry.count += 1;
    }

    totals.sort_by(|a, b| b.total_ms.total_cmp(&a.total_ms));
    totals
}

/// Sum of all resource totals: the denominator for percentage shares.
#[must_use]
pub fn grand_total_ms(resources: &[ResourceTotal]) -> f64 {
    resources.iter().map(|r| r.total_ms).sum()
}

/// `total_ms` as a percentage of `grand_total_ms`, or 0 when the total is 0.
#[must_use]
pub fn percent_of_total(total_ms: f64, grand_total_ms: f64) -> f64 {
    if grand_total_ms == 0.0 {
        0.0
    } else {
        total_ms / grand_total_ms * 100.0
    }
}
