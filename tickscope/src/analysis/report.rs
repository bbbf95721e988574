//! Assembled analysis output handed to the renderers.

use super::aggregator::{
    grand_total_ms, percent_of_total, rank_resources, summarize, ResourceTotal, SummaryRow,
    DEFAULT_SPIKE_THRESHOLD_MS,
};
use super::span_matcher::{match_spans, MatchStats};
use crate::domain::Category;
use crate::trace_data::RawEvent;
use log::{info, warn};
use serde::Serialize;

/// Tunables for a single analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub spike_threshold_ms: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { spike_threshold_ms: DEFAULT_SPIKE_THRESHOLD_MS }
    }
}

/// Ranked summaries for one trace.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub ticks: Vec<SummaryRow>,
    pub ref_calls: Vec<SummaryRow>,
    pub events: Vec<SummaryRow>,
    pub resources: Vec<ResourceTotal>,
    /// Sum of all resource totals
    pub grand_total_ms: f64,
    pub spike_threshold_ms: f64,
    pub match_stats: MatchStats,
}

impl ProfileReport {
    /// Match spans and aggregate them in one pass over `events`.
    #[must_use]
    pub fn build(events: &[RawEvent], config: &AnalysisConfig) -> Self {
        let spans = match_spans(events);
        if spans.span_count() == 0 && !events.is_empty() {
            warn!("No tick, ref call or event spans could be matched in {} records", events.len());
        }

        let threshold = config.spike_threshold_ms;
        let resources = rank_resources(&spans);
        let grand_total_ms = grand_total_ms(&resources);

        let report = Self {
            ticks: summarize(&spans.ticks, threshold),
            ref_calls: summarize(&spans.ref_calls, threshold),
            events: summarize(&spans.events, threshold),
            resources,
            grand_total_ms,
            spike_threshold_ms: threshold,
            match_stats: spans.stats,
        };

        info!(
            "Aggregated {} spans: {} tick handlers, {} ref calls, {} events across {} resources ({:.2} ms)",
            report.match_stats.matched,
            report.ticks.len(),
            report.ref_calls.len(),
            report.events.len(),
            report.resources.len(),
            report.grand_total_ms,
        );
        report
    }

    /// Ranked rows for a category (empty for [`Category::Unclassified`]).
    #[must_use]
    pub fn rows(&self, category: Category) -> &[SummaryRow] {
        match category {
            Category::Tick => &self.ticks,
            Category::RefCall => &self.ref_calls,
            Category::Event => &self.events,
            Category::Unclassified => &[],
        }
    }

    /// Share of the grand total, in percent.
    #[must_use]
    pub fn percent_of_total(&self, total_ms: f64) -> f64 {
        percent_of_total(total_ms, self.grand_total_ms)
    }

    /// Total spikes across every category.
    #[must_use]
    pub fn spike_count(&self) -> usize {
        Category::REPORTED
            .iter()
            .flat_map(|&c| self.rows(c))
            .map(|row| row.spike_count)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
