//! Markdown optimization report
//!
//! Document layout:
//!
//! ```text
//! # Server Optimization Report
//! ## Executive Summary          totals, spikes, match diagnostics
//! ## Tick Handlers              top-N by average: chart + table
//! ## Ref Calls                  top-N by average: chart + table
//! ## Custom Events              top-N by average: chart + table
//! ## Top Resources by Total CPU Time
//! ```

use crate::analysis::{ProfileReport, SummaryRow};
use crate::display::{text_bar, truncate_label, MAX_LABEL_CHARS};
use crate::domain::{Category, ExportError};
use std::io::Write;

/// Rows charted per category
pub const DEFAULT_TOP_ROWS: usize = 10;

/// Resources listed in the resource section
pub const DEFAULT_TOP_RESOURCES: usize = 15;

const CHART_WIDTH: usize = 30;

/// Markdown exporter for the human-readable report
pub struct MarkdownReportExporter<'a> {
    report: &'a ProfileReport,
    top_rows: usize,
    top_resources: usize,
}

impl<'a> MarkdownReportExporter<'a> {
    #[must_use]
    pub fn new(report: &'a ProfileReport) -> Self {
        Self { report, top_rows: DEFAULT_TOP_ROWS, top_resources: DEFAULT_TOP_RESOURCES }
    }

    #[must_use]
    pub fn with_top_rows(mut self, top_rows: usize) -> Self {
        self.top_rows = top_rows;
        self
    }

    #[must_use]
    pub fn with_top_resources(mut self, top_resources: usize) -> Self {
        self.top_resources = top_resources;
        self
    }

    /// Write the complete document.
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        self.write_header(&mut writer)?;
        for category in Category::REPORTED {
            self.write_category(&mut writer, category)?;
        }
        self.write_resources(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_header<W: Write>(&self, w: &mut W) -> Result<(), ExportError> {
        let report = self.report;
        let stats = &report.match_stats;

        writeln!(w, "# Server Optimization Report")?;
        writeln!(w)?;
        writeln!(w, "## Executive Summary")?;
        writeln!(w)?;
        writeln!(
            w,
            "This report summarizes profiler analysis for the game server. It highlights the \
             scripts and events with the highest CPU cost and frequency, with charts and \
             ranked tables for each category."
        )?;
        writeln!(w)?;
        writeln!(w, "- Matched spans: {}", stats.matched)?;
        writeln!(w, "- Total CPU time: {:.2} ms", report.grand_total_ms)?;
        writeln!(w, "- Resources: {}", report.resources.len())?;
        writeln!(
            w,
            "- Spikes above {:.2} ms: {}",
            report.spike_threshold_ms,
            report.spike_count()
        )?;
        if let Some(top) = report.resources.first() {
            writeln!(
                w,
                "- Costliest resource: `{}` ({:.2} ms, {:.1}%)",
                top.resource,
                top.total_ms,
                report.percent_of_total(top.total_ms)
            )?;
        }
        writeln!(
            w,
            "- Dropped records: {} malformed, {} orphan ends, {} superseded begins, {} unterminated",
            stats.malformed, stats.orphan_ends, stats.superseded_begins, stats.unterminated
        )?;
        writeln!(w)?;
        Ok(())
    }

    fn write_category<W: Write>(&self, w: &mut W, category: Category) -> Result<(), ExportError> {
        let rows = self.report.rows(category);
        writeln!(w, "## {}", category.title())?;
        writeln!(w)?;

        if rows.is_empty() {
            writeln!(w, "_No matched spans._")?;
            writeln!(w)?;
            return Ok(());
        }

        let shown = &rows[..rows.len().min(self.top_rows)];
        writeln!(w, "Top {} by average execution time (ms):", shown.len())?;
        writeln!(w)?;
        write_chart(w, shown)?;
        writeln!(w)?;

        writeln!(
            w,
            "| # | Name | Resource | Avg (ms) | Count | Total (ms) | Min (ms) | Max (ms) | Freq (/s) | Spikes | Share |"
        )?;
        writeln!(w, "|---|---|---|---:|---:|---:|---:|---:|---:|---:|---:|")?;
        for (idx, row) in shown.iter().enumerate() {
            writeln!(
                w,
                "| {} | `{}` | {} | {:.3} | {} | {:.2} | {:.3} | {:.3} | {:.1} | {} | {:.1}% |",
                idx + 1,
                escape_cell(&row.name),
                escape_cell(&row.resource),
                row.avg_ms,
                row.count,
                row.total_ms,
                row.min_ms,
                row.max_ms,
                row.frequency_per_sec,
                row.spike_count,
                self.report.percent_of_total(row.total_ms),
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn write_resources<W: Write>(&self, w: &mut W) -> Result<(), ExportError> {
        writeln!(w, "## Top Resources by Total CPU Time")?;
        writeln!(w)?;
        if self.report.resources.is_empty() {
            writeln!(w, "_No matched spans._")?;
        }
        for resource in self.report.resources.iter().take(self.top_resources) {
            writeln!(w, "- {}: {:.2} ms total", resource.resource, resource.total_ms)?;
        }
        Ok(())
    }
}

fn write_chart<W: Write>(w: &mut W, rows: &[SummaryRow]) -> Result<(), ExportError> {
    let max = rows.iter().map(|r| r.avg_ms).fold(0.0_f64, f64::max);
    writeln!(w, "```text")?;
    for row in rows {
        writeln!(
            w,
            "{:<width$} {} {:.3}",
            truncate_label(&row.name, MAX_LABEL_CHARS),
            text_bar(row.avg_ms, max, CHART_WIDTH),
            row.avg_ms,
            width = MAX_LABEL_CHARS + 3,
        )?;
    }
    writeln!(w, "```")?;
    Ok(())
}

/// Pipes would split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
