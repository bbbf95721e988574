//! Console output and shared text formatting for reports

// Bar widths are derived from f64 ratios
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use crate::analysis::ProfileReport;
use std::io::{self, Write};
use std::path::PathBuf;

/// Longest label shown in charts before truncation.
pub const MAX_LABEL_CHARS: usize = 40;

/// Resources listed in the console summary.
pub const CONSOLE_TOP_RESOURCES: usize = 5;

/// Shorten `name` to `max_chars` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    match name.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_owned(),
    }
}

/// Horizontal bar of `width` cells scaled so that `max` fills it.
#[must_use]
pub fn text_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 && value > 0.0 {
        ((value / max) * width as f64).round().min(width as f64) as usize
    } else {
        0
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print the end-of-run summary: written artifacts and the top resources.
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn print_summary<W: Write>(
    mut out: W,
    report: &ProfileReport,
    artifacts: &[PathBuf],
) -> io::Result<()> {
    writeln!(
        out,
        "Analysis complete: {} spans ({} tick handlers, {} ref calls, {} events)",
        report.match_stats.matched,
        report.ticks.len(),
        report.ref_calls.len(),
        report.events.len(),
    )?;
    for path in artifacts {
        writeln!(out, "saved: {}", path.display())?;
    }

    writeln!(out, "\nTop {CONSOLE_TOP_RESOURCES} Resource Consumers:")?;
    if report.resources.is_empty() {
        writeln!(out, "- (no matched spans)")?;
    }
    for resource in report.resources.iter().take(CONSOLE_TOP_RESOURCES) {
        writeln!(out, "- {}: {:.2} ms total CPU time", resource.resource, resource.total_ms)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisConfig;
    use crate::trace_data::RawEvent;

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 40), "short");
        let long = "x".repeat(45);
        assert_eq!(truncate_label(&long, 40), format!("{}...", "x".repeat(40)));
        assert_eq!(truncate_label(&"y".repeat(40), 40), "y".repeat(40));
        // Multi-byte characters are cut on char boundaries
        assert_eq!(truncate_label("ééé", 2), "éé...");
    }

    #[test]
    fn test_text_bar() {
        assert_eq!(text_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(text_bar(10.0, 10.0, 4), "████");
        assert_eq!(text_bar(1.0, 0.0, 3), "░░░");
        assert_eq!(text_bar(-1.0, 10.0, 2), "░░");
    }

    #[test]
    fn test_print_summary_lists_top_resources() {
        let events: Vec<RawEvent> = (0..7)
            .flat_map(|i| {
                let name = format!("tick (res{i})");
                vec![RawEvent::begin(name.clone(), 0), RawEvent::end(name, (i + 1) * 1000)]
            })
            .collect();
        let report = ProfileReport::build(&events, &AnalysisConfig::default());

        let mut out = Vec::new();
        print_summary(&mut out, &report, &[PathBuf::from("report.md")]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("saved: report.md"));
        assert!(text.contains("- res6: 7.00 ms total CPU time"));
        assert!(text.contains("- res2: 3.00 ms total CPU time"));
        assert!(!text.contains("res1:"));
    }
}
