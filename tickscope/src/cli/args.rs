//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::analysis::{AnalysisConfig, DEFAULT_SPIKE_THRESHOLD_MS};
use crate::export::{DEFAULT_TOP_RESOURCES, DEFAULT_TOP_ROWS};

#[derive(Parser, Debug)]
#[command(
    name = "tickscope",
    version,
    about = "Rank the costliest tick handlers, ref calls and events in a game-server profiler trace",
    after_help = "\
EXAMPLES:
    tickscope                                  Analyze ./profile.json
    tickscope capture.json --report report.md  Write the optimization report
    tickscope capture.json --export out.json   Export all rankings as JSON
    tickscope capture.json --tui               Browse the rankings interactively"
)]
pub struct Args {
    /// Profiler trace (JSON array of events or a traceEvents object)
    #[arg(value_name = "TRACE", default_value = "profile.json")]
    pub trace: PathBuf,

    /// Durations above this many milliseconds count as spikes
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_SPIKE_THRESHOLD_MS)]
    pub spike_threshold: f64,

    /// Rows per category in charts and the report
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_ROWS)]
    pub top: usize,

    /// Resources listed in the report
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_RESOURCES)]
    pub resources: usize,

    /// Write the Markdown optimization report to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Export the full analysis as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Browse the results in an interactive terminal UI
    #[arg(long)]
    pub tui: bool,

    /// Suppress the console summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig { spike_threshold_ms: self.spike_threshold }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tickscope"]).unwrap();
        assert_eq!(args.trace, PathBuf::from("profile.json"));
        assert_eq!(args.spike_threshold, 5.0);
        assert_eq!(args.top, 10);
        assert_eq!(args.resources, 15);
        assert!(args.report.is_none());
        assert!(args.export.is_none());
        assert!(!args.tui);
        assert_eq!(args.analysis_config(), AnalysisConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "tickscope",
            "capture.json",
            "--spike-threshold",
            "2.5",
            "--top",
            "20",
            "--report",
            "out.md",
            "--export",
            "out.json",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.trace, PathBuf::from("capture.json"));
        assert_eq!(args.analysis_config().spike_threshold_ms, 2.5);
        assert_eq!(args.top, 20);
        assert_eq!(args.report, Some(PathBuf::from("out.md")));
        assert_eq!(args.export, Some(PathBuf::from("out.json")));
        assert!(args.quiet);
    }

    #[test]
    fn test_rejects_non_numeric_threshold() {
        assert!(Args::try_parse_from(["tickscope", "--spike-threshold", "lots"]).is_err());
    }
}
