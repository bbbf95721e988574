//! # tickscope - Main Entry Point
//!
//! Loads a profiler trace, aggregates it, then hands the report to the
//! requested renderers:
//! - console summary (unless `--quiet`)
//! - Markdown document (`--report FILE`)
//! - JSON export (`--export FILE`)
//! - interactive TUI (`--tui`)

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufWriter;

use tickscope::analysis::ProfileReport;
use tickscope::cli::Args;
use tickscope::display::print_summary;
use tickscope::export::{JsonReportExporter, MarkdownReportExporter};
use tickscope::trace_data::TraceData;
use tickscope::tui::App;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
                _ => EXIT_USAGE,
            };
            e.print().ok();
            std::process::exit(code);
        }
    };

    std::process::exit(match run(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run(args: Args) -> Result<()> {
    let data = TraceData::from_file(&args.trace)
        .with_context(|| format!("Failed to load trace {}", args.trace.display()))?;

    let report = ProfileReport::build(&data.events, &args.analysis_config());
    let mut artifacts = Vec::new();

    if let Some(ref path) = args.report {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        MarkdownReportExporter::new(&report)
            .with_top_rows(args.top)
            .with_top_resources(args.resources)
            .export(BufWriter::new(file))
            .context("Failed to write report")?;
        info!("Wrote report to {}", path.display());
        artifacts.push(path.clone());
    }

    if let Some(ref path) = args.export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create export file {}", path.display()))?;
        JsonReportExporter::new(&report)
            .export(BufWriter::new(file))
            .context("Failed to export report")?;
        info!("Exported report to {}", path.display());
        artifacts.push(path.clone());
    }

    if !args.quiet {
        print_summary(std::io::stdout().lock(), &report, &artifacts)
            .context("Failed to print summary")?;
    }

    if args.tui {
        App::new(report, args.top).run().context("Terminal UI failed")?;
    }

    Ok(())
}
