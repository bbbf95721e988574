//! # tickscope - Game-Server Profiler Trace Analyzer
//!
//! tickscope reads a trace-event log recorded by a game-server runtime's
//! profiler, pairs begin/end events into durations, and ranks the costliest
//! recurring operations per event name and per owning resource.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  trace_data  │──▶│ span_matcher │──▶│  aggregator  │──▶│ ProfileReport│
//! │ (JSON load)  │   │ (begin/end)  │   │ (statistics) │   │              │
//! └──────────────┘   └──────┬───────┘   └──────────────┘   └──────┬───────┘
//!                           │                                     │
//!                           ▼                                     ▼
//!                    ┌──────────────┐          ┌─────────┬────────┬────────┐
//!                    │classification│          │ display │ export │  tui   │
//!                    │ (category +  │          │(console)│(md/json│(ratatui│
//!                    │  resource)   │          │         │  files)│  view) │
//!                    └──────────────┘          └─────────┴────────┴────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`trace_data`]: Load a whole trace into memory (bare array or
//!   `traceEvents` container)
//! - [`classification`]: Map event names to a category and owning resource
//! - [`analysis`]: Span matching, per-name summaries, resource ranking
//! - [`display`]: Console summary and shared text formatting
//! - [`export`]: Markdown report and JSON export
//! - [`tui`]: Interactive terminal view of a finished report
//! - [`cli`]: Command-line argument parsing
//! - [`domain`]: Core domain types (Timestamp, Elapsed, Phase, Category) and errors
//!
//! ## Event Names
//!
//! | Prefix     | Category        | Resource example                     |
//! |------------|-----------------|--------------------------------------|
//! | `tick (`   | Tick handler    | `tick (myResource)` → `myResource`   |
//! | `ref call` | Ref call        | `ref call@myResource/fn` → `myResource` |
//! | `event:`   | Custom event    | `event:explosionEvent` → `event`     |
//!
//! Names matching none of the prefixes are ignored entirely.
//!
//! ## Typical Usage
//!
//! ```bash
//! # Console summary of ./profile.json
//! tickscope
//!
//! # Write the optimization report and a JSON export
//! tickscope capture.json --report report.md --export report.json
//!
//! # Browse the rankings interactively
//! tickscope capture.json --tui
//! ```

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod display;
pub mod domain;
pub mod export;
pub mod trace_data;
pub mod tui;
