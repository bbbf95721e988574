//! TUI color theme
//!
//! HUD-inspired color scheme for the terminal interface

use ratatui::style::Color;

// HUD color scheme
pub const HUD_GREEN: Color = Color::Rgb(0, 255, 0);
pub const CRITICAL_RED: Color = Color::Rgb(255, 0, 0);
pub const CAUTION_AMBER: Color = Color::Rgb(255, 191, 0);
pub const INFO_DIM: Color = Color::Rgb(0, 180, 0);
pub const BACKGROUND: Color = Color::Rgb(0, 20, 0);

/// Get severity color based on share of total CPU time
/// - Above 40%: Critical (Red)
/// - Above 20%: Caution (Amber)
/// - Otherwise: Normal (Green)
#[must_use]
pub fn severity_color(percentage: f64) -> Color {
    if percentage > 40.0 {
        CRITICAL_RED
    } else if percentage > 20.0 {
        CAUTION_AMBER
    } else {
        HUD_GREEN
    }
}

/// Color for a row's spike count: any spike is a caution
#[must_use]
pub fn spike_color(spikes: usize) -> Color {
    if spikes == 0 {
        INFO_DIM
    } else {
        CAUTION_AMBER
    }
}
