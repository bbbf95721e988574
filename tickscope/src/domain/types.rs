//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep raw trace timestamps apart from elapsed
//! durations, and make function signatures more expressive.

// Microsecond values are converted to f64 for display and aggregation
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use std::fmt;

/// Timestamp in microseconds
///
/// Monotonic clock value as written by the game-server profiler (`ts`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Signed distance from `begin` to `self`.
    ///
    /// Never clamped: an end stamped before its begin yields a negative value.
    #[must_use]
    pub fn elapsed_since(self, begin: Timestamp) -> Elapsed {
        Elapsed(self.0.wrapping_sub(begin.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

/// Elapsed time of a matched span, in microseconds (signed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Elapsed(pub i64);

impl Elapsed {
    /// Convert to milliseconds (f64)
    #[must_use]
    pub fn as_millis(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Convert to seconds (f64)
    #[must_use]
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.as_millis();
        if ms.abs() >= 1000.0 {
            write!(f, "{:.2}s", self.as_seconds())
        } else {
            write!(f, "{ms:.2}ms")
        }
    }
}

/// Trace record phase (`ph`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `"B"`
    Begin,
    /// `"E"`
    End,
    /// Anything else, including an absent `ph`
    Other,
}

impl Phase {
    /// Map a raw `ph` discriminator to a phase.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("B") => Phase::Begin,
            Some("E") => Phase::End,
            _ => Phase::Other,
        }
    }
}

/// Category of a timed operation, derived from its event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Periodic tick handler (`tick (...)`)
    Tick,
    /// Cross-boundary function invocation (`ref call...`)
    RefCall,
    /// Custom event handler (`event:...`)
    Event,
    /// Anything else; dropped from all processing
    Unclassified,
}

impl Category {
    /// The three categories that carry durations, in report order.
    pub const REPORTED: [Category; 3] = [Category::Tick, Category::RefCall, Category::Event];

    /// Stable machine-readable key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Tick => "tick",
            Category::RefCall => "ref_call",
            Category::Event => "event",
            Category::Unclassified => "unclassified",
        }
    }

    /// Human-readable section title used by the renderers.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Category::Tick => "Tick Handlers",
            Category::RefCall => "Ref Calls",
            Category::Event => "Custom Events",
            Category::Unclassified => "Unclassified",
        }
    }

    #[must_use]
    pub const fn is_reported(self) -> bool {
        !matches!(self, Category::Unclassified)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
