//! Event name classification and resource attribution.
//!
//! Game-server profiler event names encode both what kind of work was timed
//! and which resource (script/module) owns it. Two pure functions recover
//! that information:
//!
//! 1. [`classify`] - first-match prefix rules to a [`Category`]
//!    - `tick (` → [`Category::Tick`]
//!    - `ref call` → [`Category::RefCall`]
//!    - `event:` → [`Category::Event`]
//!
//! 2. [`extract_resource`] - ordered heuristics to an owning resource label
//!    - text after the last ` (` (one trailing `)` removed)
//!    - text after the last `@`, up to the first `/`
//!    - text before the first `:`
//!
//! Every call site that needs a resource label goes through
//! [`extract_resource`], so aggregation and summary rows always agree.

use crate::domain::Category;

// =============================================================================
// CLASSIFICATION TABLES
// =============================================================================

/// Name prefixes in evaluation order. First match wins.
const CATEGORY_PREFIXES: &[(&str, Category)] = &[
    ("tick (", Category::Tick),
    ("ref call", Category::RefCall),
    ("event:", Category::Event),
];

/// Separator introducing a parenthesised resource, e.g. `tick (myResource)`.
const PAREN_SEPARATOR: &str = " (";

/// Classify an event name.
///
/// # Examples
///
/// ```
/// use tickscope::classification::classify;
/// use tickscope::domain::Category;
///
/// assert_eq!(classify("tick (myscript)"), Category::Tick);
/// assert_eq!(classify("ref call @foo"), Category::RefCall);
/// assert_eq!(classify("event:explosionEvent"), Category::Event);
/// assert_eq!(classify("randomstring"), Category::Unclassified);
/// ```
#[must_use]
pub fn classify(name: &str) -> Category {
    CATEGORY_PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map_or(Category::Unclassified, |&(_, category)| category)
}

/// Derive the owning resource label from an event name.
///
/// # Examples
///
/// ```
/// use tickscope::classification::extract_resource;
///
/// assert_eq!(extract_resource("tick (myscript)"), "myscript");
/// assert_eq!(extract_resource("ref call@myscript/onTick"), "myscript");
/// assert_eq!(extract_resource("event:explosionEvent"), "event");
/// ```
#[must_use]
pub fn extract_resource(name: &str) -> &str {
    if let Some(idx) = name.rfind(PAREN_SEPARATOR) {
        let tail = &name[idx + PAREN_SEPARATOR.len()..];
        return tail.strip_suffix(')').unwrap_or(tail);
    }

    if let Some(idx) = name.rfind('@') {
        let tail = &name[idx + 1..];
        return tail.split('/').next().unwrap_or(tail);
    }

    name.split(':').next().unwrap_or(name)
}
