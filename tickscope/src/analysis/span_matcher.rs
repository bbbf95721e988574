//! Begin/end pairing of trace records into span durations.
//!
//! A single forward scan keyed by event name:
//!
//! ```text
//! Begin(name, ts) ──► pending[name] = ts          (overwrites an earlier begin)
//! End(name, ts)   ──► pending.remove(name)
//!                       ├─ Some(begin) → durations[category][name].push(ts - begin)
//!                       └─ None        → orphan end, ignored
//! ```
//!
//! Records without a name or timestamp, unclassified names and phases other
//! than begin/end never touch the pending map. Spans still pending when the
//! scan ends are dropped.

use crate::classification::{classify, extract_resource};
use crate::domain::{Category, Elapsed, Phase, Timestamp};
use crate::trace_data::RawEvent;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// A completed span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanDuration<'a> {
    pub name: &'a str,
    pub elapsed: Elapsed,
    pub category: Category,
    pub resource: &'a str,
}

/// All durations recorded for one event name, in pairing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDurations {
    pub name: String,
    pub elapsed: Vec<Elapsed>,
}

/// Per-name duration lists for one category.
///
/// Names keep first-pairing order so that later stable sorts break ties
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct DurationTable {
    index: HashMap<String, usize>,
    entries: Vec<NameDurations>,
}

impl DurationTable {
    /// Append one duration to `name`'s list, creating it on first use.
    pub fn push(&mut self, name: &str, elapsed: Elapsed) {
        if let Some(&idx) = self.index.get(name) {
            self.entries[idx].elapsed.push(elapsed);
            return;
        }
        self.index.insert(name.to_owned(), self.entries.len());
        self.entries.push(NameDurations { name: name.to_owned(), elapsed: vec![elapsed] });
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Elapsed]> {
        self.index.get(name).map(|&idx| self.entries[idx].elapsed.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameDurations> {
        self.entries.iter()
    }

    /// Number of distinct names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of durations across all names
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.entries.iter().map(|e| e.elapsed.len()).sum()
    }
}

/// Counters describing what a matching pass dropped.
///
/// Purely diagnostic: they never influence which durations are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    /// Records scanned
    pub records: usize,
    /// Records missing a name or timestamp
    pub malformed: usize,
    /// Records whose name matched no category
    pub unclassified: usize,
    /// Begin/end pairs turned into durations
    pub matched: usize,
    /// End records with no pending begin
    pub orphan_ends: usize,
    /// Begin records overwritten by a later begin of the same name
    pub superseded_begins: usize,
    /// Begin records still pending when the scan ended
    pub unterminated: usize,
}

/// Output of a matching pass: one [`DurationTable`] per reported category.
#[derive(Debug, Clone, Default)]
pub struct MatchedSpans {
    pub ticks: DurationTable,
    pub ref_calls: DurationTable,
    pub events: DurationTable,
    pub stats: MatchStats,
}

impl MatchedSpans {
    /// Table for `category`; `None` for [`Category::Unclassified`].
    #[must_use]
    pub fn table(&self, category: Category) -> Option<&DurationTable> {
        match category {
            Category::Tick => Some(&self.ticks),
            Category::RefCall => Some(&self.ref_calls),
            Category::Event => Some(&self.events),
            Category::Unclassified => None,
        }
    }

    fn table_mut(&mut self, category: Category) -> Option<&mut DurationTable> {
        match category {
            Category::Tick => Some(&mut self.ticks),
            Category::RefCall => Some(&mut self.ref_calls),
            Category::Event => Some(&mut self.events),
            Category::Unclassified => None,
        }
    }

    /// Every matched duration with its category and resource attribution.
    pub fn durations(&self) -> impl Iterator<Item = SpanDuration<'_>> {
        Category::REPORTED.into_iter().flat_map(move |category| {
            self.table(category).into_iter().flat_map(DurationTable::iter).flat_map(
                move |entry| {
                    let resource = extract_resource(&entry.name);
                    entry.elapsed.iter().map(move |&elapsed| SpanDuration {
                        name: &entry.name,
                        elapsed,
                        category,
                        resource,
                    })
                },
            )
        })
    }

    /// Total number of matched spans across all categories
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.ticks.span_count() + self.ref_calls.span_count() + self.events.span_count()
    }
}

/// Incremental matcher state.
///
/// Holds at most one pending begin per name. Feed records in trace order with
/// [`SpanMatcher::record_event`], then call [`SpanMatcher::finish`].
#[derive(Debug, Default)]
pub struct SpanMatcher {
    pending: HashMap<String, Timestamp>,
    spans: MatchedSpans,
}

impl SpanMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one record.
    pub fn record_event(&mut self, event: &RawEvent) {
        self.spans.stats.records += 1;

        let (Some(name), Some(ts)) = (event.name.as_deref(), event.timestamp) else {
            self.spans.stats.malformed += 1;
            return;
        };

        let category = classify(name);
        if !category.is_reported() {
            self.spans.stats.unclassified += 1;
            return;
        }

        match event.phase {
            Phase::Begin => {
                if self.pending.insert(name.to_owned(), ts).is_some() {
                    self.spans.stats.superseded_begins += 1;
                }
            }
            Phase::End => {
                let Some(begin) = self.pending.remove(name) else {
                    self.spans.stats.orphan_ends += 1;
                    return;
                };
                if let Some(table) = self.spans.table_mut(category) {
                    table.push(name, ts.elapsed_since(begin));
                    self.spans.stats.matched += 1;
                }
            }
            Phase::Other => {}
        }
    }

    /// Drop any still-pending spans and return the matched durations.
    #[must_use]
    pub fn finish(mut self) -> MatchedSpans {
        self.spans.stats.unterminated = self.pending.len();
        let stats = &self.spans.stats;
        debug!(
            "span matching: {} records, {} matched, {} malformed, {} unclassified, {} orphan ends, {} superseded begins, {} unterminated",
            stats.records,
            stats.matched,
            stats.malformed,
            stats.unclassified,
            stats.orphan_ends,
            stats.superseded_begins,
            stats.unterminated,
        );
        self.spans
    }
}

/// Pair begin/end records in a single ordered pass.
#[must_use]
pub fn match_spans<'a>(events: impl IntoIterator<Item = &'a RawEvent>) -> MatchedSpans {
    let mut matcher = SpanMatcher::new();
    for event in events {
        matcher.record_event(event);
    }
    matcher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn other(name: &str, ts: i64) -> RawEvent {
        RawEvent { name: Some(name.to_string()), timestamp: Some(Timestamp(ts)), phase: Phase::Other }
    }

    #[test]
    fn test_pairs_begin_with_end() {
        let events = vec![
            RawEvent::begin("tick (a)", 100),
            RawEvent::end("tick (a)", 350),
            RawEvent::begin("tick (a)", 400),
            RawEvent::end("tick (a)", 1400),
        ];
        let spans = match_spans(&events);

        assert_eq!(spans.ticks.get("tick (a)"), Some(&[Elapsed(250), Elapsed(1000)][..]));
        assert_eq!(spans.span_count(), 2);
        assert_eq!(spans.stats.matched, 2);
    }

    #[test]
    fn test_routes_each_category_to_its_table() {
        let events = vec![
            RawEvent::begin("tick (a)", 0),
            RawEvent::begin("ref call@b/h", 0),
            RawEvent::begin("event:c", 0),
            RawEvent::end("event:c", 3),
            RawEvent::end("ref call@b/h", 2),
            RawEvent::end("tick (a)", 1),
        ];
        let spans = match_spans(&events);

        assert_eq!(spans.ticks.get("tick (a)"), Some(&[Elapsed(1)][..]));
        assert_eq!(spans.ref_calls.get("ref call@b/h"), Some(&[Elapsed(2)][..]));
        assert_eq!(spans.events.get("event:c"), Some(&[Elapsed(3)][..]));
        assert!(spans.table(Category::Unclassified).is_none());
    }

    #[test]
    fn test_orphan_end_is_ignored() {
        let events = vec![RawEvent::end("tick (a)", 10), RawEvent::begin("tick (a)", 20)];
        let spans = match_spans(&events);

        assert!(spans.ticks.is_empty());
        assert_eq!(spans.stats.orphan_ends, 1);
        assert_eq!(spans.stats.unterminated, 1);
    }

    #[test]
    fn test_second_begin_supersedes_first() {
        let events = vec![
            RawEvent::begin("event:x", 0),
            RawEvent::begin("event:x", 70),
            RawEvent::end("event:x", 100),
        ];
        let spans = match_spans(&events);

        assert_eq!(spans.events.get("event:x"), Some(&[Elapsed(30)][..]));
        assert_eq!(spans.stats.superseded_begins, 1);
    }

    #[test]
    fn test_end_consumes_pending_begin() {
        let events = vec![
            RawEvent::begin("event:x", 0),
            RawEvent::end("event:x", 10),
            RawEvent::end("event:x", 20),
        ];
        let spans = match_spans(&events);

        assert_eq!(spans.events.get("event:x"), Some(&[Elapsed(10)][..]));
        assert_eq!(spans.stats.orphan_ends, 1);
    }

    #[test]
    fn test_negative_elapsed_is_kept() {
        let events = vec![RawEvent::begin("tick (a)", 500), RawEvent::end("tick (a)", 200)];
        let spans = match_spans(&events);

        assert_eq!(spans.ticks.get("tick (a)"), Some(&[Elapsed(-300)][..]));
    }

    #[test]
    fn test_unclassified_names_never_pair() {
        let events = vec![RawEvent::begin("randomstring", 0), RawEvent::end("randomstring", 10)];
        let spans = match_spans(&events);

        assert_eq!(spans.span_count(), 0);
        assert_eq!(spans.stats.unclassified, 2);
        assert_eq!(spans.stats.unterminated, 0);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let events = vec![
            RawEvent::begin("tick (a)", 0),
            RawEvent { name: Some("tick (a)".to_string()), timestamp: None, phase: Phase::End },
            RawEvent { name: None, timestamp: Some(Timestamp(5)), phase: Phase::End },
            RawEvent::end("tick (a)", 40),
        ];
        let spans = match_spans(&events);

        assert_eq!(spans.ticks.get("tick (a)"), Some(&[Elapsed(40)][..]));
        assert_eq!(spans.stats.malformed, 2);
    }

    #[test]
    fn test_other_phases_do_not_disturb_pending() {
        let events = vec![
            RawEvent::begin("tick (a)", 0),
            other("tick (a)", 5),
            RawEvent::end("tick (a)", 9),
        ];
        let spans = match_spans(&events);

        assert_eq!(spans.ticks.get("tick (a)"), Some(&[Elapsed(9)][..]));
    }

    #[test]
    fn test_names_keep_first_pairing_order() {
        let events = vec![
            RawEvent::begin("tick (b)", 0),
            RawEvent::begin("tick (a)", 0),
            RawEvent::end("tick (b)", 1),
            RawEvent::end("tick (a)", 2),
        ];
        let spans = match_spans(&events);
        let names: Vec<&str> = spans.ticks.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["tick (b)", "tick (a)"]);
    }

    #[test]
    fn test_durations_carry_resource_attribution() {
        let events = vec![
            RawEvent::begin("ref call@res/fn", 0),
            RawEvent::end("ref call@res/fn", 8),
        ];
        let spans = match_spans(&events);
        let all: Vec<SpanDuration<'_>> = spans.durations().collect();

        assert_eq!(
            all,
            vec![SpanDuration {
                name: "ref call@res/fn",
                elapsed: Elapsed(8),
                category: Category::RefCall,
                resource: "res",
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        let spans = match_spans(&Vec::<RawEvent>::new());
        assert_eq!(spans.span_count(), 0);
        assert_eq!(spans.stats, MatchStats::default());
    }
}
