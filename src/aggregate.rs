// File: ./src/aggregate.rs
//! Per-day selection and ordering of calendar events.
//!
//! Within a day, events are ordered by `time_of_day` compared as a string,
//! untimed events first. The sort is stable, so ties keep normalization order.
//! Lists are never truncated here; "+N more" is a rendering decision.
use crate::model::{CalendarEvent, SourceKind};
use crate::window::days_inclusive;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Active calendar filters. An empty filter lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Source kinds to show. `None` shows all kinds.
    #[serde(default)]
    pub kinds: Option<BTreeSet<SourceKind>>,
    /// Traveler to show. Events without an assignee are hidden while this is set.
    #[serde(default)]
    pub assignee: Option<String>,
}

impl EventFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_kinds<I: IntoIterator<Item = SourceKind>>(mut self, kinds: I) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_none() && self.assignee.is_none()
    }

    pub fn matches(&self, event: &CalendarEvent) -> bool {
        if let Some(kinds) = &self.kinds
            && !kinds.contains(&event.source_kind)
        {
            return false;
        }
        if let Some(wanted) = &self.assignee {
            return event
                .assignee
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(wanted));
        }
        true
    }

    pub fn apply(&self, events: &[CalendarEvent]) -> Vec<CalendarEvent> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// True when `date` is the event's anchor date or inside its span.
pub fn occurs_on(event: &CalendarEvent, date: NaiveDate) -> bool {
    event.occurs_on(date)
}

fn sort_for_day(list: &mut [CalendarEvent]) {
    // `sort_by` is stable: equal or missing times keep their input order.
    list.sort_by(|a, b| a.sort_time().cmp(b.sort_time()));
}

/// All events occurring on `date`, in display order.
pub fn events_on_date(date: NaiveDate, events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let mut list: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| occurs_on(e, date))
        .cloned()
        .collect();
    sort_for_day(&mut list);
    list
}

/// Buckets events into each requested date. Every date gets an entry, empty or not.
pub fn events_in_window(
    dates: &[NaiveDate],
    events: &[CalendarEvent],
) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<CalendarEvent>> =
        dates.iter().map(|d| (*d, Vec::new())).collect();

    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return buckets;
    };

    for event in events {
        let from = event.date.max(first);
        let to = event.last_day().min(last);
        if from > to {
            continue;
        }
        // Walk only the part of the span that overlaps the window.
        for day in days_inclusive(from, to) {
            if let Some(list) = buckets.get_mut(&day) {
                list.push(event.clone());
            }
        }
    }

    for list in buckets.values_mut() {
        sort_for_day(list);
    }
    buckets
}

/// Same as [`events_in_window`], with the filter applied before bucketing
/// so per-day counts only reflect visible events.
pub fn filtered_events_in_window(
    dates: &[NaiveDate],
    events: &[CalendarEvent],
    filter: &EventFilter,
) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    if filter.is_empty() {
        return events_in_window(dates, events);
    }
    events_in_window(dates, &filter.apply(events))
}
