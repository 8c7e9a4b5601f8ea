// File: ./src/state.rs
//! Host-owned calendar selection: reference date, zoom level and filters.
//!
//! The core functions take these as plain arguments. `CalendarState` just
//! keeps them together and knows how to step through time.
use crate::aggregate::{EventFilter, filtered_events_in_window};
use crate::config::Config;
use crate::model::CalendarEvent;
use crate::window::{CalendarWindow, Granularity, shift, window};
use chrono::{NaiveDate, Weekday};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub reference: NaiveDate,
    pub granularity: Granularity,
    pub week_start: Weekday,
    pub filter: EventFilter,
}

/// Everything a renderer needs for one screen of calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub window: CalendarWindow,
    pub cells: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl CalendarView {
    pub fn events_on(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.cells.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_events(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}

impl CalendarState {
    pub fn new(reference: NaiveDate, granularity: Granularity) -> Self {
        Self {
            reference,
            granularity,
            week_start: Weekday::Sun,
            filter: EventFilter::default(),
        }
    }

    pub fn from_config(reference: NaiveDate, config: &Config) -> Self {
        Self {
            reference,
            granularity: config.default_granularity,
            week_start: config.week_start,
            filter: config.filter.clone(),
        }
    }

    pub fn next(&mut self) {
        self.reference = shift(self.reference, self.granularity, 1);
    }

    pub fn previous(&mut self) {
        self.reference = shift(self.reference, self.granularity, -1);
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.reference = date;
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    pub fn set_filter(&mut self, filter: EventFilter) {
        self.filter = filter;
    }

    pub fn window(&self) -> CalendarWindow {
        window(self.reference, self.granularity, self.week_start)
    }

    pub fn render(&self, events: &[CalendarEvent]) -> CalendarView {
        let window = self.window();
        let cells = filtered_events_in_window(&window.dates(), events, &self.filter);
        CalendarView { window, cells }
    }
}
