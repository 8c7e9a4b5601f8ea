// File: ./src/alert.rs
//! Advisory alerts derived from the unified event stream.
//!
//! Two kinds exist:
//! - Pre-departure reminders for flights whose departure falls inside a
//!   lead-time band (international and domestic bands differ).
//! - Tight-transition warnings for back-to-back items on the current day.
//!
//! Evaluation is a pure function of `(events, now)`. Nothing is remembered
//! between passes: the host re-polls and a reminder simply stops appearing once
//! its band is left. A malformed time on one event only removes that event's
//! contribution.
use crate::error::{AgendaError, AgendaResult};
use crate::model::{CalendarEvent, EventKey, SourceKind};
use crate::temporal::{combine, parse_time_of_day};
use chrono::{Days, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum AlertKind {
    PreDepartureReminder,
    TightTransition,
}

/// Declaration order is display order: `High` sorts first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    /// "HH:MM" the alert is pegged to.
    pub anchor_time: String,
    pub related: Vec<EventKey>,
}

/// Half-open band of minutes remaining: `(lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBand {
    pub lower: i64,
    pub upper: i64,
}

impl MinuteBand {
    pub const fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, minutes: i64) -> bool {
        minutes > self.lower && minutes <= self.upper
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub international_band: MinuteBand,
    pub domestic_band: MinuteBand,
    /// Case-insensitive title substring that marks a flight as international.
    pub international_marker: String,
    /// Gaps strictly below this many minutes are flagged.
    pub tight_transition_minutes: i64,
    /// Assumed length of an item that has no explicit end time.
    pub default_duration_minutes: i64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            international_band: MinuteBand::new(120, 180),
            domestic_band: MinuteBand::new(90, 120),
            international_marker: "international".to_string(),
            tight_transition_minutes: 60,
            default_duration_minutes: 60,
        }
    }
}

impl AlertSettings {
    pub fn is_international(&self, event: &CalendarEvent) -> bool {
        let marker = self.international_marker.to_lowercase();
        !marker.is_empty() && event.title.to_lowercase().contains(&marker)
    }
}

/// Evaluates all alerts with the default thresholds.
pub fn evaluate(events: &[CalendarEvent], now: NaiveDateTime) -> Vec<Alert> {
    evaluate_with(events, now, &AlertSettings::default())
}

pub fn evaluate_with(
    events: &[CalendarEvent],
    now: NaiveDateTime,
    settings: &AlertSettings,
) -> Vec<Alert> {
    let mut alerts = pre_departure_reminders(events, now, settings);
    alerts.extend(tight_transitions(events, now, settings));

    // Stable: equal (severity, anchor) pairs keep generation order.
    alerts.sort_by(|a, b| match a.severity.cmp(&b.severity) {
        Ordering::Equal => a.anchor_time.cmp(&b.anchor_time),
        ord => ord,
    });
    alerts
}

/// Formats a minute count as "1h 40m" / "45m".
pub fn format_hours_minutes(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

// --- PRE-DEPARTURE ---

pub fn pre_departure_reminders(
    events: &[CalendarEvent],
    now: NaiveDateTime,
    settings: &AlertSettings,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for event in events.iter().filter(|e| e.is_subtype("Flight")) {
        let Some(time) = event.time_of_day.as_deref() else {
            continue;
        };
        let departure = match combine(event.date, time) {
            Ok(dt) => dt,
            Err(e) => {
                log::debug!("Skipping departure reminder for {}: {}", event.key(), e);
                continue;
            }
        };

        let remaining = (departure - now).num_minutes();
        let international = settings.is_international(event);
        let band = if international {
            settings.international_band
        } else {
            settings.domestic_band
        };
        if !band.contains(remaining) {
            continue;
        }

        let scope = if international { "International" } else { "Domestic" };
        alerts.push(Alert {
            kind: AlertKind::PreDepartureReminder,
            severity: Severity::High,
            message: format!(
                "{} flight \"{}\" departs in {}. Time to leave for the airport.",
                scope,
                event.title,
                format_hours_minutes(remaining)
            ),
            anchor_time: departure.format("%H:%M").to_string(),
            related: vec![event.key()],
        });
    }

    alerts
}

// --- TIGHT TRANSITIONS ---

struct Slot<'a> {
    event: &'a CalendarEvent,
    start: NaiveDateTime,
}

impl Slot<'_> {
    fn end(&self, settings: &AlertSettings) -> AgendaResult<NaiveDateTime> {
        let out_of_range = || AgendaError::OutOfRange(format!("end of {}", self.event.key()));
        match self.event.end_time.as_deref() {
            Some(raw) => {
                let end = self.start.date().and_time(parse_time_of_day(raw)?);
                // An end before the start means the item runs past midnight.
                if end < self.start {
                    end.checked_add_days(Days::new(1)).ok_or_else(out_of_range)
                } else {
                    Ok(end)
                }
            }
            None => Duration::try_minutes(settings.default_duration_minutes)
                .and_then(|d| self.start.checked_add_signed(d))
                .ok_or_else(out_of_range),
        }
    }
}

pub fn tight_transitions(
    events: &[CalendarEvent],
    now: NaiveDateTime,
    settings: &AlertSettings,
) -> Vec<Alert> {
    let today = now.date();

    let mut slots: Vec<Slot> = events
        .iter()
        .filter(|e| matches!(e.source_kind, SourceKind::Appointment | SourceKind::Itinerary))
        .filter(|e| e.date == today)
        .filter_map(|event| {
            let raw = event.time_of_day.as_deref()?;
            match combine(today, raw) {
                Ok(start) => Some(Slot { event, start }),
                Err(e) => {
                    log::debug!("Leaving {} out of transition check: {}", event.key(), e);
                    None
                }
            }
        })
        .collect();
    slots.sort_by_key(|s| s.start);

    let mut alerts = Vec::new();
    for pair in slots.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let a_end = match a.end(settings) {
            Ok(end) => end,
            Err(e) => {
                log::debug!("Bad end time on {}: {}", a.event.key(), e);
                continue;
            }
        };

        let gap = b.start.signed_duration_since(a_end).num_minutes();
        if gap > 0 && gap < settings.tight_transition_minutes {
            alerts.push(Alert {
                kind: AlertKind::TightTransition,
                severity: Severity::Medium,
                message: format!(
                    "Only {} minutes between \"{}\" and \"{}\".",
                    gap, a.event.title, b.event.title
                ),
                anchor_time: b.start.format("%H:%M").to_string(),
                related: vec![a.event.key(), b.event.key()],
            });
        }
    }

    alerts
}
