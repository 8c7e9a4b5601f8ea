// File: ./src/dashboard.rs
//! Dashboard summaries built from the unified stream: what's coming up,
//! the next departure with its countdown, and the current alert list.
use crate::alert::{Alert, evaluate_with};
use crate::config::Config;
use crate::countdown::Countdown;
use crate::model::{CalendarEvent, SourceCollections};
use crate::temporal::combine;
use chrono::{Days, NaiveDateTime};

/// Subtypes that count as a departure for the "next trip" countdown.
const DEPARTURE_SUBTYPES: [&str; 2] = ["Flight", "Train"];

/// Events from today through `horizon_days` ahead, in (date, time) order.
///
/// Timed events of today that already started are skipped. Multi-day events
/// that began earlier but are still running are kept, anchored on their start.
pub fn upcoming(
    events: &[CalendarEvent],
    now: NaiveDateTime,
    horizon_days: u32,
    limit: usize,
) -> Vec<CalendarEvent> {
    let today = now.date();
    let horizon = today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(today);

    let mut list: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.last_day() >= today && e.date <= horizon)
        .filter(|e| {
            if e.date != today || e.is_multi_day() {
                return true;
            }
            match e.time_of_day.as_deref().map(|t| combine(e.date, t)) {
                Some(Ok(start)) => start >= now,
                // Untimed or unparseable: keep, it's still "today".
                _ => true,
            }
        })
        .collect();

    list.sort_by(|a, b| (a.date, a.sort_time()).cmp(&(b.date, b.sort_time())));
    list.into_iter().take(limit).cloned().collect()
}

/// The earliest flight or train still ahead of `now`.
pub fn next_departure(
    events: &[CalendarEvent],
    now: NaiveDateTime,
) -> Option<(CalendarEvent, NaiveDateTime)> {
    events
        .iter()
        .filter(|e| DEPARTURE_SUBTYPES.iter().any(|s| e.is_subtype(s)))
        .filter_map(|e| {
            let at = combine(e.date, e.time_of_day.as_deref()?).ok()?;
            (at >= now).then_some((e, at))
        })
        .min_by_key(|(_, at)| *at)
        .map(|(e, at)| (e.clone(), at))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDeparture {
    pub event: CalendarEvent,
    pub departs_at: NaiveDateTime,
    pub countdown: Countdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub generated_at: NaiveDateTime,
    pub upcoming: Vec<CalendarEvent>,
    pub alerts: Vec<Alert>,
    pub next_departure: Option<NextDeparture>,
    pub open_tasks: usize,
}

impl Dashboard {
    pub fn build(sources: &SourceCollections, now: NaiveDateTime, config: &Config) -> Self {
        let events = sources.normalize();
        let alerts = evaluate_with(&events, now, &config.alert_settings());

        let next_departure = next_departure(&events, now).and_then(|(event, departs_at)| {
            Countdown::between(departs_at, now).map(|countdown| NextDeparture {
                event,
                departs_at,
                countdown,
            })
        });

        Self {
            generated_at: now,
            upcoming: upcoming(
                &events,
                now,
                config.upcoming_horizon_days,
                config.upcoming_limit,
            ),
            alerts,
            next_departure,
            open_tasks: sources.tasks.iter().filter(|t| !t.completed).count(),
        }
    }
}
