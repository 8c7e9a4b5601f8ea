// File: ./src/normalize.rs
//! Projects the three source collections onto one `CalendarEvent` stream.
//!
//! Output order is itinerary entries, then appointments, then tasks, each in
//! input order. Downstream sorting relies on this order for ties.
//!
//! Records whose anchor date can't be parsed are dropped with a debug log line.
//! Nothing here returns an error: a bad record must never cost the rest of the batch.
use crate::model::{
    Appointment, AppointmentStatus, CalendarEvent, Confirmation, ItineraryEntry,
    SourceCollections, SourceKind, TaskRecord,
};
use crate::temporal::{non_blank, parse_date};
use chrono::NaiveDate;

const DEFAULT_APPOINTMENT_SUBTYPE: &str = "Meeting";
const DEFAULT_TASK_PRIORITY: &str = "Medium";

pub fn normalize(
    itinerary: &[ItineraryEntry],
    appointments: &[Appointment],
    tasks: &[TaskRecord],
) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(itinerary.len() + appointments.len() + tasks.len());
    events.extend(itinerary.iter().filter_map(itinerary_event));
    events.extend(appointments.iter().filter_map(appointment_event));
    events.extend(tasks.iter().filter_map(task_event));
    events
}

impl SourceCollections {
    pub fn normalize(&self) -> Vec<CalendarEvent> {
        normalize(&self.itinerary, &self.appointments, &self.tasks)
    }
}

fn anchor_date(kind: SourceKind, id: &str, raw: &str) -> Option<NaiveDate> {
    match parse_date(raw) {
        Ok(d) => Some(d),
        Err(e) => {
            log::debug!("Dropping {} record '{}': {}", kind, id, e);
            None
        }
    }
}

/// End dates that don't parse, or that precede the start, are ignored.
fn span_end(kind: SourceKind, id: &str, start: NaiveDate, raw: &Option<String>) -> Option<NaiveDate> {
    let raw = non_blank(raw)?;
    match parse_date(raw) {
        Ok(end) if end >= start => Some(end),
        Ok(end) => {
            log::debug!(
                "Ignoring end date {} before start {} on {} record '{}'",
                end,
                start,
                kind,
                id
            );
            None
        }
        Err(e) => {
            log::debug!("Ignoring end date on {} record '{}': {}", kind, id, e);
            None
        }
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn itinerary_event(entry: &ItineraryEntry) -> Option<CalendarEvent> {
    let kind = SourceKind::Itinerary;
    let date = anchor_date(kind, &entry.id, &entry.date)?;
    let end_date = span_end(kind, &entry.id, date, &entry.end_date);

    // Explicit start wins, then whatever the entry type implies (departure, check-in, pickup).
    let time_of_day = non_blank(&entry.start_time).or_else(|| entry.details.anchor_time());
    let end_time = non_blank(&entry.end_time).or_else(|| entry.details.end_time());

    Some(CalendarEvent {
        id: entry.id.clone(),
        source_kind: kind,
        subtype: entry.details.subtype().to_string(),
        title: entry.title.clone(),
        date,
        end_date,
        time_of_day: owned(time_of_day),
        end_time: owned(end_time),
        confirmed: Confirmation::from_flag(entry.confirmed),
        assignee: owned(non_blank(&entry.assignee)),
        location: owned(non_blank(&entry.location)),
    })
}

fn appointment_event(appt: &Appointment) -> Option<CalendarEvent> {
    let kind = SourceKind::Appointment;
    let date = anchor_date(kind, &appt.id, &appt.date)?;

    let confirmed = match appt.status {
        Some(AppointmentStatus::Confirmed) => Confirmation::Confirmed,
        Some(AppointmentStatus::Pending) => Confirmation::Pending,
        None => Confirmation::NotApplicable,
    };

    Some(CalendarEvent {
        id: appt.id.clone(),
        source_kind: kind,
        subtype: non_blank(&appt.category)
            .unwrap_or(DEFAULT_APPOINTMENT_SUBTYPE)
            .to_string(),
        title: appt.title.clone(),
        date,
        end_date: None,
        time_of_day: owned(non_blank(&appt.start_time)),
        end_time: owned(non_blank(&appt.end_time)),
        confirmed,
        assignee: owned(non_blank(&appt.assignee)),
        location: owned(non_blank(&appt.location)),
    })
}

fn task_event(task: &TaskRecord) -> Option<CalendarEvent> {
    let kind = SourceKind::Task;
    // No due date, no calendar position.
    let due = non_blank(&task.due_date)?;
    let date = anchor_date(kind, &task.id, due)?;

    Some(CalendarEvent {
        id: task.id.clone(),
        source_kind: kind,
        subtype: non_blank(&task.priority)
            .unwrap_or(DEFAULT_TASK_PRIORITY)
            .to_string(),
        title: task.title.clone(),
        date,
        end_date: None,
        time_of_day: None,
        end_time: None,
        confirmed: Confirmation::NotApplicable,
        assignee: owned(non_blank(&task.assignee)),
        location: None,
    })
}
