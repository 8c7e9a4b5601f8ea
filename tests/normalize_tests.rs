// Tests for projecting source records onto calendar events.
use chrono::NaiveDate;
use tripline::model::{
    Appointment, AppointmentStatus, Confirmation, FlightDetails, HotelDetails, ItineraryDetails,
    ItineraryEntry, SourceCollections, SourceKind, TaskRecord,
};
use tripline::normalize;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn itinerary(id: &str, date: &str, details: ItineraryDetails) -> ItineraryEntry {
    ItineraryEntry {
        id: id.to_string(),
        title: format!("Item {}", id),
        date: date.to_string(),
        end_date: None,
        start_time: None,
        end_time: None,
        confirmed: None,
        assignee: None,
        location: None,
        details,
    }
}

fn appointment(id: &str, date: &str, start: Option<&str>) -> Appointment {
    Appointment {
        id: id.to_string(),
        title: format!("Appointment {}", id),
        date: date.to_string(),
        start_time: start.map(str::to_string),
        end_time: None,
        category: None,
        status: None,
        assignee: None,
        location: None,
    }
}

fn task(id: &str, due: Option<&str>) -> TaskRecord {
    TaskRecord {
        id: id.to_string(),
        title: format!("Task {}", id),
        due_date: due.map(str::to_string),
        priority: None,
        completed: false,
        assignee: None,
    }
}

fn flight(departure: Option<&str>, arrival: Option<&str>) -> ItineraryDetails {
    ItineraryDetails::Flight(FlightDetails {
        departure_time: departure.map(str::to_string),
        arrival_time: arrival.map(str::to_string),
        flight_number: None,
        airline: None,
    })
}

#[test]
fn test_malformed_task_date_is_isolated() {
    let tasks = vec![
        task("1", Some("2025-06-10")),
        task("2", Some("not-a-date")),
        task("3", Some("2025-06-12")),
    ];
    let events = normalize(&[], &[], &tasks);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "1");
    assert_eq!(events[1].id, "3");
}

#[test]
fn test_tasks_without_due_date_are_excluded() {
    let tasks = vec![task("1", None), task("2", Some("  ")), task("3", Some("2025-06-10"))];
    let events = normalize(&[], &[], &tasks);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "3");
    assert_eq!(events[0].source_kind, SourceKind::Task);
}

#[test]
fn test_task_subtype_is_priority() {
    let mut high = task("1", Some("2025-06-10"));
    high.priority = Some("High".to_string());
    let plain = task("2", Some("2025-06-10"));

    let events = normalize(&[], &[], &[high, plain]);
    assert_eq!(events[0].subtype, "High");
    assert_eq!(events[1].subtype, "Medium");
    assert_eq!(events[0].time_of_day, None);
}

#[test]
fn test_explicit_start_time_wins_over_details() {
    let mut entry = itinerary("1", "2025-06-10", flight(Some("09:40"), Some("12:10")));
    entry.start_time = Some("08:00".to_string());

    let events = normalize(&[entry], &[], &[]);
    assert_eq!(events[0].time_of_day.as_deref(), Some("08:00"));
    assert_eq!(events[0].end_time.as_deref(), Some("12:10"));
    assert_eq!(events[0].subtype, "Flight");
}

#[test]
fn test_time_falls_back_to_type_specific_field() {
    let hotel = itinerary(
        "h",
        "2025-06-10",
        ItineraryDetails::Hotel(HotelDetails {
            check_in_time: Some("15:00".to_string()),
            check_out_time: Some("11:00".to_string()),
            confirmation_code: None,
        }),
    );
    let fl = itinerary("f", "2025-06-10", flight(Some("09:40"), None));
    let blank_start = {
        let mut e = itinerary("b", "2025-06-10", flight(Some("07:15"), None));
        e.start_time = Some("".to_string());
        e
    };
    let other = itinerary("o", "2025-06-10", ItineraryDetails::Other);

    let events = normalize(&[hotel, fl, blank_start, other], &[], &[]);
    assert_eq!(events[0].time_of_day.as_deref(), Some("15:00"));
    // Check-out is on another day, not an end time for this one.
    assert_eq!(events[0].end_time, None);
    assert_eq!(events[1].time_of_day.as_deref(), Some("09:40"));
    assert_eq!(events[2].time_of_day.as_deref(), Some("07:15"));
    assert_eq!(events[3].time_of_day, None);
}

#[test]
fn test_end_date_handling() {
    let mut stay = itinerary("1", "2025-06-10", ItineraryDetails::Other);
    stay.end_date = Some("2025-06-12".to_string());
    let mut broken_end = itinerary("2", "2025-06-10", ItineraryDetails::Other);
    broken_end.end_date = Some("someday".to_string());
    let mut reversed = itinerary("3", "2025-06-10", ItineraryDetails::Other);
    reversed.end_date = Some("2025-06-01".to_string());

    let events = normalize(&[stay, broken_end, reversed], &[], &[]);
    assert_eq!(events.len(), 3, "A bad end date never drops the event");
    assert_eq!(events[0].end_date, Some(d(2025, 6, 12)));
    assert_eq!(events[1].end_date, None);
    assert_eq!(events[2].end_date, None);
}

#[test]
fn test_bad_anchor_date_drops_only_that_record() {
    let entries = vec![
        itinerary("1", "2025-06-10", ItineraryDetails::Other),
        itinerary("2", "", ItineraryDetails::Other),
    ];
    let appts = vec![appointment("a", "June 10th", Some("10:00")), appointment("b", "2025-06-11", None)];

    let events = normalize(&entries, &appts, &[]);
    let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "b"]);
}

#[test]
fn test_output_order_is_itinerary_appointments_tasks() {
    let events = normalize(
        &[itinerary("i", "2025-06-12", ItineraryDetails::Other)],
        &[appointment("a", "2025-06-11", None)],
        &[task("t", Some("2025-06-10"))],
    );
    let kinds: Vec<_> = events.iter().map(|e| e.source_kind).collect();
    assert_eq!(
        kinds,
        vec![SourceKind::Itinerary, SourceKind::Appointment, SourceKind::Task]
    );
}

#[test]
fn test_appointment_fields() {
    let mut appt = appointment("a", "2025-06-10", Some("14:00"));
    appt.end_time = Some("15:30".to_string());
    appt.status = Some(AppointmentStatus::Pending);
    appt.category = Some("Client".to_string());
    appt.assignee = Some("Dana".to_string());

    let events = normalize(&[], &[appt], &[]);
    let e = &events[0];
    assert_eq!(e.date, d(2025, 6, 10));
    assert_eq!(e.time_of_day.as_deref(), Some("14:00"));
    assert_eq!(e.end_time.as_deref(), Some("15:30"));
    assert_eq!(e.confirmed, Confirmation::Pending);
    assert_eq!(e.subtype, "Client");
    assert_eq!(e.assignee.as_deref(), Some("Dana"));
}

#[test]
fn test_confirmation_from_itinerary_flag() {
    let mut yes = itinerary("1", "2025-06-10", ItineraryDetails::Other);
    yes.confirmed = Some(true);
    let mut no = itinerary("2", "2025-06-10", ItineraryDetails::Other);
    no.confirmed = Some(false);
    let unknown = itinerary("3", "2025-06-10", ItineraryDetails::Other);

    let events = normalize(&[yes, no, unknown], &[], &[]);
    assert_eq!(events[0].confirmed, Confirmation::Confirmed);
    assert_eq!(events[1].confirmed, Confirmation::Pending);
    assert_eq!(events[2].confirmed, Confirmation::NotApplicable);
}

#[test]
fn test_ids_are_not_deduplicated_across_sources() {
    let events = normalize(
        &[itinerary("1", "2025-06-10", ItineraryDetails::Other)],
        &[appointment("1", "2025-06-10", None)],
        &[task("1", Some("2025-06-10"))],
    );
    assert_eq!(events.len(), 3);
    let keys: std::collections::HashSet<_> = events.iter().map(|e| e.key()).collect();
    assert_eq!(keys.len(), 3, "Keys pair the id with its source kind");
}

#[test]
fn test_keys_are_stable_across_passes() {
    let sources = SourceCollections {
        itinerary: vec![itinerary("1", "2025-06-10", flight(Some("09:40"), None))],
        appointments: vec![appointment("7", "2025-06-10", Some("10:00"))],
        tasks: vec![task("3", Some("2025-06-11"))],
    };
    let first: Vec<_> = sources.normalize().iter().map(|e| e.key()).collect();
    let second: Vec<_> = sources.normalize().iter().map(|e| e.key()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_empty_collections() {
    assert!(normalize(&[], &[], &[]).is_empty());
    assert!(SourceCollections::default().normalize().is_empty());
}
