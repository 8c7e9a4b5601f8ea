// Tests for the background alert ticker.
use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};
use tripline::alert::{AlertKind, AlertSettings};
use tripline::clock::{FixedClock, SharedClock};
use tripline::model::{CalendarEvent, Confirmation, SourceKind};
use tripline::system::{AlertMessage, spawn_alert_ticker};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 10)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn flight(time: &str) -> CalendarEvent {
    CalendarEvent {
        id: "f1".to_string(),
        source_kind: SourceKind::Itinerary,
        subtype: "Flight".to_string(),
        title: "LHR to EDI".to_string(),
        date: at(0, 0).date(),
        end_date: None,
        time_of_day: Some(time.to_string()),
        end_time: None,
        confirmed: Confirmation::Confirmed,
        assignee: None,
        location: None,
    }
}

async fn next_alerts(rx: &mut mpsc::Receiver<AlertMessage>) -> Vec<tripline::Alert> {
    match timeout(Duration::from_secs(5), rx.recv()).await {
        Ok(Some(AlertMessage::Refreshed(alerts))) => alerts,
        other => panic!("Expected a refresh, got {:?}", other),
    }
}

#[tokio::test]
async fn test_first_refresh_reflects_initial_events() {
    let shared: SharedClock = Arc::new(FixedClock::new(at(8, 0)));
    let (ui_tx, mut ui_rx) = mpsc::channel(10);

    let _events_tx = spawn_alert_ticker(
        shared,
        Duration::from_secs(3600),
        AlertSettings::default(),
        vec![flight("09:40")],
        ui_tx,
    );

    // No empty list before the real one
    let alerts = next_alerts(&mut ui_rx).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::PreDepartureReminder);
}

#[tokio::test]
async fn test_ticker_sends_only_changes() {
    let clock = FixedClock::new(at(8, 0));
    let shared: SharedClock = Arc::new(clock.clone());
    let (ui_tx, mut ui_rx) = mpsc::channel(10);

    // Long period: only the immediate first tick fires during the test.
    let events_tx = spawn_alert_ticker(
        shared,
        Duration::from_secs(3600),
        AlertSettings::default(),
        Vec::new(),
        ui_tx,
    );

    // Nothing scheduled yet
    assert!(next_alerts(&mut ui_rx).await.is_empty());

    events_tx.send(vec![flight("09:40")]).await.unwrap();
    let alerts = next_alerts(&mut ui_rx).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::PreDepartureReminder);

    // Same list, same answer: nothing is sent
    events_tx.send(vec![flight("09:40")]).await.unwrap();
    assert!(
        timeout(Duration::from_millis(200), ui_rx.recv())
            .await
            .is_err()
    );

    // Band left: the reminder disappears
    clock.advance(ChronoDuration::minutes(15));
    events_tx.send(vec![flight("09:40")]).await.unwrap();
    assert!(next_alerts(&mut ui_rx).await.is_empty());

    // Dropping the sender stops the task, which closes the UI channel
    drop(events_tx);
    let closed = timeout(Duration::from_secs(5), ui_rx.recv()).await;
    assert!(matches!(closed, Ok(None)));
}
