// File: ./src/system.rs
// Background re-evaluation of alerts on a fixed tick.
//
// The alert engine is stateless and cheap, so every tick is a full recompute.
// The only state kept here is the last list sent, so the UI isn't woken up
// with an identical list every minute.
use crate::alert::{Alert, AlertSettings, evaluate_with};
use crate::clock::SharedClock;
use crate::model::CalendarEvent;
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior, interval};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertMessage {
    Refreshed(Vec<Alert>),
}

/// Spawns the alert ticker over `initial` events. The first tick fires at once,
/// so the first message already reflects them.
/// returns: Sender to replace the event list. Dropping it stops the task.
pub fn spawn_alert_ticker(
    clock: SharedClock,
    period: Duration,
    settings: AlertSettings,
    initial: Vec<CalendarEvent>,
    ui_sender: mpsc::Sender<AlertMessage>,
) -> mpsc::Sender<Vec<CalendarEvent>> {
    let (tx, mut rx) = mpsc::channel::<Vec<CalendarEvent>>(10);

    tokio::spawn(async move {
        let mut events = initial;
        let mut last_sent: Option<Vec<Alert>> = None;

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                update = rx.recv() => match update {
                    Some(new_list) => events = new_list,
                    // Channel closed, exit ticker
                    None => break,
                },
            }

            let alerts = evaluate_with(&events, clock.now(), &settings);
            if last_sent.as_ref() == Some(&alerts) {
                continue;
            }

            log::debug!("Alert list changed: {} active", alerts.len());
            if ui_sender
                .send(AlertMessage::Refreshed(alerts.clone()))
                .await
                .is_err()
            {
                // Receiver gone, nobody left to notify
                break;
            }
            last_sent = Some(alerts);
        }
    });

    tx
}
