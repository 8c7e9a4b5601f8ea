// File: ./src/render.rs
// Plain-text rendering of calendar views, alerts and the dashboard for the terminal host.
use crate::alert::{Alert, Severity};
use crate::dashboard::Dashboard;
use crate::model::{CalendarEvent, Confirmation, SourceKind};
use crate::state::CalendarView;
use crate::window::{CalendarWindow, MonthGrid};
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

/// Splits a day's list into the entries to show and the "+N more" count.
pub fn compact_day(events: &[CalendarEvent], limit: usize) -> (&[CalendarEvent], usize) {
    if events.len() <= limit {
        (events, 0)
    } else {
        (&events[..limit], events.len() - limit)
    }
}

fn kind_symbol(event: &CalendarEvent) -> &'static str {
    match event.source_kind {
        SourceKind::Task => "☐",
        SourceKind::Appointment => "◆",
        SourceKind::Itinerary => match event.subtype.as_str() {
            "Flight" => "✈",
            "Hotel" => "⌂",
            "Train" => "⇄",
            "CarRental" => "⛟",
            _ => "•",
        },
    }
}

pub fn event_line(event: &CalendarEvent) -> String {
    let mut s = format!(
        "{:<5} {} {}",
        event.time_of_day.as_deref().unwrap_or(""),
        kind_symbol(event),
        event.title
    );
    if event.is_multi_day() {
        let _ = write!(s, " (until {})", event.last_day().format("%b %d"));
    }
    match event.confirmed {
        Confirmation::Pending => s.push_str(" [pending]"),
        Confirmation::Confirmed => s.push_str(" [confirmed]"),
        Confirmation::NotApplicable => {}
    }
    if let Some(who) = &event.assignee {
        let _ = write!(s, " @{}", who);
    }
    s
}

fn day_block(out: &mut String, date: NaiveDate, events: &[CalendarEvent], limit: usize) {
    let _ = writeln!(out, "{}", date.format("%a %Y-%m-%d"));
    if events.is_empty() {
        out.push_str("      (nothing scheduled)\n");
        return;
    }
    let (shown, hidden) = compact_day(events, limit);
    for e in shown {
        let _ = writeln!(out, "  {}", event_line(e));
    }
    if hidden > 0 {
        let _ = writeln!(out, "  +{} more", hidden);
    }
}

fn month_block(out: &mut String, grid: &MonthGrid, view: &CalendarView) {
    if let Some(first) = grid.first_day() {
        let _ = writeln!(out, "{:^35}", first.format("%B %Y").to_string());
    }
    if let Some(first_row) = grid.rows().next() {
        for day in first_row {
            let _ = write!(out, "{:^5}", day.format("%a").to_string());
        }
        out.push('\n');
    }
    for row in grid.rows() {
        for day in row {
            let count = view.events_on(*day).len();
            let cell = if !grid.in_month(*day) {
                "  .".to_string()
            } else if count > 0 {
                format!("{:>2}*{}", day.day(), count.min(9))
            } else {
                format!("{:>3}", day.day())
            };
            let _ = write!(out, "{:<5}", cell);
        }
        out.push('\n');
    }
}

pub fn render_view(view: &CalendarView, compact_limit: usize) -> String {
    let mut out = String::new();
    match &view.window {
        CalendarWindow::Day(date) => {
            // A single day is never truncated.
            day_block(&mut out, *date, view.events_on(*date), usize::MAX);
        }
        CalendarWindow::Week(days) => {
            for day in days {
                day_block(&mut out, *day, view.events_on(*day), compact_limit);
            }
        }
        CalendarWindow::Month(grid) => {
            month_block(&mut out, grid, view);
            out.push('\n');
            for day in grid.days.iter().filter(|d| grid.in_month(**d)) {
                let events = view.events_on(*day);
                if !events.is_empty() {
                    day_block(&mut out, *day, events, compact_limit);
                }
            }
        }
        CalendarWindow::Year(grids) => {
            for grid in grids {
                month_block(&mut out, grid, view);
                out.push('\n');
            }
        }
    }
    out
}

pub fn alert_line(alert: &Alert) -> String {
    let tag = match alert.severity {
        Severity::High => "!!",
        Severity::Medium => "! ",
        Severity::Low => "  ",
    };
    format!("{} {} {}", tag, alert.anchor_time, alert.message)
}

pub fn render_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts.\n".to_string();
    }
    alerts.iter().map(|a| alert_line(a) + "\n").collect()
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Dashboard for {}",
        dashboard.generated_at.format("%a %Y-%m-%d %H:%M")
    );
    out.push('\n');

    match &dashboard.next_departure {
        Some(next) => {
            let _ = writeln!(
                out,
                "Next departure: {} on {} (in {})",
                next.event.title,
                next.departs_at.format("%a %b %d %H:%M"),
                next.countdown
            );
        }
        None => out.push_str("Next departure: none scheduled\n"),
    }
    let _ = writeln!(out, "Open tasks: {}", dashboard.open_tasks);
    out.push('\n');

    out.push_str("Alerts:\n");
    out.push_str(&render_alerts(&dashboard.alerts));
    out.push('\n');

    out.push_str("Upcoming:\n");
    if dashboard.upcoming.is_empty() {
        out.push_str("  (nothing in the next days)\n");
    }
    for e in &dashboard.upcoming {
        let _ = writeln!(out, "  {} {}", e.date.format("%m-%d"), event_line(e));
    }
    out
}
