// File: ./src/countdown.rs
// Live countdown values for the dashboard ("departs in 2d 3h 05m").
// Recomputed by the host on its refresh tick, like the alerts.
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Countdown {
    /// Time left until `target`, or None once it has passed.
    pub fn between(target: NaiveDateTime, now: NaiveDateTime) -> Option<Self> {
        let total = (target - now).num_minutes();
        if total < 0 {
            return None;
        }
        Some(Self {
            days: total / 1440,
            hours: (total % 1440) / 60,
            minutes: total % 60,
        })
    }

    pub fn total_minutes(&self) -> i64 {
        self.days * 1440 + self.hours * 60 + self.minutes
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.days > 0 {
            write!(f, "{}d {}h {:02}m", self.days, self.hours, self.minutes)
        } else if self.hours > 0 {
            write!(f, "{}h {:02}m", self.hours, self.minutes)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}

pub fn format_countdown(target: NaiveDateTime, now: NaiveDateTime) -> Option<String> {
    Countdown::between(target, now).map(|c| c.to_string())
}
