// File: ./src/model/event.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// Which source collection an event was projected from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SourceKind {
    Itinerary,
    Appointment,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Confirmation {
    Confirmed,
    Pending,
    #[default]
    NotApplicable,
}

impl Confirmation {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Confirmed,
            Some(false) => Self::Pending,
            None => Self::NotApplicable,
        }
    }
}

/// Resolves an event back to the record it came from.
/// Ids are only unique within one source collection, hence the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventKey {
    pub source_kind: SourceKind,
    pub id: String,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_kind, self.id)
    }
}

/// One entry of the unified calendar stream.
///
/// A pure projection of a source record: it is rebuilt on every input change
/// and holds nothing that could be used to mutate the record. Edits go through
/// [`CalendarEvent::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub source_kind: SourceKind,
    pub subtype: String,
    pub title: String,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time_of_day: Option<String>,
    pub end_time: Option<String>,
    pub confirmed: Confirmation,
    pub assignee: Option<String>,
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn key(&self) -> EventKey {
        EventKey {
            source_kind: self.source_kind,
            id: self.id.clone(),
        }
    }

    /// True if the event occupies `date`: its anchor date, or any day of its inclusive span.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        if date == self.date {
            return true;
        }
        match self.end_date {
            Some(end) => self.date <= date && date <= end,
            None => false,
        }
    }

    /// Last calendar day the event occupies.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.date).max(self.date)
    }

    pub fn is_multi_day(&self) -> bool {
        self.last_day() > self.date
    }

    /// Key used for intra-day ordering. Untimed events compare as the empty string.
    pub fn sort_time(&self) -> &str {
        self.time_of_day.as_deref().unwrap_or("")
    }

    pub fn is_subtype(&self, subtype: &str) -> bool {
        self.subtype.eq_ignore_ascii_case(subtype)
    }
}
