// File: ./src/model/record.rs
// Source record shapes as supplied by the persistence collaborator.
//
// Dates and times stay as raw strings here. Parsing happens during
// normalization so that one malformed record never fails a whole batch.
use crate::temporal::non_blank;
use serde::{Deserialize, Serialize};

// --- ITINERARY ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetails {
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub airline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelDetails {
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub confirmation_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainDetails {
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRentalDetails {
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub dropoff_time: Option<String>,
}

/// Type-specific data of an itinerary entry, keyed by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItineraryDetails {
    Flight(FlightDetails),
    Hotel(HotelDetails),
    Train(TrainDetails),
    CarRental(CarRentalDetails),
    Activity,
    #[default]
    Other,
}

impl ItineraryDetails {
    pub fn subtype(&self) -> &'static str {
        match self {
            Self::Flight(_) => "Flight",
            Self::Hotel(_) => "Hotel",
            Self::Train(_) => "Train",
            Self::CarRental(_) => "CarRental",
            Self::Activity => "Activity",
            Self::Other => "Other",
        }
    }

    /// The start time implied by the entry type, used when no explicit start is set.
    pub fn anchor_time(&self) -> Option<&str> {
        match self {
            Self::Flight(f) => non_blank(&f.departure_time),
            Self::Hotel(h) => non_blank(&h.check_in_time),
            Self::Train(t) => non_blank(&t.departure_time),
            Self::CarRental(c) => non_blank(&c.pickup_time),
            Self::Activity | Self::Other => None,
        }
    }

    /// Same-day end time implied by the entry type.
    /// Hotel check-out and car drop-off happen on a later day, so they don't count.
    pub fn end_time(&self) -> Option<&str> {
        match self {
            Self::Flight(f) => non_blank(&f.arrival_time),
            Self::Train(t) => non_blank(&t.arrival_time),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub confirmed: Option<bool>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub details: ItineraryDetails,
}

// --- APPOINTMENTS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

// --- TASKS ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub assignee: Option<String>,
}

/// The three source collections, as read from the persistence collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCollections {
    #[serde(default)]
    pub itinerary: Vec<ItineraryEntry>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl SourceCollections {
    pub fn is_empty(&self) -> bool {
        self.itinerary.is_empty() && self.appointments.is_empty() && self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.itinerary.len() + self.appointments.len() + self.tasks.len()
    }
}
