// File: ./src/model/mod.rs
pub mod event;
pub mod record;

pub use event::{CalendarEvent, Confirmation, EventKey, SourceKind};
pub use record::{
    Appointment, AppointmentStatus, CarRentalDetails, FlightDetails, HotelDetails,
    ItineraryDetails, ItineraryEntry, SourceCollections, TaskRecord, TrainDetails,
};
