// Crate root library declaration and module exports.
//
// The calendar core (normalize, window, aggregate, alert) is synchronous and
// pure. Everything that touches the clock, the filesystem or a runtime lives
// in the host modules (clock, config, context, storage, system, cli, render).
pub mod aggregate;
pub mod alert;
pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod countdown;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod normalize;
pub mod render;
pub mod state;
pub mod storage;
pub mod system;
pub mod temporal;
pub mod window;

pub use aggregate::{EventFilter, events_in_window, events_on_date, filtered_events_in_window};
pub use alert::{Alert, AlertKind, AlertSettings, Severity, evaluate, evaluate_with};
pub use model::{CalendarEvent, EventKey, SourceCollections, SourceKind};
pub use normalize::normalize;
pub use window::{CalendarWindow, Granularity, MonthGrid, window};
