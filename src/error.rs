// File: ./src/error.rs
//! Error types for the calendar core.
//!
//! The core performs no I/O, so the taxonomy is narrow: values that could not
//! be parsed, or arithmetic that left chrono's range. Callers in the core treat these as "skip this record" rather
//! than as failures of the whole batch.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Time out of range: {0}")]
    OutOfRange(String),
}

pub type AgendaResult<T> = Result<T, AgendaError>;
