//! Error types for HeliOps domain logic

use thiserror::Error;

/// Result type alias for HeliOps domain operations
pub type Result<T> = std::result::Result<T, HeliopsError>;

/// Errors raised by the shared domain layer
#[derive(Error, Debug)]
pub enum HeliopsError {
    #[error("Invalid flight time '{0}': expected H:MM")]
    InvalidFlightTime(String),

    #[error("Invalid clock time '{0}': expected HH:MM")]
    InvalidClockTime(String),

    #[error("Invalid month {0}: expected 1-12")]
    InvalidMonth(u32),
}
