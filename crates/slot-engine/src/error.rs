//! Error types for slot-engine operations.
//!
//! Conflict detection and slot suggestion never fail; these variants cover
//! configuration parsing, the request boundary, and the event book.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid clock time '{0}': expected HH:MM")]
    InvalidClockTime(String),

    #[error("Invalid working hours '{0}': expected HH:MM-HH:MM")]
    InvalidWorkingHours(String),

    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("proposedEvent required")]
    MissingProposedEvent,

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Event already exists: {0}")]
    DuplicateEvent(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
