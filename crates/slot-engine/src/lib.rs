//! # slot-engine
//!
//! Buffered conflict detection and alternative-slot suggestion for shared
//! calendars.
//!
//! Given a proposed event and the events already booked, the engine reports
//! which participants would be double-booked (counting a safety buffer around
//! every event) and searches the next week for nearby slots that are free for
//! everyone, inside working hours, and in the future. Both operations are pure
//! functions of their inputs.
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use slot_engine::{detect_conflicts, Event};
//!
//! let ten = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
//! let proposed = Event::new("new", ten, ten + Duration::hours(1), ["u1"]);
//! let booked = Event::new("old", ten + Duration::minutes(80), ten + Duration::hours(2), ["u1"]);
//!
//! // 11:20 is only 20 minutes after 11:00: inside the 15+15 minute buffer.
//! let reports = detect_conflicts(&proposed, &[booked], 15);
//! assert_eq!(reports[0].participant, "u1");
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — Buffered-overlap primitive
//! - [`conflict`] — Per-participant conflict detection
//! - [`suggest`] — Two-tier search for alternative slots
//! - [`config`] — Buffer, working hours, suggestion cap
//! - [`clock`] — Injectable "now"
//! - [`event`] — `Event` and `Suggestion`
//! - [`api`] — JSON request/response boundary
//! - [`book`] — In-process event store with conflict hand-off
//! - [`error`] — Error types

pub mod api;
pub mod book;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod instant;
pub mod interval;
pub mod suggest;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ClockTime, SchedulingConfig, WorkingHours};
pub use conflict::{detect_conflicts, ConflictReport};
pub use error::SlotError;
pub use event::{Event, Suggestion};
pub use interval::{buffered_interval, overlaps, BufferedInterval};
pub use suggest::suggest_times;
