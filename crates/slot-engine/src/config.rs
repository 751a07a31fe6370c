//! Scheduling configuration: buffer, working hours, suggestion cap.
//!
//! Defaults are `buffer_minutes = 15`, working hours 09:00–17:00 and at most
//! three suggestions. Every field is optional when deserializing, so a TOML
//! file may override only what it needs:
//!
//! ```toml
//! bufferMinutes = 10
//!
//! [workingHours]
//! start = "08:30"
//! end = "18:00"
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const DEFAULT_BUFFER_MINUTES: i64 = 15;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Bounds on the suggestion search stride, in minutes.
pub const MIN_STEP_MINUTES: i64 = 5;
pub const MAX_STEP_MINUTES: i64 = 15;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision, written `HH:MM`.
///
/// `24:00` is accepted and means the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    pub fn new(hour: u16, minute: u16) -> Result<Self> {
        let invalid = || SlotError::InvalidClockTime(format!("{:02}:{:02}", hour, minute));
        if minute >= 60 {
            return Err(invalid());
        }
        let minutes = hour
            .checked_mul(60)
            .and_then(|m| m.checked_add(minute))
            .filter(|m| *m <= MINUTES_PER_DAY)
            .ok_or_else(invalid)?;
        Ok(Self { minutes })
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> i64 {
        i64::from(self.minutes)
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidClockTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// One calendar day's working-hours window as absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// True when `[start, end]` lies entirely inside the window.
    pub fn contains(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Daily working-hours range, read on the UTC calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl WorkingHours {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Around the clock: 00:00–24:00.
    pub fn all_day() -> Self {
        Self {
            start: ClockTime { minutes: 0 },
            end: ClockTime { minutes: MINUTES_PER_DAY },
        }
    }

    /// The window on `date`, or `None` when end is not after start.
    pub fn window_on(&self, date: NaiveDate) -> Option<DayWindow> {
        if self.end <= self.start {
            return None;
        }
        let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
        Some(DayWindow {
            start: midnight + Duration::minutes(self.start.minutes()),
            end: midnight + Duration::minutes(self.end.minutes()),
        })
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: ClockTime { minutes: 9 * 60 },
            end: ClockTime { minutes: 17 * 60 },
        }
    }
}

impl FromStr for WorkingHours {
    type Err = SlotError;

    /// Parse `HH:MM-HH:MM`.
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| SlotError::InvalidWorkingHours(s.to_string()))?;
        let start = start
            .parse()
            .map_err(|_| SlotError::InvalidWorkingHours(s.to_string()))?;
        let end = end
            .parse()
            .map_err(|_| SlotError::InvalidWorkingHours(s.to_string()))?;
        Ok(Self { start, end })
    }
}

impl fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Caller-supplied knobs for detection and suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulingConfig {
    /// Margin added to both ends of every event before overlap checks.
    #[serde(alias = "buffer_minutes")]
    pub buffer_minutes: i64,
    #[serde(alias = "working_hours")]
    pub working_hours: WorkingHours,
    #[serde(alias = "max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
            working_hours: WorkingHours::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl SchedulingConfig {
    /// Search stride: the buffer clamped to 5..=15 minutes.
    ///
    /// Overlap math still uses the raw `buffer_minutes`.
    pub fn step_minutes(&self) -> i64 {
        self.buffer_minutes.clamp(MIN_STEP_MINUTES, MAX_STEP_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clock_time_parses_and_displays() {
        let t: ClockTime = "9:05".parse().unwrap();
        assert_eq!(t.minutes(), 545);
        assert_eq!(t.to_string(), "09:05");
        assert_eq!("24:00".parse::<ClockTime>().unwrap().minutes(), 1440);
    }

    #[test]
    fn clock_time_rejects_out_of_range() {
        for bad in ["24:01", "12:60", "1200", "ab:cd", "12:5", ""] {
            assert!(bad.parse::<ClockTime>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn working_hours_window_on_date() {
        let wh: WorkingHours = "08:30-18:00".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let w = wh.window_on(date).unwrap();
        assert_eq!(w.start, Utc.with_ymd_and_hms(2026, 3, 16, 8, 30, 0).unwrap());
        assert_eq!(w.end, Utc.with_ymd_and_hms(2026, 3, 16, 18, 0, 0).unwrap());
    }

    #[test]
    fn all_day_window_spans_to_next_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let w = WorkingHours::all_day().window_on(date).unwrap();
        assert_eq!(w.end - w.start, Duration::hours(24));
        assert_eq!(WorkingHours::all_day().to_string(), "00:00-24:00");
    }

    #[test]
    fn inverted_working_hours_have_no_window() {
        let wh: WorkingHours = "17:00-09:00".parse().unwrap();
        assert!(wh.window_on(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()).is_none());
    }

    #[test]
    fn step_is_clamped_but_buffer_is_not() {
        let mut cfg = SchedulingConfig::default();
        assert_eq!(cfg.step_minutes(), 15);
        cfg.buffer_minutes = 0;
        assert_eq!(cfg.step_minutes(), 5);
        cfg.buffer_minutes = 60;
        assert_eq!(cfg.step_minutes(), 15);
        assert_eq!(cfg.buffer_minutes, 60);
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let cfg: SchedulingConfig = serde_json::from_str(r#"{"maxSuggestions":5}"#).unwrap();
        assert_eq!(cfg.max_suggestions, 5);
        assert_eq!(cfg.buffer_minutes, 15);
        assert_eq!(cfg.working_hours, WorkingHours::default());
    }

    #[test]
    fn toml_config_with_snake_case_keys() {
        let cfg: SchedulingConfig = toml::from_str(
            "buffer_minutes = 10\n[working_hours]\nstart = \"08:00\"\nend = \"12:00\"\n",
        )
        .unwrap();
        assert_eq!(cfg.buffer_minutes, 10);
        assert_eq!(cfg.working_hours.to_string(), "08:00-12:00");
        assert_eq!(cfg.max_suggestions, 3);
    }
}
