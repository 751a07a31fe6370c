//! Calendar events and suggested slots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::{buffered_interval, BufferedInterval};

/// A timed calendar event with participants.
///
/// The engine only reads events. Moving an event produces a new value via
/// [`Event::moved_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(with = "crate::instant")]
    pub start: DateTime<Utc>,
    #[serde(with = "crate::instant")]
    pub end: DateTime<Utc>,
    /// Participant identifiers. Order is kept for reporting; duplicates are
    /// treated as one participant.
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Event {
    /// Minimal constructor; the remaining fields default to empty.
    pub fn new<I, P>(
        id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        participants: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            id: id.into(),
            title: String::new(),
            start,
            end,
            participants: participants.into_iter().map(Into::into).collect(),
            category: String::new(),
            color: String::new(),
            notes: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn has_participant(&self, participant: &str) -> bool {
        self.participants.iter().any(|p| p == participant)
    }

    /// Participants in listing order with repeats removed.
    pub fn unique_participants(&self) -> impl Iterator<Item = &str> {
        self.participants
            .iter()
            .enumerate()
            .filter(|(i, p)| !self.participants[..*i].contains(p))
            .map(|(_, p)| p.as_str())
    }

    pub fn buffered(&self, buffer_minutes: i64) -> BufferedInterval {
        buffered_interval(self.start, self.end, buffer_minutes)
    }

    /// A copy of this event starting at `start`, keeping its duration.
    pub fn moved_to(&self, start: DateTime<Utc>) -> Event {
        Event {
            start,
            end: start + self.duration(),
            ..self.clone()
        }
    }
}

/// An alternative time window for a proposed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(with = "crate::instant")]
    pub start: DateTime<Utc>,
    #[serde(with = "crate::instant")]
    pub end: DateTime<Utc>,
}

impl Suggestion {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deserializes_client_shape_with_millis() {
        let json = r##"{
            "id": "evt1",
            "title": "Standup",
            "start": 1759399200000,
            "end": "2025-10-02T11:00:00.000Z",
            "participants": ["user1"],
            "color": "#4caf50"
        }"##;
        let ev: Event = serde_json::from_str(json).unwrap();
        assert_eq!(ev.start, Utc.with_ymd_and_hms(2025, 10, 2, 10, 0, 0).unwrap());
        assert_eq!(ev.duration(), Duration::hours(1));
        assert_eq!(ev.category, "");
        assert_eq!(ev.notes, None);
    }

    #[test]
    fn missing_participants_default_to_empty() {
        let json = r#"{"id":"a","start":"2025-10-02T10:00:00Z","end":"2025-10-02T11:00:00Z"}"#;
        let ev: Event = serde_json::from_str(json).unwrap();
        assert!(ev.participants.is_empty());
    }

    #[test]
    fn malformed_instant_is_rejected() {
        let json = r#"{"id":"a","start":"soon","end":"2025-10-02T11:00:00Z"}"#;
        let err = serde_json::from_str::<Event>(json).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn unique_participants_keeps_first_occurrence() {
        let start = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
        let ev = Event::new("a", start, start + Duration::hours(1), ["u2", "u1", "u2"]);
        let ps: Vec<&str> = ev.unique_participants().collect();
        assert_eq!(ps, vec!["u2", "u1"]);
    }

    #[test]
    fn moved_to_keeps_duration_and_metadata() {
        let start = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
        let mut ev = Event::new("a", start, start + Duration::minutes(45), ["u1"]);
        ev.title = "Review".into();
        let moved = ev.moved_to(start + Duration::hours(2));
        assert_eq!(moved.duration(), Duration::minutes(45));
        assert_eq!(moved.title, "Review");
        assert_eq!(moved.id, "a");
        assert_eq!(ev.start, start);
    }
}
