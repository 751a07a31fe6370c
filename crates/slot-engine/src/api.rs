//! Request/response shapes for callers that speak JSON.
//!
//! A request carries the proposal and, optionally, the events to check it
//! against. When `existingEvents` is omitted the caller's own authoritative
//! collection is used instead.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::SchedulingConfig;
use crate::conflict::{detect_conflicts, ConflictReport};
use crate::error::{Result, SlotError};
use crate::event::{Event, Suggestion};
use crate::suggest::suggest_times;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub proposed_event: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_events: Option<Vec<Event>>,
}

impl ScheduleRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split into the proposal and the events to check it against.
    ///
    /// # Errors
    /// Returns `SlotError::MissingProposedEvent` if the proposal is absent.
    pub fn into_parts(self, fallback: &[Event]) -> Result<(Event, Vec<Event>)> {
        let proposed = self.proposed_event.ok_or(SlotError::MissingProposedEvent)?;
        let existing = self.existing_events.unwrap_or_else(|| fallback.to_vec());
        Ok((proposed, existing))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictsResponse {
    pub conflicts: Vec<ConflictReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Conflicts plus, when there are any, suggested alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResponse {
    pub conflicts: Vec<ConflictReport>,
    pub suggestions: Vec<Suggestion>,
}

pub fn check_conflicts(
    request: ScheduleRequest,
    fallback: &[Event],
    config: &SchedulingConfig,
) -> Result<ConflictsResponse> {
    let (proposed, existing) = request.into_parts(fallback)?;
    let conflicts = detect_conflicts(&proposed, &existing, config.buffer_minutes);
    Ok(ConflictsResponse { conflicts })
}

pub fn suggest(
    request: ScheduleRequest,
    fallback: &[Event],
    config: &SchedulingConfig,
    clock: &impl Clock,
) -> Result<SuggestionsResponse> {
    let (proposed, existing) = request.into_parts(fallback)?;
    let suggestions = suggest_times(&proposed, &existing, config, clock);
    Ok(SuggestionsResponse { suggestions })
}

/// Detect conflicts and only search for alternatives when some exist.
pub fn resolve(
    request: ScheduleRequest,
    fallback: &[Event],
    config: &SchedulingConfig,
    clock: &impl Clock,
) -> Result<ResolutionResponse> {
    let (proposed, existing) = request.into_parts(fallback)?;
    let conflicts = detect_conflicts(&proposed, &existing, config.buffer_minutes);
    let suggestions = if conflicts.is_empty() {
        Vec::new()
    } else {
        suggest_times(&proposed, &existing, config, clock)
    };
    Ok(ResolutionResponse {
        conflicts,
        suggestions,
    })
}
