//! Per-participant buffered conflict detection.
//!
//! A proposed event conflicts with an existing event for participant `p` when
//! both list `p` and their buffered intervals overlap. Touching buffered
//! intervals are NOT conflicts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::interval::BufferedInterval;

/// The existing events that collide with a proposal for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub participant: String,
    /// In the order they appear in the existing-events sequence.
    pub conflicting_events: Vec<Event>,
}

/// Detect, per participant, which existing events buffer-overlap `proposed`.
///
/// Reports follow the order participants are listed on `proposed`; a
/// participant repeated on the proposal is reported once. Participants with
/// no conflicts are omitted, so an empty result means "no conflicts".
pub fn detect_conflicts(
    proposed: &Event,
    existing: &[Event],
    buffer_minutes: i64,
) -> Vec<ConflictReport> {
    let proposed_interval = proposed.buffered(buffer_minutes);
    let index = index_by_participant(existing);

    proposed
        .unique_participants()
        .filter_map(|participant| {
            let conflicting_events: Vec<Event> = index
                .get(participant)?
                .iter()
                .filter(|ev| ev.buffered(buffer_minutes).overlaps(&proposed_interval))
                .map(|&ev| ev.clone())
                .collect();

            if conflicting_events.is_empty() {
                None
            } else {
                Some(ConflictReport {
                    participant: participant.to_string(),
                    conflicting_events,
                })
            }
        })
        .collect()
}

/// Group events under each participant they list, keeping sequence order.
fn index_by_participant(events: &[Event]) -> HashMap<&str, Vec<&Event>> {
    let mut index: HashMap<&str, Vec<&Event>> = HashMap::new();
    for ev in events {
        for participant in ev.unique_participants() {
            index.entry(participant).or_default().push(ev);
        }
    }
    index
}

/// Buffered busy intervals of every event sharing a participant with
/// `proposed`. A candidate time is free iff it overlaps none of them.
#[derive(Debug, Clone)]
pub(crate) struct BusySet {
    intervals: Vec<BufferedInterval>,
}

impl BusySet {
    pub(crate) fn for_proposal(proposed: &Event, existing: &[Event], buffer_minutes: i64) -> Self {
        let intervals = existing
            .iter()
            .filter(|ev| proposed.unique_participants().any(|p| ev.has_participant(p)))
            .map(|ev| ev.buffered(buffer_minutes))
            .collect();
        Self { intervals }
    }

    pub(crate) fn has_conflict(&self, candidate: &BufferedInterval) -> bool {
        self.intervals.iter().any(|busy| busy.overlaps(candidate))
    }

    pub(crate) fn len(&self) -> usize {
        self.intervals.len()
    }
}
