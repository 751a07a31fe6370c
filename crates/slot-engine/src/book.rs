//! In-process event store that refuses to double-book silently.
//!
//! Before an add or update is persisted, the event is checked against every
//! *other* stored event (an event never conflicts with its own earlier
//! version). A clean event is saved at once. A conflicting one is handed
//! back as a [`ConflictNotice`] with suggested alternatives, and nothing is
//! written until the caller decides via [`EventBook::commit`] or
//! [`EventBook::accept_suggestion`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::SchedulingConfig;
use crate::conflict::{detect_conflicts, ConflictReport};
use crate::error::{Result, SlotError};
use crate::event::{Event, Suggestion};
use crate::suggest::suggest_times;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    Add,
    Update,
}

/// A submission held back for human resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictNotice {
    pub event: Event,
    pub conflicts: Vec<ConflictReport>,
    pub suggestions: Vec<Suggestion>,
    pub mode: SaveMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Saved,
    Conflict(ConflictNotice),
}

#[derive(Debug, Clone)]
pub struct EventBook<C = SystemClock> {
    events: Vec<Event>,
    config: SchedulingConfig,
    clock: C,
}

impl EventBook<SystemClock> {
    pub fn new(config: SchedulingConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> EventBook<C> {
    pub fn with_clock(config: SchedulingConfig, clock: C) -> Self {
        Self {
            events: Vec::new(),
            config,
            clock,
        }
    }

    /// Replace the stored events with a JSON array of events.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        self.events = serde_json::from_str(json)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.events)?)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Check `event` against the other stored events and save it if clean.
    ///
    /// # Errors
    /// `DuplicateEvent` when adding an id already stored, `UnknownEvent` when
    /// updating an id that is not.
    pub fn submit(&mut self, event: Event, mode: SaveMode) -> Result<Submission> {
        self.check_mode(&event.id, mode)?;

        let others: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.id != event.id)
            .cloned()
            .collect();
        let conflicts = detect_conflicts(&event, &others, self.config.buffer_minutes);

        if conflicts.is_empty() {
            debug!(event_id = %event.id, ?mode, "no conflicts, saving");
            self.persist(event, mode);
            return Ok(Submission::Saved);
        }

        let suggestions = suggest_times(&event, &others, &self.config, &self.clock);
        debug!(
            event_id = %event.id,
            ?mode,
            participants = conflicts.len(),
            suggestions = suggestions.len(),
            "conflict, holding event for resolution"
        );
        Ok(Submission::Conflict(ConflictNotice {
            event,
            conflicts,
            suggestions,
            mode,
        }))
    }

    /// Save without checking for conflicts.
    pub fn commit(&mut self, event: Event, mode: SaveMode) -> Result<()> {
        self.check_mode(&event.id, mode)?;
        self.persist(event, mode);
        Ok(())
    }

    /// Save the notice's event moved to its `index`-th suggestion.
    ///
    /// Returns the event as stored.
    pub fn accept_suggestion(&mut self, notice: &ConflictNotice, index: usize) -> Result<Event> {
        let suggestion = notice.suggestions.get(index).ok_or_else(|| {
            SlotError::UnknownEvent(format!("suggestion {} for {}", index, notice.event.id))
        })?;
        let moved = notice.event.moved_to(suggestion.start);
        self.commit(moved.clone(), notice.mode)?;
        Ok(moved)
    }

    /// Remove the event with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    fn check_mode(&self, id: &str, mode: SaveMode) -> Result<()> {
        let stored = self.get(id).is_some();
        match mode {
            SaveMode::Add if stored => Err(SlotError::DuplicateEvent(id.to_string())),
            SaveMode::Update if !stored => Err(SlotError::UnknownEvent(id.to_string())),
            _ => Ok(()),
        }
    }

    fn persist(&mut self, event: Event, mode: SaveMode) {
        match mode {
            SaveMode::Add => self.events.push(event),
            SaveMode::Update => {
                if let Some(slot) = self.events.iter_mut().find(|e| e.id == event.id) {
                    *slot = event;
                }
            }
        }
    }
}
