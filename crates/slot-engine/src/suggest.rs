//! Alternative-slot search for a conflicting proposal.
//!
//! The search is local rather than a global free/busy merge. It runs in two
//! tiers:
//!
//! 1. **Oscillating search** over day offsets 0, 1 and 2: starting from the
//!    requested start shifted by whole days, try offsets `0, +1, -1, +2, -2, …`
//!    steps (up to a full day either way), nearest first.
//! 2. **Day scan** over day offsets 3 to 6: walk each day's working hours
//!    forward from opening time in fixed steps.
//!
//! A candidate is accepted when it fits inside its day's working hours,
//! starts strictly after now, is neither the requested start nor an already
//! found start, and its buffered interval overlaps no buffered event of any
//! proposal participant.
//! The search stops as soon as `max_suggestions` slots are found.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::config::SchedulingConfig;
use crate::conflict::BusySet;
use crate::event::{Event, Suggestion};
use crate::interval::buffered_interval;

/// Day offsets searched by the oscillating tier.
pub const LOCAL_SEARCH_DAYS: i64 = 3;
/// Day offsets searched by the day-scan tier, after the local ones.
pub const FALLBACK_SEARCH_DAYS: i64 = 4;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Step offsets in nearest-first order: `0, 1, -1, 2, -2, …, max, -max`.
pub fn oscillating_offsets(max: i64) -> impl Iterator<Item = i64> {
    std::iter::once(0).chain((1..=max).flat_map(|i| [i, -i]))
}

/// Suggest up to `config.max_suggestions` conflict-free slots for `proposed`.
///
/// Suggestions keep the proposal's duration and come back in discovery
/// order: oscillating-tier hits first, then day-scan hits by day and time.
/// A non-positive duration yields no suggestions. An empty result after the
/// full seven-day search is a valid "no availability" answer.
pub fn suggest_times(
    proposed: &Event,
    existing: &[Event],
    config: &SchedulingConfig,
    clock: &impl Clock,
) -> Vec<Suggestion> {
    let duration = proposed.duration();
    if duration <= Duration::zero() || config.max_suggestions == 0 {
        return Vec::new();
    }

    let mut search = Search {
        config,
        duration,
        step: Duration::minutes(config.step_minutes()),
        now: clock.now(),
        original: proposed.start,
        busy: BusySet::for_proposal(proposed, existing, config.buffer_minutes),
        found: Vec::new(),
    };
    debug!(
        event_id = %proposed.id,
        busy = search.busy.len(),
        step_minutes = config.step_minutes(),
        "searching for alternative slots"
    );

    search.oscillate();
    debug!(found = search.found.len(), "oscillating search finished");

    if !search.is_full() {
        search.scan_days();
        debug!(found = search.found.len(), "day scan finished");
    }

    let mut found = search.found;
    found.truncate(config.max_suggestions);
    found
}

struct Search<'a> {
    config: &'a SchedulingConfig,
    duration: Duration,
    step: Duration,
    now: DateTime<Utc>,
    original: DateTime<Utc>,
    busy: BusySet,
    found: Vec<Suggestion>,
}

impl Search<'_> {
    fn is_full(&self) -> bool {
        self.found.len() >= self.config.max_suggestions
    }

    fn oscillate(&mut self) {
        let step_minutes = self.config.step_minutes();
        let max_offset = (MINUTES_PER_DAY + step_minutes - 1) / step_minutes;

        for day in 0..LOCAL_SEARCH_DAYS {
            if self.is_full() {
                return;
            }
            let anchor = self.original + Duration::days(day);
            for offset in oscillating_offsets(max_offset) {
                if self.is_full() {
                    break;
                }
                let start = anchor + Duration::minutes(offset * step_minutes);
                let end = start + self.duration;
                let fits = self
                    .config
                    .working_hours
                    .window_on(start.date_naive())
                    .is_some_and(|w| w.contains(start, end));
                if fits {
                    self.try_accept(start);
                }
            }
        }
    }

    fn scan_days(&mut self) {
        let first_day = self.original.date_naive();
        for day in LOCAL_SEARCH_DAYS..LOCAL_SEARCH_DAYS + FALLBACK_SEARCH_DAYS {
            if self.is_full() {
                return;
            }
            let Some(window) = first_day
                .checked_add_signed(Duration::days(day))
                .and_then(|date| self.config.working_hours.window_on(date))
            else {
                continue;
            };
            let mut start = window.start;
            while start + self.duration <= window.end && !self.is_full() {
                self.try_accept(start);
                start = start + self.step;
            }
        }
    }

    /// Accept `start` if it is new, in the future, and free for every
    /// participant.
    fn try_accept(&mut self, start: DateTime<Utc>) {
        // A full day of offsets from one anchor reaches the next anchor, so
        // the same instant (including the original) can come up twice.
        if start <= self.now
            || start == self.original
            || self.found.iter().any(|s| s.start == start)
        {
            return;
        }
        let end = start + self.duration;
        let candidate = buffered_interval(start, end, self.config.buffer_minutes);
        if self.busy.has_conflict(&candidate) {
            return;
        }
        trace!(%start, %end, "accepted slot");
        self.found.push(Suggestion { start, end });
    }
}
