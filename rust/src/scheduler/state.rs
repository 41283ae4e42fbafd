//! Mutable per-run accumulator for the assignment pass.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{CounterDelta, SurgeonId};
use crate::roster::Roster;

/// Live counters and last call dates, indexed by roster position.
///
/// Seeded from the roster's counters at run start and updated as calls are
/// assigned, so later dates see the effect of earlier ones. Each run owns a
/// fresh state; the roster itself is never written.
#[derive(Clone, Debug)]
pub struct PassState {
    last_assigned: Vec<Option<NaiveDate>>,
    calls_assigned: Vec<u32>,
    weekend_calls: Vec<u32>,
    deltas: Vec<CounterDelta>,
}

impl PassState {
    pub fn from_roster(roster: &Roster) -> Self {
        let surgeons = roster.surgeons();
        Self {
            last_assigned: vec![None; surgeons.len()],
            calls_assigned: surgeons.iter().map(|s| s.calls_assigned).collect(),
            weekend_calls: surgeons.iter().map(|s| s.weekend_calls).collect(),
            deltas: vec![CounterDelta::default(); surgeons.len()],
        }
    }

    /// Most recent call date assigned during this run.
    #[inline]
    pub fn last_assigned(&self, index: usize) -> Option<NaiveDate> {
        self.last_assigned[index]
    }

    /// Lifetime call count including this run so far.
    #[inline]
    pub fn calls_assigned(&self, index: usize) -> u32 {
        self.calls_assigned[index]
    }

    /// Lifetime weekend call count including this run so far.
    #[inline]
    pub fn weekend_calls(&self, index: usize) -> u32 {
        self.weekend_calls[index]
    }

    /// Smallest live weekend call count on the roster, `None` when empty.
    pub fn min_weekend_calls(&self) -> Option<u32> {
        self.weekend_calls.iter().copied().min()
    }

    /// Record a call for the surgeon at `index`.
    pub fn record(&mut self, index: usize, date: NaiveDate, is_weekend: bool) {
        self.last_assigned[index] = Some(date);
        // Counters arrive from the store unchecked; saturate rather than wrap
        self.calls_assigned[index] = self.calls_assigned[index].saturating_add(1);
        self.deltas[index].calls_assigned += 1;
        if is_weekend {
            self.weekend_calls[index] = self.weekend_calls[index].saturating_add(1);
            self.deltas[index].weekend_calls += 1;
        }
    }

    /// Counter increments keyed by surgeon id, omitting surgeons with no calls.
    pub fn counter_deltas(&self, roster: &Roster) -> HashMap<SurgeonId, CounterDelta> {
        roster
            .surgeons()
            .iter()
            .zip(&self.deltas)
            .filter(|(_, delta)| delta.calls_assigned > 0)
            .map(|(surgeon, delta)| (surgeon.id, *delta))
            .collect()
    }
}
