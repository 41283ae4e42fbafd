//! Roster store capability and the load -> generate -> commit service.

use std::collections::HashMap;
use thiserror::Error;

use crate::config::SchedulingConfig;
use crate::log_changes;
use crate::models::{
    AssignmentRecord, CounterDelta, ScheduleResult, Surgeon, SurgeonId, UnavailabilityEntry,
};
use crate::params::{ScheduleParameters, ValidationError};
use crate::roster::Roster;
use crate::scheduler::generate;

/// Errors reported by a roster store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unknown surgeon: {0}")]
    UnknownSurgeon(SurgeonId),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors from a full scheduling run against a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Source of roster snapshots and sink for generated schedules.
pub trait RosterStore {
    /// Surgeons in listing order, with their current counters.
    fn load_roster(&self) -> Result<Vec<Surgeon>, StoreError>;

    fn load_unavailability(&self) -> Result<Vec<UnavailabilityEntry>, StoreError>;

    /// Persist new call rows and add the counter deltas to the stored surgeons.
    fn commit(
        &mut self,
        assignments: &[AssignmentRecord],
        counter_deltas: &HashMap<SurgeonId, CounterDelta>,
    ) -> Result<(), StoreError>;
}

/// Store backed by plain vectors. Useful for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRosterStore {
    surgeons: Vec<Surgeon>,
    unavailability: Vec<UnavailabilityEntry>,
    call_schedule: Vec<AssignmentRecord>,
}

impl InMemoryRosterStore {
    pub fn new(surgeons: Vec<Surgeon>, unavailability: Vec<UnavailabilityEntry>) -> Self {
        Self {
            surgeons,
            unavailability,
            call_schedule: Vec::new(),
        }
    }

    pub fn surgeons(&self) -> &[Surgeon] {
        &self.surgeons
    }

    pub fn surgeon(&self, id: SurgeonId) -> Option<&Surgeon> {
        self.surgeons.iter().find(|s| s.id == id)
    }

    /// Every committed call row, in commit order.
    pub fn call_schedule(&self) -> &[AssignmentRecord] {
        &self.call_schedule
    }

    fn position(&self, id: SurgeonId) -> Result<usize, StoreError> {
        self.surgeons
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::UnknownSurgeon(id))
    }
}

impl RosterStore for InMemoryRosterStore {
    fn load_roster(&self) -> Result<Vec<Surgeon>, StoreError> {
        Ok(self.surgeons.clone())
    }

    fn load_unavailability(&self) -> Result<Vec<UnavailabilityEntry>, StoreError> {
        Ok(self.unavailability.clone())
    }

    fn commit(
        &mut self,
        assignments: &[AssignmentRecord],
        counter_deltas: &HashMap<SurgeonId, CounterDelta>,
    ) -> Result<(), StoreError> {
        // Resolve everything before the first write so a bad commit changes nothing
        for record in assignments {
            self.position(record.surgeon_id)?;
        }
        let targets = counter_deltas
            .iter()
            .map(|(id, delta)| self.position(*id).map(|index| (index, *delta)))
            .collect::<Result<Vec<_>, StoreError>>()?;

        self.call_schedule.extend_from_slice(assignments);
        for (index, delta) in targets {
            delta.apply(&mut self.surgeons[index]);
        }
        Ok(())
    }
}

/// Load a snapshot from `store`, run the assignment pass, and commit the result.
///
/// Nothing is committed when validation fails.
pub fn run_schedule<S: RosterStore + ?Sized>(
    store: &mut S,
    params: ScheduleParameters,
    config: &SchedulingConfig,
) -> Result<ScheduleResult, RunError> {
    let surgeons = store.load_roster()?;
    let entries = store.load_unavailability()?;
    let roster = Roster::new(surgeons, &entries)?;

    let result = generate(&roster, params, config)?;
    store.commit(&result.assignments, &result.counter_deltas)?;

    log_changes!(
        config.verbosity,
        "Committed {} call(s), {} gap(s)",
        result.assignments.len(),
        result.gaps.len()
    );
    Ok(result)
}
