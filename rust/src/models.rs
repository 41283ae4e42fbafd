//! Core data types for on-call scheduling.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::HashMap;

// Note: We use std HashMap here for PyO3 interface compatibility

/// Surgeon identifier, as assigned by the roster store.
pub type SurgeonId = i64;

/// A surgeon on the roster with cumulative call counters.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surgeon {
    #[pyo3(get, set)]
    pub id: SurgeonId,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub specialization: String,
    #[pyo3(get, set)]
    pub contact: Option<String>,
    /// Seniority level, copied onto every assignment record.
    #[pyo3(get, set)]
    pub level: String,
    /// Lifetime total of call assignments.
    #[pyo3(get, set)]
    pub calls_assigned: u32,
    /// Lifetime total of weekend call assignments.
    #[pyo3(get, set)]
    pub weekend_calls: u32,
}

impl Surgeon {
    /// Create a surgeon with zeroed counters.
    pub fn with_level(id: SurgeonId, name: &str, level: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            specialization: String::new(),
            contact: None,
            level: level.to_string(),
            calls_assigned: 0,
            weekend_calls: 0,
        }
    }
}

#[pymethods]
impl Surgeon {
    #[new]
    #[pyo3(signature = (
        id,
        name,
        level,
        specialization=String::new(),
        contact=None,
        calls_assigned=0,
        weekend_calls=0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: SurgeonId,
        name: String,
        level: String,
        specialization: String,
        contact: Option<String>,
        calls_assigned: u32,
        weekend_calls: u32,
    ) -> Self {
        Self {
            id,
            name,
            specialization,
            contact,
            level,
            calls_assigned,
            weekend_calls,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Surgeon(id={}, name={:?}, level={:?}, calls={}, weekend_calls={})",
            self.id, self.name, self.level, self.calls_assigned, self.weekend_calls
        )
    }
}

/// A single date on which a surgeon cannot take call.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnavailabilityEntry {
    #[pyo3(get, set)]
    pub surgeon_id: SurgeonId,
    #[pyo3(get, set)]
    pub date: NaiveDate,
}

#[pymethods]
impl UnavailabilityEntry {
    #[new]
    pub fn new(surgeon_id: SurgeonId, date: NaiveDate) -> Self {
        Self { surgeon_id, date }
    }

    fn __repr__(&self) -> String {
        format!(
            "UnavailabilityEntry(surgeon_id={}, date={})",
            self.surgeon_id, self.date
        )
    }
}

/// One call duty assigned to a surgeon.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentRecord {
    #[pyo3(get, set)]
    pub surgeon_id: SurgeonId,
    #[pyo3(get, set)]
    pub date: NaiveDate,
    #[pyo3(get, set)]
    pub level: String,
}

#[pymethods]
impl AssignmentRecord {
    #[new]
    fn new(surgeon_id: SurgeonId, date: NaiveDate, level: String) -> Self {
        Self {
            surgeon_id,
            date,
            level,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AssignmentRecord(surgeon_id={}, date={}, level={:?})",
            self.surgeon_id, self.date, self.level
        )
    }
}

/// Counter increments produced for one surgeon by a run.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterDelta {
    #[pyo3(get, set)]
    pub calls_assigned: u32,
    #[pyo3(get, set)]
    pub weekend_calls: u32,
}

impl CounterDelta {
    /// Add these increments onto a surgeon's lifetime counters.
    pub fn apply(&self, surgeon: &mut Surgeon) {
        surgeon.calls_assigned = surgeon.calls_assigned.saturating_add(self.calls_assigned);
        surgeon.weekend_calls = surgeon.weekend_calls.saturating_add(self.weekend_calls);
    }
}

#[pymethods]
impl CounterDelta {
    #[new]
    #[pyo3(signature = (calls_assigned=0, weekend_calls=0))]
    fn new(calls_assigned: u32, weekend_calls: u32) -> Self {
        Self {
            calls_assigned,
            weekend_calls,
        }
    }

    /// Return a copy of `surgeon` with these increments applied.
    fn applied_to(&self, surgeon: Surgeon) -> Surgeon {
        let mut updated = surgeon;
        self.apply(&mut updated);
        updated
    }

    fn __repr__(&self) -> String {
        format!(
            "CounterDelta(calls_assigned={}, weekend_calls={})",
            self.calls_assigned, self.weekend_calls
        )
    }
}

/// Output of one scheduling run.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    /// Assignments in ascending date order.
    #[pyo3(get, set)]
    pub assignments: Vec<AssignmentRecord>,
    /// Increments for every surgeon who received at least one call.
    #[pyo3(get, set)]
    pub counter_deltas: HashMap<SurgeonId, CounterDelta>,
    /// Dates no surgeon was eligible for, ascending.
    #[pyo3(get, set)]
    pub gaps: Vec<NaiveDate>,
    #[pyo3(get, set)]
    pub metadata: HashMap<String, String>,
}

impl ScheduleResult {
    /// Assignments belonging to one surgeon, in date order.
    pub fn dates_for(&self, surgeon_id: SurgeonId) -> Vec<NaiveDate> {
        self.assignments
            .iter()
            .filter(|a| a.surgeon_id == surgeon_id)
            .map(|a| a.date)
            .collect()
    }
}

#[pymethods]
impl ScheduleResult {
    /// Apply the run's counter deltas to a roster listing.
    ///
    /// Surgeons without a delta are returned unchanged.
    pub fn apply_deltas(&self, surgeons: Vec<Surgeon>) -> Vec<Surgeon> {
        surgeons
            .into_iter()
            .map(|mut s| {
                if let Some(delta) = self.counter_deltas.get(&s.id) {
                    delta.apply(&mut s);
                }
                s
            })
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(assignments={}, gaps={}, surgeons_assigned={})",
            self.assignments.len(),
            self.gaps.len(),
            self.counter_deltas.len()
        )
    }
}
