//! Rust implementation of the on-call scheduling core.
//!
//! Assigns call dates to a surgeon roster in one deterministic greedy pass,
//! honoring unavailability, minimum rest spacing, and optional weekend
//! balancing. Exposed to Python as the `oncall.rust` extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::{HashMap, HashSet};

pub mod calendar;
mod config;
pub mod logging;
mod models;
mod params;
mod roster;
pub mod scheduler;
pub mod store;

pub use calendar::WeekendCalendar;
pub use config::SchedulingConfig;
pub use models::{
    AssignmentRecord, CounterDelta, ScheduleResult, Surgeon, SurgeonId, UnavailabilityEntry,
};
pub use params::{local_today, parse_unavailability, ScheduleParameters, ValidationError};
pub use roster::Roster;
pub use scheduler::{generate, CallScheduler, SelectionStrategy, WeekendRule};
pub use store::{run_schedule, InMemoryRosterStore, RosterStore, RunError, StoreError};

/// Generate call assignments for a roster.
///
/// # Arguments
/// * `surgeons` - Roster in listing order; listing order breaks ties
/// * `unavailability` - Dict mapping surgeon id to a set of unavailable dates
/// * `params` - Validated run parameters
/// * `config` - Strategy, verbosity, weekend days and weekend rule (defaults if omitted)
///
/// # Returns
/// * ScheduleResult with assignments, counter deltas and gap dates
///
/// # Raises
/// * ValueError for duplicate surgeon ids, unknown strategy or weekend rule, bad weekend days
#[pyfunction]
#[pyo3(signature = (surgeons, unavailability, params, config=None))]
fn generate_schedule(
    surgeons: Vec<Surgeon>,
    unavailability: HashMap<SurgeonId, HashSet<NaiveDate>>,
    params: ScheduleParameters,
    config: Option<SchedulingConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    let roster = Roster::from_sets(surgeons, &unavailability)?;
    Ok(generate(&roster, params, &config)?)
}

/// Build ScheduleParameters from raw form values, applying the form defaults.
///
/// Missing values default to: start today, end today + 30 days, spacing 3,
/// no weekend balancing. `balance_weekends` is enabled only by "true" (any case).
///
/// # Raises
/// * ValueError for malformed dates or spacing, inverted ranges, negative spacing
#[pyfunction]
#[pyo3(signature = (
    start_date=None,
    end_date=None,
    min_spacing=None,
    balance_weekends=None,
    today=None
))]
fn parse_schedule_form(
    start_date: Option<String>,
    end_date: Option<String>,
    min_spacing: Option<String>,
    balance_weekends: Option<String>,
    today: Option<NaiveDate>,
) -> PyResult<ScheduleParameters> {
    Ok(ScheduleParameters::from_form(
        start_date.as_deref(),
        end_date.as_deref(),
        min_spacing.as_deref(),
        balance_weekends.as_deref(),
        today.unwrap_or_else(local_today),
    )?)
}

/// Parse the `dates` form list for one surgeon into unavailability entries.
///
/// # Raises
/// * ValueError on the first date not in YYYY-MM-DD form
#[pyfunction]
fn parse_unavailability_dates(
    surgeon_id: SurgeonId,
    dates: Vec<String>,
) -> PyResult<Vec<UnavailabilityEntry>> {
    Ok(parse_unavailability(surgeon_id, &dates)?)
}

/// The oncall.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Surgeon>()?;
    m.add_class::<UnavailabilityEntry>()?;
    m.add_class::<AssignmentRecord>()?;
    m.add_class::<CounterDelta>()?;
    m.add_class::<ScheduleResult>()?;

    // Parameters and config
    m.add_class::<ScheduleParameters>()?;
    m.add_class::<SchedulingConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(generate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(parse_schedule_form, m)?)?;
    m.add_function(wrap_pyfunction!(parse_unavailability_dates, m)?)?;

    Ok(())
}
