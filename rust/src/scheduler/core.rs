//! Core greedy call scheduler: one forward pass over the date range.

use std::collections::HashMap;

use crate::calendar::{date_range, WeekendCalendar};
use crate::config::SchedulingConfig;
use crate::logging::clamp_verbosity;
use crate::models::{AssignmentRecord, ScheduleResult};
use crate::params::{ScheduleParameters, ValidationError};
use crate::roster::Roster;
use crate::{log_changes, log_checks, log_debug};

use super::eligibility::{check_eligibility, DayContext, WeekendRule};
use super::selection::{strategy_by_name, SelectionStrategy};
use super::state::PassState;

const ALGORITHM_NAME: &str = "greedy_date_pass";

/// Date-major, roster-order-minor call scheduler.
///
/// All validation happens in the constructors; `schedule` cannot fail. A date
/// with no eligible surgeon becomes a gap in the result.
pub struct CallScheduler<'a> {
    roster: &'a Roster,
    params: ScheduleParameters,
    calendar: WeekendCalendar,
    strategy: Box<dyn SelectionStrategy>,
    weekend_rule: WeekendRule,
    verbosity: u8,
}

impl<'a> CallScheduler<'a> {
    /// Create a scheduler, resolving the strategy, weekend days and weekend rule
    /// from `config`.
    pub fn new(
        roster: &'a Roster,
        params: ScheduleParameters,
        config: &SchedulingConfig,
    ) -> Result<Self, ValidationError> {
        let strategy = strategy_by_name(&config.strategy)?;
        let calendar = config.weekend_calendar()?;
        let weekend_rule = config.weekend_rule()?;
        Ok(
            Self::with_strategy(roster, params, calendar, strategy, config.verbosity)
                .with_weekend_rule(weekend_rule),
        )
    }

    /// Create a scheduler with a caller-supplied selection strategy and the
    /// strict weekend rule.
    pub fn with_strategy(
        roster: &'a Roster,
        params: ScheduleParameters,
        calendar: WeekendCalendar,
        strategy: Box<dyn SelectionStrategy>,
        verbosity: u8,
    ) -> Self {
        Self {
            roster,
            params,
            calendar,
            strategy,
            weekend_rule: WeekendRule::default(),
            verbosity: clamp_verbosity(verbosity),
        }
    }

    pub fn with_weekend_rule(mut self, weekend_rule: WeekendRule) -> Self {
        self.weekend_rule = weekend_rule;
        self
    }

    /// Run the assignment pass.
    pub fn schedule(&self) -> ScheduleResult {
        let roster = self.roster;
        let params = &self.params;
        let verbosity = self.verbosity;

        let mut state = PassState::from_roster(roster);
        let mut assignments: Vec<AssignmentRecord> = Vec::new();
        let mut gaps = Vec::new();

        log_debug!(
            verbosity,
            "Scheduling {} surgeon(s) from {} to {} (min_spacing={}, balance_weekends={}, weekend_rule={}, strategy={})",
            roster.len(),
            params.start_date,
            params.end_date,
            params.min_spacing,
            params.balance_weekends,
            self.weekend_rule.name(),
            self.strategy.name()
        );
        if roster.ignored_entries() > 0 {
            log_debug!(
                verbosity,
                "  Ignored {} unavailability entries for surgeons not on the roster",
                roster.ignored_entries()
            );
        }

        for date in date_range(params.start_date, params.end_date) {
            let is_weekend = self.calendar.is_weekend(date);
            let weekend_minimum = if is_weekend && params.balance_weekends {
                state.min_weekend_calls()
            } else {
                None
            };
            let day = DayContext {
                date,
                is_weekend,
                min_spacing: params.min_spacing,
                weekend_minimum,
                weekend_rule: self.weekend_rule,
            };

            log_changes!(
                verbosity,
                "Date: {}{}",
                date,
                if is_weekend { " (weekend)" } else { "" }
            );
            if let Some(minimum) = weekend_minimum {
                log_debug!(verbosity, "  Roster weekend minimum: {}", minimum);
            }

            let chosen = {
                let state = &state;
                let mut eligible = (0..roster.len()).filter(|&index| {
                    match check_eligibility(roster, state, index, &day) {
                        Ok(()) => true,
                        Err(reason) => {
                            log_checks!(
                                verbosity,
                                "    Skipping {}: {}",
                                roster.surgeons()[index].name,
                                reason
                            );
                            false
                        }
                    }
                });
                self.strategy.select(&mut eligible, state)
            };

            match chosen {
                Some(index) => {
                    let surgeon = &roster.surgeons()[index];
                    state.record(index, date, is_weekend);
                    log_changes!(
                        verbosity,
                        "  Assigned {} (id={}, level={}) on {}",
                        surgeon.name,
                        surgeon.id,
                        surgeon.level,
                        date
                    );
                    assignments.push(AssignmentRecord {
                        surgeon_id: surgeon.id,
                        date,
                        level: surgeon.level.clone(),
                    });
                }
                None => {
                    log_changes!(verbosity, "  No eligible surgeon on {}, leaving a gap", date);
                    gaps.push(date);
                }
            }
        }

        let mut metadata = HashMap::new();
        metadata.insert("algorithm".to_string(), ALGORITHM_NAME.to_string());
        metadata.insert("strategy".to_string(), self.strategy.name().to_string());
        metadata.insert(
            "weekend_rule".to_string(),
            self.weekend_rule.name().to_string(),
        );
        metadata.insert("days".to_string(), params.num_days().to_string());
        metadata.insert("assigned".to_string(), assignments.len().to_string());
        metadata.insert("gaps".to_string(), gaps.len().to_string());

        ScheduleResult {
            counter_deltas: state.counter_deltas(roster),
            assignments,
            gaps,
            metadata,
        }
    }
}

/// Validate `config` and run one assignment pass over `roster`.
pub fn generate(
    roster: &Roster,
    params: ScheduleParameters,
    config: &SchedulingConfig,
) -> Result<ScheduleResult, ValidationError> {
    Ok(CallScheduler::new(roster, params, config)?.schedule())
}
