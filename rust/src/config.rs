//! Configuration types for the scheduling engine.

use pyo3::prelude::*;

use crate::calendar::{WeekendCalendar, DEFAULT_WEEKEND_DAYS};
use crate::params::ValidationError;
use crate::scheduler::{WeekendRule, STRATEGY_FIRST_ELIGIBLE, WEEKEND_RULE_STRICT};

/// Engine settings that are not part of a run's business parameters.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    /// Selection strategy: "first_eligible" or "least_loaded"
    #[pyo3(get, set)]
    pub strategy: String,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Weekend weekdays, Monday = 0 .. Sunday = 6
    #[pyo3(get, set)]
    pub weekend_days: Vec<u32>,
    /// Weekend balancing rule: "strict" (below the roster minimum) or
    /// "at_most" (at or below it)
    #[pyo3(get, set)]
    pub weekend_rule: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            strategy: STRATEGY_FIRST_ELIGIBLE.to_string(),
            verbosity: 0,
            weekend_days: DEFAULT_WEEKEND_DAYS.to_vec(),
            weekend_rule: WEEKEND_RULE_STRICT.to_string(),
        }
    }
}

impl SchedulingConfig {
    pub fn weekend_calendar(&self) -> Result<WeekendCalendar, ValidationError> {
        WeekendCalendar::from_weekday_numbers(&self.weekend_days)
    }

    pub fn weekend_rule(&self) -> Result<WeekendRule, ValidationError> {
        WeekendRule::from_name(&self.weekend_rule)
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (strategy=None, verbosity=None, weekend_days=None, weekend_rule=None))]
    fn new(
        strategy: Option<String>,
        verbosity: Option<u8>,
        weekend_days: Option<Vec<u32>>,
        weekend_rule: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            strategy: strategy.unwrap_or(defaults.strategy),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            weekend_days: weekend_days.unwrap_or(defaults.weekend_days),
            weekend_rule: weekend_rule.unwrap_or(defaults.weekend_rule),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(strategy={:?}, verbosity={}, weekend_days={:?}, weekend_rule={:?})",
            self.strategy, self.verbosity, self.weekend_days, self.weekend_rule
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_default_config() {
        let config = SchedulingConfig::default();
        assert_eq!(config.strategy, "first_eligible");
        assert_eq!(config.verbosity, 0);

        let cal = config.weekend_calendar().unwrap();
        assert!(cal.contains(Weekday::Fri));
        assert!(!cal.contains(Weekday::Thu));
        assert_eq!(config.weekend_rule(), Ok(WeekendRule::Strict));
    }

    #[test]
    fn test_bad_weekend_rule() {
        let config = SchedulingConfig {
            weekend_rule: "fair".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.weekend_rule(),
            Err(ValidationError::UnknownWeekendRule("fair".to_string()))
        );
    }

    #[test]
    fn test_bad_weekend_days() {
        let config = SchedulingConfig {
            weekend_days: vec![9],
            ..Default::default()
        };
        assert_eq!(
            config.weekend_calendar(),
            Err(ValidationError::InvalidWeekday(9))
        );
    }
}
