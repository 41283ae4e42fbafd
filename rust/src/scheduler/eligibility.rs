//! Per-surgeon eligibility rules for a single call date.

use chrono::NaiveDate;
use std::fmt;

use crate::params::ValidationError;
use crate::roster::Roster;

use super::state::PassState;

pub const WEEKEND_RULE_STRICT: &str = "strict";
pub const WEEKEND_RULE_AT_MOST: &str = "at_most";

/// Comparison between a surgeon's weekend calls and the live roster minimum.
///
/// `Strict` admits only surgeons below the minimum. Nobody is below the
/// minimum, so every balanced weekend date ends up a gap. `AtMost` admits the
/// surgeons holding the minimum, which hands weekends to whoever is behind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeekendRule {
    #[default]
    Strict,
    AtMost,
}

impl WeekendRule {
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        match name {
            WEEKEND_RULE_STRICT => Ok(Self::Strict),
            WEEKEND_RULE_AT_MOST => Ok(Self::AtMost),
            other => Err(ValidationError::UnknownWeekendRule(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => WEEKEND_RULE_STRICT,
            Self::AtMost => WEEKEND_RULE_AT_MOST,
        }
    }

    #[inline]
    pub fn admits(self, weekend_calls: u32, roster_minimum: u32) -> bool {
        match self {
            Self::Strict => weekend_calls < roster_minimum,
            Self::AtMost => weekend_calls <= roster_minimum,
        }
    }
}

/// Facts about the date being filled, fixed for the whole roster scan.
#[derive(Clone, Copy, Debug)]
pub struct DayContext {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub min_spacing: i64,
    /// Live roster minimum of weekend calls; `Some` only on weekend dates
    /// with weekend balancing enabled.
    pub weekend_minimum: Option<u32>,
    pub weekend_rule: WeekendRule,
}

/// Why a surgeon cannot take a given date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ineligibility {
    /// Last call in this run is closer than the minimum spacing.
    TooSoon { last: NaiveDate, days_since: i64 },
    /// Date is in the surgeon's unavailability set.
    Unavailable,
    /// Weekend calls fail the weekend rule against the roster minimum.
    WeekendQuota {
        weekend_calls: u32,
        roster_minimum: u32,
        rule: WeekendRule,
    },
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSoon { last, days_since } => {
                write!(f, "last call {} was {} day(s) ago", last, days_since)
            }
            Self::Unavailable => write!(f, "marked unavailable"),
            Self::WeekendQuota {
                weekend_calls,
                roster_minimum,
                rule: WeekendRule::Strict,
            } => write!(
                f,
                "{} weekend calls is not below roster minimum {}",
                weekend_calls, roster_minimum
            ),
            Self::WeekendQuota {
                weekend_calls,
                roster_minimum,
                rule: WeekendRule::AtMost,
            } => write!(
                f,
                "{} weekend calls is above roster minimum {}",
                weekend_calls, roster_minimum
            ),
        }
    }
}

/// Check whether the surgeon at roster position `index` may take `day.date`.
///
/// Rules are checked in order: spacing, unavailability, weekend balance. The
/// first failing rule is reported.
pub fn check_eligibility(
    roster: &Roster,
    state: &PassState,
    index: usize,
    day: &DayContext,
) -> Result<(), Ineligibility> {
    if let Some(last) = state.last_assigned(index) {
        let days_since = (day.date - last).num_days();
        if days_since < day.min_spacing {
            return Err(Ineligibility::TooSoon { last, days_since });
        }
    }

    if roster.is_unavailable(index, day.date) {
        return Err(Ineligibility::Unavailable);
    }

    if let Some(roster_minimum) = day.weekend_minimum {
        let weekend_calls = state.weekend_calls(index);
        if !day.weekend_rule.admits(weekend_calls, roster_minimum) {
            return Err(Ineligibility::WeekendQuota {
                weekend_calls,
                roster_minimum,
                rule: day.weekend_rule,
            });
        }
    }

    Ok(())
}
