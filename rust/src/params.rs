//! Validated run parameters and parsing of the form-encoded inputs.

use chrono::{Local, NaiveDate};
use pyo3::prelude::*;
use thiserror::Error;

use crate::calendar::add_days;
use crate::models::{SurgeonId, UnavailabilityEntry};

/// Date format used by every date field of the web forms.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum spacing when the form omits it.
pub const DEFAULT_MIN_SPACING: i64 = 3;

/// Length of the default range when the form omits `end_date`.
pub const DEFAULT_RANGE_DAYS: u64 = 30;

/// Errors raised before a scheduling pass starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date {value:?} for {field}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("Invalid min_spacing {0:?}: expected an integer")]
    InvalidSpacing(String),
    #[error("min_spacing must be non-negative, got {0}")]
    NegativeSpacing(i64),
    #[error("start_date {start} is after end_date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("Surgeon {0} appears more than once in the roster")]
    DuplicateSurgeon(SurgeonId),
    #[error("Unknown selection strategy: {0}")]
    UnknownStrategy(String),
    #[error("Unknown weekend rule: {0}")]
    UnknownWeekendRule(String),
    #[error("Invalid weekday number {0}: expected 0 (Monday) to 6 (Sunday)")]
    InvalidWeekday(u32),
}

impl From<ValidationError> for PyErr {
    fn from(err: ValidationError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Parameters of one scheduling run.
///
/// Only constructible through validating constructors, so `start_date <= end_date`
/// and `min_spacing >= 0` always hold.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleParameters {
    #[pyo3(get)]
    pub(crate) start_date: NaiveDate,
    #[pyo3(get)]
    pub(crate) end_date: NaiveDate,
    /// Days of rest required between two calls of the same surgeon.
    #[pyo3(get)]
    pub(crate) min_spacing: i64,
    #[pyo3(get)]
    pub(crate) balance_weekends: bool,
}

impl ScheduleParameters {
    pub fn try_new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        min_spacing: i64,
        balance_weekends: bool,
    ) -> Result<Self, ValidationError> {
        if start_date > end_date {
            return Err(ValidationError::InvertedRange {
                start: start_date,
                end: end_date,
            });
        }
        if min_spacing < 0 {
            return Err(ValidationError::NegativeSpacing(min_spacing));
        }
        Ok(Self {
            start_date,
            end_date,
            min_spacing,
            balance_weekends,
        })
    }

    /// Parse the schedule form fields, applying the form's defaults.
    ///
    /// - `start_date`: today
    /// - `end_date`: today + 30 days
    /// - `min_spacing`: 3
    /// - `balance_weekends`: true only for `"true"` (any case)
    pub fn from_form(
        start_date: Option<&str>,
        end_date: Option<&str>,
        min_spacing: Option<&str>,
        balance_weekends: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let start = match start_date {
            Some(raw) => parse_date("start_date", raw)?,
            None => today,
        };
        let end = match end_date {
            Some(raw) => parse_date("end_date", raw)?,
            None => add_days(today, DEFAULT_RANGE_DAYS),
        };
        let spacing = match min_spacing {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidSpacing(raw.to_string()))?,
            None => DEFAULT_MIN_SPACING,
        };
        let balance = balance_weekends
            .map(|raw| raw.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self::try_new(start, end, spacing, balance)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn min_spacing(&self) -> i64 {
        self.min_spacing
    }

    pub fn balance_weekends(&self) -> bool {
        self.balance_weekends
    }

    /// Number of dates covered by the run.
    pub fn num_days(&self) -> usize {
        crate::calendar::range_len(self.start_date, self.end_date)
    }
}

#[pymethods]
impl ScheduleParameters {
    #[new]
    #[pyo3(signature = (start_date, end_date, min_spacing=DEFAULT_MIN_SPACING, balance_weekends=false))]
    fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        min_spacing: i64,
        balance_weekends: bool,
    ) -> PyResult<Self> {
        Ok(Self::try_new(
            start_date,
            end_date,
            min_spacing,
            balance_weekends,
        )?)
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleParameters(start_date={}, end_date={}, min_spacing={}, balance_weekends={})",
            self.start_date, self.end_date, self.min_spacing, self.balance_weekends
        )
    }
}

/// Parse a single `YYYY-MM-DD` form value. Surrounding whitespace is rejected.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        }
    })
}

/// Turn the multi-value `dates` form field into unavailability entries.
///
/// Fails on the first malformed date; nothing is returned for a partial list.
pub fn parse_unavailability<S: AsRef<str>>(
    surgeon_id: SurgeonId,
    dates: &[S],
) -> Result<Vec<UnavailabilityEntry>, ValidationError> {
    dates
        .iter()
        .map(|raw| {
            parse_date("dates", raw.as_ref())
                .map(|date| UnavailabilityEntry::new(surgeon_id, date))
        })
        .collect()
}

/// Today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_form_defaults() {
        let today = d(2025, 3, 10);
        let params = ScheduleParameters::from_form(None, None, None, None, today).unwrap();

        assert_eq!(params.start_date, today);
        assert_eq!(params.end_date, d(2025, 4, 9));
        assert_eq!(params.min_spacing, 3);
        assert!(!params.balance_weekends);
        assert_eq!(params.num_days(), 31);
    }

    #[test]
    fn test_form_explicit_values() {
        let params = ScheduleParameters::from_form(
            Some("2025-01-06"),
            Some("2025-01-10"),
            Some(" 2 "),
            Some("TRUE"),
            d(2000, 1, 1),
        )
        .unwrap();

        assert_eq!(params.start_date, d(2025, 1, 6));
        assert_eq!(params.end_date, d(2025, 1, 10));
        assert_eq!(params.min_spacing, 2);
        assert!(params.balance_weekends);
    }

    #[test]
    fn test_balance_weekends_only_literal_true() {
        let today = d(2025, 1, 1);
        for raw in ["yes", "1", "on", "", "truthy"] {
            let params =
                ScheduleParameters::from_form(None, None, None, Some(raw), today).unwrap();
            assert!(!params.balance_weekends, "{raw:?} should not enable balancing");
        }
        let params = ScheduleParameters::from_form(None, None, None, Some("True"), today).unwrap();
        assert!(params.balance_weekends);
    }

    #[test]
    fn test_malformed_date() {
        let err = ScheduleParameters::from_form(
            Some("06/01/2025"),
            None,
            None,
            None,
            d(2025, 1, 1),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidDate {
                field: "start_date",
                value: "06/01/2025".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_date_is_rejected() {
        let err =
            ScheduleParameters::from_form(None, Some(""), None, None, d(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "end_date", .. }));
    }

    #[test]
    fn test_padded_date_is_rejected() {
        let err = ScheduleParameters::from_form(
            Some(" 2025-01-06"),
            None,
            None,
            None,
            d(2025, 1, 1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                field: "start_date",
                value: " 2025-01-06".to_string(),
            }
        );

        let err = parse_unavailability(7, &["2025-01-06\n"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "dates", .. }));
    }

    #[test]
    fn test_inverted_range() {
        let err = ScheduleParameters::try_new(d(2025, 1, 10), d(2025, 1, 9), 3, false).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvertedRange {
                start: d(2025, 1, 10),
                end: d(2025, 1, 9),
            }
        );
    }

    #[test]
    fn test_default_end_before_explicit_start() {
        // end defaults to today + 30, which can precede an explicit start
        let err = ScheduleParameters::from_form(
            Some("2025-06-01"),
            None,
            None,
            None,
            d(2025, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
    }

    #[test]
    fn test_spacing_validation() {
        let today = d(2025, 1, 1);
        assert_eq!(
            ScheduleParameters::from_form(None, None, Some("-1"), None, today),
            Err(ValidationError::NegativeSpacing(-1))
        );
        assert_eq!(
            ScheduleParameters::from_form(None, None, Some("three"), None, today),
            Err(ValidationError::InvalidSpacing("three".to_string()))
        );
        assert!(ScheduleParameters::from_form(None, None, Some("0"), None, today).is_ok());
    }

    #[test]
    fn test_zero_length_range_is_valid() {
        let params = ScheduleParameters::try_new(d(2025, 1, 1), d(2025, 1, 1), 0, true).unwrap();
        assert_eq!(params.num_days(), 1);
    }

    #[test]
    fn test_parse_unavailability() {
        let entries = parse_unavailability(7, &["2025-01-06", "2025-01-06", "2025-01-09"]).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.surgeon_id == 7));
        assert_eq!(entries[2].date, d(2025, 1, 9));

        let err = parse_unavailability(7, &["2025-01-06", "soon"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "dates", .. }));
    }
}
