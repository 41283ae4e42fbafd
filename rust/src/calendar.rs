//! Weekend classification and date-range iteration.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::params::ValidationError;

/// Weekdays treated as weekend duty, in Python numbering (Monday = 0).
///
/// Friday counts as a weekend day for call purposes.
pub const DEFAULT_WEEKEND_DAYS: [u32; 3] = [4, 5, 6];

/// Set of weekdays that count as weekend call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekendCalendar {
    /// Indexed by `Weekday::num_days_from_monday()`.
    days: [bool; 7],
}

impl WeekendCalendar {
    /// Build from Python-style weekday numbers (Monday = 0 .. Sunday = 6).
    pub fn from_weekday_numbers(numbers: &[u32]) -> Result<Self, ValidationError> {
        let mut days = [false; 7];
        for &n in numbers {
            if n > 6 {
                return Err(ValidationError::InvalidWeekday(n));
            }
            days[n as usize] = true;
        }
        Ok(Self { days })
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.days[weekday.num_days_from_monday() as usize]
    }
}

impl Default for WeekendCalendar {
    fn default() -> Self {
        let mut days = [false; 7];
        for n in DEFAULT_WEEKEND_DAYS {
            days[n as usize] = true;
        }
        Self { days }
    }
}

/// Iterate `start..=end` one day at a time. Empty if `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Number of days in the inclusive range, zero when inverted.
pub fn range_len(start: NaiveDate, end: NaiveDate) -> usize {
    let days = (end - start).num_days();
    if days < 0 {
        0
    } else {
        days as usize + 1
    }
}

/// `date + days`, saturating at the calendar's upper bound.
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_default_weekend_is_fri_sat_sun() {
        let cal = WeekendCalendar::default();
        // 2025-01-06 is a Monday
        let flags: Vec<bool> = date_range(d(2025, 1, 6), d(2025, 1, 12))
            .map(|day| cal.is_weekend(day))
            .collect();
        assert_eq!(flags, vec![false, false, false, false, true, true, true]);
    }

    #[test]
    fn test_custom_weekend_days() {
        let cal = WeekendCalendar::from_weekday_numbers(&[5, 6]).unwrap();
        assert!(!cal.contains(Weekday::Fri));
        assert!(cal.contains(Weekday::Sat));
        assert!(cal.contains(Weekday::Sun));
    }

    #[test]
    fn test_invalid_weekday_number() {
        assert_eq!(
            WeekendCalendar::from_weekday_numbers(&[4, 7]),
            Err(ValidationError::InvalidWeekday(7))
        );
    }

    #[test]
    fn test_date_range_inclusive() {
        let days: Vec<NaiveDate> = date_range(d(2024, 2, 28), d(2024, 3, 1)).collect();
        assert_eq!(days, vec![d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)]);
        assert_eq!(range_len(d(2024, 2, 28), d(2024, 3, 1)), 3);
    }

    #[test]
    fn test_single_day_and_inverted_range() {
        assert_eq!(date_range(d(2025, 1, 1), d(2025, 1, 1)).count(), 1);
        assert_eq!(date_range(d(2025, 1, 2), d(2025, 1, 1)).count(), 0);
        assert_eq!(range_len(d(2025, 1, 2), d(2025, 1, 1)), 0);
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(d(2025, 1, 31), 30), d(2025, 3, 2));
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }
}
