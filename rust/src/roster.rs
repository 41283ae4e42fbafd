//! Read-only roster snapshot for a scheduling run.

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{HashMap, HashSet};

use crate::models::{Surgeon, SurgeonId, UnavailabilityEntry};
use crate::params::ValidationError;

/// Surgeons in listing order, each with the set of dates they cannot take.
///
/// Listing order is the scan order of the assignment pass, so two snapshots
/// built from the same listing schedule identically.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    surgeons: Vec<Surgeon>,
    /// Parallel to `surgeons`.
    unavailable: Vec<FxHashSet<NaiveDate>>,
    /// Entries naming a surgeon not on the roster.
    ignored_entries: usize,
}

impl Roster {
    /// Build a snapshot from a roster listing and flat unavailability entries.
    ///
    /// Duplicate entries collapse; entries for unknown surgeons are counted and dropped.
    pub fn new(
        surgeons: Vec<Surgeon>,
        entries: &[UnavailabilityEntry],
    ) -> Result<Self, ValidationError> {
        let index = Self::index_surgeons(&surgeons)?;
        let mut unavailable = vec![FxHashSet::default(); surgeons.len()];
        let mut ignored_entries = 0;

        for entry in entries {
            match index.get(&entry.surgeon_id) {
                Some(&i) => {
                    unavailable[i].insert(entry.date);
                }
                None => ignored_entries += 1,
            }
        }

        Ok(Self {
            surgeons,
            unavailable,
            ignored_entries,
        })
    }

    /// Build a snapshot from a surgeon id -> date set mapping.
    pub fn from_sets(
        surgeons: Vec<Surgeon>,
        sets: &HashMap<SurgeonId, HashSet<NaiveDate>>,
    ) -> Result<Self, ValidationError> {
        let index = Self::index_surgeons(&surgeons)?;
        let mut unavailable = vec![FxHashSet::default(); surgeons.len()];
        let mut ignored_entries = 0;

        for (surgeon_id, dates) in sets {
            match index.get(surgeon_id) {
                Some(&i) => unavailable[i].extend(dates.iter().copied()),
                None => ignored_entries += dates.len(),
            }
        }

        Ok(Self {
            surgeons,
            unavailable,
            ignored_entries,
        })
    }

    fn index_surgeons(
        surgeons: &[Surgeon],
    ) -> Result<FxHashMap<SurgeonId, usize>, ValidationError> {
        let mut index: FxHashMap<SurgeonId, usize> =
            FxHashMap::with_capacity_and_hasher(surgeons.len(), Default::default());
        for (i, surgeon) in surgeons.iter().enumerate() {
            if index.insert(surgeon.id, i).is_some() {
                return Err(ValidationError::DuplicateSurgeon(surgeon.id));
            }
        }
        Ok(index)
    }

    #[inline]
    pub fn surgeons(&self) -> &[Surgeon] {
        &self.surgeons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.surgeons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.surgeons.is_empty()
    }

    /// Whether the surgeon at roster position `index` is unavailable on `date`.
    #[inline]
    pub fn is_unavailable(&self, index: usize, date: NaiveDate) -> bool {
        self.unavailable
            .get(index)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Unavailable dates of the surgeon at roster position `index`.
    pub fn unavailable_dates(&self, index: usize) -> Option<&FxHashSet<NaiveDate>> {
        self.unavailable.get(index)
    }

    pub fn ignored_entries(&self) -> usize {
        self.ignored_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn roster_listing() -> Vec<Surgeon> {
        vec![
            Surgeon::with_level(10, "Alice", "S"),
            Surgeon::with_level(20, "Bob", "J"),
        ]
    }

    #[test]
    fn test_entries_grouped_by_surgeon() {
        let entries = vec![
            UnavailabilityEntry::new(20, d(2025, 1, 7)),
            UnavailabilityEntry::new(20, d(2025, 1, 7)),
            UnavailabilityEntry::new(10, d(2025, 1, 9)),
        ];
        let roster = Roster::new(roster_listing(), &entries).unwrap();

        assert_eq!(roster.len(), 2);
        assert!(roster.is_unavailable(0, d(2025, 1, 9)));
        assert!(!roster.is_unavailable(0, d(2025, 1, 7)));
        assert!(roster.is_unavailable(1, d(2025, 1, 7)));
        assert_eq!(roster.unavailable_dates(1).map(|s| s.len()), Some(1));
        assert_eq!(roster.ignored_entries(), 0);
    }

    #[test]
    fn test_listing_order_preserved() {
        let roster = Roster::new(roster_listing(), &[]).unwrap();
        let ids: Vec<SurgeonId> = roster.surgeons().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_unknown_surgeon_entries_ignored() {
        let entries = vec![UnavailabilityEntry::new(99, d(2025, 1, 7))];
        let roster = Roster::new(roster_listing(), &entries).unwrap();
        assert_eq!(roster.ignored_entries(), 1);
        assert!(!roster.is_unavailable(0, d(2025, 1, 7)));
        assert!(!roster.is_unavailable(5, d(2025, 1, 7)));
    }

    #[test]
    fn test_duplicate_surgeon_rejected() {
        let mut listing = roster_listing();
        listing.push(Surgeon::with_level(10, "Alice again", "S"));
        let err = Roster::new(listing, &[]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateSurgeon(10));
    }

    #[test]
    fn test_from_sets() {
        let mut sets = HashMap::new();
        sets.insert(10, HashSet::from([d(2025, 1, 6), d(2025, 1, 8)]));
        sets.insert(77, HashSet::from([d(2025, 1, 6)]));
        let roster = Roster::from_sets(roster_listing(), &sets).unwrap();

        assert!(roster.is_unavailable(0, d(2025, 1, 8)));
        assert!(!roster.is_unavailable(1, d(2025, 1, 6)));
        assert_eq!(roster.ignored_entries(), 1);
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::new(Vec::new(), &[]).unwrap();
        assert!(roster.is_empty());
    }
}
