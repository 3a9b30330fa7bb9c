//! C3: enumerates legal (day, period) positions once and hands every
//! downstream component the same canonical ordering, so variable indices
//! and constraint posting never re-derive it independently.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::TimeGrid;

/// A single Sek-I period, already filtered and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period {
    pub day: u32,
    pub slot: u32,
}

/// Precomputed view over a [`TimeGrid`]: the enumerable period set, the
/// legal double-period starts, and the total order used as a stable
/// canonical index everywhere a `(day, slot)` pair needs one.
#[derive(Debug, Clone)]
pub struct SlotIndex {
    /// All Sek-I periods, ordered day-major then period-minor.
    pub periods: Vec<Period>,
    /// `period → canonical rank`, the inverse of `periods`.
    rank: BTreeMap<(u32, u32), usize>,
    /// Legal double-period start slots (the `first` of each block whose
    /// `second` is still within Sek-I range).
    pub double_starts: BTreeSet<u32>,
    /// `first -> second` for every legal double block.
    pub double_pair: BTreeMap<u32, u32>,
    /// Periods that are neither the start nor the second half of any
    /// double block.
    pub single_only: BTreeSet<u32>,
    pub days_per_week: u32,
    pub sek1_max_slot: u32,
}

impl SlotIndex {
    pub fn build(grid: &TimeGrid) -> Self {
        let sek1_slots: BTreeSet<u32> = grid
            .lesson_slots
            .iter()
            .filter(|s| s.slot_number <= grid.sek1_max_slot && !s.is_sek2_only)
            .map(|s| s.slot_number)
            .collect();

        let mut periods = Vec::new();
        for day in 0..grid.days_per_week {
            for &slot in &sek1_slots {
                periods.push(Period { day, slot });
            }
        }

        let rank = periods
            .iter()
            .enumerate()
            .map(|(i, p)| ((p.day, p.slot), i))
            .collect();

        let double_pair: BTreeMap<u32, u32> = grid
            .double_blocks
            .iter()
            .filter(|b| b.second <= grid.sek1_max_slot)
            .map(|b| (b.first, b.second))
            .collect();

        let double_starts: BTreeSet<u32> = double_pair.keys().copied().collect();
        let double_seconds: BTreeSet<u32> = double_pair.values().copied().collect();

        let single_only: BTreeSet<u32> = sek1_slots
            .iter()
            .filter(|s| !double_starts.contains(s) && !double_seconds.contains(s))
            .copied()
            .collect();

        Self {
            periods,
            rank,
            double_starts,
            double_pair,
            single_only,
            days_per_week: grid.days_per_week,
            sek1_max_slot: grid.sek1_max_slot,
        }
    }

    /// Canonical rank of a (day, slot) pair, if it is a legal Sek-I period.
    pub fn rank_of(&self, day: u32, slot: u32) -> Option<usize> {
        self.rank.get(&(day, slot)).copied()
    }

    pub fn is_double_start(&self, slot: u32) -> bool {
        self.double_starts.contains(&slot)
    }

    pub fn second_of(&self, first: u32) -> Option<u32> {
        self.double_pair.get(&first).copied()
    }

    pub fn periods_of_day(&self, day: u32) -> impl Iterator<Item = &Period> {
        self.periods.iter().filter(move |p| p.day == day)
    }

    pub fn total_periods(&self) -> u32 {
        self.periods.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DoubleBlock, LessonSlot, Pause};

    fn grid() -> TimeGrid {
        TimeGrid::new(
            5,
            vec!["Mo".into(), "Di".into(), "Mi".into(), "Do".into(), "Fr".into()],
            (1..=8)
                .map(|n| LessonSlot {
                    slot_number: n,
                    start_time: "00:00".into(),
                    end_time: "00:00".into(),
                    is_sek2_only: n == 8,
                })
                .collect(),
            vec![Pause { after_slot: 2, duration_minutes: 20, label: "".into() }],
            vec![
                DoubleBlock { first: 1, second: 2 },
                DoubleBlock { first: 3, second: 4 },
            ],
            7,
            5,
        )
        .unwrap()
    }

    #[test]
    fn excludes_sek2_only_and_out_of_range_slots() {
        let idx = SlotIndex::build(&grid());
        assert_eq!(idx.periods.len(), 5 * 7);
        assert!(idx.rank_of(0, 8).is_none());
    }

    #[test]
    fn single_only_excludes_double_halves() {
        let idx = SlotIndex::build(&grid());
        assert!(!idx.single_only.contains(&1));
        assert!(!idx.single_only.contains(&2));
        assert!(idx.single_only.contains(&5));
        assert!(idx.single_only.contains(&6));
        assert!(idx.single_only.contains(&7));
    }

    #[test]
    fn double_starts_match_blocks() {
        let idx = SlotIndex::build(&grid());
        assert_eq!(idx.double_starts, BTreeSet::from([1, 3]));
        assert_eq!(idx.second_of(1), Some(2));
    }
}
