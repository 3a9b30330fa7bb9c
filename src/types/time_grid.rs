use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, bail};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonSlot {
    pub slot_number: u32,
    pub start_time: String,
    pub end_time: String,
    pub is_sek2_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pause {
    pub after_slot: u32,
    pub duration_minutes: u32,
    pub label: String,
}

/// A permitted double-period block. Construction of [`TimeGrid`] rejects
/// any block whose span crosses a pause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubleBlock {
    pub first: u32,
    pub second: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGrid {
    pub days_per_week: u32,
    pub day_names: Vec<String>,
    pub lesson_slots: Vec<LessonSlot>,
    pub pauses: Vec<Pause>,
    pub double_blocks: Vec<DoubleBlock>,
    pub sek1_max_slot: u32,
    pub min_hours_per_day: u32,
}

impl TimeGrid {
    pub fn new(
        days_per_week: u32,
        day_names: Vec<String>,
        lesson_slots: Vec<LessonSlot>,
        pauses: Vec<Pause>,
        double_blocks: Vec<DoubleBlock>,
        sek1_max_slot: u32,
        min_hours_per_day: u32,
    ) -> Result<Self> {
        if !(5..=6).contains(&days_per_week) {
            bail!("days_per_week must be 5 or 6, got {days_per_week}");
        }

        let slot_numbers: BTreeSet<u32> = lesson_slots.iter().map(|s| s.slot_number).collect();
        let pause_afters: BTreeSet<u32> = pauses.iter().map(|p| p.after_slot).collect();

        for db in &double_blocks {
            if !slot_numbers.contains(&db.first) {
                bail!("double block start {} does not exist in the grid", db.first);
            }
            if !slot_numbers.contains(&db.second) {
                bail!("double block end {} does not exist in the grid", db.second);
            }
            if db.second != db.first + 1 {
                bail!(
                    "double block {}-{} is not consecutive",
                    db.first,
                    db.second
                );
            }
            if pause_afters.contains(&db.first) {
                bail!(
                    "double block {}-{} would cross a pause",
                    db.first,
                    db.second
                );
            }
        }

        Ok(Self {
            days_per_week,
            day_names,
            lesson_slots,
            pauses,
            double_blocks,
            sek1_max_slot,
            min_hours_per_day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(numbers: &[u32]) -> Vec<LessonSlot> {
        numbers
            .iter()
            .map(|&n| LessonSlot {
                slot_number: n,
                start_time: "00:00".into(),
                end_time: "00:00".into(),
                is_sek2_only: false,
            })
            .collect()
    }

    #[test]
    fn rejects_double_block_crossing_a_pause() {
        let err = TimeGrid::new(
            5,
            vec!["Mo".into(), "Di".into(), "Mi".into(), "Do".into(), "Fr".into()],
            slots(&[1, 2, 3]),
            vec![Pause {
                after_slot: 2,
                duration_minutes: 20,
                label: "Pause".into(),
            }],
            vec![DoubleBlock { first: 2, second: 3 }],
            3,
            5,
        )
        .unwrap_err();
        assert!(err.to_string().contains("cross a pause"));
    }

    #[test]
    fn rejects_non_consecutive_block() {
        assert!(
            TimeGrid::new(
                5,
                vec!["Mo".into(), "Di".into(), "Mi".into(), "Do".into(), "Fr".into()],
                slots(&[1, 2, 3]),
                vec![],
                vec![DoubleBlock { first: 1, second: 3 }],
                3,
                5,
            )
            .is_err()
        );
    }

    #[test]
    fn accepts_valid_grid() {
        let grid = TimeGrid::new(
            5,
            vec!["Mo".into(), "Di".into(), "Mi".into(), "Do".into(), "Fr".into()],
            slots(&[1, 2, 3, 4, 5, 6, 7]),
            vec![
                Pause { after_slot: 2, duration_minutes: 20, label: "Pause".into() },
                Pause { after_slot: 4, duration_minutes: 15, label: "Pause".into() },
                Pause { after_slot: 6, duration_minutes: 20, label: "Mittagspause".into() },
            ],
            vec![
                DoubleBlock { first: 1, second: 2 },
                DoubleBlock { first: 3, second: 4 },
                DoubleBlock { first: 5, second: 6 },
            ],
            7,
            5,
        )
        .unwrap();
        assert_eq!(grid.double_blocks.len(), 3);
    }
}
