use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, bail};

/// A single teacher's qualifications, load bounds and availability.
///
/// Constructed only via [`Teacher::new`], which enforces the invariants
/// lists for this entity: `0 < deputat_min <= deputat_max`, and
/// the unavailable-slot count leaves enough room for `deputat_min` lessons
/// within `total_weekly_periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub subjects: BTreeSet<String>,
    pub deputat_max: u32,
    pub deputat_min: u32,
    pub is_parttime: bool,
    /// (day, period) pairs this teacher may never be scheduled in.
    pub unavailable: BTreeSet<(u32, u32)>,
    pub preferred_free_days: BTreeSet<u32>,
    pub max_hours_per_day: u32,
    pub max_gaps_per_day: u32,
    /// 0 = no hard weekly cap (left entirely to the soft objective).
    pub max_gaps_per_week: u32,
}

impl Teacher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subjects: BTreeSet<String>,
        deputat_min: u32,
        deputat_max: u32,
        is_parttime: bool,
        unavailable: BTreeSet<(u32, u32)>,
        preferred_free_days: BTreeSet<u32>,
        max_hours_per_day: u32,
        max_gaps_per_day: u32,
        max_gaps_per_week: u32,
        total_weekly_periods: u32,
    ) -> Result<Self> {
        if deputat_min == 0 {
            bail!("deputat_min must be > 0");
        }
        if deputat_min > deputat_max {
            bail!("deputat_min ({deputat_min}) > deputat_max ({deputat_max})");
        }
        if unavailable.len() as u32 + deputat_min > total_weekly_periods {
            bail!(
                "teacher has too few free slots for its deputat_min: \
                 {} unavailable + {deputat_min} required > {total_weekly_periods} total",
                unavailable.len()
            );
        }
        Ok(Self {
            id: id.into().to_uppercase(),
            name: name.into(),
            subjects,
            deputat_max,
            deputat_min,
            is_parttime,
            unavailable,
            preferred_free_days,
            max_hours_per_day,
            max_gaps_per_day,
            max_gaps_per_week,
        })
    }

    pub fn is_qualified_for(&self, subject: &str) -> bool {
        self.subjects.contains(subject)
    }

    pub fn is_unavailable(&self, day: u32, period: u32) -> bool {
        self.unavailable.contains(&(day, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_min_greater_than_max() {
        let err = Teacher::new(
            "abc",
            "Test",
            subjects(&["Mathematik"]),
            20,
            18,
            false,
            BTreeSet::new(),
            BTreeSet::new(),
            6,
            2,
            5,
            35,
        )
        .unwrap_err();
        assert!(err.to_string().contains("deputat_min"));
    }

    #[test]
    fn rejects_zero_min() {
        assert!(
            Teacher::new(
                "abc",
                "Test",
                subjects(&["Mathematik"]),
                0,
                10,
                false,
                BTreeSet::new(),
                BTreeSet::new(),
                6,
                2,
                5,
                35,
            )
            .is_err()
        );
    }

    #[test]
    fn normalizes_id_to_uppercase() {
        let t = Teacher::new(
            "mül",
            "Müller",
            subjects(&["Mathematik"]),
            10,
            20,
            false,
            BTreeSet::new(),
            BTreeSet::new(),
            6,
            2,
            5,
            35,
        )
        .unwrap();
        assert_eq!(t.id, "MÜL");
    }

    #[test]
    fn rejects_insufficient_available_slots() {
        let mut unavailable = BTreeSet::new();
        for d in 0..5 {
            for h in 1..=7 {
                unavailable.insert((d, h));
            }
        }
        // Only leave 3 free slots, ask for deputat_min=10.
        for (d, h) in unavailable.clone().into_iter().take(32) {
            let _ = (d, h);
        }
        let unavailable: BTreeSet<(u32, u32)> = unavailable.into_iter().take(33).collect();
        let err = Teacher::new(
            "abc",
            "Test",
            subjects(&["Mathematik"]),
            10,
            20,
            false,
            unavailable,
            BTreeSet::new(),
            6,
            2,
            5,
            35,
        )
        .unwrap_err();
        assert!(err.to_string().contains("too few free slots"));
    }
}
