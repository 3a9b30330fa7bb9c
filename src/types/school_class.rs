use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single class (e.g. "7a") or, in future Sek-II extension, a course.
/// `curriculum` maps subject name to required weekly hours; entries with
/// `hours == 0` are not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: String,
    pub grade: u32,
    pub label: String,
    pub curriculum: BTreeMap<String, u32>,
    /// Last usable period of the day for this class.
    pub max_period: u32,
    pub home_room: Option<String>,
}

impl SchoolClass {
    pub fn new(
        id: impl Into<String>,
        grade: u32,
        label: impl Into<String>,
        curriculum: BTreeMap<String, u32>,
        max_period: u32,
        home_room: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            grade,
            label: label.into(),
            curriculum: curriculum.into_iter().filter(|(_, h)| *h > 0).collect(),
            max_period,
            home_room,
        }
    }

    pub fn total_weekly_hours(&self) -> u32 {
        self.curriculum.values().sum()
    }
}
