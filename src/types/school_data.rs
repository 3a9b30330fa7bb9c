use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::feasibility::FeasibilityReport;

use super::{Coupling, Room, SchoolClass, SolverConfig, Subject, Teacher, TimeGrid};

/// The complete, immutable input record for one solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolData {
    pub subjects: Vec<Subject>,
    pub rooms: Vec<Room>,
    pub classes: Vec<SchoolClass>,
    pub teachers: Vec<Teacher>,
    pub couplings: Vec<Coupling>,
    pub time_grid: TimeGrid,
    pub solver: SolverConfig,

    /// Populated at save time by the (out-of-scope) ingestion layer;
    /// `created_at` is preserved across re-saves, `modified_at` is bumped.
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}

impl SchoolData {
    pub fn new(
        subjects: Vec<Subject>,
        rooms: Vec<Room>,
        classes: Vec<SchoolClass>,
        teachers: Vec<Teacher>,
        couplings: Vec<Coupling>,
        time_grid: TimeGrid,
        solver: SolverConfig,
    ) -> Self {
        Self {
            subjects,
            rooms,
            classes,
            teachers,
            couplings,
            time_grid,
            solver,
            created_at: None,
            modified_at: None,
        }
    }

    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn summary(&self) -> String {
        let total_need: u32 = self.classes.iter().map(SchoolClass::total_weekly_hours).sum();
        let total_dep: u32 = self.teachers.iter().map(|t| t.deputat_max).sum();
        let parttime = self.teachers.iter().filter(|t| t.is_parttime).count();
        let grades = self
            .classes
            .iter()
            .map(|c| c.grade)
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        format!(
            "Klassen: {} ({grades} Jahrgänge)\n\
             Fächer: {}\n\
             Lehrkräfte: {} ({parttime} Teilzeit, {} Vollzeit)\n\
             Gesamtdeputat: {total_dep}h/Woche\n\
             Gesamtbedarf: {total_need}h/Woche\n\
             Räume: {}\n\
             Kopplungen: {}",
            self.classes.len(),
            self.subjects.len(),
            self.teachers.len(),
            self.teachers.len() - parttime,
            self.rooms.len(),
            self.couplings.len(),
        )
    }

    /// Cheap structural validation before solving.
    pub fn validate_feasibility(&self) -> FeasibilityReport {
        crate::feasibility::check(self)
    }

    /// Stamps `modified_at` with the current time, filling `created_at`
    /// only if this is the first save, then writes pretty JSON.
    pub fn save_json(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let now = chrono::Utc::now().to_rfc3339();
        self.created_at.get_or_insert_with(|| now.clone());
        self.modified_at = Some(now);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DoubleBlock, LessonSlot, Pause, TimeGrid};

    fn empty_grid() -> TimeGrid {
        TimeGrid::new(
            5,
            vec!["Mo".into(), "Di".into(), "Mi".into(), "Do".into(), "Fr".into()],
            (1..=7)
                .map(|n| LessonSlot {
                    slot_number: n,
                    start_time: "00:00".into(),
                    end_time: "00:00".into(),
                    is_sek2_only: false,
                })
                .collect(),
            vec![Pause { after_slot: 2, duration_minutes: 20, label: "".into() }],
            vec![DoubleBlock { first: 1, second: 2 }],
            7,
            5,
        )
        .unwrap()
    }

    fn empty_data() -> SchoolData {
        SchoolData::new(vec![], vec![], vec![], vec![], vec![], empty_grid(), SolverConfig::default())
    }

    #[test]
    fn save_then_load_round_trips_and_preserves_created_at() {
        let mut data = empty_data();
        assert!(data.created_at.is_none());

        let path = std::env::temp_dir().join(format!(
            "schulplan-core-test-{:?}.json",
            std::thread::current().id()
        ));

        data.save_json(&path).unwrap();
        let first_created = data.created_at.clone().unwrap();
        let first_modified = data.modified_at.clone().unwrap();

        data.save_json(&path).unwrap();
        assert_eq!(data.created_at.as_deref(), Some(first_created.as_str()));
        let second_modified = data.modified_at.clone().unwrap();
        assert_eq!(first_modified, second_modified); // same tick is fine; only created_at's stability is guaranteed

        let reloaded = SchoolData::load_json(&path).unwrap();
        assert_eq!(reloaded.created_at, data.created_at);
        assert_eq!(reloaded.subjects.len(), data.subjects.len());

        let _ = fs::remove_file(&path);
    }
}
