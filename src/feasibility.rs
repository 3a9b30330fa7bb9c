//! Cheap structural validation before a solve is attempted.
//!
//! Five checks, in order: global hour balance, per-teacher available-slot
//! margin, a Friday-cluster (or any-day) free-day-wish informational
//! warning, per-subject teacher capacity, per-special-room capacity, and
//! per-coupling-group teacher qualification.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::SchoolData;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeasibilityReport {
    pub is_feasible: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Subjects covered by at least one coupling, per class — these are
/// excluded from the direct per-subject teacher-capacity check because
/// their real per-teacher load is a fraction of the naive class-count
/// total.
fn coupling_covered_subjects(data: &SchoolData) -> BTreeSet<String> {
    let mut covered = BTreeSet::new();
    for coupling in &data.couplings {
        for s in coupling.covered_subjects() {
            covered.insert(s);
        }
    }
    covered
}

pub fn check(data: &SchoolData) -> FeasibilityReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let tg = &data.time_grid;
    let sek1_max = tg.sek1_max_slot;
    let days = tg.days_per_week;
    let total_slots_per_week = sek1_max * days;
    let double_blocks_per_day = tg
        .double_blocks
        .iter()
        .filter(|b| b.second <= sek1_max)
        .count() as u32;

    // ── 1. Global hour balance ──────────────────────────────────────────
    let total_deputat: u32 = data.teachers.iter().map(|t| t.deputat_max).sum();
    let total_need: u32 = data
        .classes
        .iter()
        .map(|c| c.total_weekly_hours())
        .sum();

    if total_need == 0 {
        warnings.push("No curriculum defined — feasibility cannot be checked.".into());
    } else if total_deputat < total_need {
        errors.push(format!(
            "Global balance: teacher capacity ({total_deputat}h) < total demand ({total_need}h). \
             Short by at least {}h. More teachers needed.",
            total_need - total_deputat
        ));
    } else if (total_deputat as f64) < (total_need as f64) * 1.05 {
        let buffer = (total_deputat as f64 / total_need as f64 - 1.0) * 100.0;
        warnings.push(format!(
            "Global balance very tight: {total_deputat}h capacity vs {total_need}h demand \
             (only {buffer:.1}% buffer — hard to build a timetable)."
        ));
    }

    // ── Per-teacher available slots ≥ deputat_min ───────────────────────
    for teacher in &data.teachers {
        let available = total_slots_per_week.saturating_sub(teacher.unavailable.len() as u32);
        if available < teacher.deputat_min {
            errors.push(format!(
                "Teacher {} ({}): only {available} available slots for deputat_min {}h. \
                 Reduce unavailability or lower deputat_min.",
                teacher.id, teacher.name, teacher.deputat_min
            ));
        } else if available - teacher.deputat_min < 2 {
            warnings.push(format!(
                "Teacher {}: very little slack — {available} slots for {}h deputat_min.",
                teacher.id, teacher.deputat_min
            ));
        }
    }

    // ── Free-day-wish cluster (informational) ───────────────────────────
    let mut wish_counts: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for teacher in &data.teachers {
        for &day in &teacher.preferred_free_days {
            wish_counts.entry(day).or_default().push(&teacher.id);
        }
    }
    for (day, ids) in wish_counts {
        if ids.len() >= 4 {
            let shown: Vec<&str> = ids.iter().take(6).copied().collect();
            let more = if ids.len() > 6 { "..." } else { "" };
            warnings.push(format!(
                "Day-{day} cluster: {} teachers want day {day} free ({}{more}) — \
                 initial timetable construction on that day will be difficult.",
                ids.len(),
                shown.join(", ")
            ));
        }
    }

    // ── Per-subject teacher capacity vs demand ──────────────────────────
    let coupling_covered = coupling_covered_subjects(data);

    let mut subject_need: BTreeMap<String, u32> = BTreeMap::new();
    for cls in &data.classes {
        for (subj, hours) in &cls.curriculum {
            if *hours > 0 {
                *subject_need.entry(subj.clone()).or_insert(0) += hours;
            }
        }
    }

    let mut subject_capacity: BTreeMap<String, u32> = BTreeMap::new();
    for teacher in &data.teachers {
        for subj in &teacher.subjects {
            *subject_capacity.entry(subj.clone()).or_insert(0) += teacher.deputat_max;
        }
    }

    for (subj_name, need) in &subject_need {
        if coupling_covered.contains(subj_name) {
            continue;
        }
        let cap = *subject_capacity.get(subj_name).unwrap_or(&0);
        if cap == 0 {
            errors.push(format!(
                "Subject '{subj_name}': no teacher available! ({need}h/week needed)"
            ));
        } else if (cap as f64) < (*need as f64) * 0.90 {
            errors.push(format!(
                "Subject '{subj_name}': teacher capacity ({cap}h) far below demand \
                 ({need}h, short {}h). Additional teacher needed.",
                need - cap
            ));
        } else if cap < *need {
            warnings.push(format!(
                "Subject '{subj_name}': capacity ({cap}h) just under demand ({need}h) — \
                 watch multi-subject teachers' subject split."
            ));
        } else if (cap as f64) < (*need as f64) * 1.10 {
            let util = *need as f64 / cap as f64 * 100.0;
            warnings.push(format!(
                "Subject '{subj_name}': very high utilization — {need}h demand at {cap}h \
                 capacity ({util:.0}%)."
            ));
        }
    }

    // ── Specialty-room capacity vs demand ────────────────────────────────
    let mut room_counts: BTreeMap<String, u32> = BTreeMap::new();
    for room in &data.rooms {
        *room_counts.entry(room.room_type.clone()).or_insert(0) += 1;
    }

    for (subj_name, need_hours) in &subject_need {
        let Some(subj) = data.subject(subj_name) else {
            continue;
        };
        let Some(room_type) = &subj.required_room_type else {
            continue;
        };
        let room_count = *room_counts.get(room_type).unwrap_or(&0);

        if room_count == 0 {
            errors.push(format!(
                "Subject '{subj_name}': requires room type '{room_type}', but none configured!"
            ));
            continue;
        }

        if subj.double_required {
            let events_needed: u32 = data
                .classes
                .iter()
                .map(|c| c.curriculum.get(subj_name).copied().unwrap_or(0) / 2)
                .sum();
            let max_events = room_count * double_blocks_per_day * days;
            if max_events == 0 {
                errors.push(format!(
                    "Room bottleneck '{subj_name}': {events_needed} double-period events \
                     needed, but no legal double blocks exist."
                ));
            } else {
                let util = events_needed as f64 / max_events as f64;
                if util > 1.0 {
                    errors.push(format!(
                        "Room bottleneck '{subj_name}': {events_needed} double-period events \
                         needed, only {max_events} possible ({room_count} rooms × \
                         {double_blocks_per_day} blocks × {days} days)."
                    ));
                } else if util > 0.85 {
                    warnings.push(format!(
                        "Room bottleneck '{subj_name}': high utilization \
                         {events_needed}/{max_events} double-period slots \
                         ({:.0}%) — {room_count} {room_type} rooms.",
                        util * 100.0
                    ));
                }
            }
        } else {
            let max_per_week = room_count * sek1_max * days;
            if *need_hours > max_per_week {
                errors.push(format!(
                    "Room bottleneck '{subj_name}': {need_hours}h/week needed, only \
                     {max_per_week} room slots available."
                ));
            }
        }
    }

    // ── Coupling group teacher qualification ────────────────────────────
    for coupling in &data.couplings {
        for group in &coupling.groups {
            let cap = *subject_capacity.get(&group.subject).unwrap_or(&0);
            if cap == 0 {
                errors.push(format!(
                    "Coupling '{}', group '{}': no teacher for subject '{}'!",
                    coupling.id, group.group_name, group.subject
                ));
            }
        }
    }

    FeasibilityReport {
        is_feasible: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::types::{
        DoubleBlock, LessonSlot, Pause, Room, SchoolClass, SolverConfig, Subject, SubjectCategory,
        Teacher, TimeGrid,
    };

    fn grid() -> TimeGrid {
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
            vec![DoubleBlock { first: 1, second: 2 }, DoubleBlock { first: 3, second: 4 }],
            7,
            5,
        )
        .unwrap()
    }

    fn subject(name: &str, required_room_type: Option<&str>, double_required: bool) -> Subject {
        Subject {
            name: name.into(),
            short: name.chars().take(2).collect(),
            category: SubjectCategory::Hauptfach,
            is_main: true,
            required_room_type: required_room_type.map(str::to_string),
            double_required,
            double_preferred: false,
        }
    }

    fn teacher(id: &str, subjects: &[&str], deputat_max: u32) -> Teacher {
        Teacher::new(
            id,
            id,
            subjects.iter().map(|s| s.to_string()).collect(),
            1,
            deputat_max,
            false,
            BTreeSet::new(),
            BTreeSet::new(),
            6,
            2,
            0,
            35,
        )
        .unwrap()
    }

    fn data_with(subjects: Vec<Subject>, teachers: Vec<Teacher>, classes: Vec<SchoolClass>, rooms: Vec<Room>) -> SchoolData {
        SchoolData::new(subjects, rooms, classes, teachers, Vec::new(), grid(), SolverConfig::default())
    }

    #[test]
    fn flags_subject_with_no_qualified_teacher() {
        let mut curriculum = BTreeMap::new();
        curriculum.insert("Mathematik".to_string(), 4);
        let class = SchoolClass::new("5a", 5, "5a", curriculum, 7, None);
        let data = data_with(
            vec![subject("Mathematik", None, false)],
            vec![teacher("T01", &["Deutsch"], 25)],
            vec![class],
            vec![],
        );
        let report = check(&data);
        assert!(!report.is_feasible);
        assert!(report.errors.iter().any(|e| e.contains("Mathematik")));
    }

    #[test]
    fn flags_missing_special_room() {
        let mut curriculum = BTreeMap::new();
        curriculum.insert("Chemie".to_string(), 2);
        let class = SchoolClass::new("9a", 9, "9a", curriculum, 7, None);
        let data = data_with(
            vec![subject("Chemie", Some("chemie"), false)],
            vec![teacher("T01", &["Chemie"], 25)],
            vec![class],
            vec![],
        );
        let report = check(&data);
        assert!(!report.is_feasible);
        assert!(report.errors.iter().any(|e| e.contains("chemie")));
    }

    #[test]
    fn passes_when_capacity_covers_demand() {
        let mut curriculum = BTreeMap::new();
        curriculum.insert("Deutsch".to_string(), 4);
        let class = SchoolClass::new("5a", 5, "5a", curriculum, 7, None);
        let data = data_with(
            vec![subject("Deutsch", None, false)],
            vec![teacher("T01", &["Deutsch"], 25)],
            vec![class],
            vec![],
        );
        let report = check(&data);
        assert!(report.is_feasible);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn warns_on_free_day_cluster() {
        let mut curriculum = BTreeMap::new();
        curriculum.insert("Deutsch".to_string(), 4);
        let class = SchoolClass::new("5a", 5, "5a", curriculum, 7, None);
        let mut teachers = Vec::new();
        for i in 0..4 {
            let mut t = teacher(&format!("T0{i}"), &["Deutsch"], 25);
            t.preferred_free_days.insert(4);
            teachers.push(t);
        }
        let data = data_with(vec![subject("Deutsch", None, false)], teachers, vec![class], vec![]);
        let report = check(&data);
        assert!(report.warnings.iter().any(|w| w.contains("cluster")));
    }
}
