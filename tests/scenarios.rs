//! End-to-end scenarios over the full solve pipeline. Each fixture is
//! deliberately small — enough teachers and subjects to exercise the
//! hard-constraint families without dragging in a full school's worth of
//! data the solver would spend its whole time budget on.

use std::collections::{BTreeMap, BTreeSet};

use schulplan_core::types::{
    DoubleBlock, LessonSlot, Pause, PinnedLesson, Room, SchoolClass, SchoolData, SolverConfig,
    Subject, SubjectCategory, Teacher, TimeGrid,
};
use schulplan_core::variables::ModelOverride;
use schulplan_core::SolverStatus;

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
        vec![
            Pause { after_slot: 2, duration_minutes: 20, label: "".into() },
            Pause { after_slot: 4, duration_minutes: 15, label: "".into() },
        ],
        vec![DoubleBlock { first: 1, second: 2 }, DoubleBlock { first: 3, second: 4 }],
        7,
        5,
    )
    .unwrap()
}

fn plain_subject(name: &str) -> Subject {
    Subject {
        name: name.into(),
        short: name.chars().take(2).collect(),
        category: SubjectCategory::Hauptfach,
        is_main: true,
        required_room_type: None,
        double_required: false,
        double_preferred: false,
    }
}

fn teacher(id: &str, subject: &str, deputat_min: u32, deputat_max: u32) -> Teacher {
    let mut subjects = BTreeSet::new();
    subjects.insert(subject.to_string());
    Teacher::new(id, id, subjects, deputat_min, deputat_max, false, BTreeSet::new(), BTreeSet::new(), 6, 2, 0, 35).unwrap()
}

fn mini_school() -> SchoolData {
    let mut curriculum = BTreeMap::new();
    curriculum.insert("Deutsch".to_string(), 4);
    curriculum.insert("Mathematik".to_string(), 4);
    curriculum.insert("Sport".to_string(), 2);
    let class = SchoolClass::new("5a", 5, "5a", curriculum, 7, None);

    let subjects = vec![plain_subject("Deutsch"), plain_subject("Mathematik"), plain_subject("Sport")];
    let teachers = vec![
        teacher("T01", "Deutsch", 4, 12),
        teacher("T02", "Mathematik", 4, 12),
        teacher("T03", "Sport", 2, 12),
    ];

    let mut solver = SolverConfig::default();
    solver.time_limit_seconds = 15;
    solver.num_workers = 1;

    SchoolData::new(subjects, Vec::<Room>::new(), vec![class], teachers, Vec::new(), grid(), solver)
}

#[test]
fn mini_two_subject_school_is_feasible_and_satisfies_curriculum() {
    let data = mini_school();
    assert!(data.validate_feasibility().is_feasible);

    let solution = schulplan_core::solve(&data, &[], &ModelOverride::none());
    assert!(matches!(solution.solver_status, SolverStatus::Optimal | SolverStatus::Feasible));

    let mut hours: BTreeMap<&str, u32> = BTreeMap::new();
    for entry in &solution.entries {
        assert_eq!(entry.class_id, "5a");
        *hours.entry(entry.subject.as_str()).or_insert(0) += 1;
    }
    assert_eq!(hours.get("Deutsch"), Some(&4));
    assert_eq!(hours.get("Mathematik"), Some(&4));
    assert_eq!(hours.get("Sport"), Some(&2));
}

#[test]
fn pin_is_honored_verbatim() {
    let data = mini_school();
    let pin = PinnedLesson::new("T01", "5a", "Deutsch", 0, 1);

    let solution = schulplan_core::solve(&data, &[pin.clone()], &ModelOverride::none());
    assert!(matches!(solution.solver_status, SolverStatus::Optimal | SolverStatus::Feasible));
    assert!(solution.dropped_pins.is_empty());

    let pinned_entry_present = solution.entries.iter().any(|e| {
        e.teacher_id == pin.teacher_id
            && e.class_id == pin.class_id
            && e.subject == pin.subject
            && e.day == pin.day
            && e.slot_number == pin.slot_number
    });
    assert!(pinned_entry_present);
}

#[test]
fn removing_the_only_qualified_teacher_is_caught_before_solving() {
    let mut data = mini_school();
    data.teachers.retain(|t| t.id != "T02");

    let report = data.validate_feasibility();
    assert!(!report.is_feasible);
    assert!(report.errors.iter().any(|e| e.contains("Mathematik")));
}
