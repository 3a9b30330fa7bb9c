//! C7: reads variable values off a terminal `CpSolverResponse`, flattens
//! coupling entries out to one row per involved class, and runs the
//! post-hoc room assignment pass.

use std::collections::BTreeMap;

use cp_sat::proto::CpSolverStatus;
use serde::{Deserialize, Serialize};

use crate::driver::SolveOutcome;
use crate::types::{PinnedLesson, SchoolData, SolverConfig};

/// Mirrors the constraint backend's terminal states without
/// depending on `cp_sat::proto::CpSolverStatus` implementing `Serialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
    ModelInvalid,
}

impl From<CpSolverStatus> for SolverStatus {
    fn from(status: CpSolverStatus) -> Self {
        match status {
            CpSolverStatus::Optimal => SolverStatus::Optimal,
            CpSolverStatus::Feasible => SolverStatus::Feasible,
            CpSolverStatus::Infeasible => SolverStatus::Infeasible,
            CpSolverStatus::ModelInvalid => SolverStatus::ModelInvalid,
            _ => SolverStatus::Unknown,
        }
    }
}

/// The sentinel written into `room` when the required room type has no
/// free room at that (day, slot) — the solution is still reportable, the
/// mismatch surfaces downstream.
pub fn room_shortage_sentinel(room_type: &str) -> String {
    format!("{room_type}-?")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: u32,
    pub slot_number: u32,
    pub teacher_id: String,
    pub class_id: String,
    pub subject: String,
    pub room: Option<String>,
    pub is_coupling: bool,
    pub coupling_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherAssignment {
    pub teacher_id: String,
    pub class_id: String,
    pub subject: String,
    pub hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSolution {
    pub entries: Vec<ScheduleEntry>,
    pub assignments: Vec<TeacherAssignment>,
    pub solver_status: SolverStatus,
    pub solve_time_seconds: f64,
    pub objective_value: Option<f64>,
    pub num_variables: usize,
    pub num_constraints: usize,
    pub dropped_pins: Vec<PinnedLesson>,
    pub config: SolverConfig,
}

pub fn extract(data: &SchoolData, outcome: SolveOutcome) -> ScheduleSolution {
    let status: SolverStatus = outcome.status.into();
    let solve_time_seconds = outcome.solve_time.as_secs_f64();

    if !matches!(status, SolverStatus::Optimal | SolverStatus::Feasible) {
        log::warn!("solve terminated with status {status:?}; returning an empty solution");
        return ScheduleSolution {
            entries: Vec::new(),
            assignments: Vec::new(),
            solver_status: status,
            solve_time_seconds,
            objective_value: None,
            num_variables: outcome.num_variables,
            num_constraints: outcome.num_constraints,
            dropped_pins: outcome.dropped_pins,
            config: data.solver.clone(),
        };
    }

    let response = &outcome.response;
    let classes_by_id: BTreeMap<&str, &crate::types::SchoolClass> =
        data.classes.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut entries = Vec::new();

    for ((teacher_id, class_id, subj_name, day, slot), var) in &outcome.vars.slot {
        if !var.solution_value(response) {
            continue;
        }
        let room = special_room_placeholder(data, subj_name)
            .or_else(|| classes_by_id.get(class_id.as_str()).and_then(|c| c.home_room.clone()));
        entries.push(ScheduleEntry {
            day: *day,
            slot_number: *slot,
            teacher_id: teacher_id.clone(),
            class_id: class_id.clone(),
            subject: subj_name.clone(),
            room,
            is_coupling: false,
            coupling_id: None,
        });
    }

    for coupling in &data.couplings {
        let Some(slots) = outcome.vars.by_coupling.get(&coupling.id) else { continue };
        for (day, slot, slot_var) in slots {
            if !slot_var.solution_value(response) {
                continue;
            }
            for group in &coupling.groups {
                let Some(teacher_entries) = outcome
                    .vars
                    .by_coupling_group
                    .get(&(coupling.id.clone(), group.group_name.clone()))
                else {
                    continue;
                };
                let Some((teacher_id, _)) = teacher_entries
                    .iter()
                    .find(|(_, v)| v.solution_value(response))
                else {
                    continue;
                };
                for class_id in &coupling.involved_class_ids {
                    let room = special_room_placeholder(data, &group.subject).or_else(|| {
                        classes_by_id.get(class_id.as_str()).and_then(|c| c.home_room.clone())
                    });
                    entries.push(ScheduleEntry {
                        day: *day,
                        slot_number: *slot,
                        teacher_id: teacher_id.clone(),
                        class_id: class_id.clone(),
                        subject: group.subject.clone(),
                        room,
                        is_coupling: true,
                        coupling_id: Some(coupling.id.clone()),
                    });
                }
            }
        }
    }

    assign_rooms(data, &mut entries);

    let assignments = summarize_assignments(&entries);

    ScheduleSolution {
        entries,
        assignments,
        solver_status: status,
        solve_time_seconds,
        objective_value: Some(response.objective_value),
        num_variables: outcome.num_variables,
        num_constraints: outcome.num_constraints,
        dropped_pins: outcome.dropped_pins,
        config: data.solver.clone(),
    }
}

fn special_room_placeholder(data: &SchoolData, subject_name: &str) -> Option<String> {
    data.subject(subject_name)
        .and_then(|s| s.required_room_type.clone())
}

/// Resolves every room-type placeholder left by extraction into a concrete
/// room ID, sharing one room across all classes of the same coupling
/// occurrence and preferring the least-used free room otherwise.
fn assign_rooms(data: &SchoolData, entries: &mut [ScheduleEntry]) {
    let rooms_by_type: BTreeMap<&str, Vec<&str>> = {
        let mut m: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for room in &data.rooms {
            m.entry(room.room_type.as_str()).or_default().push(room.id.as_str());
        }
        m
    };

    let mut used_at: BTreeMap<(u32, u32, String), Vec<String>> = BTreeMap::new();
    let mut usage: BTreeMap<String, u32> = BTreeMap::new();
    let mut coupling_cache: BTreeMap<(String, String, u32, u32), String> = BTreeMap::new();

    // Stable order: day, slot, then teacher/class, so repeated runs over
    // identical input produce identical room assignments.
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| {
        let ea = &entries[a];
        let eb = &entries[b];
        (ea.day, ea.slot_number, ea.teacher_id.as_str(), ea.class_id.as_str())
            .cmp(&(eb.day, eb.slot_number, eb.teacher_id.as_str(), eb.class_id.as_str()))
    });

    for i in order {
        let room_type = {
            let Some(rt) = data.subject(&entries[i].subject).and_then(|s| s.required_room_type.clone()) else {
                continue;
            };
            rt
        };
        let day = entries[i].day;
        let slot = entries[i].slot_number;

        if entries[i].is_coupling {
            let coupling_id = entries[i].coupling_id.clone().unwrap_or_default();
            let cache_key = (coupling_id, entries[i].teacher_id.clone(), day, slot);
            if let Some(room_id) = coupling_cache.get(&cache_key) {
                entries[i].room = Some(room_id.clone());
                continue;
            }
            let chosen = pick_room(&rooms_by_type, &room_type, &used_at, &usage, day, slot);
            match chosen {
                Some(room_id) => {
                    used_at
                        .entry((day, slot, room_type.clone()))
                        .or_default()
                        .push(room_id.clone());
                    *usage.entry(room_id.clone()).or_insert(0) += 1;
                    coupling_cache.insert(cache_key, room_id.clone());
                    entries[i].room = Some(room_id);
                }
                None => entries[i].room = Some(room_shortage_sentinel(&room_type)),
            }
            continue;
        }

        match pick_room(&rooms_by_type, &room_type, &used_at, &usage, day, slot) {
            Some(room_id) => {
                used_at
                    .entry((day, slot, room_type.clone()))
                    .or_default()
                    .push(room_id.clone());
                *usage.entry(room_id.clone()).or_insert(0) += 1;
                entries[i].room = Some(room_id);
            }
            None => entries[i].room = Some(room_shortage_sentinel(&room_type)),
        }
    }
}

fn pick_room(
    rooms_by_type: &BTreeMap<&str, Vec<&str>>,
    room_type: &str,
    used_at: &BTreeMap<(u32, u32, String), Vec<String>>,
    usage: &BTreeMap<String, u32>,
    day: u32,
    slot: u32,
) -> Option<String> {
    let candidates = rooms_by_type.get(room_type)?;
    let taken = used_at.get(&(day, slot, room_type.to_string()));
    candidates
        .iter()
        .filter(|id| taken.map(|t| !t.iter().any(|u| u == *id)).unwrap_or(true))
        .min_by_key(|id| usage.get(**id).copied().unwrap_or(0))
        .map(|id| id.to_string())
}

fn summarize_assignments(entries: &[ScheduleEntry]) -> Vec<TeacherAssignment> {
    let mut hours: BTreeMap<(String, String, String), u32> = BTreeMap::new();
    for e in entries {
        *hours
            .entry((e.teacher_id.clone(), e.class_id.clone(), e.subject.clone()))
            .or_insert(0) += 1;
    }
    hours
        .into_iter()
        .map(|((teacher_id, class_id, subject), h)| TeacherAssignment {
            teacher_id,
            class_id,
            subject,
            hours: h,
        })
        .collect()
}
