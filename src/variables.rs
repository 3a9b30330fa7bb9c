//! C4: the four (five, counting `double`) families of 0/1 decision
//! variables plus the secondary indices constraint posting and objective
//! construction need. Indices are populated while each family is created,
//! never rebuilt later by filtering.

use std::collections::BTreeMap;

use cp_sat::builder::{BoolVar, CpModelBuilder};

use crate::slot_index::SlotIndex;
use crate::types::{Coupling, Subject};

pub type TeacherId = String;
pub type ClassId = String;
pub type SubjectName = String;
pub type CouplingId = String;
pub type GroupName = String;

pub type AssignKey = (TeacherId, ClassId, SubjectName);
pub type SlotKey = (TeacherId, ClassId, SubjectName, u32, u32);
pub type CouplingSlotKey = (CouplingId, u32, u32);
pub type CouplingAssignKey = (CouplingId, GroupName, TeacherId);

/// Threads the diagnostic relaxer's toggles into variable/constraint
/// construction instead of mutating shared subject metadata in place
///.
#[derive(Debug, Clone, Default)]
pub struct ModelOverride {
    pub force_no_double_required: bool,
    pub unlimited_room_capacity: bool,
    pub disable_couplings: bool,
    /// Additive widening applied to every teacher's `deputat_max` when
    /// posting H7. Capped by
    /// `SolverConfig::deputat_relax_buffer_cap` by the caller.
    pub deputat_relax_buffer: u32,
}

impl ModelOverride {
    pub fn none() -> Self {
        Self::default()
    }

    /// `double_required` as seen by H9, after the relaxer's toggle.
    /// `double_preferred` is untouched — the soft bonus and the `double`
    /// variable itself still exist even when the hard requirement is
    /// relaxed away.
    pub fn effective_double_required(&self, subject: &Subject) -> bool {
        subject.double_required && !self.force_no_double_required
    }
}

#[derive(Debug, Default)]
pub struct Variables {
    pub assign: BTreeMap<AssignKey, BoolVar>,
    pub slot: BTreeMap<SlotKey, BoolVar>,
    pub coupling_slot: BTreeMap<CouplingSlotKey, BoolVar>,
    pub coupling_assign: BTreeMap<CouplingAssignKey, BoolVar>,
    /// Keyed by the double block's `first` period.
    pub double: BTreeMap<SlotKey, BoolVar>,

    /// (teacher, day, slot) -> regular slot vars active there.
    pub by_teacher_period: BTreeMap<(TeacherId, u32, u32), Vec<BoolVar>>,
    /// (teacher, class, subject, day) -> slot vars that day.
    pub by_teacher_class_subject_day: BTreeMap<(TeacherId, ClassId, SubjectName, u32), Vec<BoolVar>>,
    /// (class, day, slot) -> regular slot vars active there.
    pub by_class_period: BTreeMap<(ClassId, u32, u32), Vec<BoolVar>>,
    /// coupling id -> (day, slot, coupling_slot var), in slot order.
    pub by_coupling: BTreeMap<CouplingId, Vec<(u32, u32, BoolVar)>>,
    /// (coupling id, group name) -> (teacher id, coupling_assign var).
    pub by_coupling_group: BTreeMap<(CouplingId, GroupName), Vec<(TeacherId, BoolVar)>>,
}

/// A class's subjects that are covered exclusively by a coupling and
/// therefore excluded from direct assign/slot creation.
pub fn coupling_covered_for_class(couplings: &[Coupling], class_id: &str) -> Vec<String> {
    let mut out = Vec::new();
    for c in couplings {
        if c.involved_class_ids.iter().any(|id| id == class_id) {
            out.extend(c.covered_subjects());
        }
    }
    out
}

pub fn build(
    model: &mut CpModelBuilder,
    data: &crate::types::SchoolData,
    idx: &SlotIndex,
    ov: &ModelOverride,
) -> Variables {
    let mut vars = Variables::default();
    let classes_by_id: BTreeMap<&str, &crate::types::SchoolClass> =
        data.classes.iter().map(|c| (c.id.as_str(), c)).collect();

    // ── assign[t,c,s] ────────────────────────────────────────────────────
    for class in &data.classes {
        let covered = coupling_covered_for_class(&data.couplings, &class.id);
        for (subj_name, _hours) in &class.curriculum {
            if covered.contains(subj_name) {
                continue;
            }
            for teacher in &data.teachers {
                if !teacher.is_qualified_for(subj_name) {
                    continue;
                }
                let var = model.new_bool_var();
                vars.assign
                    .insert((teacher.id.clone(), class.id.clone(), subj_name.clone()), var);
            }
        }
    }

    // ── slot[t,c,s,d,h] ──────────────────────────────────────────────────
    for ((teacher_id, class_id, subj_name), _) in vars.assign.clone() {
        let Some(class) = classes_by_id.get(class_id.as_str()) else { continue };
        for p in &idx.periods {
            if p.slot > class.max_period {
                continue;
            }
            let var = model.new_bool_var();
            let key = (teacher_id.clone(), class_id.clone(), subj_name.clone(), p.day, p.slot);
            vars.by_teacher_period
                .entry((teacher_id.clone(), p.day, p.slot))
                .or_default()
                .push(var.clone());
            vars.by_teacher_class_subject_day
                .entry((teacher_id.clone(), class_id.clone(), subj_name.clone(), p.day))
                .or_default()
                .push(var.clone());
            vars.by_class_period
                .entry((class_id.clone(), p.day, p.slot))
                .or_default()
                .push(var.clone());
            vars.slot.insert(key, var);
        }
    }

    // ── double[t,c,s,d,h] ────────────────────────────────────────────────
    for ((teacher_id, class_id, subj_name), _) in vars.assign.clone() {
        let Some(subj) = data.subject(&subj_name) else { continue };
        if !subj.wants_double() {
            continue;
        }
        for &first in &idx.double_starts {
            let Some(second) = idx.second_of(first) else { continue };
            for day in 0..idx.days_per_week {
                let start_key = (teacher_id.clone(), class_id.clone(), subj_name.clone(), day, first);
                let end_key = (teacher_id.clone(), class_id.clone(), subj_name.clone(), day, second);
                if vars.slot.contains_key(&start_key) && vars.slot.contains_key(&end_key) {
                    let var = model.new_bool_var();
                    vars.double.insert(start_key, var);
                }
            }
        }
        let _ = ov; // double_preferred/double_required distinction is resolved in constraints::double
    }

    // ── coupling_slot[k,d,h], coupling_assign[k,g,t] ────────────────────
    if !ov.disable_couplings {
        for coupling in &data.couplings {
            for p in &idx.periods {
                let var = model.new_bool_var();
                vars.by_coupling
                    .entry(coupling.id.clone())
                    .or_default()
                    .push((p.day, p.slot, var.clone()));
                vars.coupling_slot
                    .insert((coupling.id.clone(), p.day, p.slot), var);
            }
            for group in &coupling.groups {
                for teacher in &data.teachers {
                    if !teacher.is_qualified_for(&group.subject) {
                        continue;
                    }
                    let var = model.new_bool_var();
                    vars.by_coupling_group
                        .entry((coupling.id.clone(), group.group_name.clone()))
                        .or_default()
                        .push((teacher.id.clone(), var.clone()));
                    vars.coupling_assign.insert(
                        (coupling.id.clone(), group.group_name.clone(), teacher.id.clone()),
                        var,
                    );
                }
            }
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coupling, CouplingGroup, CouplingType, Subject, SubjectCategory};

    fn subject(name: &str, double_required: bool) -> Subject {
        Subject {
            name: name.into(),
            short: name.chars().take(2).collect(),
            category: SubjectCategory::Hauptfach,
            is_main: true,
            required_room_type: None,
            double_required,
            double_preferred: false,
        }
    }

    #[test]
    fn effective_double_required_respects_override() {
        let subj = subject("Chemie", true);
        assert!(ModelOverride::none().effective_double_required(&subj));
        let ov = ModelOverride { force_no_double_required: true, ..ModelOverride::none() };
        assert!(!ov.effective_double_required(&subj));
    }

    #[test]
    fn effective_double_required_false_when_subject_does_not_need_it() {
        let subj = subject("Sport", false);
        assert!(!ModelOverride::none().effective_double_required(&subj));
    }

    #[test]
    fn coupling_covered_for_class_collects_reli_ethik_subjects() {
        let coupling = Coupling {
            id: "reli_5".into(),
            coupling_type: CouplingType::ReliEthik,
            involved_class_ids: vec!["5a".into(), "5b".into()],
            groups: vec![
                CouplingGroup { group_name: "ev".into(), subject: "Evangelisch".into(), hours_per_week: 2 },
                CouplingGroup { group_name: "kath".into(), subject: "Katholisch".into(), hours_per_week: 2 },
            ],
            hours_per_week: 2,
            cross_class: true,
        };
        let covered = coupling_covered_for_class(&[coupling], "5a");
        assert_eq!(covered, vec!["Evangelisch".to_string(), "Katholisch".to_string()]);
    }

    #[test]
    fn coupling_covered_for_class_empty_for_uninvolved_class() {
        let coupling = Coupling {
            id: "reli_5".into(),
            coupling_type: CouplingType::ReliEthik,
            involved_class_ids: vec!["5a".into()],
            groups: vec![CouplingGroup { group_name: "ev".into(), subject: "Evangelisch".into(), hours_per_week: 2 }],
            hours_per_week: 2,
            cross_class: false,
        };
        assert!(coupling_covered_for_class(&[coupling], "5b").is_empty());
    }

    #[test]
    fn wpf_coupling_covers_placeholder_subject() {
        let coupling = Coupling {
            id: "wpf_8".into(),
            coupling_type: CouplingType::Wpf,
            involved_class_ids: vec!["8a".into()],
            groups: vec![CouplingGroup { group_name: "franz".into(), subject: "Franzoesisch".into(), hours_per_week: 3 }],
            hours_per_week: 3,
            cross_class: false,
        };
        let covered = coupling_covered_for_class(&[coupling], "8a");
        assert_eq!(covered, vec![Coupling::WPF_PLACEHOLDER_SUBJECT.to_string()]);
    }
}
