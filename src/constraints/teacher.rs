//! H4, H6, H7, H11: per-teacher hard constraints.

use cp_sat::builder::{CpModelBuilder, LinearExpr};

use super::coupling_busy::CouplingBusyIndex;
use crate::types::SchoolData;
use crate::variables::{ModelOverride, Variables};

/// H4. At most one teacher-busy indicator true per (teacher, day, slot).
pub fn post_h4_teacher_non_conflict(
    model: &mut CpModelBuilder,
    vars: &Variables,
    busy: &CouplingBusyIndex,
) -> usize {
    let mut count = 0;
    for ((teacher_id, day, slot), regular) in &vars.by_teacher_period {
        let mut sum: LinearExpr = regular.iter().cloned().map(|v| (1i64, v)).collect();
        if let Some(aux) = busy.by_teacher_period.get(&(teacher_id.clone(), *day, *slot)) {
            for a in aux {
                sum = sum + LinearExpr::from(a.clone());
            }
        }
        model.add_le(sum, LinearExpr::from(1));
        count += 1;
    }
    // Teachers with only coupling-busy activity at a cell (no regular slot
    // var at all) still need the at-most-one guard.
    for ((teacher_id, day, slot), aux) in &busy.by_teacher_period {
        if vars.by_teacher_period.contains_key(&(teacher_id.clone(), *day, *slot)) {
            continue;
        }
        let sum: LinearExpr = aux.iter().cloned().map(|v| (1i64, v)).collect();
        model.add_le(sum, LinearExpr::from(1));
        count += 1;
    }
    count
}

/// H6. Unavailable (day, slot) cells are fixed to 0 for regular slots;
/// a teacher assigned to a coupling group may not have that coupling
/// occupy one of their unavailable cells either.
pub fn post_h6_teacher_unavailability(model: &mut CpModelBuilder, data: &SchoolData, vars: &Variables) -> usize {
    let mut count = 0;
    for teacher in &data.teachers {
        for &(day, slot) in &teacher.unavailable {
            for ((t, _c, _s, d, h), var) in &vars.slot {
                if t == &teacher.id && *d == day && *h == slot {
                    model.add_eq(LinearExpr::from(var.clone()), LinearExpr::from(0));
                    count += 1;
                }
            }
            for ((coupling_id, _g, t), assign_var) in &vars.coupling_assign {
                if t != &teacher.id {
                    continue;
                }
                if let Some(slot_var) = vars.coupling_slot.get(&(coupling_id.clone(), day, slot)) {
                    model.add_le(
                        LinearExpr::from(assign_var.clone()) + LinearExpr::from(slot_var.clone()),
                        LinearExpr::from(1),
                    );
                    count += 1;
                }
            }
        }
    }
    count
}

/// H7. `deputat_min <= regular hours + coupling hours <= deputat_max`
/// (the upper bound widened by the relaxer's additive buffer, if any).
pub fn post_h7_deputat_bounds(
    model: &mut CpModelBuilder,
    data: &SchoolData,
    vars: &Variables,
    ov: &ModelOverride,
) -> usize {
    let mut count = 0;
    for teacher in &data.teachers {
        let slot_terms: Vec<_> = vars
            .by_teacher_class_subject_day
            .iter()
            .filter(|((t, _, _, _), _)| t == &teacher.id)
            .flat_map(|(_, v)| v.iter().cloned())
            .collect();

        let coupling_vars: Vec<_> = vars
            .coupling_assign
            .iter()
            .filter(|((_, _, t), _)| t == &teacher.id)
            .collect();

        // A teacher qualified only for subjects no class's curriculum
        // requests, and in no coupling group, has no contributing term at
        // all — posting bounds on an empty (zero) sum would force
        // `0 >= deputat_min`, spuriously infeasible since `deputat_min > 0`
        // is enforced at construction. Skip both bounds in that case.
        if slot_terms.is_empty() && coupling_vars.is_empty() {
            continue;
        }

        let mut sum: LinearExpr = slot_terms.into_iter().map(|v| (1i64, v)).collect();

        for (coupling_id, group_name, assign_var) in coupling_vars.into_iter().map(|((c, g, _), v)| (c, g, v)) {
            let hours = data
                .couplings
                .iter()
                .find(|c| &c.id == coupling_id)
                .and_then(|c| c.groups.iter().find(|g| &g.group_name == group_name))
                .map(|g| g.hours_per_week)
                .unwrap_or(0);
            for _ in 0..hours {
                sum = sum + LinearExpr::from(assign_var.clone());
            }
        }

        model.add_ge(sum.clone(), LinearExpr::from(teacher.deputat_min as i64));
        let max = teacher.deputat_max + ov.deputat_relax_buffer;
        model.add_le(sum, LinearExpr::from(max as i64));
        count += 2;
    }
    count
}

/// H11. Per (teacher, day), active periods (regular + coupling) stay
/// within `max_hours_per_day`.
pub fn post_h11_max_hours_per_day(
    model: &mut CpModelBuilder,
    data: &SchoolData,
    vars: &Variables,
    busy: &CouplingBusyIndex,
    idx: &crate::slot_index::SlotIndex,
) -> usize {
    let mut count = 0;
    for teacher in &data.teachers {
        for day in 0..idx.days_per_week {
            let mut sum = LinearExpr::from(0);
            for p in idx.periods_of_day(day) {
                if let Some(regular) = vars.by_teacher_period.get(&(teacher.id.clone(), day, p.slot)) {
                    for v in regular {
                        sum = sum + LinearExpr::from(v.clone());
                    }
                }
                if let Some(aux) = busy.by_teacher_period.get(&(teacher.id.clone(), day, p.slot)) {
                    for v in aux {
                        sum = sum + LinearExpr::from(v.clone());
                    }
                }
            }
            model.add_le(sum, LinearExpr::from(teacher.max_hours_per_day as i64));
            count += 1;
        }
    }
    count
}
