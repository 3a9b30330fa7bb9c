//! C6 (objective half): assembles the weighted soft-objective sum
//!. The solver driver (`driver.rs`) calls `build` once per
//! solve and hands the resulting [`cp_sat::builder::LinearExpr`] straight
//! to `model.minimize(...)`.

use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};

use crate::and_aux::or_aux;
use crate::constraints::{CouplingBusyIndex, GapVars};
use crate::slot_index::SlotIndex;
use crate::types::SchoolData;
use crate::variables::Variables;

pub fn build(
    model: &mut CpModelBuilder,
    data: &SchoolData,
    vars: &Variables,
    idx: &SlotIndex,
    busy: &CouplingBusyIndex,
    gaps: &GapVars,
) -> LinearExpr {
    let w = &data.solver;
    let mut terms: Vec<(i64, BoolVar)> = Vec::new();

    // Gap penalty.
    for g in gaps.all() {
        terms.push((w.weight_gaps, g.clone()));
    }

    // Day-wish penalty: one "has a lesson that day" indicator per
    // (teacher, preferred-free-day).
    for teacher in &data.teachers {
        for &day in &teacher.preferred_free_days {
            let mut touching = Vec::new();
            for p in idx.periods_of_day(day) {
                if let Some(regular) = vars.by_teacher_period.get(&(teacher.id.clone(), p.day, p.slot)) {
                    touching.extend(regular.iter().cloned());
                }
                if let Some(aux) = busy.by_teacher_period.get(&(teacher.id.clone(), p.day, p.slot)) {
                    touching.extend(aux.iter().cloned());
                }
            }
            if touching.is_empty() {
                continue;
            }
            let has_lesson = or_aux(model, &touching);
            terms.push((w.weight_day_wishes, has_lesson));
        }
    }

    // Double-preferred bonus (negative coefficient).
    for ((t, c, s, d, h), double_var) in &vars.double {
        let Some(subj) = data.subject(s) else { continue };
        if !subj.double_preferred {
            continue;
        }
        let _ = (t, c, d, h);
        terms.push((-w.weight_double_lessons, double_var.clone()));
    }

    // Subject-spread penalty: per (teacher, class, main subject, day),
    // one "taught that day" indicator.
    for ((teacher_id, class_id, subj_name, day), slots) in &vars.by_teacher_class_subject_day {
        let Some(subj) = data.subject(subj_name) else { continue };
        if !subj.is_main {
            continue;
        }
        let _ = (teacher_id, class_id, day);
        if slots.is_empty() {
            continue;
        }
        let taught_that_day = or_aux(model, slots);
        terms.push((w.weight_subject_spread, taught_that_day));
    }

    let mut expr: LinearExpr = terms.into_iter().collect();

    // Deputat-deviation penalty: always active, even with weight 0 it is
    // a no-op term rather than a special-cased absence.
    for teacher in &data.teachers {
        let mut actual: LinearExpr = vars
            .by_teacher_class_subject_day
            .iter()
            .filter(|((t, _, _, _), _)| t == &teacher.id)
            .flat_map(|(_, v)| v.iter().cloned())
            .map(|v| (1i64, v))
            .collect();

        for ((coupling_id, group_name, t), assign_var) in &vars.coupling_assign {
            if t != &teacher.id {
                continue;
            }
            let hours = data
                .couplings
                .iter()
                .find(|c| &c.id == coupling_id)
                .and_then(|c| c.groups.iter().find(|g| &g.group_name == group_name))
                .map(|g| g.hours_per_week)
                .unwrap_or(0);
            for _ in 0..hours {
                actual = actual + LinearExpr::from(assign_var.clone());
            }
        }

        let dev = model.new_int_var(vec![(0, teacher.deputat_max as i64)]);
        model.add_eq(
            LinearExpr::from(dev.clone()) + actual,
            LinearExpr::from(teacher.deputat_max as i64),
        );
        for _ in 0..w.weight_deputat_deviation {
            expr = expr + LinearExpr::from(dev.clone());
        }
    }

    expr
}
