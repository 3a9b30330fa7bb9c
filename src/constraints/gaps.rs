//! The shared gap-variable builder, plus H14. The
//! exact same `GapVars` this module returns is reused by the soft gap
//! penalty (`objective.rs`) — there is exactly one definition of "gap" in
//! this crate.

use std::collections::BTreeMap;

use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};

use super::coupling_busy::CouplingBusyIndex;
use crate::and_aux::{and_aux, not_aux, or_aux};
use crate::slot_index::SlotIndex;
use crate::types::SchoolData;
use crate::variables::Variables;

#[derive(Debug, Default)]
pub struct GapVars {
    /// (teacher, day) -> every `is_gap` indicator that day.
    pub by_teacher_day: BTreeMap<(String, u32), Vec<BoolVar>>,
}

impl GapVars {
    pub fn all(&self) -> impl Iterator<Item = &BoolVar> {
        self.by_teacher_day.values().flatten()
    }

    pub fn for_teacher(&self, teacher_id: &str) -> impl Iterator<Item = &BoolVar> {
        self.by_teacher_day
            .iter()
            .filter(move |((t, _), _)| t == teacher_id)
            .flat_map(|(_, v)| v.iter())
    }
}

pub fn build(
    model: &mut CpModelBuilder,
    data: &SchoolData,
    vars: &Variables,
    busy: &CouplingBusyIndex,
    idx: &SlotIndex,
) -> GapVars {
    let mut gaps = GapVars::default();

    for teacher in &data.teachers {
        for day in 0..idx.days_per_week {
            let periods: Vec<_> = idx.periods_of_day(day).collect();
            if periods.len() < 3 {
                continue;
            }

            let actives: Vec<BoolVar> = periods
                .iter()
                .map(|p| {
                    let mut touching = Vec::new();
                    if let Some(regular) = vars.by_teacher_period.get(&(teacher.id.clone(), p.day, p.slot)) {
                        touching.extend(regular.iter().cloned());
                    }
                    if let Some(aux) = busy.by_teacher_period.get(&(teacher.id.clone(), p.day, p.slot)) {
                        touching.extend(aux.iter().cloned());
                    }
                    or_aux(model, &touching)
                })
                .collect();

            let mut day_gaps = Vec::new();
            for (i, a_h) in actives.iter().enumerate() {
                if i == 0 || i == actives.len() - 1 {
                    // A boundary period can never be a gap: there is
                    // nothing both before and after it.
                    continue;
                }
                let before = or_aux(model, &actives[..i]);
                let after = or_aux(model, &actives[i + 1..]);
                let not_a = not_aux(model, a_h);
                let before_and_after = and_aux(model, &before, &after);
                let is_gap = and_aux(model, &before_and_after, &not_a);
                day_gaps.push(is_gap);
            }

            gaps.by_teacher_day.insert((teacher.id.clone(), day), day_gaps);
        }
    }

    gaps
}

/// H14. Optional weekly gap cap — a teacher's own `max_gaps_per_week`
/// overrides the solver-wide default; 0 (on both) means no hard cap.
pub fn post_h14_weekly_gap_cap(model: &mut CpModelBuilder, data: &SchoolData, gaps: &GapVars) -> usize {
    let mut count = 0;
    for teacher in &data.teachers {
        let cap = if teacher.max_gaps_per_week > 0 {
            teacher.max_gaps_per_week
        } else {
            data.solver.max_gaps_per_week
        };
        if cap == 0 {
            continue;
        }
        let terms: Vec<(i64, BoolVar)> = gaps
            .for_teacher(&teacher.id)
            .cloned()
            .map(|v| (1i64, v))
            .collect();
        if terms.is_empty() {
            continue;
        }
        let sum: LinearExpr = terms.into_iter().collect();
        model.add_le(sum, LinearExpr::from(cap as i64));
        count += 1;
    }
    count
}
