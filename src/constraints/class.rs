//! H5, H10: per-class hard constraints.

use cp_sat::builder::{CpModelBuilder, LinearExpr};

use crate::and_aux::{implies, or_aux};
use crate::slot_index::SlotIndex;
use crate::types::SchoolData;
use crate::variables::Variables;

/// H5. At most one of {regular slot, coupling slot for an involved
/// coupling} true per (class, day, slot).
pub fn post_h5_class_non_conflict(model: &mut CpModelBuilder, data: &SchoolData, vars: &Variables, idx: &SlotIndex) -> usize {
    let mut count = 0;
    for class in &data.classes {
        for p in &idx.periods {
            let mut sum = LinearExpr::from(0);
            if let Some(regular) = vars.by_class_period.get(&(class.id.clone(), p.day, p.slot)) {
                for v in regular {
                    sum = sum + LinearExpr::from(v.clone());
                }
            }
            for coupling in &data.couplings {
                if !coupling.involved_class_ids.iter().any(|id| id == &class.id) {
                    continue;
                }
                if let Some(v) = vars.coupling_slot.get(&(coupling.id.clone(), p.day, p.slot)) {
                    sum = sum + LinearExpr::from(v.clone());
                }
            }
            model.add_le(sum, LinearExpr::from(1));
            count += 1;
        }
    }
    count
}

/// H10. A class's active periods in a day form a prefix: no free period
/// may be followed by another lesson.
pub fn post_h10_compact_class_day(model: &mut CpModelBuilder, data: &SchoolData, vars: &Variables, idx: &SlotIndex) -> usize {
    let mut count = 0;
    for class in &data.classes {
        for day in 0..idx.days_per_week {
            let mut actives = Vec::new();
            for p in idx.periods_of_day(day) {
                if p.slot > class.max_period {
                    continue;
                }
                let mut touching = Vec::new();
                if let Some(regular) = vars.by_class_period.get(&(class.id.clone(), p.day, p.slot)) {
                    touching.extend(regular.iter().cloned());
                }
                for coupling in &data.couplings {
                    if !coupling.involved_class_ids.iter().any(|id| id == &class.id) {
                        continue;
                    }
                    if let Some(v) = vars.coupling_slot.get(&(coupling.id.clone(), p.day, p.slot)) {
                        touching.push(v.clone());
                    }
                }
                let active = or_aux(model, &touching);
                actives.push(active);
            }
            for window in actives.windows(2) {
                let [earlier, later] = window else { continue };
                implies(model, later, earlier);
                count += 1;
            }
        }
    }
    count
}
