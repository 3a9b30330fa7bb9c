//! H9, H9b: double-period requirements and the `double` variable's
//! linkage to its two halves.

use cp_sat::builder::{CpModelBuilder, LinearExpr};

use crate::and_aux::implies;
use crate::slot_index::SlotIndex;
use crate::types::SchoolData;
use crate::variables::{ModelOverride, Variables};

/// H9. Double-required subjects must occupy legal double blocks (with the
/// odd-N lone-single exception), never a scattered single elsewhere.
pub fn post_h9_double_required(
    model: &mut CpModelBuilder,
    data: &SchoolData,
    vars: &Variables,
    idx: &SlotIndex,
    ov: &ModelOverride,
) -> usize {
    let mut count = 0;
    for ((t, c, s, d, h), slot_var) in vars.slot.clone() {
        let Some(subj) = data.subject(&s) else { continue };
        if !ov.effective_double_required(subj) {
            continue;
        }
        let Some(class) = data.classes.iter().find(|cl| cl.id == c) else { continue };
        let n = *class.curriculum.get(&s).unwrap_or(&0);

        if idx.is_double_start(h) {
            let Some(second) = idx.second_of(h) else { continue };
            if let Some(second_var) = vars.slot.get(&(t.clone(), c.clone(), s.clone(), d, second)) {
                implies(model, &slot_var, second_var);
                implies(model, second_var, &slot_var);
                count += 2;
            }
            continue;
        }

        if idx.double_pair.values().any(|&second| second == h) {
            // The second half of a double block: H9's start case already
            // ties it to its partner.
            continue;
        }

        // Single-only period.
        if n % 2 == 0 {
            model.add_eq(LinearExpr::from(slot_var.clone()), LinearExpr::from(0));
            count += 1;
            continue;
        }
        if n >= 3 {
            for &start in &idx.double_starts {
                if let Some(double_start_var) = vars.slot.get(&(t.clone(), c.clone(), s.clone(), d, start)) {
                    model.add_le(
                        LinearExpr::from(slot_var.clone()) + LinearExpr::from(double_start_var.clone()),
                        LinearExpr::from(1),
                    );
                    count += 1;
                }
            }
        }
        // n == 1: a lone single is permitted, no further constraint.
    }
    count
}

/// H9b. `double[t,c,s,d,h] <-> slot[h] ∧ slot[h+1]`.
pub fn post_h9b_double_linkage(model: &mut CpModelBuilder, vars: &Variables, idx: &SlotIndex) -> usize {
    let mut count = 0;
    for ((t, c, s, d, h), double_var) in &vars.double {
        let Some(second) = idx.second_of(*h) else { continue };
        let Some(first_var) = vars.slot.get(&(t.clone(), c.clone(), s.clone(), *d, *h)) else { continue };
        let Some(second_var) = vars.slot.get(&(t.clone(), c.clone(), s.clone(), *d, second)) else { continue };

        implies(model, double_var, first_var);
        implies(model, double_var, second_var);
        model.add_le(
            LinearExpr::from(first_var.clone()) + LinearExpr::from(second_var.clone()) - 1,
            LinearExpr::from(double_var.clone()),
        );
        count += 3;
    }
    count
}
