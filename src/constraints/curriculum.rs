//! H1-H3: the link between `assign`, `slot`, and the curriculum hour
//! targets.

use std::collections::BTreeMap;

use cp_sat::builder::{CpModelBuilder, LinearExpr};

use crate::and_aux::implies;
use crate::types::SchoolData;
use crate::variables::Variables;

/// H1. `slot[t,c,s,d,h] -> assign[t,c,s]`.
pub fn post_h1_slot_implies_assign(model: &mut CpModelBuilder, vars: &Variables) -> usize {
    let mut count = 0;
    for ((t, c, s, _d, _h), slot_var) in &vars.slot {
        if let Some(assign_var) = vars.assign.get(&(t.clone(), c.clone(), s.clone())) {
            implies(model, slot_var, assign_var);
            count += 1;
        }
    }
    count
}

/// H2. Exactly one qualified teacher per (class, subject) that has any
/// assign variable at all.
pub fn post_h2_unique_teacher(model: &mut CpModelBuilder, vars: &Variables) -> usize {
    let mut by_class_subject: BTreeMap<(String, String), Vec<_>> = BTreeMap::new();
    for ((t, c, s), var) in &vars.assign {
        by_class_subject
            .entry((c.clone(), s.clone()))
            .or_default()
            .push((t.clone(), var.clone()));
    }
    let mut count = 0;
    for (_key, entries) in by_class_subject {
        let sum: LinearExpr = entries
            .into_iter()
            .map(|(_, v)| (1i64, v))
            .collect();
        model.add_eq(sum, LinearExpr::from(1));
        count += 1;
    }
    count
}

/// H3. For each non-coupling (class, subject), total scheduled slots equal
/// the curriculum hour target.
pub fn post_h3_curriculum_satisfaction(model: &mut CpModelBuilder, data: &SchoolData, vars: &Variables) -> usize {
    let mut count = 0;
    for class in &data.classes {
        for (subj_name, hours) in &class.curriculum {
            let terms: Vec<(i64, _)> = vars
                .slot
                .iter()
                .filter(|((_, c, s, _, _), _)| c == &class.id && s == subj_name)
                .map(|(_, v)| (1i64, v.clone()))
                .collect();
            if terms.is_empty() {
                // Subject fully coupling-covered for this class: no direct
                // slot vars exist, nothing to constrain here.
                continue;
            }
            let sum: LinearExpr = terms.into_iter().collect();
            model.add_eq(sum, LinearExpr::from(*hours as i64));
            count += 1;
        }
    }
    count
}
