//! Shared "teacher is busy via a coupling" auxiliary booleans.
//!
//! `coupling_assign[k,g,t] ∧ coupling_slot[k,d,h]` is
//! built exactly once per `(k,g,t,d,h)` combination here and reused by
//! H4, H11, and the gap-variable builder so none of them
//! re-derive the same conjunction.

use std::collections::BTreeMap;

use cp_sat::builder::{BoolVar, CpModelBuilder};

use crate::and_aux::and_aux;
use crate::variables::Variables;

#[derive(Debug, Default)]
pub struct CouplingBusyIndex {
    /// (teacher, day, slot) -> every coupling-busy aux touching that cell.
    pub by_teacher_period: BTreeMap<(String, u32, u32), Vec<BoolVar>>,
}

pub fn build(model: &mut CpModelBuilder, vars: &Variables) -> CouplingBusyIndex {
    let mut idx = CouplingBusyIndex::default();
    for ((coupling_id, group_name, teacher_id), assign_var) in &vars.coupling_assign {
        let Some(slots) = vars.by_coupling.get(coupling_id) else { continue };
        for (day, slot, slot_var) in slots {
            let _ = group_name;
            let busy = and_aux(model, assign_var, slot_var);
            idx.by_teacher_period
                .entry((teacher_id.clone(), *day, *slot))
                .or_default()
                .push(busy);
        }
    }
    idx
}
