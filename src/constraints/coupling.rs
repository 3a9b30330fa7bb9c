//! H12: coupling totals and group teacher assignment.
//! A no-op when couplings were disabled — the variable builder simply
//! never created `coupling_slot`/`coupling_assign` vars in that case.

use cp_sat::builder::{CpModelBuilder, LinearExpr};

use crate::types::SchoolData;
use crate::variables::Variables;

pub fn post_h12_coupling_totals_and_groups(model: &mut CpModelBuilder, data: &SchoolData, vars: &Variables) -> usize {
    let mut count = 0;
    for coupling in &data.couplings {
        if let Some(slots) = vars.by_coupling.get(&coupling.id) {
            let sum: LinearExpr = slots.iter().map(|(_, _, v)| (1i64, v.clone())).collect();
            model.add_eq(sum, LinearExpr::from(coupling.hours_per_week as i64));
            count += 1;
        }

        for group in &coupling.groups {
            let Some(entries) = vars.by_coupling_group.get(&(coupling.id.clone(), group.group_name.clone())) else {
                continue;
            };
            let sum: LinearExpr = entries.iter().map(|(_, v)| (1i64, v.clone())).collect();
            model.add_eq(sum, LinearExpr::from(1));
            count += 1;
        }
    }
    count
}
