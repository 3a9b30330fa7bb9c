//! H8: specialty-room capacity.

use std::collections::BTreeSet;

use cp_sat::builder::{CpModelBuilder, LinearExpr};

use crate::slot_index::SlotIndex;
use crate::types::{SchoolData, UNLIMITED_ROOM_CAPACITY, room_capacity};
use crate::variables::{ModelOverride, Variables};

pub fn post_h8_specialty_room_capacity(
    model: &mut CpModelBuilder,
    data: &SchoolData,
    vars: &Variables,
    idx: &SlotIndex,
    ov: &ModelOverride,
) -> usize {
    let mut count = 0;
    if ov.unlimited_room_capacity {
        return count;
    }

    let room_types: BTreeSet<&str> = data
        .subjects
        .iter()
        .filter_map(|s| s.required_room_type.as_deref())
        .collect();

    for room_type in room_types {
        let cap = room_capacity(&data.rooms, room_type);
        if cap >= UNLIMITED_ROOM_CAPACITY {
            continue;
        }

        let subjects_needing: BTreeSet<&str> = data
            .subjects
            .iter()
            .filter(|s| s.required_room_type.as_deref() == Some(room_type))
            .map(|s| s.name.as_str())
            .collect();

        for p in &idx.periods {
            let mut sum = LinearExpr::from(0);

            for ((_t, _c, s, d, h), v) in &vars.slot {
                if *d == p.day && *h == p.slot && subjects_needing.contains(s.as_str()) {
                    sum = sum + LinearExpr::from(v.clone());
                }
            }

            for coupling in &data.couplings {
                let Some(slot_var) = vars.coupling_slot.get(&(coupling.id.clone(), p.day, p.slot)) else {
                    continue;
                };
                let groups_needing = coupling
                    .groups
                    .iter()
                    .filter(|g| subjects_needing.contains(g.subject.as_str()))
                    .count();
                for _ in 0..groups_needing {
                    sum = sum + LinearExpr::from(slot_var.clone());
                }
            }

            model.add_le(sum, LinearExpr::from(cap as i64));
            count += 1;
        }
    }
    count
}
