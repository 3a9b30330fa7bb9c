//! C5: the fourteen hard constraint families, posted in a fixed order,
//! plus the shared gap-variable builder they and the objective both
//! depend on.

mod class;
mod coupling;
mod coupling_busy;
mod curriculum;
mod double;
mod gaps;
mod pin;
mod room;
mod teacher;

pub use coupling_busy::CouplingBusyIndex;
pub use gaps::GapVars;

use cp_sat::builder::CpModelBuilder;

use crate::slot_index::SlotIndex;
use crate::types::{PinnedLesson, SchoolData};
use crate::variables::{ModelOverride, Variables};

/// Everything constraint posting produces that later stages need: the
/// shared coupling-busy auxiliaries, the gap variables, and the pins that
/// had to be dropped.
pub struct PostResult {
    pub busy: CouplingBusyIndex,
    pub gaps: GapVars,
    pub dropped_pins: Vec<PinnedLesson>,
    pub num_constraints: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn post_all(
    model: &mut CpModelBuilder,
    data: &SchoolData,
    idx: &SlotIndex,
    vars: &Variables,
    pins: &[PinnedLesson],
    ov: &ModelOverride,
) -> PostResult {
    let mut n = 0;
    n += curriculum::post_h1_slot_implies_assign(model, vars);
    n += curriculum::post_h2_unique_teacher(model, vars);
    n += curriculum::post_h3_curriculum_satisfaction(model, data, vars);

    let busy = coupling_busy::build(model, vars);

    n += teacher::post_h4_teacher_non_conflict(model, vars, &busy);
    n += teacher::post_h6_teacher_unavailability(model, data, vars);
    n += teacher::post_h7_deputat_bounds(model, data, vars, ov);

    n += class::post_h5_class_non_conflict(model, data, vars, idx);

    n += room::post_h8_specialty_room_capacity(model, data, vars, idx, ov);

    n += double::post_h9_double_required(model, data, vars, idx, ov);
    n += double::post_h9b_double_linkage(model, vars, idx);

    n += class::post_h10_compact_class_day(model, data, vars, idx);

    n += teacher::post_h11_max_hours_per_day(model, data, vars, &busy, idx);

    n += coupling::post_h12_coupling_totals_and_groups(model, data, vars);

    let dropped_pins = pin::post_h13_pins(model, vars, pins);
    n += pins.len() - dropped_pins.len();

    let gaps = gaps::build(model, data, vars, &busy, idx);
    n += gaps::post_h14_weekly_gap_cap(model, data, &gaps);

    PostResult { busy, gaps, dropped_pins, num_constraints: n }
}
