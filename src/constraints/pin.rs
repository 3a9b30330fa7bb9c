//! H13: pinned lessons. A pin referencing a variable that
//! was never created (subject not in that class's curriculum, teacher not
//! qualified, ...) is dropped with a warning rather than erroring — pin
//! conflicts are a problem-space outcome, not a contract violation
//!.

use cp_sat::builder::{CpModelBuilder, LinearExpr};

use crate::types::PinnedLesson;
use crate::variables::Variables;

pub fn post_h13_pins(
    model: &mut CpModelBuilder,
    vars: &Variables,
    pins: &[PinnedLesson],
) -> Vec<PinnedLesson> {
    let mut dropped = Vec::new();
    for pin in pins {
        let key = (
            pin.teacher_id.clone(),
            pin.class_id.clone(),
            pin.subject.clone(),
            pin.day,
            pin.slot_number,
        );
        match vars.slot.get(&key) {
            Some(var) => {
                model.add_eq(LinearExpr::from(var.clone()), LinearExpr::from(1));
            }
            None => {
                log::warn!(
                    "dropping pin {}/{}/{} at (day {}, slot {}): no matching variable",
                    pin.teacher_id, pin.class_id, pin.subject, pin.day, pin.slot_number
                );
                dropped.push(pin.clone());
            }
        }
    }
    dropped
}
