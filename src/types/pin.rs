use serde::{Deserialize, Serialize};

/// A user-forced assignment: the solver must place this exact
/// (teacher, class, subject) lesson at this exact (day, slot).
/// Treated as a hard equality constraint on the matching `slot` decision
/// variable; pins whose variable does not exist are
/// dropped with a warning, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinnedLesson {
    pub teacher_id: String,
    pub class_id: String,
    pub subject: String,
    pub day: u32,
    pub slot_number: u32,
}

impl PinnedLesson {
    pub fn new(
        teacher_id: impl Into<String>,
        class_id: impl Into<String>,
        subject: impl Into<String>,
        day: u32,
        slot_number: u32,
    ) -> Self {
        Self {
            teacher_id: teacher_id.into().to_uppercase(),
            class_id: class_id.into(),
            subject: subject.into(),
            day,
            slot_number,
        }
    }
}
