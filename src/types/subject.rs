use serde::{Deserialize, Serialize};

/// Broad grouping used by the subject-spread soft penalty and by feasibility
/// reporting; mirrors the categories used throughout German Stundenplan
/// software (Hauptfach/Sprache/Naturwissenschaft/...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectCategory {
    Hauptfach,
    Sprache,
    Nw,
    Musisch,
    Sport,
    Gesellschaft,
    Wpf,
    Sonstig,
}

/// An immutable subject definition. `name` is the long form used as a
/// curriculum key; `short` is the two-letter abbreviation used on rendered
/// timetables (out of scope here, but carried through for the downstream
/// renderer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub short: String,
    pub category: SubjectCategory,
    pub is_main: bool,
    /// Room type this subject must be taught in, e.g. `"chemie"`. `None`
    /// means a class's home room suffices.
    pub required_room_type: Option<String>,
    pub double_required: bool,
    pub double_preferred: bool,
}

impl Subject {
    pub fn needs_special_room(&self) -> bool {
        self.required_room_type.is_some()
    }

    pub fn wants_double(&self) -> bool {
        self.double_required || self.double_preferred
    }
}
