use serde::{Deserialize, Serialize};

/// `coupling_type` discriminant. `ReliEthik` groups religion/ethics tracks
/// within a grade; `Wpf` groups elective ("Wahlpflichtfach") tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingType {
    ReliEthik,
    Wpf,
}

/// One group within a coupling, e.g. "evangelisch" within a `reli_5`
/// coupling. Hours are shared across all groups of the same coupling
///.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingGroup {
    pub group_name: String,
    pub subject: String,
    pub hours_per_week: u32,
}

/// A cross-class coupling: all `involved_class_ids` are scheduled
/// simultaneously into the coupling's slots, with students regrouped into
/// `groups` that the solver assigns a teacher each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupling {
    pub id: String,
    pub coupling_type: CouplingType,
    pub involved_class_ids: Vec<String>,
    pub groups: Vec<CouplingGroup>,
    pub hours_per_week: u32,
    pub cross_class: bool,
}

impl Coupling {
    /// The placeholder subject key used to mark a class's curriculum entry
    /// as satisfied exclusively through a `Wpf` coupling.
    pub const WPF_PLACEHOLDER_SUBJECT: &'static str = "WPF";

    /// Subjects this coupling removes from direct per-class scheduling.
    pub fn covered_subjects(&self) -> Vec<String> {
        match self.coupling_type {
            CouplingType::Wpf => vec![Self::WPF_PLACEHOLDER_SUBJECT.to_string()],
            CouplingType::ReliEthik => {
                self.groups.iter().map(|g| g.subject.clone()).collect()
            }
        }
    }
}
