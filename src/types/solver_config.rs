use serde::{Deserialize, Serialize};

/// Solver parameters and soft-objective weights: the tuning knobs that have
/// no entity of their own but are required by the weighted-sum objective
/// and the diagnostic relaxer. Carried verbatim on every
/// [`crate::types::SchoolData`] and echoed back in the solution's config
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub time_limit_seconds: u32,
    /// 0 = use the machine's logical CPU count.
    pub num_workers: u32,

    pub weight_gaps: i64,
    pub weight_day_wishes: i64,
    pub weight_double_lessons: i64,
    pub weight_subject_spread: i64,
    /// Always active, even in `use_soft = false` mode — a structural pull
    /// toward full deputat utilization.
    pub weight_deputat_deviation: i64,

    /// Global default weekly gap cap used by H14 — skipped
    /// (no hard cap) when 0. A per-teacher `max_gaps_per_week` of 0 further
    /// overrides this per teacher.
    pub max_gaps_per_week: u32,

    /// Bounded additive buffer the relaxer (§4.7) adds to `deputat_max`
    /// instead of doubling a removed `deputat_tolerance` field. Never applied beyond `deputat_relax_buffer_cap`.
    pub deputat_relax_buffer: u32,
    pub deputat_relax_buffer_cap: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 300,
            num_workers: 0,
            weight_gaps: 200,
            weight_day_wishes: 20,
            weight_double_lessons: 40,
            weight_subject_spread: 60,
            weight_deputat_deviation: 50,
            max_gaps_per_week: 0,
            deputat_relax_buffer: 4,
            deputat_relax_buffer_cap: 6,
        }
    }
}
