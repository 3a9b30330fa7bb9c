//! CP-SAT based weekly timetable solver for Sekundarstufe I schools.
//!
//! Pipeline: [`types::SchoolData`] (input) → [`feasibility`] (cheap
//! structural pre-check) → [`slot_index`] + [`variables`] (CP-SAT model
//! construction) → [`constraints`] + [`objective`] (model population) →
//! [`driver`] (warm-start, then solve) → [`extract`] (solution +
//! room assignment), with [`relax`] as the INFEASIBLE diagnostic path.

mod and_aux;

pub mod constraints;
pub mod driver;
pub mod error;
pub mod extract;
pub mod feasibility;
pub mod objective;
pub mod relax;
pub mod slot_index;
pub mod types;
pub mod variables;

pub use error::{Error, Result};
pub use extract::{ScheduleEntry, ScheduleSolution, SolverStatus, TeacherAssignment};
pub use relax::{RelaxReport, RelaxationRun};

/// Runs the full pipeline: warm-start solve, main solve, extraction. Does
/// not invoke the relaxer — call [`relax::diagnose`] separately when the
/// caller wants a diagnostic on an INFEASIBLE result.
pub fn solve(
    data: &types::SchoolData,
    pins: &[types::PinnedLesson],
    ov: &variables::ModelOverride,
) -> ScheduleSolution {
    let outcome = driver::solve(data, pins, ov);
    extract::extract(data, outcome)
}
