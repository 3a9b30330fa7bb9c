//! C8: diagnostic constraint relaxer. Triggered when the main solve comes
//! back INFEASIBLE — runs five short sibling solves, each lifting one
//! (or all) hard constraint toggle, and reports which restores feasibility
//!.

use serde::{Deserialize, Serialize};

use crate::driver;
use crate::extract::SolverStatus;
use crate::types::{PinnedLesson, SchoolData};
use crate::variables::ModelOverride;

const RELAX_TIME_LIMIT_SECONDS: u32 = 30;
const RELAX_NUM_WORKERS: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxationRun {
    pub label: String,
    pub status: SolverStatus,
    pub solve_time_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxReport {
    pub runs: Vec<RelaxationRun>,
    pub recommendation: String,
}

/// Runs the five scoped relaxations in spec order and synthesizes a
/// recommendation from whichever restored feasibility. Each run gets its
/// own short-budget solve; none of these touch the caller's original
/// `SchoolData`.
pub fn diagnose(data: &SchoolData, pins: &[PinnedLesson]) -> RelaxReport {
    let scoped = data_for_relax_runs(data);

    let scenarios: [(&str, ModelOverride); 5] = [
        (
            "lift double-required",
            ModelOverride { force_no_double_required: true, ..ModelOverride::none() },
        ),
        (
            "unlimited specialty-room capacity",
            ModelOverride { unlimited_room_capacity: true, ..ModelOverride::none() },
        ),
        (
            "remove couplings",
            ModelOverride { disable_couplings: true, ..ModelOverride::none() },
        ),
        (
            "widen deputat tolerance",
            ModelOverride {
                deputat_relax_buffer: scoped.solver.deputat_relax_buffer_cap,
                ..ModelOverride::none()
            },
        ),
        (
            "all relaxations combined",
            ModelOverride {
                force_no_double_required: true,
                unlimited_room_capacity: true,
                disable_couplings: true,
                deputat_relax_buffer: scoped.solver.deputat_relax_buffer_cap,
            },
        ),
    ];

    let mut runs = Vec::with_capacity(scenarios.len());
    for (label, ov) in scenarios {
        let outcome = driver::solve(&scoped, pins, &ov);
        let status: SolverStatus = outcome.status.into();
        log::info!("relax run '{label}' finished with status {status:?} in {:?}", outcome.solve_time);
        runs.push(RelaxationRun {
            label: label.to_string(),
            status,
            solve_time_seconds: outcome.solve_time.as_secs_f64(),
        });
    }

    let recommendation = synthesize_recommendation(&runs);
    RelaxReport { runs, recommendation }
}

/// Each relax run gets the short diagnostic time budget regardless of
/// whatever the caller configured for the real solve.
fn data_for_relax_runs(data: &SchoolData) -> SchoolData {
    let mut scoped = data.clone();
    scoped.solver.time_limit_seconds = RELAX_TIME_LIMIT_SECONDS;
    scoped.solver.num_workers = RELAX_NUM_WORKERS;
    scoped
}

fn feasible(status: SolverStatus) -> bool {
    matches!(status, SolverStatus::Optimal | SolverStatus::Feasible)
}

fn synthesize_recommendation(runs: &[RelaxationRun]) -> String {
    let [double_run, room_run, coupling_run, deputat_run, combined_run] = runs else {
        return "relaxer did not run the expected five scenarios".to_string();
    };

    if feasible(double_run.status) {
        return "lift double_required: one or more double-block subjects cannot fit \
                their required slot pairing; specific subjects lack slot combinations"
            .to_string();
    }
    if feasible(room_run.status) {
        return "specialty room shortage: a required room type has too few physical \
                rooms for the demand placed on it"
            .to_string();
    }
    if feasible(coupling_run.status) {
        return "coupling conflict: one or more coupling groups cannot be scheduled \
                alongside the classes' other constraints"
            .to_string();
    }
    if feasible(deputat_run.status) {
        return "deputat shortage: teacher hour bounds are too tight for the demand \
                placed on their subjects; consider widening deputat_max"
            .to_string();
    }
    if feasible(combined_run.status) {
        return "no single relaxation restores feasibility on its own, but the \
                combination of all four does; the conflict spans multiple constraint \
                families"
            .to_string();
    }
    "overall capacity shortage: the conflict survives every individual and combined \
     relaxation; re-examine global hour balance and teacher availability"
        .to_string()
}
