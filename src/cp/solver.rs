//! Solver seam for the timetable model.
//!
//! [`HighsSolver`] hands a [`TimetableModel`] to HiGHS through `good_lp`
//! and reads the one-hot assignment back as [`Placement`]s. Budgets map to
//! HiGHS options: `time_limit` (seconds) and `mip_max_nodes`.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use good_lp::solvers::SolutionStatus;
use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use log::{trace, warn};

use super::{Placement, TimetableModel};

/// HiGHS random seed; fixed so repeated runs agree.
const SOLVER_SEED: i32 = 1234;

/// Search limits.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock budget.
    pub time_limit: Duration,
    /// Optional cap on branch-and-bound nodes.
    pub max_nodes: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            max_nodes: None,
        }
    }
}

impl SolverConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the node budget.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// The same limits, doubled.
    pub fn doubled(&self) -> Self {
        Self {
            time_limit: self.time_limit.saturating_mul(2),
            max_nodes: self.max_nodes.map(|n| n.saturating_mul(2)),
        }
    }
}

/// Outcome of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// A solution was found but a limit stopped the proof.
    Feasible,
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// A limit was hit before any solution was found.
    Unknown,
}

/// Result of a solve call.
#[derive(Debug, Clone)]
pub struct CpSolution {
    pub status: SolveStatus,
    /// One placement per session, in request order (empty without a solution).
    pub placements: Vec<Placement>,
    /// `maxDayDiff + maxHourDiff` of the returned placements.
    pub objective_value: Option<i64>,
    pub elapsed: Duration,
}

impl CpSolution {
    /// A solution-less outcome.
    pub fn unsolved(status: SolveStatus, elapsed: Duration) -> Self {
        Self {
            status,
            placements: Vec::new(),
            objective_value: None,
            elapsed,
        }
    }

    /// Whether placements are available.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Anything that can solve a built timetable model.
pub trait CpSolver: Debug + Send + Sync {
    /// Solves the model within the configured limits.
    fn solve(&self, model: TimetableModel, config: &SolverConfig) -> CpSolution;
}

/// Mixed-integer solver backed by HiGHS.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

impl HighsSolver {
    /// Creates a solver.
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for HighsSolver {
    fn solve(&self, model: TimetableModel, config: &SolverConfig) -> CpSolution {
        let started = Instant::now();
        let TimetableModel {
            variables,
            constraints,
            objective,
            sessions,
            day_targets,
            hour_targets,
        } = model;

        let mut lp = variables
            .minimise(objective)
            .using(default_solver)
            .set_option("output_flag", false)
            .set_option("threads", 1)
            .set_option("random_seed", SOLVER_SEED)
            .set_option("time_limit", config.time_limit.as_secs_f64());
        if let Some(nodes) = config.max_nodes {
            lp = lp.set_option("mip_max_nodes", i32::try_from(nodes).unwrap_or(i32::MAX));
        }
        for constraint in constraints {
            lp.add_constraint(constraint);
        }

        let outcome = lp.solve();
        let elapsed = started.elapsed();
        let solution = match outcome {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => return CpSolution::unsolved(SolveStatus::Infeasible, elapsed),
            Err(e) => {
                warn!("HiGHS stopped without a solution: {e}");
                return CpSolution::unsolved(SolveStatus::Unknown, elapsed);
            }
        };

        // A limit can stop HiGHS before any incumbent; the columns are then
        // not a complete assignment.
        let Some(placements) = super::decode_placements(&sessions, |v| solution.value(v)) else {
            trace!("HiGHS returned no complete assignment after {elapsed:?}");
            return CpSolution::unsolved(SolveStatus::Unknown, elapsed);
        };

        let status = match solution.status() {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            _ => SolveStatus::Feasible,
        };
        let objective_value = super::fairness_deviation(&placements, &day_targets, &hour_targets);
        CpSolution {
            status,
            placements,
            objective_value: Some(objective_value),
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubled() {
        let c = SolverConfig::default().with_max_nodes(500).doubled();
        assert_eq!(c.time_limit, Duration::from_secs(60));
        assert_eq!(c.max_nodes, Some(1000));
        assert_eq!(SolverConfig::default().doubled().max_nodes, None);
    }

    #[test]
    fn test_unsolved() {
        let s = CpSolution::unsolved(SolveStatus::Unknown, Duration::ZERO);
        assert!(!s.is_solution_found());
        assert!(s.placements.is_empty());
        assert_eq!(s.objective_value, None);
    }
}
