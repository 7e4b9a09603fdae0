//! Constraint-programming scheduler.
//!
//! # Lifecycle
//!
//! `Built → Solving → {Solved, TimedOut}`; a timeout re-enters `Solving`
//! once with a doubled budget. A second timeout, or a proven infeasible
//! model, falls back to [`crate::repair::manual_timetable`]. A timetable is
//! always returned.

use std::ops::RangeInclusive;

use log::{info, warn};

use super::{Problem, SchedulingStrategy};
use crate::cp::{
    CpSolver, HighsSolver, SolveStatus, SolverConfig, TimetableCpBuilder, DEFAULT_MIDDAY_HOURS,
    DEFAULT_MIDDAY_WEIGHT,
};
use crate::models::Timetable;
use crate::options::GeneratorOptions;
use crate::repair;

/// Configuration of the CP scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct CpConfig {
    /// Search limits for the first attempt.
    pub solver: SolverConfig,
    /// Hours whose occupancy target is scaled by `midday_weight`.
    pub midday_hours: RangeInclusive<usize>,
    /// Midday target multiplier.
    pub midday_weight: f64,
    /// Retry once with doubled limits after a timeout.
    pub retry_on_timeout: bool,
}

impl Default for CpConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            midday_hours: DEFAULT_MIDDAY_HOURS,
            midday_weight: DEFAULT_MIDDAY_WEIGHT,
            retry_on_timeout: true,
        }
    }
}

impl CpConfig {
    /// Sets the search limits.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the midday hours.
    pub fn with_midday_hours(mut self, hours: RangeInclusive<usize>) -> Self {
        self.midday_hours = hours;
        self
    }

    /// Sets the midday multiplier.
    pub fn with_midday_weight(mut self, weight: f64) -> Self {
        self.midday_weight = weight;
        self
    }

    /// Enables or disables the timeout retry.
    pub fn with_retry_on_timeout(mut self, retry: bool) -> Self {
        self.retry_on_timeout = retry;
        self
    }
}

/// Scheduler that solves all sessions jointly.
#[derive(Debug, Clone, Default)]
pub struct CpScheduler<S = HighsSolver> {
    config: CpConfig,
    solver: S,
}

impl CpScheduler {
    /// Creates a HiGHS-backed scheduler with default limits (30 s, one retry).
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: CpSolver> CpScheduler<S> {
    /// Sets the configuration.
    pub fn with_config(mut self, config: CpConfig) -> Self {
        self.config = config;
        self
    }

    /// Swaps the solver backend.
    pub fn with_backend<T: CpSolver>(self, solver: T) -> CpScheduler<T> {
        CpScheduler {
            config: self.config,
            solver,
        }
    }

    pub fn config(&self) -> &CpConfig {
        &self.config
    }

    /// Solves the problem, falling back to manual placement on failure.
    pub fn schedule(&self, problem: &Problem) -> Timetable {
        let builder = TimetableCpBuilder::new(problem)
            .with_midday_hours(self.config.midday_hours.clone())
            .with_midday_weight(self.config.midday_weight);

        info!(
            "CP search: {} sessions, limit {:?}",
            problem.total_sessions(),
            self.config.solver.time_limit
        );
        let mut solution = self.solver.solve(builder.build(), &self.config.solver);

        if solution.status == SolveStatus::Unknown && self.config.retry_on_timeout {
            let extended = self.config.solver.doubled();
            warn!(
                "CP search timed out after {:?}; retrying with limit {:?}",
                solution.elapsed, extended.time_limit
            );
            solution = self.solver.solve(builder.build(), &extended);
        }

        match solution.status {
            SolveStatus::Optimal | SolveStatus::Feasible => {
                info!(
                    "CP search {:?}: objective {:?}, {:?}",
                    solution.status, solution.objective_value, solution.elapsed
                );
                Timetable {
                    sessions: builder.decode_solution(&solution),
                }
            }
            SolveStatus::Infeasible | SolveStatus::Unknown => {
                warn!("CP search ended {:?}; falling back to manual placement", solution.status);
                repair::manual_timetable(problem)
            }
        }
    }
}

impl<S: CpSolver> SchedulingStrategy for CpScheduler<S> {
    fn name(&self) -> &'static str {
        "cp"
    }

    fn place(&self, problem: &Problem, _options: &GeneratorOptions) -> Timetable {
        self.schedule(problem)
    }
}
