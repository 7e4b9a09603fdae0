//! Timetable generators and quality metrics.
//!
//! Two strategies place sessions on the weekly grid:
//!
//! - [`GreedyScheduler`]: first-fit construction with seeded shuffling.
//!   Fast, never optimal, may leave sessions unplaced.
//! - [`CpScheduler`]: places all sessions at once with a constraint model
//!   and a fairness objective; retries once with a doubled budget on
//!   timeout and falls back to a manual placement after that.
//!
//! Both run behind [`SchedulingStrategy::generate`], which prepares the
//! input, places sessions, and runs the completeness repair pass
//! ([`crate::repair::complete`]).
//!
//! # KPI
//!
//! [`TimetableKpi`] measures distribution, conflicts, and how much of a
//! timetable is repair filler.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

mod constraint;
mod greedy;
mod kpi;
mod problem;

pub use constraint::{CpConfig, CpScheduler};
pub use greedy::{GreedyScheduler, DEFAULT_SEED};
pub use kpi::TimetableKpi;
pub use problem::{GenerationRequest, Problem, SessionRequest};

use std::fmt::Debug;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::models::{Course, Instructor, Resource, Timetable};
use crate::options::GeneratorOptions;
use crate::repair;

/// A timetable generation strategy.
///
/// Implementors only provide [`place`](SchedulingStrategy::place); the
/// provided [`generate`](SchedulingStrategy::generate) wraps it with input
/// preparation and the completeness repair pass, so every strategy honors
/// the same contract: one session per required course session.
pub trait SchedulingStrategy: Send + Sync + Debug {
    /// Strategy name (e.g., "greedy", "cp").
    fn name(&self) -> &'static str;

    /// Places sessions for a prepared, non-empty problem.
    ///
    /// May return fewer sessions than required; must not double-book
    /// sessions it places itself, except on explicit fallback paths.
    fn place(&self, problem: &Problem, options: &GeneratorOptions) -> Timetable;

    /// Generates a complete timetable.
    ///
    /// Empty rooms, instructors, or courses yield an empty timetable.
    fn generate(
        &self,
        rooms: &[Resource],
        instructors: &[Instructor],
        courses: &[Course],
        options: &GeneratorOptions,
    ) -> Timetable {
        debug!("Generating with '{}' strategy, options {:?}", self.name(), options);
        let problem = Problem::prepare(rooms, instructors, courses, options);
        if problem.is_empty() {
            info!(
                "Nothing to schedule: {} rooms, {} instructors, {} courses",
                problem.rooms.len(),
                problem.instructors.len(),
                problem.courses.len()
            );
            return Timetable::new();
        }

        let mut timetable = self.place(&problem, options);
        repair::complete(&problem, &mut timetable);
        timetable
    }

    /// Generates from a request.
    fn generate_request(&self, request: &GenerationRequest) -> Timetable {
        self.generate(
            &request.rooms,
            &request.instructors,
            &request.courses,
            &request.options,
        )
    }
}

/// Strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// [`GreedyScheduler`] with the default seed.
    Greedy,
    /// [`CpScheduler`] with the default configuration.
    #[default]
    ConstraintProgramming,
}

impl Strategy {
    /// Instantiates the strategy with its default configuration.
    pub fn scheduler(self) -> Box<dyn SchedulingStrategy> {
        match self {
            Strategy::Greedy => Box::new(GreedyScheduler::new()),
            Strategy::ConstraintProgramming => Box::new(CpScheduler::new()),
        }
    }
}
