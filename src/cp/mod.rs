//! Timetable formulation for a mixed-integer solver.
//!
//! Builds a `good_lp` model from a prepared [`Problem`], solves it with any
//! [`CpSolver`] (HiGHS by default), and decodes the assignment back into
//! sessions.
//!
//! # Model
//!
//! Each session's `day`, `hour`, `room` and `instructor` are one-hot
//! encoded: a binary `x[s,t,r]` per slot `t` and candidate room `r`, and a
//! binary `y[s,t,l]` per slot and candidate instructor `l`.
//!
//! - Each session takes exactly one `(t, r)`, and the same `t` for its
//!   instructor: `Σ_r x[s,t,r] = Σ_l y[s,t,l]` for every `t`.
//! - Hard: two sessions in one slot never share a room or an instructor:
//!   `Σ_s x[s,t,r] ≤ 1` and `Σ_s y[s,t,l] ≤ 1`.
//! - Soft: `dayCount_d` and `hourCount_h` are sums of `x`, with targets
//!   `⌈n/5⌉` per day and `⌈n/8⌉` per hour (scaled for midday hours).
//!   `maxDayDiff ≥ |dayCount_d − target_d|`, `maxHourDiff ≥ |hourCount_h −
//!   target_h|`; minimize `maxDayDiff + maxHourDiff`.
//!
//! Sessions of one course are interchangeable, so they are ordered by slot.
//!
//! # Reference
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

pub mod solver;

pub use solver::{CpSolution, CpSolver, HighsSolver, SolveStatus, SolverConfig};

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use log::debug;

use crate::models::{Session, SessionOrigin, TimeSlot, DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::scheduler::{Problem, SessionRequest};

/// Hour indices that get the midday target bump by default (11:00-15:00).
pub const DEFAULT_MIDDAY_HOURS: RangeInclusive<usize> = 2..=5;

/// Default midday target multiplier.
pub const DEFAULT_MIDDAY_WEIGHT: f64 = 1.2;

/// Where one session ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub slot: TimeSlot,
    /// Index into [`Problem::rooms`].
    pub room: usize,
    /// Index into [`Problem::instructors`].
    pub instructor: usize,
}

/// Decision variables of one session.
#[derive(Debug, Clone)]
pub struct SessionVars {
    /// The session these variables place.
    pub request: SessionRequest,
    /// `x[s,t,r]`: one binary per slot and candidate room.
    pub rooms: Vec<(TimeSlot, usize, Variable)>,
    /// `y[s,t,l]`: one binary per slot and candidate instructor.
    pub instructors: Vec<(TimeSlot, usize, Variable)>,
}

/// A built model, ready to hand to a [`CpSolver`].
pub struct TimetableModel {
    pub variables: ProblemVariables,
    pub constraints: Vec<Constraint>,
    /// `maxDayDiff + maxHourDiff`, minimized.
    pub objective: Expression,
    /// Variables per session, in request order.
    pub sessions: Vec<SessionVars>,
    pub day_targets: Vec<i64>,
    pub hour_targets: Vec<i64>,
}

impl TimetableModel {
    /// Number of decision variables: the session binaries plus the two
    /// deviation bounds.
    pub fn variable_count(&self) -> usize {
        self.sessions
            .iter()
            .map(|s| s.rooms.len() + s.instructors.len())
            .sum::<usize>()
            + 2
    }

    /// Number of linear constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

/// Builds the timetable model from a prepared problem.
///
/// # Example
/// ```no_run
/// use u_timetable::cp::{HighsSolver, SolverConfig, TimetableCpBuilder};
/// use u_timetable::models::{Course, Instructor, Resource};
/// use u_timetable::scheduler::Problem;
/// use u_timetable::GeneratorOptions;
///
/// let problem = Problem::prepare(
///     &[Resource::new("R1", "ROOM")],
///     &[Instructor::new("L1", "Ada")],
///     &[Course::new("C1", "Algebra").with_sessions(2)],
///     &GeneratorOptions::default(),
/// );
/// let builder = TimetableCpBuilder::new(&problem);
/// let (sessions, solution) = builder.solve(&HighsSolver::new(), &SolverConfig::default());
/// assert!(solution.is_solution_found());
/// assert_eq!(sessions.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableCpBuilder<'a> {
    problem: &'a Problem,
    midday_hours: RangeInclusive<usize>,
    midday_weight: f64,
}

impl<'a> TimetableCpBuilder<'a> {
    /// Creates a builder with the default midday preference.
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            midday_hours: DEFAULT_MIDDAY_HOURS,
            midday_weight: DEFAULT_MIDDAY_WEIGHT,
        }
    }

    /// Sets the hour indices whose target is scaled.
    pub fn with_midday_hours(mut self, hours: RangeInclusive<usize>) -> Self {
        self.midday_hours = hours;
        self
    }

    /// Sets the midday target multiplier.
    pub fn with_midday_weight(mut self, weight: f64) -> Self {
        self.midday_weight = weight;
        self
    }

    /// Target session count per day.
    pub fn day_targets(&self, total: usize) -> Vec<i64> {
        vec![total.div_ceil(DAYS_PER_WEEK) as i64; DAYS_PER_WEEK]
    }

    /// Target session count per hour, midday hours scaled by the weight.
    pub fn hour_targets(&self, total: usize) -> Vec<i64> {
        let ideal = total.div_ceil(HOURS_PER_DAY) as i64;
        (0..HOURS_PER_DAY)
            .map(|h| {
                if self.midday_hours.contains(&h) {
                    (ideal as f64 * self.midday_weight).round() as i64
                } else {
                    ideal
                }
            })
            .collect()
    }

    /// Builds the model.
    ///
    /// Creates:
    /// - Slot × room and slot × instructor binaries per session
    /// - Exactly-one and same-slot linking rows per session
    /// - One capacity row per (slot, room) and per (slot, instructor)
    /// - Day/hour deviation rows and the min-max fairness objective
    pub fn build(&self) -> TimetableModel {
        let problem = self.problem;
        let requests = problem.session_requests();
        let n = requests.len();

        let mut variables = ProblemVariables::new();
        let mut constraints = Vec::new();
        let mut room_use: BTreeMap<(TimeSlot, usize), Vec<Variable>> = BTreeMap::new();
        let mut instructor_use: BTreeMap<(TimeSlot, usize), Vec<Variable>> = BTreeMap::new();
        let mut day_terms: Vec<Vec<Variable>> = vec![Vec::new(); DAYS_PER_WEEK];
        let mut hour_terms: Vec<Vec<Variable>> = vec![Vec::new(); HOURS_PER_DAY];

        let mut sessions: Vec<SessionVars> = Vec::with_capacity(n);
        for request in &requests {
            let course = &problem.courses[request.course];
            let room_candidates = problem.room_candidates(course);
            let instructor_candidates = problem.instructor_candidates(course);
            let mut rooms = Vec::new();
            let mut instructors = Vec::new();

            for slot in TimeSlot::all() {
                let mut in_room = Vec::with_capacity(room_candidates.len());
                for &r in &room_candidates {
                    let x = variables.add(variable().binary());
                    rooms.push((slot, r, x));
                    room_use.entry((slot, r)).or_default().push(x);
                    day_terms[slot.day].push(x);
                    hour_terms[slot.hour].push(x);
                    in_room.push(x);
                }
                let mut taught = Vec::with_capacity(instructor_candidates.len());
                for &l in &instructor_candidates {
                    let y = variables.add(variable().binary());
                    instructors.push((slot, l, y));
                    instructor_use.entry((slot, l)).or_default().push(y);
                    taught.push(y);
                }
                let roomed: Expression = in_room.into_iter().sum();
                let staffed: Expression = taught.into_iter().sum();
                constraints.push(constraint!(roomed == staffed));
            }

            let placed_once: Expression = rooms.iter().map(|&(_, _, x)| x).sum();
            constraints.push(constraint!(placed_once == 1));

            if let Some(previous) = sessions.last().filter(|s| s.request.course == request.course) {
                let earlier = slot_position(&previous.rooms);
                let later = slot_position(&rooms);
                constraints.push(constraint!(earlier <= later));
            }

            sessions.push(SessionVars {
                request: *request,
                rooms,
                instructors,
            });
        }

        // Hard: at most one session per room and per instructor in a slot.
        for group in room_use.into_values().chain(instructor_use.into_values()) {
            if group.len() > 1 {
                let occupied: Expression = group.into_iter().sum();
                constraints.push(constraint!(occupied <= 1));
            }
        }

        // Soft: min-max deviation of day and hour occupancy from targets.
        let day_targets = self.day_targets(n);
        let hour_targets = self.hour_targets(n);
        let max_day_diff = variables.add(variable().integer().min(0));
        let max_hour_diff = variables.add(variable().integer().min(0));
        add_deviation(&mut constraints, max_day_diff, &day_terms, &day_targets);
        add_deviation(&mut constraints, max_hour_diff, &hour_terms, &hour_targets);

        let model = TimetableModel {
            variables,
            constraints,
            objective: max_day_diff + max_hour_diff,
            sessions,
            day_targets,
            hour_targets,
        };
        debug!(
            "Built timetable model: {} sessions, {} vars, {} constraints",
            n,
            model.variable_count(),
            model.constraint_count()
        );
        model
    }

    /// Builds and solves, returning decoded sessions and the raw solution.
    pub fn solve<S: CpSolver>(&self, solver: &S, config: &SolverConfig) -> (Vec<Session>, CpSolution) {
        let solution = solver.solve(self.build(), config);
        let sessions = self.decode_solution(&solution);
        (sessions, solution)
    }

    /// Decodes a solution into sessions. Empty if no solution was found.
    pub fn decode_solution(&self, solution: &CpSolution) -> Vec<Session> {
        if !solution.is_solution_found() {
            return Vec::new();
        }
        self.problem
            .session_requests()
            .into_iter()
            .zip(&solution.placements)
            .filter_map(|(request, p)| {
                self.problem
                    .session(request, p.slot, p.room, p.instructor, SessionOrigin::Solver)
            })
            .collect()
    }
}

/// Linear position of a session's slot, `Σ t·x[s,t,r]`.
fn slot_position(rooms: &[(TimeSlot, usize, Variable)]) -> Expression {
    rooms
        .iter()
        .map(|&(slot, _, x)| (slot.day * HOURS_PER_DAY + slot.hour) as f64 * x)
        .sum()
}

/// `bound ≥ |Σ terms[v] − targets[v]|` for every value `v`.
fn add_deviation(constraints: &mut Vec<Constraint>, bound: Variable, terms: &[Vec<Variable>], targets: &[i64]) {
    for (vars, &target) in terms.iter().zip(targets) {
        let target = target as f64;
        let count: Expression = vars.iter().copied().sum();
        constraints.push(constraint!(count.clone() - bound <= target));
        constraints.push(constraint!(count + bound >= target));
    }
}

/// Reads the one-hot assignment. `None` unless every session has a slot,
/// a room and an instructor in that slot.
pub fn decode_placements<F>(sessions: &[SessionVars], value: F) -> Option<Vec<Placement>>
where
    F: Fn(Variable) -> f64,
{
    sessions
        .iter()
        .map(|s| {
            let &(slot, room, _) = s.rooms.iter().find(|&&(_, _, x)| value(x) > 0.5)?;
            let &(_, instructor, _) = s
                .instructors
                .iter()
                .find(|&&(t, _, y)| t == slot && value(y) > 0.5)?;
            Some(Placement { slot, room, instructor })
        })
        .collect()
}

/// `maxDayDiff + maxHourDiff` of concrete placements.
pub fn fairness_deviation(placements: &[Placement], day_targets: &[i64], hour_targets: &[i64]) -> i64 {
    let mut days = vec![0i64; DAYS_PER_WEEK];
    let mut hours = vec![0i64; HOURS_PER_DAY];
    for p in placements {
        days[p.slot.day] += 1;
        hours[p.slot.hour] += 1;
    }
    let widest = |counts: &[i64], targets: &[i64]| {
        counts
            .iter()
            .zip(targets)
            .map(|(c, t)| (c - t).abs())
            .max()
            .unwrap_or(0)
    };
    widest(&days, day_targets) + widest(&hours, hour_targets)
}
