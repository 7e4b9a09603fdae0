//! Greedy constructive scheduler.
//!
//! # Algorithm
//!
//! For each course in input order, for each needed session:
//! 1. Shuffle the candidate rooms and instructors; take the first of each.
//! 2. Build a day order (shuffled with even distribution, else Monday first).
//!    Skip days on which the instructor already teaches `max_hours_per_day`.
//! 3. Build an hour order per day (fewest occupied neighbors first when
//!    avoiding back-to-back hours, else shuffled).
//! 4. Place the session in the first slot where both room and instructor
//!    are free. Sessions with no such slot stay unplaced for the repair pass.
//!
//! # Complexity
//! O(s × 40) tracker lookups for s sessions.
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{Problem, SchedulingStrategy, SessionRequest};
use crate::availability::AvailabilityTracker;
use crate::models::{SessionOrigin, TimeSlot, Timetable, DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::options::GeneratorOptions;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Greedy first-fit scheduler with seeded tie-breaking.
///
/// # Example
///
/// ```
/// use u_timetable::scheduler::{GreedyScheduler, SchedulingStrategy};
/// use u_timetable::models::{Course, Instructor, Resource};
/// use u_timetable::GeneratorOptions;
///
/// let rooms = vec![Resource::new("R1", "ROOM"), Resource::new("R2", "LAB")];
/// let instructors = vec![Instructor::new("L1", "Ada"), Instructor::new("L2", "Grace")];
/// let courses = vec![Course::new("C1", "Algebra").with_sessions(3)];
///
/// let scheduler = GreedyScheduler::new().with_seed(7);
/// let timetable = scheduler.generate(&rooms, &instructors, &courses, &GeneratorOptions::default());
/// assert_eq!(timetable.session_count(), 3);
/// assert!(!timetable.has_conflicts());
/// ```
#[derive(Debug, Clone)]
pub struct GreedyScheduler {
    seed: u64,
}

impl GreedyScheduler {
    /// Creates a scheduler with the default seed.
    pub fn new() -> Self {
        Self { seed: DEFAULT_SEED }
    }

    /// Sets the seed for shuffling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Places sessions greedily. Unplaceable sessions are left out.
    pub fn schedule(&self, problem: &Problem, options: &GeneratorOptions) -> Timetable {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut tracker = AvailabilityTracker::new(problem.rooms.len(), problem.instructors.len());
        let mut timetable = Timetable::new();

        for (course_index, course) in problem.courses.iter().enumerate() {
            let mut rooms = problem.room_candidates(course);
            let mut instructors = problem.instructor_candidates(course);

            for ordinal in 1..=course.sessions_needed() {
                rooms.shuffle(&mut rng);
                instructors.shuffle(&mut rng);
                let (Some(&room), Some(&instructor)) = (rooms.first(), instructors.first()) else {
                    break;
                };

                let request = SessionRequest {
                    course: course_index,
                    ordinal,
                };
                let slot = Self::find_slot(&tracker, room, instructor, options, &mut rng);
                match slot.and_then(|slot| {
                    problem
                        .session(request, slot, room, instructor, SessionOrigin::Greedy)
                        .map(|session| (slot, session))
                }) {
                    Some((slot, session)) => {
                        debug!(
                            "Placed {} at {} {} in {} with {}",
                            session.id, session.day_of_week, session.start_time, session.resource_id, session.instructor_id
                        );
                        tracker.occupy(room, instructor, slot);
                        timetable.add_session(session);
                    }
                    None => warn!(
                        "No free slot for session {} of course {} (room {}, instructor {})",
                        ordinal, course.id, problem.rooms[room].id, problem.instructors[instructor].id
                    ),
                }
            }
        }

        timetable
    }

    /// First slot in preference order where room and instructor are both free.
    fn find_slot(
        tracker: &AvailabilityTracker,
        room: usize,
        instructor: usize,
        options: &GeneratorOptions,
        rng: &mut ChaCha8Rng,
    ) -> Option<TimeSlot> {
        let mut days: Vec<usize> = (0..DAYS_PER_WEEK).collect();
        if options.prefer_even_distribution {
            days.shuffle(rng);
        }
        let hours_on: Vec<usize> = (0..DAYS_PER_WEEK)
            .map(|d| tracker.instructor_hours_on(instructor, d))
            .collect();

        for day in days {
            if hours_on[day] >= options.max_hours_per_day {
                continue;
            }

            let mut hours: Vec<usize> = (0..HOURS_PER_DAY).collect();
            if options.avoid_back_to_back {
                hours.sort_by_key(|&h| tracker.back_to_back_score(instructor, day, h));
            } else {
                hours.shuffle(rng);
            }

            if let Some(hour) = hours
                .into_iter()
                .find(|&h| tracker.is_free(room, instructor, TimeSlot { day, hour: h }))
            {
                return Some(TimeSlot { day, hour });
            }
        }
        None
    }
}

impl Default for GreedyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingStrategy for GreedyScheduler {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn place(&self, problem: &Problem, options: &GeneratorOptions) -> Timetable {
        self.schedule(problem, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Instructor, Resource};

    fn make_rooms(n: usize) -> Vec<Resource> {
        (1..=n).map(|i| Resource::new(format!("R{i}"), "ROOM")).collect()
    }

    fn make_instructors(n: usize) -> Vec<Instructor> {
        (1..=n).map(|i| Instructor::new(format!("L{i}"), format!("Instructor {i}"))).collect()
    }

    fn make_problem(rooms: usize, instructors: usize, courses: &[Course]) -> Problem {
        Problem::prepare(&make_rooms(rooms), &make_instructors(instructors), courses, &GeneratorOptions::default())
    }

    #[test]
    fn test_small_scenario() {
        let p = make_problem(2, 2, &[Course::new("C1", "Algebra").with_sessions(3)]);
        let t = GreedyScheduler::new().schedule(&p, &GeneratorOptions::default());

        assert_eq!(t.session_count(), 3);
        assert!(!t.has_conflicts());
        assert!(t.sessions.iter().all(|s| s.origin == SessionOrigin::Greedy));
        let ids: Vec<&str> = t.sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["C1-01", "C1-02", "C1-03"]);
    }

    #[test]
    fn test_same_seed_same_timetable() {
        let courses = vec![
            Course::new("C1", "Algebra").with_sessions(4),
            Course::new("C2", "Biology").with_sessions(3),
        ];
        let p = make_problem(3, 3, &courses);
        let options = GeneratorOptions::default().with_even_distribution(true);
        let a = GreedyScheduler::new().with_seed(9).schedule(&p, &options);
        let b = GreedyScheduler::new().with_seed(9).schedule(&p, &options);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pins_honored() {
        let courses = vec![Course::new("C1", "Algebra").with_sessions(5).with_room("R3").with_instructor("L2")];
        let p = make_problem(3, 3, &courses);
        let t = GreedyScheduler::new().schedule(&p, &GeneratorOptions::default());

        assert_eq!(t.session_count(), 5);
        assert!(t.sessions.iter().all(|s| s.resource_id == "R3" && s.instructor_id == "L2"));
        assert!(!t.has_conflicts());
    }

    #[test]
    fn test_preferred_pool() {
        let courses = vec![Course::new("C1", "Algebra")
            .with_sessions(4)
            .with_preferred_instructor("L3")];
        let p = make_problem(2, 3, &courses);
        let t = GreedyScheduler::new().schedule(&p, &GeneratorOptions::default());
        assert!(t.sessions.iter().all(|s| s.instructor_id == "L3"));
    }

    #[test]
    fn test_room_type_matching() {
        let rooms = vec![
            Resource::new("R1", "LECTURE HALL"),
            Resource::new("R2", "CHEMISTRY LAB"),
        ];
        let courses = vec![Course::new("C1", "Chemistry").with_sessions(3).with_room_type("LAB")];
        let p = Problem::prepare(&rooms, &make_instructors(2), &courses, &GeneratorOptions::default());
        let t = GreedyScheduler::new().schedule(&p, &GeneratorOptions::default());
        assert!(t.sessions.iter().all(|s| s.resource_id == "R2"));
    }

    #[test]
    fn test_max_hours_per_day() {
        let courses = vec![Course::new("C1", "Algebra").with_sessions(10).with_instructor("L1")];
        let p = make_problem(1, 1, &courses);
        let options = GeneratorOptions::default().with_max_hours_per_day(2);
        let t = GreedyScheduler::new().schedule(&p, &options);

        assert_eq!(t.session_count(), 10);
        for day in crate::models::WEEKDAYS {
            let on_day = t.sessions.iter().filter(|s| s.day_of_week == day).count();
            assert!(on_day <= 2, "{day} has {on_day} sessions");
        }
    }

    #[test]
    fn test_cap_leaves_sessions_unplaced() {
        let courses = vec![Course::new("C1", "Algebra").with_sessions(7)];
        let p = make_problem(1, 1, &courses);
        let options = GeneratorOptions::default().with_max_hours_per_day(1);
        let t = GreedyScheduler::new().schedule(&p, &options);
        assert_eq!(t.session_count(), 5);
    }

    #[test]
    fn test_avoid_back_to_back() {
        // One instructor, four sessions on a single allowed day pattern:
        // with back-to-back avoidance the first free hours are non-adjacent.
        let courses = vec![Course::new("C1", "Algebra").with_sessions(4)];
        let p = make_problem(1, 1, &courses);
        let options = GeneratorOptions::default()
            .with_avoid_back_to_back(true)
            .with_max_hours_per_day(8);
        let t = GreedyScheduler::new().schedule(&p, &options);

        let mut hours: Vec<usize> = t.sessions.iter().filter_map(|s| s.slot()).map(|s| s.hour).collect();
        hours.sort_unstable();
        assert_eq!(hours, vec![0, 2, 4, 6]);
        assert!(t.sessions.iter().all(|s| s.day_of_week == "Monday"));
    }

    #[test]
    fn test_even_distribution_shuffles_days() {
        let courses = vec![Course::new("C1", "Algebra").with_sessions(5)];
        let p = make_problem(1, 1, &courses);
        let natural = GeneratorOptions::default().with_max_hours_per_day(8);
        let spread = natural.clone().with_even_distribution(true);
        let on_monday = |t: &Timetable| t.sessions.iter().all(|s| s.day_of_week == "Monday");

        for seed in 0..20 {
            let t = GreedyScheduler::new().with_seed(seed).schedule(&p, &natural);
            assert_eq!(t.session_count(), 5);
            assert!(on_monday(&t));
        }

        let shuffled = (0..20)
            .map(|seed| GreedyScheduler::new().with_seed(seed).schedule(&p, &spread))
            .filter(|t| !on_monday(t))
            .count();
        assert!(shuffled > 0);
    }

    #[test]
    fn test_full_week_single_room() {
        let courses = vec![Course::new("C1", "Algebra").with_sessions(40)];
        let p = make_problem(1, 1, &courses);
        let options = GeneratorOptions::default().with_max_hours_per_day(8);
        let t = GreedyScheduler::new().schedule(&p, &options);
        assert_eq!(t.session_count(), 40);
        assert!(!t.has_conflicts());
    }
}
