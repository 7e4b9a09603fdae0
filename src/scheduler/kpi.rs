//! Timetable quality metrics (KPIs).
//!
//! Computes distribution and integrity indicators from a generated
//! timetable and the courses it was generated for.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Sessions per day / hour | Occupancy histogram of the grid |
//! | Max day deviation | max_d \|count_d − ⌈n/5⌉\| |
//! | Max hour deviation | max_h \|count_h − ⌈n/8⌉\| |
//! | Back-to-back pairs | Instructor sessions in consecutive hours on one day |
//! | Conflicts | Room or instructor double-bookings |
//! | Filler | Sessions synthesized by the repair pass |
//! | Completeness | Fraction of courses at their required count |
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", §2: Evaluation

use std::collections::{HashMap, HashSet};

use crate::conflict::find_conflicts;
use crate::models::{Course, Timetable, DAYS_PER_WEEK, HOURS_PER_DAY};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Total sessions.
    pub session_count: usize,
    /// Sessions per weekday (Monday first).
    pub sessions_per_day: [usize; DAYS_PER_WEEK],
    /// Sessions per hour block (09:00 first).
    pub sessions_per_hour: [usize; HOURS_PER_DAY],
    /// Largest distance of a day's count from the even target.
    pub max_day_deviation: usize,
    /// Largest distance of an hour's count from the even target.
    pub max_hour_deviation: usize,
    /// Instructor sessions directly following another on the same day.
    pub back_to_back_pairs: usize,
    /// Number of double-bookings.
    pub conflict_count: usize,
    /// Sessions synthesized by the repair pass.
    pub filler_count: usize,
    /// Fraction of courses with at least their required sessions (0.0..1.0).
    pub completeness_rate: f64,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and its input courses.
    ///
    /// # Arguments
    /// * `timetable` - The generated timetable.
    /// * `courses` - The courses (for required session counts).
    pub fn calculate(timetable: &Timetable, courses: &[Course]) -> Self {
        let mut sessions_per_day = [0usize; DAYS_PER_WEEK];
        let mut sessions_per_hour = [0usize; HOURS_PER_DAY];
        let mut busy: HashMap<&str, HashSet<(usize, usize)>> = HashMap::new();

        for session in &timetable.sessions {
            if let Some(slot) = session.slot() {
                sessions_per_day[slot.day] += 1;
                sessions_per_hour[slot.hour] += 1;
                busy.entry(session.instructor_id.as_str())
                    .or_default()
                    .insert((slot.day, slot.hour));
            }
        }

        let n = timetable.session_count();
        let deviation = |counts: &[usize], target: usize| {
            counts.iter().map(|&c| c.abs_diff(target)).max().unwrap_or(0)
        };
        let max_day_deviation = deviation(&sessions_per_day, n.div_ceil(DAYS_PER_WEEK));
        let max_hour_deviation = deviation(&sessions_per_hour, n.div_ceil(HOURS_PER_DAY));

        let back_to_back_pairs = busy
            .values()
            .map(|slots| {
                slots
                    .iter()
                    .filter(|&&(day, hour)| hour > 0 && slots.contains(&(day, hour - 1)))
                    .count()
            })
            .sum();

        let counts = timetable.counts_by_course();
        let complete = courses
            .iter()
            .filter(|c| counts.get(c.id.as_str()).copied().unwrap_or(0) >= c.sessions_needed())
            .count();
        let completeness_rate = if courses.is_empty() {
            1.0
        } else {
            complete as f64 / courses.len() as f64
        };

        Self {
            session_count: n,
            sessions_per_day,
            sessions_per_hour,
            max_day_deviation,
            max_hour_deviation,
            back_to_back_pairs,
            conflict_count: find_conflicts(timetable).len(),
            filler_count: timetable.filler_count(),
            completeness_rate,
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_conflicts: usize, min_completeness: f64) -> bool {
        self.conflict_count <= max_conflicts && self.completeness_rate >= min_completeness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Instructor, Resource, Session, SessionOrigin, TimeSlot};

    fn make_session(course: &Course, n: usize, slot: TimeSlot, room: &str, instructor: &str, origin: SessionOrigin) -> Session {
        Session::new(
            course,
            n,
            slot,
            &Resource::new(room, "ROOM"),
            &Instructor::new(instructor, instructor),
            origin,
        )
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("C1", "Algebra").with_sessions(2),
            Course::new("C2", "Biology").with_sessions(2),
        ]
    }

    #[test]
    fn test_kpi_basic() {
        let courses = sample_courses();
        let mut t = Timetable::new();
        t.add_session(make_session(&courses[0], 1, TimeSlot::new(0, 0), "R1", "L1", SessionOrigin::Solver));
        t.add_session(make_session(&courses[0], 2, TimeSlot::new(0, 1), "R1", "L1", SessionOrigin::Solver));
        t.add_session(make_session(&courses[1], 1, TimeSlot::new(2, 4), "R2", "L2", SessionOrigin::Solver));

        let kpi = TimetableKpi::calculate(&t, &courses);
        assert_eq!(kpi.session_count, 3);
        assert_eq!(kpi.sessions_per_day, [2, 0, 1, 0, 0]);
        assert_eq!(kpi.sessions_per_hour[0], 1);
        assert_eq!(kpi.sessions_per_hour[4], 1);
        assert_eq!(kpi.max_day_deviation, 1); // target 1
        assert_eq!(kpi.max_hour_deviation, 1); // target 1, most hours empty
        assert_eq!(kpi.back_to_back_pairs, 1);
        assert_eq!(kpi.conflict_count, 0);
        assert!((kpi.completeness_rate - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_conflicts_and_filler() {
        let courses = sample_courses();
        let mut t = Timetable::new();
        t.add_session(make_session(&courses[0], 1, TimeSlot::new(1, 3), "R1", "L1", SessionOrigin::Greedy));
        t.add_session(make_session(&courses[0], 2, TimeSlot::new(1, 3), "R1", "L2", SessionOrigin::Repair));
        t.add_session(make_session(&courses[1], 1, TimeSlot::new(3, 3), "R2", "L2", SessionOrigin::Greedy));
        t.add_session(make_session(&courses[1], 2, TimeSlot::new(4, 3), "R2", "L2", SessionOrigin::Greedy));

        let kpi = TimetableKpi::calculate(&t, &courses);
        assert_eq!(kpi.conflict_count, 1);
        assert_eq!(kpi.filler_count, 1);
        assert!((kpi.completeness_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.back_to_back_pairs, 0);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(&Timetable::new(), &[]);
        assert_eq!(kpi.session_count, 0);
        assert_eq!(kpi.max_day_deviation, 0);
        assert_eq!(kpi.conflict_count, 0);
        assert!((kpi.completeness_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let courses = sample_courses();
        let mut t = Timetable::new();
        t.add_session(make_session(&courses[0], 1, TimeSlot::new(0, 0), "R1", "L1", SessionOrigin::Greedy));
        t.add_session(make_session(&courses[1], 1, TimeSlot::new(0, 0), "R1", "L2", SessionOrigin::Greedy));

        let kpi = TimetableKpi::calculate(&t, &courses);
        assert!(kpi.meets_thresholds(1, 0.0));
        assert!(!kpi.meets_thresholds(0, 0.0));
        assert!(!kpi.meets_thresholds(1, 0.5)); // Neither course complete
    }
}
