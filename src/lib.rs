//! Weekly class timetabling for the U-Engine ecosystem.
//!
//! Places the weekly sessions of a set of courses onto a 5-day × 8-hour grid,
//! assigning each one a room and an instructor without double-booking either.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Resource`, `Instructor`,
//!   `Session`, `Timetable`, `TimeSlot`
//! - **`scheduler`**: Greedy and constraint-programming strategies, input
//!   preparation, timetable KPIs
//! - **`cp`**: Integer-programming timetable model solved with HiGHS (`good_lp`)
//! - **`repair`**: Completeness repair pass and manual fallback placement
//! - **`conflict`**: Double-booking detection and external booking filters
//! - **`manual`**: Instructor proximity ranking for hand scheduling
//! - **`validation`**: Input integrity checks (duplicate ids, dangling pins)
//! - **`options`**: Caller-facing generation options
//!
//! # Contract
//!
//! Generation never fails. Given non-empty inputs, every course ends up with
//! exactly its required number of sessions. When the optimizing pass cannot
//! place them all, the repair pass synthesizes the rest and may reintroduce
//! conflicts; callers check [`has_conflicts`] or [`find_conflicts`].
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Course, Instructor, Resource};
//! use u_timetable::{generate, has_conflicts, GeneratorOptions, Strategy};
//!
//! let rooms = vec![Resource::new("R1", "LECTURE ROOM"), Resource::new("R2", "COMPUTER LAB")];
//! let instructors = vec![Instructor::new("L1", "Ada"), Instructor::new("L2", "Grace")];
//! let courses = vec![
//!     Course::new("C1", "Algebra").with_sessions(3),
//!     Course::new("C2", "Programming").with_sessions(2).with_room_type("LAB"),
//! ];
//!
//! let timetable = generate(Strategy::Greedy, &rooms, &instructors, &courses, &GeneratorOptions::default());
//! assert_eq!(timetable.session_count(), 5);
//! assert!(!has_conflicts(&timetable));
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"
//! - Wolsey (1998), "Integer Programming"

pub mod availability;
pub mod conflict;
pub mod cp;
pub mod error;
pub mod manual;
pub mod models;
pub mod options;
pub mod repair;
pub mod scheduler;
pub mod validation;

pub use conflict::{find_conflicts, has_conflicts, Violation, ViolationType};
pub use error::{Result, TimetableError};
pub use models::{Course, Instructor, Resource, Session, SessionOrigin, Timetable};
pub use options::GeneratorOptions;
pub use scheduler::{SchedulingStrategy, Strategy, TimetableKpi};

/// Generates a timetable with the default configuration of `strategy`.
pub fn generate(
    strategy: Strategy,
    rooms: &[Resource],
    instructors: &[Instructor],
    courses: &[Course],
    options: &GeneratorOptions,
) -> Timetable {
    strategy.scheduler().generate(rooms, instructors, courses, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_generate_scenario() {
        init_logger();
        let rooms = vec![
            Resource::new("R1", "LECTURE ROOM").with_name("A101"),
            Resource::new("R2", "LAB").with_name("B201"),
        ];
        let instructors = vec![Instructor::new("L1", "Ada"), Instructor::new("L2", "Grace")];
        let courses = vec![
            Course::new("C1", "Algebra").with_sessions(2),
            Course::new("C2", "Chemistry").with_sessions(2).with_room_type("LAB"),
        ];

        let t = generate(Strategy::Greedy, &rooms, &instructors, &courses, &GeneratorOptions::default());
        assert_eq!(t.session_count(), 4);
        assert!(find_conflicts(&t).is_empty());

        let kpi = TimetableKpi::calculate(&t, &courses);
        assert!(kpi.meets_thresholds(0, 1.0));
        assert_eq!(kpi.filler_count, 0);
    }

    #[test]
    fn test_generate_empty_inputs() {
        init_logger();
        let t = generate(Strategy::ConstraintProgramming, &[], &[], &[], &GeneratorOptions::default());
        assert!(t.is_empty());
    }

    #[test]
    fn test_generate_cp_scenario() {
        init_logger();
        let rooms = vec![Resource::new("R1", "ROOM"), Resource::new("R2", "ROOM")];
        let instructors = vec![Instructor::new("L1", "Ada"), Instructor::new("L2", "Grace")];
        let courses = vec![Course::new("C1", "Algebra").with_sessions(3)];

        let t = generate(
            Strategy::ConstraintProgramming,
            &rooms,
            &instructors,
            &courses,
            &GeneratorOptions::default(),
        );
        assert_eq!(t.session_count(), 3);
        assert_eq!(t.count_by_origin(SessionOrigin::Solver), 3);
        assert!(!has_conflicts(&t));
    }
}
