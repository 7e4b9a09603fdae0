//! Timetabling domain models.
//!
//! Provides the input types supplied by the caller (courses, rooms,
//! instructors) and the output types produced by a generation run
//! (sessions collected into a timetable).
//!
//! # Domain Mappings
//!
//! | u-timetable | University | School | Training Center |
//! |-------------|------------|--------|-----------------|
//! | Course | Module | Subject | Program |
//! | Resource | Lecture Hall/Lab | Classroom | Training Room |
//! | Instructor | Lecturer | Teacher | Trainer |
//! | Session | Weekly Lecture | Period | Class Slot |
//! | Timetable | Semester Grid | Weekly Plan | Roster |
//!
//! # Week Model
//!
//! A week is [`DAYS_PER_WEEK`] weekdays × [`HOURS_PER_DAY`] one-hour blocks
//! starting at [`START_HOUR`]:00. Schedulers work with `(day, hour)` indices;
//! sessions carry the rendered weekday name and `HH:00` times.

mod course;
mod instructor;
mod resource;
mod session;
mod slot;

pub use course::Course;
pub use instructor::Instructor;
pub use resource::{Resource, RoomCategory};
pub use session::{Session, SessionOrigin, Timetable};
pub use slot::{TimeSlot, DAYS_PER_WEEK, HOURS_PER_DAY, SLOTS_PER_WEEK, START_HOUR, WEEKDAYS};
