//! Session and timetable (solution) models.
//!
//! A timetable is the set of sessions produced by one generation run.
//! Ordering inside the timetable carries no meaning.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Course, Instructor, Resource, TimeSlot};

/// One scheduled weekly occurrence of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session identifier (`{course_id}-{n:02}`).
    pub id: String,
    /// Owning course.
    pub course_id: String,
    /// Course name (denormalized for display).
    pub course_name: String,
    /// Weekday name.
    pub day_of_week: String,
    /// Start time (`HH:00`).
    pub start_time: String,
    /// End time (`HH:00`).
    pub end_time: String,
    /// Assigned room.
    pub resource_id: String,
    /// Room name (denormalized).
    pub resource_name: String,
    /// Assigned instructor.
    pub instructor_id: String,
    /// Instructor name (denormalized).
    pub instructor_name: String,
    /// Session type label (course code or `LECTURE`).
    pub session_type: String,
    /// Which stage of the engine placed this session.
    pub origin: SessionOrigin,
}

/// Provenance of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOrigin {
    /// Placed by the greedy constructive scheduler.
    Greedy,
    /// Read back from a constraint-programming solution.
    Solver,
    /// Placed by the manual fallback after the solver gave up.
    Fallback,
    /// Synthesized by the completeness repair pass.
    Repair,
}

/// A weekly timetable: the sessions of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Scheduled sessions.
    pub sessions: Vec<Session>,
}

impl Session {
    /// Builds a session for `course` at `slot` with the given room and instructor.
    ///
    /// `ordinal` is the 1-based index of this session within its course.
    pub fn new(
        course: &Course,
        ordinal: usize,
        slot: TimeSlot,
        room: &Resource,
        instructor: &Instructor,
        origin: SessionOrigin,
    ) -> Self {
        Self {
            id: format!("{}-{:02}", course.id, ordinal),
            course_id: course.id.clone(),
            course_name: course.name.clone(),
            day_of_week: slot.day_name().to_string(),
            start_time: slot.start_time(),
            end_time: slot.end_time(),
            resource_id: room.id.clone(),
            resource_name: room.name.clone(),
            instructor_id: instructor.id.clone(),
            instructor_name: instructor.name.clone(),
            session_type: course.session_type().to_string(),
            origin,
        }
    }

    /// Grid slot of this session, if its labels fall on the grid.
    pub fn slot(&self) -> Option<TimeSlot> {
        TimeSlot::from_labels(&self.day_of_week, &self.start_time)
    }

    /// Whether two sessions start at the same day and time.
    #[inline]
    pub fn shares_start(&self, other: &Session) -> bool {
        self.day_of_week == other.day_of_week && self.start_time == other.start_time
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session.
    pub fn add_session(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the timetable has no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions belonging to a course.
    pub fn sessions_for_course(&self, course_id: &str) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.course_id == course_id)
            .collect()
    }

    /// Sessions held in a room.
    pub fn sessions_for_resource(&self, resource_id: &str) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.resource_id == resource_id)
            .collect()
    }

    /// Sessions taught by an instructor.
    pub fn sessions_for_instructor(&self, instructor_id: &str) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.instructor_id == instructor_id)
            .collect()
    }

    /// Session count per course id.
    pub fn counts_by_course(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for s in &self.sessions {
            *counts.entry(s.course_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of sessions with the given origin.
    pub fn count_by_origin(&self, origin: SessionOrigin) -> usize {
        self.sessions.iter().filter(|s| s.origin == origin).count()
    }

    /// Number of sessions synthesized by the repair pass.
    pub fn filler_count(&self) -> usize {
        self.count_by_origin(SessionOrigin::Repair)
    }

    /// Whether any two sessions double-book a room or an instructor.
    ///
    /// See [`crate::conflict::has_conflicts`].
    pub fn has_conflicts(&self) -> bool {
        crate::conflict::has_conflicts(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timetable() -> Timetable {
        let course = Course::new("C1", "Algebra").with_code("MA101");
        let other = Course::new("C2", "Poetry");
        let r1 = Resource::new("R1", "ROOM").with_name("Room 1");
        let r2 = Resource::new("R2", "LAB").with_name("Lab 2");
        let l1 = Instructor::new("L1", "Ada");
        let l2 = Instructor::new("L2", "Grace");

        let mut t = Timetable::new();
        t.add_session(Session::new(&course, 1, TimeSlot::new(0, 0), &r1, &l1, SessionOrigin::Greedy));
        t.add_session(Session::new(&course, 2, TimeSlot::new(1, 3), &r2, &l1, SessionOrigin::Greedy));
        t.add_session(Session::new(&other, 1, TimeSlot::new(0, 0), &r2, &l2, SessionOrigin::Repair));
        t
    }

    #[test]
    fn test_session_fields() {
        let t = sample_timetable();
        let s = &t.sessions[1];
        assert_eq!(s.id, "C1-02");
        assert_eq!(s.day_of_week, "Tuesday");
        assert_eq!(s.start_time, "12:00");
        assert_eq!(s.end_time, "13:00");
        assert_eq!(s.resource_name, "Lab 2");
        assert_eq!(s.instructor_name, "Ada");
        assert_eq!(s.session_type, "MA101");
        assert_eq!(s.slot(), Some(TimeSlot::new(1, 3)));
        assert_eq!(t.sessions[2].session_type, "LECTURE");
    }

    #[test]
    fn test_queries() {
        let t = sample_timetable();
        assert_eq!(t.session_count(), 3);
        assert_eq!(t.sessions_for_course("C1").len(), 2);
        assert_eq!(t.sessions_for_resource("R2").len(), 2);
        assert_eq!(t.sessions_for_instructor("L2").len(), 1);
        assert_eq!(t.counts_by_course()["C1"], 2);
        assert_eq!(t.filler_count(), 1);
        assert_eq!(t.count_by_origin(SessionOrigin::Greedy), 2);
    }

    #[test]
    fn test_shares_start() {
        let t = sample_timetable();
        assert!(t.sessions[0].shares_start(&t.sessions[2]));
        assert!(!t.sessions[0].shares_start(&t.sessions[1]));
        assert!(!t.has_conflicts());
    }

    #[test]
    fn test_empty_timetable() {
        let t = Timetable::new();
        assert!(t.is_empty());
        assert_eq!(t.filler_count(), 0);
        assert!(t.counts_by_course().is_empty());
    }

    #[test]
    fn test_timetable_json_shape() {
        let t = sample_timetable();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"dayOfWeek\":\"Monday\""));
        assert!(json.contains("\"origin\":\"Repair\""));
        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
