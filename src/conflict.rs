//! Conflict detection.
//!
//! Two layers:
//! - **Range predicates** (`days_overlap`, `time_ranges_overlap`) decide
//!   whether two weekly bookings collide. Callers use them to filter
//!   candidate rooms and instructors against bookings the engine did not
//!   make (see [`free_rooms`], [`free_instructors`]).
//! - **Timetable audit** (`has_conflicts`, `find_conflicts`) checks produced
//!   sessions for a room or instructor booked twice at the same start.
//!
//! # Overlap semantics
//! Ranges are half-open: `[09:00, 10:00)` and `[10:00, 11:00)` do not
//! overlap. Two ranges overlap unless one ends at or before the other starts.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{Result, TimetableError};
use crate::models::{Instructor, Resource, Timetable};

/// Parses `HH:MM` into minutes after midnight.
pub fn parse_time(label: &str) -> Result<u32> {
    let invalid = || TimetableError::InvalidTime(label.to_string());
    let (h, m) = label.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = h.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = m.trim().parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Splits `HH:MM-HH:MM` into its two labels.
pub fn split_range(range: &str) -> Result<(&str, &str)> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| TimetableError::InvalidTimeRange(range.to_string()))?;
    Ok((start.trim(), end.trim()))
}

/// Whether two day sets share at least one weekday name.
///
/// Names are compared trimmed and case-insensitively.
pub fn days_overlap<A: AsRef<str>, B: AsRef<str>>(days_a: &[A], days_b: &[B]) -> bool {
    days_a.iter().any(|a| {
        days_b
            .iter()
            .any(|b| a.as_ref().trim().eq_ignore_ascii_case(b.as_ref().trim()))
    })
}

/// Fallible overlap test on `HH:MM` labels.
pub fn try_time_ranges_overlap(
    start_a: &str,
    end_a: &str,
    start_b: &str,
    end_b: &str,
) -> Result<bool> {
    let (sa, ea) = (parse_time(start_a)?, parse_time(end_a)?);
    let (sb, eb) = (parse_time(start_b)?, parse_time(end_b)?);
    Ok(!(ea <= sb || eb <= sa))
}

/// Whether `[start_a, end_a)` and `[start_b, end_b)` overlap.
///
/// Unparsable labels are logged and reported as not overlapping.
pub fn time_ranges_overlap(start_a: &str, end_a: &str, start_b: &str, end_b: &str) -> bool {
    match try_time_ranges_overlap(start_a, end_a, start_b, end_b) {
        Ok(overlap) => overlap,
        Err(e) => {
            warn!("Treating ranges as disjoint: {e}");
            false
        }
    }
}

/// A recurring weekly booking made outside the generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Booking {
    /// Weekday names the booking repeats on.
    pub days: Vec<String>,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
    /// Booked room, if any.
    pub room_id: Option<String>,
    /// Booked instructor, if any.
    pub instructor_id: Option<String>,
}

impl Booking {
    /// Creates a booking on the given days and time range.
    pub fn new<S: AsRef<str>>(days: &[S], start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            days: days.iter().map(|d| d.as_ref().to_string()).collect(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            room_id: None,
            instructor_id: None,
        }
    }

    /// Sets the booked room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Sets the booked instructor.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Whether this booking collides with a request on `days` in `[start, end)`.
    pub fn collides_with<S: AsRef<str>>(&self, days: &[S], start: &str, end: &str) -> bool {
        days_overlap(&self.days, days) && time_ranges_overlap(start, end, &self.start_time, &self.end_time)
    }
}

/// Rooms with no booking colliding with the requested days and range.
pub fn free_rooms<'a, S: AsRef<str>>(
    rooms: &'a [Resource],
    bookings: &[Booking],
    days: &[S],
    start: &str,
    end: &str,
) -> Vec<&'a Resource> {
    rooms
        .iter()
        .filter(|room| {
            !bookings.iter().any(|b| {
                b.room_id.as_deref() == Some(room.id.as_str()) && b.collides_with(days, start, end)
            })
        })
        .collect()
}

/// Instructors with no booking colliding with the requested days and range.
pub fn free_instructors<'a, S: AsRef<str>>(
    instructors: &'a [Instructor],
    bookings: &[Booking],
    days: &[S],
    start: &str,
    end: &str,
) -> Vec<&'a Instructor> {
    instructors
        .iter()
        .filter(|inst| {
            !bookings.iter().any(|b| {
                b.instructor_id.as_deref() == Some(inst.id.as_str()) && b.collides_with(days, start, end)
            })
        })
        .collect()
}

/// Classification of timetable conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A room hosts two sessions starting at the same day and time.
    RoomDoubleBooked,
    /// An instructor teaches two sessions starting at the same day and time.
    InstructorDoubleBooked,
}

/// A double-booking found in a timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Room or instructor id that is double-booked.
    pub entity_id: String,
    /// Weekday of the collision.
    pub day_of_week: String,
    /// Start time of the collision.
    pub start_time: String,
    /// The two colliding session ids (earlier one first).
    pub session_ids: (String, String),
}

impl Violation {
    /// Human-readable description.
    pub fn message(&self) -> String {
        let what = match self.violation_type {
            ViolationType::RoomDoubleBooked => "Room",
            ViolationType::InstructorDoubleBooked => "Instructor",
        };
        format!(
            "{what} '{}' double-booked on {} at {} by sessions {} and {}",
            self.entity_id, self.day_of_week, self.start_time, self.session_ids.0, self.session_ids.1
        )
    }
}

/// Whether any two sessions share (day, start) and a room or an instructor.
pub fn has_conflicts(timetable: &Timetable) -> bool {
    let mut rooms = HashSet::new();
    let mut instructors = HashSet::new();
    for s in &timetable.sessions {
        let key = (s.day_of_week.as_str(), s.start_time.as_str());
        if !rooms.insert((key, s.resource_id.as_str())) {
            return true;
        }
        if !instructors.insert((key, s.instructor_id.as_str())) {
            return true;
        }
    }
    false
}

/// Lists every double-booking in a timetable.
///
/// Each later session colliding with an earlier one yields one violation
/// per shared entity (room and/or instructor).
pub fn find_conflicts(timetable: &Timetable) -> Vec<Violation> {
    let mut rooms: HashMap<(&str, &str, &str), &str> = HashMap::new();
    let mut instructors: HashMap<(&str, &str, &str), &str> = HashMap::new();
    let mut violations = Vec::new();

    for s in &timetable.sessions {
        let (day, start) = (s.day_of_week.as_str(), s.start_time.as_str());
        let checks = [
            (ViolationType::RoomDoubleBooked, s.resource_id.as_str(), &mut rooms),
            (ViolationType::InstructorDoubleBooked, s.instructor_id.as_str(), &mut instructors),
        ];
        for (violation_type, entity, seen) in checks {
            match seen.get(&(day, start, entity)) {
                Some(first) => violations.push(Violation {
                    violation_type,
                    entity_id: entity.to_string(),
                    day_of_week: day.to_string(),
                    start_time: start.to_string(),
                    session_ids: (first.to_string(), s.id.clone()),
                }),
                None => {
                    seen.insert((day, start, entity), s.id.as_str());
                }
            }
        }
    }

    violations
}
