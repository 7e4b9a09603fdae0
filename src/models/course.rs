//! Course model.
//!
//! A course is a unit of teaching that needs a fixed number of one-hour
//! sessions per week. Courses are read-only input to the schedulers.

use serde::{Deserialize, Serialize};

/// A course to be placed on the weekly timetable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Display name (unique case-insensitively among active courses).
    pub name: String,
    /// Course code, also used as the session type label.
    pub code: String,
    /// Owning department. Doubles as the room requirement when
    /// `required_room_type` is absent.
    pub department: String,
    /// Sessions required per week. Values ≤ 0 are treated as 1.
    pub required_sessions_per_week: i32,
    /// Required room category (e.g. "LAB", "LECTURE_HALL").
    pub required_room_type: Option<String>,
    /// Pinned instructor.
    pub instructor_id: Option<String>,
    /// Pinned room.
    pub room_id: Option<String>,
    /// Instructors preferred for this course when none is pinned.
    pub preferred_instructors: Vec<String>,
}

impl Course {
    /// Creates a course needing one session per week.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            required_sessions_per_week: 1,
            ..Default::default()
        }
    }

    /// Sets the course code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the weekly session count.
    pub fn with_sessions(mut self, sessions: i32) -> Self {
        self.required_sessions_per_week = sessions;
        self
    }

    /// Sets the required room category.
    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.required_room_type = Some(room_type.into());
        self
    }

    /// Pins the course to an instructor.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Pins the course to a room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Adds an instructor to the preferred pool.
    pub fn with_preferred_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.preferred_instructors.push(instructor_id.into());
        self
    }

    /// Number of sessions to place (at least 1).
    #[inline]
    pub fn sessions_needed(&self) -> usize {
        self.required_sessions_per_week.max(1) as usize
    }

    /// Room requirement: the explicit room type, else the department.
    ///
    /// Blank strings count as absent.
    pub fn room_requirement(&self) -> Option<&str> {
        self.required_room_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.department.trim()).filter(|s| !s.is_empty()))
    }

    /// Pinned instructor id, if set and non-blank.
    pub fn pinned_instructor(&self) -> Option<&str> {
        non_blank(self.instructor_id.as_deref())
    }

    /// Pinned room id, if set and non-blank.
    pub fn pinned_room(&self) -> Option<&str> {
        non_blank(self.room_id.as_deref())
    }

    /// Session type label: the course code, or `LECTURE` without one.
    pub fn session_type(&self) -> &str {
        if self.code.trim().is_empty() {
            "LECTURE"
        } else {
            &self.code
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
