//! Input validation for timetabling problems.
//!
//! Checks structural integrity of courses, rooms, and instructors
//! before scheduling. Detects:
//! - Duplicate IDs (per entity kind)
//! - Duplicate course names (case-insensitive)
//! - Missing course IDs or names
//! - Non-positive weekly session counts
//! - Pinned room/instructor references that do not resolve
//!
//! None of these are fatal for generation: the schedulers normalize the
//! input (see [`crate::scheduler::Problem::prepare`]) and log what this
//! module reports.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Course, Instructor, Resource};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// Two courses share a name (ignoring case).
    DuplicateCourseName,
    /// A course has an empty ID or name.
    MissingCourseField,
    /// A course requires zero or fewer sessions per week.
    NonPositiveSessions,
    /// A course is pinned to an instructor that doesn't exist.
    UnknownInstructorReference,
    /// A course is pinned to a room that doesn't exist.
    UnknownRoomReference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. No duplicate room IDs
/// 2. No duplicate instructor IDs
/// 3. Every course has an ID and a name
/// 4. No duplicate course IDs or (case-insensitive) names
/// 5. Weekly session counts are positive
/// 6. Pinned rooms and instructors exist
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    courses: &[Course],
    rooms: &[Resource],
    instructors: &[Instructor],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for r in rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
    }

    let mut instructor_ids = HashSet::new();
    for i in instructors {
        if !instructor_ids.insert(i.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate instructor ID: {}", i.id),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    let mut course_names = HashSet::new();
    for course in courses {
        if course.id.trim().is_empty() || course.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCourseField,
                format!("Course '{}' is missing an ID or a name", course.id),
            ));
            continue;
        }

        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
        if !course_names.insert(course.name.trim().to_lowercase()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourseName,
                format!("Duplicate course name: {}", course.name),
            ));
        }

        if course.required_sessions_per_week <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSessions,
                format!(
                    "Course '{}' requires {} sessions per week",
                    course.id, course.required_sessions_per_week
                ),
            ));
        }

        if let Some(instructor) = course.pinned_instructor() {
            if !instructor_ids.contains(instructor) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownInstructorReference,
                    format!(
                        "Course '{}' references unknown instructor '{}'",
                        course.id, instructor
                    ),
                ));
            }
        }
        if let Some(room) = course.pinned_room() {
            if !room_ids.contains(room) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRoomReference,
                    format!("Course '{}' references unknown room '{}'", course.id, room),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rooms() -> Vec<Resource> {
        vec![
            Resource::new("R1", "LECTURE ROOM").with_name("Room 1"),
            Resource::new("R2", "LAB").with_name("Lab 2"),
        ]
    }

    fn sample_instructors() -> Vec<Instructor> {
        vec![Instructor::new("L1", "Ada"), Instructor::new("L2", "Grace")]
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("C1", "Algebra").with_sessions(3).with_instructor("L1"),
            Course::new("C2", "Chemistry").with_room_type("LAB").with_room("R2"),
        ]
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let result = validate_input(&sample_courses(), &sample_rooms(), &sample_instructors());
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_room_and_instructor_id() {
        let mut rooms = sample_rooms();
        rooms.push(Resource::new("R1", "LAB"));
        let mut instructors = sample_instructors();
        instructors.push(Instructor::new("L2", "Other"));

        let k = kinds(validate_input(&sample_courses(), &rooms, &instructors));
        assert_eq!(k, vec![ValidationErrorKind::DuplicateId, ValidationErrorKind::DuplicateId]);
    }

    #[test]
    fn test_duplicate_course_name_ignores_case() {
        let courses = vec![Course::new("C1", "Algebra"), Course::new("C2", " ALGEBRA ")];
        let k = kinds(validate_input(&courses, &sample_rooms(), &sample_instructors()));
        assert_eq!(k, vec![ValidationErrorKind::DuplicateCourseName]);
    }

    #[test]
    fn test_missing_name() {
        let courses = vec![Course::new("C1", ""), Course::new("", "Nameless id")];
        let k = kinds(validate_input(&courses, &sample_rooms(), &sample_instructors()));
        assert_eq!(
            k,
            vec![
                ValidationErrorKind::MissingCourseField,
                ValidationErrorKind::MissingCourseField
            ]
        );
    }

    #[test]
    fn test_non_positive_sessions() {
        let courses = vec![Course::new("C1", "Algebra").with_sessions(0)];
        let result = validate_input(&courses, &sample_rooms(), &sample_instructors());
        let errors = result.unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveSessions);
        assert_eq!(errors[0].to_string(), "Course 'C1' requires 0 sessions per week");
    }

    #[test]
    fn test_unknown_references() {
        let courses = vec![
            Course::new("C1", "Algebra").with_instructor("L9"),
            Course::new("C2", "Chemistry").with_room("R9"),
        ];
        let k = kinds(validate_input(&courses, &sample_rooms(), &sample_instructors()));
        assert_eq!(
            k,
            vec![
                ValidationErrorKind::UnknownInstructorReference,
                ValidationErrorKind::UnknownRoomReference
            ]
        );
    }

    #[test]
    fn test_multiple_errors_collected() {
        let courses = vec![
            Course::new("C1", "Algebra").with_sessions(-2),
            Course::new("C1", "Geometry").with_room("R9"),
        ];
        let errors = validate_input(&courses, &sample_rooms(), &sample_instructors()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
