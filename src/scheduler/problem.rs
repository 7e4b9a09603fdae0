//! Normalized scheduling input.
//!
//! [`Problem::prepare`] turns raw caller data into what the strategies
//! work on:
//! 1. Courses without an ID or a name are skipped.
//! 2. Later duplicates (same ID, or same name ignoring case) are skipped.
//! 3. Session counts ≤ 0 are coerced to 1.
//! 4. Rooms flagged unavailable or named on the deny-list are removed.
//! 5. Later rooms or instructors reusing an ID are dropped.
//!
//! Every adjustment is logged; none is fatal.

use std::collections::HashSet;

use log::{debug, warn};

use crate::models::{Course, Instructor, Resource, Session, SessionOrigin, TimeSlot};
use crate::options::GeneratorOptions;
use crate::validation::validate_input;

/// Input container for generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Candidate rooms.
    pub rooms: Vec<Resource>,
    /// Candidate instructors.
    pub instructors: Vec<Instructor>,
    /// Courses to place.
    pub courses: Vec<Course>,
    /// Soft-constraint options.
    pub options: GeneratorOptions,
}

impl GenerationRequest {
    /// Creates a request with default options.
    pub fn new(rooms: Vec<Resource>, instructors: Vec<Instructor>, courses: Vec<Course>) -> Self {
        Self {
            rooms,
            instructors,
            courses,
            options: GeneratorOptions::default(),
        }
    }

    /// Sets the options.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }
}

/// One session still to be placed: the `ordinal`-th (1-based) of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRequest {
    /// Index into [`Problem::courses`].
    pub course: usize,
    /// 1-based position within the course.
    pub ordinal: usize,
}

/// Prepared rooms, instructors, and courses.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    /// Schedulable rooms.
    pub rooms: Vec<Resource>,
    /// Instructors.
    pub instructors: Vec<Instructor>,
    /// Normalized courses, in input order.
    pub courses: Vec<Course>,
}

impl Problem {
    /// Normalizes raw input. See the module documentation.
    pub fn prepare(
        rooms: &[Resource],
        instructors: &[Instructor],
        courses: &[Course],
        options: &GeneratorOptions,
    ) -> Self {
        if let Err(errors) = validate_input(courses, rooms, instructors) {
            for e in &errors {
                warn!("Input issue ({:?}): {}", e.kind, e);
            }
        }

        let mut room_ids = HashSet::new();
        let rooms: Vec<Resource> = rooms
            .iter()
            .filter(|r| {
                if !room_ids.insert(r.id.clone()) {
                    warn!("Skipping room '{}': duplicate id", r.id);
                    false
                } else if !r.available {
                    debug!("Room {} excluded: unavailable", r.id);
                    false
                } else if r.is_excluded_by(&options.excluded_room_names) {
                    debug!("Room {} ({}) excluded: deny-list", r.id, r.name);
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect();

        let mut instructor_ids = HashSet::new();
        let instructors: Vec<Instructor> = instructors
            .iter()
            .filter(|i| {
                let fresh = instructor_ids.insert(i.id.clone());
                if !fresh {
                    warn!("Skipping instructor '{}': duplicate id", i.id);
                }
                fresh
            })
            .cloned()
            .collect();

        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();
        let mut prepared = Vec::with_capacity(courses.len());
        for course in courses {
            if course.id.trim().is_empty() || course.name.trim().is_empty() {
                warn!("Skipping course '{}': missing id or name", course.id);
                continue;
            }
            if !seen_ids.insert(course.id.clone()) {
                warn!("Skipping course '{}': duplicate id", course.id);
                continue;
            }
            if !seen_names.insert(course.name.trim().to_lowercase()) {
                warn!("Skipping course '{}': duplicate name '{}'", course.id, course.name);
                continue;
            }

            let mut course = course.clone();
            if course.required_sessions_per_week <= 0 {
                warn!(
                    "Course '{}' requests {} sessions; using 1",
                    course.id, course.required_sessions_per_week
                );
                course.required_sessions_per_week = 1;
            }
            prepared.push(course);
        }

        Self {
            rooms,
            instructors,
            courses: prepared,
        }
    }

    /// Whether there is nothing to schedule (no rooms, instructors, or courses).
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() || self.instructors.is_empty() || self.courses.is_empty()
    }

    /// All sessions to place, course by course.
    pub fn session_requests(&self) -> Vec<SessionRequest> {
        self.courses
            .iter()
            .enumerate()
            .flat_map(|(course, c)| (1..=c.sessions_needed()).map(move |ordinal| SessionRequest { course, ordinal }))
            .collect()
    }

    /// Total sessions required.
    pub fn total_sessions(&self) -> usize {
        self.courses.iter().map(Course::sessions_needed).sum()
    }

    pub fn room_index(&self, id: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == id)
    }

    pub fn instructor_index(&self, id: &str) -> Option<usize> {
        self.instructors.iter().position(|i| i.id == id)
    }

    /// Rooms matching the course's requirement, or all rooms if none match.
    pub fn compatible_rooms(&self, course: &Course) -> Vec<usize> {
        let all = || (0..self.rooms.len()).collect::<Vec<_>>();
        let Some(requirement) = course.room_requirement() else {
            return all();
        };
        let matching: Vec<usize> = self
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.satisfies(requirement))
            .map(|(i, _)| i)
            .collect();
        if matching.is_empty() {
            debug!(
                "No room matches '{}' for course {}; using all rooms",
                requirement, course.id
            );
            all()
        } else {
            matching
        }
    }

    /// Candidate rooms: the pinned room if it resolves, else compatible rooms.
    pub fn room_candidates(&self, course: &Course) -> Vec<usize> {
        match course.pinned_room().and_then(|id| self.room_index(id)) {
            Some(index) => vec![index],
            None => self.compatible_rooms(course),
        }
    }

    /// Candidate instructors: the pinned instructor if it resolves, else the
    /// resolvable preferred pool, else everyone.
    pub fn instructor_candidates(&self, course: &Course) -> Vec<usize> {
        if let Some(index) = course.pinned_instructor().and_then(|id| self.instructor_index(id)) {
            return vec![index];
        }
        let preferred: Vec<usize> = course
            .preferred_instructors
            .iter()
            .filter_map(|id| self.instructor_index(id))
            .collect();
        if preferred.is_empty() {
            (0..self.instructors.len()).collect()
        } else {
            preferred
        }
    }

    /// Materializes a session. Indices are clamped to the last valid entry.
    pub fn session(
        &self,
        request: SessionRequest,
        slot: TimeSlot,
        room: usize,
        instructor: usize,
        origin: SessionOrigin,
    ) -> Option<Session> {
        let course = self.courses.get(request.course)?;
        let room = self.rooms.get(room.min(self.rooms.len().checked_sub(1)?))?;
        let instructor = self
            .instructors
            .get(instructor.min(self.instructors.len().checked_sub(1)?))?;
        Some(Session::new(course, request.ordinal, slot, room, instructor, origin))
    }
}
