//! Completeness repair and manual fallback placement.
//!
//! [`complete`] runs after every strategy and guarantees that each course
//! has exactly its required number of sessions. Missing sessions are
//! synthesized on a deterministic round-robin over the grid, offset by how
//! many sessions the course already has. For `i` in `placed..needed`:
//!
//! ```text
//! day  = (i mod 5 + placed) mod 5
//! hour = ((i div 5) mod 8 + placed) mod 8
//! ```
//!
//! Completeness wins over conflict-freedom: a synthesized session is kept
//! even if it double-books. Every one is logged and tagged
//! [`SessionOrigin::Repair`].
//!
//! [`manual_timetable`] is the CP scheduler's last resort. It places
//! sessions one by one on the least-loaded day and hour, scanning other
//! hours and then other days for a free room/instructor pair, and
//! force-places (with a warning) when the whole grid is taken.

use std::collections::{HashMap, HashSet};

use log::{info, warn};

use crate::availability::AvailabilityTracker;
use crate::models::{Session, SessionOrigin, TimeSlot, Timetable, DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::scheduler::{Problem, SessionRequest};

/// Builds a tracker reflecting the sessions already in `timetable`.
fn tracker_for(problem: &Problem, timetable: &Timetable) -> AvailabilityTracker {
    let mut tracker = AvailabilityTracker::new(problem.rooms.len(), problem.instructors.len());
    for session in &timetable.sessions {
        let (Some(slot), Some(room), Some(instructor)) = (
            session.slot(),
            problem.room_index(&session.resource_id),
            problem.instructor_index(&session.instructor_id),
        ) else {
            continue;
        };
        tracker.occupy(room, instructor, slot);
    }
    tracker
}

/// First candidate free at `slot`, else the first candidate.
fn pick(candidates: &[usize], is_free: impl Fn(usize) -> bool) -> Option<usize> {
    candidates
        .iter()
        .copied()
        .find(|&c| is_free(c))
        .or_else(|| candidates.first().copied())
}

/// Appends missing sessions so every course reaches its required count.
///
/// Returns the number of sessions synthesized.
pub fn complete(problem: &Problem, timetable: &mut Timetable) -> usize {
    let mut tracker = tracker_for(problem, timetable);
    let mut synthesized = 0;

    for (course_index, course) in problem.courses.iter().enumerate() {
        let existing: HashSet<String> = timetable
            .sessions_for_course(&course.id)
            .into_iter()
            .map(|s| s.id.clone())
            .collect();
        let placed = existing.len();
        let needed = course.sessions_needed();
        if placed >= needed {
            continue;
        }

        let rooms = problem.room_candidates(course);
        let instructors = problem.instructor_candidates(course);
        let mut free_ordinals = (1..).filter(|n| !existing.contains(&format!("{}-{:02}", course.id, n)));

        for i in placed..needed {
            let slot = TimeSlot::new(
                (i % DAYS_PER_WEEK + placed) % DAYS_PER_WEEK,
                ((i / DAYS_PER_WEEK) % HOURS_PER_DAY + placed) % HOURS_PER_DAY,
            );
            let Some(ordinal) = free_ordinals.next() else {
                break;
            };
            let room = pick(&rooms, |r| tracker.is_room_free(r, slot.day, slot.hour));
            let instructor = pick(&instructors, |l| tracker.is_instructor_free(l, slot.day, slot.hour));
            let (Some(room), Some(instructor)) = (room, instructor) else {
                break;
            };

            let request = SessionRequest {
                course: course_index,
                ordinal,
            };
            if let Some(session) = problem.session(request, slot, room, instructor, SessionOrigin::Repair) {
                warn!(
                    "repair: synthesized {} for course {} at {} {} (room {}, instructor {})",
                    session.id,
                    course.id,
                    session.day_of_week,
                    session.start_time,
                    session.resource_id,
                    session.instructor_id
                );
                tracker.occupy(room, instructor, slot);
                timetable.add_session(session);
                synthesized += 1;
            }
        }
    }

    let counts = timetable.counts_by_course();
    let complete_courses = problem
        .courses
        .iter()
        .filter(|c| counts.get(c.id.as_str()).copied().unwrap_or(0) >= c.sessions_needed())
        .count();
    info!(
        "Timetable: {} sessions, {}/{} courses complete, {} synthesized by repair",
        timetable.session_count(),
        complete_courses,
        problem.courses.len(),
        synthesized
    );
    synthesized
}

/// Slots ordered by ascending day load, then ascending hour load.
fn slots_by_load(day_load: &[usize], hour_load: &[usize]) -> Vec<TimeSlot> {
    let mut days: Vec<usize> = (0..DAYS_PER_WEEK).collect();
    days.sort_by_key(|&d| (day_load[d], d));
    let mut hours: Vec<usize> = (0..HOURS_PER_DAY).collect();
    hours.sort_by_key(|&h| (hour_load[h], h));
    days.iter()
        .flat_map(|&day| hours.iter().map(move |&hour| TimeSlot { day, hour }))
        .collect()
}

/// Places every session without the solver.
///
/// Each session goes to the least-loaded (day, hour) where one of its
/// candidate rooms and instructors are both free. If none is free anywhere
/// it is force-placed on the least-loaded slot.
pub fn manual_timetable(problem: &Problem) -> Timetable {
    let mut tracker = AvailabilityTracker::new(problem.rooms.len(), problem.instructors.len());
    let mut day_load = [0usize; DAYS_PER_WEEK];
    let mut hour_load = [0usize; HOURS_PER_DAY];
    let mut timetable = Timetable::new();
    let mut forced = 0;

    let mut candidates: HashMap<usize, (Vec<usize>, Vec<usize>)> = HashMap::new();
    for request in problem.session_requests() {
        let course = &problem.courses[request.course];
        let (rooms, instructors) = candidates
            .entry(request.course)
            .or_insert_with(|| (problem.room_candidates(course), problem.instructor_candidates(course)));

        let order = slots_by_load(&day_load, &hour_load);
        let free = order.iter().find_map(|&slot| {
            let room = rooms.iter().copied().find(|&r| tracker.is_room_free(r, slot.day, slot.hour))?;
            let instructor = instructors
                .iter()
                .copied()
                .find(|&l| tracker.is_instructor_free(l, slot.day, slot.hour))?;
            Some((slot, room, instructor))
        });

        let placement = match free {
            Some(found) => Some(found),
            None => {
                forced += 1;
                let fallback = order.first().copied().zip(rooms.first().copied()).zip(instructors.first().copied());
                if let Some(((slot, _), _)) = fallback {
                    warn!(
                        "Fallback: no free slot for {}#{}; force-placing at {} {}",
                        course.id,
                        request.ordinal,
                        slot.day_name(),
                        slot.start_time()
                    );
                }
                fallback.map(|((slot, room), instructor)| (slot, room, instructor))
            }
        };

        let Some((slot, room, instructor)) = placement else {
            continue;
        };
        if let Some(session) = problem.session(request, slot, room, instructor, SessionOrigin::Fallback) {
            tracker.occupy(room, instructor, slot);
            day_load[slot.day] += 1;
            hour_load[slot.hour] += 1;
            timetable.add_session(session);
        }
    }

    info!(
        "Fallback placed {} sessions ({} forced)",
        timetable.session_count(),
        forced
    );
    timetable
}

/// Sessions that share a slot with another session of the same room or instructor.
///
/// Convenience for callers auditing repaired output.
pub fn colliding_sessions(timetable: &Timetable) -> Vec<&Session> {
    let conflicts = crate::conflict::find_conflicts(timetable);
    let ids: HashSet<&str> = conflicts
        .iter()
        .flat_map(|v| [v.session_ids.0.as_str(), v.session_ids.1.as_str()])
        .collect();
    timetable
        .sessions
        .iter()
        .filter(|s| ids.contains(s.id.as_str()))
        .collect()
}
