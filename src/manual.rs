//! Instructor ranking for manual scheduling.
//!
//! When an administrator books a single course by hand, instructors are
//! offered in order of how closely their declared working hours match the
//! requested slot. This ranking is independent of the generators.
//!
//! # Proximity score
//! `score = fwd(start - preferred_start) + fwd(end - preferred_end)` in
//! minutes, where `fwd` adds 24 h to negative differences. Lower is closer.
//! Instructors that declare none of the requested days have no score and
//! rank last.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::conflict::{days_overlap, parse_time, split_range, Booking};
use crate::error::Result;
use crate::models::Instructor;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Declared availability of an instructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorPreference {
    /// The instructor.
    pub instructor: Instructor,
    /// Weekday names the instructor is willing to teach.
    pub days: Vec<String>,
    /// Preferred hours as `HH:MM-HH:MM`.
    pub hours: String,
}

/// An instructor with its proximity score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedInstructor {
    /// Instructor id.
    pub instructor_id: String,
    /// Instructor name.
    pub name: String,
    /// Proximity score in minutes (`None` = no usable preference).
    pub score: Option<u32>,
}

impl InstructorPreference {
    /// Creates a preference record.
    pub fn new<S: AsRef<str>>(instructor: Instructor, days: &[S], hours: impl Into<String>) -> Self {
        Self {
            instructor,
            days: days.iter().map(|d| d.as_ref().to_string()).collect(),
            hours: hours.into(),
        }
    }
}

/// Forward minute difference `a - b`, wrapped into a single day.
fn forward_minutes(a: u32, b: u32) -> u32 {
    let diff = i64::from(a) - i64::from(b);
    let wrapped = if diff < 0 { diff + MINUTES_PER_DAY } else { diff };
    wrapped as u32
}

/// Proximity of a requested `[start, end)` to a preferred `HH:MM-HH:MM` range.
pub fn proximity_score(preferred_hours: &str, start: &str, end: &str) -> Result<u32> {
    let (pref_start, pref_end) = split_range(preferred_hours)?;
    let start_diff = forward_minutes(parse_time(start)?, parse_time(pref_start)?);
    let end_diff = forward_minutes(parse_time(end)?, parse_time(pref_end)?);
    Ok(start_diff + end_diff)
}

/// Ranks instructors for a manual booking on `days` in `[start, end)`.
///
/// Instructors holding a colliding booking are dropped. The rest are sorted
/// by ascending score; unscored instructors keep their input order at the end.
pub fn rank_instructors<S: AsRef<str>>(
    preferences: &[InstructorPreference],
    days: &[S],
    start: &str,
    end: &str,
    bookings: &[Booking],
) -> Vec<RankedInstructor> {
    let mut ranked: Vec<RankedInstructor> = preferences
        .iter()
        .filter(|p| {
            let busy = bookings.iter().any(|b| {
                b.instructor_id.as_deref() == Some(p.instructor.id.as_str())
                    && b.collides_with(days, start, end)
            });
            if busy {
                debug!("Instructor {} already booked at {start}-{end}", p.instructor.id);
            }
            !busy
        })
        .map(|p| {
            let score = if days_overlap(&p.days, days) {
                proximity_score(&p.hours, start, end).ok()
            } else {
                None
            };
            RankedInstructor {
                instructor_id: p.instructor.id.clone(),
                name: p.instructor.name.clone(),
                score,
            }
        })
        .collect();

    // Stable: equal scores and unscored entries keep input order.
    ranked.sort_by_key(|r| r.score.unwrap_or(u32::MAX));
    ranked
}
