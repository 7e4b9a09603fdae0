//! Per-room and per-instructor occupancy over the weekly grid.
//!
//! The tracker lives for one generation call. All cells start free;
//! [`AvailabilityTracker::occupy`] marks the room cell and the
//! instructor cell of a slot together.

use crate::models::{TimeSlot, DAYS_PER_WEEK, HOURS_PER_DAY, SLOTS_PER_WEEK};

/// Boolean occupancy grids indexed by room/instructor position.
#[derive(Debug, Clone)]
pub struct AvailabilityTracker {
    rooms: Vec<[bool; SLOTS_PER_WEEK]>,
    instructors: Vec<[bool; SLOTS_PER_WEEK]>,
}

#[inline]
fn cell(day: usize, hour: usize) -> usize {
    day * HOURS_PER_DAY + hour
}

impl AvailabilityTracker {
    /// Creates a tracker with every cell free.
    pub fn new(room_count: usize, instructor_count: usize) -> Self {
        Self {
            rooms: vec![[false; SLOTS_PER_WEEK]; room_count],
            instructors: vec![[false; SLOTS_PER_WEEK]; instructor_count],
        }
    }

    /// Whether a room is free at (day, hour).
    ///
    /// Out-of-range indices are reported as not free.
    pub fn is_room_free(&self, room: usize, day: usize, hour: usize) -> bool {
        day < DAYS_PER_WEEK
            && hour < HOURS_PER_DAY
            && self.rooms.get(room).is_some_and(|g| !g[cell(day, hour)])
    }

    /// Whether an instructor is free at (day, hour).
    ///
    /// Out-of-range indices are reported as not free.
    pub fn is_instructor_free(&self, instructor: usize, day: usize, hour: usize) -> bool {
        day < DAYS_PER_WEEK
            && hour < HOURS_PER_DAY
            && self
                .instructors
                .get(instructor)
                .is_some_and(|g| !g[cell(day, hour)])
    }

    /// Whether both the room and the instructor are free at a slot.
    pub fn is_free(&self, room: usize, instructor: usize, slot: TimeSlot) -> bool {
        self.is_room_free(room, slot.day, slot.hour)
            && self.is_instructor_free(instructor, slot.day, slot.hour)
    }

    /// Marks the room and the instructor occupied at a slot.
    ///
    /// Out-of-range indices are ignored.
    pub fn occupy(&mut self, room: usize, instructor: usize, slot: TimeSlot) {
        if slot.day >= DAYS_PER_WEEK || slot.hour >= HOURS_PER_DAY {
            return;
        }
        let c = cell(slot.day, slot.hour);
        if let Some(grid) = self.rooms.get_mut(room) {
            grid[c] = true;
        }
        if let Some(grid) = self.instructors.get_mut(instructor) {
            grid[c] = true;
        }
    }

    /// Hours the instructor is already teaching on a day.
    pub fn instructor_hours_on(&self, instructor: usize, day: usize) -> usize {
        match self.instructors.get(instructor) {
            Some(grid) if day < DAYS_PER_WEEK => (0..HOURS_PER_DAY)
                .filter(|&h| grid[cell(day, h)])
                .count(),
            _ => 0,
        }
    }

    /// Back-to-back score of teaching at (day, hour).
    ///
    /// One point if the previous hour is occupied for the instructor,
    /// one more if the next hour is. Lower is better.
    pub fn back_to_back_score(&self, instructor: usize, day: usize, hour: usize) -> usize {
        let busy = |h: usize| !self.is_instructor_free(instructor, day, h);
        let before = hour > 0 && busy(hour - 1);
        let after = hour + 1 < HOURS_PER_DAY && busy(hour + 1);
        usize::from(before) + usize::from(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_cells_start_free() {
        let t = AvailabilityTracker::new(2, 3);
        for slot in TimeSlot::all() {
            assert!(t.is_room_free(1, slot.day, slot.hour));
            assert!(t.is_instructor_free(2, slot.day, slot.hour));
        }
    }

    #[test]
    fn test_occupy_marks_both() {
        let mut t = AvailabilityTracker::new(2, 2);
        t.occupy(0, 1, TimeSlot::new(2, 4));

        assert!(!t.is_room_free(0, 2, 4));
        assert!(!t.is_instructor_free(1, 2, 4));
        assert!(t.is_room_free(1, 2, 4));
        assert!(t.is_instructor_free(0, 2, 4));
        assert!(!t.is_free(0, 0, TimeSlot::new(2, 4)));
        assert!(!t.is_free(1, 1, TimeSlot::new(2, 4)));
        assert!(t.is_free(1, 0, TimeSlot::new(2, 4)));
    }

    #[test]
    fn test_out_of_range_is_not_free() {
        let mut t = AvailabilityTracker::new(1, 1);
        assert!(!t.is_room_free(5, 0, 0));
        assert!(!t.is_instructor_free(0, 5, 0));
        assert!(!t.is_room_free(0, 0, 8));
        t.occupy(9, 9, TimeSlot { day: 0, hour: 0 });
        assert!(t.is_room_free(0, 0, 0));
    }

    #[test]
    fn test_instructor_hours_on() {
        let mut t = AvailabilityTracker::new(3, 1);
        t.occupy(0, 0, TimeSlot::new(1, 0));
        t.occupy(1, 0, TimeSlot::new(1, 5));
        t.occupy(2, 0, TimeSlot::new(3, 2));
        assert_eq!(t.instructor_hours_on(0, 1), 2);
        assert_eq!(t.instructor_hours_on(0, 3), 1);
        assert_eq!(t.instructor_hours_on(0, 0), 0);
        assert_eq!(t.instructor_hours_on(7, 1), 0);
    }

    #[test]
    fn test_back_to_back_score() {
        let mut t = AvailabilityTracker::new(1, 1);
        t.occupy(0, 0, TimeSlot::new(0, 2));
        t.occupy(0, 0, TimeSlot::new(0, 4));

        assert_eq!(t.back_to_back_score(0, 0, 3), 2); // between two classes
        assert_eq!(t.back_to_back_score(0, 0, 1), 1);
        assert_eq!(t.back_to_back_score(0, 0, 6), 0);
        assert_eq!(t.back_to_back_score(0, 0, 0), 0); // no hour before
        assert_eq!(t.back_to_back_score(0, 1, 3), 0); // other day
    }
}
