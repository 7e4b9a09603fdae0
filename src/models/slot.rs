//! Weekly time grid.
//!
//! The grid is five weekdays of eight one-hour blocks, 09:00 to 17:00.
//! Indices are zero-based: `day` in `0..DAYS_PER_WEEK`, `hour` in
//! `0..HOURS_PER_DAY`, where hour 0 is the 09:00-10:00 block.

use serde::{Deserialize, Serialize};

/// Number of teaching days (Monday to Friday).
pub const DAYS_PER_WEEK: usize = 5;

/// Number of one-hour blocks per day.
pub const HOURS_PER_DAY: usize = 8;

/// Wall-clock hour of block 0.
pub const START_HOUR: usize = 9;

/// Total number of distinct (day, hour) slots in a week.
pub const SLOTS_PER_WEEK: usize = DAYS_PER_WEEK * HOURS_PER_DAY;

/// Weekday names, indexed by day.
pub const WEEKDAYS: [&str; DAYS_PER_WEEK] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// A (day, hour) cell of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day index (0 = Monday).
    pub day: usize,
    /// Hour block index (0 = 09:00).
    pub hour: usize,
}

impl TimeSlot {
    /// Creates a slot, clamping both indices into the grid.
    pub fn new(day: usize, hour: usize) -> Self {
        Self {
            day: day.min(DAYS_PER_WEEK - 1),
            hour: hour.min(HOURS_PER_DAY - 1),
        }
    }

    /// Iterates all slots day-major (Monday 09:00, Monday 10:00, ...).
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..DAYS_PER_WEEK).flat_map(|day| (0..HOURS_PER_DAY).map(move |hour| TimeSlot { day, hour }))
    }

    /// Weekday name of this slot.
    pub fn day_name(&self) -> &'static str {
        WEEKDAYS[self.day]
    }

    /// Start time as `HH:00`.
    pub fn start_time(&self) -> String {
        format!("{:02}:00", START_HOUR + self.hour)
    }

    /// End time as `HH:00` (one hour after start).
    pub fn end_time(&self) -> String {
        format!("{:02}:00", START_HOUR + self.hour + 1)
    }

    /// Recovers a slot from a weekday name and an `HH:MM` start time.
    ///
    /// Returns `None` for names outside the teaching week, unparsable times,
    /// or hours outside the grid.
    pub fn from_labels(day_of_week: &str, start_time: &str) -> Option<Self> {
        let day = WEEKDAYS
            .iter()
            .position(|d| d.eq_ignore_ascii_case(day_of_week.trim()))?;
        let clock: usize = start_time.trim().split(':').next()?.parse().ok()?;
        let hour = clock.checked_sub(START_HOUR)?;
        (hour < HOURS_PER_DAY).then_some(Self { day, hour })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_labels() {
        let s = TimeSlot::new(2, 0);
        assert_eq!(s.day_name(), "Wednesday");
        assert_eq!(s.start_time(), "09:00");
        assert_eq!(s.end_time(), "10:00");

        let last = TimeSlot::new(4, 7);
        assert_eq!(last.start_time(), "16:00");
        assert_eq!(last.end_time(), "17:00");
    }

    #[test]
    fn test_slot_clamping() {
        let s = TimeSlot::new(9, 99);
        assert_eq!(s, TimeSlot { day: 4, hour: 7 });
    }

    #[test]
    fn test_from_labels() {
        assert_eq!(
            TimeSlot::from_labels("Tuesday", "11:00"),
            Some(TimeSlot { day: 1, hour: 2 })
        );
        assert_eq!(
            TimeSlot::from_labels("friday", "16:00"),
            Some(TimeSlot { day: 4, hour: 7 })
        );
        assert_eq!(TimeSlot::from_labels("Saturday", "10:00"), None);
        assert_eq!(TimeSlot::from_labels("Monday", "08:00"), None);
        assert_eq!(TimeSlot::from_labels("Monday", "17:00"), None);
        assert_eq!(TimeSlot::from_labels("Monday", "noon"), None);
    }

    #[test]
    fn test_all_slots() {
        let slots: Vec<TimeSlot> = TimeSlot::all().collect();
        assert_eq!(slots.len(), SLOTS_PER_WEEK);
        assert_eq!(slots[0], TimeSlot { day: 0, hour: 0 });
        assert_eq!(slots[HOURS_PER_DAY], TimeSlot { day: 1, hour: 0 });
    }
}
