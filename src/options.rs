//! Generator options.
//!
//! Soft-constraint switches shared by both scheduling strategies.
//! Hard constraints (no double-booking) are not configurable.

use serde::{Deserialize, Serialize};

/// Default cap on an instructor's teaching hours per day.
pub const DEFAULT_MAX_HOURS_PER_DAY: usize = 6;

/// Options controlling soft-constraint behavior of the generators.
///
/// # Example
/// ```
/// use u_timetable::GeneratorOptions;
///
/// let options = GeneratorOptions::default()
///     .with_avoid_back_to_back(true)
///     .with_max_hours_per_day(4);
/// assert!(options.avoid_back_to_back);
/// assert!(!options.prefer_even_distribution);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Prefer hours whose neighbors are free for the instructor.
    pub avoid_back_to_back: bool,
    /// Visit weekdays in random order to spread sessions across the week.
    pub prefer_even_distribution: bool,
    /// Greedy: skip a day once the instructor teaches this many hours on it.
    pub max_hours_per_day: usize,
    /// Room names never used for scheduling (trimmed, case-insensitive).
    pub excluded_room_names: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            avoid_back_to_back: false,
            prefer_even_distribution: false,
            max_hours_per_day: DEFAULT_MAX_HOURS_PER_DAY,
            excluded_room_names: Vec::new(),
        }
    }
}

impl GeneratorOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets back-to-back avoidance.
    pub fn with_avoid_back_to_back(mut self, enabled: bool) -> Self {
        self.avoid_back_to_back = enabled;
        self
    }

    /// Sets even distribution over weekdays.
    pub fn with_even_distribution(mut self, enabled: bool) -> Self {
        self.prefer_even_distribution = enabled;
        self
    }

    /// Sets the per-day hour cap.
    pub fn with_max_hours_per_day(mut self, hours: usize) -> Self {
        self.max_hours_per_day = hours;
        self
    }

    /// Adds a room name to the deny-list.
    pub fn with_excluded_room(mut self, name: impl Into<String>) -> Self {
        self.excluded_room_names.push(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = GeneratorOptions::default();
        assert!(!o.avoid_back_to_back);
        assert!(!o.prefer_even_distribution);
        assert_eq!(o.max_hours_per_day, 6);
        assert!(o.excluded_room_names.is_empty());
    }

    #[test]
    fn test_builder() {
        let o = GeneratorOptions::new()
            .with_even_distribution(true)
            .with_max_hours_per_day(3)
            .with_excluded_room("GY")
            .with_excluded_room("A5");
        assert!(o.prefer_even_distribution);
        assert_eq!(o.max_hours_per_day, 3);
        assert_eq!(o.excluded_room_names, vec!["GY".to_string(), "A5".to_string()]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let o: GeneratorOptions = serde_json::from_str(r#"{"avoidBackToBack":true}"#).unwrap();
        assert!(o.avoid_back_to_back);
        assert_eq!(o.max_hours_per_day, DEFAULT_MAX_HOURS_PER_DAY);
    }
}
