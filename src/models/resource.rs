//! Room (resource) model.
//!
//! Rooms host sessions. Each room has a free-text type that course
//! requirements are matched against, a capacity, and an availability
//! flag set by its owner.

use serde::{Deserialize, Serialize};

/// A room that sessions can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-text category (e.g. "LAB", "LECTURE HALL", "SEMINAR ROOM").
    pub room_type: String,
    /// Seats.
    pub capacity: i32,
    /// Whether the owner offers this room for scheduling.
    pub available: bool,
    /// Administrator who owns the room.
    pub admin_id: Option<String>,
}

/// Room requirement category derived from a course's room requirement.
///
/// `LAB` and `LECTURE_HALL` are named categories; anything else is matched
/// literally against the room type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomCategory {
    /// Room type contains `LAB`.
    Lab,
    /// Room type contains `HALL` or `ROOM`.
    LectureHall,
    /// Room type contains the given (upper-cased) text.
    Other(String),
}

impl Default for Resource {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            room_type: String::new(),
            capacity: 0,
            available: true,
            admin_id: None,
        }
    }
}

impl Resource {
    /// Creates an available room.
    pub fn new(id: impl Into<String>, room_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            room_type: room_type.into(),
            ..Default::default()
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the availability flag.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the owning administrator.
    pub fn with_admin(mut self, admin_id: impl Into<String>) -> Self {
        self.admin_id = Some(admin_id.into());
        self
    }

    /// Whether the room name appears on a deny-list.
    ///
    /// Names are compared trimmed and case-insensitively.
    pub fn is_excluded_by(&self, excluded_names: &[String]) -> bool {
        let name = self.name.trim();
        excluded_names
            .iter()
            .any(|ex| ex.trim().eq_ignore_ascii_case(name))
    }

    /// Whether this room satisfies a course's room requirement.
    pub fn satisfies(&self, requirement: &str) -> bool {
        RoomCategory::parse(requirement).matches(&self.room_type)
    }
}

impl RoomCategory {
    /// Classifies a requirement string.
    pub fn parse(requirement: &str) -> Self {
        let upper = requirement.trim().to_uppercase();
        match upper.as_str() {
            "LAB" => RoomCategory::Lab,
            "LECTURE_HALL" => RoomCategory::LectureHall,
            _ => RoomCategory::Other(upper),
        }
    }

    /// Whether a room type belongs to this category.
    pub fn matches(&self, room_type: &str) -> bool {
        let room_type = room_type.to_uppercase();
        match self {
            RoomCategory::Lab => room_type.contains("LAB"),
            RoomCategory::LectureHall => room_type.contains("HALL") || room_type.contains("ROOM"),
            RoomCategory::Other(text) => room_type.contains(text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = Resource::new("R1", "LAB")
            .with_name("Robotics Lab")
            .with_capacity(30)
            .with_admin("A1");

        assert_eq!(r.id, "R1");
        assert_eq!(r.name, "Robotics Lab");
        assert_eq!(r.capacity, 30);
        assert!(r.available);
        assert_eq!(r.admin_id.as_deref(), Some("A1"));

        let closed = r.with_available(false);
        assert!(!closed.available);
    }

    #[test]
    fn test_room_categories() {
        assert_eq!(RoomCategory::parse("lab"), RoomCategory::Lab);
        assert_eq!(RoomCategory::parse("LECTURE_HALL"), RoomCategory::LectureHall);
        assert_eq!(
            RoomCategory::parse("Studio"),
            RoomCategory::Other("STUDIO".into())
        );
    }

    #[test]
    fn test_satisfies() {
        let lab = Resource::new("R1", "COMPUTER LAB");
        let hall = Resource::new("R2", "Main Hall");
        let seminar = Resource::new("R3", "Seminar Room");

        assert!(lab.satisfies("LAB"));
        assert!(!hall.satisfies("LAB"));
        assert!(hall.satisfies("LECTURE_HALL"));
        assert!(seminar.satisfies("LECTURE_HALL"));
        assert!(seminar.satisfies("seminar"));
        assert!(!lab.satisfies("Computing"));
    }

    #[test]
    fn test_deny_list() {
        let r = Resource::new("R1", "ROOM").with_name(" Gym ");
        assert!(r.is_excluded_by(&["gym".to_string()]));
        assert!(!r.is_excluded_by(&["a5".to_string()]));
        assert!(!r.is_excluded_by(&[]));
    }

    #[test]
    fn test_missing_availability_defaults_to_true() {
        let r: Resource = serde_json::from_str(r#"{"id":"R1","roomType":"LAB"}"#).unwrap();
        assert!(r.available);
        assert!(r.satisfies("LAB"));
    }
}
