//! Instructor model.

use serde::{Deserialize, Serialize};

/// A person who teaches sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact detail (email or phone).
    pub contact: String,
}

impl Instructor {
    /// Creates an instructor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: String::new(),
        }
    }

    /// Sets the contact detail.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }
}
