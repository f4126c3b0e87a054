//! Resource models: rooms, time slots and facilitators.
//!
//! These are the three tables a placement indexes into. Each is an ordered
//! list whose position is the stable index used by the encoding.

use serde::{Deserialize, Serialize};

/// A room that can host an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Display name (e.g., "Roman 216").
    pub name: String,
    /// Seating capacity.
    pub capacity: u32,
    /// Building the room belongs to (e.g., "Roman").
    pub building: String,
}

impl Room {
    /// Creates a room.
    pub fn new(name: impl Into<String>, capacity: u32, building: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity,
            building: building.into(),
        }
    }

    /// Capacity divided by expected enrollment.
    ///
    /// Callers guarantee `enrollment > 0`; the domain rejects zero enrollment.
    pub fn fill_ratio(&self, enrollment: u32) -> f64 {
        f64::from(self.capacity) / f64::from(enrollment)
    }
}

/// A teaching time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Display label (e.g., "1 PM").
    pub label: String,
    /// Hour of day on a 24h clock, used for distance computations.
    pub hour: i32,
}

impl TimeSlot {
    /// Creates a time slot.
    pub fn new(label: impl Into<String>, hour: i32) -> Self {
        Self {
            label: label.into(),
            hour,
        }
    }

    /// Absolute distance in hours between two slots.
    pub fn hours_apart(&self, other: &TimeSlot) -> u32 {
        self.hour.abs_diff(other.hour)
    }
}

/// A staff member who can lead activities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facilitator {
    /// Unique name.
    pub name: String,
}

impl Facilitator {
    /// Creates a facilitator.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
