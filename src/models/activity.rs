//! Activity (course section) model.
//!
//! An activity is one course section that needs a room, a time slot and a
//! facilitator. Facilitators are ranked in two suitability tiers:
//!
//! - **Preferred**: the staff members the department wants teaching it.
//! - **Other**: acceptable substitutes.
//!
//! Anyone outside both tiers may still be assigned; the fitness evaluator
//! penalizes it instead of forbidding it.

use serde::{Deserialize, Serialize};

/// A course activity to be placed in the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity name (e.g., "SLA101A").
    pub name: String,
    /// Expected enrollment. Must be positive.
    pub enrollment: u32,
    /// Preferred facilitator names, in ranked order.
    #[serde(default)]
    pub preferred: Vec<String>,
    /// Acceptable but not preferred facilitator names.
    #[serde(default)]
    pub other: Vec<String>,
}

impl Activity {
    /// Creates an activity with no facilitator preferences.
    pub fn new(name: impl Into<String>, enrollment: u32) -> Self {
        Self {
            name: name.into(),
            enrollment,
            preferred: Vec::new(),
            other: Vec::new(),
        }
    }

    /// Sets the preferred facilitators.
    pub fn with_preferred<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the acceptable (non-preferred) facilitators.
    pub fn with_other<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.other = names.into_iter().map(Into::into).collect();
        self
    }

    /// Every facilitator name this activity references, both tiers.
    pub fn referenced_facilitators(&self) -> impl Iterator<Item = &str> {
        self.preferred
            .iter()
            .chain(self.other.iter())
            .map(String::as_str)
    }
}

/// How well a facilitator fits an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suitability {
    /// Listed in the activity's preferred tier.
    Preferred,
    /// Listed in the activity's other tier only.
    Other,
    /// Not listed at all.
    Unrelated,
}
