//! Domain model: the static reference tables of one timetabling problem.
//!
//! [`DomainData`] is the raw, serializable description (names everywhere).
//! [`Domain`] is the validated form: every name reference is resolved to a
//! stable index once, and the lookup tables the fitness evaluator needs are
//! precomputed. A `Domain` is immutable and shared by reference for the
//! whole search.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Activity, Facilitator, Room, Suitability, TimeSlot};
use crate::validation::{ValidationError, validate_domain};

/// Special-case scoring rules, expressed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingRules {
    /// Pairs of activity names that are two sections (A, B) of one course.
    #[serde(default)]
    pub section_pairs: Vec<(String, String)>,
    /// Facilitator allowed to carry exactly two activities without the
    /// low-load penalty.
    #[serde(default)]
    pub low_load_exemption: Option<String>,
    /// Buildings that count as the same neighborhood for back-to-back
    /// sections of paired courses.
    #[serde(default)]
    pub neighborhood_buildings: Vec<String>,
}

impl SchedulingRules {
    /// Adds a section pair.
    pub fn with_section_pair(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.section_pairs.push((a.into(), b.into()));
        self
    }

    /// Sets the low-load exempt facilitator.
    pub fn with_low_load_exemption(mut self, facilitator: impl Into<String>) -> Self {
        self.low_load_exemption = Some(facilitator.into());
        self
    }

    /// Adds a neighborhood building.
    pub fn with_neighborhood_building(mut self, building: impl Into<String>) -> Self {
        self.neighborhood_buildings.push(building.into());
        self
    }
}

/// Raw domain description, as authored or loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainData {
    /// Facilitators, in index order.
    pub facilitators: Vec<Facilitator>,
    /// Time slots, in index order.
    pub time_slots: Vec<TimeSlot>,
    /// Rooms, in index order.
    pub rooms: Vec<Room>,
    /// Activities, in index order.
    pub activities: Vec<Activity>,
    /// Special-case rules.
    #[serde(default)]
    pub rules: SchedulingRules,
}

impl DomainData {
    /// Creates empty domain data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a facilitator.
    pub fn with_facilitator(mut self, name: impl Into<String>) -> Self {
        self.facilitators.push(Facilitator::new(name));
        self
    }

    /// Adds a time slot.
    pub fn with_time_slot(mut self, label: impl Into<String>, hour: i32) -> Self {
        self.time_slots.push(TimeSlot::new(label, hour));
        self
    }

    /// Adds a room.
    pub fn with_room(
        mut self,
        name: impl Into<String>,
        capacity: u32,
        building: impl Into<String>,
    ) -> Self {
        self.rooms.push(Room::new(name, capacity, building));
        self
    }

    /// Adds an activity.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    /// Sets the special-case rules.
    pub fn with_rules(mut self, rules: SchedulingRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Domain data failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid domain data: {}", join_messages(.errors))]
pub struct DomainError {
    /// Every problem found, in detection order.
    pub errors: Vec<ValidationError>,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Two sections of the same course, by activity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPair {
    /// Section A.
    pub first: usize,
    /// Section B.
    pub second: usize,
}

impl SectionPair {
    /// Both section indices.
    pub fn sections(&self) -> [usize; 2] {
        [self.first, self.second]
    }
}

/// Validated, indexed domain.
#[derive(Debug, Clone)]
pub struct Domain {
    facilitators: Vec<Facilitator>,
    time_slots: Vec<TimeSlot>,
    rooms: Vec<Room>,
    activities: Vec<Activity>,
    activity_index: HashMap<String, usize>,
    facilitator_index: HashMap<String, usize>,
    /// `suitability[activity][facilitator]`.
    suitability: Vec<Vec<Suitability>>,
    /// Per room: building is a neighborhood building.
    neighborhood: Vec<bool>,
    section_pairs: Vec<SectionPair>,
    low_load_exempt: Option<usize>,
}

impl Domain {
    /// Validates raw data and builds the lookup tables.
    ///
    /// All validation problems are reported together.
    pub fn from_data(data: DomainData) -> Result<Self, DomainError> {
        validate_domain(&data).map_err(|errors| DomainError { errors })?;

        let DomainData {
            facilitators,
            time_slots,
            rooms,
            activities,
            rules,
        } = data;

        let facilitator_index: HashMap<String, usize> = facilitators
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        let activity_index: HashMap<String, usize> = activities
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.clone(), i))
            .collect();

        let suitability = activities
            .iter()
            .map(|act| {
                let mut row = vec![Suitability::Unrelated; facilitators.len()];
                // Preferred is written last so it wins over a duplicate listing in `other`.
                for name in &act.other {
                    row[facilitator_index[name.as_str()]] = Suitability::Other;
                }
                for name in &act.preferred {
                    row[facilitator_index[name.as_str()]] = Suitability::Preferred;
                }
                row
            })
            .collect();

        let neighborhood = rooms
            .iter()
            .map(|r| rules.neighborhood_buildings.contains(&r.building))
            .collect();

        let section_pairs = rules
            .section_pairs
            .iter()
            .map(|(a, b)| SectionPair {
                first: activity_index[a.as_str()],
                second: activity_index[b.as_str()],
            })
            .collect();

        let low_load_exempt = rules
            .low_load_exemption
            .as_deref()
            .map(|name| facilitator_index[name]);

        debug!(
            activities = activities.len(),
            rooms = rooms.len(),
            time_slots = time_slots.len(),
            facilitators = facilitators.len(),
            "domain loaded"
        );

        Ok(Self {
            facilitators,
            time_slots,
            rooms,
            activities,
            activity_index,
            facilitator_index,
            suitability,
            neighborhood,
            section_pairs,
            low_load_exempt,
        })
    }

    /// The built-in SLA dataset.
    pub fn sla() -> Result<Self, DomainError> {
        Self::from_data(super::sla::sla_data())
    }

    /// Facilitators, in index order.
    pub fn facilitators(&self) -> &[Facilitator] {
        &self.facilitators
    }

    /// Time slots, in index order.
    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    /// Rooms, in index order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Activities, in index order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn time_slot_count(&self) -> usize {
        self.time_slots.len()
    }

    pub fn facilitator_count(&self) -> usize {
        self.facilitators.len()
    }

    /// Index of an activity by name.
    pub fn activity_index(&self, name: &str) -> Option<usize> {
        self.activity_index.get(name).copied()
    }

    /// Index of a facilitator by name.
    pub fn facilitator_index(&self, name: &str) -> Option<usize> {
        self.facilitator_index.get(name).copied()
    }

    /// Suitability of a facilitator for an activity.
    pub fn suitability(&self, activity: usize, facilitator: usize) -> Suitability {
        self.suitability[activity][facilitator]
    }

    /// Whether a room is in a neighborhood building.
    pub fn in_neighborhood(&self, room: usize) -> bool {
        self.neighborhood[room]
    }

    /// Resolved section pairs.
    pub fn section_pairs(&self) -> &[SectionPair] {
        &self.section_pairs
    }

    /// Whether this facilitator tolerates a load of two.
    pub fn is_low_load_exempt(&self, facilitator: usize) -> bool {
        self.low_load_exempt == Some(facilitator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn tiny_data() -> DomainData {
        DomainData::new()
            .with_facilitator("Ada")
            .with_facilitator("Bo")
            .with_time_slot("9 AM", 9)
            .with_time_slot("10 AM", 10)
            .with_room("East 1", 30, "East")
            .with_room("West 1", 60, "West")
            .with_activity(Activity::new("C1A", 20).with_preferred(["Ada"]).with_other(["Bo"]))
            .with_activity(Activity::new("C1B", 25).with_preferred(["Bo"]))
            .with_rules(
                SchedulingRules::default()
                    .with_section_pair("C1A", "C1B")
                    .with_low_load_exemption("Bo")
                    .with_neighborhood_building("East"),
            )
    }

    #[test]
    fn test_from_data_resolves_indices() {
        let domain = Domain::from_data(tiny_data()).unwrap();
        assert_eq!(domain.activity_count(), 2);
        assert_eq!(domain.activity_index("C1B"), Some(1));
        assert_eq!(domain.facilitator_index("Bo"), Some(1));
        assert_eq!(domain.activity_index("nope"), None);
        assert_eq!(domain.section_pairs(), &[SectionPair { first: 0, second: 1 }]);
        assert!(domain.is_low_load_exempt(1));
        assert!(!domain.is_low_load_exempt(0));
        assert!(domain.in_neighborhood(0));
        assert!(!domain.in_neighborhood(1));
    }

    #[test]
    fn test_suitability_table() {
        let domain = Domain::from_data(tiny_data()).unwrap();
        assert_eq!(domain.suitability(0, 0), Suitability::Preferred);
        assert_eq!(domain.suitability(0, 1), Suitability::Other);
        assert_eq!(domain.suitability(1, 0), Suitability::Unrelated);
    }

    #[test]
    fn test_preferred_wins_over_other() {
        let data = tiny_data()
            .with_activity(Activity::new("C2", 10).with_preferred(["Ada"]).with_other(["Ada"]));
        let domain = Domain::from_data(data).unwrap();
        assert_eq!(domain.suitability(2, 0), Suitability::Preferred);
    }

    #[test]
    fn test_invalid_data_reports_all_errors() {
        let data = tiny_data()
            .with_activity(Activity::new("C9", 0).with_preferred(["Nobody"]));
        let err = Domain::from_data(data).unwrap_err();
        assert!(err.errors.iter().any(|e| e.kind == ValidationErrorKind::ZeroEnrollment));
        assert!(err
            .errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownFacilitator));
        assert!(err.to_string().starts_with("invalid domain data: "));
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let data = crate::models::sla_data();
        let json = serde_json::to_string(&data).unwrap();
        let back: DomainData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
