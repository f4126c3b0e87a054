//! Direct placement encoding for timetable individuals.
//!
//! # Encoding
//!
//! An individual is a vector parallel to the domain's activity list. Gene `i`
//! is the [`Placement`] of activity `i`: a (room, time slot, facilitator)
//! index triple. Any combination of indices within table bounds is a legal
//! gene; infeasible schedules (double-booked rooms, undersized rooms) are
//! representable and left to the fitness evaluator to penalize.
//!
//! Individuals have value semantics. Operators never edit a parent; they
//! return a new individual.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Domain;

/// Room, time slot and facilitator assigned to one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Index into [`Domain::rooms`].
    pub room: usize,
    /// Index into [`Domain::time_slots`].
    pub time: usize,
    /// Index into [`Domain::facilitators`].
    pub facilitator: usize,
}

impl Placement {
    /// Creates a placement.
    pub fn new(room: usize, time: usize, facilitator: usize) -> Self {
        Self {
            room,
            time,
            facilitator,
        }
    }

    /// Draws each field uniformly and independently from its table.
    pub fn random<R: Rng>(domain: &Domain, rng: &mut R) -> Self {
        Self {
            room: rng.random_range(0..domain.room_count()),
            time: rng.random_range(0..domain.time_slot_count()),
            facilitator: rng.random_range(0..domain.facilitator_count()),
        }
    }

    /// Whether every index is within its table.
    pub fn in_bounds(&self, domain: &Domain) -> bool {
        self.room < domain.room_count()
            && self.time < domain.time_slot_count()
            && self.facilitator < domain.facilitator_count()
    }
}

/// One candidate timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Individual {
    placements: Vec<Placement>,
}

impl Individual {
    /// Wraps placements in activity-index order.
    pub fn new(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    /// Creates a random individual: one uniform placement per activity.
    pub fn random<R: Rng>(domain: &Domain, rng: &mut R) -> Self {
        let placements = (0..domain.activity_count())
            .map(|_| Placement::random(domain, rng))
            .collect();
        Self { placements }
    }

    /// Placements in activity-index order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement of one activity.
    pub fn placement(&self, activity: usize) -> Placement {
        self.placements[activity]
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns a copy with one activity moved.
    pub fn with_placement(&self, activity: usize, placement: Placement) -> Self {
        let mut placements = self.placements.clone();
        placements[activity] = placement;
        Self { placements }
    }

    /// Validates length and index bounds against a domain.
    pub fn is_valid(&self, domain: &Domain) -> bool {
        self.placements.len() == domain.activity_count()
            && self.placements.iter().all(|p| p.in_bounds(domain))
    }
}

impl From<Vec<Placement>> for Individual {
    fn from(placements: Vec<Placement>) -> Self {
        Self::new(placements)
    }
}

/// Creates a random individual for `domain`.
pub fn create_random_individual<R: Rng>(domain: &Domain, rng: &mut R) -> Individual {
    Individual::random(domain, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_random_individual() {
        let domain = Domain::sla().unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let ind = create_random_individual(&domain, &mut rng);

        assert_eq!(ind.len(), 11);
        assert!(ind.is_valid(&domain));
    }

    #[test]
    fn test_random_individuals_differ() {
        let domain = Domain::sla().unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let a = Individual::random(&domain, &mut rng);
        let b = Individual::random(&domain, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let domain = Domain::sla().unwrap();
        let a = Individual::random(&domain, &mut SmallRng::seed_from_u64(3));
        let b = Individual::random(&domain, &mut SmallRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_placement_leaves_original() {
        let domain = Domain::sla().unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let ind = Individual::random(&domain, &mut rng);
        let original = ind.placement(0);

        let moved = ind.with_placement(0, Placement::new(8, 5, 9));
        assert_eq!(moved.placement(0), Placement::new(8, 5, 9));
        assert_eq!(ind.placement(0), original);
    }

    #[test]
    fn test_invalid_individual() {
        let domain = Domain::sla().unwrap();
        let short = Individual::new(vec![Placement::new(0, 0, 0); 3]);
        assert!(!short.is_valid(&domain));

        let out_of_range = Individual::new(vec![Placement::new(9, 0, 0); 11]);
        assert!(!out_of_range.is_valid(&domain));

        let ok = Individual::new(vec![Placement::new(8, 5, 9); 11]);
        assert!(ok.is_valid(&domain));
    }

    #[test]
    fn test_serializes_as_array() {
        let ind = Individual::new(vec![Placement::new(1, 2, 3)]);
        let json = serde_json::to_string(&ind).unwrap();
        assert_eq!(json, r#"[{"room":1,"time":2,"facilitator":3}]"#);
    }
}
