//! Timetable fitness evaluation.
//!
//! Higher is better. The scale is relative: it only ranks individuals
//! within a population and has no fixed bounds.
//!
//! # Phases
//!
//! 1. **Per activity**: room/time clash, room size fit, facilitator
//!    suitability, facilitator double-booking at the same time slot.
//! 2. **Per facilitator load**: overloaded (> 4) or underloaded (< 3)
//!    facilitators penalize every activity they lead. One facilitator named in
//!    [`SchedulingRules`](crate::models::SchedulingRules) may lead exactly two.
//! 3. **Section pairs**: flat adjustments for the relative timing of the
//!    two sections of a course, and of sections of different paired courses
//!    (including a building-neighborhood check for back-to-back slots).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::chromosome::{Individual, Placement};
use crate::models::{Domain, Room, Suitability};

const ROOM_TIME_CLASH: f64 = -0.5;
const ROOM_TOO_SMALL: f64 = -0.5;
const ROOM_FAR_OVERSIZED: f64 = -0.4;
const ROOM_OVERSIZED: f64 = -0.2;
const ROOM_GOOD_FIT: f64 = 0.3;
const FAR_OVERSIZED_RATIO: f64 = 3.0;
const OVERSIZED_RATIO: f64 = 1.5;

const PREFERRED_FACILITATOR: f64 = 0.5;
const OTHER_FACILITATOR: f64 = 0.2;
const UNRELATED_FACILITATOR: f64 = -0.1;

const FACILITATOR_DOUBLE_BOOKED: f64 = -0.2;
const FACILITATOR_SINGLE_BOOKED: f64 = 0.2;

const MAX_LOAD: usize = 4;
const MIN_LOAD: usize = 3;
const EXEMPT_MIN_LOAD: usize = 2;
const OVERLOAD: f64 = -0.5;
const UNDERLOAD: f64 = -0.4;

const SECTIONS_SAME_SLOT: f64 = -0.5;
const SECTIONS_SPREAD: f64 = 0.5;
const SECTIONS_SPREAD_HOURS: u32 = 4;

const CROSS_SAME_SLOT: f64 = -0.25;
const CROSS_CONSECUTIVE: f64 = 0.5;
const CROSS_CONSECUTIVE_FAR_APART: f64 = -0.4;
const CROSS_ONE_GAP: f64 = 0.25;

/// Fitness split into its contributing parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    /// Phase 1 score per activity.
    pub activity_base: Vec<f64>,
    /// Phase 2 facilitator-load adjustment per activity.
    pub load_adjustments: Vec<f64>,
    /// Same-course adjustment per section pair.
    pub section_pair_adjustments: Vec<f64>,
    /// Sum of the cross-course section adjustments.
    pub cross_section_adjustment: f64,
    /// Final fitness.
    pub total: f64,
}

impl FitnessBreakdown {
    /// Phase 1 + phase 2 score of one activity.
    pub fn activity_score(&self, activity: usize) -> f64 {
        self.activity_base[activity] + self.load_adjustments[activity]
    }

    /// Sum of all facilitator-load adjustments.
    pub fn load_total(&self) -> f64 {
        self.load_adjustments.iter().sum()
    }
}

/// Computes the fitness of an individual.
///
/// # Panics
/// If the individual does not match the domain (wrong length or an index
/// out of range). That is a caller bug, not a scoring outcome.
pub fn evaluate_fitness(domain: &Domain, individual: &Individual) -> f64 {
    evaluate_breakdown(domain, individual).total
}

/// Computes the fitness of an individual, keeping every part.
///
/// # Panics
/// Same contract as [`evaluate_fitness`].
pub fn evaluate_breakdown(domain: &Domain, individual: &Individual) -> FitnessBreakdown {
    assert!(
        individual.is_valid(domain),
        "individual does not match domain: {} placements for {} activities, or an index out of range",
        individual.len(),
        domain.activity_count()
    );

    let placements = individual.placements();

    // Explicit grouping passes.
    let mut by_room_time: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    let mut by_facilitator_time: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    let mut by_facilitator: Vec<Vec<usize>> = vec![Vec::new(); domain.facilitator_count()];
    for (act, p) in placements.iter().enumerate() {
        by_room_time.entry((p.room, p.time)).or_default().push(act);
        by_facilitator_time
            .entry((p.facilitator, p.time))
            .or_default()
            .push(act);
        by_facilitator[p.facilitator].push(act);
    }

    // Phase 1
    let activity_base: Vec<f64> = placements
        .iter()
        .enumerate()
        .map(|(act, p)| {
            let mut score = 0.0;
            if by_room_time[&(p.room, p.time)].len() > 1 {
                score += ROOM_TIME_CLASH;
            }
            score += room_fit_score(&domain.rooms()[p.room], domain.activities()[act].enrollment);
            score += suitability_score(domain.suitability(act, p.facilitator));
            score += if by_facilitator_time[&(p.facilitator, p.time)].len() > 1 {
                FACILITATOR_DOUBLE_BOOKED
            } else {
                FACILITATOR_SINGLE_BOOKED
            };
            score
        })
        .collect();

    // Phase 2
    let mut load_adjustments = vec![0.0; placements.len()];
    for (fac, acts) in by_facilitator.iter().enumerate() {
        if let Some(adjustment) = load_adjustment(domain, fac, acts.len()) {
            for &act in acts {
                load_adjustments[act] += adjustment;
            }
        }
    }

    let mut total: f64 = activity_base
        .iter()
        .zip(&load_adjustments)
        .map(|(base, load)| base + load)
        .sum();

    // Phase 3
    let section_pair_adjustments: Vec<f64> = domain
        .section_pairs()
        .iter()
        .map(|pair| same_course_adjustment(domain, placements, pair.first, pair.second))
        .collect();
    for adj in &section_pair_adjustments {
        total += adj;
    }

    let mut cross_section_adjustment = 0.0;
    let pairs = domain.section_pairs();
    for (i, first) in pairs.iter().enumerate() {
        for second in &pairs[i + 1..] {
            for a in first.sections() {
                for b in second.sections() {
                    let adj = cross_course_adjustment(domain, &placements[a], &placements[b]);
                    cross_section_adjustment += adj;
                    total += adj;
                }
            }
        }
    }

    FitnessBreakdown {
        activity_base,
        load_adjustments,
        section_pair_adjustments,
        cross_section_adjustment,
        total,
    }
}

/// Score for seating `enrollment` students in `room`.
pub fn room_fit_score(room: &Room, enrollment: u32) -> f64 {
    if room.capacity < enrollment {
        return ROOM_TOO_SMALL;
    }
    let ratio = room.fill_ratio(enrollment);
    if ratio > FAR_OVERSIZED_RATIO {
        ROOM_FAR_OVERSIZED
    } else if ratio > OVERSIZED_RATIO {
        ROOM_OVERSIZED
    } else {
        ROOM_GOOD_FIT
    }
}

/// Score for the facilitator's suitability tier.
pub fn suitability_score(suitability: Suitability) -> f64 {
    match suitability {
        Suitability::Preferred => PREFERRED_FACILITATOR,
        Suitability::Other => OTHER_FACILITATOR,
        Suitability::Unrelated => UNRELATED_FACILITATOR,
    }
}

/// Per-activity adjustment for a facilitator leading `load` activities.
fn load_adjustment(domain: &Domain, facilitator: usize, load: usize) -> Option<f64> {
    if load == 0 {
        None
    } else if load > MAX_LOAD {
        Some(OVERLOAD)
    } else if load < MIN_LOAD {
        if load == EXEMPT_MIN_LOAD && domain.is_low_load_exempt(facilitator) {
            None
        } else {
            Some(UNDERLOAD)
        }
    } else {
        None
    }
}

fn same_course_adjustment(domain: &Domain, placements: &[Placement], a: usize, b: usize) -> f64 {
    let (ta, tb) = (placements[a].time, placements[b].time);
    if ta == tb {
        return SECTIONS_SAME_SLOT;
    }
    let slots = domain.time_slots();
    if slots[ta].hours_apart(&slots[tb]) > SECTIONS_SPREAD_HOURS {
        SECTIONS_SPREAD
    } else {
        0.0
    }
}

fn cross_course_adjustment(domain: &Domain, a: &Placement, b: &Placement) -> f64 {
    if a.time == b.time {
        return CROSS_SAME_SLOT;
    }
    let slots = domain.time_slots();
    match slots[a.time].hours_apart(&slots[b.time]) {
        1 => {
            if domain.in_neighborhood(a.room) != domain.in_neighborhood(b.room) {
                CROSS_CONSECUTIVE + CROSS_CONSECUTIVE_FAR_APART
            } else {
                CROSS_CONSECUTIVE
            }
        }
        2 => CROSS_ONE_GAP,
        _ => 0.0,
    }
}
