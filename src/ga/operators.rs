//! Configurable genetic operators for timetables.
//!
//! Provides runtime-selectable selection and crossover strategies via
//! [`GeneticOperators`], plus per-field uniform mutation.
//!
//! All operators treat a [`Placement`] as atomic: room, time slot and
//! facilitator of one activity are always inherited together.
//!
//! # Usage
//!
//! ```
//! use sla_schedule::ga::operators::{CrossoverType, GeneticOperators, SelectionType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.selection, SelectionType::Tournament { size: 3 });
//! assert_eq!(ops.crossover, CrossoverType::Uniform);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{Individual, Placement};
use super::population::Scored;
use crate::models::Domain;

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionType {
    /// Best of `size` members drawn uniformly with replacement.
    Tournament { size: usize },
    /// Fitness-proportionate, on fitness shifted so the worst member weighs zero.
    Roulette,
    /// Linear rank weights: the worst member weighs 1, the best weighs `n`.
    Rank,
}

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    /// Each placement comes from either parent with equal odds.
    Uniform,
    /// Placements before a random cut come from the first parent.
    SinglePoint,
    /// Placements between two random cuts come from the second parent.
    TwoPoint,
}

/// Runtime-selectable genetic operators.
///
/// # Example
///
/// ```
/// use sla_schedule::ga::operators::{CrossoverType, GeneticOperators, SelectionType};
///
/// let ops = GeneticOperators {
///     selection: SelectionType::Rank,
///     crossover: CrossoverType::TwoPoint,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneticOperators {
    /// Selection strategy.
    pub selection: SelectionType,
    /// Crossover strategy.
    pub crossover: CrossoverType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            selection: SelectionType::Tournament { size: 3 },
            crossover: CrossoverType::Uniform,
        }
    }
}

impl GeneticOperators {
    /// Prepares a selector over one evaluated generation.
    pub fn selector<'a>(&self, members: &'a [Scored]) -> Selector<'a> {
        let kind = match self.selection {
            SelectionType::Tournament { size } => SelectorKind::Tournament(size.max(1)),
            SelectionType::Roulette => {
                let worst = members
                    .iter()
                    .map(|m| m.fitness)
                    .fold(f64::INFINITY, f64::min);
                SelectorKind::weighted(members.iter().map(|m| m.fitness - worst))
            }
            SelectionType::Rank => {
                let mut order: Vec<usize> = (0..members.len()).collect();
                order.sort_by(|&a, &b| members[a].fitness.total_cmp(&members[b].fitness));
                let mut weights = vec![0.0; members.len()];
                for (rank, &idx) in order.iter().enumerate() {
                    weights[idx] = (rank + 1) as f64;
                }
                SelectorKind::weighted(weights)
            }
        };
        Selector { members, kind }
    }

    /// Performs crossover using the configured strategy.
    pub fn crossover<R: Rng>(&self, p1: &Individual, p2: &Individual, rng: &mut R) -> Individual {
        match self.crossover {
            CrossoverType::Uniform => uniform_crossover(p1, p2, rng),
            CrossoverType::SinglePoint => single_point_crossover(p1, p2, rng),
            CrossoverType::TwoPoint => two_point_crossover(p1, p2, rng),
        }
    }
}

/// Picks parents from one evaluated generation, with replacement.
pub struct Selector<'a> {
    members: &'a [Scored],
    kind: SelectorKind,
}

enum SelectorKind {
    Tournament(usize),
    /// Cumulative weights; empty when every weight is zero.
    Weighted(Vec<f64>),
}

impl SelectorKind {
    fn weighted(weights: impl IntoIterator<Item = f64>) -> Self {
        let mut acc = 0.0;
        let cumulative: Vec<f64> = weights
            .into_iter()
            .map(|w| {
                acc += w.max(0.0);
                acc
            })
            .collect();
        if acc > 0.0 {
            SelectorKind::Weighted(cumulative)
        } else {
            SelectorKind::Weighted(Vec::new())
        }
    }
}

impl<'a> Selector<'a> {
    /// Index of the selected member.
    ///
    /// # Panics
    /// If the generation is empty.
    pub fn pick_index<R: Rng>(&self, rng: &mut R) -> usize {
        let n = self.members.len();
        match &self.kind {
            SelectorKind::Tournament(size) => {
                let mut best = rng.random_range(0..n);
                for _ in 1..*size {
                    let challenger = rng.random_range(0..n);
                    if self.members[challenger].fitness > self.members[best].fitness {
                        best = challenger;
                    }
                }
                best
            }
            SelectorKind::Weighted(cumulative) => match cumulative.last() {
                Some(&total) => {
                    let r = rng.random::<f64>() * total;
                    cumulative.partition_point(|&c| c <= r).min(n - 1)
                }
                // All members equally fit.
                None => rng.random_range(0..n),
            },
        }
    }

    /// The selected member's individual.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &'a Individual {
        &self.members[self.pick_index(rng)].individual
    }
}

// ======================== Crossover operators ========================

/// Uniform crossover: each placement from either parent with probability 1/2.
pub fn uniform_crossover<R: Rng>(p1: &Individual, p2: &Individual, rng: &mut R) -> Individual {
    p1.placements()
        .iter()
        .zip(p2.placements())
        .map(|(a, b)| if rng.random_bool(0.5) { *a } else { *b })
        .collect::<Vec<Placement>>()
        .into()
}

/// Single-point crossover: `p1[..cut] ++ p2[cut..]` with `cut` in `1..len`.
pub fn single_point_crossover<R: Rng>(
    p1: &Individual,
    p2: &Individual,
    rng: &mut R,
) -> Individual {
    let len = p1.len();
    if len < 2 {
        return p1.clone();
    }
    let cut = rng.random_range(1..len);
    p1.placements()[..cut]
        .iter()
        .chain(&p2.placements()[cut..])
        .copied()
        .collect::<Vec<Placement>>()
        .into()
}

/// Two-point crossover: `p2` supplies the segment `[i, j)`, `p1` the rest.
pub fn two_point_crossover<R: Rng>(p1: &Individual, p2: &Individual, rng: &mut R) -> Individual {
    let len = p1.len();
    if len < 2 {
        return p1.clone();
    }
    let mut i = rng.random_range(0..len);
    let mut j = rng.random_range(0..=len);
    if i > j {
        std::mem::swap(&mut i, &mut j);
    }
    p1.placements()
        .iter()
        .zip(p2.placements())
        .enumerate()
        .map(|(k, (a, b))| if (i..j).contains(&k) { *b } else { *a })
        .collect::<Vec<Placement>>()
        .into()
}

// ======================== Mutation operator ========================

/// Per-field uniform mutation.
///
/// Each of the three fields of every placement is independently replaced,
/// with probability `rate`, by a fresh uniform draw from its table (which may
/// equal the old value). Returns a new individual.
///
/// # Panics
/// If `rate` is not in `[0, 1]`.
pub fn mutate<R: Rng>(
    individual: &Individual,
    domain: &Domain,
    rate: f64,
    rng: &mut R,
) -> Individual {
    individual
        .placements()
        .iter()
        .map(|p| {
            let mut p = *p;
            if rng.random_bool(rate) {
                p.room = rng.random_range(0..domain.room_count());
            }
            if rng.random_bool(rate) {
                p.time = rng.random_range(0..domain.time_slot_count());
            }
            if rng.random_bool(rate) {
                p.facilitator = rng.random_range(0..domain.facilitator_count());
            }
            p
        })
        .collect::<Vec<Placement>>()
        .into()
}
