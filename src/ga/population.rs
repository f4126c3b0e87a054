//! Evaluated generations and breeding.

use rand::Rng;

use super::chromosome::Individual;
use super::config::GaConfig;
use super::fitness::evaluate_fitness;
use super::observer::GenerationStats;
use super::operators::mutate;
use crate::models::Domain;

/// An individual paired with its fitness.
///
/// Fitness is recomputed every generation and never stored on the
/// individual itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub individual: Individual,
    pub fitness: f64,
}

/// One evaluated generation.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Scored>,
}

impl Population {
    /// Creates and evaluates `size` random individuals.
    pub fn random<R: Rng>(domain: &Domain, size: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(domain, rng))
            .collect();
        Self::evaluate(domain, individuals)
    }

    /// Scores every individual against `domain`.
    pub fn evaluate(domain: &Domain, individuals: Vec<Individual>) -> Self {
        let members = individuals
            .into_iter()
            .map(|individual| {
                let fitness = evaluate_fitness(domain, &individual);
                Scored {
                    individual,
                    fitness,
                }
            })
            .collect();
        Self { members }
    }

    pub fn members(&self) -> &[Scored] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Highest-fitness member. Ties go to the earliest.
    pub fn best(&self) -> Option<&Scored> {
        self.members.iter().fold(None, |best, m| match best {
            Some(b) if b.fitness >= m.fitness => Some(b),
            _ => Some(m),
        })
    }

    /// Summarizes the generation. An empty population reports zeros.
    pub fn stats(&self, generation: usize, mutation_rate: f64) -> GenerationStats {
        if self.members.is_empty() {
            return GenerationStats {
                generation,
                best: 0.0,
                average: 0.0,
                worst: 0.0,
                mutation_rate,
            };
        }
        let (mut best, mut worst, mut sum) = (f64::NEG_INFINITY, f64::INFINITY, 0.0);
        for m in &self.members {
            best = best.max(m.fitness);
            worst = worst.min(m.fitness);
            sum += m.fitness;
        }
        GenerationStats {
            generation,
            best,
            average: sum / self.members.len() as f64,
            worst,
            mutation_rate,
        }
    }

    /// Indices of the `n` fittest members, best first. Ties keep member order.
    fn elite_indices(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.members.len()).collect();
        order.sort_by(|&a, &b| self.members[b].fitness.total_cmp(&self.members[a].fitness));
        order.truncate(n);
        order
    }

    /// Produces the next generation's individuals.
    ///
    /// The `elite_count` fittest members are copied unchanged. Every other
    /// slot is filled by selecting two parents, recombining them with
    /// probability `crossover_rate` (otherwise copying the first parent),
    /// then mutating the child at `mutation_rate`.
    ///
    /// # Panics
    /// If the population is empty.
    pub fn breed<R: Rng>(
        &self,
        domain: &Domain,
        config: &GaConfig,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Vec<Individual> {
        let size = config.population_size;
        let mut next: Vec<Individual> = self
            .elite_indices(config.elite_count.min(size))
            .into_iter()
            .map(|i| self.members[i].individual.clone())
            .collect();

        let ops = config.operators;
        let selector = ops.selector(&self.members);
        while next.len() < size {
            let p1 = selector.pick(rng);
            let p2 = selector.pick(rng);
            let child = if rng.random_bool(config.crossover_rate) {
                ops.crossover(p1, p2, rng)
            } else {
                p1.clone()
            };
            next.push(mutate(&child, domain, mutation_rate, rng));
        }
        next
    }
}
