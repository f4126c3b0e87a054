//! Search configuration.

use serde::{Deserialize, Serialize};

use super::observer::GenerationStats;
use super::operators::{GeneticOperators, SelectionType};

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("mutation rate must be in (0, 1), got {0}")]
    MutationRate(f64),
    #[error("crossover rate must be in [0, 1], got {0}")]
    CrossoverRate(f64),
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("elite_count must be at least 1")]
    NoElite,
    #[error("elite_count ({elite}) must be smaller than population_size ({population})")]
    EliteCount { elite: usize, population: usize },
    #[error("max_generations must be at least 1")]
    ZeroMaxGenerations,
    #[error("tournament size must be at least 1")]
    TournamentSize,
    #[error("invalid mutation schedule: {0}")]
    Schedule(String),
}

/// How the mutation rate evolves during a run.
///
/// The run always starts at [`GaConfig::mutation_rate`]; the schedule only
/// decides what happens after each generation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MutationSchedule {
    /// Keep the starting rate.
    #[default]
    Fixed,
    /// Multiply the rate by `factor` every generation, never going below `floor`.
    Decay { factor: f64, floor: f64 },
    /// Every `window` generations, halve the rate (down to `floor`) if the
    /// average fitness improved by less than `threshold` (relative) over
    /// the window.
    HalveOnPlateau {
        window: usize,
        threshold: f64,
        floor: f64,
    },
}

impl MutationSchedule {
    /// Rate for the next generation, given the history so far.
    ///
    /// `history` ends with the generation just evaluated.
    pub fn next_rate(&self, rate: f64, history: &[GenerationStats]) -> f64 {
        match *self {
            MutationSchedule::Fixed => rate,
            MutationSchedule::Decay { factor, floor } => (rate * factor).max(floor),
            MutationSchedule::HalveOnPlateau {
                window,
                threshold,
                floor,
            } => {
                let Some(latest) = history.last() else {
                    return rate;
                };
                let g = latest.generation;
                if window == 0 || g == 0 || g % window != 0 || history.len() <= window {
                    return rate;
                }
                let earlier = &history[history.len() - 1 - window];
                if latest.average_gain_over(earlier) < threshold {
                    (rate / 2.0).max(floor).min(rate)
                } else {
                    rate
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let floor_ok = |floor: f64| floor > 0.0 && floor < 1.0;
        match *self {
            MutationSchedule::Fixed => Ok(()),
            MutationSchedule::Decay { factor, floor } => {
                if !(factor > 0.0 && factor <= 1.0) {
                    return Err(ConfigError::Schedule(format!(
                        "decay factor must be in (0, 1], got {factor}"
                    )));
                }
                if !floor_ok(floor) {
                    return Err(ConfigError::Schedule(format!(
                        "floor must be in (0, 1), got {floor}"
                    )));
                }
                Ok(())
            }
            MutationSchedule::HalveOnPlateau { window, floor, .. } => {
                if window == 0 {
                    return Err(ConfigError::Schedule("window must be at least 1".into()));
                }
                if !floor_ok(floor) {
                    return Err(ConfigError::Schedule(format!(
                        "floor must be in (0, 1), got {floor}"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Configuration for one search run.
///
/// The runner copies what it needs at start; changing a config afterwards
/// never affects a run already in progress.
///
/// # Examples
///
/// ```
/// use sla_schedule::ga::{GaConfig, MutationSchedule};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_mutation_rate(0.02)
///     .with_mutation_schedule(MutationSchedule::Decay { factor: 0.99, floor: 0.001 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Hard cap on evaluated generations.
    pub max_generations: usize,
    /// Generations to run before convergence may stop the search.
    pub min_generations: usize,
    /// Consecutive generations without a new best before stopping (0 to disable).
    pub stagnation_limit: usize,
    /// Starting per-field mutation probability, in (0, 1).
    pub mutation_rate: f64,
    /// How the mutation rate changes during the run.
    pub mutation_schedule: MutationSchedule,
    /// Probability a child is produced by crossover rather than copied from
    /// its first parent.
    pub crossover_rate: f64,
    /// Best individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// Selection and crossover strategies.
    pub operators: GeneticOperators,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            max_generations: 1000,
            min_generations: 100,
            stagnation_limit: 100,
            mutation_rate: 0.01,
            mutation_schedule: MutationSchedule::Fixed,
            crossover_rate: 0.9,
            elite_count: 1,
            operators: GeneticOperators::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_min_generations(mut self, n: usize) -> Self {
        self.min_generations = n;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    /// Sets the starting mutation rate. Checked by [`GaConfig::validate`].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_mutation_schedule(mut self, schedule: MutationSchedule) -> Self {
        self.mutation_schedule = schedule;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the mutation rate for the next run.
    ///
    /// Rejects rates outside the open interval (0, 1) and leaves the
    /// config unchanged in that case.
    pub fn set_mutation_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        check_mutation_rate(rate)?;
        self.mutation_rate = rate;
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.elite_count == 0 {
            return Err(ConfigError::NoElite);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::EliteCount {
                elite: self.elite_count,
                population: self.population_size,
            });
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroMaxGenerations);
        }
        check_mutation_rate(self.mutation_rate)?;
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::CrossoverRate(self.crossover_rate));
        }
        if let SelectionType::Tournament { size: 0 } = self.operators.selection {
            return Err(ConfigError::TournamentSize);
        }
        self.mutation_schedule.validate()
    }
}

fn check_mutation_rate(rate: f64) -> Result<(), ConfigError> {
    if rate > 0.0 && rate < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::MutationRate(rate))
    }
}
