//! Generational search driver.
//!
//! # Algorithm
//!
//! 1. Validate the config and seed a random population
//! 2. Evaluate and summarize the generation, track the global best
//! 3. Report to the observer; stop on request
//! 4. Stop on convergence or on the generation cap
//! 5. Let the mutation schedule adjust the rate, breed, go to 2
//!
//! A run is single-threaded. The domain is borrowed, the config is copied at
//! start.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::chromosome::Individual;
use super::config::{ConfigError, GaConfig};
use super::observer::{GenerationObserver, GenerationStats};
use super::population::{Population, Scored};
use crate::models::Domain;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Best fitness stopped improving after the minimum generation count.
    Converged,
    /// `max_generations` generations were evaluated.
    GenerationLimit,
    /// The observer asked to stop.
    Cancelled,
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Best individual seen in any generation.
    pub best: Individual,
    /// Fitness of [`GaResult::best`].
    pub best_fitness: f64,
    /// Number of generations evaluated.
    pub generations: usize,
    pub stop_reason: StopReason,
    /// Mutation rate at the end of the run.
    pub final_mutation_rate: f64,
    /// Per-generation summaries, in order.
    pub history: Vec<GenerationStats>,
}

/// Runs the genetic algorithm.
pub struct GaRunner;

impl GaRunner {
    /// Runs without an observer.
    pub fn run(domain: &Domain, config: &GaConfig) -> Result<GaResult, ConfigError> {
        run_search(domain, config, None)
    }

    /// Runs, reporting every generation to `observer`.
    pub fn run_observed(
        domain: &Domain,
        config: &GaConfig,
        observer: &mut dyn GenerationObserver,
    ) -> Result<GaResult, ConfigError> {
        run_search(domain, config, Some(observer))
    }
}

/// Searches for the highest-fitness timetable of `domain`.
///
/// # Errors
/// Returns the first [`ConfigError`] found by [`GaConfig::validate`]; no
/// generation is evaluated in that case.
///
/// # Examples
///
/// ```
/// use sla_schedule::ga::{GaConfig, GenerationStats, run_search};
/// use sla_schedule::models::Domain;
///
/// let domain = Domain::sla().unwrap();
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(20)
///     .with_seed(1);
///
/// let mut printed = 0;
/// let mut observer = |_: &GenerationStats| printed += 1;
/// let result = run_search(&domain, &config, Some(&mut observer)).unwrap();
/// assert_eq!(result.generations, 20);
/// assert_eq!(printed, 20);
/// ```
pub fn run_search(
    domain: &Domain,
    config: &GaConfig,
    mut observer: Option<&mut dyn GenerationObserver>,
) -> Result<GaResult, ConfigError> {
    config.validate()?;
    let config = config.clone();

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    info!(
        population = config.population_size,
        max_generations = config.max_generations,
        mutation_rate = config.mutation_rate,
        seed = ?config.seed,
        "starting search"
    );

    let mut population = Population::random(domain, config.population_size, &mut rng);
    let mut best: Scored = population
        .best()
        .cloned()
        .ok_or(ConfigError::PopulationTooSmall(config.population_size))?;
    let mut rate = config.mutation_rate;
    let mut history: Vec<GenerationStats> = Vec::new();
    let mut stagnant = 0usize;
    let mut generation = 0usize;

    let stop_reason = loop {
        if let Some(current) = population.best() {
            if generation == 0 || current.fitness > best.fitness {
                best = current.clone();
                stagnant = 0;
            } else {
                stagnant += 1;
            }
        }

        let stats = population.stats(generation, rate);
        debug!(
            generation,
            best = stats.best,
            average = stats.average,
            worst = stats.worst,
            "generation evaluated"
        );
        history.push(stats);

        if let Some(observer) = observer.as_deref_mut() {
            observer.on_generation(&stats);
            if observer.should_stop() {
                break StopReason::Cancelled;
            }
        }

        let evaluated = generation + 1;
        if config.stagnation_limit > 0
            && evaluated >= config.min_generations
            && stagnant >= config.stagnation_limit
        {
            break StopReason::Converged;
        }
        if evaluated >= config.max_generations {
            break StopReason::GenerationLimit;
        }

        let next_rate = config.mutation_schedule.next_rate(rate, &history);
        if next_rate != rate {
            debug!(generation, from = rate, to = next_rate, "mutation rate changed");
            rate = next_rate;
        }

        let children = population.breed(domain, &config, rate, &mut rng);
        population = Population::evaluate(domain, children);
        generation += 1;
    };

    info!(
        generations = history.len(),
        best_fitness = best.fitness,
        ?stop_reason,
        "search finished"
    );

    Ok(GaResult {
        best: best.individual,
        best_fitness: best.fitness,
        generations: history.len(),
        stop_reason,
        final_mutation_rate: rate,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::config::MutationSchedule;
    use crate::ga::fitness::evaluate_fitness;

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(60)
            .with_max_generations(40)
            .with_min_generations(10)
            .with_stagnation_limit(15)
            .with_seed(42)
    }

    #[test]
    fn test_run_basic() {
        let domain = Domain::sla().unwrap();
        let result = GaRunner::run(&domain, &small_config()).unwrap();

        assert!(result.best.is_valid(&domain));
        assert!(result.generations > 0 && result.generations <= 40);
        assert_eq!(result.history.len(), result.generations);
        assert_eq!(result.best_fitness, evaluate_fitness(&domain, &result.best));
    }

    #[test]
    fn test_seed_reproducibility() {
        let domain = Domain::sla().unwrap();
        let a = GaRunner::run(&domain, &small_config()).unwrap();
        let b = GaRunner::run(&domain, &small_config()).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.generations, b.generations);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_best_is_global_best() {
        let domain = Domain::sla().unwrap();
        let result = GaRunner::run(&domain, &small_config()).unwrap();
        let peak = result
            .history
            .iter()
            .map(|s| s.best)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_fitness, peak);
    }

    #[test]
    fn test_elitism_keeps_best_non_decreasing() {
        let domain = Domain::sla().unwrap();
        let result = GaRunner::run(&domain, &small_config()).unwrap();
        for pair in result.history.windows(2) {
            assert!(pair[1].best >= pair[0].best);
        }
    }

    #[test]
    fn test_search_improves_on_random() {
        let domain = Domain::sla().unwrap();
        let config = small_config().with_max_generations(60).with_stagnation_limit(0);
        let result = GaRunner::run(&domain, &config).unwrap();
        let first = result.history[0];
        assert!(result.best_fitness > first.average);
    }

    #[test]
    fn test_generation_cap() {
        let domain = Domain::sla().unwrap();
        let config = small_config().with_max_generations(5).with_stagnation_limit(0);
        let result = GaRunner::run(&domain, &config).unwrap();
        assert_eq!(result.generations, 5);
        assert_eq!(result.stop_reason, StopReason::GenerationLimit);
    }

    #[test]
    fn test_convergence_respects_minimum() {
        let domain = Domain::sla().unwrap();
        let config = small_config()
            .with_max_generations(500)
            .with_min_generations(30)
            .with_stagnation_limit(1);
        let result = GaRunner::run(&domain, &config).unwrap();
        assert!(result.generations >= 30);
        if result.stop_reason == StopReason::Converged {
            let last = result.history.len() - 1;
            assert_eq!(result.history[last].best, result.history[last - 1].best);
        }
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let domain = Domain::sla().unwrap();
        let mut seen = Vec::new();
        let mut observer = |s: &GenerationStats| seen.push(s.generation);
        let result = GaRunner::run_observed(&domain, &small_config(), &mut observer).unwrap();

        assert_eq!(seen, (0..result.generations).collect::<Vec<_>>());
    }

    struct StopAfter {
        limit: usize,
        calls: usize,
    }

    impl GenerationObserver for StopAfter {
        fn on_generation(&mut self, _stats: &GenerationStats) {
            self.calls += 1;
        }

        fn should_stop(&self) -> bool {
            self.calls >= self.limit
        }
    }

    #[test]
    fn test_cancellation() {
        let domain = Domain::sla().unwrap();
        let mut observer = StopAfter { limit: 3, calls: 0 };
        let config = small_config().with_stagnation_limit(0);
        let result = run_search(&domain, &config, Some(&mut observer)).unwrap();

        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.generations, 3);
        assert_eq!(observer.calls, 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let domain = Domain::sla().unwrap();
        let config = small_config().with_mutation_rate(0.0);
        assert!(matches!(
            GaRunner::run(&domain, &config),
            Err(ConfigError::MutationRate(_))
        ));
    }

    #[test]
    fn test_zero_elite_rejected_before_search() {
        let domain = Domain::sla().unwrap();
        let config = small_config()
            .with_population_size(20)
            .with_elite_count(0)
            .with_mutation_rate(0.3)
            .with_seed(1);
        let mut calls = 0;
        let mut observer = |_: &GenerationStats| calls += 1;
        assert_eq!(
            GaRunner::run_observed(&domain, &config, &mut observer).map(|r| r.generations),
            Err(ConfigError::NoElite)
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_high_mutation_never_loses_best() {
        let domain = Domain::sla().unwrap();
        let config = small_config()
            .with_population_size(20)
            .with_max_generations(200)
            .with_stagnation_limit(0)
            .with_mutation_rate(0.3)
            .with_seed(1);
        let result = GaRunner::run(&domain, &config).unwrap();
        let regressions = result
            .history
            .windows(2)
            .filter(|pair| pair[1].best < pair[0].best)
            .count();
        assert_eq!(regressions, 0);
    }

    #[test]
    fn test_decay_schedule_lowers_rate() {
        let domain = Domain::sla().unwrap();
        let config = small_config()
            .with_max_generations(10)
            .with_stagnation_limit(0)
            .with_mutation_rate(0.1)
            .with_mutation_schedule(MutationSchedule::Decay {
                factor: 0.5,
                floor: 0.01,
            });
        let result = GaRunner::run(&domain, &config).unwrap();

        assert!((result.history[0].mutation_rate - 0.1).abs() < 1e-12);
        assert!((result.history[1].mutation_rate - 0.05).abs() < 1e-12);
        assert!((result.final_mutation_rate - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_result_serializes() {
        let domain = Domain::sla().unwrap();
        let config = small_config().with_max_generations(2);
        let result = GaRunner::run(&domain, &config).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["generations"], 2);
        assert_eq!(json["best"].as_array().unwrap().len(), 11);
    }
}
