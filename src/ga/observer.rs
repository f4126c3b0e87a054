//! Per-generation progress reporting.
//!
//! A run calls its observer once per evaluated generation, in order. The
//! observer may also ask the run to stop; the run checks after each call.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Zero-based generation counter.
    pub generation: usize,
    /// Highest fitness in the generation.
    pub best: f64,
    /// Mean fitness.
    pub average: f64,
    /// Lowest fitness.
    pub worst: f64,
    /// Mutation rate in effect when this generation was bred.
    pub mutation_rate: f64,
}

impl GenerationStats {
    /// Relative improvement of the average over `earlier`.
    ///
    /// Falls back to the absolute difference when `earlier` averages zero.
    pub fn average_gain_over(&self, earlier: &GenerationStats) -> f64 {
        let gain = self.average - earlier.average;
        if earlier.average.abs() > f64::EPSILON {
            gain / earlier.average.abs()
        } else {
            gain
        }
    }
}

/// Receives generation summaries during a run.
pub trait GenerationObserver {
    /// Called after each generation is evaluated.
    fn on_generation(&mut self, stats: &GenerationStats);

    /// Cooperative cancellation. Checked after every `on_generation`.
    fn should_stop(&self) -> bool {
        false
    }
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationStats),
{
    fn on_generation(&mut self, stats: &GenerationStats) {
        self(stats)
    }
}

/// Logs a progress line every `every` generations at `info` level.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    every: usize,
}

impl TracingObserver {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(10)
    }
}

impl GenerationObserver for TracingObserver {
    fn on_generation(&mut self, stats: &GenerationStats) {
        if stats.generation % self.every == 0 {
            info!(
                generation = stats.generation,
                best = stats.best,
                average = stats.average,
                worst = stats.worst,
                mutation_rate = stats.mutation_rate,
                "generation"
            );
        }
    }
}
