//! GA-based timetable search.
//!
//! # Encoding
//!
//! An individual holds one [`Placement`] (room, time slot, facilitator) per
//! activity, in domain order. See [`chromosome`] for details.
//!
//! # Submodules
//!
//! - [`fitness`]: Layered timetable scoring with a per-term breakdown
//! - [`operators`]: Runtime-selectable selection and crossover, field mutation
//! - [`config`]: Run parameters and the mutation-rate schedule
//! - [`runner`]: The generational loop
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod chromosome;
pub mod config;
pub mod fitness;
pub mod observer;
pub mod operators;
pub mod population;
pub mod runner;

pub use chromosome::{Individual, Placement, create_random_individual};
pub use config::{ConfigError, GaConfig, MutationSchedule};
pub use fitness::{FitnessBreakdown, evaluate_breakdown, evaluate_fitness};
pub use observer::{GenerationObserver, GenerationStats, TracingObserver};
pub use operators::{CrossoverType, GeneticOperators, SelectionType};
pub use population::{Population, Scored};
pub use runner::{GaResult, GaRunner, StopReason, run_search};
