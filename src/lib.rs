//! Genetic-algorithm timetabling for the SLA course schedule.
//!
//! Assigns every activity a room, a time slot and a facilitator so that a
//! layered fitness function (room fit, facilitator suitability and load,
//! section spacing) is maximized.
//!
//! # Modules
//!
//! - **`models`**: Domain tables (`Activity`, `Room`, `TimeSlot`,
//!   `Facilitator`), scheduling rules and the resolved `Domain`
//! - **`validation`**: Input integrity checks (empty tables, duplicate names,
//!   unknown references)
//! - **`ga`**: Encoding, fitness, operators and the search driver
//! - **`report`**: Fixed-width schedule and fitness breakdown text
//!
//! # Example
//!
//! ```
//! use sla_schedule::ga::{GaConfig, GaRunner};
//! use sla_schedule::models::Domain;
//! use sla_schedule::report::format_schedule;
//!
//! let domain = Domain::sla().unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(40)
//!     .with_max_generations(10)
//!     .with_seed(42);
//! let result = GaRunner::run(&domain, &config).unwrap();
//! println!("{}", format_schedule(&domain, &result.best));
//! ```

pub mod ga;
pub mod models;
pub mod report;
pub mod validation;
