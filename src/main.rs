//! sla-schedule - search for a good SLA timetable from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sla_schedule::ga::{
    CrossoverType, GaConfig, GeneticOperators, MutationSchedule, SelectionType, TracingObserver,
    evaluate_breakdown, run_search,
};
use sla_schedule::models::{Domain, DomainData};
use sla_schedule::report::{format_breakdown, format_schedule};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sla-schedule")]
#[command(about = "Genetic-algorithm timetabling for SLA activities", long_about = None)]
struct Cli {
    /// Starting per-field mutation probability, in (0, 1)
    #[arg(long, default_value_t = 0.01)]
    mutation_rate: f64,

    /// Individuals per generation
    #[arg(long, default_value_t = 500)]
    population: usize,

    /// Hard cap on generations
    #[arg(long, default_value_t = 1000)]
    max_generations: usize,

    /// Generations before convergence may stop the run
    #[arg(long, default_value_t = 100)]
    min_generations: usize,

    /// Generations without a new best before stopping (0 disables)
    #[arg(long, default_value_t = 100)]
    stagnation: usize,

    /// Best individuals copied unchanged into each generation (at least 1)
    #[arg(long, default_value_t = 1)]
    elite: usize,

    /// Probability a child comes from crossover
    #[arg(long, default_value_t = 0.9)]
    crossover_rate: f64,

    #[arg(long, value_enum, default_value_t = Selection::Tournament)]
    selection: Selection,

    /// Tournament size, used with `--selection tournament`
    #[arg(long, default_value_t = 3)]
    tournament_size: usize,

    #[arg(long, value_enum, default_value_t = Crossover::Uniform)]
    crossover: Crossover,

    /// How the mutation rate evolves during the run
    #[arg(long, value_enum, default_value_t = Schedule::Fixed)]
    schedule: Schedule,

    /// Per-generation multiplier for `--schedule decay`
    #[arg(long, default_value_t = 0.99)]
    decay_factor: f64,

    /// Window in generations for `--schedule plateau`
    #[arg(long, default_value_t = 50)]
    plateau_window: usize,

    /// Minimum relative average gain per window for `--schedule plateau`
    #[arg(long, default_value_t = 0.01)]
    plateau_threshold: f64,

    /// Lowest rate a schedule may reach
    #[arg(long, default_value_t = 0.001)]
    rate_floor: f64,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// JSON domain file; the built-in SLA dataset is used when omitted
    #[arg(long)]
    domain: Option<PathBuf>,

    /// Log progress every N generations
    #[arg(long, default_value_t = 10)]
    log_every: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print the fitness breakdown of the best schedule
    #[arg(long)]
    breakdown: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Selection {
    Tournament,
    Roulette,
    Rank,
}

#[derive(Clone, Copy, ValueEnum)]
enum Crossover {
    Uniform,
    SinglePoint,
    TwoPoint,
}

#[derive(Clone, Copy, ValueEnum)]
enum Schedule {
    Fixed,
    Decay,
    Plateau,
}

impl Cli {
    fn config(&self) -> GaConfig {
        let selection = match self.selection {
            Selection::Tournament => SelectionType::Tournament {
                size: self.tournament_size,
            },
            Selection::Roulette => SelectionType::Roulette,
            Selection::Rank => SelectionType::Rank,
        };
        let crossover = match self.crossover {
            Crossover::Uniform => CrossoverType::Uniform,
            Crossover::SinglePoint => CrossoverType::SinglePoint,
            Crossover::TwoPoint => CrossoverType::TwoPoint,
        };
        let schedule = match self.schedule {
            Schedule::Fixed => MutationSchedule::Fixed,
            Schedule::Decay => MutationSchedule::Decay {
                factor: self.decay_factor,
                floor: self.rate_floor,
            },
            Schedule::Plateau => MutationSchedule::HalveOnPlateau {
                window: self.plateau_window,
                threshold: self.plateau_threshold,
                floor: self.rate_floor,
            },
        };

        let mut config = GaConfig::default()
            .with_population_size(self.population)
            .with_max_generations(self.max_generations)
            .with_min_generations(self.min_generations)
            .with_stagnation_limit(self.stagnation)
            .with_mutation_rate(self.mutation_rate)
            .with_mutation_schedule(schedule)
            .with_crossover_rate(self.crossover_rate)
            .with_elite_count(self.elite)
            .with_operators(GeneticOperators {
                selection,
                crossover,
            });
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_domain(path: Option<&PathBuf>) -> Result<Domain> {
    let data = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<DomainData>(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => sla_schedule::models::sla_data(),
    };
    Ok(Domain::from_data(data)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let domain = load_domain(cli.domain.as_ref())?;
    info!(
        activities = domain.activity_count(),
        rooms = domain.room_count(),
        time_slots = domain.time_slot_count(),
        facilitators = domain.facilitator_count(),
        "domain loaded"
    );

    let config = cli.config();
    let mut observer = TracingObserver::new(cli.log_every);
    let result = run_search(&domain, &config, Some(&mut observer))
        .context("invalid search configuration")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Best fitness {:.2} after {} generations ({:?})",
        result.best_fitness, result.generations, result.stop_reason
    );
    println!();
    print!("{}", format_schedule(&domain, &result.best));
    if cli.breakdown {
        println!();
        print!(
            "{}",
            format_breakdown(&domain, &evaluate_breakdown(&domain, &result.best))
        );
    }
    Ok(())
}
