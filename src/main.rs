use buildsched::algo::{Genetic, GeneticConfig};
use buildsched::core::{Project, Scheduler};
use buildsched::{algo, data, init_logging, run_project};
use clap::{Args, Parser, ValueEnum};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug)]
struct Algorithm(usize, &'static str);

impl From<Algorithm> for Box<dyn Scheduler> {
    fn from(value: Algorithm) -> Box<dyn Scheduler> {
        algo::SCHEDULERS[value.0]()
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.1)
    }
}

impl ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        static ALGORITHMS: std::sync::LazyLock<Vec<Algorithm>> = std::sync::LazyLock::new(|| {
            let iter = algo::SCHEDULERS.iter().enumerate();
            iter.map(|(i, init)| Algorithm(i, init().name())).collect()
        });

        ALGORITHMS.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.1))
    }
}

/// Genetic algorithm parameters.
#[derive(Debug, Args)]
struct GeneticArgs {
    /// Number of individuals kept between generations.
    #[clap(long, default_value = "10")]
    population_size: usize,
    /// Number of generations to run.
    #[clap(long, default_value = "50")]
    generations: usize,
    /// Probability that an entry triggers a start time swap.
    #[clap(long, default_value = "0.1")]
    mutation_rate: f64,
    /// Number of individuals competing for each parent slot.
    #[clap(long, default_value = "3")]
    tournament_size: usize,
    /// Upper bound of random start times in hours.
    #[clap(long, default_value = "100")]
    horizon: u64,
}

impl From<GeneticArgs> for GeneticConfig {
    fn from(args: GeneticArgs) -> Self {
        Self {
            population_size: args.population_size,
            generations: args.generations,
            mutation_rate: args.mutation_rate,
            tournament_size: args.tournament_size,
            horizon: args.horizon,
        }
    }
}

/// Application scheduling interdependent tasks on workers and machines.
/// Without a project file the built-in construction project is scheduled.
#[derive(Debug, Parser)]
#[command(version, about)]
enum Application {
    /// Run one of the registered schedulers with default settings.
    Run {
        algorithm: Algorithm,
        /// JSON project catalog.
        #[clap(short, long)]
        project: Option<PathBuf>,
    },
    /// Run the genetic algorithm with explicit parameters.
    Evolve {
        /// JSON project catalog.
        #[clap(short, long)]
        project: Option<PathBuf>,
        /// Seed of the random source. Drawn from entropy when omitted.
        #[clap(short, long)]
        seed: Option<u64>,
        #[command(flatten)]
        config: GeneticArgs,
    },
    /// Run every registered scheduler and compare the results.
    Compare {
        /// JSON project catalog.
        #[clap(short, long)]
        project: Option<PathBuf>,
        /// Exclude scheduling algorithms.
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<Algorithm>,
    },
}

fn schedulers(exclude: &[Algorithm]) -> impl Iterator<Item = Box<dyn Scheduler>> + '_ {
    let iter = algo::SCHEDULERS.iter().map(|init| init());
    iter.filter(|scheduler| !exclude.iter().any(|name| name.1 == scheduler.name()))
}

fn load_project(path: Option<&Path>) -> anyhow::Result<Project> {
    match path {
        Some(path) => data::deserialize(&mut BufReader::new(File::open(path)?)),
        None => Ok(data::construction_project()),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    match Application::parse() {
        Application::Run { algorithm, project } => {
            let project = load_project(project.as_deref())?;
            let mut scheduler = Box::<dyn Scheduler>::from(algorithm);
            run_project(scheduler.as_mut(), &project)
        }
        Application::Evolve {
            project,
            seed,
            config,
        } => {
            let project = load_project(project.as_deref())?;
            let config = GeneticConfig::from(config);
            config.validate_for(&project)?;

            let seed = seed.unwrap_or_else(rand::random);
            tracing::info!(seed, "evolving schedule");
            run_project(&mut Genetic::new(seed, config), &project)
        }
        Application::Compare { project, exclude } => {
            let project = load_project(project.as_deref())?;
            print!("{}", data::run(&project, schedulers(&exclude))?);
            Ok(())
        }
    }
}
