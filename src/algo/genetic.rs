use super::crossover::crossover;
use super::fitness::{evaluate, fitness_bound, FitnessBreakdown};
use super::mutation::mutate;
use super::population::{create_population, DEFAULT_HORIZON};
use super::selection::tournament_selection;
use crate::core::{Error, Individual, Project, Result, Scheduler};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters of the genetic algorithm.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    pub horizon: u64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            generations: 50,
            mutation_rate: 0.1,
            tournament_size: 3,
            horizon: DEFAULT_HORIZON,
        }
    }
}

impl GeneticConfig {
    /// Checks that the parameters allow the algorithm to run.
    ///
    /// # Errors
    /// - If the population cannot form crossover pairs or the tournament does not fit in it.
    /// - If there are no generations or the mutation rate is not a probability.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::Config(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations == 0 {
            return Err(Error::Config("generations must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::Config(format!(
                "mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(Error::Config(format!(
                "tournament size must be within 1..={}, got {}",
                self.population_size, self.tournament_size
            )));
        }
        Ok(())
    }

    /// Checks the parameters and that every fitness reachable on the project fits in `u64`.
    ///
    /// # Errors
    /// - See [`GeneticConfig::validate`].
    /// - If the horizon is too large for the project.
    pub fn validate_for(&self, project: &Project) -> Result<()> {
        self.validate()?;
        if fitness_bound(project, self.horizon).is_none() {
            return Err(Error::Config(format!(
                "horizon {} is too large for {} tasks",
                self.horizon,
                project.tasks().len()
            )));
        }
        Ok(())
    }
}

/// An individual together with its evaluated fitness.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    individual: Individual,
    breakdown: FitnessBreakdown,
}

impl Candidate {
    /// Evaluates the individual.
    ///
    /// # Errors
    /// - If the individual references tasks or resources missing from the project.
    pub fn evaluate(project: &Project, individual: Individual) -> Result<Self> {
        let breakdown = evaluate(project, &individual)?;
        Ok(Self {
            individual,
            breakdown,
        })
    }

    /// Returns the weighted fitness. Lower is better.
    #[must_use]
    pub const fn fitness(&self) -> u64 {
        self.breakdown.score()
    }

    /// Returns the components of the fitness.
    #[must_use]
    pub const fn breakdown(&self) -> &FitnessBreakdown {
        &self.breakdown
    }

    /// Returns the evaluated individual.
    #[must_use]
    pub const fn individual(&self) -> &Individual {
        &self.individual
    }

    /// Consumes the candidate, returning its individual.
    #[must_use]
    pub fn into_individual(self) -> Individual {
        self.individual
    }
}

/// Fitness summary of a generation.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: u64,
    pub mean_fitness: f64,
}

impl GenerationStats {
    #[allow(clippy::cast_precision_loss)]
    fn of(generation: usize, ranked: &[Candidate]) -> Self {
        let best_fitness = ranked.first().map(Candidate::fitness).unwrap_or_default();
        let total: u128 = ranked.iter().map(|c| u128::from(c.fitness())).sum();
        let mean_fitness = total as f64 / ranked.len().max(1) as f64;
        Self {
            generation,
            best_fitness,
            mean_fitness,
        }
    }
}

/// Outcome of a run: the best candidate of the last generation and per-generation statistics.
#[derive(Clone, Debug)]
pub struct Evolution {
    pub best: Candidate,
    pub history: Vec<GenerationStats>,
}

/// Genetic algorithm searching start times of the project's tasks.
///
/// Each generation breeds as many offspring as the population holds and keeps the best
/// `population_size` of parents and offspring together.
#[derive(Clone, Debug)]
pub struct Genetic {
    config: GeneticConfig,
    rng: StdRng,
}

impl Genetic {
    /// Creates a new genetic algorithm with a seeded random source.
    #[must_use]
    pub fn new(seed: u64, config: GeneticConfig) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        Self { config, rng }
    }

    /// Returns the parameters of the algorithm.
    #[must_use]
    pub const fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Runs the configured number of generations.
    ///
    /// # Errors
    /// - If the configuration is invalid or its horizon is too large for the project.
    /// - If an individual breaks the project invariants.
    pub fn evolve(&mut self, project: &Project) -> Result<Evolution> {
        self.config.validate_for(project)?;
        tracing::debug!(config = ?self.config, tasks = project.tasks().len(), "starting evolution");

        let size = self.config.population_size;
        let initial = create_population(project, size, self.config.horizon, &mut self.rng);
        let mut population = score(project, initial)?;
        rank(&mut population);

        let mut history = Vec::with_capacity(self.config.generations);
        for generation in 1..=self.config.generations {
            let offspring = self.breed(&population)?;
            population.extend(score(project, offspring)?);
            rank(&mut population);
            population.truncate(size);

            let stats = GenerationStats::of(generation, &population);
            tracing::info!(
                generation,
                best_fitness = stats.best_fitness,
                mean_fitness = stats.mean_fitness,
                "generation evolved"
            );
            history.push(stats);
        }

        let best = population
            .into_iter()
            .next()
            .ok_or_else(|| Error::Config("population is empty".into()))?;
        Ok(Evolution { best, history })
    }

    fn breed(&mut self, population: &[Candidate]) -> Result<Vec<Individual>> {
        let size = self.config.population_size;
        let rate = self.config.mutation_rate;
        let mut offspring = Vec::with_capacity(size);

        while offspring.len() < size {
            let first = tournament_selection(population, self.config.tournament_size, &mut self.rng)?;
            let second = tournament_selection(population, self.config.tournament_size, &mut self.rng)?;

            let (mut child, mut other) =
                crossover(first.individual(), second.individual(), &mut self.rng)?;
            mutate(&mut child, rate, &mut self.rng);
            mutate(&mut other, rate, &mut self.rng);

            offspring.push(child);
            if offspring.len() < size {
                offspring.push(other);
            }
        }

        Ok(offspring)
    }
}

impl Default for Genetic {
    fn default() -> Self {
        let config = GeneticConfig::default();
        let rng = StdRng::from_entropy();
        Self { config, rng }
    }
}

impl Scheduler for Genetic {
    fn schedule(&mut self, project: &Project) -> Result<Individual> {
        self.evolve(project).map(|evolution| evolution.best.into_individual())
    }

    fn name(&self) -> &'static str {
        "Genetic"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SCHEDULERS)]
static INSTANCE: fn() -> Box<dyn Scheduler> = || Box::new(Genetic::default());

/// Stable sort by ascending fitness. Equal candidates keep their order.
fn rank(population: &mut [Candidate]) {
    population.sort_by_key(Candidate::fitness);
}

#[cfg(not(feature = "parallel"))]
fn score(project: &Project, individuals: Vec<Individual>) -> Result<Vec<Candidate>> {
    individuals
        .into_iter()
        .map(|individual| Candidate::evaluate(project, individual))
        .collect()
}

#[cfg(feature = "parallel")]
fn score(project: &Project, individuals: Vec<Individual>) -> Result<Vec<Candidate>> {
    use rayon::prelude::*;

    individuals
        .into_par_iter()
        .map(|individual| Candidate::evaluate(project, individual))
        .collect()
}
