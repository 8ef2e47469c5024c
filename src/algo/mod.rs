pub mod crossover;
pub mod fitness;
mod genetic;
mod list;
pub mod mutation;
pub mod population;
pub mod selection;

pub use fitness::{calculate_fitness, evaluate, fitness_bound, FitnessBreakdown};
pub use genetic::{Candidate, Evolution, GenerationStats, Genetic, GeneticConfig};
pub use list::List;

use crate::core::Scheduler;

/// Constructors of every scheduler linked into the binary.
#[allow(unsafe_code)]
#[linkme::distributed_slice]
pub static SCHEDULERS: [fn() -> Box<dyn Scheduler>];
