use crate::core::{Individual, Project, ScheduleEntry};
use rand::Rng;

/// Default upper bound of randomly drawn start times.
pub const DEFAULT_HORIZON: u64 = 100;

/// Creates an individual with start times drawn uniformly from `0..=horizon`.
pub fn create_individual(project: &Project, horizon: u64, rng: &mut impl Rng) -> Individual {
    let entries = project.tasks().iter().map(|task| {
        let start = rng.gen_range(0..=horizon);
        ScheduleEntry::new(&task.id, start, &task.resource)
    });
    Individual::new(entries.collect())
}

/// Creates `size` independent random individuals.
pub fn create_population(
    project: &Project,
    size: usize,
    horizon: u64,
    rng: &mut impl Rng,
) -> Vec<Individual> {
    (0..size)
        .map(|_| create_individual(project, horizon, rng))
        .collect()
}
