use crate::core::{Error, Individual, Project, Result, ScheduleEntry};
use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

/// Penalty for a dependency that ends after its dependent starts.
pub const DEPENDENCY_PENALTY: u64 = 100;

/// Penalty for a task longer than the daily working hours of its resource.
pub const WORKING_HOUR_PENALTY: u64 = 50;

/// Components of the fitness of an individual.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct FitnessBreakdown {
    pub idle_time: u64,
    pub dependency_violations: u64,
    pub working_hour_violations: u64,
}

impl FitnessBreakdown {
    /// Returns the weighted fitness. Lower is better.
    /// Saturates at `u64::MAX`; breakdowns returned by [`evaluate`] never saturate.
    #[must_use]
    pub const fn score(&self) -> u64 {
        match self.checked_score() {
            Some(score) => score,
            None => u64::MAX,
        }
    }

    /// Returns the weighted fitness, or `None` if it does not fit in `u64`.
    #[must_use]
    pub const fn checked_score(&self) -> Option<u64> {
        let Some(dependency) = self.dependency_violations.checked_mul(DEPENDENCY_PENALTY) else {
            return None;
        };
        let Some(working_hour) = self.working_hour_violations.checked_mul(WORKING_HOUR_PENALTY)
        else {
            return None;
        };
        let Some(penalty) = dependency.checked_add(working_hour) else {
            return None;
        };
        self.idle_time.checked_add(penalty)
    }
}

/// Evaluates an individual against the project.
///
/// Entries are walked in stored order, not by start time. Idle time of a resource is the gap
/// between the end of the previously visited entry on it and the start of the current one.
/// Overlapping entries are neither charged nor reported.
///
/// # Errors
/// - If an entry references an unknown task or resource.
/// - If a dependency has no entry in the individual.
/// - If an end time or the accumulated fitness does not fit in `u64`.
pub fn evaluate(project: &Project, individual: &Individual) -> Result<FitnessBreakdown> {
    let mut resource_end: HashMap<&str, u64> = HashMap::with_capacity(project.resources().len());
    for resource in project.resources() {
        resource_end.insert(&resource.id, 0);
    }

    let mut entries: HashMap<&str, &ScheduleEntry> = HashMap::with_capacity(individual.len());
    for entry in individual.entries() {
        entries.entry(&entry.task_id).or_insert(entry);
    }

    let mut breakdown = FitnessBreakdown::default();

    for entry in individual.entries() {
        let task = project.task(&entry.task_id)?;
        let resource = project.resource(&entry.resource_id)?;
        let end = end_of(entry, task.duration)?;

        let last = resource_end
            .get_mut(resource.id.as_str())
            .ok_or_else(|| Error::UnknownResource(resource.id.clone()))?;
        if *last < entry.start {
            breakdown.idle_time = breakdown
                .idle_time
                .checked_add(entry.start - *last)
                .ok_or_else(|| overflow(entry))?;
        }
        *last = end;

        for dependency in &task.dependencies {
            let scheduled = entries
                .get(dependency.as_str())
                .ok_or_else(|| Error::MissingEntry(dependency.clone()))?;
            if end_of(scheduled, project.task(dependency)?.duration)? > entry.start {
                breakdown.dependency_violations += 1;
            }
        }

        if task.duration > resource.working_hours_per_day {
            breakdown.working_hour_violations += 1;
        }
    }

    match (breakdown.checked_score(), individual.entries().last()) {
        (None, Some(entry)) => Err(overflow(entry)),
        _ => Ok(breakdown),
    }
}

fn end_of(entry: &ScheduleEntry, duration: u64) -> Result<u64> {
    entry.start.checked_add(duration).ok_or_else(|| overflow(entry))
}

fn overflow(entry: &ScheduleEntry) -> Error {
    Error::Overflow {
        task: entry.task_id.clone(),
    }
}

/// Returns an upper bound of the fitness of any individual whose start times lie in
/// `0..=horizon`, or `None` if that bound does not fit in `u64`.
#[must_use]
pub fn fitness_bound(project: &Project, horizon: u64) -> Option<u64> {
    let tasks = u64::try_from(project.tasks().len()).ok()?;
    let edges = u64::try_from(project.dependency_count()).ok()?;
    tasks
        .checked_mul(horizon)?
        .checked_add(project.total_duration())?
        .checked_add(edges.checked_mul(DEPENDENCY_PENALTY)?)?
        .checked_add(tasks.checked_mul(WORKING_HOUR_PENALTY)?)
}

/// Calculates the fitness of an individual. Lower is better.
///
/// # Errors
/// - See [`evaluate`].
pub fn calculate_fitness(project: &Project, individual: &Individual) -> Result<u64> {
    evaluate(project, individual).map(|breakdown| breakdown.score())
}
