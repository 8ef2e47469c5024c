use crate::algo::{evaluate, FitnessBreakdown};
use crate::core::{Project, Scheduler};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// Report of running several schedulers on one project.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Get the entry with the lowest fitness.
    #[must_use]
    pub fn best(&self) -> Option<&ReportEntry> {
        self.entries.iter().min_by_key(|entry| entry.fitness.score())
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single scheduler.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub scheduler: String,
    pub fitness: FitnessBreakdown,
    pub time: f64,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}: {} (idle {}, dependency violations {}, working hour violations {}) in {:.2} sec",
            self.scheduler,
            self.fitness.score(),
            self.fitness.idle_time,
            self.fitness.dependency_violations,
            self.fitness.working_hour_violations,
            self.time
        )
    }
}

/// Runs every scheduler on the project and evaluates the produced schedules.
///
/// # Errors
/// - If a scheduler fails.
/// - If a produced schedule does not cover the project.
pub fn run(
    project: &Project,
    schedulers: impl IntoIterator<Item = Box<dyn Scheduler>>,
) -> anyhow::Result<Report> {
    let mut report = Report::default();

    for mut scheduler in schedulers {
        let time = std::time::Instant::now();
        let individual = scheduler.schedule(project)?;
        let time = time.elapsed().as_secs_f64();

        individual.verify(project)?;
        let fitness = evaluate(project, &individual)?;
        tracing::debug!(scheduler = scheduler.name(), fitness = fitness.score(), "scheduler finished");

        report.entries.push(ReportEntry {
            scheduler: scheduler.name().into(),
            fitness,
            time,
        });
    }

    Ok(report)
}
