#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use std::io::BufRead;
use tracing_subscriber::EnvFilter;

pub mod algo;
pub mod core;
pub mod data;

/// Runs the given scheduler on the project and writes the timeline to stdout.
/// Also writes the fitness to stdout.
///
/// # Errors
/// - If the scheduler fails or produces a schedule not covering the project.
/// - If the timeline could not be written to stdout.
pub fn run_project(scheduler: &mut dyn core::Scheduler, project: &core::Project) -> Result<()> {
    let individual = scheduler.schedule(project)?;
    individual.verify(project)?;

    let fitness = algo::evaluate(project, &individual)?;
    tracing::info!(
        scheduler = scheduler.name(),
        fitness = fitness.score(),
        idle_time = fitness.idle_time,
        dependency_violations = fitness.dependency_violations,
        working_hour_violations = fitness.working_hour_violations,
        "schedule found"
    );

    println!("{}", data::to_string(&individual.timeline(project)?)?);
    println!("{}", fitness.score());

    Ok(())
}

/// Runs the given scheduler on the project read from reader.
///
/// # Errors
/// - If the project could not be read from the reader.
/// - See [`run_project`].
pub fn run_reader(scheduler: &mut dyn core::Scheduler, reader: &mut impl BufRead) -> Result<()> {
    let project: core::Project = data::deserialize(reader)?;
    run_project(scheduler, &project)
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
/// Does nothing if a subscriber is already installed.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
