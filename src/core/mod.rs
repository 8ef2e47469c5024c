mod error;
mod problem;
mod schedule;

pub use error::*;
pub use problem::*;
pub use schedule::*;

/// Schedules the tasks of a project.
pub trait Scheduler {
    /// Produces a schedule for the given project.
    ///
    /// # Errors
    /// - If the scheduler is misconfigured for the project.
    fn schedule(&mut self, project: &Project) -> Result<Individual>;

    /// Returns the name of the scheduler.
    fn name(&self) -> &'static str;
}
