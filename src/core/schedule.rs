use super::{Error, Project, Result};
use ahash::{HashSet, HashSetExt};
use serde::{Deserialize, Serialize};

/// Start time of a task on its resource.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct ScheduleEntry {
    pub task_id: String,
    pub start: u64,
    pub resource_id: String,
}

impl ScheduleEntry {
    /// Creates a new schedule entry.
    #[must_use]
    pub fn new(task_id: &str, start: u64, resource_id: &str) -> Self {
        Self {
            task_id: task_id.into(),
            start,
            resource_id: resource_id.into(),
        }
    }
}

/// A candidate schedule. Holds one entry per task of the project in catalog order.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Individual {
    entries: Vec<ScheduleEntry>,
}

impl Individual {
    /// Creates an individual from entries.
    #[must_use]
    pub const fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Creates an individual placing every task of the project at the given start times.
    /// Start times are given in catalog order.
    ///
    /// # Errors
    /// - If the number of start times differs from the number of tasks.
    pub fn from_starts(project: &Project, starts: &[u64]) -> Result<Self> {
        if starts.len() != project.tasks().len() {
            return Err(Error::LengthMismatch {
                found: starts.len(),
                expected: project.tasks().len(),
            });
        }

        let entries = project.tasks().iter().zip(starts);
        let entries = entries.map(|(task, &start)| ScheduleEntry::new(&task.id, start, &task.resource));
        Ok(Self::new(entries.collect()))
    }

    /// Returns the entries.
    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Returns the entries for in-place modification.
    pub fn entries_mut(&mut self) -> &mut [ScheduleEntry] {
        &mut self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the start times in entry order.
    #[must_use]
    pub fn starts(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.start).collect()
    }

    /// Checks that every task is scheduled exactly once, in catalog order, on its resource.
    ///
    /// # Errors
    /// - The first violated invariant, naming the offending task.
    pub fn verify(&self, project: &Project) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.entries.len());

        for (position, entry) in self.entries.iter().enumerate() {
            let task = project.task(&entry.task_id)?;
            project.resource(&entry.resource_id)?;

            if !seen.insert(entry.task_id.as_str()) {
                return Err(Error::DuplicateEntry(entry.task_id.clone()));
            }
            if project.task_position(&entry.task_id)? != position {
                return Err(Error::MisplacedEntry {
                    task: entry.task_id.clone(),
                    position,
                });
            }
            if entry.resource_id != task.resource {
                return Err(Error::ResourceMismatch {
                    task: entry.task_id.clone(),
                    found: entry.resource_id.clone(),
                    expected: task.resource.clone(),
                });
            }
        }

        if let Some(task) = project.tasks().iter().find(|t| !seen.contains(t.id.as_str())) {
            return Err(Error::MissingEntry(task.id.clone()));
        }

        Ok(())
    }

    /// Joins the entries with task durations for rendering.
    ///
    /// # Errors
    /// - If an entry references an unknown task.
    pub fn timeline(&self, project: &Project) -> Result<Vec<ScheduledTask>> {
        self.entries
            .iter()
            .map(|entry| {
                let duration = project.task(&entry.task_id)?.duration;
                Ok(ScheduledTask {
                    task_id: entry.task_id.clone(),
                    start: entry.start,
                    resource_id: entry.resource_id.clone(),
                    duration,
                })
            })
            .collect()
    }
}

/// A scheduled task as handed over to a renderer.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Eq, Serialize, PartialEq)]
pub struct ScheduledTask {
    pub task_id: String,
    pub start: u64,
    pub resource_id: String,
    pub duration: u64,
}

impl ScheduledTask {
    /// Returns the time the task finishes, or `None` if it does not fit in `u64`.
    #[must_use]
    pub const fn end(&self) -> Option<u64> {
        self.start.checked_add(self.duration)
    }
}
