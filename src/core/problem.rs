use super::{Error, Result};
use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A task. Has a duration in hours, the tasks it depends on and the resource processing it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub duration: u64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub resource: String,
}

impl Task {
    /// Creates a new task without description.
    #[must_use]
    pub fn new(id: &str, duration: u64, dependencies: &[&str], resource: &str) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            duration,
            dependencies: dependencies.iter().map(|&id| id.into()).collect(),
            resource: resource.into(),
        }
    }

    /// Sets the description of the task.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.into();
        self
    }
}

/// Kind of a resource.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Worker,
    Machine,
}

/// A worker or a machine with a daily working-hour capacity.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct Resource {
    pub id: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub skillset: String,
    pub working_hours_per_day: u64,
}

impl Resource {
    /// Creates a new resource without skillset.
    #[must_use]
    pub fn new(id: &str, kind: ResourceKind, working_hours_per_day: u64) -> Self {
        Self {
            id: id.into(),
            kind,
            skillset: String::new(),
            working_hours_per_day,
        }
    }

    /// Sets the skillset of the resource.
    #[must_use]
    pub fn with_skillset(mut self, skillset: &str) -> Self {
        self.skillset = skillset.into();
        self
    }
}

/// Raw catalog as it appears in serialized form.
#[derive(Clone, Debug, Deserialize, Serialize)]
struct Catalog {
    tasks: Vec<Task>,
    resources: Vec<Resource>,
}

/// A validated catalog of tasks and resources.
///
/// Dependencies form a DAG and every referenced id exists. Lookups by id are constant time.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(try_from = "Catalog", into = "Catalog")]
pub struct Project {
    tasks: Vec<Task>,
    resources: Vec<Resource>,
    task_index: HashMap<String, usize>,
    resource_index: HashMap<String, usize>,
    order: Vec<usize>,
    total_duration: u64,
}

impl Project {
    /// Creates a new project from the given catalog.
    ///
    /// # Errors
    /// - If an id is duplicated, a duration or capacity is zero, or a reference is unknown.
    /// - If the dependencies contain a cycle.
    /// - If the total duration does not fit in `u64`.
    pub fn new(tasks: Vec<Task>, resources: Vec<Resource>) -> Result<Self> {
        let mut resource_index = HashMap::with_capacity(resources.len());
        for (index, resource) in resources.iter().enumerate() {
            if resource.working_hours_per_day == 0 {
                return Err(Error::ZeroCapacity(resource.id.clone()));
            }
            if resource_index.insert(resource.id.clone(), index).is_some() {
                return Err(Error::DuplicateResource(resource.id.clone()));
            }
        }

        let mut task_index = HashMap::with_capacity(tasks.len());
        let mut total_duration = 0u64;
        for (index, task) in tasks.iter().enumerate() {
            if task.duration == 0 {
                return Err(Error::ZeroDuration(task.id.clone()));
            }
            if !resource_index.contains_key(&task.resource) {
                return Err(Error::UnknownResource(task.resource.clone()));
            }
            if task_index.insert(task.id.clone(), index).is_some() {
                return Err(Error::DuplicateTask(task.id.clone()));
            }
            total_duration = total_duration
                .checked_add(task.duration)
                .ok_or_else(|| Error::Overflow {
                    task: task.id.clone(),
                })?;
        }

        let order = topological_order(&tasks, &task_index)?;

        Ok(Self {
            tasks,
            resources,
            task_index,
            resource_index,
            order,
            total_duration,
        })
    }

    /// Returns the tasks in catalog order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the resources in catalog order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Returns the task with the given id.
    ///
    /// # Errors
    /// - If there is no such task.
    pub fn task(&self, id: &str) -> Result<&Task> {
        self.task_position(id).map(|index| &self.tasks[index])
    }

    /// Returns the catalog position of the task with the given id.
    ///
    /// # Errors
    /// - If there is no such task.
    pub fn task_position(&self, id: &str) -> Result<usize> {
        self.task_index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownTask(id.into()))
    }

    /// Returns the resource with the given id.
    ///
    /// # Errors
    /// - If there is no such resource.
    pub fn resource(&self, id: &str) -> Result<&Resource> {
        self.resource_index
            .get(id)
            .map(|&index| &self.resources[index])
            .ok_or_else(|| Error::UnknownResource(id.into()))
    }

    /// Returns task positions ordered so that every task comes after its dependencies.
    /// Independent tasks keep their catalog order.
    #[must_use]
    pub fn topological_order(&self) -> &[usize] {
        &self.order
    }

    /// Returns the sum of all task durations.
    #[must_use]
    pub const fn total_duration(&self) -> u64 {
        self.total_duration
    }

    /// Returns the number of dependency edges.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.tasks.iter().map(|task| task.dependencies.len()).sum()
    }
}

impl TryFrom<Catalog> for Project {
    type Error = Error;

    fn try_from(catalog: Catalog) -> Result<Self> {
        Self::new(catalog.tasks, catalog.resources)
    }
}

impl From<Project> for Catalog {
    fn from(project: Project) -> Self {
        Self {
            tasks: project.tasks,
            resources: project.resources,
        }
    }
}

/// Kahn's algorithm, always releasing the ready task with the lowest catalog position.
fn topological_order(tasks: &[Task], index: &HashMap<String, usize>) -> Result<Vec<usize>> {
    let mut dependents = vec![Vec::new(); tasks.len()];
    let mut pending = vec![0usize; tasks.len()];

    for (position, task) in tasks.iter().enumerate() {
        let mut seen = HashSet::with_capacity(task.dependencies.len());
        for dependency in &task.dependencies {
            if !seen.insert(dependency.as_str()) {
                return Err(Error::DuplicateDependency {
                    task: task.id.clone(),
                    dependency: dependency.clone(),
                });
            }
            let &from = index
                .get(dependency)
                .ok_or_else(|| Error::UnknownTask(dependency.clone()))?;
            dependents[from].push(position);
            pending[position] += 1;
        }
    }

    let mut ready: VecDeque<usize> = (0..tasks.len()).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(tasks.len());

    while let Some(position) = ready.pop_front() {
        order.push(position);
        for &next in &dependents[position] {
            pending[next] -= 1;
            if pending[next] == 0 {
                let at = ready.partition_point(|&queued| queued < next);
                ready.insert(at, next);
            }
        }
    }

    if order.len() < tasks.len() {
        let stuck = (0..tasks.len()).find(|&i| pending[i] > 0).unwrap_or_default();
        return Err(Error::Cycle(tasks[stuck].id.clone()));
    }

    Ok(order)
}

#[cfg(test)]
mod test {
    use super::*;

    fn resources() -> Vec<Resource> {
        vec![
            Resource::new("W1", ResourceKind::Worker, 8),
            Resource::new("M1", ResourceKind::Machine, 10),
        ]
    }

    #[test]
    fn project_should_serialize() -> anyhow::Result<()> {
        let project = Project::new(
            vec![
                Task::new("T1", 4, &[], "M1").with_description("Dig"),
                Task::new("T2", 6, &["T1"], "W1"),
            ],
            resources(),
        )?;

        let serialized = crate::data::to_string(&project)?;
        let mut reader = std::io::Cursor::new(serialized);
        let deserialized: Project = crate::data::deserialize(&mut reader)?;

        assert_eq!(project.tasks(), deserialized.tasks());
        assert_eq!(project.resources(), deserialized.resources());
        assert_eq!(deserialized.task("T2")?.dependencies, vec!["T1".to_string()]);

        Ok(())
    }

    #[test]
    fn test_lookup() -> anyhow::Result<()> {
        let project = Project::new(vec![Task::new("T1", 4, &[], "M1")], resources())?;

        assert_eq!(project.task("T1")?.duration, 4);
        assert_eq!(project.total_duration(), 4);
        assert_eq!(project.dependency_count(), 0);
        assert_eq!(project.resource("W1")?.working_hours_per_day, 8);
        assert_eq!(project.task("T9"), Err(Error::UnknownTask("T9".into())));
        assert_eq!(
            project.resource("X").map(|r| r.id.clone()),
            Err(Error::UnknownResource("X".into()))
        );
        Ok(())
    }

    #[test]
    fn test_topological_order() -> anyhow::Result<()> {
        let project = Project::new(
            vec![
                Task::new("A", 1, &["C"], "W1"),
                Task::new("B", 1, &[], "W1"),
                Task::new("C", 1, &["B"], "M1"),
                Task::new("D", 1, &[], "M1"),
            ],
            resources(),
        )?;

        assert_eq!(project.topological_order(), &[1, 2, 0, 3]);
        Ok(())
    }

    #[test]
    fn test_invalid_catalogs() {
        let cycle = vec![
            Task::new("A", 1, &["B"], "W1"),
            Task::new("B", 1, &["A"], "W1"),
        ];
        assert_eq!(
            Project::new(cycle, resources()).err(),
            Some(Error::Cycle("A".into()))
        );

        let itself = vec![Task::new("A", 1, &["A"], "W1")];
        assert_eq!(
            Project::new(itself, resources()).err(),
            Some(Error::Cycle("A".into()))
        );

        let unknown = vec![Task::new("A", 1, &["Z"], "W1")];
        assert_eq!(
            Project::new(unknown, resources()).err(),
            Some(Error::UnknownTask("Z".into()))
        );

        let machine = vec![Task::new("A", 1, &[], "M9")];
        assert_eq!(
            Project::new(machine, resources()).err(),
            Some(Error::UnknownResource("M9".into()))
        );

        let twice = vec![Task::new("A", 1, &[], "W1"), Task::new("A", 2, &[], "W1")];
        assert_eq!(
            Project::new(twice, resources()).err(),
            Some(Error::DuplicateTask("A".into()))
        );

        let zero = vec![Task::new("A", 0, &[], "W1")];
        assert_eq!(
            Project::new(zero, resources()).err(),
            Some(Error::ZeroDuration("A".into()))
        );

        let huge = vec![
            Task::new("A", u64::MAX, &[], "W1"),
            Task::new("B", 1, &["A"], "W1"),
        ];
        assert_eq!(
            Project::new(huge, resources()).err(),
            Some(Error::Overflow { task: "B".into() })
        );

        let idle = vec![Resource::new("W1", ResourceKind::Worker, 0)];
        assert_eq!(
            Project::new(Vec::new(), idle).err(),
            Some(Error::ZeroCapacity("W1".into()))
        );
    }

    #[test]
    fn test_invalid_json() {
        let json = r#"{"tasks":[{"id":"A","duration":1,"resource":"W1"}],"resources":[]}"#;
        let mut reader = std::io::Cursor::new(json);
        assert!(crate::data::deserialize::<Project>(&mut reader).is_err());
    }
}
