use crate::core::{Error, Individual, Project, Result, Scheduler};
use ahash::{HashMap, HashMapExt};

/// Simple list scheduling algorithm.
/// Visits tasks in dependency order and starts each one as soon as its dependencies have
/// finished and its resource is free.
pub(super) fn schedule(project: &Project) -> Result<Individual> {
    let tasks = project.tasks();
    let mut free: HashMap<&str, u64> = HashMap::with_capacity(project.resources().len());
    let mut ends = vec![0; tasks.len()];
    let mut starts = vec![0; tasks.len()];

    for &position in project.topological_order() {
        let task = &tasks[position];

        let mut start = free.get(task.resource.as_str()).copied().unwrap_or_default();
        for dependency in &task.dependencies {
            start = start.max(ends[project.task_position(dependency)?]);
        }

        starts[position] = start;
        ends[position] = start
            .checked_add(task.duration)
            .ok_or_else(|| Error::Overflow {
                task: task.id.clone(),
            })?;
        free.insert(&task.resource, ends[position]);
    }

    Individual::from_starts(project, &starts)
}

/// Simple list scheduling algorithm.
#[derive(Clone, Debug, Default)]
pub struct List;

impl Scheduler for List {
    fn schedule(&mut self, project: &Project) -> Result<Individual> {
        schedule(project)
    }

    fn name(&self) -> &'static str {
        "List"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SCHEDULERS)]
static INSTANCE: fn() -> Box<dyn Scheduler> = || Box::new(List);

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::fitness::evaluate;
    use crate::core::{Resource, ResourceKind, Task};
    use crate::data::construction_project;

    #[test]
    fn test_list() -> anyhow::Result<()> {
        let project = construction_project();
        let individual = List.schedule(&project)?;

        individual.verify(&project)?;
        assert_eq!(
            individual.starts(),
            vec![0, 40, 100, 200, 200, 250, 330, 330, 390]
        );

        let breakdown = evaluate(&project, &individual)?;
        assert_eq!(breakdown.dependency_violations, 0);
        assert_eq!(breakdown.working_hour_violations, 9);
        assert_eq!(breakdown.idle_time, 1840);
        Ok(())
    }

    #[test]
    fn test_shared_resource_is_sequenced() -> anyhow::Result<()> {
        let project = Project::new(
            vec![
                Task::new("A", 3, &[], "W1"),
                Task::new("B", 2, &[], "W1"),
                Task::new("C", 1, &["A"], "M1"),
            ],
            vec![
                Resource::new("W1", ResourceKind::Worker, 8),
                Resource::new("M1", ResourceKind::Machine, 8),
            ],
        )?;

        let individual = List.schedule(&project)?;
        assert_eq!(individual.starts(), vec![0, 3, 3]);
        assert_eq!(evaluate(&project, &individual)?.score(), 3);
        Ok(())
    }
}
