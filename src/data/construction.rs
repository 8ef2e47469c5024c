use crate::core::{Project, Resource, ResourceKind, Task};

/// Building construction project: nine stages from site preparation to final inspection.
#[must_use]
pub fn construction_project() -> Project {
    let tasks = vec![
        Task::new("T1", 40, &[], "M1").with_description("Site Preparation"),
        Task::new("T2", 60, &["T1"], "M2").with_description("Foundation Laying"),
        Task::new("T3", 100, &["T2"], "M3").with_description("Steel Frame Erection"),
        Task::new("T4", 50, &["T3"], "W1").with_description("Electrical Wiring"),
        Task::new("T5", 40, &["T3"], "W2").with_description("Plumbing Installation"),
        Task::new("T6", 80, &["T4", "T5"], "W3").with_description("Interior Walls"),
        Task::new("T7", 60, &["T6"], "W4").with_description("Roofing Installation"),
        Task::new("T8", 30, &["T6"], "W5").with_description("Window Installation"),
        Task::new("T9", 20, &["T7", "T8"], "W6").with_description("Final Inspections"),
    ];

    let worker = |id: &str, skillset: &str, hours: u64| {
        Resource::new(id, ResourceKind::Worker, hours).with_skillset(skillset)
    };
    let machine = |id: &str, skillset: &str| {
        Resource::new(id, ResourceKind::Machine, 10).with_skillset(skillset)
    };

    let resources = vec![
        worker("W1", "Electrician", 8),
        worker("W2", "Plumber", 8),
        worker("W3", "Carpenter", 8),
        worker("W4", "Roofer", 8),
        worker("W5", "Glazier", 8),
        machine("M1", "Excavator"),
        machine("M2", "Concrete Mixer"),
        machine("M3", "Crane"),
        worker("W6", "Inspector", 6),
    ];

    Project::new(tasks, resources)
        .unwrap_or_else(|error| unreachable!("Construction catalog is valid: {error}"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_construction_catalog() -> anyhow::Result<()> {
        let project = construction_project();

        assert_eq!(project.tasks().len(), 9);
        assert_eq!(project.resources().len(), 9);
        assert_eq!(project.task("T6")?.dependencies, vec!["T4", "T5"]);
        assert_eq!(project.resource("W6")?.working_hours_per_day, 6);
        assert_eq!(project.topological_order(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        Ok(())
    }
}
