use anyhow::ensure;
use buildsched::core::{Project, Resource, ResourceKind, Task};
use buildsched::data;
use clap::Parser;
use rand::Rng;
use std::io::Write;
use std::num::NonZero;

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = "Generates random project catalogs for the scheduler."
)]
pub struct Config {
    /// The number of tasks.
    pub tasks: NonZero<usize>,
    /// The number of resources.
    pub resources: NonZero<usize>,
    /// The maximum duration of a task in hours.
    pub max_duration: NonZero<u64>,
    /// The maximum working hours per day of a resource.
    #[clap(short = 'w', long, default_value = "10")]
    pub max_hours: NonZero<u64>,
    /// Probability that a task depends on any given earlier task.
    #[clap(short, long, default_value = "0.2")]
    pub dependency_ratio: f64,
    /// Share of resources that are machines.
    #[clap(short, long, default_value = "0.3")]
    pub machine_ratio: f64,
    /// Number of projects to generate.
    #[clap(short, long, default_value = "1")]
    pub amount: NonZero<u64>,
    /// Path to output the generated projects. If the directory does not exist, it will be created.
    #[clap(short, long, default_value = "output")]
    pub output: String,
}

fn gen(config: &Config) -> anyhow::Result<()> {
    ensure!(
        (0.0..=1.0).contains(&config.dependency_ratio),
        "dependency ratio must be within [0, 1]"
    );
    ensure!(
        (0.0..=1.0).contains(&config.machine_ratio),
        "machine ratio must be within [0, 1]"
    );

    let output = std::path::Path::new(&config.output);
    if !output.exists() {
        std::fs::create_dir_all(output)?;
    }

    for i in 0..config.amount.get() {
        let resources = gen_resources(config.resources.get(), config.max_hours.get(), config.machine_ratio);
        let tasks = gen_tasks(
            config.tasks.get(),
            config.max_duration.get(),
            config.dependency_ratio,
            &resources,
        );
        let project = Project::new(tasks, resources)?;

        std::fs::File::create(output.join(format!("project_{i}.json")))?
            .write_all(data::to_string(&project)?.as_bytes())?;
    }

    Ok(())
}

fn gen_resources(amount: usize, max_hours: u64, machine_ratio: f64) -> Vec<Resource> {
    let mut rng = rand::thread_rng();
    let (mut workers, mut machines) = (0, 0);

    (0..amount)
        .map(|_| {
            let hours = rng.gen_range(1..=max_hours);
            if rng.gen_bool(machine_ratio) {
                machines += 1;
                Resource::new(&format!("M{machines}"), ResourceKind::Machine, hours)
            } else {
                workers += 1;
                Resource::new(&format!("W{workers}"), ResourceKind::Worker, hours)
            }
        })
        .collect()
}

/// Tasks only depend on tasks generated before them, so the dependency graph stays acyclic.
fn gen_tasks(amount: usize, max_duration: u64, ratio: f64, resources: &[Resource]) -> Vec<Task> {
    let mut rng = rand::thread_rng();
    let mut tasks: Vec<Task> = Vec::with_capacity(amount);

    for i in 0..amount {
        let dependencies = tasks
            .iter()
            .filter(|_| rng.gen_bool(ratio))
            .map(|task| task.id.clone())
            .collect();
        let resource = &resources[rng.gen_range(0..resources.len())];

        tasks.push(Task {
            id: format!("T{}", i + 1),
            description: String::new(),
            duration: rng.gen_range(1..=max_duration),
            dependencies,
            resource: resource.id.clone(),
        });
    }

    tasks
}

fn main() -> anyhow::Result<()> {
    gen(&Config::parse())
}
