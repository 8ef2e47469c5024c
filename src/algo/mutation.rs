use crate::core::Individual;
use rand::seq::index;
use rand::Rng;

/// Swap mutation.
///
/// Every entry triggers, with probability `rate`, an exchange of start times between two
/// distinct, uniformly chosen entries. Tasks and resources stay in place. Returns the number
/// of swaps performed.
pub fn mutate(individual: &mut Individual, rate: f64, rng: &mut impl Rng) -> usize {
    let len = individual.len();
    if len < 2 {
        return 0;
    }

    let mut swaps = 0;
    for _ in 0..len {
        if rng.gen::<f64>() < rate {
            let pair = index::sample(rng, len, 2);
            let (first, second) = (pair.index(0), pair.index(1));

            let entries = individual.entries_mut();
            let start = entries[first].start;
            entries[first].start = entries[second].start;
            entries[second].start = start;
            swaps += 1;
        }
    }

    swaps
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::population::{create_individual, DEFAULT_HORIZON};
    use crate::core::ScheduleEntry;
    use crate::data::construction_project;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_rate_is_identity() {
        let project = construction_project();
        let mut rng = StdRng::seed_from_u64(9);
        let mut individual = create_individual(&project, DEFAULT_HORIZON, &mut rng);
        let before = individual.clone();

        assert_eq!(mutate(&mut individual, 0.0, &mut rng), 0);
        assert_eq!(individual, before);
    }

    #[test]
    fn test_full_rate_swaps_start_times() -> anyhow::Result<()> {
        let project = construction_project();
        let mut rng = StdRng::seed_from_u64(9);
        let mut individual = create_individual(&project, DEFAULT_HORIZON, &mut rng);
        let mut before = individual.starts();

        assert_eq!(mutate(&mut individual, 1.0, &mut rng), project.tasks().len());

        let mut after = individual.starts();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
        individual.verify(&project)?;
        Ok(())
    }

    #[test]
    fn test_two_entries_always_exchange() -> anyhow::Result<()> {
        let project = construction_project();
        let tasks = &project.tasks()[..2];
        let mut individual = Individual::new(vec![
            ScheduleEntry::new(&tasks[0].id, 1, &tasks[0].resource),
            ScheduleEntry::new(&tasks[1].id, 2, &tasks[1].resource),
        ]);
        let mut rng = StdRng::seed_from_u64(4);

        // Each of the two triggered swaps exchanges the only pair.
        assert_eq!(mutate(&mut individual, 1.0, &mut rng), 2);
        assert_eq!(individual.starts(), vec![1, 2]);
        assert_eq!(individual.entries()[0].task_id, tasks[0].id);
        Ok(())
    }

    #[test]
    fn test_single_entry_is_untouched() {
        let mut individual = Individual::new(vec![ScheduleEntry::new("T1", 5, "W1")]);
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(mutate(&mut individual, 1.0, &mut rng), 0);
        assert_eq!(individual.starts(), vec![5]);
    }
}
