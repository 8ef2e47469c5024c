use super::Candidate;
use crate::core::{Error, Result};
use rand::seq::index;
use rand::Rng;

/// Tournament selection.
///
/// Draws `tournament_size` distinct candidates and returns the one with the lowest fitness.
/// On ties the candidate drawn first wins.
///
/// # Errors
/// - If `tournament_size` is zero or exceeds the population.
pub fn tournament_selection<'a>(
    population: &'a [Candidate],
    tournament_size: usize,
    rng: &mut impl Rng,
) -> Result<&'a Candidate> {
    if tournament_size == 0 || tournament_size > population.len() {
        return Err(Error::Config(format!(
            "tournament size {tournament_size} must be within 1..={}",
            population.len()
        )));
    }

    let mut best: Option<&Candidate> = None;
    for drawn in index::sample(rng, population.len(), tournament_size) {
        let candidate = &population[drawn];
        if best.map_or(true, |best| candidate.fitness() < best.fitness()) {
            best = Some(candidate);
        }
    }

    best.ok_or_else(|| Error::Config("empty tournament".into()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::population::{create_population, DEFAULT_HORIZON};
    use crate::core::{Individual, Project, Resource, ResourceKind, Task};
    use crate::data::construction_project;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(rng: &mut StdRng) -> anyhow::Result<Vec<Candidate>> {
        let project = construction_project();
        let population = create_population(&project, 8, DEFAULT_HORIZON, rng);
        Ok(population
            .into_iter()
            .map(|individual| Candidate::evaluate(&project, individual))
            .collect::<Result<_>>()?)
    }

    #[test]
    fn test_full_tournament_picks_best() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let population = scored(&mut rng)?;
        let best = population.iter().map(Candidate::fitness).min();

        let winner = tournament_selection(&population, population.len(), &mut rng)?;
        assert_eq!(Some(winner.fitness()), best);
        Ok(())
    }

    #[test]
    fn test_winner_is_best_of_sample() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        let population = scored(&mut rng)?;

        for _ in 0..50 {
            let winner = tournament_selection(&population, 3, &mut rng)?;
            let better = population.iter().filter(|c| c.fitness() < winner.fitness());
            assert!(better.count() <= population.len() - 3);
        }
        Ok(())
    }

    #[test]
    fn test_ties_go_to_first_drawn() -> anyhow::Result<()> {
        let project = Project::new(
            vec![Task::new("A", 2, &[], "W1"), Task::new("B", 2, &[], "M1")],
            vec![
                Resource::new("W1", ResourceKind::Worker, 8),
                Resource::new("M1", ResourceKind::Machine, 8),
            ],
        )?;
        // Distinct individuals, each idle for 4 hours in total.
        let population = (0..=4)
            .map(|start| -> anyhow::Result<Candidate> {
                let individual = Individual::from_starts(&project, &[start, 4 - start])?;
                Ok(Candidate::evaluate(&project, individual)?)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        assert!(population.iter().all(|c| c.fitness() == 4));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let first = index::sample(&mut rng.clone(), population.len(), 3).index(0);

            let winner = tournament_selection(&population, 3, &mut rng)?;
            assert_eq!(winner, &population[first]);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_tournament_size() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(5);
        let population = scored(&mut rng)?;

        assert!(tournament_selection(&population, 0, &mut rng).is_err());
        assert!(tournament_selection(&population, 9, &mut rng).is_err());
        Ok(())
    }
}
