use crate::core::{Error, Individual, Result};
use rand::Rng;

/// Single-point crossover.
///
/// Cuts both parents at the same position in `1..len` and exchanges the tails. Positions are
/// fixed per task, so both children cover every task exactly once. Parents with fewer than
/// two entries cannot be cut and are returned as copies.
///
/// # Errors
/// - If the parents differ in length.
pub fn crossover(
    first: &Individual,
    second: &Individual,
    rng: &mut impl Rng,
) -> Result<(Individual, Individual)> {
    if first.len() != second.len() {
        return Err(Error::LengthMismatch {
            found: second.len(),
            expected: first.len(),
        });
    }

    if first.len() < 2 {
        return Ok((first.clone(), second.clone()));
    }

    let cut = rng.gen_range(1..first.len());
    Ok(cross_at(first, second, cut))
}

fn cross_at(first: &Individual, second: &Individual, cut: usize) -> (Individual, Individual) {
    let (head, tail) = first.entries().split_at(cut);
    let (other_head, other_tail) = second.entries().split_at(cut);

    let child = head.iter().chain(other_tail).cloned().collect();
    let other_child = other_head.iter().chain(tail).cloned().collect();

    (Individual::new(child), Individual::new(other_child))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::population::{create_individual, DEFAULT_HORIZON};
    use crate::data::construction_project;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cross_at() -> anyhow::Result<()> {
        let project = construction_project();
        let first = Individual::from_starts(&project, &[1, 2, 3, 4, 5, 6, 7, 8, 9])?;
        let second = Individual::from_starts(&project, &[10, 20, 30, 40, 50, 60, 70, 80, 90])?;

        let (child, other) = cross_at(&first, &second, 3);

        assert_eq!(child.starts(), vec![1, 2, 3, 40, 50, 60, 70, 80, 90]);
        assert_eq!(other.starts(), vec![10, 20, 30, 4, 5, 6, 7, 8, 9]);
        child.verify(&project)?;
        other.verify(&project)?;
        Ok(())
    }

    #[test]
    fn test_children_keep_task_positions() -> anyhow::Result<()> {
        let project = construction_project();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let first = create_individual(&project, DEFAULT_HORIZON, &mut rng);
            let second = create_individual(&project, DEFAULT_HORIZON, &mut rng);
            let (child, other) = crossover(&first, &second, &mut rng)?;

            for (position, (a, b)) in child.starts().into_iter().zip(other.starts()).enumerate() {
                let parents = (first.entries()[position].start, second.entries()[position].start);
                assert!(parents == (a, b) || parents == (b, a));
            }
            assert_eq!(child.entries()[0], first.entries()[0]);
            assert_eq!(other.entries()[8], first.entries()[8]);
            child.verify(&project)?;
            other.verify(&project)?;
        }
        Ok(())
    }

    #[test]
    fn test_length_mismatch() -> anyhow::Result<()> {
        let project = construction_project();
        let mut rng = StdRng::seed_from_u64(0);
        let first = create_individual(&project, DEFAULT_HORIZON, &mut rng);

        assert!(crossover(&first, &Individual::default(), &mut rng).is_err());
        Ok(())
    }
}
