use crate::engines::generation::genome::Genome;
use crate::error::{MelogenError, Result};
use rand::distributions::OpenClosed01;
use rand::Rng;

/// Mutation attempts per offspring when nothing else is configured.
pub const DEFAULT_MUTATIONS: usize = 1;

/// Flip probability per mutation attempt when nothing else is configured.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.5;

/// Single-point crossover: swap the suffixes of two equal-length genomes
/// at a random split point in `[1, len - 1]`.
///
/// Genomes shorter than two bits have no interior split point and come back
/// unchanged. Unequal lengths are a caller error.
pub fn crossover<R: Rng>(
    parent1: &Genome,
    parent2: &Genome,
    rng: &mut R,
) -> Result<(Genome, Genome)> {
    if parent1.len() != parent2.len() {
        return Err(MelogenError::LengthMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }

    let len = parent1.len();
    if len < 2 {
        return Ok((parent1.clone(), parent2.clone()));
    }

    let point = rng.gen_range(1..len);
    crossover_at(parent1, parent2, point)
}

/// Crossover at a fixed split point: `(a[..p] ++ b[p..], b[..p] ++ a[p..])`.
pub fn crossover_at(parent1: &Genome, parent2: &Genome, point: usize) -> Result<(Genome, Genome)> {
    if parent1.len() != parent2.len() {
        return Err(MelogenError::LengthMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }

    let len = parent1.len();
    if len < 2 {
        return Ok((parent1.clone(), parent2.clone()));
    }
    if point == 0 || point >= len {
        return Err(MelogenError::InvalidSplitPoint { point, length: len });
    }

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[point..].copy_from_slice(&parent2[point..]);
    child2[point..].copy_from_slice(&parent1[point..]);

    Ok((child1, child2))
}

/// Reject flip probabilities outside `[0, 1]`, NaN included.
pub fn check_mutation_probability(probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(MelogenError::Configuration(format!(
            "Mutation probability must be between 0 and 1, got {}",
            probability
        )));
    }
    Ok(())
}

/// Bit-flip mutation, applied in place.
///
/// Makes `num` attempts. Each attempt picks an index uniformly and draws
/// `u` from `(0, 1]`: the bit is left alone when `u > probability` and
/// flipped otherwise, so `0.0` never flips and `1.0` always does. Indices
/// are not deduplicated; hitting the same index twice undoes the flip.
/// A NaN probability never flips; engines reject it up front through
/// [`check_mutation_probability`].
pub fn mutate<R: Rng>(genome: &mut Genome, num: usize, probability: f64, rng: &mut R) {
    if genome.is_empty() {
        return;
    }

    for _ in 0..num {
        let index = rng.gen_range(0..genome.len());
        let draw: f64 = rng.sample(OpenClosed01);
        if probability.is_nan() || draw > probability {
            continue;
        }
        genome[index] ^= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_check_mutation_probability() {
        assert!(check_mutation_probability(0.0).is_ok());
        assert!(check_mutation_probability(1.0).is_ok());
        assert!(check_mutation_probability(-0.1).is_err());
        assert!(check_mutation_probability(1.5).is_err());
        assert!(check_mutation_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_nan_probability_never_flips() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut genome = vec![0; 16];
        mutate(&mut genome, 50, f64::NAN, &mut rng);
        assert_eq!(genome, vec![0; 16]);
    }

    #[test]
    fn test_crossover_fixed_point() {
        let a = vec![1, 0, 1, 0, 1, 0, 1, 0];
        let b = vec![0, 1, 0, 1, 0, 1, 0, 1];

        let (c1, c2) = crossover_at(&a, &b, 4).unwrap();

        assert_eq!(c1, vec![1, 0, 1, 0, 0, 1, 0, 1]);
        assert_eq!(c2, vec![0, 1, 0, 1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_crossover_at_rejects_edges() {
        let a = vec![1, 1, 1];
        let b = vec![0, 0, 0];

        assert!(matches!(
            crossover_at(&a, &b, 0),
            Err(MelogenError::InvalidSplitPoint { point: 0, length: 3 })
        ));
        assert!(crossover_at(&a, &b, 3).is_err());
        assert!(crossover_at(&a, &b, 2).is_ok());
    }

    #[test]
    fn test_crossover_short_genomes_unchanged() {
        let mut rng = StdRng::seed_from_u64(9);

        let (c1, c2) = crossover(&vec![1], &vec![0], &mut rng).unwrap();
        assert_eq!((c1, c2), (vec![1], vec![0]));

        let (c1, c2) = crossover(&vec![], &vec![], &mut rng).unwrap();
        assert!(c1.is_empty() && c2.is_empty());
    }

    #[test]
    fn test_crossover_split_never_at_edges() {
        let mut rng = StdRng::seed_from_u64(21);
        let a = vec![1, 1];
        let b = vec![0, 0];

        // With two bits the only legal split is 1
        for _ in 0..100 {
            let (c1, c2) = crossover(&a, &b, &mut rng).unwrap();
            assert_eq!(c1, vec![1, 0]);
            assert_eq!(c2, vec![0, 1]);
        }
    }

    #[test]
    fn test_mutate_zero_probability() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut genome = vec![1, 0, 1, 1, 0, 0, 1, 0];
        let original = genome.clone();

        mutate(&mut genome, 1000, 0.0, &mut rng);

        assert_eq!(genome, original);
    }

    #[test]
    fn test_mutate_single_bit_always_flips() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut genome = vec![0];

        mutate(&mut genome, 1, 1.0, &mut rng);
        assert_eq!(genome, vec![1]);

        // Two attempts on the only index cancel out
        mutate(&mut genome, 2, 1.0, &mut rng);
        assert_eq!(genome, vec![1]);
    }

    #[test]
    fn test_mutate_empty_genome() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut genome: Genome = Vec::new();
        mutate(&mut genome, 5, 1.0, &mut rng);
        assert!(genome.is_empty());
    }
}
