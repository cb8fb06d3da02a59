use crate::engines::generation::genome::{Fitness, Genome, Scored};
use crate::error::{MelogenError, Result};
use rand::Rng;

/// Fitness-weighted view of a scored population.
///
/// Conceptually a multiset in which every genome occupies `fitness + 1`
/// slots, so zero-fitness genomes keep a nonzero chance of being picked.
/// The multiset is never expanded in memory: slots are addressed through a
/// cumulative weight table and resolved with a binary search.
pub struct WeightedDistribution<'a> {
    entries: &'a [Scored],
    cumulative: Vec<u64>,
}

impl<'a> WeightedDistribution<'a> {
    pub fn new(entries: &'a [Scored]) -> Self {
        let mut total = 0u64;
        let cumulative = entries
            .iter()
            .map(|(_, fitness)| {
                total += u64::from(*fitness) + 1;
                total
            })
            .collect();

        Self { entries, cumulative }
    }

    /// Number of slots in the multiset, i.e. the sum of `fitness + 1`.
    pub fn len(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Genome occupying multiset slot `position`, if the slot exists.
    pub fn get(&self, position: u64) -> Option<&'a Genome> {
        let index = self.cumulative.partition_point(|&end| end <= position);
        self.entries.get(index).map(|(genome, _)| genome)
    }
}

/// Draw two parents with probability proportional to `fitness + 1`.
///
/// The two draws are distinct multiset slots (sampling without replacement),
/// which still allows the same genome to come back twice when it owns more
/// than one slot. An all-zero population degrades to uniform sampling.
pub fn selection_pair<'a, R: Rng>(
    population: &'a [Scored],
    rng: &mut R,
) -> Result<(&'a Genome, &'a Genome)> {
    let distribution = WeightedDistribution::new(population);
    let slots = distribution.len();
    if slots < 2 {
        return Err(MelogenError::InsufficientPopulation(slots as usize));
    }

    let first = rng.gen_range(0..slots);
    let mut second = rng.gen_range(0..slots - 1);
    if second >= first {
        second += 1;
    }

    match (distribution.get(first), distribution.get(second)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(MelogenError::InsufficientPopulation(slots as usize)),
    }
}

/// Like [`selection_pair`], but scores a bare population with `fitness` first.
///
/// Each genome is scored exactly once for this call.
pub fn selection_pair_by<R, F>(
    population: &[Genome],
    mut fitness: F,
    rng: &mut R,
) -> Result<(Genome, Genome)>
where
    R: Rng,
    F: FnMut(&Genome) -> Fitness,
{
    let scored: Vec<Scored> = population
        .iter()
        .map(|genome| (genome.clone(), fitness(genome)))
        .collect();

    let (a, b) = selection_pair(&scored, rng)?;
    Ok((a.clone(), b.clone()))
}
