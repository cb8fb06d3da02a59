use crate::engines::generation::genome::{Fitness, Genome};
use crate::error::Result;

/// Scores a genome. Called exactly once per genome per generation.
///
/// Implementations may block (waiting on a listener's rating), have side
/// effects (starting playback) or return different scores for the same
/// genome on different calls. The engine caches nothing.
pub trait FitnessFunction {
    fn fitness(&mut self, genome: &Genome) -> Result<Fitness>;
}

impl<F> FitnessFunction for F
where
    F: FnMut(&Genome) -> Fitness,
{
    fn fitness(&mut self, genome: &Genome) -> Result<Fitness> {
        Ok(self(genome))
    }
}

/// Coerce a free-form rating into a fitness value.
///
/// Anything that is not a non-negative integer counts as 0 so a typo never
/// aborts a generation.
pub fn parse_rating(input: &str) -> Fitness {
    let trimmed = input.trim();
    match trimmed.parse::<Fitness>() {
        Ok(rating) => rating,
        Err(_) => {
            log::warn!("Rating {:?} is not a non-negative integer, using 0", trimmed);
            0
        }
    }
}
