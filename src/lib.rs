pub mod cli;
pub mod config;
/// Bit-vector genetic algorithm. Genomes are fixed-length bit vectors,
/// parents are drawn with probability proportional to `fitness + 1`,
/// offspring come from single-point crossover followed by bit-flip mutation,
/// and the two best genomes of every generation survive unchanged. Fitness
/// is supplied by the caller through `evaluation::FitnessFunction`.
pub mod engines;
pub mod error;
pub mod music;

pub use error::{MelogenError, Result};
