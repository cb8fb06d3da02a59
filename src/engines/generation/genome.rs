use rand::Rng;

/// Genome representation for the genetic algorithm
///
/// A genome is a fixed-length sequence of bits, stored one bit per byte
/// (every element is `0` or `1`). The length is chosen by the caller before
/// the first population is built and stays constant for the whole run.
///
/// Fitness is never stored on the genome. The same bit pattern may be rated
/// differently each time it is evaluated (a human listener, for example), so
/// scores travel alongside genomes as [`Scored`] pairs instead.
///
/// # Example
///
/// ```
/// use melogen::engines::generation::genome::genome_to_string;
///
/// let genome = vec![1, 0, 1, 1];
/// assert_eq!(genome_to_string(&genome), "1011");
/// ```
pub type Genome = Vec<u8>;

/// An ordered collection of equal-length genomes. Order carries no meaning.
pub type Population = Vec<Genome>;

/// Non-negative score assigned to a genome by an external fitness function.
pub type Fitness = u32;

/// A genome together with the fitness it received in the current generation.
pub type Scored = (Genome, Fitness);

/// Generate a genome of `length` independent, uniformly random bits.
pub fn random_genome<R: Rng>(length: usize, rng: &mut R) -> Genome {
    (0..length).map(|_| rng.gen_range(0..=1u8)).collect()
}

/// Generate `size` independent random genomes of `genome_length` bits each.
pub fn random_population<R: Rng>(size: usize, genome_length: usize, rng: &mut R) -> Population {
    (0..size)
        .map(|_| random_genome(genome_length, rng))
        .collect()
}

/// Render a genome as a compact bit string, e.g. `"0110"`.
pub fn genome_to_string(genome: &[u8]) -> String {
    genome.iter().map(|bit| if *bit == 0 { '0' } else { '1' }).collect()
}
