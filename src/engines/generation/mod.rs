pub mod evolution_engine;
pub mod genome;
pub mod operators;
pub mod progress;
pub mod selection;

pub use evolution_engine::{
    rank, EngineConfig, EvolutionEngine, GenerationPhase, GenerationReport, Presenter,
    ProgressCallback, RunSummary, ELITE_COUNT,
};
pub use genome::{genome_to_string, random_genome, random_population, Fitness, Genome, Population, Scored};
pub use operators::{
    check_mutation_probability, crossover, crossover_at, mutate, DEFAULT_MUTATIONS,
    DEFAULT_MUTATION_PROBABILITY,
};
pub use progress::{ConsoleProgressCallback, NoopProgress};
pub use selection::{selection_pair, selection_pair_by, WeightedDistribution};
