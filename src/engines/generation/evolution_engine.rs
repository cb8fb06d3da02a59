use crate::engines::evaluation::FitnessFunction;
use crate::engines::generation::{
    genome::{genome_to_string, random_population, Fitness, Genome, Population, Scored},
    operators::{check_mutation_probability, crossover, mutate, DEFAULT_MUTATIONS, DEFAULT_MUTATION_PROBABILITY},
    selection::selection_pair,
};
use crate::error::{MelogenError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Number of top-ranked genomes copied unchanged into the next generation.
pub const ELITE_COUNT: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub population_size: usize,
    pub genome_length: usize,
    pub num_mutations: usize,
    pub mutation_probability: f64,
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        check_mutation_probability(self.mutation_probability)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            genome_length: 128,
            num_mutations: DEFAULT_MUTATIONS,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            seed: None,
        }
    }
}

/// Where the engine is within the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationPhase {
    Init,
    Evaluating,
    Ranking,
    Breeding,
    Presenting,
    AwaitingContinue,
    Terminal,
}

/// Hooks for progress reporting while a generation is being evaluated.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_genome_evaluated(&mut self, genome_num: usize, total: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: Fitness);
}

/// The caller's side of the generation loop: show the ranked generation and
/// decide whether to keep going.
pub trait Presenter {
    /// `ranked` is sorted best first.
    fn present(&mut self, generation: usize, ranked: &[Scored]) -> Result<()>;
    fn should_continue(&mut self, generation: usize) -> Result<bool>;
}

/// Outcome of one evaluate/rank/breed cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    /// Current generation with its fitness, best first.
    pub ranked: Vec<Scored>,
    /// Bred successor, not yet adopted by the engine.
    pub next_generation: Population,
}

impl GenerationReport {
    pub fn best(&self) -> Option<&Scored> {
        self.ranked.first()
    }

    pub fn runner_up(&self) -> Option<&Scored> {
        self.ranked.get(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: usize,
    /// Highest-rated genome seen over the whole run (earliest wins ties).
    pub best: Option<Scored>,
}

pub struct EvolutionEngine {
    config: EngineConfig,
    rng: StdRng,
    population: Population,
    generation: usize,
    phase: GenerationPhase,
}

impl EvolutionEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = random_population(config.population_size, config.genome_length, &mut rng);
        log::debug!(
            "Initialized population of {} genomes with {} bits",
            population.len(),
            config.genome_length
        );

        Ok(Self {
            config,
            rng,
            population,
            generation: 0,
            phase: GenerationPhase::Init,
        })
    }

    /// Start from a caller-supplied population instead of a random one.
    /// It must hold exactly `population_size` genomes of `genome_length` bits.
    pub fn with_population(config: EngineConfig, population: Population) -> Result<Self> {
        config.validate()?;
        if population.len() != config.population_size {
            return Err(MelogenError::Configuration(format!(
                "Initial population has {} genomes, expected {}",
                population.len(),
                config.population_size
            )));
        }
        if let Some(genome) = population.iter().find(|g| g.len() != config.genome_length) {
            return Err(MelogenError::LengthMismatch {
                left: config.genome_length,
                right: genome.len(),
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            rng,
            population,
            generation: 0,
            phase: GenerationPhase::Init,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Drive generations until the session declines to continue.
    ///
    /// The session both scores genomes and decides when to stop.
    pub fn run<S, C>(&mut self, session: &mut S, callback: &mut C) -> Result<RunSummary>
    where
        S: FitnessFunction + Presenter,
        C: ProgressCallback,
    {
        let mut best: Option<Scored> = None;

        loop {
            let report = self.run_generation(session, callback)?;

            if let Some((genome, score)) = report.best() {
                if best.as_ref().map_or(true, |(_, seen)| score > seen) {
                    best = Some((genome.clone(), *score));
                }
            }

            self.set_phase(GenerationPhase::Presenting);
            session.present(report.generation, &report.ranked)?;

            self.set_phase(GenerationPhase::AwaitingContinue);
            if !session.should_continue(report.generation)? {
                self.set_phase(GenerationPhase::Terminal);
                log::info!("Stopped after generation {}", report.generation);
                return Ok(RunSummary {
                    generations: report.generation + 1,
                    best,
                });
            }

            self.advance(report);
        }
    }

    /// Evaluate, rank and breed the current population.
    ///
    /// The engine keeps its current population; call [`Self::advance`] to
    /// adopt the bred one.
    pub fn run_generation<F, C>(&mut self, fitness: &mut F, callback: &mut C) -> Result<GenerationReport>
    where
        F: FitnessFunction,
        C: ProgressCallback,
    {
        let generation = self.generation;
        callback.on_generation_start(generation);

        let evaluated = self.evaluate(fitness, callback)?;

        self.set_phase(GenerationPhase::Ranking);
        let ranked = rank(evaluated);
        let best_fitness = ranked.first().map(|(_, f)| *f).unwrap_or(0);

        let next_generation = self.breed(&ranked)?;

        callback.on_generation_complete(generation, best_fitness);
        log::info!(
            "Generation {} ranked {} genomes, best fitness {}",
            generation,
            ranked.len(),
            best_fitness
        );

        Ok(GenerationReport {
            generation,
            ranked,
            next_generation,
        })
    }

    /// Adopt a bred generation and move the counter forward.
    pub fn advance(&mut self, report: GenerationReport) {
        self.population = report.next_generation;
        self.generation = report.generation + 1;
        self.set_phase(GenerationPhase::Evaluating);
    }

    /// Shuffle the population and score every genome once, in shuffled order.
    pub fn evaluate<F, C>(&mut self, fitness: &mut F, callback: &mut C) -> Result<Vec<Scored>>
    where
        F: FitnessFunction,
        C: ProgressCallback,
    {
        self.set_phase(GenerationPhase::Evaluating);
        self.population.shuffle(&mut self.rng);

        let total = self.population.len();
        let mut results = Vec::with_capacity(total);

        for (i, genome) in self.population.iter().enumerate() {
            let score = fitness.fitness(genome)?;
            callback.on_genome_evaluated(i + 1, total);
            log::debug!("  [{}] {} -> {}", i + 1, genome_to_string(genome), score);
            results.push((genome.clone(), score));
        }

        Ok(results)
    }

    /// Build the next generation from a ranked (best first) generation.
    ///
    /// The top [`ELITE_COUNT`] genomes carry over untouched; the rest of the
    /// slots are filled with mutated crossover offspring of fitness-weighted
    /// parents. The result has exactly `population_size` genomes: when one
    /// slot is left the second child is dropped.
    pub fn breed(&mut self, ranked: &[Scored]) -> Result<Population> {
        self.set_phase(GenerationPhase::Breeding);

        let target = self.config.population_size;
        let mut next_generation: Population = Vec::with_capacity(target);

        for (genome, _) in ranked.iter().take(ELITE_COUNT.min(target)) {
            next_generation.push(genome.clone());
        }

        while next_generation.len() < target {
            let (parent1, parent2) = selection_pair(ranked, &mut self.rng)?;
            let (mut child1, mut child2) = crossover(parent1, parent2, &mut self.rng)?;

            mutate(
                &mut child1,
                self.config.num_mutations,
                self.config.mutation_probability,
                &mut self.rng,
            );
            mutate(
                &mut child2,
                self.config.num_mutations,
                self.config.mutation_probability,
                &mut self.rng,
            );

            next_generation.push(child1);
            if next_generation.len() < target {
                next_generation.push(child2);
            }
        }

        Ok(next_generation)
    }

    fn set_phase(&mut self, phase: GenerationPhase) {
        if self.phase != phase {
            log::debug!("Generation {}: {:?} -> {:?}", self.generation, self.phase, phase);
            self.phase = phase;
        }
    }
}

/// Sort by fitness, highest first. The sort is stable, so equal scores keep
/// their evaluation order.
pub fn rank(mut evaluated: Vec<Scored>) -> Vec<Scored> {
    evaluated.sort_by(|a, b| b.1.cmp(&a.1));
    evaluated
}
