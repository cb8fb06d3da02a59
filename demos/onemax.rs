//! Headless run of the evolution engine: fitness is the number of set bits.
//!
//! Usage: `cargo run --example onemax [population_size] [genome_length] [generations] [seed]`

use melogen::engines::evaluation::FitnessFunction;
use melogen::engines::generation::{
    genome_to_string, EngineConfig, EvolutionEngine, Fitness, Genome, Presenter, ProgressCallback,
    Scored,
};
use std::env;
use std::time::Instant;

struct OneMax {
    generations: usize,
}

impl FitnessFunction for OneMax {
    fn fitness(&mut self, genome: &Genome) -> melogen::Result<Fitness> {
        Ok(genome.iter().map(|bit| u32::from(*bit)).sum())
    }
}

impl Presenter for OneMax {
    fn present(&mut self, generation: usize, ranked: &[Scored]) -> melogen::Result<()> {
        if let Some((genome, fitness)) = ranked.first() {
            println!("  #{:<4} {:>3}  {}", generation, fitness, genome_to_string(genome));
        }
        Ok(())
    }

    fn should_continue(&mut self, generation: usize) -> melogen::Result<bool> {
        Ok(generation + 1 < self.generations)
    }
}

struct CliProgressCallback {
    start_time: Instant,
}

impl ProgressCallback for CliProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_genome_evaluated(&mut self, _genome_num: usize, _total: usize) {}

    fn on_generation_complete(&mut self, generation: usize, best_fitness: Fitness) {
        log::debug!(
            "Generation {}: best = {}, time = {:.2}s",
            generation,
            best_fitness,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let population_size = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(20);
    let genome_length = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(64);
    let generations = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(50);
    let seed = args.get(4).and_then(|s| s.parse().ok());

    println!("=== OneMax ===");
    println!("  Population size: {}", population_size);
    println!("  Genome length: {}", genome_length);
    println!("  Generations: {}", generations);
    println!();

    let config = EngineConfig {
        population_size,
        genome_length,
        seed,
        ..EngineConfig::default()
    };
    let mut engine = match EvolutionEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid engine configuration: {}", e);
            std::process::exit(1);
        }
    };
    let mut session = OneMax { generations };
    let mut progress = CliProgressCallback {
        start_time: Instant::now(),
    };

    match engine.run(&mut session, &mut progress) {
        Ok(summary) => {
            if let Some((_, fitness)) = summary.best {
                println!();
                println!(
                    "Best: {} / {} after {} generations",
                    fitness, genome_length, summary.generations
                );
            }
        }
        Err(e) => {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        }
    }
}
