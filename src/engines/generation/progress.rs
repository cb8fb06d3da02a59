use super::evolution_engine::ProgressCallback;
use super::genome::Fitness;

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        println!("population {} starting...", generation);
    }

    fn on_genome_evaluated(&mut self, genome_num: usize, total: usize) {
        log::debug!("Rated {}/{} genomes", genome_num, total);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: Fitness) {
        println!("population {} done", generation);
        log::info!("Best fitness in population {}: {}", generation, best_fitness);
    }
}

/// Silent callback for batch runs and tests.
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_genome_evaluated(&mut self, _genome_num: usize, _total: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: Fitness) {}
}
