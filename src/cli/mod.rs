pub mod args;
pub mod prompt;
pub mod session;

pub use args::Cli;
pub use prompt::Prompter;
pub use session::InteractiveSession;

use crate::config::ConfigManager;
use crate::engines::generation::{genome_to_string, ConsoleProgressCallback, EvolutionEngine};
use anyhow::{Context, Result};
use chrono::Utc;
use std::io;

/// Load configuration, ask for anything missing, then evolve until the
/// listener stops.
pub fn run(cli: Cli) -> Result<()> {
    let mut manager =
        ConfigManager::load_layered(cli.config.as_deref()).context("Failed to load configuration")?;
    manager
        .update(|config| cli.apply(config))
        .context("Invalid command-line options")?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    if !cli.yes {
        let provided = cli.provided_fields();
        let current = manager.get();
        let melody = prompter.section(&current.melody, &provided)?;
        let evolution = prompter.section(&current.evolution, &provided)?;
        manager.update(|config| {
            config.melody = melody;
            config.evolution = evolution;
        })?;
    }

    let config = manager.get();
    let genome_length = config.melody.genome_length();
    let run_dir = config.output.run_directory(Utc::now());
    log::info!(
        "Evolving {} melodies of {} bits, writing to {}",
        config.evolution.population_size,
        genome_length,
        run_dir.display()
    );

    let mut engine = EvolutionEngine::new(config.evolution.engine_config(genome_length))?;
    let mut session = InteractiveSession::new(prompter, config.melody, config.output, run_dir)?;

    let summary = engine.run(&mut session, &mut ConsoleProgressCallback)?;

    match summary.best {
        Some((genome, fitness)) => println!(
            "Best rating {} over {} generations: {}",
            fitness,
            summary.generations,
            genome_to_string(&genome)
        ),
        None => println!("No melodies were rated"),
    }
    Ok(())
}
