use crate::config::AppConfig;
use crate::music::scale::{Key, Scale};
use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;

/// Melogen: evolve melodies by rating them
///
/// Every generation plays each melody of the population and asks for a
/// rating; the best-rated melodies are bred into the next generation.
/// Options left out on the command line are asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "melogen")]
#[command(author, version, about = "Evolve melodies with a genetic algorithm", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of bars
    #[arg(long)]
    pub num_bars: Option<usize>,

    /// Notes per bar
    #[arg(long)]
    pub num_notes: Option<usize>,

    /// Number of stacked voices
    #[arg(long)]
    pub num_steps: Option<usize>,

    /// Introduce pauses (rests)
    #[arg(long)]
    pub pauses: Option<bool>,

    /// Key, e.g. C, F#, Bb
    #[arg(long)]
    pub key: Option<Key>,

    /// Scale: major, minorM, dorian, phrygian, lydian, mixolydian, majorBlues, minorBlues
    #[arg(long)]
    pub scale: Option<Scale>,

    /// Octave of the scale root
    #[arg(long)]
    pub root: Option<u8>,

    /// Number of melodies per generation
    #[arg(long)]
    pub population_size: Option<usize>,

    /// Mutation attempts per offspring
    #[arg(long)]
    pub num_mutations: Option<usize>,

    /// Flip probability of each mutation attempt
    #[arg(long)]
    pub mutation_probability: Option<f64>,

    /// Tempo in beats per minute
    #[arg(long)]
    pub bpm: Option<u32>,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory that receives per-run MIDI folders
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// External MIDI player command, e.g. "timidity"
    #[arg(long)]
    pub player: Option<String>,

    /// Do not write MIDI files for each generation
    #[arg(long)]
    pub no_save: bool,

    /// Accept configured values instead of prompting
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Cli {
    /// Copy every option given on the command line into `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        let melody = &mut config.melody;
        if let Some(v) = self.num_bars {
            melody.num_bars = v;
        }
        if let Some(v) = self.num_notes {
            melody.num_notes = v;
        }
        if let Some(v) = self.num_steps {
            melody.num_steps = v;
        }
        if let Some(v) = self.pauses {
            melody.pauses = v;
        }
        if let Some(v) = self.key {
            melody.key = v;
        }
        if let Some(v) = self.scale {
            melody.scale = v;
        }
        if let Some(v) = self.root {
            melody.root = v;
        }
        if let Some(v) = self.bpm {
            melody.bpm = v;
        }

        let evolution = &mut config.evolution;
        if let Some(v) = self.population_size {
            evolution.population_size = v;
        }
        if let Some(v) = self.num_mutations {
            evolution.num_mutations = v;
        }
        if let Some(v) = self.mutation_probability {
            evolution.mutation_probability = v;
        }
        if self.seed.is_some() {
            evolution.seed = self.seed;
        }

        let output = &mut config.output;
        if let Some(dir) = &self.output {
            output.directory = dir.clone();
        }
        if self.player.is_some() {
            output.player_command = self.player.clone();
        }
        if self.no_save {
            output.save_midi = false;
        }
    }

    /// Names of the prompted fields that were given on the command line.
    pub fn provided_fields(&self) -> HashSet<&'static str> {
        let given = [
            ("num_bars", self.num_bars.is_some()),
            ("num_notes", self.num_notes.is_some()),
            ("num_steps", self.num_steps.is_some()),
            ("pauses", self.pauses.is_some()),
            ("key", self.key.is_some()),
            ("scale", self.scale.is_some()),
            ("root", self.root.is_some()),
            ("population_size", self.population_size.is_some()),
            ("num_mutations", self.num_mutations.is_some()),
            ("mutation_probability", self.mutation_probability.is_some()),
        ];
        given
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| name)
            .collect()
    }
}
