use super::prompt::Prompter;
use crate::config::{MelodyConfig, OutputConfig};
use crate::engines::evaluation::{parse_rating, FitnessFunction};
use crate::engines::generation::{Fitness, Genome, Presenter, Scored};
use crate::error::{MelogenError, Result};
use crate::music::{genome_to_melody, save_genome_to_midi, write_midi, Player};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Human-in-the-loop side of a run: plays each melody, asks for a rating,
/// presents the two best of every generation, saves the population as MIDI
/// and asks whether to go on.
pub struct InteractiveSession<R, W> {
    prompter: Prompter<R, W>,
    melody: MelodyConfig,
    output: OutputConfig,
    player: Player,
    run_dir: PathBuf,
    /// Scratch MIDI file handed to the player, removed on drop.
    preview: Option<NamedTempFile>,
}

impl<R: BufRead, W: Write> InteractiveSession<R, W> {
    pub fn new(
        prompter: Prompter<R, W>,
        melody: MelodyConfig,
        output: OutputConfig,
        run_dir: PathBuf,
    ) -> Result<Self> {
        let player = Player::new(output.player_command.as_deref())?;
        Ok(Self {
            prompter,
            melody,
            output,
            player,
            run_dir,
            preview: None,
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// MIDI path of population member `index` in `generation`.
    pub fn population_file(&self, generation: usize, index: usize) -> PathBuf {
        self.run_dir.join(generation.to_string()).join(format!(
            "{}-{}-{}.mid",
            self.melody.scale, self.melody.key, index
        ))
    }

    /// Print the melody and start playback when a player is configured.
    fn play(&mut self, genome: &Genome) -> Result<()> {
        let melody = genome_to_melody(genome, &self.melody)?;
        self.prompter.say(&melody.describe())?;

        if self.player.is_enabled() {
            let preview = match self.preview.take() {
                Some(file) => file,
                None => tempfile::Builder::new()
                    .prefix("melogen-preview-")
                    .suffix(".mid")
                    .tempfile()?,
            };
            write_midi(preview.path(), &melody, self.melody.bpm)?;
            self.player.play(preview.path())?;
            self.preview = Some(preview);
        }
        Ok(())
    }

    fn save_population(&mut self, generation: usize, ranked: &[Scored]) -> Result<()> {
        self.prompter.say("saving population midi …")?;
        for (index, (genome, _)) in ranked.iter().enumerate() {
            let path = self.population_file(generation, index);
            save_genome_to_midi(&path, genome, &self.melody)?;
        }
        self.prompter.say("done")?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> FitnessFunction for InteractiveSession<R, W> {
    fn fitness(&mut self, genome: &Genome) -> Result<Fitness> {
        self.play(genome)?;
        let answer = self.prompter.ask("Rating (0-5)", None)?;
        self.player.stop();

        match answer {
            Some(answer) => Ok(parse_rating(&answer)),
            None => Err(MelogenError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a rating",
            ))),
        }
    }
}

impl<R: BufRead, W: Write> Presenter for InteractiveSession<R, W> {
    fn present(&mut self, generation: usize, ranked: &[Scored]) -> Result<()> {
        let highlights = [("here is the no1 hit …", ranked.first()), ("here is the second best …", ranked.get(1))];

        for (label, entry) in highlights {
            if let Some((genome, _)) = entry {
                self.play(genome)?;
                self.prompter.pause(label)?;
                self.player.stop();
            }
        }

        if self.output.save_midi {
            self.save_population(generation, ranked)?;
        }
        Ok(())
    }

    fn should_continue(&mut self, _generation: usize) -> Result<bool> {
        self.prompter.confirm("continue?")
    }
}
