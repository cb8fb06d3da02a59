use crate::config::MelodyConfig;
use crate::engines::generation::genome::Genome;
use crate::error::{MelogenError, Result};
use crate::music::scale::{pitch_name, EventScale};
use serde::{Deserialize, Serialize};

pub const BITS_PER_NOTE: usize = 4;

/// MIDI velocity of a sounding note.
pub const NOTE_VELOCITY: u8 = 127;

/// Degrees at or above this value are rests.
const REST_THRESHOLD: u32 = 1 << (BITS_PER_NOTE - 1);

/// Little-endian bits to integer: `bits[i] * 2^i`.
pub fn int_from_bits(bits: &[u8]) -> u32 {
    bits.iter()
        .enumerate()
        .map(|(index, bit)| u32::from(*bit & 1) << index)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    /// One pitch row per step (stacked voice); every row has one entry per event.
    pub notes: Vec<Vec<u8>>,
    /// 0 marks a rest.
    pub velocity: Vec<u8>,
    /// Event durations in quarter notes.
    pub beat: Vec<f64>,
}

impl Melody {
    pub fn len(&self) -> usize {
        self.beat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beat.is_empty()
    }

    /// Total duration in quarter notes.
    pub fn duration(&self) -> f64 {
        self.beat.iter().sum()
    }

    /// Short text rendering, e.g. `C4 E4 (2) - G4+B4`.
    pub fn describe(&self) -> String {
        (0..self.len())
            .map(|i| {
                let token = if self.velocity[i] == 0 {
                    "-".to_string()
                } else {
                    self.notes
                        .iter()
                        .map(|row| pitch_name(row[i]))
                        .collect::<Vec<_>>()
                        .join("+")
                };
                if (self.beat[i] - 1.0).abs() > f64::EPSILON {
                    format!("{} ({})", token, self.beat[i])
                } else {
                    token
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Decode a genome into a melody according to `config`.
///
/// The genome is read in chunks of [`BITS_PER_NOTE`] bits, one per note slot
/// (`num_bars * num_notes` slots), each chunk read with the first bit least
/// significant. Values in the upper half of the range are rests when pauses
/// are enabled; otherwise they fold into the lower half so every slot sounds.
/// A slot repeating the previous sounding degree lengthens that note instead
/// of re-striking it.
pub fn genome_to_melody(genome: &Genome, config: &MelodyConfig) -> Result<Melody> {
    let slots = config.num_bars * config.num_notes;
    let required = slots * BITS_PER_NOTE;
    if genome.len() < required {
        return Err(MelogenError::GenomeTooShort {
            required,
            actual: genome.len(),
        });
    }

    let note_length = 4.0 / config.num_notes as f64;
    let scale = EventScale::new(config.key, config.scale, config.root);
    if scale.is_empty() {
        return Err(MelogenError::Configuration(format!(
            "No {} {} pitches fit in MIDI range at octave {}",
            config.key, config.scale, config.root
        )));
    }

    let mut degrees: Vec<u32> = Vec::with_capacity(slots);
    let mut velocity: Vec<u8> = Vec::with_capacity(slots);
    let mut beat: Vec<f64> = Vec::with_capacity(slots);
    let mut sounding: Option<u32> = None;

    for chunk in genome[..required].chunks(BITS_PER_NOTE) {
        let mut value = int_from_bits(chunk);
        if !config.pauses {
            value %= REST_THRESHOLD;
        }

        if value >= REST_THRESHOLD {
            degrees.push(0);
            velocity.push(0);
            beat.push(note_length);
            sounding = None;
        } else if sounding == Some(value) {
            if let Some(last) = beat.last_mut() {
                *last += note_length;
            }
        } else {
            degrees.push(value);
            velocity.push(NOTE_VELOCITY);
            beat.push(note_length);
            sounding = Some(value);
        }
    }

    let notes = (0..config.num_steps)
        .map(|step| {
            degrees
                .iter()
                .map(|degree| scale.get(*degree as usize + step * 2).unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(Melody {
        notes,
        velocity,
        beat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::scale::{Key, Scale};

    fn config(num_bars: usize, num_notes: usize, pauses: bool) -> MelodyConfig {
        MelodyConfig {
            num_bars,
            num_notes,
            num_steps: 1,
            pauses,
            key: Key::C,
            scale: Scale::Major,
            root: 4,
            ..MelodyConfig::default()
        }
    }

    #[test]
    fn test_int_from_bits_little_endian() {
        assert_eq!(int_from_bits(&[1, 0, 0, 0]), 1);
        assert_eq!(int_from_bits(&[0, 1, 0, 0]), 2);
        assert_eq!(int_from_bits(&[1, 1, 1, 1]), 15);
        assert_eq!(int_from_bits(&[]), 0);
    }

    #[test]
    fn test_distinct_notes() {
        // degrees 0, 1, 2, 4
        let genome = vec![0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0];
        let melody = genome_to_melody(&genome, &config(1, 4, true)).unwrap();

        assert_eq!(melody.notes, vec![vec![60, 62, 64, 67]]);
        assert_eq!(melody.velocity, vec![127; 4]);
        assert_eq!(melody.beat, vec![1.0; 4]);
    }

    #[test]
    fn test_repeated_degree_extends_note() {
        // degrees 2, 2, 2, 5
        let genome = vec![0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 1, 0];
        let melody = genome_to_melody(&genome, &config(1, 4, true)).unwrap();

        assert_eq!(melody.notes, vec![vec![64, 69]]);
        assert_eq!(melody.beat, vec![3.0, 1.0]);
    }

    #[test]
    fn test_rests_with_pauses() {
        // 8 is a rest, then degree 0 must start a new note
        let genome = vec![0, 0, 0, 1, 0, 0, 0, 0];
        let melody = genome_to_melody(&genome, &config(1, 2, true)).unwrap();

        assert_eq!(melody.velocity, vec![0, 127]);
        assert_eq!(melody.beat, vec![2.0, 2.0]);
    }

    #[test]
    fn test_no_pauses_folds_rests_into_notes() {
        // 9 folds to 1
        let genome = vec![1, 0, 0, 1, 0, 1, 0, 0];
        let melody = genome_to_melody(&genome, &config(1, 2, false)).unwrap();

        assert_eq!(melody.velocity, vec![127, 127]);
        assert_eq!(melody.notes, vec![vec![62, 64]]);
    }

    #[test]
    fn test_steps_stack_thirds() {
        let genome = vec![0, 0, 0, 0];
        let mut cfg = config(1, 1, true);
        cfg.num_steps = 3;

        let melody = genome_to_melody(&genome, &cfg).unwrap();

        assert_eq!(melody.notes, vec![vec![60], vec![64], vec![67]]);
        assert_eq!(melody.beat, vec![4.0]);
    }

    #[test]
    fn test_short_genome_is_rejected() {
        let genome = vec![0; 15];
        let result = genome_to_melody(&genome, &config(1, 4, true));
        assert!(matches!(
            result,
            Err(MelogenError::GenomeTooShort { required: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_describe() {
        let genome = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0];
        let melody = genome_to_melody(&genome, &config(1, 4, true)).unwrap();
        assert_eq!(melody.describe(), "C4 (2) - E4");
    }
}
