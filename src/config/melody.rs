use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::{MelogenError, Result};
use crate::music::melody::BITS_PER_NOTE;
use crate::music::scale::{Key, Scale, MAX_ROOT_OCTAVE};
use serde::{Deserialize, Serialize};

/// How genomes are turned into melodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MelodyConfig {
    pub num_bars: usize,
    /// Notes per bar; each note lasts `4 / num_notes` quarter notes.
    pub num_notes: usize,
    /// Voices stacked on top of each other, a third apart in the scale.
    pub num_steps: usize,
    pub pauses: bool,
    pub key: Key,
    pub scale: Scale,
    /// Octave of the scale's first note (4 starts at middle C).
    pub root: u8,
    pub bpm: u32,
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            num_bars: 8,
            num_notes: 4,
            num_steps: 1,
            pauses: true,
            key: Key::C,
            scale: Scale::Major,
            root: 4,
            bpm: 128,
        }
    }
}

impl MelodyConfig {
    /// Bits needed to encode one melody.
    pub fn genome_length(&self) -> usize {
        self.num_bars * self.num_notes * BITS_PER_NOTE
    }
}

impl ConfigSection for MelodyConfig {
    fn section_name() -> &'static str {
        "melody"
    }

    fn validate(&self) -> Result<()> {
        if self.num_bars == 0 || self.num_notes == 0 {
            return Err(MelogenError::Configuration(
                "Bars and notes per bar must be at least 1".to_string(),
            ));
        }
        if self.num_steps == 0 {
            return Err(MelogenError::Configuration(
                "Number of steps must be at least 1".to_string(),
            ));
        }
        if self.root > MAX_ROOT_OCTAVE {
            return Err(MelogenError::Configuration(format!(
                "Scale root must be between 0 and {}",
                MAX_ROOT_OCTAVE
            )));
        }
        if !(4..=1000).contains(&self.bpm) {
            return Err(MelogenError::Configuration(
                "BPM must be between 4 and 1000".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Melody".to_string(),
            fields: vec![
                FieldManifest::integer("num_bars", self.num_bars as u64, 1, None, "Number of bars"),
                FieldManifest::integer("num_notes", self.num_notes as u64, 1, None, "Notes per bar"),
                FieldManifest::integer("num_steps", self.num_steps as u64, 1, None, "Number of steps"),
                FieldManifest::boolean("pauses", self.pauses, "Introduce pauses?"),
                FieldManifest::choice("key", self.key.name(), Key::names(), "Key"),
                FieldManifest::choice("scale", self.scale.name(), Scale::names(), "Scale"),
                FieldManifest::integer(
                    "root",
                    u64::from(self.root),
                    0,
                    Some(u64::from(MAX_ROOT_OCTAVE)),
                    "Scale root",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_genome_length() {
        // 8 bars * 4 notes * 4 bits
        assert_eq!(MelodyConfig::default().genome_length(), 128);
    }

    #[test]
    fn test_validate() {
        assert!(MelodyConfig::default().validate().is_ok());

        let no_bars = MelodyConfig {
            num_bars: 0,
            ..MelodyConfig::default()
        };
        assert!(no_bars.validate().is_err());

        let too_high = MelodyConfig {
            root: 9,
            ..MelodyConfig::default()
        };
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn test_choice_field_round_trips_through_json() {
        let config = MelodyConfig::default();
        let updated = config.with_field("scale", serde_json::json!("dorian")).unwrap();
        assert_eq!(updated.scale, Scale::Dorian);

        let updated = config.with_field("key", serde_json::json!("eb")).unwrap();
        assert_eq!(updated.key, Key::EFlat);
    }

    #[test]
    fn test_manifest_lists_prompted_fields() {
        let manifest = MelodyConfig::default().to_manifest();
        let names: Vec<&str> = manifest.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["num_bars", "num_notes", "num_steps", "pauses", "key", "scale", "root"]
        );
    }
}
