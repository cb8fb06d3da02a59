use super::traits::{ConfigManifest, ConfigSection};
use crate::error::{MelogenError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Parent directory for per-run MIDI folders.
    pub directory: PathBuf,
    pub save_midi: bool,
    /// External MIDI player, e.g. `timidity`. The file path is appended.
    pub player_command: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            save_midi: true,
            player_command: None,
        }
    }
}

impl OutputConfig {
    /// Folder for one run, named after its start time in Unix seconds.
    pub fn run_directory(&self, started: DateTime<Utc>) -> PathBuf {
        self.directory.join(started.timestamp().to_string())
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<()> {
        if let Some(command) = &self.player_command {
            if command.trim().is_empty() {
                return Err(MelogenError::Configuration(
                    "Player command must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Output".to_string(),
            fields: Vec::new(),
        }
    }
}
