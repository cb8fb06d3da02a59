use crate::error::{MelogenError, Result};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Plays MIDI files through an external command such as `timidity` or
/// `fluidsynth -a alsa soundfont.sf2`. The file path is appended as the last
/// argument. Without a command, playback does nothing.
pub struct Player {
    command: Option<Vec<String>>,
    child: Option<Child>,
}

impl Player {
    pub fn new(command: Option<&str>) -> Result<Self> {
        let command = match command {
            Some(line) => {
                let parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();
                if parts.is_empty() {
                    return Err(MelogenError::Configuration("Player command is empty".to_string()));
                }
                Some(parts)
            }
            None => None,
        };

        Ok(Self {
            command,
            child: None,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.command.is_some()
    }

    /// Start playing `path`, stopping anything already playing.
    pub fn play(&mut self, path: &Path) -> Result<()> {
        self.stop();

        let Some(parts) = &self.command else {
            return Ok(());
        };

        let child = Command::new(&parts[0])
            .args(&parts[1..])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        log::debug!("Started player {} for {}", parts[0], path.display());
        self.child = Some(child);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            match child.try_wait() {
                Ok(Some(_)) => {}
                _ => {
                    if let Err(e) = child.kill() {
                        log::debug!("Player already gone: {}", e);
                    }
                    let _ = child.wait();
                }
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}
