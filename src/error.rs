use thiserror::Error;

#[derive(Error, Debug)]
pub enum MelogenError {
    #[error("Genome length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid split point {point} for genomes of length {length}")]
    InvalidSplitPoint { point: usize, length: usize },

    #[error("Cannot draw two parents from a weighted distribution of size {0}")]
    InsufficientPopulation(usize),

    #[error("Genome too short: need {required} bits, got {actual}")]
    GenomeTooShort { required: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("MIDI error: {0}")]
    Midi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, MelogenError>;
