pub mod evolution;
pub mod manager;
pub mod melody;
pub mod output;
pub mod traits;

pub use evolution::EvolutionConfig;
pub use manager::{AppConfig, ConfigManager, ENV_PREFIX};
pub use melody::MelodyConfig;
pub use output::OutputConfig;
pub use traits::{ConfigManifest, ConfigSection, FieldManifest, FieldType};
