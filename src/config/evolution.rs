use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::generation::{check_mutation_probability, EngineConfig};
use crate::error::{MelogenError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_mutations: usize,
    pub mutation_probability: f64,
    /// Fixed seed for reproducible runs; fresh entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            num_mutations: 2,
            mutation_probability: 0.5,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn engine_config(&self, genome_length: usize) -> EngineConfig {
        EngineConfig {
            population_size: self.population_size,
            genome_length,
            num_mutations: self.num_mutations,
            mutation_probability: self.mutation_probability,
            seed: self.seed,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(MelogenError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        check_mutation_probability(self.mutation_probability)
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest::integer(
                    "population_size",
                    self.population_size as u64,
                    2,
                    None,
                    "Population size",
                ),
                FieldManifest::integer(
                    "num_mutations",
                    self.num_mutations as u64,
                    0,
                    None,
                    "Number of mutations",
                ),
                FieldManifest::float(
                    "mutation_probability",
                    self.mutation_probability,
                    0.0,
                    1.0,
                    "Mutations probability",
                ),
            ],
        }
    }
}
