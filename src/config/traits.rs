use crate::error::{MelogenError, Result};
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<()>;
    fn to_manifest(&self) -> ConfigManifest;

    /// Copy of this section with one field replaced, looked up by its
    /// serialized name. The result is validated.
    fn with_field(&self, name: &str, value: serde_json::Value) -> Result<Self> {
        let mut document = serde_json::to_value(self)?;
        match document.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                return Err(MelogenError::Configuration(format!(
                    "Unknown field {}.{}",
                    Self::section_name(),
                    name
                )))
            }
        }
        let updated: Self = serde_json::from_value(document)?;
        updated.validate()?;
        Ok(updated)
    }
}

/// Configuration manifest for interactive prompting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: FieldType,
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub choices: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    Choice,
}

impl FieldManifest {
    pub fn integer(name: &str, default: u64, min: u64, max: Option<u64>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Integer,
            default: serde_json::json!(default),
            min: Some(min as f64),
            max: max.map(|m| m as f64),
            choices: Vec::new(),
            description: description.to_string(),
        }
    }

    pub fn float(name: &str, default: f64, min: f64, max: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Float,
            default: serde_json::json!(default),
            min: Some(min),
            max: Some(max),
            choices: Vec::new(),
            description: description.to_string(),
        }
    }

    pub fn boolean(name: &str, default: bool, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Boolean,
            default: serde_json::json!(default),
            min: None,
            max: None,
            choices: Vec::new(),
            description: description.to_string(),
        }
    }

    pub fn choice(name: &str, default: &str, choices: Vec<String>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Choice,
            default: serde_json::json!(default),
            min: None,
            max: None,
            choices,
            description: description.to_string(),
        }
    }

    /// Parse user input for this field. `None` means the input is not acceptable.
    pub fn parse_input(&self, input: &str) -> Option<serde_json::Value> {
        let input = input.trim();
        match self.field_type {
            FieldType::Integer => {
                let value = input.parse::<u64>().ok()?;
                self.in_range(value as f64).then(|| serde_json::json!(value))
            }
            FieldType::Float => {
                let value = input.parse::<f64>().ok()?;
                (value.is_finite() && self.in_range(value)).then(|| serde_json::json!(value))
            }
            FieldType::Boolean => match input.to_lowercase().as_str() {
                "y" | "yes" | "true" | "1" => Some(serde_json::json!(true)),
                "n" | "no" | "false" | "0" => Some(serde_json::json!(false)),
                _ => None,
            },
            FieldType::Choice => self
                .choices
                .iter()
                .find(|choice| choice.eq_ignore_ascii_case(input))
                .map(|choice| serde_json::json!(choice)),
        }
    }

    fn in_range(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}
