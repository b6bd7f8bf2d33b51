use std::fs;
use std::path::Path;

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::parameters::*;
use crate::error::Result;

/// Source of Monte Carlo inputs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
pub enum InputChoice {
    /// Scalar draws from `U[low, high)`.
    Uniform(UniformParameters),

    /// Standard normal coefficient vectors of a truncated random field.
    Field(FieldParameters),
}

/// A complete study: input source, run settings and an optional batch summary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudyConfig {
    pub input: InputChoice,
    pub run: RunParameters,
    #[serde(default)]
    pub summary: Option<SummaryParameters>,
}

impl StudyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        debug!(path = %path.display(), "study configuration loaded");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn schema() -> Schema {
        schema_for!(StudyConfig)
    }
}
