// In: src/config.rs

//! The single source of truth for conversion configuration.
//!
//! `CodecConfig` is created once at the application boundary (CLI flags, a
//! JSON file, or Python keyword arguments) and then passed down read-only.
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::NumericKind;

/// Configuration for file-level conversions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Element kind CSV text is parsed as. CSV carries no type information of its own.
    #[serde(default = "default_csv_kind")]
    pub csv_kind: NumericKind,

    /// If true, a CSV source is converted to a flat array and then immediately
    /// bitmask-encoded. If false, conversion stops at the flat array.
    #[serde(default = "default_true")]
    pub encode_csv: bool,

    /// Extension given to the binary file produced from a CSV source.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Optional `env_logger` filter applied by the CLI (e.g. "debug").
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            csv_kind: default_csv_kind(),
            encode_csv: true,
            output_extension: default_output_extension(),
            log_level: None,
        }
    }
}

impl CodecConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// CSV values are read as double precision unless told otherwise.
fn default_csv_kind() -> NumericKind {
    NumericKind::Float64
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

fn default_output_extension() -> String {
    "bin".to_string()
}
