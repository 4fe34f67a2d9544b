//! # Settings Module
//!
//! ## Purpose
//! Holds the options of the reaction parser. Defaults reproduce the plain
//! `A + 2*B -> 1.5*C` grammar; a JSON file can switch on the relaxed modes.
//!
//! ## Fields
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `arrow` | `"->"` | separator between reactants and products |
//! | `allow_empty_side` | `false` | accept `"A ->"` / `"-> B"` (sink and source reactions) |
//! | `strict_species_names` | `true` | species must match `[A-Za-z0-9_]+` |
//!
//! ## Usage Pattern
//! ```rust
//! use ARTools::settings::ParserSettings;
//!
//! let settings = ParserSettings::from_json_str(r#"{ "allow_empty_side": true }"#).unwrap();
//! assert_eq!(settings.arrow, "->");
//! assert!(settings.allow_empty_side);
//! ```
use crate::Kinetics::stoichiometry_matrix::StoichError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options of the reaction string parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Separator between the reactant side and the product side
    pub arrow: String,
    /// When true a side without terms is accepted and contributes nothing
    pub allow_empty_side: bool,
    /// When false any non-empty token is taken as a species name
    pub strict_species_names: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            arrow: "->".to_string(),
            allow_empty_side: false,
            strict_species_names: true,
        }
    }
}

impl ParserSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, StoichError> {
        let settings: ParserSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoichError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&content)?;
        info!("parser settings loaded from '{}': {:?}", path.display(), settings);
        Ok(settings)
    }

    // the arrow must not collide with the term separators
    pub(crate) fn validate(&self) -> Result<(), StoichError> {
        let arrow = self.arrow.trim();
        if arrow.is_empty() || arrow.contains('+') || arrow.contains('*') {
            return Err(StoichError::InvalidSettings(format!(
                "arrow '{}' must be non-empty and contain neither '+' nor '*'",
                self.arrow
            )));
        }
        Ok(())
    }
}
