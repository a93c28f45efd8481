//! Centralized rig configuration with TOML preset support.
//!
//! Every tweakable setting (orbit limits, drag scalars, resistance curve,
//! gesture thresholds, projection skew, mouse binds) lives here. Options
//! serialize to/from TOML so presets can be stored next to the embedding
//! application.

mod bindings;
mod gesture;
mod projection;
mod rig;

use std::path::Path;

pub use bindings::MouseBindings;
pub use gesture::{AmbiguityPolicy, DeltaNormalization, GestureOptions};
pub use projection::ProjectionOptions;
pub use rig::RigOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[projection]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Orbit limits, scalars and resistance.
    pub rig: RigOptions,
    /// Touch gesture disambiguation.
    pub gesture: GestureOptions,
    /// Skewed projection parameters.
    pub projection: ProjectionOptions,
    /// Mouse bind table.
    #[schemars(skip)]
    pub bindings: MouseBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Check every section. Called by the rig constructor; bad settings are
    /// rejected here rather than clamped at runtime.
    ///
    /// # Errors
    ///
    /// Returns the first section error.
    pub fn validate(&self) -> Result<(), RigError> {
        self.rig.validate()?;
        self.gesture.validate()?;
        self.projection.validate()
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RigError::OptionsParse`] for malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, RigError> {
        toml::from_str(content)
            .map_err(|e| RigError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RigError::Io`] if the file cannot be read, or
    /// [`RigError::OptionsParse`] for malformed TOML.
    pub fn load(path: &Path) -> Result<Self, RigError> {
        let content = std::fs::read_to_string(path).map_err(RigError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded rig preset from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`RigError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), RigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RigError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RigError::Io)?;
        }
        std::fs::write(path, content).map_err(RigError::Io)?;
        log::info!("Saved rig preset to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
