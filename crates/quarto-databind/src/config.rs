/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Binding configuration.
//!
//! ```toml
//! markers = ["data-bind", "itemprop"]
//! strip-marker = true
//! evaluate = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default marker attribute naming the property a node is bound to.
pub const DEFAULT_MARKER: &str = "data-bind";

/// Settings for binding data to markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BindingConfig {
    /// Attribute names that bind a node to a property.
    ///
    /// When a node carries more than one, the marker listed first here wins.
    pub markers: Vec<String>,

    /// Remove the marker attribute from nodes whose binding resolved.
    pub strip_marker: bool,

    /// Run the expression evaluator as the last render stage.
    pub evaluate: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            markers: vec![DEFAULT_MARKER.to_string()],
            strip_marker: true,
            evaluate: true,
        }
    }
}

impl BindingConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Use a single marker attribute.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers = vec![marker.into()];
        self
    }

    pub fn is_marker(&self, name: &str) -> bool {
        self.markers.iter().any(|m| m == name)
    }
}
