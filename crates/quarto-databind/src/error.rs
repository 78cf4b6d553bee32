/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for rendering, expression evaluation and configuration.
//!
//! Binding itself never fails: absent properties and unexpected data shapes
//! are handled as neutral cases. Errors only come from the collaborators
//! around it.

use thiserror::Error;

/// Errors that can occur while rendering a template.
///
/// Collaborator errors are passed through unchanged.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template markup could not be parsed or serialized.
    #[error(transparent)]
    Markup(#[from] quarto_markup::Error),

    /// An embedded expression could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluateError),
}

/// Errors from the expression evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    /// `${` with no closing `}`.
    #[error("Unterminated expression starting at byte {offset}")]
    Unterminated { offset: usize },

    /// `${...}` holding something other than a dotted path.
    #[error("Invalid variable path '{path}' at byte {offset}")]
    InvalidPath { path: String, offset: usize },
}

/// Errors loading a [`crate::BindingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML or has unknown fields.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
