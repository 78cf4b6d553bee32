/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for markup parsing and serialization.

use thiserror::Error;

/// Result type alias for quarto-markup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Syntax error reported by quick-xml.
    #[error("Markup syntax error at byte {position}: {message}")]
    Syntax {
        message: String,
        /// Byte offset where the error occurred.
        position: u64,
    },

    /// End tag does not match the innermost open element.
    #[error("Mismatched end tag at byte {position}: expected </{expected}>, found </{found}>")]
    MismatchedEndTag {
        expected: String,
        found: String,
        position: u64,
    },

    /// End tag with no open element.
    #[error("Unexpected closing tag </{name}> at byte {position}")]
    UnexpectedEndTag { name: String, position: u64 },

    /// Input ended while an element was still open.
    #[error("Unexpected end of input, expected closing tag </{name}>")]
    UnclosedElement { name: String },

    /// Serialized output was not valid UTF-8.
    #[error("Serialization error: {message}")]
    Write { message: String },
}
