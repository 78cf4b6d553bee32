/*
 * evaluate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Expression evaluation over serialized markup.
//!
//! This runs after binding, on the serialized output, to fill in whatever
//! expressions remain in text or attribute values. The default
//! [`Interpolator`] understands the variable syntax of Pandoc templates:
//!
//! - `$path$` or `${path}`: the value at a dotted path, e.g. `$author.name$`
//! - `$$`: a literal `$`
//!
//! A `$` that does not open a well-formed `$path$` is kept as literal text,
//! so prices like `$5` survive. The braced form is strict: an unclosed `${`
//! or a malformed path inside braces is an error.

use std::borrow::Cow;

use quick_xml::escape::escape;
use tracing::debug;

use crate::error::EvaluateError;
use crate::value::DataValue;

/// Evaluates expressions embedded in serialized markup.
pub trait ExpressionEvaluator {
    /// Substitute every expression in `markup` using `data`.
    fn evaluate(&self, markup: &str, data: &DataValue) -> Result<String, EvaluateError>;

    /// Quote `text` so that evaluating it reproduces it unchanged.
    ///
    /// Bound data goes through this before it is written into the markup,
    /// so data content is never read as an expression.
    fn literal<'t>(&self, text: &'t str) -> Cow<'t, str> {
        Cow::Borrowed(text)
    }
}

/// Variable interpolation with Pandoc template syntax.
///
/// Substituted values are rendered with [`DataValue::render`] and escaped,
/// so they are safe in both text and attribute positions. Paths that do not
/// resolve render as the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpolator;

impl ExpressionEvaluator for Interpolator {
    fn evaluate(&self, markup: &str, data: &DataValue) -> Result<String, EvaluateError> {
        let mut output = String::with_capacity(markup.len());
        let mut rest = markup;
        let mut offset = 0;

        while let Some(pos) = rest.find('$') {
            output.push_str(&rest[..pos]);
            let start = offset + pos;
            let after = &rest[pos + 1..];

            let consumed = if after.starts_with('$') {
                output.push('$');
                2
            } else if let Some(body) = after.strip_prefix('{') {
                let end = body
                    .find('}')
                    .ok_or(EvaluateError::Unterminated { offset: start })?;
                let path = body[..end].trim();
                if !is_valid_path(path) {
                    return Err(EvaluateError::InvalidPath {
                        path: path.to_string(),
                        offset: start,
                    });
                }
                output.push_str(&substitute(path, data));
                end + 3
            } else {
                match after.find('$') {
                    Some(end) if is_valid_path(&after[..end]) => {
                        output.push_str(&substitute(&after[..end], data));
                        end + 2
                    }
                    _ => {
                        output.push('$');
                        1
                    }
                }
            };

            rest = &rest[pos + consumed..];
            offset = start + consumed;
        }

        output.push_str(rest);
        Ok(output)
    }

    fn literal<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if text.contains('$') {
            Cow::Owned(text.replace('$', "$$"))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Evaluate `markup` with the default [`Interpolator`].
pub fn evaluate(markup: &str, data: &DataValue) -> Result<String, EvaluateError> {
    Interpolator.evaluate(markup, data)
}

fn substitute(path: &str, data: &DataValue) -> String {
    let segments: Vec<&str> = path.split('.').collect();
    match data.get_path(&segments) {
        Some(value) => escape(value.render().as_str()).into_owned(),
        None => {
            debug!(path, "Expression path not found");
            String::new()
        }
    }
}

/// A dotted path of identifiers: `name`, `author.name`, `item-2.title`.
fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        })
}
