/*
 * escape.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Attribute escaping.

use std::borrow::Cow;

use quick_xml::escape::{escape, resolve_html5_entity, resolve_predefined_entity, unescape_with};

/// Escape a string for use as an attribute name or value.
///
/// Well-formed references are decoded first, so a value that is already
/// escaped comes out unchanged instead of double-encoded: both
/// `Tom & Jerry` and `Tom &amp; Jerry` escape to `Tom &amp; Jerry`. A bare
/// `&`, or a reference to an unknown entity, is kept as literal text.
pub fn escape_attribute(raw: &str) -> String {
    escape(&*decode(raw)).into_owned()
}

/// Decode every well-formed `&name;` or `&#..;` reference in `raw`.
fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        decoded.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let resolved = reference_len(candidate).and_then(|len| {
            unescape_with(&candidate[..len], resolve_entity)
                .ok()
                .map(|text| (len, text))
        });
        match resolved {
            Some((len, text)) => {
                decoded.push_str(&text);
                rest = &candidate[len..];
            }
            None => {
                decoded.push('&');
                rest = &candidate[1..];
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

/// Length of the reference at the start of `text` (which begins with `&`),
/// including the `&` and `;`.
fn reference_len(text: &str) -> Option<usize> {
    let body = &text[1..];
    let end = body.find(';')?;
    let name = &body[..end];
    let well_formed = !name.is_empty()
        && name
            .char_indices()
            .all(|(i, c)| c.is_ascii_alphanumeric() || (i == 0 && c == '#'));
    well_formed.then_some(end + 2)
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
}
