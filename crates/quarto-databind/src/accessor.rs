/*
 * accessor.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Data accessor: shape predicates and extractors over [`DataValue`].
//!
//! Every function here is total. Shapes a function has no use for fall
//! through to a neutral result (no property, no content, element attributes
//! only) rather than an error.

use std::fmt;

use quarto_markup::Attribute;

use crate::escape::escape_attribute;
use crate::value::DataValue;

static NULL: DataValue = DataValue::Null;

/// Look up `name` in a map-shaped context.
///
/// Returns `None` when the key is missing and for every context that is not
/// a map. Absence is a normal result, not an error.
pub fn property<'a>(context: &'a DataValue, name: &str) -> Option<&'a DataValue> {
    match context {
        DataValue::Map(props) | DataValue::MapWithAttributes(props, _) => props.get(name),
        _ => None,
    }
}

/// Normalize a value into the items a bound node is expanded over.
///
/// - `None` (no value) becomes `[Null]`, so one node is still rendered.
/// - A list whose first element is an attribute is one attribute list and
///   becomes a single item.
/// - Any other list is returned item by item (an empty list yields no items).
/// - Everything else becomes a single item.
pub fn prepare(value: Option<&DataValue>) -> Vec<&DataValue> {
    match value {
        None => vec![&NULL],
        Some(list @ DataValue::List(items)) if is_attribute_list(items) => vec![list],
        Some(DataValue::List(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Whether `value` is literal text rather than data to descend into.
pub fn is_content(value: &DataValue) -> bool {
    content(value).is_some()
}

/// The text of a content value; `None` for non-content values.
pub fn content(value: &DataValue) -> Option<&str> {
    match value {
        DataValue::Text(text) | DataValue::TextWithAttributes(text, _) => Some(text),
        _ => None,
    }
}

/// Merge the attributes carried by `value` with a node's own attributes.
///
/// Data attributes come first, element attributes after. Every name and
/// value in the result is escaped.
pub fn attributes(value: &DataValue, element_attrs: &[Attribute]) -> AttributeSet {
    let data_attrs: Vec<&Attribute> = match value {
        DataValue::TextWithAttributes(_, attrs) | DataValue::MapWithAttributes(_, attrs) => {
            attrs.iter().collect()
        }
        DataValue::List(items) if is_attribute_list(items) => items
            .iter()
            .filter_map(|item| match item {
                DataValue::Attribute(attr) => Some(attr),
                _ => None,
            })
            .collect(),
        DataValue::Attribute(attr) => vec![attr],
        _ => Vec::new(),
    };

    data_attrs
        .into_iter()
        .chain(element_attrs)
        .map(|attr| Attribute::new(escape_attribute(&attr.name), escape_attribute(&attr.value)))
        .collect()
}

fn is_attribute_list(items: &[DataValue]) -> bool {
    matches!(items.first(), Some(DataValue::Attribute(_)))
}

/// Escaped attributes ready to be written onto a node.
///
/// `Display` renders the set the way it appears inside a start tag, each
/// pair preceded by a space: ` href="/a" class="btn"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeSet(Vec<Attribute>);

impl AttributeSet {
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_attributes(self) -> Vec<Attribute> {
        self.0
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        AttributeSet(iter.into_iter().collect())
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in &self.0 {
            write!(f, " {}=\"{}\"", attr.name, attr.value)?;
        }
        Ok(())
    }
}
