/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Data values bound to markup nodes.
//!
//! [`DataValue`] is the data context a node is resolved against. Every value
//! falls into exactly one shape, and the accessor functions in
//! [`crate::accessor`] match on those shapes exhaustively.

use std::collections::HashMap;

use quarto_markup::Attribute;
use serde::Deserialize;

use crate::accessor;

/// Named properties of a map-shaped value.
pub type Properties = HashMap<String, DataValue>;

/// A value that can be bound to a markup node.
///
/// Deserializes from any serde format through [`serde_json::Value`]; see
/// [`crate::convert`] for how objects map onto the shapes below.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum DataValue {
    /// Named properties to resolve nested bindings against.
    Map(Properties),

    /// Named properties plus attributes to merge onto the bound node.
    MapWithAttributes(Properties, Vec<Attribute>),

    /// Literal text content.
    Text(String),

    /// Literal text content plus attributes to merge onto the bound node.
    TextWithAttributes(String, Vec<Attribute>),

    /// A sequence of values. A list whose first element is an
    /// [`DataValue::Attribute`] is an attribute list.
    List(Vec<DataValue>),

    /// A single name/value pair, the building block of attribute lists.
    Attribute(Attribute),

    /// A boolean value.
    Bool(bool),

    /// A numeric value.
    Number(serde_json::Number),

    /// A null/missing value.
    #[default]
    Null,
}

impl DataValue {
    /// A text value.
    pub fn text(text: impl Into<String>) -> Self {
        DataValue::Text(text.into())
    }

    /// A map value built from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<DataValue>,
    {
        DataValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// A list value.
    pub fn list<V: Into<DataValue>>(items: impl IntoIterator<Item = V>) -> Self {
        DataValue::List(items.into_iter().map(Into::into).collect())
    }

    /// An attribute list built from name/value pairs.
    pub fn attributes<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        DataValue::List(
            pairs
                .into_iter()
                .map(|(n, v)| DataValue::Attribute(Attribute::new(n, v)))
                .collect(),
        )
    }

    /// Attach attributes to a text or map value.
    ///
    /// Attributes already attached are kept and the new ones appended. Other
    /// shapes cannot carry attributes and are returned unchanged.
    pub fn with_attributes(self, attrs: impl IntoIterator<Item = Attribute>) -> Self {
        match self {
            DataValue::Text(text) => DataValue::TextWithAttributes(text, attrs.into_iter().collect()),
            DataValue::TextWithAttributes(text, mut existing) => {
                existing.extend(attrs);
                DataValue::TextWithAttributes(text, existing)
            }
            DataValue::Map(props) => DataValue::MapWithAttributes(props, attrs.into_iter().collect()),
            DataValue::MapWithAttributes(props, mut existing) => {
                existing.extend(attrs);
                DataValue::MapWithAttributes(props, existing)
            }
            other => other,
        }
    }

    /// Get a nested value by path.
    ///
    /// Each step goes through [`accessor::property`], so maps carrying
    /// attributes are traversed like plain maps.
    pub fn get_path(&self, path: &[&str]) -> Option<&DataValue> {
        path.iter()
            .try_fold(self, |value, name| accessor::property(value, name))
    }

    /// Render this value as a string for expression output.
    ///
    /// - Text: returned as-is
    /// - Bool: "true" or "" (empty for false)
    /// - Number: its decimal form
    /// - List: concatenation of rendered elements
    /// - Map: "true"
    /// - Attribute: its value
    /// - Null: ""
    pub fn render(&self) -> String {
        match self {
            DataValue::Text(s) | DataValue::TextWithAttributes(s, _) => s.clone(),
            DataValue::Bool(true) => "true".to_string(),
            DataValue::Bool(false) => String::new(),
            DataValue::Number(n) => n.to_string(),
            DataValue::List(items) => items.iter().map(DataValue::render).collect(),
            DataValue::Map(_) | DataValue::MapWithAttributes(..) => "true".to_string(),
            DataValue::Attribute(attr) => attr.value.clone(),
            DataValue::Null => String::new(),
        }
    }
}
