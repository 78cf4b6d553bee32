/*
 * convert.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conversions into [`DataValue`].
//!
//! Structured data arrives as JSON or YAML. Objects follow the quick-xml
//! serde naming convention to say where attributes and text content go:
//!
//! | Object shape                         | Data value                      |
//! |--------------------------------------|---------------------------------|
//! | only `@name` keys                    | attribute list                  |
//! | `$text`, no `@name` keys             | [`DataValue::Text`]             |
//! | `$text` and `@name` keys             | [`DataValue::TextWithAttributes`] |
//! | plain keys, no `@name` keys          | [`DataValue::Map`]              |
//! | plain keys and `@name` keys          | [`DataValue::MapWithAttributes`] |
//!
//! When `$text` is present, plain keys next to it are ignored. An empty
//! object is an empty map.

use quarto_markup::Attribute;
use serde_json::{Map, Value};
use tracing::trace;

use crate::value::{DataValue, Properties};

/// Key prefix marking an attribute.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key holding literal text content.
pub const TEXT_KEY: &str = "$text";

impl From<Value> for DataValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DataValue::Null,
            Value::Bool(b) => DataValue::Bool(b),
            Value::Number(n) => DataValue::Number(n),
            Value::String(s) => DataValue::Text(s),
            Value::Array(items) => DataValue::List(items.into_iter().map(DataValue::from).collect()),
            Value::Object(map) => from_object(map),
        }
    }
}

fn from_object(map: Map<String, Value>) -> DataValue {
    let mut attrs = Vec::new();
    let mut text = None;
    let mut props = Properties::new();

    for (key, value) in map {
        if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            if let Some(value) = attribute_value(value) {
                attrs.push(Attribute::new(name, value));
            }
        } else if key == TEXT_KEY {
            text = Some(DataValue::from(value).render());
        } else {
            props.insert(key, DataValue::from(value));
        }
    }

    if text.is_some() && !props.is_empty() {
        let ignored: Vec<&str> = props.keys().map(String::as_str).collect();
        trace!(?ignored, "Ignoring keys next to {}", TEXT_KEY);
    }

    match (text, attrs.is_empty()) {
        (Some(text), true) => DataValue::Text(text),
        (Some(text), false) => DataValue::TextWithAttributes(text, attrs),
        (None, false) if props.is_empty() => {
            DataValue::List(attrs.into_iter().map(DataValue::Attribute).collect())
        }
        (None, false) => DataValue::MapWithAttributes(props, attrs),
        (None, true) => DataValue::Map(props),
    }
}

/// String form of an attribute value. Null drops the attribute.
fn attribute_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

impl From<&str> for DataValue {
    fn from(text: &str) -> Self {
        DataValue::Text(text.to_string())
    }
}

impl From<String> for DataValue {
    fn from(text: String) -> Self {
        DataValue::Text(text)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl From<i64> for DataValue {
    fn from(n: i64) -> Self {
        DataValue::Number(n.into())
    }
}

impl From<Attribute> for DataValue {
    fn from(attr: Attribute) -> Self {
        DataValue::Attribute(attr)
    }
}

impl From<Properties> for DataValue {
    fn from(props: Properties) -> Self {
        DataValue::Map(props)
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(items: Vec<T>) -> Self {
        DataValue::list(items)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}
