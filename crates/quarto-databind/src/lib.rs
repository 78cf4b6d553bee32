/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Data binding for markup templates.
//!
//! This crate fills a markup template with structured data. A node opts in
//! by carrying a marker attribute (`data-bind` by default) that names a
//! property of the data in scope:
//!
//! - text values become the node's content
//! - maps become the data scope for the node's children
//! - lists repeat the node once per item
//! - attributes carried by the data are merged onto the node
//!
//! After binding, the markup is serialized and any remaining `$variable$`
//! expressions are evaluated against the same data.
//!
//! # Architecture
//!
//! The pipeline has four parts, leaves first:
//!
//! 1. [`accessor`]: shape predicates and extractors over [`DataValue`]
//! 2. [`apply`]: builds node(s) from already-resolved content
//! 3. [`transform`]: the depth-first walk that resolves bindings
//! 4. [`render`]: parse, transform, serialize, evaluate
//!
//! Parsing and serialization live in `quarto-markup`; expression evaluation
//! is behind the [`ExpressionEvaluator`] trait.
//!
//! # Example
//!
//! ```rust
//! use quarto_databind::{render, DataValue};
//! use serde_json::json;
//!
//! let data = DataValue::from(json!({
//!     "title": "Fruit",
//!     "items": ["apple", {"$text": "banana", "@class": "ripe"}]
//! }));
//!
//! let html = render(
//!     r#"<h1 data-bind="title"></h1><ul><li data-bind="items"></li></ul>"#,
//!     &data,
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     html,
//!     r#"<h1>Fruit</h1><ul><li>apple</li><li class="ripe">banana</li></ul>"#
//! );
//! ```

pub mod accessor;
pub mod apply;
pub mod config;
pub mod convert;
pub mod error;
pub mod escape;
pub mod evaluate;
pub mod render;
pub mod transform;
pub mod value;

// Re-export main types at crate root
pub use accessor::AttributeSet;
pub use apply::{Applied, Slot};
pub use config::BindingConfig;
pub use error::{ConfigError, EvaluateError, RenderError, RenderResult};
pub use evaluate::{ExpressionEvaluator, Interpolator};
pub use render::{MarkupSyntax, Renderer, XmlMarkup, render};
pub use transform::Transformer;
pub use value::{DataValue, Properties};

pub use quarto_markup::{Attribute, Child, Node};
