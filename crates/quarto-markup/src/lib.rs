/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Markup node trees for Quarto data binding.
//!
//! This crate wraps [`quick-xml`] to turn a markup fragment into a tree of
//! [`Node`]s and to write such a tree back out. It is the parsing and
//! serialization layer used by `quarto-databind`; it knows nothing about
//! data or binding conventions.
//!
//! # Overview
//!
//! - [`Node`]: an element with a tag, ordered attributes, and children
//! - [`Attribute`]: a name/value pair, value kept markup-ready
//! - [`Child`]: either a nested [`Node`] or a text leaf
//!
//! # Example
//!
//! ```rust
//! use quarto_markup::{parse, serialize, Child};
//!
//! let tree = parse(r#"<ul class="menu"><li>One</li></ul>"#).unwrap();
//! let Child::Element(list) = &tree[0] else { panic!("expected an element") };
//!
//! assert_eq!(list.tag, "ul");
//! assert_eq!(list.get_attribute("class"), Some("menu"));
//! assert_eq!(serialize(&tree).unwrap(), r#"<ul class="menu"><li>One</li></ul>"#);
//! ```
//!
//! # Grammar
//!
//! The accepted grammar is well-formed XML with two HTML allowances: void
//! elements such as `<br>` need no closing slash, and HTML5 named entities
//! (`&nbsp;`, `&copy;`, ...) are decoded in text. Comments, processing
//! instructions and DOCTYPE declarations are dropped.

pub mod error;
pub mod parser;
pub mod serializer;
pub mod types;

pub use error::{Error, Result};
pub use parser::parse;
pub use serializer::serialize;
pub use types::{Attribute, Child, Node, is_void_element};
