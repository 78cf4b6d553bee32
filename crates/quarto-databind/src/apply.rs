/*
 * apply.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Node applicator: shapes node(s) from already-resolved content.
//!
//! Nothing here looks at data semantics. Callers resolve and classify the
//! data first and hand over the children a node should hold.

use quarto_markup::{Child, Node};

/// Content to place into a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A single value: the node keeps its shape and holds just this child.
    One(Child),

    /// A sequence: one node per item, in order.
    Many(Vec<Slot>),
}

/// Result of applying content to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// One node in place of the original.
    Single(Node),

    /// Sibling nodes replacing the original, in order.
    Expanded(Vec<Node>),
}

/// Apply `slot` to `node`.
///
/// A single value replaces the node's children. A sequence yields one node
/// per item, each built the same way, flattened so that nested sequences
/// never produce nested results.
///
/// # Example
///
/// ```rust
/// use quarto_databind::apply::{apply, Applied, Slot};
/// use quarto_markup::Node;
///
/// let li = Node::new("li").with_attribute("class", "item");
/// let applied = apply(&li, Slot::from(vec!["one", "two"]));
///
/// assert_eq!(
///     applied,
///     Applied::Expanded(vec![
///         Node::new("li").with_attribute("class", "item").with_text("one"),
///         Node::new("li").with_attribute("class", "item").with_text("two"),
///     ])
/// );
/// ```
pub fn apply(node: &Node, slot: Slot) -> Applied {
    match slot {
        Slot::One(child) => Applied::Single(Node {
            tag: node.tag.clone(),
            attributes: node.attributes.clone(),
            children: vec![child],
        }),
        Slot::Many(items) => Applied::Expanded(
            items
                .into_iter()
                .flat_map(|item| apply(node, item).into_nodes())
                .collect(),
        ),
    }
}

impl Applied {
    /// The resulting nodes, in order.
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Applied::Single(node) => vec![node],
            Applied::Expanded(nodes) => nodes,
        }
    }

    /// The resulting nodes as children of a parent.
    pub fn into_children(self) -> Vec<Child> {
        self.into_nodes().into_iter().map(Child::Element).collect()
    }

    pub fn len(&self) -> usize {
        match self {
            Applied::Single(_) => 1,
            Applied::Expanded(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Child> for Slot {
    fn from(child: Child) -> Self {
        Slot::One(child)
    }
}

impl From<&str> for Slot {
    fn from(text: &str) -> Self {
        Slot::One(Child::from(text))
    }
}

impl From<String> for Slot {
    fn from(text: String) -> Self {
        Slot::One(Child::Text(text))
    }
}

impl From<Node> for Slot {
    fn from(node: Node) -> Self {
        Slot::One(Child::Element(node))
    }
}

impl<T: Into<Slot>> From<Vec<T>> for Slot {
    fn from(items: Vec<T>) -> Self {
        Slot::Many(items.into_iter().map(Into::into).collect())
    }
}
