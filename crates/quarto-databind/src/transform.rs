/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tree transformer: binds data to a node tree.
//!
//! The walk is depth-first and carries the data context down the tree. A
//! node carrying a marker attribute is resolved against the context it was
//! handed:
//!
//! - no marker, or a marker naming a missing property: the node is kept and
//!   its children are walked with the same context
//! - a text value: the node's children become that text
//! - any other value: the node's children are walked with that value as the
//!   new context
//! - a list: the node is repeated once per item, as siblings
//!
//! Lookups never leave the current context; there is no fallback to an
//! enclosing scope.

use quarto_markup::{Attribute, Child, Node};
use tracing::{debug, trace};

use crate::accessor;
use crate::apply::{Applied, Slot, apply};
use crate::config::BindingConfig;
use crate::evaluate::ExpressionEvaluator;
use crate::value::DataValue;

/// Binds data to node trees according to a [`BindingConfig`].
#[derive(Clone, Copy)]
pub struct Transformer<'c> {
    config: &'c BindingConfig,
    literal_data: Option<&'c dyn ExpressionEvaluator>,
}

impl<'c> Transformer<'c> {
    pub fn new(config: &'c BindingConfig) -> Self {
        Self {
            config,
            literal_data: None,
        }
    }

    /// Quote bound text and data attributes for `evaluator`, so that only
    /// expressions written in the template are evaluated later.
    pub fn with_literal_data(mut self, evaluator: &'c dyn ExpressionEvaluator) -> Self {
        self.literal_data = Some(evaluator);
        self
    }

    /// Transform a sequence of children against `context`.
    ///
    /// Expanded nodes are spliced into the result in place of the node they
    /// came from. Text leaves are copied as they are.
    pub fn transform(&self, children: &[Child], context: &DataValue) -> Vec<Child> {
        let mut result = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Child::Element(node) => {
                    result.extend(self.transform_node(node, context).into_children());
                }
                Child::Text(text) => result.push(Child::Text(text.clone())),
            }
        }
        result
    }

    /// Transform a single node against `context`.
    pub fn transform_node(&self, node: &Node, context: &DataValue) -> Applied {
        let Some((marker, name)) = self.binding(node) else {
            return Applied::Single(self.pass_through(node, context));
        };

        let Some(value) = accessor::property(context, name) else {
            trace!(tag = %node.tag, property = name, "No value for binding");
            return Applied::Single(self.pass_through(node, context));
        };

        let element_attrs: Vec<Attribute> = node
            .attributes
            .iter()
            .filter(|attr| !(self.config.strip_marker && attr.name == marker))
            .cloned()
            .collect();

        let items = accessor::prepare(Some(value));
        debug!(tag = %node.tag, property = name, items = items.len(), "Binding node");

        let mut nodes: Vec<Node> = items
            .into_iter()
            .flat_map(|item| self.bind_item(node, &element_attrs, item).into_nodes())
            .collect();

        if nodes.len() == 1 {
            if let Some(single) = nodes.pop() {
                return Applied::Single(single);
            }
        }
        Applied::Expanded(nodes)
    }

    /// Build the node for one bound item.
    fn bind_item(&self, node: &Node, element_attrs: &[Attribute], item: &DataValue) -> Applied {
        let shaped = Node {
            tag: node.tag.clone(),
            attributes: self.item_attributes(item, element_attrs),
            children: Vec::new(),
        };

        match accessor::content(item) {
            Some(text) => match self.literal_data {
                Some(evaluator) => apply(&shaped, Slot::from(evaluator.literal(text).into_owned())),
                None => apply(&shaped, Slot::from(text)),
            },
            None => Applied::Single(Node {
                children: self.transform(&node.children, item),
                ..shaped
            }),
        }
    }

    /// Data attributes (quoted when needed) followed by the element's own.
    fn item_attributes(&self, item: &DataValue, element_attrs: &[Attribute]) -> Vec<Attribute> {
        let merged = accessor::attributes(item, element_attrs);
        let Some(evaluator) = self.literal_data else {
            return merged.into_attributes();
        };

        let from_data = merged.len() - element_attrs.len();
        merged
            .into_attributes()
            .into_iter()
            .enumerate()
            .map(|(index, attr)| {
                if index < from_data {
                    Attribute::new(attr.name, evaluator.literal(&attr.value).into_owned())
                } else {
                    attr
                }
            })
            .collect()
    }

    fn pass_through(&self, node: &Node, context: &DataValue) -> Node {
        Node {
            tag: node.tag.clone(),
            attributes: node.attributes.clone(),
            children: self.transform(&node.children, context),
        }
    }

    /// The marker attribute and property name a node is bound by.
    ///
    /// Markers are tried in configuration order.
    fn binding<'n>(&self, node: &'n Node) -> Option<(&'n str, &'n str)> {
        self.config.markers.iter().find_map(|marker| {
            node.attributes
                .iter()
                .find(|attr| &attr.name == marker)
                .map(|attr| (attr.name.as_str(), attr.value.trim()))
        })
    }
}

/// Transform `tree` against `data` using `config`.
pub fn transform(tree: &[Child], data: &DataValue, config: &BindingConfig) -> Vec<Child> {
    Transformer::new(config).transform(tree, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bound(tag: &str, property: &str) -> Node {
        Node::new(tag).with_attribute("data-bind", property)
    }

    fn run(tree: Vec<Node>, data: serde_json::Value) -> Vec<Child> {
        let tree: Vec<Child> = tree.into_iter().map(Child::Element).collect();
        transform(&tree, &DataValue::from(data), &BindingConfig::default())
    }

    fn elements(nodes: Vec<Node>) -> Vec<Child> {
        nodes.into_iter().map(Child::Element).collect()
    }

    #[test]
    fn test_text_binding() {
        let result = run(vec![bound("div", "body")], json!({"body": "Content"}));
        assert_eq!(result, elements(vec![Node::new("div").with_text("Content")]));
    }

    #[test]
    fn test_list_binding_expands_siblings() {
        let result = run(vec![bound("div", "body")], json!({"body": ["one", "two"]}));
        assert_eq!(
            result,
            elements(vec![
                Node::new("div").with_text("one"),
                Node::new("div").with_text("two"),
            ])
        );
    }

    #[test]
    fn test_expansion_splices_into_parent() {
        let tree = Node::new("ul")
            .with_text("\n")
            .with_child(bound("li", "items"))
            .with_text("\n");
        let result = run(vec![tree], json!({"items": ["a", "b", "c"]}));

        assert_eq!(
            result,
            elements(vec![Node::new("ul")
                .with_text("\n")
                .with_child(Node::new("li").with_text("a"))
                .with_child(Node::new("li").with_text("b"))
                .with_child(Node::new("li").with_text("c"))
                .with_text("\n")])
        );
    }

    #[test]
    fn test_unbound_tree_is_unchanged() {
        let tree = Node::new("section")
            .with_attribute("class", "intro")
            .with_child(Node::new("p").with_text("Hello"))
            .with_text("tail");
        let result = run(vec![tree.clone()], json!({"p": "ignored"}));
        assert_eq!(result, elements(vec![tree]));
    }

    #[test]
    fn test_missing_property_passes_through() {
        let tree = bound("div", "missing").with_child(bound("span", "name"));
        let result = run(vec![tree], json!({"name": "Ada"}));

        assert_eq!(
            result,
            elements(vec![bound("div", "missing")
                .with_child(Node::new("span").with_text("Ada"))])
        );
    }

    #[test]
    fn test_map_narrows_context() {
        let tree = bound("article", "post")
            .with_child(bound("h1", "title"))
            .with_child(bound("p", "body"));
        let result = run(
            vec![tree],
            json!({"post": {"title": "Hello", "body": "World"}, "title": "Site"}),
        );

        assert_eq!(
            result,
            elements(vec![Node::new("article")
                .with_child(Node::new("h1").with_text("Hello"))
                .with_child(Node::new("p").with_text("World"))])
        );
    }

    #[test]
    fn test_lookup_does_not_reach_outer_context() {
        let tree = bound("div", "post").with_child(bound("span", "site"));
        let result = run(vec![tree], json!({"post": {"title": "x"}, "site": "Outer"}));

        assert_eq!(
            result,
            elements(vec![Node::new("div").with_child(bound("span", "site"))])
        );
    }

    #[test]
    fn test_list_of_maps() {
        let tree = Node::new("ul").with_child(
            bound("li", "people")
                .with_child(bound("b", "name"))
                .with_text(": ")
                .with_child(bound("i", "role")),
        );
        let result = run(
            vec![tree],
            json!({"people": [
                {"name": "Ada", "role": "engineer"},
                {"name": "Grace", "role": "admiral"}
            ]}),
        );

        let person = |name: &str, role: &str| {
            Node::new("li")
                .with_child(Node::new("b").with_text(name))
                .with_text(": ")
                .with_child(Node::new("i").with_text(role))
        };
        assert_eq!(
            result,
            elements(vec![Node::new("ul")
                .with_child(person("Ada", "engineer"))
                .with_child(person("Grace", "admiral"))])
        );
    }

    #[test]
    fn test_bound_text_replaces_children() {
        let tree = bound("p", "body").with_child(Node::new("em").with_text("placeholder"));
        let result = run(vec![tree], json!({"body": "Real"}));
        assert_eq!(result, elements(vec![Node::new("p").with_text("Real")]));
    }

    #[test]
    fn test_text_with_attributes_merges_data_first() {
        let tree = bound("a", "link").with_attribute("class", "btn");
        let result = run(vec![tree], json!({"link": {"$text": "Home", "@href": "/a"}}));

        assert_eq!(
            result,
            elements(vec![Node::new("a")
                .with_attribute("href", "/a")
                .with_attribute("class", "btn")
                .with_text("Home")])
        );
    }

    #[test]
    fn test_attribute_list_keeps_children() {
        let tree = bound("a", "link").with_text("Go");
        let result = run(vec![tree], json!({"link": {"@href": "/go", "@title": "Tom & Jerry"}}));

        assert_eq!(
            result,
            elements(vec![Node::new("a")
                .with_attribute("href", "/go")
                .with_attribute("title", "Tom &amp; Jerry")
                .with_text("Go")])
        );
    }

    #[test]
    fn test_map_with_attributes() {
        let tree = bound("div", "card").with_child(bound("h2", "title"));
        let result = run(
            vec![tree],
            json!({"card": {"title": "Hi", "@id": "card-1"}}),
        );

        assert_eq!(
            result,
            elements(vec![Node::new("div")
                .with_attribute("id", "card-1")
                .with_child(Node::new("h2").with_text("Hi"))])
        );
    }

    #[test]
    fn test_null_and_opaque_values_clear_context() {
        for value in [json!(null), json!(42), json!(true)] {
            let tree = bound("div", "x").with_child(bound("span", "name"));
            let result = run(vec![tree], json!({"x": value, "name": "Ada"}));

            assert_eq!(
                result,
                elements(vec![Node::new("div").with_child(bound("span", "name"))])
            );
        }
    }

    #[test]
    fn test_empty_list_removes_node() {
        let tree = Node::new("ul").with_child(bound("li", "items"));
        let result = run(vec![tree], json!({"items": []}));
        assert_eq!(result, elements(vec![Node::new("ul")]));
    }

    #[test]
    fn test_keep_marker() {
        let config = BindingConfig {
            strip_marker: false,
            ..BindingConfig::default()
        };
        let tree = vec![Child::Element(bound("p", "body"))];
        let result = transform(&tree, &DataValue::map([("body", "x")]), &config);

        assert_eq!(result, elements(vec![bound("p", "body").with_text("x")]));
    }

    #[test]
    fn test_marker_precedence_follows_config() {
        let config = BindingConfig {
            markers: vec!["itemprop".to_string(), "data-bind".to_string()],
            ..BindingConfig::default()
        };
        let node = Node::new("span")
            .with_attribute("data-bind", "second")
            .with_attribute("itemprop", "first");
        let data = DataValue::map([("first", "1"), ("second", "2")]);

        let result = transform(&[Child::Element(node)], &data, &config);
        assert_eq!(
            result,
            elements(vec![Node::new("span")
                .with_attribute("data-bind", "second")
                .with_text("1")])
        );
    }

    #[test]
    fn test_single_custom_marker() {
        let config = BindingConfig::default().with_marker("itemprop");
        let tree = vec![Child::Element(
            Node::new("div")
                .with_child(Node::new("b").with_attribute("itemprop", "name"))
                .with_child(bound("i", "name")),
        )];

        let result = transform(&tree, &DataValue::map([("name", "Ada")]), &config);
        assert_eq!(
            result,
            elements(vec![Node::new("div")
                .with_child(Node::new("b").with_text("Ada"))
                .with_child(bound("i", "name"))])
        );
    }

    #[test]
    fn test_literal_data_quotes_bound_values() {
        use crate::evaluate::Interpolator;

        let config = BindingConfig::default();
        let transformer = Transformer::new(&config).with_literal_data(&Interpolator);
        let node = bound("a", "link").with_attribute("title", "$title$");
        let data = DataValue::from(json!({
            "link": {"$text": "pay $5", "@href": "?q=$x$"}
        }));

        let result = transformer.transform(&[Child::Element(node)], &data);
        assert_eq!(
            result,
            elements(vec![Node::new("a")
                .with_attribute("href", "?q=$$x$$")
                .with_attribute("title", "$title$")
                .with_text("pay $$5")])
        );
    }

    #[test]
    fn test_transform_node_reports_expansion() {
        let config = BindingConfig::default();
        let transformer = Transformer::new(&config);
        let node = bound("li", "items");

        let single = transformer.transform_node(&node, &DataValue::map([("items", "only")]));
        assert!(matches!(single, Applied::Single(_)));

        let many = transformer.transform_node(
            &node,
            &DataValue::map([("items", DataValue::list(["a", "b"]))]),
        );
        assert!(matches!(many, Applied::Expanded(ref nodes) if nodes.len() == 2));
    }
}
