/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render pipeline: parse, bind, serialize, evaluate.
//!
//! Each stage runs once, in order. Errors from the parser, serializer or
//! evaluator are returned as they are; binding itself cannot fail.

use quarto_markup::Child;
use tracing::debug;

use crate::config::BindingConfig;
use crate::error::RenderResult;
use crate::evaluate::{ExpressionEvaluator, Interpolator};
use crate::transform::Transformer;
use crate::value::DataValue;

/// Converts between markup source and node trees.
pub trait MarkupSyntax {
    fn parse(&self, source: &str) -> quarto_markup::Result<Vec<Child>>;

    fn serialize(&self, tree: &[Child]) -> quarto_markup::Result<String>;
}

/// The quick-xml based markup syntax from `quarto-markup`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlMarkup;

impl MarkupSyntax for XmlMarkup {
    fn parse(&self, source: &str) -> quarto_markup::Result<Vec<Child>> {
        quarto_markup::parse(source)
    }

    fn serialize(&self, tree: &[Child]) -> quarto_markup::Result<String> {
        quarto_markup::serialize(tree)
    }
}

/// Renders markup templates against data.
///
/// # Example
///
/// ```rust
/// use quarto_databind::{BindingConfig, DataValue, Renderer};
///
/// let renderer = Renderer::new(BindingConfig::default());
/// let data = DataValue::map([
///     ("title", DataValue::text("Menu")),
///     ("items", DataValue::list(["Home", "About"])),
/// ]);
///
/// let html = renderer
///     .render(r#"<nav title="$title$"><a data-bind="items"></a></nav>"#, &data)
///     .unwrap();
/// assert_eq!(html, r#"<nav title="Menu"><a>Home</a><a>About</a></nav>"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer<M = XmlMarkup, E = Interpolator> {
    config: BindingConfig,
    markup: M,
    evaluator: E,
}

impl Renderer {
    /// A renderer using the default markup syntax and evaluator.
    pub fn new(config: BindingConfig) -> Self {
        Self {
            config,
            markup: XmlMarkup,
            evaluator: Interpolator,
        }
    }
}

impl<M: MarkupSyntax, E: ExpressionEvaluator> Renderer<M, E> {
    /// Replace the markup syntax.
    pub fn with_markup<M2: MarkupSyntax>(self, markup: M2) -> Renderer<M2, E> {
        Renderer {
            config: self.config,
            markup,
            evaluator: self.evaluator,
        }
    }

    /// Replace the expression evaluator.
    pub fn with_evaluator<E2: ExpressionEvaluator>(self, evaluator: E2) -> Renderer<M, E2> {
        Renderer {
            config: self.config,
            markup: self.markup,
            evaluator,
        }
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Render `source` against `data`.
    ///
    /// The evaluation stage is skipped when the configuration turns it off.
    /// Only the template's own expressions are evaluated; text and
    /// attributes that come from `data` are written as literals.
    pub fn render(&self, source: &str, data: &DataValue) -> RenderResult<String> {
        if !self.config.evaluate {
            return self.transform_source(source, data);
        }

        let transformer = Transformer::new(&self.config).with_literal_data(&self.evaluator);
        let markup = self.bind(source, data, transformer)?;

        debug!(bytes = markup.len(), "Evaluating expressions");
        Ok(self.evaluator.evaluate(&markup, data)?)
    }

    /// Parse, bind and serialize `source` without evaluating expressions.
    pub fn transform_source(&self, source: &str, data: &DataValue) -> RenderResult<String> {
        self.bind(source, data, Transformer::new(&self.config))
    }

    fn bind(
        &self,
        source: &str,
        data: &DataValue,
        transformer: Transformer<'_>,
    ) -> RenderResult<String> {
        let tree = self.markup.parse(source)?;
        debug!(nodes = tree.len(), "Parsed template");

        let transformed = transformer.transform(&tree, data);
        Ok(self.markup.serialize(&transformed)?)
    }
}

/// Render `source` against `data` with the default configuration.
pub fn render(source: &str, data: &DataValue) -> RenderResult<String> {
    Renderer::new(BindingConfig::default()).render(source, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvaluateError, RenderError};
    use serde_json::json;

    #[test]
    fn test_render_binds_and_evaluates() {
        let data = DataValue::from(json!({"user": {"name": "Ada"}, "greeting": "Hi"}));
        let html = render(
            r#"<p data-bind="user">$greeting$, <b data-bind="name"></b></p>"#,
            &data,
        )
        .unwrap();

        assert_eq!(html, "<p>Hi, <b>Ada</b></p>");
    }

    #[test]
    fn test_transform_source_leaves_expressions() {
        let renderer = Renderer::new(BindingConfig::default());
        let data = DataValue::from(json!({"name": "Ada"}));

        let markup = renderer
            .transform_source(r#"<p>$name$ <b data-bind="name"/></p>"#, &data)
            .unwrap();
        assert_eq!(markup, "<p>$name$ <b>Ada</b></p>");
    }

    #[test]
    fn test_evaluate_disabled() {
        let config = BindingConfig {
            evaluate: false,
            ..BindingConfig::default()
        };
        let html = Renderer::new(config)
            .render("<p>${broken</p>", &DataValue::Null)
            .unwrap();
        assert_eq!(html, "<p>${broken</p>");
    }

    #[test]
    fn test_parse_errors_propagate() {
        let err = render("<div><span></div>", &DataValue::Null).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Markup(quarto_markup::Error::MismatchedEndTag { .. })
        ));
    }

    #[test]
    fn test_evaluation_errors_propagate() {
        let err = render("<p>${oops</p>", &DataValue::Null).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Evaluation(EvaluateError::Unterminated { .. })
        ));
    }

    #[test]
    fn test_bound_data_is_not_evaluated() {
        let data = DataValue::from(json!({
            "comment": "price ${",
            "leak": {"$text": "see $secret$", "@title": "$secret$"},
            "secret": "s3"
        }));

        let html = render(
            r#"<p data-bind="comment"></p><a data-bind="leak" class="$secret$"></a>"#,
            &data,
        )
        .unwrap();
        assert_eq!(
            html,
            r#"<p>price ${</p><a title="$secret$" class="s3">see $secret$</a>"#
        );
    }

    #[test]
    fn test_transform_source_keeps_bound_dollars() {
        let data = DataValue::from(json!({"cost": "$5"}));
        let markup = Renderer::new(BindingConfig::default())
            .transform_source(r#"<b data-bind="cost"></b>"#, &data)
            .unwrap();
        assert_eq!(markup, "<b>$5</b>");
    }

    struct Shout;

    impl ExpressionEvaluator for Shout {
        fn evaluate(&self, markup: &str, _data: &DataValue) -> Result<String, EvaluateError> {
            Ok(markup.to_uppercase())
        }
    }

    #[test]
    fn test_custom_evaluator() {
        let renderer = Renderer::new(BindingConfig::default()).with_evaluator(Shout);
        let html = renderer
            .render(r#"<p data-bind="x"></p>"#, &DataValue::map([("x", "quiet")]))
            .unwrap();
        assert_eq!(html, "<P>QUIET</P>");
    }
}
