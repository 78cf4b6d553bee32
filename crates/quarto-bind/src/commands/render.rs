//! Render command implementation.
//!
//! Binds data to the template, serializes it, and evaluates any remaining
//! `$variable$` expressions.

use anyhow::{Context, Result};
use tracing::info;

use quarto_databind::Renderer;

use super::InputArgs;

/// Execute the render command
pub fn execute(args: &InputArgs, no_evaluate: bool) -> Result<()> {
    let mut inputs = args.load()?;
    if no_evaluate {
        inputs.config.evaluate = false;
    }

    info!("Rendering template: {}", args.template.display());

    let output = Renderer::new(inputs.config)
        .render(&inputs.template, &inputs.data)
        .with_context(|| format!("Failed to render {}", args.template.display()))?;

    args.write_output(&output)
}
