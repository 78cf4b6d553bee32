//! Transform command implementation.
//!
//! Binds data to the template and prints the resulting markup, leaving
//! embedded expressions untouched.

use anyhow::{Context, Result};
use tracing::info;

use quarto_databind::Renderer;

use super::InputArgs;

/// Execute the transform command
pub fn execute(args: &InputArgs) -> Result<()> {
    let inputs = args.load()?;

    info!("Transforming template: {}", args.template.display());

    let output = Renderer::new(inputs.config)
        .transform_source(&inputs.template, &inputs.data)
        .with_context(|| format!("Failed to transform {}", args.template.display()))?;

    args.write_output(&output)
}
