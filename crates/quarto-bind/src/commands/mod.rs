//! Command implementations for quarto-bind
//!
//! Each command module handles the CLI interface and delegates to
//! quarto-databind for the actual work.

pub mod render;
pub mod transform;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use quarto_databind::{BindingConfig, DataValue, Properties};
use tracing::debug;

/// Arguments shared by every command
#[derive(Debug, clap::Args)]
pub struct InputArgs {
    /// Template file
    pub template: PathBuf,

    /// Data file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Binding configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Everything a command needs, loaded from disk
#[derive(Debug)]
pub struct Inputs {
    pub template: String,
    pub data: DataValue,
    pub config: BindingConfig,
}

impl InputArgs {
    pub fn load(&self) -> Result<Inputs> {
        let template = std::fs::read_to_string(&self.template)
            .with_context(|| format!("Failed to read template {}", self.template.display()))?;

        let data = match &self.data {
            Some(path) => load_data(path)?,
            None => DataValue::Map(Properties::new()),
        };

        let config = match &self.config {
            Some(path) => BindingConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => BindingConfig::default(),
        };
        debug!(markers = ?config.markers, "Loaded binding configuration");

        Ok(Inputs {
            template,
            data,
            config,
        })
    }

    pub fn write_output(&self, text: &str) -> Result<()> {
        match &self.output {
            Some(path) => std::fs::write(path, text)
                .with_context(|| format!("Failed to write output {}", path.display())),
            None => {
                print!("{}", text);
                Ok(())
            }
        }
    }
}

/// Supported data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(DataFormat::Json),
            Some("yaml" | "yml") => Ok(DataFormat::Yaml),
            _ => bail!(
                "Unsupported data file {}: expected .json, .yaml or .yml",
                path.display()
            ),
        }
    }
}

pub fn parse_data(text: &str, format: DataFormat) -> Result<DataValue> {
    let data: DataValue = match format {
        DataFormat::Json => serde_json::from_str(text).context("Invalid JSON data")?,
        DataFormat::Yaml => serde_yaml::from_str(text).context("Invalid YAML data")?,
    };
    Ok(data)
}

fn load_data(path: &Path) -> Result<DataValue> {
    let format = DataFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data {}", path.display()))?;
    parse_data(&text, format).with_context(|| format!("Failed to parse data {}", path.display()))
}
