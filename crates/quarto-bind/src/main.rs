//! quarto-bind - bind data to markup templates from the command line

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::InputArgs;

#[derive(Parser)]
#[command(name = "quarto-bind")]
#[command(version)]
#[command(about = "Bind data to markup templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind data to a template and evaluate its expressions
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Skip expression evaluation
        #[arg(long)]
        no_evaluate: bool,
    },

    /// Bind data to a template without evaluating expressions
    Transform {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quarto_bind=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { input, no_evaluate } => commands::render::execute(&input, no_evaluate),
        Commands::Transform { input } => commands::transform::execute(&input),
    }
}
