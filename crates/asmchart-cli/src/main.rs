//! asmchart CLI
//!
//! Generates Verilog state machines from ASM chart descriptions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// asmchart - ASM chart to Verilog generator
#[derive(Parser)]
#[command(name = "asmchart")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "asmchart.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new asmchart project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Generate Verilog from chart descriptions
    Generate {
        /// Chart file (defaults to every chart in the charts directory)
        chart: Option<String>,

        /// Output file for a single chart
        #[arg(short, long)]
        output: Option<String>,

        /// Emit node labels as comments
        #[arg(long)]
        comments: bool,
    },

    /// Check a chart without writing any output
    Validate {
        /// Chart file
        chart: String,
    },

    /// Print the parsed chart model
    Inspect {
        /// Chart file
        chart: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path, name } => {
            commands::init::run(&path, name.as_deref()).await?;
        }
        Commands::Generate {
            chart,
            output,
            comments,
        } => {
            commands::generate::run(&cli.config, chart.as_deref(), output.as_deref(), comments)
                .await?;
        }
        Commands::Validate { chart } => {
            commands::validate::run(&cli.config, &chart).await?;
        }
        Commands::Inspect { chart, json } => {
            commands::inspect::run(&chart, json).await?;
        }
    }

    Ok(())
}
