//! Ashby chart generator - main entry point
//!
//! Loads a fluid or string property table from CSV and renders the
//! corresponding Ashby chart. Output format follows the file extension
//! (`.svg` for vector, `.png` for bitmap).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ashby_charts::config::ChartConfig;
use ashby_charts::pipeline;

#[derive(Parser, Debug)]
#[command(author, version, about = "Acoustic Ashby chart generator", long_about = None)]
struct Cli {
    /// Optional JSON chart configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the fluid Ashby chart (density vs bulk modulus)
    Fluids {
        /// Fluid property CSV file
        #[arg(default_value = "data/fluids.csv")]
        input: PathBuf,

        /// Output chart path
        #[arg(short, long, default_value = "fluid_ashby.svg")]
        output: PathBuf,

        /// Also render density vs sound speed to this path
        #[arg(long)]
        sound_speed: Option<PathBuf>,
    },
    /// Render the string chart (mass per length vs tension)
    Strings {
        /// String property CSV file
        #[arg(default_value = "data/strings.csv")]
        input: PathBuf,

        /// Output chart path
        #[arg(short, long, default_value = "string_ashby.svg")]
        output: PathBuf,

        /// Also render mass per length vs frequency, coloured by
        /// excitation method, to this path
        #[arg(long)]
        frequency: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };

    let summary = match &cli.command {
        Command::Fluids {
            input,
            output,
            sound_speed,
        } => pipeline::run_fluids(input, output, sound_speed.as_deref(), &config)?,
        Command::Strings {
            input,
            output,
            frequency,
        } => pipeline::run_strings(input, output, frequency.as_deref(), &config)?,
    };

    tracing::info!(
        records = summary.records,
        charts = summary.charts.len(),
        "done"
    );
    Ok(())
}
