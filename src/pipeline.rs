//! Shared chart generation pipeline.
//!
//! The pipeline is the read → derive → render sequence used by the
//! binary and by the integration tests:
//! 1. Load the source table into a catalog (validation happens here)
//! 2. Flatten to a DataFrame and log a few interrogations
//! 3. Build contour grids and render the charts
//! 4. Return a summary of what was produced

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::acoustics::frame::{fluids_to_dataframe, strings_to_dataframe, top_by_phase};
use crate::acoustics::fluid::FluidCatalog;
use crate::acoustics::string::StringCatalog;
use crate::chart::{
    render_fluid_ashby_chart, render_sound_speed_chart, render_string_chart,
    render_string_frequency_chart,
};
use crate::config::ChartConfig;

/// What a pipeline run loaded and produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: usize,
    pub charts: Vec<PathBuf>,
}

/// Loads a fluid table and renders the Ashby chart, plus the sound-speed
/// chart when `sound_speed_output` is given.
pub fn run_fluids(
    input: &Path,
    output: &Path,
    sound_speed_output: Option<&Path>,
    config: &ChartConfig,
) -> anyhow::Result<RunSummary> {
    info!(input = %input.display(), "loading fluid table");
    let catalog = FluidCatalog::from_path(input)?;
    info!(records = catalog.len(), "fluid table loaded");

    let df = fluids_to_dataframe(&catalog)?;
    debug!(?df, "fluid dataframe");
    match top_by_phase(&df, "gas", "density", 5) {
        Ok(densest) => debug!(?densest, "five densest gases"),
        Err(error) => warn!(%error, "densest-gas query failed"),
    }

    let mut charts = Vec::new();
    render_fluid_ashby_chart(&catalog, config, output)?;
    info!(chart = %output.display(), "rendered fluid Ashby chart");
    charts.push(output.to_path_buf());

    if let Some(path) = sound_speed_output {
        render_sound_speed_chart(&catalog, config, path)?;
        info!(chart = %path.display(), "rendered sound-speed chart");
        charts.push(path.to_path_buf());
    }

    Ok(RunSummary {
        records: catalog.len(),
        charts,
    })
}

/// Loads a string table and renders the string chart, plus the
/// frequency chart when `frequency_output` is given.
pub fn run_strings(
    input: &Path,
    output: &Path,
    frequency_output: Option<&Path>,
    config: &ChartConfig,
) -> anyhow::Result<RunSummary> {
    info!(input = %input.display(), "loading string table");
    let catalog = StringCatalog::from_path(input)?;
    info!(
        records = catalog.len(),
        sets = catalog.labels().len(),
        "string table loaded"
    );

    let df = strings_to_dataframe(&catalog)?;
    debug!(?df, "string dataframe");

    let mut charts = Vec::new();
    render_string_chart(&catalog, config, output)?;
    info!(chart = %output.display(), "rendered string chart");
    charts.push(output.to_path_buf());

    if let Some(path) = frequency_output {
        render_string_frequency_chart(&catalog, config, path)?;
        info!(chart = %path.display(), "rendered string frequency chart");
        charts.push(path.to_path_buf());
    }

    Ok(RunSummary {
        records: catalog.len(),
        charts,
    })
}
