//! Fluid charts: the acoustic Ashby chart (density vs bulk modulus with
//! impedance and sound-speed contours) and the density vs sound-speed
//! chart with ideal-gas reference curves.

use std::path::Path;

use anyhow::Context;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::combinators::LogCoord;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::acoustics::constants::{
    ideal_gas_sound_speed, ATMOSPHERIC_PRESSURE_PA, GAMMA_DIATOMIC, GAMMA_MONATOMIC,
};
use crate::acoustics::fluid::{Fluid, FluidCatalog, Phase};
use crate::acoustics::grid::{ContourGrid, ContourLevels, DerivedQuantity};
use crate::chart::{decade_axis, grid_span_levels, padded_log_range};
use crate::config::ChartConfig;

const GAS_COLOR: RGBColor = RED;
const LIQUID_COLOR: RGBColor = GREEN;
const IMPEDANCE_COLOR: RGBColor = BLACK;
const WAVE_SPEED_COLOR: RGBColor = BLUE;

/// Renders the acoustic Ashby chart for a fluid catalog.
///
/// Contour levels are snapped to the impedance span of the first two
/// configured highlight substances; a missing highlight name surfaces as
/// a lookup error here, not at load time.
pub fn render_fluid_ashby_chart(
    catalog: &FluidCatalog,
    config: &ChartConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let size = (config.width, config.height);
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_ashby(&root, catalog, config)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_ashby(&root, catalog, config)
    }
    .with_context(|| format!("rendering fluid Ashby chart to {}", path.display()))
}

/// Renders density vs sound speed, optionally with the ideal-gas curves
/// c = √(γP/ρ) for monatomic and diatomic gases at NTP.
pub fn render_sound_speed_chart(
    catalog: &FluidCatalog,
    config: &ChartConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let size = (config.width, config.height);
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_sound_speed(&root, catalog, config)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_sound_speed(&root, catalog, config)
    }
    .with_context(|| format!("rendering sound-speed chart to {}", path.display()))
}

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("svg")
}

fn phase_color(phase: Phase) -> RGBColor {
    match phase {
        Phase::Gas => GAS_COLOR,
        Phase::Liquid => LIQUID_COLOR,
    }
}

/// Resolves the configured highlight substances, failing on absent keys.
fn resolve_highlights<'a>(
    catalog: &'a FluidCatalog,
    config: &ChartConfig,
) -> crate::acoustics::Result<Vec<&'a Fluid>> {
    config
        .highlights
        .iter()
        .map(|name| catalog.get(name))
        .collect()
}

fn draw_ashby<DB>(
    root: &DrawingArea<DB, Shift>,
    catalog: &FluidCatalog,
    config: &ChartConfig,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_log_range(catalog.iter().map(Fluid::density));
    let (y_min, y_max) = padded_log_range(catalog.iter().map(Fluid::bulk_modulus));

    let mut chart = ChartBuilder::on(root)
        .caption("Acoustic Ashby chart", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Density [kg/m^3]")
        .y_desc("Bulk modulus [Pa]")
        .draw()?;

    // Contour grids over the whole decades around the data.
    let x_axis = decade_axis(x_min, x_max, config.grid_samples);
    let y_axis = decade_axis(y_min, y_max, config.grid_samples);
    let impedance =
        ContourGrid::evaluate(DerivedQuantity::Impedance, x_axis.clone(), y_axis.clone())?;
    let wave_speed = ContourGrid::evaluate(DerivedQuantity::WaveSpeed, x_axis, y_axis)?;

    let highlights = resolve_highlights(catalog, config)?;
    let z_levels = match highlights.as_slice() {
        [a, b, ..] => ContourLevels::spanning(a.impedance(), b.impedance())?,
        _ => grid_span_levels(impedance.values(), 1.0)?,
    };
    let c_levels = match highlights.as_slice() {
        [a, b, ..] => ContourLevels::spanning(a.sound_speed(), b.sound_speed())?,
        _ => grid_span_levels(wave_speed.values(), 1.0)?,
    };

    draw_contours(&mut chart, &impedance, &z_levels, IMPEDANCE_COLOR, "log10 z [rayl]")?;
    draw_contours(&mut chart, &wave_speed, &c_levels, WAVE_SPEED_COLOR, "log10 c [m/s]")?;

    scatter_by_phase(&mut chart, catalog, config, Fluid::bulk_modulus)?;
    highlight_points(&mut chart, &highlights, config, Fluid::bulk_modulus)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_sound_speed<DB>(
    root: &DrawingArea<DB, Shift>,
    catalog: &FluidCatalog,
    config: &ChartConfig,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_log_range(catalog.iter().map(Fluid::density));
    let (y_min, y_max) = padded_log_range(catalog.iter().map(Fluid::sound_speed));

    let mut chart = ChartBuilder::on(root)
        .caption("Sound speed vs density", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Density [kg/m^3]")
        .y_desc("Sound speed [m/s]")
        .draw()?;

    if config.ideal_gas_curves {
        let gas_densities: Vec<f64> = catalog
            .iter()
            .filter(|f| f.phase() == Phase::Gas)
            .map(Fluid::density)
            .collect();
        if !gas_densities.is_empty() {
            let (rho_min, rho_max) = padded_log_range(gas_densities.into_iter());
            let rho = decade_axis(rho_min, rho_max, config.grid_samples);
            for (gamma, color, label) in [
                (GAMMA_MONATOMIC, MAGENTA, "Ideal monatomic gas"),
                (GAMMA_DIATOMIC, CYAN, "Ideal diatomic gas"),
            ] {
                let curve: Vec<(f64, f64)> = rho
                    .iter()
                    .map(|&r| (r, ideal_gas_sound_speed(gamma, ATMOSPHERIC_PRESSURE_PA, r)))
                    .filter(|&(_, c)| c > y_min && c < y_max)
                    .collect();
                chart
                    .draw_series(LineSeries::new(curve, &color))?
                    .label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], color)
                    });
            }
        }
    }

    scatter_by_phase(&mut chart, catalog, config, Fluid::sound_speed)?;
    let highlights = resolve_highlights(catalog, config)?;
    highlight_points(&mut chart, &highlights, config, Fluid::sound_speed)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

type LogChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<LogCoord<f64>, LogCoord<f64>>>;

fn scatter_by_phase<DB>(
    chart: &mut LogChart<'_, DB>,
    catalog: &FluidCatalog,
    config: &ChartConfig,
    y_value: impl Fn(&Fluid) -> f64,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    for phase in [Phase::Gas, Phase::Liquid] {
        let color = phase_color(phase);
        let size = config.point_size;
        chart
            .draw_series(
                catalog
                    .iter()
                    .filter(|f| f.phase() == phase)
                    .map(|f| Circle::new((f.density(), y_value(f)), size, color.filled())),
            )?
            .label(phase.label())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }
    Ok(())
}

fn highlight_points<DB>(
    chart: &mut LogChart<'_, DB>,
    highlights: &[&Fluid],
    config: &ChartConfig,
    y_value: impl Fn(&Fluid) -> f64,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    for &fluid in highlights {
        let coord = (fluid.density(), y_value(fluid));
        chart
            .draw_series(std::iter::once(Circle::new(
                coord,
                config.point_size + 3,
                BLACK,
            )))?
            .label(fluid.name().to_string())
            .legend(|(x, y)| Circle::new((x, y), 6, BLACK));
    }
    Ok(())
}

fn draw_contours<DB>(
    chart: &mut LogChart<'_, DB>,
    grid: &ContourGrid,
    levels: &ContourLevels,
    color: RGBColor,
    label: &str,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    // One legend entry per quantity, not per level.
    let mut labelled = false;
    for level in levels.levels() {
        let points = grid.trace_level(level);
        if points.len() < 2 {
            continue;
        }
        let series = chart.draw_series(LineSeries::new(points, &color.mix(0.6)))?;
        if !labelled {
            series.label(label.to_string()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color)
            });
            labelled = true;
        }
    }
    Ok(())
}
