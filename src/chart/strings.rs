//! String-set charts.
//!
//! The main chart is mass per unit length vs tension on log-log axes,
//! one line-joined series per set label, with wave-speed and impedance
//! contours. Joining the points within a set makes the near-constant
//! tension across a set read as an almost horizontal run.
//!
//! The companion chart is mass per unit length vs frequency coloured by
//! excitation method; plucked and bowed strings cluster into two
//! regions there.

use std::path::Path;

use anyhow::Context;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::combinators::LogCoord;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::acoustics::grid::{ContourGrid, DerivedQuantity};
use crate::acoustics::string::{StringCatalog, StringSpec};
use crate::chart::{decade_axis, grid_span_levels, padded_log_range};
use crate::config::ChartConfig;

/// Half-decade contour spacing: string data rarely spans more than a
/// couple of decades, so whole decades would give one or two lines.
const STRING_CONTOUR_STEP: f64 = 0.5;

/// Renders the string Ashby chart for a catalog.
pub fn render_string_chart(
    catalog: &StringCatalog,
    config: &ChartConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let size = (config.width, config.height);
    if path.extension().and_then(|e| e.to_str()) == Some("svg") {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw(&root, catalog, config)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw(&root, catalog, config)
    }
    .with_context(|| format!("rendering string chart to {}", path.display()))
}

/// Renders mass per unit length vs frequency, one series per excitation
/// method.
pub fn render_string_frequency_chart(
    catalog: &StringCatalog,
    config: &ChartConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let size = (config.width, config.height);
    if path.extension().and_then(|e| e.to_str()) == Some("svg") {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_frequency(&root, catalog, config)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_frequency(&root, catalog, config)
    }
    .with_context(|| format!("rendering string frequency chart to {}", path.display()))
}

fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    catalog: &StringCatalog,
    config: &ChartConfig,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_log_range(catalog.iter().map(StringSpec::mass_per_length));
    let (y_min, y_max) = padded_log_range(catalog.iter().map(StringSpec::tension));

    let mut chart = ChartBuilder::on(root)
        .caption("String Ashby chart", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Mass per unit length [kg/m]")
        .y_desc("Tension [N]")
        .draw()?;

    let x_axis = decade_axis(x_min, x_max, config.grid_samples);
    let y_axis = decade_axis(y_min, y_max, config.grid_samples);
    let impedance =
        ContourGrid::evaluate(DerivedQuantity::Impedance, x_axis.clone(), y_axis.clone())?;
    let wave_speed = ContourGrid::evaluate(DerivedQuantity::WaveSpeed, x_axis, y_axis)?;

    let z_levels = grid_span_levels(impedance.values(), STRING_CONTOUR_STEP)?;
    let c_levels = grid_span_levels(wave_speed.values(), STRING_CONTOUR_STEP)?;
    draw_contour_set(&mut chart, &impedance, &z_levels.levels(), BLACK, "log10 z [kg/s]")?;
    draw_contour_set(&mut chart, &wave_speed, &c_levels.levels(), BLUE, "log10 v [m/s]")?;

    for (index, label) in catalog.labels().into_iter().enumerate() {
        let color = Palette99::pick(index);
        let size = config.point_size;
        let points: Vec<(f64, f64)> = catalog
            .with_label(&label)
            .map(|s| (s.mass_per_length(), s.tension()))
            .collect();
        chart.draw_series(LineSeries::new(points.clone(), &color))?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), size, color.filled())),
            )?
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_frequency<DB>(
    root: &DrawingArea<DB, Shift>,
    catalog: &StringCatalog,
    config: &ChartConfig,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_log_range(catalog.iter().map(StringSpec::frequency_hz));
    let (y_min, y_max) = padded_log_range(catalog.iter().map(StringSpec::mass_per_length));

    let mut chart = ChartBuilder::on(root)
        .caption("Mass per unit length vs frequency", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Frequency [Hz]")
        .y_desc("Mass per unit length [kg/m]")
        .draw()?;

    for (index, method) in catalog.excitation_methods().into_iter().enumerate() {
        let color = Palette99::pick(index);
        let size = config.point_size;
        chart
            .draw_series(
                catalog
                    .iter()
                    .filter(|s| s.excitation() == method.as_deref())
                    .map(|s| {
                        Circle::new((s.frequency_hz(), s.mass_per_length()), size, color.filled())
                    }),
            )?
            .label(method.as_deref().unwrap_or("unspecified"))
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_contour_set<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<LogCoord<f64>, LogCoord<f64>>>,
    grid: &ContourGrid,
    levels: &[f64],
    color: RGBColor,
    label: &str,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut labelled = false;
    for &level in levels {
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
