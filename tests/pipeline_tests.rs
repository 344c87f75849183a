//! End-to-end pipeline tests over the bundled sample tables.

use std::path::{Path, PathBuf};

use ashby_charts::acoustics::AshbyError;
use ashby_charts::config::ChartConfig;
use ashby_charts::pipeline;

fn data_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn svg_config() -> ChartConfig {
    // Small grids keep the test fast; SVG avoids any font dependency.
    ChartConfig {
        width: 640,
        height: 480,
        grid_samples: 20,
        ..ChartConfig::default()
    }
}

#[test]
fn fluid_pipeline_renders_both_charts() {
    let dir = tempfile::tempdir().unwrap();
    let ashby = dir.path().join("fluid_ashby.svg");
    let speed = dir.path().join("sound_speed.svg");

    let summary = pipeline::run_fluids(
        &data_file("fluids.csv"),
        &ashby,
        Some(speed.as_path()),
        &svg_config(),
    )
    .unwrap();

    assert_eq!(summary.records, 22);
    assert_eq!(summary.charts.len(), 2);
    for chart in &summary.charts {
        let metadata = std::fs::metadata(chart).unwrap();
        assert!(metadata.len() > 0, "{} is empty", chart.display());
    }
}

#[test]
fn string_pipeline_renders_the_chart() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("strings.svg");

    let summary =
        pipeline::run_strings(&data_file("strings.csv"), &output, None, &svg_config()).unwrap();

    assert_eq!(summary.records, 14);
    assert!(output.exists());
}

#[test]
fn string_frequency_chart_groups_by_excitation_method() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("strings.svg");
    let frequency = dir.path().join("frequency.svg");

    let summary = pipeline::run_strings(
        &data_file("strings.csv"),
        &output,
        Some(frequency.as_path()),
        &svg_config(),
    )
    .unwrap();

    assert_eq!(summary.charts.len(), 2);
    // The legend carries one entry per excitation method.
    let svg = std::fs::read_to_string(&frequency).unwrap();
    assert!(svg.contains("plucked"), "no plucked series in the legend");
    assert!(svg.contains("bowed"), "no bowed series in the legend");
}

#[test]
fn missing_highlight_surfaces_as_lookup_error_at_render_time() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("fluid_ashby.svg");

    let mut config = svg_config();
    config.highlights = vec!["Unobtainium".to_string()];

    let err = pipeline::run_fluids(&data_file("fluids.csv"), &output, None, &config)
        .unwrap_err();
    let lookup = err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<AshbyError>(), Some(AshbyError::Lookup(_))));
    assert!(lookup, "expected a lookup error, got: {err:#}");
}

#[test]
fn missing_input_file_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.svg");
    assert!(
        pipeline::run_fluids(&data_file("no_such.csv"), &output, None, &svg_config()).is_err()
    );
}
