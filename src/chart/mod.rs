//! Chart rendering.
//!
//! Everything here sits on the far side of the data/rendering boundary:
//! the acoustics modules produce validated numeric data and these modules
//! hand it to plotters. Output format follows the file extension (`.svg`
//! renders as vector, anything else as a bitmap).
//!
//! Structure:
//! - `fluids.rs`: fluid Ashby chart and density/sound-speed chart
//! - `strings.rs`: string-set chart and frequency chart

pub mod fluids;
pub mod strings;

use ndarray::Array2;

use crate::acoustics::error::{AshbyError, Result};
use crate::acoustics::grid::{logspace, ContourLevels};

pub use fluids::{render_fluid_ashby_chart, render_sound_speed_chart};
pub use strings::{render_string_chart, render_string_frequency_chart};

/// Pads a positive data range by half a decade either side so points do
/// not sit on the chart border.
pub(crate) fn padded_log_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    (
        10f64.powf(min.log10() - 0.5),
        10f64.powf(max.log10() + 0.5),
    )
}

/// Log-spaced axis samples covering the whole decades around a data range.
pub(crate) fn decade_axis(min: f64, max: f64, samples: usize) -> Vec<f64> {
    logspace(min.log10().floor(), max.log10().ceil(), samples)
}

/// Contour levels covering the whole decades a grid contains, used when
/// no highlight pair is available to snap to.
pub(crate) fn grid_span_levels(values: &Array2<f64>, step: f64) -> Result<ContourLevels> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    AshbyError::require_positive("grid minimum", min)?;
    ContourLevels::new(min.log10().floor(), max.log10().ceil(), step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_adds_half_a_decade() {
        let (lo, hi) = padded_log_range([1.0, 100.0].into_iter());
        assert!(lo < 1.0 && lo > 0.1);
        assert!(hi > 100.0 && hi < 1000.0);
    }

    #[test]
    fn decade_axis_covers_the_data() {
        let axis = decade_axis(1.2, 998.0, 10);
        assert!(axis.first().copied().unwrap() <= 1.2);
        assert!(axis.last().copied().unwrap() >= 998.0);
    }
}
