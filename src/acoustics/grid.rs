//! Contour grids for derived acoustic quantities.
//!
//! An Ashby chart overlays contours of a derived quantity on a log-log
//! scatter of two primary properties. The grid here is the outer product
//! of two axis ranges (independent on x, dependent on y) with the derived
//! quantity evaluated in every cell. On logarithmic axes the contours of
//! both wave speed and impedance are straight lines, so decade-spaced
//! levels of log₁₀(quantity) come out evenly spaced.

use ndarray::Array2;

use crate::acoustics::error::{AshbyError, Result};

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Generates `n` log₁₀-spaced samples from 10^`start_decade` to
/// 10^`stop_decade`, matching the axis ranges used on the charts.
#[must_use]
pub fn logspace(start_decade: f64, stop_decade: f64, n: usize) -> Vec<f64> {
    linspace(start_decade, stop_decade, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Derived quantity evaluated over the (independent, dependent) grid.
///
/// For fluids the independent axis is density and the dependent axis is
/// bulk modulus; for strings, mass per unit length and tension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedQuantity {
    /// √(dependent / independent): sound speed √(B/ρ) or wave speed √(T/μ).
    WaveSpeed,
    /// √(dependent × independent): √(Bρ) or √(Tμ).
    Impedance,
}

impl DerivedQuantity {
    /// Evaluates the quantity for one cell. Inputs are assumed positive;
    /// the grid constructor enforces that before calling here.
    #[must_use]
    pub fn evaluate(self, dependent: f64, independent: f64) -> f64 {
        match self {
            DerivedQuantity::WaveSpeed => (dependent / independent).sqrt(),
            DerivedQuantity::Impedance => (dependent * independent).sqrt(),
        }
    }
}

/// A derived quantity evaluated over the outer product of two axes.
///
/// `values[[j, i]]` holds the quantity at (`x[i]`, `y[j]`).
#[derive(Debug, Clone, PartialEq)]
pub struct ContourGrid {
    x: Vec<f64>,
    y: Vec<f64>,
    values: Array2<f64>,
}

impl ContourGrid {
    /// Builds the grid for `quantity` over `x` (independent) and `y`
    /// (dependent). Every axis sample must be strictly positive, since
    /// both quantities pass through a square root.
    pub fn evaluate(quantity: DerivedQuantity, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.is_empty() || y.is_empty() {
            return Err(AshbyError::Validation(
                "contour axes must be non-empty".to_string(),
            ));
        }
        for &v in &x {
            AshbyError::require_positive("independent axis sample", v)?;
        }
        for &v in &y {
            AshbyError::require_positive("dependent axis sample", v)?;
        }

        let values = Array2::from_shape_fn((y.len(), x.len()), |(j, i)| {
            quantity.evaluate(y[j], x[i])
        });
        Ok(ContourGrid { x, y, values })
    }

    /// Independent-axis samples.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Dependent-axis samples.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Derived values, one row per dependent-axis sample.
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// log₁₀ of the derived values, for decade-spaced contour levels.
    #[must_use]
    pub fn log10_values(&self) -> Array2<f64> {
        self.values.mapv(f64::log10)
    }

    /// Extracts the contour polyline where log₁₀(value) equals `level`.
    ///
    /// Both derived quantities are strictly monotone in the dependent
    /// axis for a fixed independent value, so each grid column crosses a
    /// level at most once. The crossing is located by linear
    /// interpolation in (log value, log y); columns that never reach the
    /// level contribute no point.
    #[must_use]
    pub fn trace_level(&self, level: f64) -> Vec<(f64, f64)> {
        let logs = self.log10_values();
        let mut points = Vec::new();

        for (i, &x) in self.x.iter().enumerate() {
            for j in 0..self.y.len().saturating_sub(1) {
                let lo = logs[[j, i]];
                let hi = logs[[j + 1, i]];
                let (min, max) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                if level < min || level > max || lo == hi {
                    continue;
                }
                let t = (level - lo) / (hi - lo);
                let log_y = self.y[j].log10() + t * (self.y[j + 1].log10() - self.y[j].log10());
                points.push((x, 10f64.powf(log_y)));
                break;
            }
        }
        points
    }
}

/// Evenly spaced contour levels in log₁₀ of the derived quantity.
///
/// Construction is validated so `levels()` always terminates: the range
/// is ordered and the step strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLevels {
    start: f64,
    end: f64,
    step: f64,
}

impl ContourLevels {
    /// Levels from `start` to `end` inclusive in increments of `step`.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(AshbyError::Validation(format!(
                "contour step must be positive, got {step}"
            )));
        }
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(AshbyError::Validation(format!(
                "contour range [{start}, {end}] is not ordered"
            )));
        }
        Ok(ContourLevels { start, end, step })
    }

    /// Whole-decade levels from `start` to `end` inclusive.
    #[must_use]
    pub fn decades(start: f64, end: f64) -> Self {
        ContourLevels {
            start: start.min(end),
            end: start.max(end),
            step: 1.0,
        }
    }

    /// Snaps the levels to two reference values, e.g. the impedances of
    /// air and water: the endpoints are exactly log₁₀ of the references
    /// and the step spans them, so a contour is drawn through each
    /// reference record and nowhere else. Order does not matter; equal
    /// references collapse to a single level.
    pub fn spanning(a: f64, b: f64) -> Result<Self> {
        AshbyError::require_positive("reference value", a)?;
        AshbyError::require_positive("reference value", b)?;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let start = lo.log10();
        let end = hi.log10();
        let span = end - start;
        Ok(ContourLevels {
            start,
            end,
            step: if span > 0.0 { span } else { 1.0 },
        })
    }

    /// First level, in log₁₀ of the quantity.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Last level, in log₁₀ of the quantity.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Spacing between levels.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The individual levels, ascending.
    #[must_use]
    pub fn levels(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let mut level = self.start;
        // Tolerance absorbs accumulated float error at the top level.
        while level <= self.end + 1.0e-9 {
            out.push(level);
            level += self.step;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn logspace_spans_the_decades() {
        let v = logspace(-1.0, 2.0, 4);
        assert_relative_eq!(v[0], 0.1, epsilon = 1.0e-12);
        assert_relative_eq!(v[1], 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(v[3], 100.0, epsilon = 1.0e-10);
    }

    #[test]
    fn minimal_impedance_grid_matches_direct_computation() {
        let grid = ContourGrid::evaluate(
            DerivedQuantity::Impedance,
            vec![1.0, 10.0],
            vec![100.0, 1000.0],
        )
        .unwrap();

        for (j, &y) in grid.y().iter().enumerate() {
            for (i, &x) in grid.x().iter().enumerate() {
                assert_relative_eq!(grid.values()[[j, i]], (x * y).sqrt(), epsilon = 1.0e-12);
            }
        }
    }

    #[test]
    fn wave_speed_grid_matches_direct_computation() {
        let grid =
            ContourGrid::evaluate(DerivedQuantity::WaveSpeed, vec![1.2], vec![141_178.8]).unwrap();
        assert_relative_eq!(grid.values()[[0, 0]], 343.0, epsilon = 1.0e-9);
    }

    #[test]
    fn non_positive_axis_sample_is_a_domain_error() {
        let err = ContourGrid::evaluate(
            DerivedQuantity::Impedance,
            vec![0.0, 10.0],
            vec![100.0],
        )
        .unwrap_err();
        assert!(matches!(err, AshbyError::Domain { .. }));

        let err = ContourGrid::evaluate(
            DerivedQuantity::WaveSpeed,
            vec![1.0],
            vec![-5.0],
        )
        .unwrap_err();
        assert!(matches!(err, AshbyError::Domain { .. }));
    }

    #[test]
    fn levels_snap_to_reference_pair() {
        // Air z ≈ 411.6 rayl, water z ≈ 1.478e6 rayl. The contours run
        // through the references themselves, not through round decades.
        let levels = ContourLevels::spanning(1.478e6, 411.6).unwrap();
        let values = levels.levels();
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], 411.6f64.log10(), epsilon = 1.0e-12);
        assert_relative_eq!(values[1], 1.478e6f64.log10(), epsilon = 1.0e-9);
    }

    #[test]
    fn equal_references_collapse_to_one_level() {
        let levels = ContourLevels::spanning(411.6, 411.6).unwrap();
        assert_eq!(levels.levels(), vec![411.6f64.log10()]);
    }

    #[test]
    fn spanning_rejects_non_positive_references() {
        assert!(ContourLevels::spanning(0.0, 10.0).is_err());
    }

    #[test]
    fn decade_levels_are_whole_decades() {
        let levels = ContourLevels::decades(2.0, 5.0);
        assert_eq!(levels.levels(), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn invalid_ranges_are_rejected_at_construction() {
        assert!(ContourLevels::new(0.0, 3.0, 0.0).is_err());
        assert!(ContourLevels::new(0.0, 3.0, -0.5).is_err());
        assert!(ContourLevels::new(3.0, 0.0, 1.0).is_err());
        assert!(ContourLevels::new(0.0, 3.0, f64::NAN).is_err());
    }

    #[test]
    fn traced_level_lies_on_the_analytic_contour() {
        let grid = ContourGrid::evaluate(
            DerivedQuantity::Impedance,
            logspace(-1.0, 3.0, 40),
            logspace(4.0, 10.0, 40),
        )
        .unwrap();

        let level = 4.0; // z = 10^4
        let points = grid.trace_level(level);
        assert!(!points.is_empty());
        for (x, y) in points {
            // log10 z = (log10 y + log10 x) / 2  =>  y = 10^(2L) / x
            let expected = 10f64.powf(2.0 * level) / x;
            assert_relative_eq!(y, expected, max_relative = 1.0e-2);
        }
    }
}
