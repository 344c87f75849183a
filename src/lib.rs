//! Acoustic Ashby charts.
//!
//! Loads tabular physical-property data for fluids and musical-instrument
//! strings, derives the acoustic quantities (bulk modulus, frequency, wave
//! speed, mass per unit length, impedance), and renders log-log Ashby
//! charts with derived-quantity contour overlays.
//!
//! Module organization:
//! - `acoustics`: records, catalogs, derived quantities, contour grids
//! - `chart`: plotters rendering of the charts
//! - `config`: chart settings
//! - `pipeline`: the read → derive → render sequence

pub mod acoustics;
pub mod chart;
pub mod config;
pub mod pipeline;

pub use acoustics::{AshbyError, Result};
