//! Domain core: property records, derived quantities and contour grids.
//!
//! Structure:
//! - `constants.rs`: physical constants and unit conversions
//! - `note.rs`: Scientific Pitch Notation and frequency derivation
//! - `fluid.rs`: fluid records and catalog
//! - `string.rs`: instrument-string records and catalog
//! - `grid.rs`: contour/derived-quantity grids
//! - `frame.rs`: catalog → DataFrame conversion
//! - `error.rs`: error types

pub mod constants;
pub mod error;
pub mod frame;
pub mod fluid;
pub mod grid;
pub mod note;
pub mod string;

// Re-exports for convenience
pub use error::{AshbyError, Result};
pub use fluid::{Fluid, FluidCatalog, Phase};
pub use grid::{ContourGrid, ContourLevels, DerivedQuantity};
pub use note::{Note, PitchClass};
pub use string::{StringCatalog, StringSpec};
