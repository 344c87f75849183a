//! Fluid property records and the keyed fluid catalog.
//!
//! Each record stores the primary properties (density, sound speed, phase)
//! as measured at NTP. Derived quantities (bulk modulus, characteristic
//! impedance) are computed accessors so they can never go stale if a
//! primary field is edited.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::acoustics::error::{AshbyError, Result};

/// Phase of a substance at NTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Gas,
    Liquid,
}

impl Phase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phase::Gas => "gas",
            Phase::Liquid => "liquid",
        }
    }
}

/// One substance with its primary acoustic properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Fluid {
    name: String,
    density: f64,
    sound_speed: f64,
    phase: Phase,
}

/// Raw CSV row as it appears in the source table.
#[derive(Debug, Deserialize)]
struct FluidRow {
    name: String,
    density: f64,
    sound_speed: f64,
    phase: Phase,
}

impl Fluid {
    /// Validates and constructs a record. Density and sound speed must be
    /// strictly positive; both feed square roots downstream.
    pub fn new(
        name: impl Into<String>,
        density: f64,
        sound_speed: f64,
        phase: Phase,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AshbyError::Validation("fluid name is empty".to_string()));
        }
        AshbyError::require_positive("density", density)?;
        AshbyError::require_positive("sound speed", sound_speed)?;
        Ok(Fluid {
            name,
            density,
            sound_speed,
            phase,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Density ρ in kg/m³.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Sound speed c in m/s.
    #[must_use]
    pub fn sound_speed(&self) -> f64 {
        self.sound_speed
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Isentropic bulk modulus B = ρc² in Pa.
    #[must_use]
    pub fn bulk_modulus(&self) -> f64 {
        self.density * self.sound_speed * self.sound_speed
    }

    /// Characteristic specific acoustic impedance z = ρc = √(Bρ) in rayl.
    #[must_use]
    pub fn impedance(&self) -> f64 {
        self.density * self.sound_speed
    }
}

/// Fluid records keyed by substance name, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluidCatalog {
    fluids: Vec<Fluid>,
}

impl FluidCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a delimited table with a header row.
    ///
    /// Required columns: `name`, `density`, `sound_speed`, `phase`.
    /// A malformed row fails the whole load; nothing is skipped silently.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let mut catalog = FluidCatalog::new();
        for (index, result) in csv_reader.deserialize::<FluidRow>().enumerate() {
            let row = result.map_err(|e| {
                AshbyError::Validation(format!("fluid row {}: {e}", index + 1))
            })?;
            let fluid = Fluid::new(row.name, row.density, row.sound_speed, row.phase)?;
            catalog.insert(fluid)?;
        }
        Ok(catalog)
    }

    /// Loads a catalog from a CSV file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv(file)
    }

    /// Appends a record; duplicate substance names are rejected.
    pub fn insert(&mut self, fluid: Fluid) -> Result<()> {
        if self.fluids.iter().any(|f| f.name == fluid.name) {
            return Err(AshbyError::Validation(format!(
                "duplicate fluid name {:?}",
                fluid.name
            )));
        }
        self.fluids.push(fluid);
        Ok(())
    }

    /// Looks up a substance by name.
    pub fn get(&self, name: &str) -> Result<&Fluid> {
        self.fluids
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| AshbyError::Lookup(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fluid> {
        self.fluids.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fluids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fluids.is_empty()
    }
}
