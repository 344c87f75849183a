//! Catalog to DataFrame conversion.
//!
//! The charting side consumes columnar data, so the keyed catalogs are
//! flattened into polars DataFrames with every primary and derived column
//! materialized. Table interrogations (the "five densest gases" kind of
//! question) run through the lazy API on these frames.

use polars::prelude::*;

use crate::acoustics::error::Result;
use crate::acoustics::fluid::FluidCatalog;
use crate::acoustics::string::StringCatalog;

/// Flattens a fluid catalog into a DataFrame, derived columns included.
pub fn fluids_to_dataframe(catalog: &FluidCatalog) -> Result<DataFrame> {
    let names: Vec<&str> = catalog.iter().map(|f| f.name()).collect();
    let densities: Vec<f64> = catalog.iter().map(|f| f.density()).collect();
    let sound_speeds: Vec<f64> = catalog.iter().map(|f| f.sound_speed()).collect();
    let phases: Vec<&str> = catalog.iter().map(|f| f.phase().label()).collect();
    let moduli: Vec<f64> = catalog.iter().map(|f| f.bulk_modulus()).collect();
    let impedances: Vec<f64> = catalog.iter().map(|f| f.impedance()).collect();

    let df = df!(
        "name" => names,
        "density" => densities,
        "sound_speed" => sound_speeds,
        "phase" => phases,
        "bulk_modulus" => moduli,
        "impedance" => impedances
    )?;
    Ok(df)
}

/// Flattens a string catalog into a DataFrame, derived columns included.
pub fn strings_to_dataframe(catalog: &StringCatalog) -> Result<DataFrame> {
    let instruments: Vec<&str> = catalog.iter().map(|s| s.instrument()).collect();
    let labels: Vec<String> = catalog.iter().map(|s| s.label()).collect();
    let string_types: Vec<&str> = catalog.iter().map(|s| s.string_type()).collect();
    let excitations: Vec<Option<&str>> = catalog.iter().map(|s| s.excitation()).collect();
    let notes: Vec<String> = catalog.iter().map(|s| s.note().to_string()).collect();
    let frequencies: Vec<f64> = catalog.iter().map(|s| s.frequency_hz()).collect();
    let tensions: Vec<f64> = catalog.iter().map(|s| s.tension()).collect();
    let scales: Vec<f64> = catalog.iter().map(|s| s.scale_length()).collect();
    let wave_speeds: Vec<f64> = catalog.iter().map(|s| s.wave_speed()).collect();
    let masses: Vec<f64> = catalog.iter().map(|s| s.mass_per_length()).collect();
    let impedances: Vec<f64> = catalog.iter().map(|s| s.impedance()).collect();

    let df = df!(
        "instrument" => instruments,
        "label" => labels,
        "string_type" => string_types,
        "excitation" => excitations,
        "note" => notes,
        "frequency_hz" => frequencies,
        "tension_n" => tensions,
        "scale_m" => scales,
        "wave_speed" => wave_speeds,
        "mass_per_length" => masses,
        "impedance" => impedances
    )?;
    Ok(df)
}

/// Top `n` rows of one phase, ordered by `column` descending.
///
/// `top_by_phase(df, "gas", "density", 5)` answers "which are the five
/// densest gases".
pub fn top_by_phase(df: &DataFrame, phase: &str, column: &str, n: u32) -> Result<DataFrame> {
    let out = df
        .clone()
        .lazy()
        .filter(col("phase").eq(lit(phase)))
        .sort(
            [column],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .limit(n)
        .collect()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acoustics::fluid::{Fluid, Phase};

    fn sample_catalog() -> FluidCatalog {
        let mut catalog = FluidCatalog::new();
        for (name, rho, c, phase) in [
            ("Air", 1.2, 343.0, Phase::Gas),
            ("Argon", 1.784, 319.0, Phase::Gas),
            ("Helium", 0.1786, 1007.0, Phase::Gas),
            ("Water", 998.0, 1481.0, Phase::Liquid),
        ] {
            catalog.insert(Fluid::new(name, rho, c, phase).unwrap()).unwrap();
        }
        catalog
    }

    #[test]
    fn fluid_frame_has_all_columns() {
        let df = fluids_to_dataframe(&sample_catalog()).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(
            df.get_column_names_str(),
            vec![
                "name",
                "density",
                "sound_speed",
                "phase",
                "bulk_modulus",
                "impedance"
            ]
        );
    }

    #[test]
    fn densest_gas_query() {
        let df = fluids_to_dataframe(&sample_catalog()).unwrap();
        let top = top_by_phase(&df, "gas", "density", 2).unwrap();
        assert_eq!(top.height(), 2);
        let names = top
            .column("name")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap();
        assert_eq!(names.get(0), Some("Argon"));
        assert_eq!(names.get(1), Some("Air"));
    }
}
