//! Musical-instrument string records and their catalog.
//!
//! Primary fields are what a string-set datasheet gives: tension at pitch
//! (kilograms-force), scale length (centimetres) and the sounding note.
//! Everything acoustic (frequency, wave speed, mass per unit length,
//! impedance) is derived on read from those fields.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::acoustics::constants::kgf_to_newtons;
use crate::acoustics::error::{AshbyError, Result};
use crate::acoustics::note::Note;

/// One string of an instrument set.
#[derive(Debug, Clone, PartialEq)]
pub struct StringSpec {
    instrument: String,
    /// Set or model name from the datasheet, when given.
    set: Option<String>,
    string_type: String,
    excitation: Option<String>,
    note: Note,
    tension_kgf: f64,
    scale_m: f64,
}

/// Raw CSV row; tension in kgf and scale in cm, as published.
#[derive(Debug, Deserialize)]
struct StringRow {
    instrument: String,
    set: Option<String>,
    string_type: String,
    excitation: Option<String>,
    note: String,
    tension_kgf: f64,
    scale_cm: f64,
}

impl StringSpec {
    /// Validates and constructs a record.
    ///
    /// Negative tension is a validation failure (the datasheet value is
    /// nonsensical); zero tension or a non-positive scale length is a
    /// domain failure at the derivation boundary.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        instrument: impl Into<String>,
        set: Option<String>,
        string_type: impl Into<String>,
        excitation: Option<String>,
        note: Note,
        tension_kgf: f64,
        scale_cm: f64,
    ) -> Result<Self> {
        if tension_kgf < 0.0 {
            return Err(AshbyError::Validation(format!(
                "tension must be non-negative, got {tension_kgf} kgf"
            )));
        }
        AshbyError::require_positive("tension", tension_kgf)?;
        AshbyError::require_positive("scale length", scale_cm)?;
        Ok(StringSpec {
            instrument: instrument.into(),
            set,
            string_type: string_type.into(),
            excitation,
            note,
            tension_kgf,
            scale_m: scale_cm / 100.0,
        })
    }

    #[must_use]
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    #[must_use]
    pub fn string_type(&self) -> &str {
        &self.string_type
    }

    #[must_use]
    pub fn excitation(&self) -> Option<&str> {
        self.excitation.as_deref()
    }

    #[must_use]
    pub fn note(&self) -> Note {
        self.note
    }

    /// Scale length in metres.
    #[must_use]
    pub fn scale_length(&self) -> f64 {
        self.scale_m
    }

    /// Tension in newtons.
    #[must_use]
    pub fn tension(&self) -> f64 {
        kgf_to_newtons(self.tension_kgf)
    }

    /// Fundamental frequency in hertz under equal temperament.
    #[must_use]
    pub fn frequency_hz(&self) -> f64 {
        self.note.frequency_hz()
    }

    /// Transverse wave speed v = 2·f·L in m/s.
    #[must_use]
    pub fn wave_speed(&self) -> f64 {
        2.0 * self.frequency_hz() * self.scale_m
    }

    /// Mass per unit length μ = T/v² in kg/m.
    #[must_use]
    pub fn mass_per_length(&self) -> f64 {
        let v = self.wave_speed();
        self.tension() / (v * v)
    }

    /// Characteristic impedance √(Tμ) = T/v in kg/s.
    #[must_use]
    pub fn impedance(&self) -> f64 {
        self.tension() / self.wave_speed()
    }

    /// Display label for grouping: set name plus string type when the set
    /// is given, otherwise the instrument name alone.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.set {
            Some(set) => format!("{set} {}", self.string_type),
            None => self.instrument.clone(),
        }
    }
}

/// String records in source order, grouped by their display label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringCatalog {
    strings: Vec<StringSpec>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a delimited table with a header row.
    ///
    /// Required columns: `instrument`, `string_type`, `note`,
    /// `tension_kgf`, `scale_cm`; `set` and `excitation` may be empty.
    /// Note names are parsed in the same pass; any malformed row fails
    /// the whole load.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let mut catalog = StringCatalog::new();
        for (index, result) in csv_reader.deserialize::<StringRow>().enumerate() {
            let row = result.map_err(|e| {
                AshbyError::Validation(format!("string row {}: {e}", index + 1))
            })?;
            let note: Note = row.note.parse()?;
            let spec = StringSpec::new(
                row.instrument,
                row.set,
                row.string_type,
                row.excitation,
                note,
                row.tension_kgf,
                row.scale_cm,
            )?;
            catalog.insert(spec);
        }
        Ok(catalog)
    }

    /// Loads a catalog from a CSV file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv(file)
    }

    /// Appends a record. String keys are not unique in source data, so
    /// no duplicate check applies.
    pub fn insert(&mut self, spec: StringSpec) {
        self.strings.push(spec);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StringSpec> {
        self.strings.iter()
    }

    /// Distinct display labels in first-seen order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for spec in &self.strings {
            let label = spec.label();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    /// Distinct excitation methods in first-seen order. A record with no
    /// method recorded contributes `None` as its own group.
    #[must_use]
    pub fn excitation_methods(&self) -> Vec<Option<String>> {
        let mut methods: Vec<Option<String>> = Vec::new();
        for spec in &self.strings {
            if !methods.contains(&spec.excitation) {
                methods.push(spec.excitation.clone());
            }
        }
        methods
    }

    /// All records carrying the given display label.
    pub fn with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a StringSpec> {
        self.strings.iter().filter(move |s| s.label() == label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::acoustics::note::PitchClass;

    fn low_e() -> StringSpec {
        StringSpec::new(
            "Classical guitar",
            Some("Student nylon".to_string()),
            "nylon",
            Some("plucked".to_string()),
            Note::new(PitchClass::E, 2),
            6.0,
            64.5,
        )
        .unwrap()
    }

    #[test]
    fn derived_quantities_match_reference() {
        let string = low_e();
        assert_relative_eq!(string.tension(), 58.839_9, epsilon = 1.0e-4);
        assert_relative_eq!(string.frequency_hz(), 82.406_889, epsilon = 1.0e-6);
        assert_relative_eq!(string.wave_speed(), 106.304_887, epsilon = 1.0e-4);
        assert_relative_eq!(string.mass_per_length(), 5.206_6e-3, max_relative = 1.0e-3);
    }

    #[test]
    fn wave_speed_round_trips_through_mass_per_length() {
        let string = low_e();
        let mu = string.mass_per_length();
        let recovered = (string.tension() / mu).sqrt();
        assert_relative_eq!(recovered, string.wave_speed(), max_relative = 1.0e-12);
    }

    #[test]
    fn negative_tension_is_a_validation_error() {
        let err = StringSpec::new(
            "Guitar",
            None,
            "steel",
            None,
            Note::new(PitchClass::A, 2),
            -1.0,
            65.0,
        )
        .unwrap_err();
        assert!(matches!(err, AshbyError::Validation(_)));
    }

    #[test]
    fn zero_scale_is_a_domain_error() {
        let err = StringSpec::new(
            "Guitar",
            None,
            "steel",
            None,
            Note::new(PitchClass::A, 2),
            6.0,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, AshbyError::Domain { .. }));
    }

    #[test]
    fn label_falls_back_to_instrument() {
        let with_set = low_e();
        assert_eq!(with_set.label(), "Student nylon nylon");

        let without_set = StringSpec::new(
            "Violin",
            None,
            "gut",
            Some("bowed".to_string()),
            Note::new(PitchClass::G, 3),
            4.5,
            32.5,
        )
        .unwrap();
        assert_eq!(without_set.label(), "Violin");
    }

    #[test]
    fn catalog_parses_notes_and_optionals_in_one_pass() {
        let sample = "\
instrument,set,string_type,excitation,note,tension_kgf,scale_cm
Classical guitar,Student nylon,nylon,plucked,E2,6.0,64.5
Classical guitar,Student nylon,nylon,plucked,A2,6.2,64.5
Violin,,gut,bowed,G3,4.5,32.5
";
        let catalog = StringCatalog::from_csv(sample.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.labels(),
            vec!["Student nylon nylon".to_string(), "Violin".to_string()]
        );
        assert_eq!(catalog.with_label("Student nylon nylon").count(), 2);

        let bad = "\
instrument,set,string_type,excitation,note,tension_kgf,scale_cm
Guitar,,steel,plucked,X9,7.0,65.0
";
        assert!(matches!(
            StringCatalog::from_csv(bad.as_bytes()).unwrap_err(),
            AshbyError::NoteParse { .. }
        ));
    }

    #[test]
    fn excitation_methods_are_grouped_in_first_seen_order() {
        let sample = "\
instrument,set,string_type,excitation,note,tension_kgf,scale_cm
Classical guitar,Student nylon,nylon,plucked,E2,6.0,64.5
Violin,,gut,bowed,G3,4.5,32.5
Violin,,gut,bowed,D4,4.4,32.5
Monochord,,steel,,C4,5.0,100.0
";
        let catalog = StringCatalog::from_csv(sample.as_bytes()).unwrap();
        assert_eq!(
            catalog.excitation_methods(),
            vec![
                Some("plucked".to_string()),
                Some("bowed".to_string()),
                None
            ]
        );
    }

    #[test]
    fn loading_is_idempotent() {
        let sample = "\
instrument,set,string_type,excitation,note,tension_kgf,scale_cm
Classical guitar,Student nylon,nylon,plucked,E2,6.0,64.5
";
        let first = StringCatalog::from_csv(sample.as_bytes()).unwrap();
        let second = StringCatalog::from_csv(sample.as_bytes()).unwrap();
        assert_eq!(first, second);
    }
}
