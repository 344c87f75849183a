//! Scientific Pitch Notation and equal-temperament frequency derivation.
//!
//! A note name is a letter class (`C`, `C#`, `D`, ... `B`) followed by an
//! octave number, e.g. `"E2"` or `"A4"`. Frequencies are derived under
//! twelve-tone equal temperament referenced to A4 = 440 Hz.

use std::fmt;
use std::str::FromStr;

use crate::acoustics::constants::{A4_FREQUENCY_HZ, SEMITONES_PER_OCTAVE};
use crate::acoustics::error::AshbyError;

/// The twelve pitch classes of an octave, ordered from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// All pitch classes in ascending order from C.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        Self::ALL.iter().copied()
    }

    /// Semitone index within the octave, with C = 0.
    #[must_use]
    pub fn semitones_from_c(self) -> i32 {
        self as i32
    }

    /// Signed semitone distance of this letter class from A.
    #[must_use]
    pub fn semitones_from_a(self) -> i32 {
        self.semitones_from_c() - PitchClass::A.semitones_from_c()
    }

    fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

/// A named pitch: letter class plus octave number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub class: PitchClass,
    pub octave: i32,
}

impl Note {
    #[must_use]
    pub fn new(class: PitchClass, octave: i32) -> Self {
        Note { class, octave }
    }

    /// Signed semitone offset from A4.
    #[must_use]
    pub fn semitones_from_a4(self) -> i32 {
        self.class.semitones_from_a() + (self.octave - 4) * SEMITONES_PER_OCTAVE
    }

    /// Equal-temperament frequency in hertz, referenced to A4 = 440 Hz.
    #[must_use]
    pub fn frequency_hz(self) -> f64 {
        A4_FREQUENCY_HZ * 2f64.powf(f64::from(self.semitones_from_a4()) / 12.0)
    }
}

impl FromStr for Note {
    type Err = AshbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: &str| AshbyError::NoteParse {
            name: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(|| parse_err("empty note name"))?;
        let rest = chars.as_str();

        let (sharp, octave_str) = match rest.strip_prefix('#') {
            Some(tail) => (true, tail),
            None => (false, rest),
        };

        let class = match (letter.to_ascii_uppercase(), sharp) {
            ('C', false) => PitchClass::C,
            ('C', true) => PitchClass::CSharp,
            ('D', false) => PitchClass::D,
            ('D', true) => PitchClass::DSharp,
            ('E', false) => PitchClass::E,
            ('F', false) => PitchClass::F,
            ('F', true) => PitchClass::FSharp,
            ('G', false) => PitchClass::G,
            ('G', true) => PitchClass::GSharp,
            ('A', false) => PitchClass::A,
            ('A', true) => PitchClass::ASharp,
            ('B', false) => PitchClass::B,
            ('E', true) | ('B', true) => return Err(parse_err("no sharp for this letter")),
            _ => return Err(parse_err("unknown letter class")),
        };

        let octave: i32 = octave_str
            .parse()
            .map_err(|_| parse_err("octave is not an integer"))?;

        Ok(Note { class, octave })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

/// Parses a batch of note names in one pass, stopping at the first failure.
pub fn parse_notes<I, S>(names: I) -> Result<Vec<Note>, AshbyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| n.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn a4_is_exactly_440() {
        let a4: Note = "A4".parse().unwrap();
        assert_eq!(a4.frequency_hz(), 440.0);
    }

    #[test]
    fn a3_is_exactly_220() {
        let a3: Note = "A3".parse().unwrap();
        assert_eq!(a3.frequency_hz(), 220.0);
    }

    #[test]
    fn e2_matches_reference() {
        let e2: Note = "E2".parse().unwrap();
        assert_eq!(e2.semitones_from_a4(), -29);
        assert_relative_eq!(e2.frequency_hz(), 82.406_889, epsilon = 1.0e-6);
    }

    #[test]
    fn frequency_is_monotone_over_the_note_space() {
        let mut previous = 0.0;
        for octave in 0..=8 {
            for class in PitchClass::all() {
                let f = Note::new(class, octave).frequency_hz();
                assert!(f > previous, "{class:?}{octave} not above predecessor");
                previous = f;
            }
        }
    }

    #[test]
    fn sharps_and_whitespace_parse() {
        let fs: Note = " F#3 ".parse().unwrap();
        assert_eq!(fs, Note::new(PitchClass::FSharp, 3));
        assert_eq!(fs.to_string(), "F#3");
    }

    #[test]
    fn malformed_names_are_rejected() {
        for bad in ["", "H2", "E#2", "A", "A4x", "#4", "B#1"] {
            assert!(bad.parse::<Note>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn batch_parse_stops_on_first_failure() {
        let ok = parse_notes(["E2", "A2", "D3"]).unwrap();
        assert_eq!(ok.len(), 3);
        assert!(parse_notes(["E2", "??", "D3"]).is_err());
    }
}
