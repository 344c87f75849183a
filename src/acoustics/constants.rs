//! Physical constants used across the crate.
//!
//! Gravity and pressure follow the conventional exact values (ISO 80000);
//! the tuning reference is concert pitch A4 = 440 Hz.

/// Standard acceleration of gravity g₀ in m/s².
/// Exact conventional value; used for every kilogram-force → newton
/// conversion in the crate.
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Equal-temperament tuning reference: frequency of A4 in hertz.
pub const A4_FREQUENCY_HZ: f64 = 440.0;

/// Semitones per octave in twelve-tone equal temperament.
pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Standard atmospheric pressure in pascals (1 atm).
pub const ATMOSPHERIC_PRESSURE_PA: f64 = 101_325.0;

/// Heat-capacity ratio γ for an ideal monatomic gas.
pub const GAMMA_MONATOMIC: f64 = 5.0 / 3.0;

/// Heat-capacity ratio γ for an ideal diatomic gas.
pub const GAMMA_DIATOMIC: f64 = 7.0 / 5.0;

/// Converts a tension given in kilograms-force to newtons.
#[inline]
#[must_use]
pub fn kgf_to_newtons(kgf: f64) -> f64 {
    kgf * STANDARD_GRAVITY
}

/// Ideal-gas sound speed √(γP/ρ) for density `rho` (kg/m³) at pressure
/// `pressure` (Pa). Callers are responsible for `rho > 0`.
#[inline]
#[must_use]
pub fn ideal_gas_sound_speed(gamma: f64, pressure: f64, rho: f64) -> f64 {
    (gamma * pressure / rho).sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn kgf_conversion_matches_reference() {
        assert_relative_eq!(kgf_to_newtons(6.0), 58.8399, epsilon = 1.0e-10);
    }

    #[test]
    fn diatomic_sound_speed_near_air() {
        // Air at NTP is close to an ideal diatomic gas.
        let c = ideal_gas_sound_speed(GAMMA_DIATOMIC, ATMOSPHERIC_PRESSURE_PA, 1.204);
        assert_relative_eq!(c, 343.2, max_relative = 5.0e-3);
    }
}
