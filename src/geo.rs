//! Geodetic and vehicle helpers
//!
//! Small, dependency-free formulas shared by the weather-feature builder and
//! the energy estimator: relative humidity from dew point, and default
//! vehicle mass per travel mode.

use crate::types::Mode;

/// Relative humidity (%) from dew point and air temperature, both in Celsius.
///
/// `RH = 100 * exp(17.625*d / (243.04+d)) / exp(17.625*t / (243.04+t))`
///
/// This is the Magnus-formula approximation used throughout the upstream
/// weather feature pipeline; it is only accurate for temperatures roughly in
/// the -45..60 C range but that covers every surface weather observation the
/// core will see.
pub fn relative_humidity(dew_point_c: f64, temp_c: f64) -> f64 {
    let numerator = (17.625 * dew_point_c / (243.04 + dew_point_c)).exp();
    let denominator = (17.625 * temp_c / (243.04 + temp_c)).exp();
    100.0 * (numerator / denominator)
}

/// Default vehicle mass in kilograms for a travel mode, used when the
/// request does not specify one (`vehicle_mass == 0`).
pub fn mass_for_mode(mode: Mode) -> f64 {
    match mode {
        Mode::Car => 1800.0,
        Mode::Truck => 8000.0,
        Mode::Scooter => 150.0,
    }
}
