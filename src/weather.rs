//! Weather observation model and feature-vector construction (§4.C).

use crate::geo::relative_humidity;
use crate::types::{DelayCode, FeatureVector};
use serde::{Deserialize, Serialize};

/// A single weather reading: current conditions or one hourly forecast slot.
/// Field names mirror the upstream provider's current/hourly payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temp_c: f64,
    pub dew_point_c: f64,
    pub wind_deg: f64,
    pub wind_speed: f64,
}

impl WeatherReading {
    /// Relative humidity derived from this reading's temperature and dew point.
    pub fn relative_humidity(&self) -> f64 {
        relative_humidity(self.dew_point_c, self.temp_c)
    }
}

/// Current conditions plus an indexed hourly forecast, for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub current: WeatherReading,
    /// `hourly[0]` is the forecast for one hour from now, `hourly[1]` for
    /// two hours from now, and so on, matching the provider's array layout.
    pub hourly: Vec<WeatherReading>,
}

impl WeatherObservation {
    /// The forecast reading at 1-indexed hour `slot`, if present.
    ///
    /// The upstream feature builder indexes `Hourly[slot]` directly (a
    /// 0-indexed Go slice), so `slot` here is that same raw index, not an
    /// hour count: `forecast_slot(1)` is "one hour from now".
    pub fn forecast_slot(&self, slot: usize) -> Option<&WeatherReading> {
        self.hourly.get(slot)
    }
}

/// Builds the predictor's feature vector from source/destination weather,
/// leaving `ipm`/`delay_code` for the caller to fill in per sample point.
///
/// The averaging shape depends on the delay code (§4.C):
/// - `delay_code == 0`: three-way average of current conditions and the
///   `hourly[1]` slot from both locations. This mirrors the upstream
///   service's literal indexing — `hourly[1]`, not `hourly[0]` — even
///   though the code comment there calls it a "30 min delay".
/// - `1..=6`: average of the `hourly[delay_code]` slot from both locations.
/// - anything else: average of current conditions from both locations
///   (also used as the `ITEMP`/`IRH`/`IWD`/`IWS` "now" fields regardless of
///   delay code).
pub fn build_feature_vector(
    source: &WeatherObservation,
    destination: &WeatherObservation,
    delay_code: DelayCode,
) -> Option<FeatureVector> {
    let itemp = (source.current.temp_c + destination.current.temp_c) / 2.0;
    let irh = (source.current.relative_humidity() + destination.current.relative_humidity()) / 2.0;
    let iwd = (source.current.wind_deg + destination.current.wind_deg) / 2.0;
    let iws = (source.current.wind_speed + destination.current.wind_speed) / 2.0;

    let (ftemp, frh, fwd, fws) = match delay_code.0 {
        0 => {
            let s = source.forecast_slot(1)?;
            let d = destination.forecast_slot(1)?;
            (
                (itemp + s.temp_c + d.temp_c) / 3.0,
                (irh + s.relative_humidity() + d.relative_humidity()) / 3.0,
                (iwd + s.wind_deg + d.wind_deg) / 3.0,
                (iws + s.wind_speed + d.wind_speed) / 3.0,
            )
        }
        slot @ 1..=6 => {
            let s = source.forecast_slot(slot as usize)?;
            let d = destination.forecast_slot(slot as usize)?;
            (
                (s.temp_c + d.temp_c) / 2.0,
                (s.relative_humidity() + d.relative_humidity()) / 2.0,
                (s.wind_deg + d.wind_deg) / 2.0,
                (s.wind_speed + d.wind_speed) / 2.0,
            )
        }
        _ => (itemp, irh, iwd, iws),
    };

    Some(FeatureVector {
        itemp,
        irh,
        iwd,
        iws,
        ipm: 0.0,
        ftemp,
        frh,
        fwd,
        fws,
        delay_code: delay_code.0,
    })
}
