//! Route exposure integration (§4.D).
//!
//! `delay_code == 0` (Path A) looks up PM2.5 directly for every sample
//! point. `delay_code > 0` (Path B) builds one weather feature vector from
//! source/destination conditions, fetches PM2.5 per sample to fill `IPM`,
//! then submits the whole batch to the predictor in a single call — mirroring
//! the upstream service's collect-then-batch-predict shape rather than the
//! older per-sample predict call it has since replaced.
//!
//! Both paths fetch AQI for their sample points with bounded concurrency,
//! the async equivalent of the teacher's `Semaphore`-gated subnet scanner.

use crate::adapters::{AirQuality, PM25Predictor, Weather};
use crate::error::{CoreError, Diagnostics};
use crate::types::{DelayCode, FeatureVector, SamplePoint};
use crate::weather::build_feature_vector;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Maximum number of concurrent AQI lookups in flight for a single route.
const MAX_CONCURRENT_AQI_LOOKUPS: usize = 8;

/// Fetches PM2.5 for every sample point with at most
/// `MAX_CONCURRENT_AQI_LOOKUPS` requests in flight, preserving sample
/// order in the returned vector so callers can zip it back against dwell
/// times.
async fn fetch_pm25_bounded<A: AirQuality>(aqi: &A, samples: &[SamplePoint]) -> Vec<Option<f64>> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_AQI_LOOKUPS));

    let fetches = samples.iter().map(|sample| {
        let semaphore = semaphore.clone();
        let coordinate = sample.coordinate;
        async move {
            let _permit = semaphore.acquire().await;
            aqi.pm25_at(coordinate).await.ok()
        }
    });

    join_all(fetches).await
}

/// Integrates PM2.5 exposure over a candidate's sample points.
///
/// For the delayed path (§4.D Path B), the base feature vector's weather
/// observations are taken at the route's first and last *sample* points
/// (not the request's source/destination), matching the upstream service's
/// `routePoints[0]` / `routePoints[len-1]` weather lookups.
///
/// Returns `CoreError::NotFound` only when every sample's AQI lookup
/// failed; individual lookup failures are dropped from the sum and
/// recorded as warnings in the returned `Diagnostics`.
pub async fn integrate_exposure<A, W, P>(
    samples: &[SamplePoint],
    delay_code: DelayCode,
    aqi: &A,
    weather: &W,
    predictor: &P,
) -> Result<(f64, Diagnostics), CoreError>
where
    A: AirQuality,
    W: Weather,
    P: PM25Predictor,
{
    let mut diagnostics = Diagnostics::default();

    if samples.is_empty() {
        diagnostics.warn("no sample points were produced for this candidate");
        return Ok((0.0, diagnostics));
    }

    if delay_code.is_now() {
        let readings = fetch_pm25_bounded(aqi, samples).await;
        let mut total_exposure = 0.0;
        let mut hits = 0usize;

        for (sample, reading) in samples.iter().zip(readings.iter()) {
            match reading {
                Some(pm25) => {
                    total_exposure += pm25 * sample.dwell_s / 3600.0;
                    hits += 1;
                }
                None => diagnostics.warn("AQI lookup failed for a sample point".to_string()),
            }
        }

        if hits == 0 {
            return Err(CoreError::NotFound("no AQI data available along this route".into()));
        }
        return Ok((total_exposure, diagnostics));
    }

    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Err(CoreError::Internal("sample list became empty after non-empty check".into()));
    };
    let (source_weather, destination_weather) =
        tokio::join!(weather.observe(first.coordinate), weather.observe(last.coordinate));
    let source_weather = source_weather
        .map_err(|e| CoreError::Provider { provider: "weather", status: None, message: e.to_string() })?;
    let destination_weather = destination_weather
        .map_err(|e| CoreError::Provider { provider: "weather", status: None, message: e.to_string() })?;

    let base_vector = build_feature_vector(&source_weather, &destination_weather, delay_code)
        .ok_or_else(|| CoreError::Internal("forecast slot missing from weather response".into()))?;

    let readings = fetch_pm25_bounded(aqi, samples).await;

    let mut feature_vectors: Vec<FeatureVector> = Vec::new();
    let mut dwell_times: Vec<f64> = Vec::new();

    for (sample, reading) in samples.iter().zip(readings.iter()) {
        match reading {
            Some(pm25) => {
                let mut fv = base_vector;
                fv.ipm = *pm25;
                feature_vectors.push(fv);
                dwell_times.push(sample.dwell_s);
            }
            None => diagnostics.warn("AQI lookup failed for a sample point".to_string()),
        }
    }

    if feature_vectors.is_empty() {
        return Err(CoreError::NotFound("no AQI data available along this route".into()));
    }

    let predictions = predictor
        .predict(&feature_vectors)
        .await
        .map_err(|e| CoreError::Provider { provider: "predictor", status: None, message: e.to_string() })?;

    let total_exposure = predictions
        .iter()
        .zip(dwell_times.iter())
        .map(|(pm25, dwell_s)| pm25 * dwell_s / 3600.0)
        .sum();

    Ok((total_exposure, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;
    use crate::weather::{WeatherObservation, WeatherReading};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeAqi {
        value: f64,
        fail_every: Option<usize>,
        calls: AtomicUsize,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("fake AQI failure")]
    struct FakeAqiError;

    #[async_trait]
    impl AirQuality for FakeAqi {
        type Error = FakeAqiError;
        async fn pm25_at(&self, _coordinate: Coordinate) -> Result<f64, Self::Error> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(n) = self.fail_every {
                if call % n == 0 {
                    return Err(FakeAqiError);
                }
            }
            Ok(self.value)
        }
    }

    struct FakeWeather;

    #[derive(Debug, thiserror::Error)]
    #[error("fake weather failure")]
    struct FakeWeatherError;

    #[async_trait]
    impl Weather for FakeWeather {
        type Error = FakeWeatherError;
        async fn observe(&self, _coordinate: Coordinate) -> Result<WeatherObservation, Self::Error> {
            let reading = WeatherReading { temp_c: 20.0, dew_point_c: 15.0, wind_deg: 100.0, wind_speed: 2.0 };
            Ok(WeatherObservation { current: reading, hourly: vec![reading; 7] })
        }
    }

    struct FakePredictor;

    #[derive(Debug, thiserror::Error)]
    #[error("fake predictor failure")]
    struct FakePredictorError;

    #[async_trait]
    impl PM25Predictor for FakePredictor {
        type Error = FakePredictorError;
        async fn predict(&self, features: &[FeatureVector]) -> Result<Vec<f64>, Self::Error> {
            Ok(features.iter().map(|f| f.ipm * 2.0).collect())
        }
    }

    fn samples(n: usize) -> Vec<SamplePoint> {
        (0..n)
            .map(|i| SamplePoint { coordinate: Coordinate::new(i as f64, i as f64), dwell_s: 3600.0 })
            .collect()
    }

    #[tokio::test]
    async fn delay_zero_sums_direct_pm25() {
        let aqi = FakeAqi { value: 10.0, fail_every: None, calls: AtomicUsize::new(0) };
        let weather = FakeWeather;
        let predictor = FakePredictor;
        let (exposure, diag) = integrate_exposure(
            &samples(3),
            DelayCode::NOW,
            &aqi,
            &weather,
            &predictor,
        )
        .await
        .unwrap();
        assert!((exposure - 30.0).abs() < 1e-9);
        assert!(diag.is_clean());
    }

    #[tokio::test]
    async fn delay_zero_all_lookups_failing_is_not_found() {
        let aqi = FakeAqi { value: 10.0, fail_every: Some(1), calls: AtomicUsize::new(0) };
        let weather = FakeWeather;
        let predictor = FakePredictor;
        let result = integrate_exposure(
            &samples(2),
            DelayCode::NOW,
            &aqi,
            &weather,
            &predictor,
        )
        .await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delayed_path_uses_batch_predictor() {
        let aqi = FakeAqi { value: 5.0, fail_every: None, calls: AtomicUsize::new(0) };
        let weather = FakeWeather;
        let predictor = FakePredictor;
        let (exposure, diag) = integrate_exposure(
            &samples(2),
            DelayCode(2),
            &aqi,
            &weather,
            &predictor,
        )
        .await
        .unwrap();
        // FakePredictor doubles IPM (5.0 -> 10.0), dwell 3600s -> *1 hour.
        assert!((exposure - 20.0).abs() < 1e-9);
        assert!(diag.is_clean());
    }

    #[tokio::test]
    async fn empty_samples_returns_zero_with_warning() {
        let aqi = FakeAqi { value: 5.0, fail_every: None, calls: AtomicUsize::new(0) };
        let weather = FakeWeather;
        let predictor = FakePredictor;
        let (exposure, diag) = integrate_exposure(
            &[],
            DelayCode::NOW,
            &aqi,
            &weather,
            &predictor,
        )
        .await
        .unwrap();
        assert_eq!(exposure, 0.0);
        assert!(!diag.is_clean());
    }
}
