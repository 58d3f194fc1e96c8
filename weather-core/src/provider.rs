use crate::{
    error::{Result, WeatherError},
    model::{GeocodingResult, WeatherResponse},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

pub const MIN_FORECAST_DAYS: i64 = 1;
pub const MAX_FORECAST_DAYS: i64 = 7;

/// Up to this many candidates are requested from the geocoding endpoint.
pub const GEOCODING_CANDIDATES: usize = 10;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Provider-ranked places matching `query`. Empty when nothing matches.
    async fn geocode_candidates(&self, query: &str) -> Result<Vec<GeocodingResult>>;

    /// Current conditions plus hourly and daily series. `days` is clamped to 1..=7.
    async fn forecast(&self, lat: f64, lon: f64, days: i64) -> Result<WeatherResponse>;

    /// Best-ranked match for `query`.
    async fn geocode(&self, query: &str) -> Result<GeocodingResult> {
        self.geocode_candidates(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(format!("city not found: {query}")))
    }
}

pub fn clamp_days(days: i64) -> i64 {
    days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS)
}
