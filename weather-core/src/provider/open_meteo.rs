use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Settings,
    error::{Result, WeatherError},
    model::{GeocodingResponse, GeocodingResult, WeatherResponse},
    provider::{GEOCODING_CANDIDATES, WeatherProvider, clamp_days},
};

const HOURLY_PARAMS: &str = "temperature_2m,relativehumidity_2m";
const DAILY_PARAMS: &str = "temperature_2m_max,temperature_2m_min,weathercode,precipitation_sum";

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            http: Client::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.geocoding_url, &settings.forecast_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!(endpoint, ?query, "sending request");

        let res = self
            .http
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed {
                endpoint: endpoint.to_string(),
                cause: e.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::RequestFailed {
            endpoint: endpoint.to_string(),
            cause: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(WeatherError::RequestFailed {
                endpoint: endpoint.to_string(),
                cause: format!("status {}: {}", status, truncate_body(&body)),
            });
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::MalformedResponse {
            endpoint: endpoint.to_string(),
            cause: e.to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode_candidates(&self, query: &str) -> Result<Vec<GeocodingResult>> {
        let parsed: GeocodingResponse = self
            .get_json(
                &self.geocoding_url,
                &[
                    ("name", query.to_string()),
                    ("count", GEOCODING_CANDIDATES.to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        debug!(query, matches = parsed.results.len(), "geocoding finished");
        Ok(parsed.results)
    }

    async fn forecast(&self, lat: f64, lon: f64, days: i64) -> Result<WeatherResponse> {
        let days = clamp_days(days);

        self.get_json(
            &self.forecast_url,
            &[
                ("latitude", format!("{lat:.4}")),
                ("longitude", format!("{lon:.4}")),
                ("current_weather", "true".to_string()),
                ("hourly", HOURLY_PARAMS.to_string()),
                ("daily", DAILY_PARAMS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", days.to_string()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn provider_for(server: &MockServer) -> OpenMeteoProvider {
        OpenMeteoProvider::new(
            format!("{}/v1/search", server.uri()),
            format!("{}/v1/forecast", server.uri()),
        )
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 41.0,
            "longitude": 29.0,
            "current_weather": {
                "temperature": 18.4, "windspeed": 11.2, "winddirection": 45.0,
                "weathercode": 2, "time": "2026-10-17T14:00"
            },
            "hourly": {
                "time": ["2026-10-17T00:00"],
                "temperature_2m": [15.0],
                "relativehumidity_2m": [72]
            },
            "daily": {
                "time": ["2026-10-17"],
                "temperature_2m_max": [19.0],
                "temperature_2m_min": [12.0],
                "weathercode": [2],
                "precipitation_sum": [0.0]
            }
        })
    }

    #[tokio::test]
    async fn geocode_requests_ten_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Istanbul"))
            .and(query_param("count", "10"))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"name": "Istanbul", "latitude": 41.01384, "longitude": 28.94966,
                     "country": "Türkiye", "admin1": "Istanbul"},
                    {"name": "Istanbul", "latitude": 10.0, "longitude": 20.0}
                ]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let candidates = provider.geocode_candidates("Istanbul").await.unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].country, "");

        let best = provider.geocode("Istanbul").await.unwrap();
        assert_eq!(best.country, "Türkiye");
    }

    #[tokio::test]
    async fn geocode_without_results_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generationtime_ms": 0.3})),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).geocode("Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(_)));
    }

    #[tokio::test]
    async fn forecast_clamps_days_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("forecast_days", "7"))
            .and(query_param("latitude", "41.0138"))
            .and(query_param("current_weather", "true"))
            .and(query_param("timezone", "auto"))
            .and(query_param("daily", DAILY_PARAMS))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let weather = provider_for(&server)
            .forecast(41.01384, 28.94966, 10)
            .await
            .unwrap();

        assert_eq!(weather.current_weather.weathercode, 2);
        assert_eq!(weather.daily.temperature_max, vec![19.0]);
    }

    #[tokio::test]
    async fn forecast_raises_non_positive_days_to_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("forecast_days", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        provider.forecast(0.0, 0.0, 0).await.unwrap();
        provider.forecast(0.0, 0.0, -4).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .forecast(1.0, 2.0, 1)
            .await
            .unwrap_err();

        match err {
            WeatherError::RequestFailed { endpoint, cause } => {
                assert!(endpoint.ends_with("/v1/forecast"));
                assert!(cause.contains("500"));
                assert!(cause.contains("upstream down"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"current_weather\": 3"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .forecast(1.0, 2.0, 3)
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_request_failed() {
        let provider = OpenMeteoProvider::new(
            "http://127.0.0.1:9/v1/search",
            "http://127.0.0.1:9/v1/forecast",
        );
        let err = provider.geocode_candidates("x").await.unwrap_err();
        assert!(matches!(err, WeatherError::RequestFailed { .. }));
    }

    #[test]
    fn truncate_body_limits_length_on_char_boundary() {
        let long = "ü".repeat(250);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
