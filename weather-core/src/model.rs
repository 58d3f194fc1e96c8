use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A saved place, keyed by a user-chosen label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
}

/// Everything persisted in `locations.json`.
///
/// `locations` keeps insertion order; `default` is empty when no default is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationsData {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub default: String,
}

impl LocationsData {
    pub fn find(&self, label: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.find(label).is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: String,
    /// State or province.
    #[serde(default)]
    pub admin1: String,
}

impl GeocodingResult {
    pub fn into_location(self, label: impl Into<String>) -> Location {
        Location {
            label: label.into(),
            city: self.name,
            lat: self.latitude,
            lon: self.longitude,
            country: self.country,
        }
    }
}

impl std::fmt::Display for GeocodingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.admin1.is_empty() {
            write!(f, ", {}", self.admin1)?;
        }
        if !self.country.is_empty() {
            write!(f, ", {}", self.country)?;
        }
        write!(f, " ({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub hourly: HourlyWeather,
    #[serde(default)]
    pub daily: DailyWeather,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlyWeather {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,
    #[serde(rename = "relativehumidity_2m", default)]
    pub humidity: Vec<Option<i32>>,
}

impl HourlyWeather {
    /// Humidity sample at `index`, if present and positive.
    pub fn humidity_at(&self, index: usize) -> Option<i32> {
        self.humidity
            .get(index)
            .copied()
            .flatten()
            .filter(|h| *h > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyWeather {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<f64>,
    #[serde(default)]
    pub weathercode: Vec<i32>,
    #[serde(default)]
    pub precipitation_sum: Vec<f64>,
}

impl DailyWeather {
    /// Number of days for which every parallel series has a value.
    pub fn len(&self) -> usize {
        self.time
            .len()
            .min(self.temperature_max.len())
            .min(self.temperature_min.len())
            .min(self.weathercode.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        let raw = self.time.get(index)?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}
