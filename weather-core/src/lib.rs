//! Core library for the `uweather` CLI.
//!
//! This crate defines:
//! - Configuration directory and settings handling
//! - The Open-Meteo weather provider behind the [`WeatherProvider`] trait
//! - WMO weather-code tables
//! - The labeled location store
//!
//! It is used by `uweather`, but can also be reused by other binaries or services.

pub mod conditions;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;

pub use config::Settings;
pub use error::{Result, WeatherError};
pub use model::{GeocodingResult, Location, LocationsData, WeatherResponse};
pub use provider::{OpenMeteoProvider, WeatherProvider};
pub use store::{JsonFileBackend, LocationBackend, LocationStore, MemoryBackend};
