//! Command layer: validates arguments, calls the provider and the store,
//! and writes confirmations or rendered weather to an output sink.

use std::io::Write;

use anyhow::Result;
use chrono::{Local, Timelike};
use tracing::debug;
use uweather_core::{
    GeocodingResult, Location, LocationBackend, LocationStore, WeatherError, WeatherProvider,
    conditions::format_city_name,
};

use crate::render::render_weather;

pub struct Commands<'a, B> {
    provider: &'a dyn WeatherProvider,
    store: &'a LocationStore<B>,
    hour: usize,
}

/// Presence check only; the value is passed through as given.
fn require<'v>(value: Option<&'v str>, what: &str) -> Result<&'v str, WeatherError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(WeatherError::InvalidArgument(format!("{what} is required"))),
    }
}

impl<'a, B: LocationBackend> Commands<'a, B> {
    pub fn new(provider: &'a dyn WeatherProvider, store: &'a LocationStore<B>) -> Self {
        Self {
            provider,
            store,
            hour: Local::now().hour() as usize,
        }
    }

    /// Override the local hour used to pick the hourly humidity sample.
    pub fn with_hour(mut self, hour: usize) -> Self {
        self.hour = hour;
        self
    }

    /// Geocode `city` and save the best match under `label`.
    pub async fn add(&self, city: &str, label: Option<&str>, out: &mut impl Write) -> Result<()> {
        let city = require(Some(city), "city name")?;
        let label = require(label, "label")?;

        let result = self.provider.geocode(city).await?;
        self.add_resolved(label, result, out)
    }

    /// Like [`Commands::add`], but lets `choose` pick among all geocoding candidates.
    pub async fn add_choosing<F>(
        &self,
        city: &str,
        label: Option<&str>,
        choose: F,
        out: &mut impl Write,
    ) -> Result<()>
    where
        F: FnOnce(Vec<GeocodingResult>) -> Result<GeocodingResult>,
    {
        let city = require(Some(city), "city name")?;
        let label = require(label, "label")?;

        let mut candidates = self.provider.geocode_candidates(city).await?;
        let picked = match candidates.len() {
            0 => return Err(WeatherError::NotFound(format!("city not found: {city}")).into()),
            1 => candidates.remove(0),
            _ => choose(candidates)?,
        };

        self.add_resolved(label, picked, out)
    }

    pub fn add_resolved(
        &self,
        label: &str,
        result: GeocodingResult,
        out: &mut impl Write,
    ) -> Result<()> {
        let label = require(Some(label), "label")?;

        self.store.add(
            label,
            &result.name,
            result.latitude,
            result.longitude,
            &result.country,
        )?;

        writeln!(
            out,
            "Added: {} ({}, {:.4}, {:.4}) with label '{}'",
            result.name, result.country, result.latitude, result.longitude, label
        )?;
        Ok(())
    }

    pub fn remove(&self, label: Option<&str>, out: &mut impl Write) -> Result<()> {
        let label = require(label, "label")?;
        self.store.remove(label)?;

        writeln!(out, "Removed: {label}")?;
        Ok(())
    }

    pub fn list(&self, out: &mut impl Write) -> Result<()> {
        let (locations, default) = self.store.list()?;

        if locations.is_empty() {
            writeln!(
                out,
                "No locations saved. Add a location with 'uweather add <city> --label <label>'"
            )?;
            return Ok(());
        }

        writeln!(out, "Saved locations:")?;
        writeln!(out, "---------------")?;
        for loc in &locations {
            let marker = if loc.label == default { "*" } else { " " };
            writeln!(out, "{marker} {} -> {}, {}", loc.label, loc.city, loc.country)?;
        }
        writeln!(out)?;
        writeln!(out, "* = default location")?;

        Ok(())
    }

    pub fn set_default(&self, label: Option<&str>, out: &mut impl Write) -> Result<()> {
        let label = require(label, "label")?;
        self.store.set_default(label)?;

        writeln!(out, "Default location set to: {label}")?;
        Ok(())
    }

    /// Weather for a saved label, or for the default location when `label` is `None`.
    pub async fn show_weather(
        &self,
        label: Option<&str>,
        days: i64,
        out: &mut impl Write,
    ) -> Result<()> {
        let location = match label {
            None => self.store.get_default()?,
            Some(label) => self.store.get(label)?,
        };

        debug!(label = %location.label, days, "showing weather for saved location");
        self.show_location(&location, "", days, out).await
    }

    /// Weather for an ad-hoc city; nothing is saved.
    pub async fn show_weather_by_city(
        &self,
        city: &str,
        days: i64,
        out: &mut impl Write,
    ) -> Result<()> {
        let city = require(Some(city), "city name")?;
        let result = self.provider.geocode(city).await?;
        let admin1 = result.admin1.clone();

        debug!(city, resolved = %result.name, days, "showing weather for city");
        self.show_location(&result.into_location(""), &admin1, days, out)
            .await
    }

    async fn show_location(
        &self,
        location: &Location,
        admin1: &str,
        days: i64,
        out: &mut impl Write,
    ) -> Result<()> {
        let weather = self
            .provider
            .forecast(location.lat, location.lon, days)
            .await?;

        let title = format_city_name(&location.city, &location.country, admin1);
        write!(out, "{}", render_weather(&title, &weather, days, self.hour))?;
        Ok(())
    }
}
