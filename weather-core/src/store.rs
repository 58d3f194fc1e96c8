//! Durable label → location mapping with a designated default.
//!
//! Every operation reads the whole [`LocationsData`] through a
//! [`LocationBackend`], modifies it in memory, and writes it back in full.
//! There is no cache between calls and no file locking: concurrent
//! invocations against the same file race and the last writer wins.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{debug, info};

use crate::{
    config,
    error::{Result, WeatherError},
    model::{Location, LocationsData},
};

/// Whole-structure load/save for [`LocationsData`].
pub trait LocationBackend {
    fn load(&self) -> Result<LocationsData>;
    fn save(&self, data: &LocationsData) -> Result<()>;
}

/// `locations.json` on disk, pretty-printed.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for `locations.json` inside the given config directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(config::locations_file(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationBackend for JsonFileBackend {
    fn load(&self) -> Result<LocationsData> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no locations file yet, starting empty");
            return Ok(LocationsData::default());
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| WeatherError::io(&self.path, e))?;

        serde_json::from_str(&contents).map_err(|source| WeatherError::Serialize {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, data: &LocationsData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            config::ensure_dir(parent)?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|source| WeatherError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, json).map_err(|e| WeatherError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = data.locations.len(), "saved locations");

        Ok(())
    }
}

/// In-memory backend; nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: Mutex<LocationsData>,
}

impl MemoryBackend {
    pub fn new(data: LocationsData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    pub fn snapshot(&self) -> LocationsData {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LocationBackend for MemoryBackend {
    fn load(&self) -> Result<LocationsData> {
        Ok(self.snapshot())
    }

    fn save(&self, data: &LocationsData) -> Result<()> {
        let mut guard = self
            .data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = data.clone();
        Ok(())
    }
}

#[derive(Debug)]
pub struct LocationStore<B> {
    backend: B,
}

impl<B: LocationBackend> LocationStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Append a new location. The first one ever added becomes the default.
    pub fn add(&self, label: &str, city: &str, lat: f64, lon: f64, country: &str) -> Result<()> {
        self.add_location(Location {
            label: label.to_string(),
            city: city.to_string(),
            lat,
            lon,
            country: country.to_string(),
        })
    }

    pub fn add_location(&self, location: Location) -> Result<()> {
        let mut data = self.backend.load()?;

        if data.contains(&location.label) {
            return Err(WeatherError::DuplicateLabel(location.label));
        }

        if data.default.is_empty() {
            data.default = location.label.clone();
        }

        info!(label = %location.label, city = %location.city, "adding location");
        data.locations.push(location);

        self.backend.save(&data)
    }

    /// Delete `label`. A removed default falls back to the first remaining location.
    pub fn remove(&self, label: &str) -> Result<()> {
        let mut data = self.backend.load()?;

        let before = data.locations.len();
        data.locations.retain(|loc| loc.label != label);
        if data.locations.len() == before {
            return Err(WeatherError::label_not_found(label));
        }

        if data.default == label {
            data.default = data
                .locations
                .first()
                .map(|loc| loc.label.clone())
                .unwrap_or_default();
        }

        info!(label, new_default = %data.default, "removed location");
        self.backend.save(&data)
    }

    pub fn get(&self, label: &str) -> Result<Location> {
        let data = self.backend.load()?;
        data.find(label)
            .cloned()
            .ok_or_else(|| WeatherError::label_not_found(label))
    }

    pub fn get_default(&self) -> Result<Location> {
        let data = self.backend.load()?;
        if data.default.is_empty() {
            return Err(WeatherError::NoDefaultSet);
        }

        data.find(&data.default)
            .cloned()
            .ok_or_else(|| WeatherError::label_not_found(&data.default))
    }

    pub fn set_default(&self, label: &str) -> Result<()> {
        let mut data = self.backend.load()?;
        if !data.contains(label) {
            return Err(WeatherError::label_not_found(label));
        }

        data.default = label.to_string();
        info!(label, "default location changed");
        self.backend.save(&data)
    }

    /// All locations in insertion order, plus the default label (empty if none).
    pub fn list(&self) -> Result<(Vec<Location>, String)> {
        let data = self.backend.load()?;
        Ok((data.locations, data.default))
    }

    pub fn contains(&self, label: &str) -> Result<bool> {
        Ok(self.backend.load()?.contains(label))
    }
}
