use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Result, WeatherError};

/// Directory under the user's home that holds all uweather state.
pub const CONFIG_DIR_NAME: &str = ".uweather";
pub const LOCATIONS_FILE: &str = "locations.json";
pub const SETTINGS_FILE: &str = "config.toml";

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Optional user settings stored in `config.toml`.
///
/// Example TOML:
/// ```toml
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// default_days = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Used when `--days` is not given on the command line.
    pub default_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            default_days: 1,
        }
    }
}

impl Settings {
    /// Load settings from `dir`, or return defaults if the file doesn't exist yet.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| WeatherError::io(&path, e))?;

        toml::from_str(&contents).map_err(|e| WeatherError::Config {
            path,
            cause: e.to_string(),
        })
    }
}

/// `<home>/.uweather`.
pub fn default_config_dir() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or_else(|| {
        WeatherError::InvalidArgument(
            "could not find home directory; pass --config-dir or set UWEATHER_HOME".to_string(),
        )
    })?;

    Ok(dirs.home_dir().join(CONFIG_DIR_NAME))
}

pub fn locations_file(dir: &Path) -> PathBuf {
    dir.join(LOCATIONS_FILE)
}

/// Create the config directory (and parents) if absent.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| WeatherError::io(dir, e))
}
