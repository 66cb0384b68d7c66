use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, time::Duration};

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const DEFAULT_IP_LOCATE_URL: &str = "https://ipinfo.io/json";

/// Unit system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow!("Unknown unit system '{value}'. Supported: metric, imperial.")),
        }
    }
}

/// Remote endpoints. Overridable so tests can point at a local mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// OpenWeather base URL; `/data/2.5/weather` and `/geo/1.0/direct` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// IP geolocation endpoint answering with `{"loc": "lat,lon", ...}`.
    #[serde(default = "default_ip_locate_url")]
    pub ip_locate_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_ip_locate_url() -> String {
    DEFAULT_IP_LOCATE_URL.to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { base_url: default_base_url(), ip_locate_url: default_ip_locate_url() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
///
/// [endpoints]
/// base_url = "https://api.openweathermap.org"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub units: Units,

    /// Per-request timeout. Absent means requests may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk only, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tenki", "tenki")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the environment; `lookup` is `std::env::var` outside tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// API key to send with requests. Empty when none is configured; the
    /// provider then rejects the request with an authorization error.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key().is_empty()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_key_and_metric_units() {
        let cfg = Config::default();
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.api_key(), "");
        assert_eq!(cfg.units, Units::Metric);
        assert_eq!(cfg.timeout(), None);
        assert_eq!(cfg.endpoints.base_url, "https://api.openweathermap.org");
    }

    #[test]
    fn env_overrides_file_key() {
        let mut cfg = Config::from_toml(r#"api_key = "FROM_FILE""#).unwrap();
        cfg.apply_env(|name| (name == API_KEY_ENV).then(|| "FROM_ENV".to_string()));
        assert_eq!(cfg.api_key(), "FROM_ENV");
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut cfg = Config::from_toml(r#"api_key = "FROM_FILE""#).unwrap();
        cfg.apply_env(|_| Some("   ".to_string()));
        assert_eq!(cfg.api_key(), "FROM_FILE");
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg = Config::from_toml(
            r#"
            units = "imperial"
            timeout_secs = 10

            [endpoints]
            base_url = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.units, Units::Imperial);
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(cfg.endpoints.base_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.endpoints.ip_locate_url, "https://ipinfo.io/json");
    }

    #[test]
    fn toml_roundtrip_keeps_key_and_units() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.units = Units::Imperial;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn units_parse_and_symbols() {
        for units in Units::all() {
            assert_eq!(Units::try_from(units.as_str()).unwrap(), *units);
        }
        assert!(Units::try_from("kelvin").unwrap_err().to_string().contains("Unknown unit system"));
        assert_eq!(Units::Metric.temperature_symbol(), "°C");
        assert_eq!(Units::Imperial.wind_speed_unit(), "mph");
    }
}
