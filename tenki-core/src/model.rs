use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LookupError;

/// A point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Rejects NaN and out-of-range values before they reach the provider.
    pub fn validate(self) -> Result<Self, LookupError> {
        let lat_ok = (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(self)
        } else {
            Err(LookupError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What a weather lookup is keyed by.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupTarget {
    Coords(Coordinates),
    City(String),
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::Coords(c) => write!(f, "({c})"),
            LookupTarget::City(name) => write!(f, "'{name}'"),
        }
    }
}

/// Current-weather payload as returned by the provider.
///
/// The provider's shape is not under our control, so every field is
/// optional and readers go through the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Option<Wind>,
    /// Observation time, unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: Option<f64>,
}

impl WeatherResult {
    pub fn location_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    pub fn humidity(&self) -> Option<u8> {
        self.main.as_ref().and_then(|m| m.humidity)
    }

    /// Primary condition label of the first reported condition, e.g. "Clouds".
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().and_then(|w| w.main.as_deref())
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.wind.as_ref().and_then(|w| w.speed)
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Whether there are readings worth showing. A payload without a `main`
    /// block renders as "no data".
    pub fn has_readings(&self) -> bool {
        self.main.is_some()
    }
}

/// A candidate city from the geocoding search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, state: Option<&str>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: state.map(str::to_owned),
            country: country.into(),
            lat: None,
            lon: None,
        }
    }

    /// Key used for the by-city lookup when this suggestion is chosen.
    pub fn lookup_key(&self) -> String {
        format!("{},{}", self.name, self.country)
    }

    /// Human-readable label: "name, state, country" or "name, country".
    pub fn label(&self) -> String {
        match self.state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}
