//! Sources for the widget's initial position.
//!
//! A terminal has no geolocation prompt, so the position comes from IP
//! geolocation, from explicit coordinates, or not at all.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{Config, error::LocationError, model::Coordinates};

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    /// Current position, requested once per call.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Locates the machine by its public IP address (ipinfo.io response shape).
#[derive(Debug, Clone)]
pub struct IpLocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    /// "latitude,longitude"
    loc: Option<String>,
    city: Option<String>,
}

impl IpLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoints.ip_locate_url.clone())
    }
}

#[async_trait]
impl LocationSource for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let res = self.http.get(&self.url).send().await?.error_for_status()?;
        let info: IpInfoResponse = res.json().await?;

        let loc = info
            .loc
            .ok_or_else(|| LocationError::Malformed("response has no 'loc' field".into()))?;
        let coords = parse_loc(&loc)?;

        tracing::debug!(city = ?info.city, %coords, "Located by IP");
        Ok(coords)
    }
}

fn parse_loc(loc: &str) -> Result<Coordinates, LocationError> {
    let malformed = || LocationError::Malformed(format!("expected 'lat,lon', got '{loc}'"));

    let (lat, lon) = loc.split_once(',').ok_or_else(malformed)?;
    let latitude = lat.trim().parse().map_err(|_| malformed())?;
    let longitude = lon.trim().parse().map_err(|_| malformed())?;

    Coordinates::new(latitude, longitude).validate().map_err(|_| malformed())
}

/// A position given up front, e.g. from `--lat/--lon`.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Location access switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable("location lookup disabled".into()))
    }
}
