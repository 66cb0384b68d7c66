use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    Config, Units,
    error::LookupError,
    model::{Coordinates, Suggestion, WeatherResult},
};

use super::{SUGGESTION_LIMIT, WeatherApi};

const WEATHER_PATH: &str = "/data/2.5/weather";
const GEOCODE_PATH: &str = "/geo/1.0/direct";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            units: Units::default(),
            base_url: Config::default().endpoints.base_url,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: config.api_key().to_owned(),
            units: config.units,
            base_url: config.endpoints.base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn units(&self) -> Units {
        self.units
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, LookupError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        parse_response(res).await
    }
}

/// Error body OpenWeather sends alongside non-2xx statuses,
/// e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

async fn parse_response<T: DeserializeOwned>(res: Response) -> Result<T, LookupError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<OwErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| truncate_body(&body));
        return Err(LookupError::Status { status: status.as_u16(), message });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn weather_by_coords(&self, coords: Coordinates) -> Result<WeatherResult, LookupError> {
        let coords = coords.validate()?;
        self.get_json(
            WEATHER_PATH,
            &[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("units", self.units.as_str().to_string()),
            ],
        )
        .await
    }

    async fn weather_by_city(&self, city: &str) -> Result<WeatherResult, LookupError> {
        self.get_json(
            WEATHER_PATH,
            &[("q", city.to_string()), ("units", self.units.as_str().to_string())],
        )
        .await
    }

    async fn city_suggestions(&self, prefix: &str) -> Result<Vec<Suggestion>, LookupError> {
        let mut found: Vec<Suggestion> = self
            .get_json(
                GEOCODE_PATH,
                &[("q", prefix.to_string()), ("limit", SUGGESTION_LIMIT.to_string())],
            )
            .await?;
        found.truncate(SUGGESTION_LIMIT);
        Ok(found)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
