use crate::{
    Config,
    error::LookupError,
    model::{Coordinates, LookupTarget, Suggestion, WeatherResult},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Maximum number of suggestions requested from and kept from the provider.
pub const SUGGESTION_LIMIT: usize = 5;

/// The three outbound calls the widget makes.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn weather_by_coords(&self, coords: Coordinates) -> Result<WeatherResult, LookupError>;

    async fn weather_by_city(&self, city: &str) -> Result<WeatherResult, LookupError>;

    async fn city_suggestions(&self, prefix: &str) -> Result<Vec<Suggestion>, LookupError>;

    /// Dispatch on a lookup target.
    async fn weather(&self, target: &LookupTarget) -> Result<WeatherResult, LookupError> {
        match target {
            LookupTarget::Coords(coords) => self.weather_by_coords(*coords).await,
            LookupTarget::City(city) => self.weather_by_city(city).await,
        }
    }
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    if !config.has_api_key() {
        tracing::warn!(
            "No API key configured; requests will be rejected by the provider. \
             Hint: set {} or run `tenki configure`.",
            crate::config::API_KEY_ENV
        );
    }
    OpenWeatherClient::from_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_builds_without_api_key() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.endpoints.base_url = "http://localhost:1234/".into();

        let client = provider_from_config(&cfg).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
