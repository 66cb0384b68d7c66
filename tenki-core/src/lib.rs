//! Core library for the `tenki` weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherApi` trait
//! - Location sources for the initial lookup
//! - The widget state machine and its rendering
//!
//! It is used by `tenki-cli`, but the widget can be driven by any front end.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod view;
pub mod widget;

pub use config::{Config, Endpoints, Units};
pub use error::{LocationError, LookupError};
pub use location::{FixedLocation, IpLocator, LocationSource, NoLocation};
pub use model::{Coordinates, LookupTarget, Suggestion, WeatherResult};
pub use provider::{WeatherApi, openweather::OpenWeatherClient};
pub use view::{WeatherCard, WidgetView};
pub use widget::{LookupOutcome, UiState, WeatherWidget};
