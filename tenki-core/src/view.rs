use chrono::{DateTime, Utc};
use std::fmt;

use crate::{
    Units,
    model::WeatherResult,
    widget::{LookupOutcome, UiState},
};

pub const TITLE: &str = "天気アプリ (Weather App)";
pub const SEARCH_PLACEHOLDER: &str = "都市を検索 / Search city";
pub const LOADING_TEXT: &str = "読み込み中... / Loading...";
pub const PROMPT_TEXT: &str = "都市を検索してください 🌸 / Please search a city 🌸";

const MISSING: &str = "--";

/// What the widget shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    Loading,
    Weather { card: WeatherCard, note: Option<String> },
    /// Nothing to show yet, or the lookup failed with nothing older to fall back on.
    Prompt { note: Option<String> },
}

/// Display strings for one result, e.g. `temperature = "15°C"`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub city: String,
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherCard {
    pub fn new(city: &str, weather: &WeatherResult, units: Units) -> Self {
        let city = if city.is_empty() { MISSING } else { city };
        Self {
            city: city.to_owned(),
            temperature: with_unit(weather.temperature(), units.temperature_symbol(), ""),
            condition: weather.condition().unwrap_or(MISSING).to_owned(),
            humidity: with_unit(weather.humidity().map(f64::from), "%", ""),
            wind: with_unit(weather.wind_speed(), units.wind_speed_unit(), " "),
            observed_at: weather.observed_at(),
        }
    }
}

fn with_unit(value: Option<f64>, unit: &str, sep: &str) -> String {
    match value {
        Some(v) => format!("{v}{sep}{unit}"),
        None => MISSING.to_owned(),
    }
}

impl WidgetView {
    pub fn from_state(state: &UiState, units: Units) -> Self {
        if state.is_loading {
            return WidgetView::Loading;
        }

        let note = match &state.outcome {
            LookupOutcome::Failed(reason) => Some(reason.clone()),
            _ => None,
        };

        match state.last_result.as_ref().filter(|w| w.has_readings()) {
            Some(weather) => WidgetView::Weather {
                card: WeatherCard::new(&state.selected_city_name, weather, units),
                note,
            },
            None => WidgetView::Prompt { note },
        }
    }
}

impl fmt::Display for WeatherCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.city)?;
        writeln!(f, "🌡 Temp: {}", self.temperature)?;
        writeln!(f, "☁️ Condition: {}", self.condition)?;
        writeln!(f, "💧 Humidity: {}", self.humidity)?;
        write!(f, "🌬 Wind: {}", self.wind)
    }
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let note = match self {
            WidgetView::Loading => return f.write_str(LOADING_TEXT),
            WidgetView::Weather { card, note } => {
                write!(f, "{card}")?;
                note
            }
            WidgetView::Prompt { note } => {
                f.write_str(PROMPT_TEXT)?;
                note
            }
        };
        if let Some(reason) = note {
            write!(f, "\n({reason})")?;
        }
        Ok(())
    }
}
