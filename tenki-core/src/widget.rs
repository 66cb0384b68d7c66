//! The weather widget: local UI state plus the lookups that mutate it.
//!
//! Every request is split into a `begin_*` step that updates state and hands
//! out a ticket, and a `settle_*` step that applies the result. Tickets carry
//! a sequence number; a result whose ticket has been superseded by a newer
//! request of the same kind is dropped, so a slow response can never
//! overwrite a newer one.

use tracing::{debug, warn};

use crate::{
    Units,
    error::LookupError,
    location::LocationSource,
    model::{Coordinates, LookupTarget, Suggestion, WeatherResult},
    provider::{SUGGESTION_LIMIT, WeatherApi},
    view::WidgetView,
};

/// Inputs shorter than this (in characters) never hit the suggestion endpoint.
pub const MIN_QUERY_CHARS: usize = 2;

/// How the most recent settled lookup went.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LookupOutcome {
    #[default]
    NotYetSearched,
    Failed(String),
    Succeeded,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub query_text: String,
    pub selected_city_name: String,
    /// Last successful payload. Kept (stale) when a later lookup fails.
    pub last_result: Option<WeatherResult>,
    pub is_loading: bool,
    pub suggestions: Vec<Suggestion>,
    pub outcome: LookupOutcome,
}

/// Handle for an in-flight weather lookup.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct LookupTicket {
    seq: u64,
    target: LookupTarget,
}

impl LookupTicket {
    pub fn target(&self) -> &LookupTarget {
        &self.target
    }
}

/// Handle for an in-flight suggestion search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SuggestTicket {
    seq: u64,
    prefix: String,
}

impl SuggestTicket {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[derive(Debug)]
pub struct WeatherWidget<A> {
    api: A,
    units: Units,
    state: UiState,
    lookup_seq: u64,
    suggest_seq: u64,
}

impl<A: WeatherApi> WeatherWidget<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            units: Units::default(),
            state: UiState::default(),
            lookup_seq: 0,
            suggest_seq: 0,
        }
    }

    /// Units the provider was asked for; only affects rendering.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> WidgetView {
        WidgetView::from_state(&self.state, self.units)
    }

    /// Look up the weather for the current position, once. If the position
    /// can't be had the widget just stays empty.
    ///
    /// Returns whether a lookup was issued.
    pub async fn mount(&mut self, location: &dyn LocationSource) -> bool {
        match location.current_position().await {
            Ok(coords) => {
                self.fetch_weather_by_coords(coords.latitude, coords.longitude).await;
                true
            }
            Err(e) => {
                debug!(error = %e, "No initial location; staying empty");
                false
            }
        }
    }

    pub async fn fetch_weather_by_coords(&mut self, latitude: f64, longitude: f64) {
        self.lookup(LookupTarget::Coords(Coordinates::new(latitude, longitude))).await;
    }

    pub async fn fetch_weather_by_city(&mut self, name: &str) {
        self.lookup(LookupTarget::City(name.to_owned())).await;
    }

    async fn lookup(&mut self, target: LookupTarget) {
        let ticket = self.begin_lookup(target);
        let result = self.api.weather(ticket.target()).await;
        self.settle_lookup(ticket, result);
    }

    pub fn begin_lookup(&mut self, target: LookupTarget) -> LookupTicket {
        self.lookup_seq += 1;
        self.state.is_loading = true;
        debug!(seq = self.lookup_seq, lookup = %target, "Weather lookup started");
        LookupTicket { seq: self.lookup_seq, target }
    }

    /// Apply a lookup result. Returns `false` if the ticket was superseded and
    /// the result dropped.
    pub fn settle_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<WeatherResult, LookupError>,
    ) -> bool {
        if ticket.seq != self.lookup_seq {
            debug!(
                seq = ticket.seq,
                latest = self.lookup_seq,
                lookup = %ticket.target,
                "Dropping superseded weather result"
            );
            return false;
        }

        self.state.is_loading = false;
        match result {
            Ok(weather) => {
                self.state.selected_city_name =
                    weather.location_name().unwrap_or_default().to_owned();
                self.state.last_result = Some(weather);
                self.state.outcome = LookupOutcome::Succeeded;
            }
            Err(e) => {
                warn!(lookup = %ticket.target, error = %e, "Weather lookup failed");
                self.state.outcome = LookupOutcome::Failed(e.to_string());
            }
        }
        true
    }

    pub async fn fetch_city_suggestions(&mut self, text: &str) {
        let Some(ticket) = self.begin_suggestions(text) else {
            return;
        };
        let result = self.api.city_suggestions(ticket.prefix()).await;
        self.settle_suggestions(ticket, result);
    }

    /// Start a suggestion search for `text`. Short input clears the list and
    /// returns `None`. Either way any older search is superseded.
    pub fn begin_suggestions(&mut self, text: &str) -> Option<SuggestTicket> {
        self.suggest_seq += 1;
        if text.chars().count() < MIN_QUERY_CHARS {
            self.state.suggestions.clear();
            return None;
        }
        Some(SuggestTicket { seq: self.suggest_seq, prefix: text.to_owned() })
    }

    pub fn settle_suggestions(
        &mut self,
        ticket: SuggestTicket,
        result: Result<Vec<Suggestion>, LookupError>,
    ) -> bool {
        if ticket.seq != self.suggest_seq {
            debug!(prefix = %ticket.prefix, "Dropping superseded suggestions");
            return false;
        }

        match result {
            Ok(mut found) => {
                found.truncate(SUGGESTION_LIMIT);
                self.state.suggestions = found;
            }
            Err(e) => warn!(prefix = %ticket.prefix, error = %e, "Suggestion search failed"),
        }
        true
    }

    /// Clear the list and invalidate any search still in flight.
    pub fn clear_suggestions(&mut self) {
        self.suggest_seq += 1;
        self.state.suggestions.clear();
    }

    /// A keystroke in the search field.
    pub async fn input(&mut self, text: impl Into<String>) {
        self.state.query_text = text.into();
        let query = self.state.query_text.clone();
        self.fetch_city_suggestions(&query).await;
    }

    /// Replace the search field's text without searching, e.g. when a front
    /// end accepts an edited line in one go.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.state.query_text = text.into();
    }

    /// Enter / search button.
    pub async fn submit(&mut self) {
        self.clear_suggestions();
        let query = self.state.query_text.clone();
        self.fetch_weather_by_city(&query).await;
    }

    pub async fn select_suggestion(&mut self, suggestion: Suggestion) {
        let key = suggestion.lookup_key();
        self.state.query_text = key.clone();
        self.clear_suggestions();
        self.fetch_weather_by_city(&key).await;
    }

    /// Suggestion currently listed under `label`.
    pub fn suggestion_by_label(&self, label: &str) -> Option<&Suggestion> {
        self.state.suggestions.iter().find(|s| s.label() == label)
    }
}
