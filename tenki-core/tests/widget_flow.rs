//! End-to-end widget behaviour against a mock OpenWeather and IP locator.

use tenki_core::{
    Config, IpLocator, LookupOutcome, NoLocation, OpenWeatherClient, WeatherWidget, WidgetView,
    view::PROMPT_TEXT,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn widget_for(mock_server: &MockServer) -> WeatherWidget<OpenWeatherClient> {
    let mut config = Config::default();
    config.set_api_key("TEST_KEY".into());
    config.endpoints.base_url = mock_server.uri();
    let client = OpenWeatherClient::from_config(&config).expect("client builds");
    WeatherWidget::new(client).with_units(config.units)
}

#[tokio::test]
async fn mount_with_location_renders_paris() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Paris",
            "country": "FR",
            "loc": "48.85,2.35"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Paris",
            "main": {"temp": 15, "humidity": 70},
            "weather": [{"main": "Clouds"}],
            "wind": {"speed": 3.1}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = widget_for(&mock_server);
    let locator = IpLocator::new(format!("{}/json", mock_server.uri()));

    assert!(widget.mount(&locator).await);

    let state = widget.state();
    assert_eq!(state.selected_city_name, "Paris");
    assert!(!state.is_loading);

    let WidgetView::Weather { card, note } = widget.view() else {
        panic!("expected weather card, got {:?}", widget.view());
    };
    assert_eq!(card.city, "Paris");
    assert_eq!(card.temperature, "15°C");
    assert_eq!(card.condition, "Clouds");
    assert_eq!(card.humidity, "70%");
    assert_eq!(card.wind, "3.1 m/s");
    assert_eq!(note, None);
}

#[tokio::test]
async fn mount_when_locator_fails_stays_on_prompt() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut widget = widget_for(&mock_server);
    let locator = IpLocator::new(format!("{}/json", mock_server.uri()));

    assert!(!widget.mount(&locator).await);
    assert_eq!(widget.view(), WidgetView::Prompt { note: None });

    assert!(!widget.mount(&NoLocation).await);
}

#[tokio::test]
async fn typing_prefix_with_no_matches_gives_empty_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Lo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = widget_for(&mock_server);
    widget.input("L").await;
    widget.input("Lo").await;

    assert_eq!(widget.state().query_text, "Lo");
    assert!(widget.state().suggestions.is_empty());
}

#[tokio::test]
async fn enter_on_unknown_city_shows_fallback_prompt() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Nowhereville"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = widget_for(&mock_server);
    widget.input("Nowhereville").await;
    widget.submit().await;

    let state = widget.state();
    assert_eq!(state.last_result, None);
    assert!(!state.is_loading);
    assert!(matches!(state.outcome, LookupOutcome::Failed(_)));

    let view = widget.view();
    assert!(matches!(view, WidgetView::Prompt { note: Some(_) }));
    assert!(view.to_string().starts_with(PROMPT_TEXT));
}

#[tokio::test]
async fn choosing_a_suggestion_looks_up_name_and_country() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Par"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Paris", "country": "FR", "lat": 48.85, "lon": 2.35},
            {"name": "Paris", "country": "US", "state": "Texas", "lat": 33.66, "lon": -95.55}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris,US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Paris",
            "main": {"temp": 24.5, "humidity": 40},
            "weather": [{"main": "Clear"}],
            "wind": {"speed": 5}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = widget_for(&mock_server);
    widget.input("Par").await;
    assert_eq!(widget.state().suggestions.len(), 2);

    let texas = widget.suggestion_by_label("Paris, Texas, US").cloned().expect("listed");
    widget.select_suggestion(texas).await;

    let state = widget.state();
    assert_eq!(state.query_text, "Paris,US");
    assert!(state.suggestions.is_empty());
    assert_eq!(state.selected_city_name, "Paris");
    assert!(widget.view().to_string().contains("Temp: 24.5°C"));
}
