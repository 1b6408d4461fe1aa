//! Integration tests for the OpenWeatherMap client against a mock HTTP
//! server, including the controller flows built on top of it.

use serde_json::json;
use skycast_core::{
    FavoritesStore, FetchStatus, MemoryStore, OpenWeatherProvider, WeatherApp, WeatherError,
    WeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_response() -> serde_json::Value {
    json!({
        "name": "Paris",
        "main": { "temp": 18.4, "humidity": 60 },
        "wind": { "speed": 3.2 },
        "weather": [ { "description": "clear sky", "icon": "01d" } ]
    })
}

/// 3-hour-spaced forecast list; temperatures rise by one degree per entry
/// so the sampled positions are visible in the result.
fn forecast_response(entries: usize) -> serde_json::Value {
    let list: Vec<_> = (0..entries)
        .map(|i| {
            json!({
                "dt": 1_700_000_000_i64 + i as i64 * 10_800,
                "main": { "temp": 15.0 + i as f64 },
                "weather": [ { "description": "few clouds", "icon": "02d" } ]
            })
        })
        .collect();

    json!({ "list": list })
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/{endpoint}")))
        .respond_with(response)
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), server.uri())
}

fn app(server: &MockServer) -> WeatherApp {
    WeatherApp::new(
        Box::new(client(server)),
        FavoritesStore::new(Box::<MemoryStore>::default()),
    )
}

#[tokio::test]
async fn fetch_weather_builds_snapshot() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(200).set_body_json(current_response()),
    )
    .await;
    mount(
        &server,
        "forecast",
        ResponseTemplate::new(200).set_body_json(forecast_response(40)),
    )
    .await;

    let snapshot = client(&server).fetch_weather("Paris").await.unwrap();

    assert_eq!(snapshot.city, "Paris");
    assert_eq!(snapshot.current.temperature_c, 18);
    assert_eq!(snapshot.current.humidity_pct, 60);
    assert_eq!(snapshot.current.wind_speed_ms, 3);
    assert_eq!(snapshot.current.description, "clear sky");
    assert_eq!(snapshot.current.icon_id, "01d");

    assert_eq!(snapshot.forecast.len(), 5);
    let temps: Vec<i32> = snapshot.forecast.iter().map(|d| d.temperature_c).collect();
    assert_eq!(temps, vec![15, 23, 31, 39, 47]);
}

#[tokio::test]
async fn short_forecast_yields_fewer_days() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(200).set_body_json(current_response()),
    )
    .await;
    mount(
        &server,
        "forecast",
        ResponseTemplate::new(200).set_body_json(forecast_response(3)),
    )
    .await;

    let snapshot = client(&server).fetch_weather("Paris").await.unwrap();
    assert_eq!(snapshot.forecast.len(), 1);
}

#[tokio::test]
async fn unknown_city_is_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(404)
            .set_body_json(json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let err = client(&server).fetch_weather("Nowhere123").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound));
}

#[tokio::test]
async fn invalid_json_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let err = client(&server).fetch_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_fields_are_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(200).set_body_json(json!({ "name": "Paris" })),
    )
    .await;

    let err = client(&server).fetch_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)));
}

#[tokio::test]
async fn empty_condition_list_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(200).set_body_json(json!({
            "name": "Paris",
            "main": { "temp": 18.4, "humidity": 60 },
            "wind": { "speed": 3.2 },
            "weather": []
        })),
    )
    .await;
    mount(
        &server,
        "forecast",
        ResponseTemplate::new(200).set_body_json(forecast_response(8)),
    )
    .await;

    let err = client(&server).fetch_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)));
}

#[tokio::test]
async fn server_error_is_a_request_failure() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let err = client(&server).fetch_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Request(_)));
}

#[tokio::test]
async fn requests_carry_city_key_and_metric_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response(40)))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).fetch_weather("Paris").await;
    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn search_success_drives_controller() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(200).set_body_json(current_response()),
    )
    .await;
    mount(
        &server,
        "forecast",
        ResponseTemplate::new(200).set_body_json(forecast_response(40)),
    )
    .await;

    let mut app = app(&server);
    app.search("Paris").await;

    assert_eq!(app.status(), FetchStatus::Success);
    assert!(app.error().is_none());

    let snapshot = app.snapshot().unwrap();
    assert_eq!(snapshot.city, "Paris");
    assert_eq!(snapshot.forecast.len(), 5);

    app.toggle_favorite("Paris");
    assert!(app.is_favorite("Paris"));
}

#[tokio::test]
async fn search_failure_sets_generic_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        ResponseTemplate::new(404)
            .set_body_json(json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let mut app = app(&server);
    app.search("Nowhere123").await;

    assert_eq!(app.status(), FetchStatus::Failed);
    assert!(app.snapshot().is_none());
    assert_eq!(
        app.error(),
        Some("Could not fetch weather data. Please try again.")
    );
}
