//! End-to-end tests: HTTP request in, rendered page out, providers mocked with wiremock.

use axum_test::TestServer;
use weather_core::{AppConfig, ProviderId};
use weather_web::{AppState, router};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const LANDING_MARKER: &str = "Get started";

fn app(geocoder: &MockServer, forecast: &MockServer, environment: &str) -> TestServer {
    let mut config = AppConfig::default();
    config.environment = environment.to_string();
    config.upsert_provider_base_url(ProviderId::Nominatim, format!("{}/search", geocoder.uri()));
    config.upsert_provider_base_url(
        ProviderId::OpenMeteo,
        format!("{}/v1/forecast", forecast.uri()),
    );

    let state = AppState::from_config(config).expect("Failed to build app state");
    TestServer::new(router(state)).expect("Failed to start test server")
}

async fn mock_geocoder(server: &MockServer, response: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

async fn mock_forecast(server: &MockServer, response: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

fn los_angeles() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!([
        { "lat": "34.05", "lon": "-118.24", "display_name": "Los Angeles, California" }
    ]))
}

fn clear_and_twenty() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "current_weather": { "temperature": 20, "weathercode": 0 }
    }))
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn california_renders_weather_page() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "California"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(los_angeles())
        .expect(1)
        .mount(&geocoder)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "34.05"))
        .and(query_param("longitude", "-118.24"))
        .and(query_param("current_weather", "true"))
        .respond_with(clear_and_twenty())
        .expect(1)
        .mount(&forecast)
        .await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/").add_query_param("location", "California").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().expect("ascii header"),
        "text/html; charset=utf-8"
    );

    let html = response.text();
    assert!(html.contains("Los Angeles, California"), "{html}");
    assert!(html.contains("20°C"), "{html}");
    assert!(html.contains("Clear"), "{html}");
    assert!(html.contains("/static/img/clear.svg"), "{html}");
    assert!(!html.contains(LANDING_MARKER));
}

#[tokio::test]
async fn weather_page_shows_daily_range_and_environment() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(&geocoder, los_angeles(), 1).await;
    mock_forecast(
        &forecast,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather_units": { "temperature": "°C" },
            "current_weather": { "temperature": 17.5, "weathercode": 95 },
            "hourly": { "temperature_2m": [12.0, 15.5, 23.25] }
        })),
        1,
    )
    .await;

    let server = app(&geocoder, &forecast, "staging");
    let html = server
        .get("/")
        .add_query_param("location", "Los Angeles")
        .await
        .text();

    assert!(html.contains("17.5°C"), "{html}");
    assert!(html.contains("Thunderstorm"), "{html}");
    assert!(html.contains("/static/img/thunderstorm.svg"), "{html}");
    assert!(html.contains("L: 12°C"), "{html}");
    assert!(html.contains("H: 23.25°C"), "{html}");
    assert!(html.contains("staging"), "{html}");
}

// ============================================================================
// Fallback path
// ============================================================================

#[tokio::test]
async fn missing_location_renders_landing_without_outbound_calls() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(&geocoder, los_angeles(), 0).await;
    mock_forecast(&forecast, clear_and_twenty(), 0).await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().expect("ascii header"),
        "text/html; charset=utf-8"
    );
    assert!(response.text().contains(LANDING_MARKER));
}

#[tokio::test]
async fn blank_location_renders_landing_without_outbound_calls() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(&geocoder, los_angeles(), 0).await;
    mock_forecast(&forecast, clear_and_twenty(), 0).await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/").add_query_param("location", "  ").await;

    response.assert_status_ok();
    assert!(response.text().contains(LANDING_MARKER));
}

#[tokio::test]
async fn repeated_location_parameter_renders_landing() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(&geocoder, los_angeles(), 0).await;
    mock_forecast(&forecast, clear_and_twenty(), 0).await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/?location=Ohio&location=Utah").await;

    response.assert_status_ok();
    assert!(response.text().contains(LANDING_MARKER));
}

#[tokio::test]
async fn geocoder_error_renders_landing_and_skips_weather() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(&geocoder, ResponseTemplate::new(500), 1).await;
    mock_forecast(&forecast, clear_and_twenty(), 0).await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/").add_query_param("location", "California").await;

    response.assert_status_ok();
    assert!(response.text().contains(LANDING_MARKER));
}

#[tokio::test]
async fn unknown_location_renders_landing_and_skips_weather() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(
        &geocoder,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
        1,
    )
    .await;
    mock_forecast(&forecast, clear_and_twenty(), 0).await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/").add_query_param("location", "Atlantis").await;

    response.assert_status_ok();
    assert!(response.text().contains(LANDING_MARKER));
}

#[tokio::test]
async fn weather_error_renders_landing() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(&geocoder, los_angeles(), 1).await;
    mock_forecast(&forecast, ResponseTemplate::new(503), 1).await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/").add_query_param("location", "California").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(LANDING_MARKER));
    assert!(!html.contains("Los Angeles, California"));
}

#[tokio::test]
async fn malformed_weather_payload_renders_landing() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    mock_geocoder(&geocoder, los_angeles(), 1).await;
    mock_forecast(
        &forecast,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "hourly": {} })),
        1,
    )
    .await;

    let server = app(&geocoder, &forecast, "development");
    let response = server.get("/").add_query_param("location", "California").await;

    response.assert_status_ok();
    assert!(response.text().contains(LANDING_MARKER));
}

// ============================================================================
// Static assets
// ============================================================================

#[tokio::test]
async fn serves_bundled_icons() {
    let geocoder = MockServer::start().await;
    let forecast = MockServer::start().await;

    let server = app(&geocoder, &forecast, "development");

    for icon in ["clear", "rain", "snow", "thunderstorm", "info"] {
        let response = server.get(&format!("/static/img/{icon}.svg")).await;
        response.assert_status_ok();
        assert!(response.text().contains("<svg"), "{icon}");
    }

    server.get("/static/css/main.css").await.assert_status_ok();
}

#[tokio::test]
async fn serves_configured_static_dir() {
    let assets = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(assets.path().join("img")).expect("img dir");
    std::fs::write(assets.path().join("img/clear.svg"), "<svg id=\"deployed\"/>").expect("icon");

    let mut config = AppConfig::default();
    config.server.static_dir = Some(assets.path().to_path_buf());
    let state = AppState::from_config(config).expect("Failed to build app state");
    let server = TestServer::new(router(state)).expect("Failed to start test server");

    let response = server.get("/static/img/clear.svg").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "<svg id=\"deployed\"/>");

    server
        .get("/static/css/main.css")
        .await
        .assert_status_not_found();
}
