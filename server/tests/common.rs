//! Common utilities for integration tests

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use server::config::ServerConfig;
use server::tts::TtsClient;
use server::{build_router, AppState};

/// Create an app instance wired to a mock speech service.
pub async fn create_test_app(mock: &MockServer) -> Router {
    let config = ServerConfig {
        tts_service_url: format!("{}/api/tts", mock.uri()),
        ..ServerConfig::default()
    };

    let tts = Arc::new(
        TtsClient::new(&config.tts_service_url, None, Duration::from_secs(5))
            .expect("failed to build TTS client for tests"),
    );

    let state = AppState {
        tts,
        request_count: Arc::new(AtomicU64::new(0)),
        config,
    };

    build_router(state)
}

/// Mount a successful speech-service response on the mock server.
pub async fn mock_tts_response(mock: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/tts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock)
        .await;
}
