//! Integration tests for the speech front-end server

mod common;

use std::io::Cursor;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

fn synthesize_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/synthesize")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let mock = MockServer::start().await;
    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_index_serves_ui() {
    let mock = MockServer::start().await;
    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("<audio"));
    assert!(page.contains("/api/synthesize"));
}

#[tokio::test]
async fn test_synthesize_success() {
    let mock = MockServer::start().await;

    // 9600 bytes of 16-bit mono PCM at 24 kHz is 200 ms of audio
    let pcm: Vec<u8> = (0..9600u32).map(|i| (i % 251) as u8).collect();
    mock_tts_response(
        &mock,
        json!({
            "audio_base64": general_purpose::STANDARD.encode(&pcm),
            "sample_rate": 24000,
            "channels": 1,
            "bits_per_sample": 16
        }),
    )
    .await;

    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(&json!({ "text": "Hello, this is a test" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(reply["sample_rate"], 24000);
    assert_eq!(reply["channels"], 1);
    assert_eq!(reply["bits_per_sample"], 16);
    assert_eq!(reply["duration_ms"], 200);

    // The returned clip is a complete WAV container around the PCM payload
    let wav = general_purpose::STANDARD
        .decode(reply["audio_base64"].as_str().unwrap())
        .unwrap();
    assert_eq!(wav.len(), 44 + pcm.len());
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[44..], &pcm[..]);

    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 24000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
}

#[tokio::test]
async fn test_synthesize_defaults_format_when_service_omits_it() {
    let mock = MockServer::start().await;
    let pcm = [0u8, 1, 2, 3];
    mock_tts_response(
        &mock,
        json!({ "audio_base64": general_purpose::STANDARD.encode(pcm) }),
    )
    .await;

    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(&json!({ "text": "Hi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(reply["sample_rate"], 24000);
    assert_eq!(reply["channels"], 1);
    assert_eq!(reply["bits_per_sample"], 16);
}

#[tokio::test]
async fn test_synthesize_validation_empty_text() {
    let mock = MockServer::start().await;
    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(&json!({ "text": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(reply["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_synthesize_validation_bad_voice() {
    let mock = MockServer::start().await;
    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(
            &json!({ "text": "Hello", "voice": "../etc/passwd" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_synthesize_empty_audio_from_service() {
    let mock = MockServer::start().await;
    mock_tts_response(&mock, json!({ "audio_base64": "" })).await;

    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(&json!({ "text": "Hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(reply["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_synthesize_malformed_base64_from_service() {
    let mock = MockServer::start().await;
    mock_tts_response(&mock, json!({ "audio_base64": "not valid base64!!" })).await;

    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(&json!({ "text": "Hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_synthesize_invalid_format_from_service() {
    let mock = MockServer::start().await;
    mock_tts_response(
        &mock,
        json!({
            "audio_base64": general_purpose::STANDARD.encode([0u8, 1]),
            "sample_rate": 24000,
            "channels": 1,
            "bits_per_sample": 7
        }),
    )
    .await;

    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(&json!({ "text": "Hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_synthesize_service_failure() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(synthesize_request(&json!({ "text": "Hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let mock = MockServer::start().await;
    let app = create_test_app(&mock).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let metrics: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(metrics["request_count"].is_number());
    assert!(metrics["uptime_seconds"].is_number());
}
