pub mod config;
pub mod error;
pub mod tts;
pub mod validation;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::tts::TtsClient;
use crate::validation::validate_synthesize_request;

#[derive(Clone)]
pub struct AppState {
    pub tts: Arc<TtsClient>,
    pub request_count: Arc<AtomicU64>,
    pub config: ServerConfig,
}

#[derive(Deserialize)]
pub struct SynthesizeRequest {
    text: String,
    voice: Option<String>,
}

#[derive(Serialize)]
pub struct SynthesizeResponse {
    audio_base64: String,
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
    duration_ms: u64,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub request_count: u64,
    pub uptime_seconds: u64,
}

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record server start time for uptime reporting.
pub fn init_start_time() {
    let _ = START_TIME.get_or_init(Instant::now);
}

/// Build the application router. Middleware (tracing, rate limiting,
/// timeouts, CORS) is layered on top by the binary.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/synthesize", post(synthesize_endpoint))
        .route("/metrics", get(metrics_endpoint));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .nest("/api", api)
        .with_state(state)
}

/// The browser UI is a single self-contained page compiled into the binary.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> Json<MetricsResponse> {
    let request_count = state.request_count.load(Ordering::Relaxed);
    let uptime_seconds = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    Json(MetricsResponse {
        request_count,
        uptime_seconds,
    })
}

pub async fn synthesize_endpoint(
    State(state): State<AppState>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_synthesize_request(&req.text, req.voice.as_deref())?;

    info!(
        "Synthesis request: text length={}, voice={:?}",
        req.text.len(),
        req.voice
    );

    let clip = state
        .tts
        .synthesize(&req.text, req.voice.as_deref())
        .await
        .map_err(|e| ApiError::Upstream(format!("{e:#}")))?;

    let pcm = audio_core::decode_base64(&clip.audio_base64)?;
    if pcm.is_empty() {
        return Err(ApiError::Audio(audio_core::AudioError::EmptyData));
    }

    let audio_base64 =
        audio_core::encode_wav_base64(&pcm, clip.sample_rate, clip.channels, clip.bits_per_sample)?;

    // encode_wav_base64 validated the format, so byte_rate is non-zero
    let byte_rate =
        clip.sample_rate as u64 * clip.channels as u64 * (clip.bits_per_sample as u64 / 8);
    let duration_ms = pcm.len() as u64 * 1000 / byte_rate;

    Ok(Json(SynthesizeResponse {
        audio_base64,
        sample_rate: clip.sample_rate,
        channels: clip.channels,
        bits_per_sample: clip.bits_per_sample,
        duration_ms,
    }))
}
