use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Format the speech service emits when it does not say otherwise.
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;
pub const DEFAULT_CHANNELS: u16 = 1;
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// Structure for the speech service request
#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
}

/// Structure for the speech service response. The format fields are optional
/// so deployments that only ever emit the default format still parse.
#[derive(Deserialize)]
struct SpeechResponse {
    audio_base64: String,
    sample_rate: Option<u32>,
    channels: Option<u16>,
    bits_per_sample: Option<u16>,
}

/// One synthesized clip: base64 raw PCM plus the format it was rendered in.
#[derive(Debug, Clone)]
pub struct TtsClip {
    pub audio_base64: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

pub struct TtsClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl TtsClient {
    /// Create a new client for the remote speech-synthesis service.
    pub fn new(url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key,
        })
    }

    /// Send text to the speech service and return its base64 PCM payload.
    pub async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<TtsClip> {
        let req_body = SpeechRequest { text, voice };

        let mut request = self.client.post(&self.url).json(&req_body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("speech service unreachable")?
            .error_for_status()
            .context("speech service returned an error status")?
            .json::<SpeechResponse>()
            .await
            .context("speech service returned an unparsable body")?;

        Ok(TtsClip {
            audio_base64: response.audio_base64,
            sample_rate: response.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            channels: response.channels.unwrap_or(DEFAULT_CHANNELS),
            bits_per_sample: response.bits_per_sample.unwrap_or(DEFAULT_BITS_PER_SAMPLE),
        })
    }
}
