use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::infrastructure::config::SpeechifyConfig;

use super::{AudioFormat, SpeechifyModel};

/// Hosted Speechify API endpoint for synthesis requests.
const SPEECH_URL: &str = "https://api.sh.speechify.com/v1/audio/speech";

/// Normalization switches forwarded with every synthesis call.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechOptions {
    pub loudness_normalization: bool,
    pub text_normalization: bool,
}

/// Body of `POST /v1/audio/speech`.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest {
    pub audio_format: AudioFormat,
    pub input: String,
    /// Omitted entirely when None so the vendor auto-detects the language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub model: SpeechifyModel,
    pub options: SpeechOptions,
    pub voice_id: String,
}

/// Response of `POST /v1/audio/speech`. `audio_data` is base64 encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechResponse {
    pub audio_data: String,
    #[serde(default)]
    pub audio_format: Option<String>,
    /// Characters billed for this request, when the API reports it.
    #[serde(default)]
    pub billable_characters_count: Option<u64>,
}

/// Minimal surface of the Speechify API used by the adapter.
///
/// Kept behind a trait so tests substitute a fake without touching the
/// network.
pub trait SpeechifyApi: Send + Sync {
    /// Perform one synthesis call. Blocking.
    fn speech(&self, request: &SpeechRequest) -> anyhow::Result<SpeechResponse>;
}

/// reqwest-backed client for the hosted Speechify API.
pub struct HttpSpeechifyClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl HttpSpeechifyClient {
    pub fn new(config: &SpeechifyConfig) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
        })
    }
}

impl SpeechifyApi for HttpSpeechifyClient {
    fn speech(&self, request: &SpeechRequest) -> anyhow::Result<SpeechResponse> {
        let response = self
            .http
            .post(SPEECH_URL)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .context("Speechify TTS request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Speechify API error {}: {}", status, body);
        }

        response
            .json::<SpeechResponse>()
            .context("Failed to decode Speechify response")
    }
}
