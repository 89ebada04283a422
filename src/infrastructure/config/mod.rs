use serde::Deserialize;
use std::env;

/// Top-level TTS configuration: which adapter to use plus per-vendor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_adapter")]
    pub adapter: String,
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    pub speechify: SpeechifyConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Settings for the Speechify adapter.
///
/// `model` and `audio_format` stay plain strings here; the adapter validates
/// them on construction and falls back to its defaults on mismatch, so a
/// typo in host configuration never disables synthesis.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechifyConfig {
    pub api_key: String,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Language code such as "en-US". None lets the vendor auto-detect.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
    #[serde(default = "default_true")]
    pub loudness_normalization: bool,
    #[serde(default = "default_true")]
    pub text_normalization: bool,
}

fn default_adapter() -> String {
    "speechify".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_voice_id() -> String {
    "scott".to_string()
}

fn default_model() -> String {
    "simba-english".to_string()
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

fn default_true() -> bool {
    true
}

impl SpeechifyConfig {
    /// Config with every field at its default except the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            voice_id: default_voice_id(),
            model: default_model(),
            language: None,
            audio_format: default_audio_format(),
            loudness_normalization: true,
            text_normalization: true,
        }
    }
}

impl TtsConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = TtsConfig {
            adapter: env::var("TTS_ADAPTER").unwrap_or_else(|_| default_adapter()),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            speechify: SpeechifyConfig {
                api_key: env::var("SPEECHIFY_API_KEY")?,
                voice_id: env::var("SPEECHIFY_VOICE_ID").unwrap_or_else(|_| default_voice_id()),
                model: env::var("SPEECHIFY_MODEL").unwrap_or_else(|_| default_model()),
                language: env::var("SPEECHIFY_LANGUAGE").ok(),
                audio_format: env::var("SPEECHIFY_AUDIO_FORMAT")
                    .unwrap_or_else(|_| default_audio_format()),
                loudness_normalization: env_flag("SPEECHIFY_LOUDNESS_NORMALIZATION"),
                text_normalization: env_flag("SPEECHIFY_TEXT_NORMALIZATION"),
            },
        };

        Ok(config)
    }
}

/// Boolean env var, defaulting to true when unset or unparsable.
fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|s| s.to_lowercase() == "true")
        .unwrap_or(true)
}
