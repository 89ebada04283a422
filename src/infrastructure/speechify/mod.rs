//! Speechify cloud TTS adapter.
//!
//! API Reference: https://docs.speechify.com/api/tts

pub mod client;
pub mod engine;

use serde::{Deserialize, Serialize};

pub use client::{HttpSpeechifyClient, SpeechOptions, SpeechRequest, SpeechResponse, SpeechifyApi};
pub use engine::SpeechifyTts;

/// Audio container formats supported by the Speechify API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Aac,
    Mp3,
    Ogg,
    Wav,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Aac => "aac",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Wav => "wav",
        }
    }

    /// Parse a configured format. Unknown values fall back to mp3 with a
    /// warning instead of failing.
    pub fn parse_or_default(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "aac" => AudioFormat::Aac,
            "mp3" => AudioFormat::Mp3,
            "ogg" => AudioFormat::Ogg,
            "wav" => AudioFormat::Wav,
            other => {
                tracing::warn!(
                    audio_format = other,
                    "Unsupported audio format for Speechify TTS, defaulting to mp3. Valid formats: aac, mp3, ogg, wav"
                );
                AudioFormat::Mp3
            }
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synthesis models offered by Speechify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechifyModel {
    #[serde(rename = "simba-english")]
    SimbaEnglish,
    #[serde(rename = "simba-multilingual")]
    SimbaMultilingual,
}

impl SpeechifyModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechifyModel::SimbaEnglish => "simba-english",
            SpeechifyModel::SimbaMultilingual => "simba-multilingual",
        }
    }

    /// Parse a configured model. Unknown values fall back to simba-english
    /// with a warning instead of failing. Matching is exact: model names are
    /// case-sensitive identifiers.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "simba-english" => SpeechifyModel::SimbaEnglish,
            "simba-multilingual" => SpeechifyModel::SimbaMultilingual,
            other => {
                tracing::warn!(
                    model = other,
                    "Unsupported model for Speechify TTS, defaulting to simba-english. Valid models: simba-english, simba-multilingual"
                );
                SpeechifyModel::SimbaEnglish
            }
        }
    }
}

impl std::fmt::Display for SpeechifyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
