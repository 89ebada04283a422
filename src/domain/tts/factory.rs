use crate::infrastructure::config::TtsConfig;
use crate::infrastructure::speechify::SpeechifyTts;

use super::interface::TtsInterface;

/// Create a TTS engine from config values.
///
/// `adapter` is a string key so hosts can select a backend from plain
/// configuration. Currently wired: "speechify". Sibling vendor adapters
/// register here.
pub fn create_tts_engine(
    adapter: &str,
    config: &TtsConfig,
) -> anyhow::Result<Box<dyn TtsInterface>> {
    match adapter {
        "speechify" => Ok(Box::new(SpeechifyTts::new(config.speechify.clone()))),
        other => anyhow::bail!("Unknown TTS adapter: {}", other),
    }
}
