use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::domain::tts::interface::{TtsInterface, CACHE_DIR};
use crate::error::TtsError;
use crate::infrastructure::config::SpeechifyConfig;

use super::client::{HttpSpeechifyClient, SpeechOptions, SpeechRequest, SpeechifyApi, SpeechResponse};
use super::{AudioFormat, SpeechifyModel};

/// Speechify implementation of the synthesis interface.
///
/// Holds immutable, validated configuration plus an opaque API client. A
/// client that failed to construct leaves the engine disabled: every
/// synthesis call then fails locally without touching the network.
#[derive(Clone)]
pub struct SpeechifyTts {
    client: Option<Arc<dyn SpeechifyApi>>,
    voice_id: String,
    model: SpeechifyModel,
    language: Option<String>,
    audio_format: AudioFormat,
    loudness_normalization: bool,
    text_normalization: bool,
    cache_dir: PathBuf,
}

impl SpeechifyTts {
    /// Build the engine from host configuration.
    ///
    /// Invalid `audio_format` / `model` values are replaced by their defaults
    /// with a warning. A failed client construction is logged and recorded as
    /// a disabled engine; it is never propagated to the caller.
    pub fn new(config: SpeechifyConfig) -> Self {
        let client = match HttpSpeechifyClient::new(&config) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn SpeechifyApi>),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Speechify client");
                None
            }
        };

        Self::with_client(config, client)
    }

    /// Build the engine around an already constructed API client.
    ///
    /// This is the seam tests and hosts use to inject a fake or shared
    /// client. Passing `None` yields a permanently disabled engine.
    pub fn with_client(config: SpeechifyConfig, client: Option<Arc<dyn SpeechifyApi>>) -> Self {
        let audio_format = AudioFormat::parse_or_default(&config.audio_format);
        let model = SpeechifyModel::parse_or_default(&config.model);

        if client.is_some() {
            tracing::info!(
                model = %model,
                voice_id = %config.voice_id,
                audio_format = %audio_format,
                "Speechify TTS engine initialized"
            );
        }

        Self {
            client,
            voice_id: config.voice_id,
            model,
            language: config.language,
            audio_format,
            loudness_normalization: config.loudness_normalization,
            text_normalization: config.text_normalization,
            cache_dir: PathBuf::from(CACHE_DIR),
        }
    }

    /// Redirect cache writes to another directory (tests, embedding hosts).
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    fn build_request(&self, text: &str) -> SpeechRequest {
        SpeechRequest {
            audio_format: self.audio_format,
            input: text.to_string(),
            language: self.language.clone(),
            model: self.model,
            options: SpeechOptions {
                loudness_normalization: self.loudness_normalization,
                text_normalization: self.text_normalization,
            },
            voice_id: self.voice_id.clone(),
        }
    }

    /// One vendor call plus decode and cache write.
    fn request_and_write(
        &self,
        client: &dyn SpeechifyApi,
        text: &str,
        path: &Path,
    ) -> anyhow::Result<SpeechResponse> {
        let request = self.build_request(text);
        let response = client.speech(&request)?;

        let audio_bytes = BASE64
            .decode(response.audio_data.as_bytes())
            .context("Speechify returned audio that is not valid base64")?;

        fs::create_dir_all(&self.cache_dir).with_context(|| {
            format!("failed to create cache directory {}", self.cache_dir.display())
        })?;
        fs::write(path, &audio_bytes)
            .with_context(|| format!("failed to write audio file {}", path.display()))?;

        Ok(response)
    }
}

#[async_trait]
impl TtsInterface for SpeechifyTts {
    fn file_extension(&self) -> &str {
        self.audio_format.as_str()
    }

    fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn synthesize(&self, text: &str, file_stem: Option<&str>) -> Result<PathBuf, TtsError> {
        if text.trim().is_empty() {
            return Err(TtsError::InvalidInput(
                "text to synthesize is empty".to_string(),
            ));
        }

        let Some(client) = &self.client else {
            tracing::error!("Speechify client not initialized, cannot generate audio");
            return Err(TtsError::NotInitialized(
                "Speechify client not initialized".to_string(),
            ));
        };

        let path = self.generate_cache_file_name(file_stem);
        let text_preview: String = text.chars().take(50).collect();

        tracing::debug!(
            voice_id = %self.voice_id,
            model = %self.model,
            text_preview = %text_preview,
            "Generating audio via Speechify"
        );

        match self.request_and_write(client.as_ref(), text, &path) {
            Ok(response) => {
                if let Some(count) = response.billable_characters_count {
                    tracing::debug!(billable_characters = count, "Speechify billed characters");
                }
                tracing::info!(
                    path = %path.display(),
                    "Successfully generated audio file via Speechify"
                );
                Ok(path)
            }
            Err(e) => {
                tracing::error!(error = %e, "Speechify TTS unable to generate audio");
                // Clean up a potentially incomplete file
                if path.exists() {
                    self.remove_file(&path);
                }
                Err(TtsError::ExternalService(format!("{:#}", e)))
            }
        }
    }

    async fn synthesize_async(
        &self,
        text: &str,
        file_stem: Option<&str>,
    ) -> Result<PathBuf, TtsError> {
        let engine = self.clone();
        let text = text.to_string();
        let file_stem = file_stem.map(str::to_string);

        tokio::task::spawn_blocking(move || engine.synthesize(&text, file_stem.as_deref()))
            .await
            .map_err(|e| TtsError::Internal(format!("synthesis task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // base64 for "test audio data"
    const AUDIO_B64: &str = "dGVzdCBhdWRpbyBkYXRh";
    const AUDIO_BYTES: &[u8] = b"test audio data";

    /// Fake API client recording every request and returning a canned result.
    struct FakeClient {
        calls: Mutex<Vec<SpeechRequest>>,
        audio_data: String,
        fail: bool,
    }

    impl FakeClient {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                audio_data: AUDIO_B64.to_string(),
                fail: false,
            })
        }

        fn with_audio_data(audio_data: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                audio_data: audio_data.to_string(),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                audio_data: String::new(),
                fail: true,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_request(&self) -> SpeechRequest {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl SpeechifyApi for FakeClient {
        fn speech(&self, request: &SpeechRequest) -> anyhow::Result<SpeechResponse> {
            self.calls.lock().unwrap().push(request.clone());
            if self.fail {
                anyhow::bail!("simulated API failure");
            }
            Ok(SpeechResponse {
                audio_data: self.audio_data.clone(),
                audio_format: Some("mp3".to_string()),
                billable_characters_count: Some(10),
            })
        }
    }

    fn engine_with(client: Arc<FakeClient>, config: SpeechifyConfig) -> (SpeechifyTts, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let engine = SpeechifyTts::with_client(config, Some(client as Arc<dyn SpeechifyApi>))
            .with_cache_dir(dir.path());
        (engine, dir)
    }

    #[test]
    fn test_invalid_audio_format_defaults_to_mp3() {
        let mut config = SpeechifyConfig::new("key");
        config.audio_format = "invalid_format".to_string();

        let engine = SpeechifyTts::with_client(config, None);
        assert_eq!(engine.file_extension(), "mp3");
    }

    #[test]
    fn test_invalid_model_defaults_to_simba_english() {
        let mut config = SpeechifyConfig::new("key");
        config.model = "invalid_model".to_string();

        let engine = SpeechifyTts::with_client(config, None);
        assert_eq!(engine.build_request("hi").model, SpeechifyModel::SimbaEnglish);
    }

    #[test]
    fn test_empty_text_fails_without_calling_the_api() {
        let client = FakeClient::ok();
        let (engine, _dir) = engine_with(client.clone(), SpeechifyConfig::new("key"));

        let err = engine.synthesize("", None).unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn test_whitespace_text_fails_without_calling_the_api() {
        let client = FakeClient::ok();
        let (engine, _dir) = engine_with(client.clone(), SpeechifyConfig::new("key"));

        let err = engine.synthesize("   ", None).unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn test_disabled_engine_always_fails() {
        let engine = SpeechifyTts::with_client(SpeechifyConfig::new("key"), None);

        let err = engine.synthesize("Hello world", None).unwrap_err();
        assert!(matches!(err, TtsError::NotInitialized(_)));
    }

    #[test]
    fn test_synthesize_writes_decoded_audio() {
        let client = FakeClient::ok();
        let (engine, dir) = engine_with(client.clone(), SpeechifyConfig::new("key"));

        let path = engine.synthesize("Hello world", Some("greeting")).unwrap();

        assert_eq!(path, dir.path().join("greeting.mp3"));
        assert_eq!(fs::read(&path).unwrap(), AUDIO_BYTES);
        assert_eq!(client.call_count(), 1);
    }

    #[test]
    fn test_synthesize_without_stem_writes_temp_file() {
        let client = FakeClient::ok();
        let (engine, dir) = engine_with(client, SpeechifyConfig::new("key"));

        let path = engine.synthesize("Hello world", None).unwrap();
        assert_eq!(path, dir.path().join("temp.mp3"));
    }

    #[test]
    fn test_configured_format_drives_the_cache_extension() {
        let mut config = SpeechifyConfig::new("key");
        config.audio_format = "wav".to_string();
        let client = FakeClient::ok();
        let (engine, dir) = engine_with(client, config);

        let path = engine.synthesize("Hello world", Some("x")).unwrap();
        assert_eq!(path, dir.path().join("x.wav"));
    }

    #[test]
    fn test_request_carries_configuration() {
        let mut config = SpeechifyConfig::new("key");
        config.voice_id = "mrbeast".to_string();
        config.model = "simba-multilingual".to_string();
        config.language = Some("en-US".to_string());
        config.text_normalization = false;

        let client = FakeClient::ok();
        let (engine, _dir) = engine_with(client.clone(), config);
        engine.synthesize("Hello world", None).unwrap();

        let request = client.last_request();
        assert_eq!(request.voice_id, "mrbeast");
        assert_eq!(request.model, SpeechifyModel::SimbaMultilingual);
        assert_eq!(request.language.as_deref(), Some("en-US"));
        assert_eq!(request.input, "Hello world");
        assert!(request.options.loudness_normalization);
        assert!(!request.options.text_normalization);
    }

    #[test]
    fn test_api_failure_maps_to_external_service_error() {
        let client = FakeClient::failing();
        let (engine, dir) = engine_with(client, SpeechifyConfig::new("key"));

        let err = engine.synthesize("Hello world", Some("clip")).unwrap_err();
        assert!(matches!(err, TtsError::ExternalService(_)));
        assert!(!dir.path().join("clip.mp3").exists());
    }

    #[test]
    fn test_api_failure_cleans_up_stale_file_at_target_path() {
        let client = FakeClient::failing();
        let (engine, dir) = engine_with(client, SpeechifyConfig::new("key"));

        let stale = dir.path().join("clip.mp3");
        fs::write(&stale, b"stale audio").unwrap();

        engine.synthesize("Hello world", Some("clip")).unwrap_err();
        assert!(!stale.exists());
    }

    #[test]
    fn test_undecodable_payload_is_a_failure() {
        let client = FakeClient::with_audio_data("!!!not base64!!!");
        let (engine, dir) = engine_with(client, SpeechifyConfig::new("key"));

        let err = engine.synthesize("Hello world", Some("clip")).unwrap_err();
        assert!(matches!(err, TtsError::ExternalService(_)));
        assert!(!dir.path().join("clip.mp3").exists());
    }

    #[tokio::test]
    async fn test_synthesize_async_matches_blocking_contract() {
        let client = FakeClient::ok();
        let (engine, dir) = engine_with(client.clone(), SpeechifyConfig::new("key"));

        let path = engine
            .synthesize_async("Hello world", Some("async"))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("async.mp3"));
        assert_eq!(fs::read(&path).unwrap(), AUDIO_BYTES);
    }

    #[tokio::test]
    async fn test_synthesize_async_rejects_empty_text() {
        let client = FakeClient::ok();
        let (engine, _dir) = engine_with(client.clone(), SpeechifyConfig::new("key"));

        let err = engine.synthesize_async("  ", None).await.unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
        assert_eq!(client.call_count(), 0);
    }
}
