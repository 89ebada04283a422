use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::TtsError;

/// Directory where synthesized audio files are written.
pub const CACHE_DIR: &str = "cache";

/// Generic synthesis interface implemented by every TTS adapter.
/// Abstracts the underlying vendor (Speechify, Polly, ElevenLabs, etc.)
///
/// Implementations are responsible for:
/// - Validating their configuration and substituting defaults
/// - Performing one vendor call per synthesis request
/// - Writing the resulting audio into the cache directory
#[async_trait]
pub trait TtsInterface: Send + Sync {
    /// File extension of the audio this adapter produces, e.g. "mp3".
    fn file_extension(&self) -> &str;

    /// Synthesize `text` and write the audio into the cache directory.
    ///
    /// Performs blocking network and file I/O; from async code use
    /// [`synthesize_async`](Self::synthesize_async) instead.
    ///
    /// Returns the path of the written audio file.
    fn synthesize(&self, text: &str, file_stem: Option<&str>) -> Result<PathBuf, TtsError>;

    /// Same contract as [`synthesize`](Self::synthesize), executed off the
    /// calling task so a cooperative scheduler is never blocked.
    async fn synthesize_async(
        &self,
        text: &str,
        file_stem: Option<&str>,
    ) -> Result<PathBuf, TtsError>;

    /// Directory this adapter writes audio files to.
    fn cache_dir(&self) -> &Path {
        Path::new(CACHE_DIR)
    }

    /// Build the cache path for a synthesis request.
    ///
    /// An absent stem falls back to the shared `temp` slot, which later
    /// requests overwrite.
    fn generate_cache_file_name(&self, file_stem: Option<&str>) -> PathBuf {
        let stem = file_stem.unwrap_or("temp");
        self.cache_dir()
            .join(format!("{}.{}", stem, self.file_extension()))
    }

    /// Delete a previously generated audio file.
    ///
    /// A missing file is logged and ignored; this never fails.
    fn remove_file(&self, path: &Path) {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed audio file");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Audio file not found, nothing to remove");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not remove audio file");
            }
        }
    }
}
