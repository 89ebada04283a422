//! Text-to-speech backend for the avatar host.
//!
//! Exposes a generic synthesis interface ([`domain::tts::TtsInterface`]),
//! a factory that selects a vendor adapter by string key, and the Speechify
//! cloud adapter as the wired backend.

pub mod domain;
pub mod error;
pub mod infrastructure;
