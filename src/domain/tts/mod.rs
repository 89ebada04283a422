pub mod factory;
pub mod interface;
pub mod voice;

pub use factory::create_tts_engine;
pub use interface::{TtsInterface, CACHE_DIR};
pub use voice::{filter_voice_models, Voice, VoiceFilter, VoiceLanguage, VoiceModel};
