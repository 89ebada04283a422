use serde::{Deserialize, Serialize};

/// A locale supported by one voice model, e.g. "en-US".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceLanguage {
    pub locale: String,
}

/// One synthesis model offered by a voice, with the locales it supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceModel {
    pub name: String,
    #[serde(default)]
    pub languages: Vec<VoiceLanguage>,
}

/// Vendor-supplied voice metadata, as returned by the voice listing endpoint.
/// Read-only: used to pick a voice id, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    #[serde(default)]
    pub id: String,
    pub gender: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub models: Vec<VoiceModel>,
}

/// Optional criteria for narrowing a voice listing. All unset = match all.
#[derive(Debug, Clone, Default)]
pub struct VoiceFilter {
    /// Case-insensitive gender match, e.g. "male".
    pub gender: Option<String>,
    /// Exact locale supported by at least one of the voice's models.
    pub locale: Option<String>,
    /// Tags the voice must all carry, e.g. "timbre:deep".
    pub tags: Option<Vec<String>>,
}

/// Filter voices by gender, locale and/or tags and return the model names of
/// every matching voice.
///
/// All given criteria must hold for a voice to match. Matching voices
/// contribute their model names in input order; duplicates are kept.
pub fn filter_voice_models(voices: &[Voice], filter: &VoiceFilter) -> Vec<String> {
    let mut results = Vec::new();

    for voice in voices {
        if let Some(gender) = &filter.gender {
            if !voice.gender.eq_ignore_ascii_case(gender) {
                continue;
            }
        }

        if let Some(locale) = &filter.locale {
            let supported = voice
                .models
                .iter()
                .any(|model| model.languages.iter().any(|lang| &lang.locale == locale));
            if !supported {
                continue;
            }
        }

        if let Some(tags) = &filter.tags {
            if !tags.iter().all(|tag| voice.tags.contains(tag)) {
                continue;
            }
        }

        results.extend(voice.models.iter().map(|model| model.name.clone()));
    }

    results
}
