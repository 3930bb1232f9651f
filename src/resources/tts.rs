//! Text-to-speech client.
//!
//! The API fronts four speech backends with two payload families:
//! narrator providers (Google, Edge) take a gender and a language,
//! voice-clone providers (ElevenLabs, TikTok) take a voice name.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ShardError;
use crate::http;
use crate::model::{AudioResult, Media, VoiceCatalog};
use crate::options::TransportOptions;

const COMPLETIONS_PATH: &str = "/v1/tts/completions";
const VOICES_PATH: &str = "/v1/tts/voices";

const DEFAULT_MODEL: &str = "ElevenLabs";
const DEFAULT_GENDER: &str = "Male";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_VOICE: &str = "Rachel";

/// The four speech backends the API fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtsProvider {
    Google,
    Edge,
    ElevenLabs,
    TikTok,
}

impl TtsProvider {
    /// Resolve a model name case-insensitively. Anything outside the
    /// four known providers is rejected before a payload exists.
    pub fn from_model(name: &str) -> Result<Self, ShardError> {
        match name.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "edge" => Ok(Self::Edge),
            "elevenlabs" => Ok(Self::ElevenLabs),
            "tiktok" => Ok(Self::TikTok),
            _ => Err(ShardError::InvalidModel(name.to_string())),
        }
    }

    /// Narrator providers speak from gender/language; the others clone
    /// a named voice.
    fn is_narrator(self) -> bool {
        matches!(self, Self::Google | Self::Edge)
    }
}

/// Parameters for a speech completion. Defaults select the ElevenLabs
/// provider with its `Rachel` voice.
#[derive(Debug, Clone)]
pub struct TtsParams {
    pub model: String,
    /// Narrator providers only.
    pub gender: String,
    /// Narrator providers only.
    pub language: String,
    /// Voice-clone providers only.
    pub voice: String,
}

impl Default for TtsParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            gender: DEFAULT_GENDER.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

impl TtsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the gender (narrator providers).
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Set the language (narrator providers).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the voice name (voice-clone providers).
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}

/// Asynchronous text-to-speech client.
#[derive(Debug, Clone)]
pub struct Tts {
    options: TransportOptions,
}

impl Tts {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Synthesize speech for `prompt` with the provider selected by
    /// `params.model`.
    pub async fn completions(
        &self,
        prompt: &str,
        params: &TtsParams,
    ) -> Result<AudioResult, ShardError> {
        let payload = tts_payload(&self.options, prompt, params)?;
        let response: AudioResponse =
            http::post_json(&self.options, COMPLETIONS_PATH, &payload).await?;
        Ok(response.into())
    }

    /// Fetch the per-provider voice catalog.
    pub async fn voices(&self) -> Result<VoiceCatalog, ShardError> {
        http::get_json(&self.options, VOICES_PATH).await
    }
}

/// Blocking text-to-speech client.
#[derive(Debug, Clone)]
pub struct BlockingTts {
    options: TransportOptions,
}

impl BlockingTts {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Synthesize speech for `prompt` with the provider selected by
    /// `params.model`.
    pub fn completions(&self, prompt: &str, params: &TtsParams) -> Result<AudioResult, ShardError> {
        let payload = tts_payload(&self.options, prompt, params)?;
        let response: AudioResponse =
            http::post_json_blocking(&self.options, COMPLETIONS_PATH, &payload)?;
        Ok(response.into())
    }

    /// Fetch the per-provider voice catalog.
    pub fn voices(&self) -> Result<VoiceCatalog, ShardError> {
        http::get_json_blocking(&self.options, VOICES_PATH)
    }
}

// --- Payload shaping (shared by both execution modes) ---

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum TtsPayload {
    Narrator {
        prompt: String,
        model: String,
        gender: String,
        language: String,
    },
    VoiceClone {
        prompt: String,
        model: String,
        voice: String,
    },
}

fn tts_payload(
    options: &TransportOptions,
    prompt: &str,
    params: &TtsParams,
) -> Result<TtsPayload, ShardError> {
    options.require_credential()?;
    if prompt.trim().is_empty() {
        return Err(ShardError::MissingInput("prompt"));
    }
    let provider = TtsProvider::from_model(&params.model)?;

    Ok(if provider.is_narrator() {
        TtsPayload::Narrator {
            prompt: prompt.to_string(),
            model: params.model.clone(),
            gender: params.gender.clone(),
            language: params.language.clone(),
        }
    } else {
        TtsPayload::VoiceClone {
            prompt: prompt.to_string(),
            model: params.model.clone(),
            voice: params.voice.clone(),
        }
    })
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct AudioResponse {
    audio: Media,
    #[serde(rename = "generation-time")]
    generation_time: f64,
    #[serde(rename = "warning!")]
    warning: Option<String>,
    info: Option<Value>,
}

impl From<AudioResponse> for AudioResult {
    fn from(response: AudioResponse) -> Self {
        AudioResult {
            audio: response.audio,
            generation_time: response.generation_time,
            warning: response.warning,
            info: response.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_resolution_is_case_insensitive() {
        assert_eq!(
            TtsProvider::from_model("ElevenLabs").unwrap(),
            TtsProvider::ElevenLabs
        );
        assert_eq!(
            TtsProvider::from_model("GOOGLE").unwrap(),
            TtsProvider::Google
        );
        assert_eq!(
            TtsProvider::from_model("tiktok").unwrap(),
            TtsProvider::TikTok
        );
        assert_eq!(TtsProvider::from_model("Edge").unwrap(), TtsProvider::Edge);
    }

    #[test]
    fn unknown_model_is_invalid_before_payload_exists() {
        let options = TransportOptions::new("key");
        let params = TtsParams::new().with_model("bogus");

        match tts_payload(&options, "hello", &params) {
            Err(ShardError::InvalidModel(name)) => assert_eq!(name, "bogus"),
            other => panic!("expected InvalidModel, got {:?}", other),
        }
    }

    #[test]
    fn narrator_payload_carries_gender_and_language() {
        let options = TransportOptions::new("key");
        let params = TtsParams::new()
            .with_model("google")
            .with_gender("Female")
            .with_language("de");
        let payload = tts_payload(&options, "hallo", &params).unwrap();

        let value = serde_json::to_value(&payload).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["gender", "language", "model", "prompt"]);
        assert_eq!(value["gender"], "Female");
        assert_eq!(value["language"], "de");
    }

    #[test]
    fn voice_clone_payload_defaults_to_rachel() {
        let options = TransportOptions::new("key");
        let payload = tts_payload(&options, "hello", &TtsParams::default()).unwrap();

        let value = serde_json::to_value(&payload).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["model", "prompt", "voice"]);
        assert_eq!(value["voice"], "Rachel");
        assert_eq!(value["model"], "ElevenLabs");
    }

    #[test]
    fn empty_prompt_is_missing_input() {
        let options = TransportOptions::new("key");
        assert!(matches!(
            tts_payload(&options, "", &TtsParams::default()),
            Err(ShardError::MissingInput("prompt"))
        ));
    }
}
