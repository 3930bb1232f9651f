//! Result value objects returned by the Shard AI API.
//!
//! Everything here is an immutable value populated from a decoded JSON
//! response; nothing has a lifecycle beyond the call that created it.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ShardError;
use crate::http;

/// Role of a chat message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role/content pair in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Build a user-turn message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Build an assistant-turn message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Token usage accounting attached to a chat completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Usage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

/// The single completion choice retained from a chat response.
#[derive(Debug, Clone)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
    pub index: u32,
}

/// Result of a chat completion call.
///
/// The API returns at least one choice; only the first is retained.
#[derive(Debug, Clone)]
pub struct ChatResult {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub usage: Usage,
    pub choice: ChatChoice,
}

/// An image or audio payload as returned by the API.
///
/// The remote puts either a URL or an inline base64 data URI in the
/// same string field; the two are told apart once, here, by prefix.
/// Materializing the payload is deferred until the caller asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Media {
    /// Payload hosted at a remote URL; materializing costs one GET.
    Remote(String),
    /// Inline base64 payload, optionally `data:<mime>;base64,`-prefixed.
    Inline(String),
}

impl From<String> for Media {
    fn from(payload: String) -> Self {
        if payload.starts_with("http") {
            Media::Remote(payload)
        } else {
            Media::Inline(payload)
        }
    }
}

impl Media {
    /// Materialize the payload as raw bytes.
    ///
    /// `Remote` issues exactly one additional GET; `Inline` decodes
    /// locally without touching the network.
    pub async fn as_bytes(&self) -> Result<Bytes, ShardError> {
        match self {
            Media::Remote(url) => http::fetch_bytes(url).await,
            Media::Inline(data) => decode_inline(data),
        }
    }

    /// Blocking counterpart of [`Media::as_bytes`].
    pub fn as_bytes_blocking(&self) -> Result<Bytes, ShardError> {
        match self {
            Media::Remote(url) => http::fetch_bytes_blocking(url),
            Media::Inline(data) => decode_inline(data),
        }
    }

    /// Materialize the payload into a file at `path`.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ShardError> {
        let bytes = self.as_bytes().await?;
        tokio::fs::write(path, &bytes).await?;
        Ok(())
    }

    /// Blocking counterpart of [`Media::save`].
    pub fn save_blocking(&self, path: impl AsRef<Path>) -> Result<(), ShardError> {
        let bytes = self.as_bytes_blocking()?;
        std::fs::write(path, &bytes)?;
        Ok(())
    }
}

/// Strip a `data:<mime>;base64,` prefix if present and decode the rest.
fn decode_inline(data: &str) -> Result<Bytes, ShardError> {
    let encoded = match data.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => data,
    };
    Ok(Bytes::from(STANDARD.decode(encoded)?))
}

/// Result of an image generation call on any tier.
#[derive(Debug, Clone)]
pub struct ImageResult {
    pub image: Media,
    pub generation_time: f64,
    pub warning: Option<String>,
    /// Model-tier metadata the endpoint chooses to attach, if any.
    pub info: Option<Value>,
}

impl ImageResult {
    /// Materialize the generated image as raw bytes.
    pub async fn as_bytes(&self) -> Result<Bytes, ShardError> {
        self.image.as_bytes().await
    }

    /// Blocking counterpart of [`ImageResult::as_bytes`].
    pub fn as_bytes_blocking(&self) -> Result<Bytes, ShardError> {
        self.image.as_bytes_blocking()
    }

    /// Materialize the generated image into a file at `path`.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ShardError> {
        self.image.save(path).await
    }

    /// Blocking counterpart of [`ImageResult::save`].
    pub fn save_blocking(&self, path: impl AsRef<Path>) -> Result<(), ShardError> {
        self.image.save_blocking(path)
    }
}

/// Result of a text-to-speech call.
#[derive(Debug, Clone)]
pub struct AudioResult {
    pub audio: Media,
    pub generation_time: f64,
    pub warning: Option<String>,
    pub info: Option<Value>,
}

impl AudioResult {
    /// Materialize the generated audio as raw bytes.
    pub async fn as_bytes(&self) -> Result<Bytes, ShardError> {
        self.audio.as_bytes().await
    }

    /// Blocking counterpart of [`AudioResult::as_bytes`].
    pub fn as_bytes_blocking(&self) -> Result<Bytes, ShardError> {
        self.audio.as_bytes_blocking()
    }

    /// Materialize the generated audio into a file at `path`.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ShardError> {
        self.audio.save(path).await
    }

    /// Blocking counterpart of [`AudioResult::save`].
    pub fn save_blocking(&self, path: impl AsRef<Path>) -> Result<(), ShardError> {
        self.audio.save_blocking(path)
    }
}

/// Request metadata echoed back by the moderation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationEcho {
    pub prompt: Option<String>,
    pub attribute: Option<String>,
    pub time: Option<f64>,
}

/// Result of a moderation call.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationResult {
    pub score: f64,
    /// Detected and declared languages as echoed by the API.
    pub languages: Vec<String>,
    pub data: ModerationEcho,
}

/// An ElevenLabs voice descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsVoice {
    pub name: String,
    pub accent: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub use_case: Option<String>,
}

/// Edge voices arrive as a message plus an opaque parameter blob.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeVoices {
    #[serde(rename = "Message")]
    pub message: String,
    pub parameters: Value,
}

/// Google voices arrive as a single message blob.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleVoices {
    #[serde(rename = "Messages")]
    pub messages: Value,
}

/// Voice descriptors per provider, as returned by `/v1/tts/voices`.
///
/// Each provider's descriptor shape differs: ElevenLabs carries labeled
/// descriptors, TikTok bare names, Edge and Google parameter blobs.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceCatalog {
    #[serde(rename = "eleven_labs", default)]
    pub elevenlabs: Vec<ElevenLabsVoice>,

    #[serde(default)]
    pub tiktok: Vec<String>,

    /// The wire calls this provider `bing`.
    #[serde(rename = "bing")]
    pub edge: EdgeVoices,

    pub google: GoogleVoices,
}

/// Valid models, aspect ratios and samplers for an image tier.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageOptionsCatalog {
    pub models: Vec<String>,
    pub ratios: Vec<String>,
    pub samplers: Vec<String>,

    /// Base tier only.
    pub upscale: Option<bool>,

    /// High-resolution tier only.
    pub styles: Option<Vec<String>>,
}
