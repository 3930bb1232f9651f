//! Error type and the aggregate client facades.

use thiserror::Error;

use crate::options::{SecretString, TransportOptions};
use crate::resources::{
    BlockingChat, BlockingImage, BlockingModeration, BlockingTts, Chat, Image, Moderation, Tts,
};

/// Errors that can occur during client operations.
///
/// All of these are terminal: nothing is retried, logged or swallowed
/// internally, and every variant propagates directly to the caller.
#[derive(Error, Debug)]
pub enum ShardError {
    /// No API key configured. Raised before any network attempt.
    #[error("an API key is required for this operation")]
    MissingCredential,

    /// A required input was absent or empty. Raised before any network
    /// attempt.
    #[error("{0} is required for this operation")]
    MissingInput(&'static str),

    /// An unrecognized text-to-speech model name. Raised before a
    /// payload is built.
    #[error("unknown text-to-speech model: {0}")]
    InvalidModel(String),

    /// The remote API answered with a non-200 status. Carries the
    /// status code only; the body is not parsed.
    #[error("API returned status {0}")]
    Remote(u16),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Asynchronous handle over every Shard AI capability, keyed by a
/// single API key.
///
/// All resource clients are constructed eagerly and share the same
/// transport options. Calls are fully independent of each other; no
/// state is shared between them.
///
/// # Example
/// ```no_run
/// use shardai::ShardClient;
///
/// # async fn run() -> Result<(), shardai::ShardError> {
/// let client = ShardClient::new("your-api-key");
/// let response = client.chat.completions("llama_2_7b", "Hello!").await?;
/// println!("{}", response.choice.message.content);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShardClient {
    pub chat: Chat,
    pub image: Image,
    pub tts: Tts,
    pub moderation: Moderation,
}

impl ShardClient {
    /// Create a client for the hosted API with the given key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self::with_options(TransportOptions::new(api_key))
    }

    /// Create a client from `SHARD_API_KEY` / `SHARD_BASE_URL`.
    pub fn from_env() -> Self {
        Self::with_options(TransportOptions::from_env())
    }

    /// Create a client with full control over the transport options.
    pub fn with_options(options: TransportOptions) -> Self {
        Self {
            chat: Chat::new(options.clone()),
            image: Image::new(options.clone()),
            tts: Tts::new(options.clone()),
            moderation: Moderation::new(options),
        }
    }
}

/// Blocking counterpart of [`ShardClient`]. The calling thread is
/// occupied for the full round trip of every operation.
#[derive(Debug, Clone)]
pub struct BlockingShardClient {
    pub chat: BlockingChat,
    pub image: BlockingImage,
    pub tts: BlockingTts,
    pub moderation: BlockingModeration,
}

impl BlockingShardClient {
    /// Create a blocking client for the hosted API with the given key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self::with_options(TransportOptions::new(api_key))
    }

    /// Create a blocking client from `SHARD_API_KEY` / `SHARD_BASE_URL`.
    pub fn from_env() -> Self {
        Self::with_options(TransportOptions::from_env())
    }

    /// Create a blocking client with full control over the transport
    /// options.
    pub fn with_options(options: TransportOptions) -> Self {
        Self {
            chat: BlockingChat::new(options.clone()),
            image: BlockingImage::new(options.clone()),
            tts: BlockingTts::new(options.clone()),
            moderation: BlockingModeration::new(options),
        }
    }
}
