//! # shardai - Shard AI API Client
//!
//! A small, pragmatic Rust client for the hosted Shard AI multi-modal
//! API: chat completions, image generation, text-to-speech and
//! moderation.
//!
//! ## Features
//! - Async and blocking clients for every operation, sharing the same
//!   validation and payload shaping
//! - Typed payloads per image tier and speech provider
//! - Fail-fast credential and input checks before any network call
//! - Deferred materialize helpers for image/audio payloads (hosted URL
//!   or inline base64, resolved transparently)
//!
//! ## Architecture
//!
//! One facade per execution mode ([`ShardClient`] /
//! [`BlockingShardClient`]) aggregates a client per remote capability.
//! Each call is independent: validate, build a payload, one HTTP round
//! trip, map the JSON body into an immutable result value.
//!
//! ## Example
//! ```no_run
//! use shardai::ShardClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ShardClient::new("your-api-key");
//!
//!     let chat = client.chat.completions("llama_2_7b", "Hello!").await?;
//!     println!("{}", chat.choice.message.content);
//!
//!     let image = client
//!         .image
//!         .completions("a lighthouse at dusk", &Default::default())
//!         .await?;
//!     image.save("lighthouse.png").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod model;
pub mod options;
pub mod resources;

// Re-exports for convenience
pub use client::{BlockingShardClient, ShardClient, ShardError};
pub use model::{
    AudioResult, ChatMessage, ChatResult, ImageOptionsCatalog, ImageResult, Media,
    ModerationResult, Role, Usage, VoiceCatalog,
};
pub use options::{SecretString, TransportOptions};
pub use resources::{Sd1xParams, SdxlParams, TtsParams, TtsProvider};
