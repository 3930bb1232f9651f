//! Per-capability resource clients.

pub mod chat;
pub mod image;
pub mod moderation;
pub mod tts;

// Re-export for convenience
pub use chat::{BlockingChat, Chat};
pub use image::{BlockingImage, Image, Sd1xParams, SdxlParams};
pub use moderation::{BlockingModeration, Moderation};
pub use tts::{BlockingTts, Tts, TtsParams, TtsProvider};
