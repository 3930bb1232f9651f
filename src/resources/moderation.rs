//! Moderation client.

use serde::{Deserialize, Serialize};

use crate::client::ShardError;
use crate::http;
use crate::model::ModerationResult;
use crate::options::TransportOptions;

const COMPLETIONS_PATH: &str = "/v1/moderation/completions";
const ATTRIBUTES_PATH: &str = "/v1/moderation/attributes";

const DEFAULT_ATTRIBUTE: &str = "TOXICITY";

/// Asynchronous moderation client.
#[derive(Debug, Clone)]
pub struct Moderation {
    options: TransportOptions,
}

impl Moderation {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Score `prompt` against `attribute` (default `TOXICITY`).
    pub async fn completions(
        &self,
        prompt: &str,
        attribute: Option<&str>,
    ) -> Result<ModerationResult, ShardError> {
        let payload = moderation_payload(&self.options, prompt, attribute)?;
        http::post_json(&self.options, COMPLETIONS_PATH, &payload).await
    }

    /// List the attributes the remote can score against.
    pub async fn attributes(&self) -> Result<Vec<String>, ShardError> {
        let response: AttributesResponse = http::get_json(&self.options, ATTRIBUTES_PATH).await?;
        Ok(response.attributes)
    }
}

/// Blocking moderation client.
#[derive(Debug, Clone)]
pub struct BlockingModeration {
    options: TransportOptions,
}

impl BlockingModeration {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Score `prompt` against `attribute` (default `TOXICITY`).
    pub fn completions(
        &self,
        prompt: &str,
        attribute: Option<&str>,
    ) -> Result<ModerationResult, ShardError> {
        let payload = moderation_payload(&self.options, prompt, attribute)?;
        http::post_json_blocking(&self.options, COMPLETIONS_PATH, &payload)
    }

    /// List the attributes the remote can score against.
    pub fn attributes(&self) -> Result<Vec<String>, ShardError> {
        let response: AttributesResponse = http::get_json_blocking(&self.options, ATTRIBUTES_PATH)?;
        Ok(response.attributes)
    }
}

// --- Payload shaping (shared by both execution modes) ---

#[derive(Debug, Serialize)]
struct ModerationPayload {
    prompt: String,
    attribute: String,
}

fn moderation_payload(
    options: &TransportOptions,
    prompt: &str,
    attribute: Option<&str>,
) -> Result<ModerationPayload, ShardError> {
    options.require_credential()?;
    if prompt.trim().is_empty() {
        return Err(ShardError::MissingInput("prompt"));
    }

    Ok(ModerationPayload {
        prompt: prompt.to_string(),
        attribute: attribute.unwrap_or(DEFAULT_ATTRIBUTE).to_string(),
    })
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct AttributesResponse {
    // The wire key is singular.
    #[serde(rename = "attribute")]
    attributes: Vec<String>,
}
