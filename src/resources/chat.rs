//! Chat completion client.

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::client::ShardError;
use crate::http;
use crate::model::{ChatChoice, ChatMessage, ChatResult, Role, Usage};
use crate::options::TransportOptions;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MODELS_PATH: &str = "/v1/chat/models";

/// Asynchronous chat client.
#[derive(Debug, Clone)]
pub struct Chat {
    options: TransportOptions,
}

impl Chat {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Run a chat completion from a single user turn.
    ///
    /// The prompt becomes the only message in the conversation.
    pub async fn completions(&self, model: &str, prompt: &str) -> Result<ChatResult, ShardError> {
        let payload = prompt_payload(&self.options, model, prompt)?;
        let response: ChatResponse =
            http::post_json(&self.options, COMPLETIONS_PATH, &payload).await?;
        Ok(response.into())
    }

    /// Run a chat completion over a pre-built message history, sent in
    /// order and verbatim.
    pub async fn completions_with_messages(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResult, ShardError> {
        let payload = messages_payload(&self.options, model, messages)?;
        let response: ChatResponse =
            http::post_json(&self.options, COMPLETIONS_PATH, &payload).await?;
        Ok(response.into())
    }

    /// List the model identifiers the remote advertises.
    pub async fn models(&self) -> Result<Vec<String>, ShardError> {
        let response: ModelsResponse = http::get_json(&self.options, MODELS_PATH).await?;
        Ok(response.models)
    }
}

/// Blocking chat client.
#[derive(Debug, Clone)]
pub struct BlockingChat {
    options: TransportOptions,
}

impl BlockingChat {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Run a chat completion from a single user turn.
    pub fn completions(&self, model: &str, prompt: &str) -> Result<ChatResult, ShardError> {
        let payload = prompt_payload(&self.options, model, prompt)?;
        let response: ChatResponse =
            http::post_json_blocking(&self.options, COMPLETIONS_PATH, &payload)?;
        Ok(response.into())
    }

    /// Run a chat completion over a pre-built message history.
    pub fn completions_with_messages(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResult, ShardError> {
        let payload = messages_payload(&self.options, model, messages)?;
        let response: ChatResponse =
            http::post_json_blocking(&self.options, COMPLETIONS_PATH, &payload)?;
        Ok(response.into())
    }

    /// List the model identifiers the remote advertises.
    pub fn models(&self) -> Result<Vec<String>, ShardError> {
        let response: ModelsResponse = http::get_json_blocking(&self.options, MODELS_PATH)?;
        Ok(response.models)
    }
}

// --- Payload shaping (shared by both execution modes) ---

#[derive(Debug, Serialize)]
struct ChatPayload {
    model: String,
    messages: Vec<ChatMessage>,
}

fn prompt_payload(
    options: &TransportOptions,
    model: &str,
    prompt: &str,
) -> Result<ChatPayload, ShardError> {
    options.require_credential()?;
    if prompt.trim().is_empty() {
        return Err(ShardError::MissingInput("prompt"));
    }

    Ok(ChatPayload {
        model: model.to_string(),
        messages: vec![ChatMessage::user(prompt)],
    })
}

fn messages_payload(
    options: &TransportOptions,
    model: &str,
    messages: Vec<ChatMessage>,
) -> Result<ChatPayload, ShardError> {
    options.require_credential()?;
    if messages.is_empty() {
        return Err(ShardError::MissingInput("messages"));
    }

    Ok(ChatPayload {
        model: model.to_string(),
        messages,
    })
}

// --- Wire types ---

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    id: String,
    object: String,
    created: u64,
    model: String,
    usage: Usage,
    choices: NonEmpty<ChoiceWire>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceWire {
    message: MessageWire,
    finish_reason: Option<String>,
    index: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageWire {
    role: Role,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelsResponse {
    models: Vec<String>,
}

impl From<ChatResponse> for ChatResult {
    fn from(response: ChatResponse) -> Self {
        // Everything after the first choice is dropped.
        let head = response.choices.head;

        ChatResult {
            id: response.id,
            object: response.object,
            created: response.created,
            model: response.model,
            usage: response.usage,
            choice: ChatChoice {
                message: ChatMessage {
                    role: head.message.role,
                    content: head.message.content,
                },
                finish_reason: head.finish_reason,
                index: head.index,
            },
        }
    }
}
