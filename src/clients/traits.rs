use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One Messages API request: a fixed model, a token budget and the turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessageResponse {
    /// Response carrying a single text block, mostly for fakes.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            model: None,
            content: vec![ContentBlock::Text { text: text.into() }],
            stop_reason: Some("end_turn".to_string()),
        }
    }

    /// Text of the first block typed as plain text.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// Content blocks are tagged by `type`; anything but text is opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model API key is not configured")]
    MissingApiKey,
    #[error("model call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("http error: {0}")]
    Http(String),
    #[error("model service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("parse error: {0}")]
    ParseError(String),
}

impl ModelError {
    /// Coarse hint for logs.
    pub fn classify(&self) -> Option<&'static str> {
        match self {
            ModelError::MissingApiKey => Some("auth"),
            ModelError::Api { status, .. } => match status {
                401 | 403 => Some("auth"),
                429 => Some("rate_limit"),
                503 | 529 => Some("overloaded"),
                _ => None,
            },
            _ => None,
        }
    }
}

/// The text-generation collaborator. One call, no retry.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn create_message(&self, request: &MessageRequest)
    -> Result<MessageResponse, ModelError>;
}
