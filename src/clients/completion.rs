//! Seam between the search service and whatever text-generation model
//! answers it.

use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single-shot completion asking for one JSON object back.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Whether a credential is available. Checked before every call so a
    /// misconfigured deployment never reaches the network.
    fn has_credentials(&self) -> bool;

    /// Sends the request and returns the raw message content.
    /// `Ok(None)` means the model answered with no content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>>;
}
