use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::completion::{ChatMessage, CompletionBackend, CompletionRequest};
use crate::config::ModelConfig;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "placefinder/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .context("Failed to build model HTTP client")?;

        Ok(Self::with_shared_client(
            client,
            &config.base_url,
            config.api_key.clone(),
        ))
    }

    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Model API key is not configured")?;

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: request.temperature,
        };

        debug!(model = %request.model, "Sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Chat completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Model API error: {} - {}", status, body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to decode chat completion envelope")?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::completion::Role;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("cafes")];
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini-2024-07-18",
            messages: &messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: 0.7,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "cafes");
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_response_envelope_with_null_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client = OpenAiClient::with_shared_client(
            Client::new(),
            "https://api.openai.com/v1/",
            Some("  ".to_string()),
        );
        assert!(!client.has_credentials());
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }
}
