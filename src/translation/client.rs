use crate::utils::{Result, SoupIssuesError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

const API_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: usize = 8192;

const SYSTEM_PROMPT: &str = "You are a professional Japanese translator. \
Translate the issue title and body you are given into Japanese. \
Return only the translated text: the first line is the translated title, \
then a blank line, then the translated body.";

/// One completion call translating a title/body pair. Dyn-compatible so the
/// translator can run against a test double.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, title: &str, body: &str) -> Result<String>;
}

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: usize,
    system: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            temperature,
            endpoint: API_ENDPOINT.to_string(),
        }
    }
}

#[async_trait]
impl CompletionApi for AnthropicClient {
    async fn complete(&self, title: &str, body: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: format!("Title:\n{}\n\nBody:\n{}", title, body),
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SoupIssuesError::ApiError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let api_response: AnthropicResponse = response.json().await?;

        api_response
            .content
            .into_iter()
            .find_map(|block| {
                if block.content_type == "text" {
                    block.text
                } else {
                    None
                }
            })
            .ok_or_else(|| SoupIssuesError::ApiError("No text content in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_extracts_first_text_block() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{"content": [{"type": "thinking", "text": null},
                            {"type": "text", "text": "タイトル\n\n本文"}]}"#,
        )
        .unwrap();
        let text = response
            .content
            .into_iter()
            .find_map(|b| if b.content_type == "text" { b.text } else { None });
        assert_eq!(text.as_deref(), Some("タイトル\n\n本文"));
    }
}
