use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Provider};
use crate::config::{Settings, OPENAI_API_KEY};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },

    #[error("API returned no message content")]
    EmptyResponse,
}

/// Something that can answer a chat conversation with a single message.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, ApiConnectionError>;
}

impl Provider {
    pub fn openai(settings: &Settings) -> Self {
        Self::OpenAi {
            api_key: settings.openai_api_key.clone(),
            base_url: settings.openai_base_url.trim_end_matches('/').to_string(),
            model: settings.model_name.clone(),
            client: Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAi { model, .. } => model,
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        match self {
            Provider::OpenAi {
                api_key,
                base_url,
                client,
                ..
            } => {
                if api_key.trim().is_empty() {
                    return Err(ApiConnectionError::MissingApiKey(OPENAI_API_KEY.to_string()));
                }

                let url = format!("{}/chat/completions", base_url);
                debug!(%url, model = %request.model, messages = request.messages.len(), "Sending chat completion");

                let response = client
                    .post(&url)
                    .bearer_auth(api_key)
                    .header("Content-Type", "application/json")
                    .json(&request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let chat_response = response.json::<ChatCompletionResponse>().await?;
                    Ok(chat_response)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    warn!(%status, "Chat completion rejected");
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}

#[async_trait]
impl ChatCompletion for Provider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, ApiConnectionError> {
        let request = ChatCompletionRequest {
            model: self.model().to_string(),
            messages,
            temperature: Some(temperature),
            max_tokens: None,
        };
        let response = self.call_chat_completion(request).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or(ApiConnectionError::EmptyResponse)
    }
}

/// Models like to wrap JSON in markdown fences even when told not to.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_suffix("```") else {
        return trimmed;
    };
    if let Some(rest) = inner.strip_prefix("```json") {
        rest.trim()
    } else if let Some(rest) = inner.strip_prefix("```") {
        rest.trim()
    } else {
        trimmed
    }
}
