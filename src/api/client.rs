use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::api::{parse_outcome, ChatOutcome, ModelClient, RequestBody};
use crate::error::{CalChatError, Result};
use crate::models::Message;

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, endpoint: &str, model: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                CalChatError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
        })
    }
}

impl ModelClient for OpenAiClient {
    async fn chat(&self, messages: &[Message], tools: Option<&[Value]>) -> Result<ChatOutcome> {
        let request_body = RequestBody {
            model: self.model.clone(),
            messages: messages.to_vec(),
            tools: tools.map(|t| t.to_vec()),
            tool_choice: tools.map(|_| "auto".to_string()),
        };

        tracing::debug!(model = %self.model, turns = messages.len(), "calling model");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CalChatError::Model {
                status: Some(status.as_u16()),
                message,
            });
        }

        let response_json: Value = response.json().await.map_err(|e| CalChatError::Model {
            status: None,
            message: format!("Malformed model response: {}", e),
        })?;

        parse_outcome(&response_json)
    }
}
