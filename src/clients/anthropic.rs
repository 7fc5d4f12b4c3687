//! Anthropic Messages API client for the /compare handler

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::clients::traits::{MessageRequest, MessageResponse, ModelClient, ModelError};
use crate::config::{Config, ModelSettings};

#[derive(Clone, Debug)]
pub struct AnthropicClient {
    endpoint: String,
    api_key: Option<String>,
    api_version: String,
    timeout_ms: Option<u64>,
    client: Client,
}

impl AnthropicClient {
    pub fn new(settings: &ModelSettings, api_key: Option<String>) -> Result<Self, ModelError> {
        let endpoint = format!("{}/v1/messages", settings.api_base.trim_end_matches('/'));

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| ModelError::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key,
            api_version: settings.api_version.clone(),
            timeout_ms: settings.timeout_ms,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ModelError> {
        Self::new(&config.model, config.runtime.api_key.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_err(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout {
                timeout_ms: self.timeout_ms.unwrap_or_default(),
            }
        } else {
            ModelError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn create_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;

        let res = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_err(e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| self.map_send_err(e))?;

        if !status.is_success() {
            return Err(ModelError::Api {
                status: status.as_u16(),
                body: truncate_snippet(body.trim(), 500),
            });
        }

        tracing::debug!(raw = %body, "model response body");

        serde_json::from_str::<MessageResponse>(&body).map_err(|e| {
            ModelError::ParseError(format!(
                "{}: {}",
                e,
                truncate_snippet(body.trim(), 200)
            ))
        })
    }
}

fn truncate_snippet(input: &str, max: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in input.chars().enumerate() {
        if idx >= max {
            out.push_str("...");
            break;
        }
        out.push(ch);
    }
    out
}
