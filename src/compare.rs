//! The `/compare` core: prompt the model once, then dig the array out of its reply.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::ModelClient;
use crate::config::ModelSettings;
use crate::error::CompareError;
use crate::extract::extract_json_array;
use crate::prompts::build_request;

#[derive(Clone)]
pub struct CompareService {
    client: Arc<dyn ModelClient>,
    settings: ModelSettings,
}

impl CompareService {
    pub fn new(client: Arc<dyn ModelClient>, settings: ModelSettings) -> Self {
        Self { client, settings }
    }

    /// Rate `query` and fetch comparisons. The array is returned as parsed,
    /// without checking element fields.
    pub async fn compare(&self, query: &str) -> Result<Vec<Value>, CompareError> {
        let request = build_request(query, &self.settings);

        let response = self.client.create_message(&request).await.map_err(|e| {
            tracing::warn!(hint = e.classify().unwrap_or("none"), "model call failed: {}", e);
            CompareError::from(e)
        })?;

        tracing::debug!(response = ?response, "model response");

        let text = response
            .first_text()
            .ok_or(CompareError::MissingTextContent)?;

        let events = extract_json_array(text)?;
        if events.len() != 4 {
            tracing::info!(count = events.len(), "model returned an unexpected number of events");
        }
        Ok(events)
    }
}
