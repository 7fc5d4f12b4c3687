//! Blocking client the terminal page uses to call `POST /compare`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

use crate::events::{RatedEvent, decode_events};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8787";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach server: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response carried no events array")]
    MissingEvents,
    #[error("could not decode response: {0}")]
    Decode(String),
}

#[derive(Clone, Debug)]
pub struct CompareClient {
    endpoint: String,
    client: Client,
}

impl CompareClient {
    pub fn new(server: &str) -> Result<Self, FetchError> {
        // The model can take a long time; the page just keeps spinning.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            endpoint: format!("{}/compare", server.trim_end_matches('/')),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn fetch(&self, query: &str) -> Result<Vec<RatedEvent>, FetchError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        interpret_response(status, &body)
    }
}

/// Turn a `/compare` reply into typed events.
///
/// Elements that fail typed decoding are dropped with a warning rather than
/// failing the whole reply.
pub fn interpret_response(status: u16, body: &str) -> Result<Vec<RatedEvent>, FetchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().chars().take(200).collect());
        return Err(FetchError::Status { status, message });
    }

    let value: Value = serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    let Some(Value::Array(items)) = value.get("events").cloned() else {
        return Err(FetchError::MissingEvents);
    };

    let (events, rejected) = decode_events(items);
    for (idx, reason) in rejected {
        tracing::warn!(index = idx, "dropping malformed event: {}", reason);
    }
    Ok(events)
}
