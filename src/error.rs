//! Domain-specific error types for insanity-meter

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::clients::ModelError;

/// Message returned for remote-call and request-body failures.
pub const PROCESS_FAILURE_MESSAGE: &str = "Failed to process request";
/// Message returned when the model reply holds no usable JSON array.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse response";

/// Startup, configuration and server errors
#[derive(Error, Debug)]
pub enum InsanityMeterError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("HTTP server error: {message}")]
    Http { message: String },
}

impl From<toml::de::Error> for InsanityMeterError {
    fn from(err: toml::de::Error) -> Self {
        InsanityMeterError::Config {
            message: format!("Invalid config file: {}", err),
        }
    }
}

/// Failures of one `/compare` round trip.
///
/// Every variant is reported to the caller as HTTP 500 with a generic
/// message; the specific cause only reaches the server log.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("model call failed: {0}")]
    Remote(#[from] ModelError),

    #[error("no text content found in the response")]
    MissingTextContent,

    #[error("could not find JSON array in response")]
    NoJsonArrayFound,

    #[error("matched JSON array is invalid: {source}")]
    JsonParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request body: {message}")]
    InvalidRequest { message: String },
}

impl CompareError {
    /// Short machine-readable label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CompareError::Remote(_) => "remote_call_failure",
            CompareError::MissingTextContent => "missing_text_content",
            CompareError::NoJsonArrayFound => "no_json_array_found",
            CompareError::JsonParse { .. } => "json_parse_failure",
            CompareError::InvalidRequest { .. } => "invalid_request",
        }
    }

    /// The generic message the caller sees.
    pub fn public_message(&self) -> &'static str {
        match self {
            CompareError::NoJsonArrayFound | CompareError::JsonParse { .. } => {
                PARSE_FAILURE_MESSAGE
            }
            CompareError::Remote(_)
            | CompareError::MissingTextContent
            | CompareError::InvalidRequest { .. } => PROCESS_FAILURE_MESSAGE,
        }
    }
}

/// Collapse every compare failure into HTTP 500 `{ "error": ... }`
impl IntoResponse for CompareError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), error = %self, "compare request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}

/// Result type alias for insanity-meter operations
pub type Result<T> = std::result::Result<T, InsanityMeterError>;
