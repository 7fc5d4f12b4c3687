pub mod clients;
pub mod compare;
pub mod config;
pub mod deserializers;
pub mod error;
pub mod events;
pub mod extract;
pub mod http;
pub mod prompts;
pub mod ui;

use std::sync::Arc;

use crate::clients::{AnthropicClient, ModelClient};
use crate::compare::CompareService;
use crate::config::Config;
use crate::error::{InsanityMeterError, Result};

/// Wire the production model client into a compare service.
pub fn build_service(config: &Config) -> Result<CompareService> {
    let client = AnthropicClient::from_config(config).map_err(|e| InsanityMeterError::Config {
        message: e.to_string(),
    })?;
    let client: Arc<dyn ModelClient> = Arc::new(client);
    Ok(CompareService::new(client, config.model.clone()))
}
