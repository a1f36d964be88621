use std::time::Duration;

use anyhow::{bail, Result};

use convo_api::{ApiClient, ClientConfig};
use convo_types::SessionHandle;

use crate::cli::Cli;

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_config: ClientConfig,
    /// Conversation to resume when the REPL starts
    pub seed_conversation: Option<SessionHandle>,
    pub assume_yes: bool,
}

impl AppConfig {
    /// Shared HTTP client for every subcommand
    pub fn api_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.client_config)?)
    }
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let client_config = ClientConfig::new(&cli.base_url)
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));

    let seed_conversation = match cli.conversation.as_deref() {
        None => None,
        Some(raw) => match SessionHandle::new(raw) {
            Some(handle) => Some(handle),
            None => bail!("--conversation needs a non-empty id"),
        },
    };

    log::debug!("Using chatbot server at {}", client_config.base_url);

    Ok(AppConfig {
        client_config,
        seed_conversation,
        assume_yes: cli.yes,
    })
}
