use agentforce_api::AgentforceApiClient;
use token_store::TokenStore;

use crate::config::EnvConfig;
use crate::connection::AgentConnection;

mod agentforce;
mod mock;

pub use agentforce::AgentforceConnection;
pub use mock::MockConnection;

pub const DEFAULT_PROVIDER_ID: &str = "mock";
pub const AGENTFORCE_PROVIDER_ID: &str = "agentforce";
pub const PROVIDER_ENV_VAR: &str = "AGENTFORCE_CHAT_PROVIDER";

pub fn connection_from_env() -> Result<Box<dyn AgentConnection>, String> {
    let provider_id = std::env::var(PROVIDER_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    connection_for_id(provider_id.as_deref().unwrap_or(DEFAULT_PROVIDER_ID))
}

pub fn connection_for_id(provider_id: &str) -> Result<Box<dyn AgentConnection>, String> {
    match provider_id {
        DEFAULT_PROVIDER_ID => Ok(Box::new(MockConnection::default())),
        AGENTFORCE_PROVIDER_ID => agentforce_connection_from_env(),
        unknown => Err(format!(
            "Unsupported provider '{unknown}'. Available providers: \
             {DEFAULT_PROVIDER_ID}, {AGENTFORCE_PROVIDER_ID}"
        )),
    }
}

fn agentforce_connection_from_env() -> Result<Box<dyn AgentConnection>, String> {
    let config = EnvConfig::from_env()?;
    let root = config.token_store_root()?;
    let store = TokenStore::open(&root).map_err(|error| {
        format!(
            "Failed to open the token cache at {}: {error}",
            root.display()
        )
    })?;
    let client = AgentforceApiClient::new(config.api_config())
        .map_err(|error| format!("Failed to build the HTTP client: {error}"))?;

    Ok(Box::new(AgentforceConnection::new(client, Some(store))))
}
