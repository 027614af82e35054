//! Environment configuration for the Agentforce provider.

use std::env;
use std::path::PathBuf;

use agentforce_api::AgentforceApiConfig;
use token_store::token_root;

pub const ORG_URL_ENV_VAR: &str = "AGENTFORCE_ORG_URL";
pub const AGENT_ID_ENV_VAR: &str = "AGENTFORCE_AGENT_ID";
pub const CLIENT_ID_ENV_VAR: &str = "AGENTFORCE_CLIENT_ID";
pub const CLIENT_SECRET_ENV_VAR: &str = "AGENTFORCE_CLIENT_SECRET";
pub const AGENT_URL_ENV_VAR: &str = "AGENTFORCE_AGENT_URL";
pub const CHAT_HOME_ENV_VAR: &str = "AGENTFORCE_CHAT_HOME";

/// Connection settings for the real Agentforce provider, read from the
/// environment. `AGENTFORCE_AGENT_URL` overrides the production agent API
/// base URL; `AGENTFORCE_CHAT_HOME` overrides the token cache directory.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub org_base_url: String,
    pub agent_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub agent_base_url: Option<String>,
    pub chat_home: Option<PathBuf>,
}

impl EnvConfig {
    /// Reads the full provider configuration, reporting every missing
    /// required variable in one error message.
    pub fn from_env() -> Result<Self, String> {
        let mut missing = Vec::new();
        let org_base_url = require_env(ORG_URL_ENV_VAR, &mut missing);
        let agent_id = require_env(AGENT_ID_ENV_VAR, &mut missing);
        let client_id = require_env(CLIENT_ID_ENV_VAR, &mut missing);
        let client_secret = require_env(CLIENT_SECRET_ENV_VAR, &mut missing);

        if !missing.is_empty() {
            return Err(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ));
        }

        Ok(Self {
            org_base_url,
            agent_id,
            client_id,
            client_secret,
            agent_base_url: env_string_opt(AGENT_URL_ENV_VAR),
            chat_home: env_string_opt(CHAT_HOME_ENV_VAR).map(PathBuf::from),
        })
    }

    #[must_use]
    pub fn api_config(&self) -> AgentforceApiConfig {
        let config = AgentforceApiConfig::new(
            self.org_base_url.clone(),
            self.agent_id.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
        );

        match &self.agent_base_url {
            Some(agent_base_url) => config.with_agent_base_url(agent_base_url.clone()),
            None => config,
        }
    }

    /// Directory holding the persisted token slot: the `AGENTFORCE_CHAT_HOME`
    /// override when set, otherwise `~/.agentforce_chat`.
    pub fn token_store_root(&self) -> Result<PathBuf, String> {
        if let Some(chat_home) = &self.chat_home {
            return Ok(chat_home.clone());
        }

        dirs::home_dir()
            .map(|home| token_root(&home))
            .ok_or_else(|| "Could not determine a home directory for the token cache".to_string())
    }
}

fn require_env(key: &'static str, missing: &mut Vec<&'static str>) -> String {
    match env_string_opt(key) {
        Some(value) => value,
        None => {
            missing.push(key);
            String::new()
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
