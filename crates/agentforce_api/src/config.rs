use crate::url::DEFAULT_AGENT_BASE_URL;

/// Connection settings for one Agentforce agent.
#[derive(Debug, Clone)]
pub struct AgentforceApiConfig {
    /// Salesforce My Domain base URL. Hosts the token and userinfo
    /// endpoints and is also sent as the `instanceConfig` endpoint when a
    /// session is opened.
    pub org_base_url: String,
    /// Base URL for the Einstein AI Agent API.
    pub agent_base_url: String,
    /// Identifier of the agent that sessions are opened against.
    pub agent_id: String,
    /// Connected-app consumer key.
    pub client_id: String,
    /// Connected-app consumer secret.
    pub client_secret: String,
}

impl Default for AgentforceApiConfig {
    fn default() -> Self {
        Self {
            org_base_url: String::new(),
            agent_base_url: DEFAULT_AGENT_BASE_URL.to_string(),
            agent_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

impl AgentforceApiConfig {
    pub fn new(
        org_base_url: impl Into<String>,
        agent_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            org_base_url: org_base_url.into(),
            agent_id: agent_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    pub fn with_agent_base_url(mut self, agent_base_url: impl Into<String>) -> Self {
        self.agent_base_url = agent_base_url.into();
        self
    }
}
