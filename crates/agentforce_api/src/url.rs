/// Default base URL for the Einstein AI Agent API.
pub const DEFAULT_AGENT_BASE_URL: &str = "https://api.salesforce.com/einstein/ai-agent/v1";

/// Trim surrounding whitespace and trailing slashes from a configured base
/// URL so endpoint paths can be appended without doubling separators.
pub fn normalize_base_url(input: &str) -> String {
    input.trim().trim_end_matches('/').to_string()
}

/// OAuth2 client-credentials token endpoint for an org.
pub fn token_url(org_base_url: &str) -> String {
    format!("{}/services/oauth2/token", normalize_base_url(org_base_url))
}

/// Userinfo endpoint used as a lightweight token-validity probe.
pub fn userinfo_url(org_base_url: &str) -> String {
    format!(
        "{}/services/oauth2/userinfo",
        normalize_base_url(org_base_url)
    )
}

/// Session-creation endpoint for one agent.
pub fn sessions_url(agent_base_url: &str, agent_id: &str) -> String {
    format!(
        "{}/agents/{agent_id}/sessions",
        normalize_base_url(agent_base_url)
    )
}

/// Message endpoint for an open session. POST sends a message; DELETE on
/// the same path ends the session.
pub fn session_messages_url(agent_base_url: &str, session_id: &str) -> String {
    format!(
        "{}/sessions/{session_id}/messages",
        normalize_base_url(agent_base_url)
    )
}
