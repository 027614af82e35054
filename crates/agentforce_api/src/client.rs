use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::AgentforceApiConfig;
use crate::error::AgentforceApiError;
use crate::payload::{
    MessageSendRequest, MessageSendResponse, SessionOpenRequest, SessionOpenResponse, TokenGrant,
};
use crate::session::{ActiveSession, ClientState, SessionInfo};
use crate::session_key::generate_session_key;
use crate::url::{
    normalize_base_url, session_messages_url, sessions_url, token_url, userinfo_url,
};

/// Value of the `x-session-end-reason` header sent on session teardown.
const SESSION_END_REASON: &str = "UserRequest";

#[derive(Debug)]
pub struct AgentforceApiClient {
    http: Client,
    config: AgentforceApiConfig,
}

impl AgentforceApiClient {
    pub fn new(config: AgentforceApiConfig) -> Result<Self, AgentforceApiError> {
        let http = Client::builder().build().map_err(AgentforceApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AgentforceApiConfig {
        &self.config
    }

    /// Exchange the configured client credentials for an access token.
    ///
    /// The token endpoint's HTTP status is not consulted: a parseable body
    /// carrying an `access_token` wins, anything else fails with
    /// [`AgentforceApiError::Auth`] embedding the raw body. The new token
    /// replaces whatever `state` held before.
    pub async fn authenticate(
        &self,
        state: &mut ClientState,
    ) -> Result<String, AgentforceApiError> {
        let url = token_url(&self.config.org_base_url);
        debug!(%url, "requesting access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let body = response.text().await?;
        let token = match extract_access_token(&body) {
            Some(token) => token,
            None => return Err(AgentforceApiError::Auth { body }),
        };

        debug!("access token obtained");
        state.access_token = Some(token.clone());
        Ok(token)
    }

    /// Authenticate only when `state` holds no token.
    pub async fn ensure_token(&self, state: &mut ClientState) -> Result<(), AgentforceApiError> {
        if state.access_token.is_some() {
            return Ok(());
        }
        self.authenticate(state).await.map(|_| ())
    }

    async fn token_for_request(
        &self,
        state: &mut ClientState,
    ) -> Result<String, AgentforceApiError> {
        if let Some(token) = &state.access_token {
            return Ok(token.clone());
        }
        self.authenticate(state).await
    }

    /// Open a session against the configured agent, authenticating first
    /// when no token is held. The opened session replaces any previous one
    /// in `state` and its sequence counter starts over.
    pub async fn open_session(
        &self,
        state: &mut ClientState,
    ) -> Result<SessionInfo, AgentforceApiError> {
        let token = self.token_for_request(state).await?;
        let external_session_key = generate_session_key();
        let url = sessions_url(&self.config.agent_base_url, &self.config.agent_id);
        debug!(%url, %external_session_key, "opening agent session");

        let request = SessionOpenRequest::new(
            external_session_key.clone(),
            normalize_base_url(&self.config.org_base_url),
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AgentforceApiError::SessionCreation { status, body });
        }

        let parsed: SessionOpenResponse = serde_json::from_str(&body)?;
        let session = SessionInfo {
            session_id: parsed.session_id.clone(),
            stream_url: parsed.stream_url(),
            end_session_url: parsed.end_session_url(),
            initial_message: parsed.initial_message(),
            external_session_key,
        };
        info!(session_id = %session.session_id, "agent session opened");
        state.session = Some(ActiveSession::opened(&session));
        Ok(session)
    }

    /// Open a session only when `state` holds none.
    pub async fn ensure_session(&self, state: &mut ClientState) -> Result<(), AgentforceApiError> {
        if state.session.is_some() {
            return Ok(());
        }
        self.open_session(state).await.map(|_| ())
    }

    /// Send one user turn, opening a session first when none is active.
    ///
    /// The sequence counter advances before the request goes out and is not
    /// wound back afterwards; a failed send consumes its sequence number.
    /// Returns the agent's reply text, or `None` when the response carried
    /// no reply content.
    pub async fn send_message(
        &self,
        state: &mut ClientState,
        text: &str,
    ) -> Result<Option<String>, AgentforceApiError> {
        self.ensure_session(state).await?;
        let token = self.token_for_request(state).await?;
        let (session_id, sequence_id) = match state.session.as_mut() {
            Some(session) => (session.session_id.clone(), session.next_sequence_id()),
            None => return Err(AgentforceApiError::NoActiveSession),
        };

        let url = session_messages_url(&self.config.agent_base_url, &session_id);
        debug!(%url, sequence_id, "sending message");

        let request = MessageSendRequest::text(sequence_id, text);
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AgentforceApiError::MessageSend { status, body });
        }

        let parsed: MessageSendResponse = serde_json::from_str(&body)?;
        Ok(parsed.first_message())
    }

    /// Tear down the active session.
    ///
    /// Fails with [`AgentforceApiError::NoActiveSession`] before any
    /// network call when none is active, and leaves the session in `state`
    /// when the server rejects the teardown. The cached token always stays;
    /// tokens are reusable across sessions.
    pub async fn end_session(&self, state: &mut ClientState) -> Result<(), AgentforceApiError> {
        let session_id = match &state.session {
            Some(session) => session.session_id.clone(),
            None => return Err(AgentforceApiError::NoActiveSession),
        };
        let token = state.access_token.clone().unwrap_or_default();

        let url = session_messages_url(&self.config.agent_base_url, &session_id);
        debug!(%url, "ending agent session");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&token)
            .header("x-session-end-reason", SESSION_END_REASON)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentforceApiError::SessionTermination { status });
        }

        info!(%session_id, "agent session ended");
        state.session = None;
        Ok(())
    }

    /// Probe the userinfo endpoint with the held token.
    ///
    /// Never fails: transport errors report `false`, and holding no token
    /// short-circuits to `false` without a network call.
    pub async fn is_token_valid(&self, state: &ClientState) -> bool {
        let Some(token) = state.access_token.as_deref() else {
            return false;
        };

        let url = userinfo_url(&self.config.org_base_url);
        match self.http.get(&url).bearer_auth(token).send().await {
            Ok(response) => response.status().is_success(),
            Err(error) => {
                debug!(%url, %error, "token validity probe failed");
                false
            }
        }
    }

    /// Re-authenticate when no token is held or the held one no longer
    /// validates. Callers invoke this explicitly; nothing schedules it.
    pub async fn refresh_token_if_needed(
        &self,
        state: &mut ClientState,
    ) -> Result<(), AgentforceApiError> {
        if self.is_token_valid(state).await {
            return Ok(());
        }
        self.authenticate(state).await.map(|_| ())
    }
}

fn extract_access_token(body: &str) -> Option<String> {
    let grant: TokenGrant = serde_json::from_str(body).ok()?;
    grant.access_token.filter(|token| !token.is_empty())
}
