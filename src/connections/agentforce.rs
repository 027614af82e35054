use agentforce_api::{AgentforceApiClient, ClientState};
use async_trait::async_trait;
use token_store::TokenStore;
use tracing::warn;

use crate::connection::AgentConnection;

/// `AgentConnection` backed by the real Agentforce API.
///
/// Owns the protocol state and the persistent token slot: the state is
/// seeded from the cached token at construction, and whenever an operation
/// leaves a different token behind (a lazy authenticate inside open or
/// send), the new token is written back. A failed write is logged and does
/// not fail the operation that produced the token.
pub struct AgentforceConnection {
    client: AgentforceApiClient,
    state: ClientState,
    store: Option<TokenStore>,
}

impl AgentforceConnection {
    pub fn new(client: AgentforceApiClient, store: Option<TokenStore>) -> Self {
        let mut state = ClientState::new();
        if let Some(store) = &store {
            match store.load() {
                Ok(cached) => state.access_token = cached,
                Err(error) => warn!("ignoring cached access token: {error}"),
            }
        }

        Self {
            client,
            state,
            store,
        }
    }

    fn persist_token_if_changed(&self, previous: Option<&str>) {
        let Some(store) = &self.store else {
            return;
        };

        match self.state.access_token.as_deref() {
            Some(token) if previous != Some(token) => {
                if let Err(error) = store.save(token) {
                    warn!("failed to persist access token: {error}");
                }
            }
            _ => {}
        }
    }
}

#[async_trait]
impl AgentConnection for AgentforceConnection {
    async fn open(&mut self) -> Result<Option<String>, String> {
        let previous = self.state.access_token.clone();
        let result = self.client.open_session(&mut self.state).await;
        self.persist_token_if_changed(previous.as_deref());

        result
            .map(|session| session.initial_message)
            .map_err(|error| error.to_string())
    }

    async fn send(&mut self, text: &str) -> Result<Option<String>, String> {
        let previous = self.state.access_token.clone();
        let result = self.client.send_message(&mut self.state, text).await;
        self.persist_token_if_changed(previous.as_deref());

        result.map_err(|error| error.to_string())
    }

    async fn end(&mut self) -> Result<(), String> {
        self.client
            .end_session(&mut self.state)
            .await
            .map_err(|error| error.to_string())
    }

    fn is_open(&self) -> bool {
        self.state.has_session()
    }
}
