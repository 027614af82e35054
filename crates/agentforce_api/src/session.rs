/// Mutable protocol state threaded through every client operation.
///
/// Operations take this by exclusive reference, so overlapping mutation of
/// the token or the sequence counter is ruled out at compile time. Callers
/// that cache tokens across runs seed `access_token` before the first call
/// and read it back afterwards to persist it.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub access_token: Option<String>,
    pub session: Option<ActiveSession>,
}

impl ClientState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

/// Bookkeeping for the one live session held in [`ClientState`].
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub session_id: String,
    pub external_session_key: String,
    pub stream_url: Option<String>,
    pub end_session_url: Option<String>,
    /// Last sequence id sent over this session; advances before each
    /// outbound message and is never shared with another session.
    pub sequence_id: u64,
}

impl ActiveSession {
    /// State for a freshly opened session. The sequence counter starts at
    /// zero so the first outbound message carries sequence id 1.
    #[must_use]
    pub fn opened(info: &SessionInfo) -> Self {
        Self {
            session_id: info.session_id.clone(),
            external_session_key: info.external_session_key.clone(),
            stream_url: info.stream_url.clone(),
            end_session_url: info.end_session_url.clone(),
            sequence_id: 0,
        }
    }

    pub(crate) fn next_sequence_id(&mut self) -> u64 {
        self.sequence_id += 1;
        self.sequence_id
    }
}

/// Value object returned by a successful session open.
///
/// `stream_url`, `end_session_url` and `initial_message` are `None` when
/// the server omitted them; absence is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub session_id: String,
    pub stream_url: Option<String>,
    pub end_session_url: Option<String>,
    pub initial_message: Option<String>,
    pub external_session_key: String,
}
