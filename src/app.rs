use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: OffsetDateTime,
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Pure presentation state for one chat: transcript, connection status, and
/// the input gates. Network effects live behind `AgentConnection`; the REPL
/// applies one transition per connection outcome and renders the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatApp {
    pub transcript: Vec<ChatMessage>,
    pub status: ConnectionStatus,
    pub pending_send: bool,
    pub should_exit: bool,
}

const WELCOME_MESSAGE: &str = "Hello! I'm your Salesforce AI agent. How can I help you today?";
const NO_REPLY_MESSAGE: &str = "I received your message but couldn't process it properly.";
const SEND_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error processing your message. Please try again.";
const CONNECT_ERROR_MESSAGE: &str = "Failed to connect to Salesforce agent. Please try again.";

impl Default for ChatApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            status: ConnectionStatus::Disconnected,
            pending_send: false,
            should_exit: false,
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Sends are accepted only while connected with no send in flight.
    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.is_connected() && !self.pending_send
    }

    /// A session opened. The transcript restarts with the agent's greeting,
    /// or the built-in welcome line when the server sent none.
    pub fn connection_opened(&mut self, greeting: Option<String>) {
        self.status = ConnectionStatus::Connected;
        self.pending_send = false;
        let text = greeting
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| WELCOME_MESSAGE.to_string());
        self.transcript = vec![agent_message(text, false)];
    }

    pub fn connection_failed(&mut self) {
        self.status = ConnectionStatus::Disconnected;
        self.pending_send = false;
        self.transcript
            .push(agent_message(CONNECT_ERROR_MESSAGE.to_string(), true));
    }

    /// Records the outgoing message and raises the pending-send gate.
    /// Returns `false` without touching the transcript when the text is
    /// blank or input is disabled; the caller must not send in that case.
    #[must_use]
    pub fn begin_send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || !self.input_enabled() {
            return false;
        }

        self.transcript.push(user_message(text.to_string()));
        self.pending_send = true;
        true
    }

    /// A send resolved. `None` (or a blank reply) renders the built-in
    /// no-content line rather than an error.
    pub fn reply_received(&mut self, reply: Option<String>) {
        self.pending_send = false;
        let text = reply
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_REPLY_MESSAGE.to_string());
        self.transcript.push(agent_message(text, false));
    }

    /// A send failed. The transcript gets a generic error-flagged line;
    /// the caller logs the underlying error.
    pub fn send_failed(&mut self) {
        self.pending_send = false;
        self.transcript
            .push(agent_message(SEND_ERROR_MESSAGE.to_string(), true));
    }

    pub fn session_ended(&mut self) {
        self.status = ConnectionStatus::Disconnected;
        self.pending_send = false;
        self.transcript.clear();
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }
}

fn agent_message(text: String, is_error: bool) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4().to_string(),
        text,
        sender: Sender::Agent,
        timestamp: OffsetDateTime::now_utc(),
        is_error,
    }
}

fn user_message(text: String) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4().to_string(),
        text,
        sender: Sender::User,
        timestamp: OffsetDateTime::now_utc(),
        is_error: false,
    }
}
