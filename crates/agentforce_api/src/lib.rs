//! Transport-only client for the Salesforce Einstein AI Agent (Agentforce)
//! session API.
//!
//! This crate owns request building and response parsing for the token,
//! session, message, and userinfo endpoints, and nothing else: no disk I/O,
//! no UI coupling, no retries. Every operation issues exactly one HTTP
//! attempt and surfaces its failure to the caller.
//!
//! Mutable protocol state (the cached access token, the active session and
//! its message sequence counter) lives in an explicit [`ClientState`] value
//! that callers pass to each operation by exclusive reference;
//! [`AgentforceApiClient`] itself stays immutable behind a shared
//! reference.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod session;
pub mod session_key;
pub mod url;

pub use client::AgentforceApiClient;
pub use config::AgentforceApiConfig;
pub use error::AgentforceApiError;
pub use session::{ActiveSession, ClientState, SessionInfo};
pub use session_key::generate_session_key;
pub use url::{normalize_base_url, DEFAULT_AGENT_BASE_URL};
