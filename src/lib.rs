//! Terminal chat client for Salesforce Agentforce agents.
//!
//! The binary opens a session against one agent, prints its greeting, and
//! then reads lines from stdin: plain lines become messages, `/`-prefixed
//! lines are commands (`/help`, `/end`, `/reconnect`, `/quit`).
//!
//! The backend is chosen through `AGENTFORCE_CHAT_PROVIDER`:
//!
//! - `mock` (default): a scripted in-process agent for trying the interface
//!   without credentials.
//! - `agentforce`: the Einstein AI Agent API. Requires `AGENTFORCE_ORG_URL`,
//!   `AGENTFORCE_AGENT_ID`, `AGENTFORCE_CLIENT_ID` and
//!   `AGENTFORCE_CLIENT_SECRET`, and honors the optional
//!   `AGENTFORCE_AGENT_URL` and `AGENTFORCE_CHAT_HOME` overrides. Access
//!   tokens are cached under the chat home so restarts skip the OAuth round
//!   trip while the cached token is still accepted.

pub mod app;
pub mod commands;
pub mod config;
pub mod connection;
pub mod connections;
pub mod repl;
