use std::fmt;

use reqwest::StatusCode;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum AgentforceApiError {
    Auth {
        body: String,
    },
    SessionCreation {
        status: StatusCode,
        body: String,
    },
    MessageSend {
        status: StatusCode,
        body: String,
    },
    SessionTermination {
        status: StatusCode,
    },
    NoActiveSession,
    Request(reqwest::Error),
    Serde(JsonError),
}

impl fmt::Display for AgentforceApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth { body } => write!(f, "no access token in response: {body}"),
            Self::SessionCreation { status, body } => {
                write!(f, "failed to create session: HTTP {status}: {body}")
            }
            Self::MessageSend { status, body } => {
                write!(f, "message send failed: HTTP {status}: {body}")
            }
            Self::SessionTermination { status } => {
                write!(f, "session termination failed: HTTP {status}")
            }
            Self::NoActiveSession => write!(f, "no active session"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for AgentforceApiError {}

impl From<reqwest::Error> for AgentforceApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for AgentforceApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}
