use serde::{Deserialize, Serialize};

/// Request body for the session-creation endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOpenRequest {
    pub external_session_key: String,
    pub instance_config: InstanceConfig,
    pub streaming_capabilities: StreamingCapabilities,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstanceConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingCapabilities {
    pub chunk_types: Vec<String>,
}

impl SessionOpenRequest {
    pub fn new(external_session_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            external_session_key: external_session_key.into(),
            instance_config: InstanceConfig {
                endpoint: endpoint.into(),
            },
            streaming_capabilities: StreamingCapabilities {
                chunk_types: vec!["Text".to_string()],
            },
        }
    }
}

/// Request body for a message send. `sequence_id` orders messages within
/// one session.
#[derive(Debug, Clone, Serialize)]
pub struct MessageSendRequest {
    pub message: OutboundMessage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub sequence_id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl MessageSendRequest {
    pub fn text(sequence_id: u64, text: impl Into<String>) -> Self {
        Self {
            message: OutboundMessage {
                sequence_id,
                kind: "Text".to_string(),
                text: text.into(),
            },
        }
    }
}

/// Token endpoint response. Only `access_token` is consumed; every other
/// field of the grant is ignored.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Session-creation response. The link members and the greeting are
/// optional on the wire; absent members surface as `None`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOpenResponse {
    pub session_id: String,
    #[serde(rename = "_links", default)]
    pub links: Option<SessionLinks>,
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
}

#[derive(Debug, Deserialize)]
pub struct SessionLinks {
    #[serde(default)]
    pub messages: Option<Link>,
    #[serde(default)]
    pub end: Option<Link>,
}

#[derive(Debug, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Message-send response; the agent's reply rides in `messages[0].message`.
#[derive(Debug, Deserialize)]
pub struct MessageSendResponse {
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
}

impl SessionOpenResponse {
    pub fn stream_url(&self) -> Option<String> {
        self.links.as_ref()?.messages.as_ref()?.href.clone()
    }

    pub fn end_session_url(&self) -> Option<String> {
        self.links.as_ref()?.end.as_ref()?.href.clone()
    }

    pub fn initial_message(&self) -> Option<String> {
        self.messages.first()?.message.clone()
    }
}

impl MessageSendResponse {
    pub fn first_message(&self) -> Option<String> {
        self.messages.first()?.message.clone()
    }
}
