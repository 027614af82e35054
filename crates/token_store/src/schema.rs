use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenRecord {
    pub version: u32,
    pub access_token: String,
    pub saved_at: String,
}

impl TokenRecord {
    #[must_use]
    pub fn v1(access_token: impl Into<String>, saved_at: impl Into<String>) -> Self {
        Self {
            version: 1,
            access_token: access_token.into(),
            saved_at: saved_at.into(),
        }
    }
}
