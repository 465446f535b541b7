use serde::{Deserialize, Serialize};

/// Body of `POST {base}/key/set`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeySetRequest {
    pub provider: String,
    pub encrypted_key: String,
    pub session_id: String,
}

/// Body returned by `POST {base}/key/set`, whatever the HTTP status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeySetResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl KeySetResponse {
    pub fn needs_key(&self) -> bool {
        self.status == "needs_key"
    }

    /// `detail`, falling back to `message`.
    pub fn error_detail(&self) -> Option<&str> {
        self.detail.as_deref().or(self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_body_parses() {
        let resp: KeySetResponse = serde_json::from_str(r#"{"detail":"db down"}"#).unwrap();
        assert_eq!(resp.status, "");
        assert!(!resp.needs_key());
        assert_eq!(resp.error_detail(), Some("db down"));
    }

    #[test]
    fn test_detail_preferred_over_message() {
        let resp = KeySetResponse {
            status: "error".to_string(),
            message: Some("m".to_string()),
            detail: Some("d".to_string()),
            session_id: None,
        };
        assert_eq!(resp.error_detail(), Some("d"));
    }

    #[test]
    fn test_request_serializes_snake_case() {
        let req = KeySetRequest {
            provider: "openai".to_string(),
            encrypted_key: "enc".to_string(),
            session_id: "s-1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"provider": "openai", "encrypted_key": "enc", "session_id": "s-1"})
        );
    }
}
