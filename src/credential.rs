use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const PROXY_URL_KEY: &str = "proxy_url";

/// A long-lived upstream account credential as the gateway stores it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Credential {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Credential {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Metadata wins over attributes; blank values count as missing.
    pub fn access_token(&self) -> Option<String> {
        self.metadata_string(ACCESS_TOKEN_KEY)
            .or_else(|| self.attribute(ACCESS_TOKEN_KEY))
    }

    pub fn proxy_url(&self) -> Option<String> {
        self.attribute(PROXY_URL_KEY)
            .or_else(|| self.metadata_string(PROXY_URL_KEY))
    }

    fn metadata_string(&self, key: &str) -> Option<String> {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    fn attribute(&self, key: &str) -> Option<String> {
        self.attributes
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_token_prefers_metadata() {
        let credential = Credential::new("c")
            .with_metadata("access_token", "from-meta")
            .with_attribute("access_token", "from-attr");
        assert_eq!(credential.access_token().as_deref(), Some("from-meta"));
    }

    #[test]
    fn access_token_falls_back_to_trimmed_attribute() {
        let credential = Credential::new("c")
            .with_metadata("access_token", "   ")
            .with_attribute("access_token", "  from-attr \n");
        assert_eq!(credential.access_token().as_deref(), Some("from-attr"));
    }

    #[test]
    fn non_string_metadata_is_ignored() {
        let credential = Credential::new("c").with_metadata("access_token", json!(12345));
        assert!(credential.access_token().is_none());
    }

    #[test]
    fn missing_access_token() {
        assert!(Credential::default().access_token().is_none());
    }

    #[test]
    fn deserializes_gateway_auth_record() {
        let credential: Credential = serde_json::from_value(json!({
            "id": "copilot-1",
            "metadata": { "access_token": "gho_abc", "email": "dev@example.com" },
            "attributes": { "proxy_url": "http://127.0.0.1:3128" }
        }))
        .expect("credential");
        assert_eq!(credential.access_token().as_deref(), Some("gho_abc"));
        assert_eq!(
            credential.proxy_url().as_deref(),
            Some("http://127.0.0.1:3128")
        );
    }
}
