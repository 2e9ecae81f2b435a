use serde::{Deserialize, Serialize};

pub const MODEL_OBJECT: &str = "model";
pub const COPILOT_PROVIDER: &str = "github-copilot";

pub const DEFAULT_CONTEXT_LENGTH: u64 = 200_000;
pub const DEFAULT_MAX_COMPLETION_TOKENS: u64 = 64_000;

/// One model reachable through an upstream credential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
    #[serde(rename = "type")]
    pub model_type: String,
    pub supported_endpoints: Vec<String>,
    pub context_length: u64,
    pub max_completion_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub thinking: Option<ThinkingSupport>,
}

impl ModelInfo {
    /// A bare Copilot model carrying only the defaults used for models the
    /// catalog does not know about.
    pub fn new(id: impl Into<String>, supported_endpoints: Vec<String>) -> Self {
        Self {
            id: id.into(),
            object: MODEL_OBJECT.to_string(),
            created: 0,
            owned_by: COPILOT_PROVIDER.to_string(),
            model_type: COPILOT_PROVIDER.to_string(),
            supported_endpoints,
            context_length: DEFAULT_CONTEXT_LENGTH,
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            display_name: None,
            description: None,
            thinking: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_limits(mut self, context_length: u64, max_completion_tokens: u64) -> Self {
        self.context_length = context_length;
        self.max_completion_tokens = max_completion_tokens;
        self
    }

    pub fn with_thinking(mut self, thinking: ThinkingSupport) -> Self {
        self.thinking = Some(thinking);
        self
    }

    pub fn supports_endpoint(&self, endpoint: &str) -> bool {
        self.supported_endpoints.iter().any(|e| e == endpoint)
    }
}

/// Extended-reasoning configuration a model accepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThinkingSupport {
    pub min_budget: Option<u64>,
    pub max_budget: Option<u64>,
    #[serde(default)]
    pub zero_allowed: bool,
    #[serde(default)]
    pub dynamic_allowed: bool,
    #[serde(default)]
    pub levels: Vec<String>,
}

impl Default for ThinkingSupport {
    fn default() -> Self {
        Self {
            min_budget: None,
            max_budget: None,
            zero_allowed: false,
            dynamic_allowed: false,
            levels: Vec::new(),
        }
    }
}
