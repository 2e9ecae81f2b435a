use crate::endpoints::{CHAT_COMPLETIONS_ENDPOINT, RESPONSES_ENDPOINT};
use crate::model_registry::ModelInfo;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Read-only lookup of curated model metadata, keyed by exact model ID.
pub trait ModelCatalog: Send + Sync {
    fn lookup(&self, model_id: &str) -> Option<ModelInfo>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    models: HashMap<String, ModelInfo>,
}

impl StaticCatalog {
    pub fn from_models(models: impl IntoIterator<Item = ModelInfo>) -> Self {
        let mut map = HashMap::new();
        for model in models {
            map.entry(model.id.clone()).or_insert(model);
        }
        Self { models: map }
    }

    /// The curated Copilot table, built once per process.
    pub fn copilot() -> &'static StaticCatalog {
        static CATALOG: OnceLock<StaticCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| StaticCatalog::from_models(copilot_models()))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelCatalog for StaticCatalog {
    fn lookup(&self, model_id: &str) -> Option<ModelInfo> {
        self.models.get(model_id).cloned()
    }
}

fn chat_only() -> Vec<String> {
    vec![CHAT_COMPLETIONS_ENDPOINT.to_string()]
}

fn responses_only() -> Vec<String> {
    vec![RESPONSES_ENDPOINT.to_string()]
}

fn chat_and_responses() -> Vec<String> {
    vec![
        CHAT_COMPLETIONS_ENDPOINT.to_string(),
        RESPONSES_ENDPOINT.to_string(),
    ]
}

// Copilot rejects reasoning configuration, so no entry carries `thinking`.
fn copilot_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("claude-opus-4.6", chat_only())
            .with_display_name("Claude Opus 4.6")
            .with_description("Anthropic Claude Opus 4.6 via GitHub Copilot")
            .with_limits(200_000, 64_000),
        ModelInfo::new("claude-opus-4.5", chat_only())
            .with_display_name("Claude Opus 4.5")
            .with_description("Anthropic Claude Opus 4.5 via GitHub Copilot")
            .with_limits(200_000, 64_000),
        ModelInfo::new("claude-sonnet-4.5", chat_only())
            .with_display_name("Claude Sonnet 4.5")
            .with_description("Anthropic Claude Sonnet 4.5 via GitHub Copilot")
            .with_limits(200_000, 64_000),
        ModelInfo::new("claude-sonnet-4", chat_only())
            .with_display_name("Claude Sonnet 4")
            .with_description("Anthropic Claude Sonnet 4 via GitHub Copilot")
            .with_limits(216_000, 16_000),
        ModelInfo::new("claude-haiku-4.5", chat_only())
            .with_display_name("Claude Haiku 4.5")
            .with_description("Anthropic Claude Haiku 4.5 via GitHub Copilot")
            .with_limits(200_000, 64_000),
        ModelInfo::new("gpt-4o", chat_only())
            .with_display_name("GPT-4o")
            .with_description("OpenAI GPT-4o via GitHub Copilot")
            .with_limits(128_000, 16_384),
        ModelInfo::new("gpt-4.1", chat_only())
            .with_display_name("GPT-4.1")
            .with_description("OpenAI GPT-4.1 via GitHub Copilot")
            .with_limits(128_000, 16_384),
        ModelInfo::new("gpt-5", chat_and_responses())
            .with_display_name("GPT-5")
            .with_description("OpenAI GPT-5 via GitHub Copilot")
            .with_limits(400_000, 128_000),
        ModelInfo::new("gpt-5-mini", chat_and_responses())
            .with_display_name("GPT-5 mini")
            .with_description("OpenAI GPT-5 mini via GitHub Copilot")
            .with_limits(264_000, 64_000),
        ModelInfo::new("gpt-5-codex", responses_only())
            .with_display_name("GPT-5-Codex")
            .with_description("OpenAI GPT-5-Codex via GitHub Copilot")
            .with_limits(400_000, 128_000),
        ModelInfo::new("gpt-5.1-codex", responses_only())
            .with_display_name("GPT-5.1-Codex")
            .with_description("OpenAI GPT-5.1-Codex via GitHub Copilot")
            .with_limits(400_000, 128_000),
        ModelInfo::new("gemini-2.5-pro", chat_only())
            .with_display_name("Gemini 2.5 Pro")
            .with_description("Google Gemini 2.5 Pro via GitHub Copilot")
            .with_limits(128_000, 64_000),
    ]
}
