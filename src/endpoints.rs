pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
pub const RESPONSES_ENDPOINT: &str = "/responses";

const DUAL_ENDPOINT_PREFIXES: &[&str] = &["gpt-5", "o1", "o3", "o4"];

/// Default endpoint support for a model the catalog does not describe.
/// Matching is case-insensitive; `codex` wins over the prefix table.
pub fn infer_supported_endpoints(model_id: &str) -> Vec<String> {
    let id = model_id.to_ascii_lowercase();
    if id.contains("codex") {
        return vec![RESPONSES_ENDPOINT.to_string()];
    }
    if DUAL_ENDPOINT_PREFIXES
        .iter()
        .any(|prefix| id.starts_with(prefix))
    {
        return vec![
            CHAT_COMPLETIONS_ENDPOINT.to_string(),
            RESPONSES_ENDPOINT.to_string(),
        ];
    }
    vec![CHAT_COMPLETIONS_ENDPOINT.to_string()]
}
