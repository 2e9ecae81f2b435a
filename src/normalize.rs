//! Turns an upstream model-list payload of unknown shape into typed records.
//!
//! Payloads are matched against a fixed list of sources (`data`, then
//! `models`). Each source tries its shape strategies in order; the first
//! source that produces at least one model wins.

use crate::catalog::ModelCatalog;
use crate::endpoints::infer_supported_endpoints;
use crate::model_registry::{
    COPILOT_PROVIDER, DEFAULT_CONTEXT_LENGTH, DEFAULT_MAX_COMPLETION_TOKENS, MODEL_OBJECT,
    ModelInfo,
};
use serde_json::Value;
use std::collections::HashSet;

/// A model ID pulled out of the payload with whatever metadata came with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub owned_by: Option<String>,
    pub created: i64,
}

impl Candidate {
    fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owned_by: None,
            created: 0,
        }
    }
}

/// Returns `None` when the node does not have the strategy's shape.
type Strategy = fn(&Value, &[&str]) -> Option<Vec<Candidate>>;

struct ModelSource {
    field: &'static str,
    owner_keys: &'static [&'static str],
    strategies: &'static [Strategy],
}

// `vendor` is only honoured under `data`; object entries under `models` keep
// reading `owned_by` alone.
const SOURCES: &[ModelSource] = &[
    ModelSource {
        field: "data",
        owner_keys: &["owned_by", "vendor"],
        strategies: &[array_entries, bare_string],
    },
    ModelSource {
        field: "models",
        owner_keys: &["owned_by"],
        strategies: &[array_entries, mapping_keys],
    },
];

pub fn parse_models(body: &[u8], catalog: &dyn ModelCatalog) -> Vec<ModelInfo> {
    parse_models_at(body, catalog, chrono::Utc::now().timestamp())
}

/// Same as [`parse_models`] with an explicit "now" for entries without a
/// creation timestamp.
pub fn parse_models_at(body: &[u8], catalog: &dyn ModelCatalog, now: i64) -> Vec<ModelInfo> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Vec::new();
    }
    let root: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!("model list payload is not json: {err}");
            return Vec::new();
        }
    };

    let mut normalizer = Normalizer::new(catalog, now);
    for source in SOURCES {
        let Some(node) = root.get(source.field) else {
            continue;
        };
        let candidates = source
            .strategies
            .iter()
            .find_map(|strategy| strategy(node, source.owner_keys))
            .unwrap_or_default();
        for candidate in candidates {
            normalizer.push(candidate);
        }
        if !normalizer.models.is_empty() {
            break;
        }
    }
    normalizer.models
}

/// Array of objects and/or strings; each element is matched on its own.
pub fn array_entries(node: &Value, owner_keys: &[&str]) -> Option<Vec<Candidate>> {
    let items = node.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| {
                object_entry(item, owner_keys).or_else(|| string_entry(item))
            })
            .collect(),
    )
}

pub fn bare_string(node: &Value, _owner_keys: &[&str]) -> Option<Vec<Candidate>> {
    string_entry(node).map(|candidate| vec![candidate])
}

/// Keys of a mapping are model IDs; values are ignored.
pub fn mapping_keys(node: &Value, _owner_keys: &[&str]) -> Option<Vec<Candidate>> {
    let map = node.as_object()?;
    Some(map.keys().map(Candidate::bare).collect())
}

fn object_entry(item: &Value, owner_keys: &[&str]) -> Option<Candidate> {
    let obj = item.as_object()?;
    let id = match obj.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let owned_by = owner_keys
        .iter()
        .filter_map(|key| obj.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|owner| !owner.is_empty())
        .map(String::from);
    Some(Candidate {
        id,
        owned_by,
        created: created_at(item),
    })
}

fn string_entry(item: &Value) -> Option<Candidate> {
    item.as_str().map(Candidate::bare)
}

/// `created` takes precedence over `created_at` whenever the key exists.
fn created_at(item: &Value) -> i64 {
    item.get("created")
        .or_else(|| item.get("created_at"))
        .map(timestamp_value)
        .unwrap_or(0)
}

fn timestamp_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

struct Normalizer<'a> {
    catalog: &'a dyn ModelCatalog,
    now: i64,
    seen: HashSet<String>,
    models: Vec<ModelInfo>,
}

impl<'a> Normalizer<'a> {
    fn new(catalog: &'a dyn ModelCatalog, now: i64) -> Self {
        Self {
            catalog,
            now,
            seen: HashSet::new(),
            models: Vec::new(),
        }
    }

    fn push(&mut self, candidate: Candidate) {
        let id = candidate.id.trim();
        if id.is_empty() || self.seen.contains(id) {
            return;
        }
        self.seen.insert(id.to_string());

        let created = if candidate.created == 0 {
            self.now
        } else {
            candidate.created
        };
        let owned_by = candidate
            .owned_by
            .map(|owner| owner.trim().to_string())
            .filter(|owner| !owner.is_empty())
            .unwrap_or_else(|| COPILOT_PROVIDER.to_string());

        let model = match self.catalog.lookup(id) {
            Some(known) => ModelInfo {
                id: id.to_string(),
                object: MODEL_OBJECT.to_string(),
                created,
                owned_by,
                model_type: COPILOT_PROVIDER.to_string(),
                supported_endpoints: known.supported_endpoints,
                context_length: known.context_length,
                max_completion_tokens: known.max_completion_tokens,
                display_name: known.display_name,
                description: known.description,
                thinking: known.thinking,
            },
            None => ModelInfo {
                id: id.to_string(),
                object: MODEL_OBJECT.to_string(),
                created,
                owned_by,
                model_type: COPILOT_PROVIDER.to_string(),
                supported_endpoints: infer_supported_endpoints(id),
                context_length: DEFAULT_CONTEXT_LENGTH,
                max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
                display_name: None,
                description: None,
                thinking: None,
            },
        };
        self.models.push(model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::model_registry::ThinkingSupport;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    fn parse(body: &str) -> Vec<ModelInfo> {
        parse_models_at(body.as_bytes(), StaticCatalog::copilot(), NOW)
    }

    fn ids(models: &[ModelInfo]) -> Vec<&str> {
        models.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn empty_and_malformed_bodies_yield_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse("{not json").is_empty());
        assert!(parse("[]").is_empty());
        assert!(parse(r#"{"object":"list"}"#).is_empty());
    }

    #[test]
    fn data_objects_keep_order_and_metadata() {
        let models = parse(
            r#"{"data":[{"id":"claude-opus-4.6","owned_by":"github-copilot","created":123},{"id":"gpt-5"}]}"#,
        );
        assert_eq!(ids(&models), vec!["claude-opus-4.6", "gpt-5"]);
        assert_eq!(models[0].created, 123);
        assert_eq!(models[1].created, NOW);
        assert_eq!(models[1].owned_by, "github-copilot");
        assert!(models.iter().all(|m| m.object == "model"));
    }

    #[test]
    fn object_and_string_arrays_are_equivalent() {
        let objects = parse(r#"{"data":[{"id":"a"},{"id":"b"}]}"#);
        let strings = parse(r#"{"data":["a","b"]}"#);
        assert_eq!(objects, strings);
        assert_eq!(ids(&objects), vec!["a", "b"]);
        assert!(objects.iter().all(|m| m.owned_by == "github-copilot"));
    }

    #[test]
    fn mixed_array_elements_are_matched_individually() {
        let models = parse(r#"{"data":[{"id":"a"},"b",42,null,{"name":"no-id"}]}"#);
        assert_eq!(ids(&models), vec!["a", "b"]);
    }

    #[test]
    fn data_as_single_string() {
        let models = parse(r#"{"data":"gpt-4o"}"#);
        assert_eq!(ids(&models), vec!["gpt-4o"]);
        assert_eq!(models[0].display_name.as_deref(), Some("GPT-4o"));
    }

    #[test]
    fn models_mapping_keys_become_ids() {
        let models = parse(r#"{"models":{"b":{},"a":{"id":"ignored"}}}"#);
        let mut got = ids(&models);
        got.sort();
        assert_eq!(got, vec!["a", "b"]);
    }

    #[test]
    fn models_array_is_used_when_data_is_empty() {
        let models = parse(r#"{"data":[],"models":[{"id":"x","created_at":7},"y"]}"#);
        assert_eq!(ids(&models), vec!["x", "y"]);
        assert_eq!(models[0].created, 7);
    }

    #[test]
    fn data_wins_over_models_when_it_yields_entries() {
        let models = parse(r#"{"data":["a"],"models":["b"]}"#);
        assert_eq!(ids(&models), vec!["a"]);
    }

    #[test]
    fn blank_data_ids_fall_through_to_models() {
        let models = parse(r#"{"data":["  ",{"id":""}],"models":{"m":{}}}"#);
        assert_eq!(ids(&models), vec!["m"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let models = parse(
            r#"{"data":[{"id":"a","owned_by":"first","created":1},{"id":" a ","owned_by":"second","created":2},"a",{"id":"A"}]}"#,
        );
        assert_eq!(ids(&models), vec!["a", "A"]);
        assert_eq!(models[0].owned_by, "first");
        assert_eq!(models[0].created, 1);
    }

    #[test]
    fn created_at_is_used_without_created() {
        let models = parse(r#"{"data":[{"id":"claude-opus-4.6","created_at":456}]}"#);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].created, 456);
    }

    #[test]
    fn created_zero_falls_back_to_now() {
        let models = parse(r#"{"data":[{"id":"a","created":0,"created_at":9}]}"#);
        assert_eq!(models[0].created, NOW);
    }

    #[test]
    fn missing_timestamp_uses_wall_clock() {
        let before = chrono::Utc::now().timestamp();
        let models = parse_models(br#"{"data":[{"id":"a"}]}"#, StaticCatalog::copilot());
        let after = chrono::Utc::now().timestamp();
        assert!(models[0].created >= before && models[0].created <= after);
    }

    #[test]
    fn vendor_fills_in_for_missing_owned_by() {
        let models = parse(
            r#"{"data":[{"id":"claude-opus-4.6","vendor":"anthropic"},{"id":"gpt-5","owned_by":"openai"},{"id":"x","owned_by":"  ","vendor":" azure "}]}"#,
        );
        assert_eq!(models[0].owned_by, "anthropic");
        assert_eq!(models[1].owned_by, "openai");
        assert_eq!(models[2].owned_by, "azure");
    }

    #[test]
    fn vendor_is_ignored_under_models_field() {
        let models = parse(r#"{"models":[{"id":"a","vendor":"anthropic"}]}"#);
        assert_eq!(models[0].owned_by, "github-copilot");
    }

    #[test]
    fn catalog_entries_supply_endpoints_and_limits() {
        let models = parse(
            r#"{"data":[{"id":"claude-opus-4.6"},{"id":"claude-sonnet-4.5"},{"id":"gpt-5"},{"id":"gpt-5-codex"}]}"#,
        );
        for model in &models {
            let known = StaticCatalog::copilot().lookup(&model.id).expect("known");
            assert_eq!(model.supported_endpoints, known.supported_endpoints);
            assert_eq!(model.context_length, known.context_length);
            assert_eq!(model.max_completion_tokens, known.max_completion_tokens);
            assert_eq!(model.display_name, known.display_name);
            assert!(model.thinking.is_none());
        }
        assert_eq!(models[0].supported_endpoints, vec!["/chat/completions"]);
        assert_eq!(
            models[2].supported_endpoints,
            vec!["/chat/completions", "/responses"]
        );
        assert_eq!(models[3].supported_endpoints, vec!["/responses"]);
        assert_eq!(models[0].display_name.as_deref(), Some("Claude Opus 4.6"));
    }

    #[test]
    fn catalog_thinking_is_copied_verbatim() {
        let thinking = ThinkingSupport {
            min_budget: Some(1024),
            max_budget: Some(32_000),
            zero_allowed: true,
            dynamic_allowed: false,
            levels: vec!["low".to_string(), "high".to_string()],
        };
        let catalog = StaticCatalog::from_models([
            ModelInfo::new("thinker", vec!["/chat/completions".to_string()])
                .with_limits(1_000, 500)
                .with_thinking(thinking.clone()),
            ModelInfo::new("plain", vec!["/responses".to_string()]).with_limits(10, 5),
        ]);
        let models = parse_models_at(br#"{"data":["thinker","plain"]}"#, &catalog, NOW);
        assert_eq!(models[0].thinking, Some(thinking));
        assert_eq!(models[0].context_length, 1_000);
        assert_eq!(models[0].max_completion_tokens, 500);
        assert!(models[1].thinking.is_none());
        assert_eq!(models[1].supported_endpoints, vec!["/responses"]);
    }

    #[test]
    fn unknown_models_get_inferred_defaults() {
        let models = parse(
            r#"{"data":[{"id":"claude-new-model"},{"id":"gpt-5.3"},{"id":"gpt-5.3-codex"},{"id":"O4-mini"}]}"#,
        );
        assert_eq!(models.len(), 4);
        assert_eq!(models[0].supported_endpoints, vec!["/chat/completions"]);
        assert_eq!(
            models[1].supported_endpoints,
            vec!["/chat/completions", "/responses"]
        );
        assert_eq!(models[2].supported_endpoints, vec!["/responses"]);
        assert_eq!(
            models[3].supported_endpoints,
            vec!["/chat/completions", "/responses"]
        );
        for model in &models {
            assert_eq!(model.context_length, 200_000);
            assert_eq!(model.max_completion_tokens, 64_000);
            assert!(model.display_name.is_none());
            assert!(model.description.is_none());
            assert!(model.thinking.is_none());
        }
    }

    #[test]
    fn strategies_reject_foreign_shapes() {
        assert!(array_entries(&json!({"a":1}), &[]).is_none());
        assert!(bare_string(&json!(["a"]), &[]).is_none());
        assert!(mapping_keys(&json!("a"), &[]).is_none());
        assert_eq!(
            bare_string(&json!("a"), &[]),
            Some(vec![Candidate::bare("a")])
        );
    }
}
