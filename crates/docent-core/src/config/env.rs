//! Environment overrides for feature flags and a few runtime knobs.

use std::str::FromStr;

use tracing::warn;

use super::DocentConfig;
use crate::models::RerankStrategy;

const TRUTHY: [&str; 6] = ["1", "true", "t", "yes", "y", "on"];
const FALSY: [&str; 6] = ["0", "false", "f", "no", "n", "off"];

/// Parse a boolean flag value. Returns `None` for anything unrecognized.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let value = raw.trim().to_ascii_lowercase();
    if TRUTHY.contains(&value.as_str()) {
        Some(true)
    } else if FALSY.contains(&value.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn override_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut bool) {
    let Some(raw) = lookup(key) else { return };
    match parse_flag(&raw) {
        Some(value) => *slot = value,
        None => warn!(key, value = %raw, "ignoring unrecognized boolean override"),
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = lookup(key) else { return };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = %raw, "ignoring invalid override"),
    }
}

/// Apply `DOCENT_*` overrides using the given key lookup.
pub(crate) fn apply(config: &mut DocentConfig, lookup: impl Fn(&str) -> Option<String>) {
    let features = &mut config.features;
    override_flag(&lookup, "DOCENT_GRAPH_ENABLED", &mut features.graph_enabled);
    override_flag(&lookup, "DOCENT_LLM_RERANK_ENABLED", &mut features.llm_rerank_enabled);
    override_flag(
        &lookup,
        "DOCENT_FACT_CHECK_LLM_ENABLED",
        &mut features.fact_check_llm_enabled,
    );
    override_flag(&lookup, "DOCENT_FACT_CHECK_STRICT", &mut features.fact_check_strict);
    override_flag(
        &lookup,
        "DOCENT_ADVANCED_LLM_ENABLED",
        &mut features.advanced_llm_enabled,
    );
    override_flag(&lookup, "DOCENT_RERANK_STRICT", &mut config.rerank.strict);
    override_parsed::<RerankStrategy>(
        &lookup,
        "DOCENT_RERANK_STRATEGY",
        &mut config.rerank.strategy,
    );
    override_parsed(&lookup, "DOCENT_MAX_GRAPH_HOPS", &mut config.graph.max_graph_hops);
    override_parsed(
        &lookup,
        "DOCENT_TRACE_CACHE_SIZE",
        &mut config.observability.trace_cache_size,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_flag_accepts_both_vocabularies() {
        for v in ["1", "TRUE", "t", "Yes", "y", " on "] {
            assert_eq!(parse_flag(v), Some(true), "{v}");
        }
        for v in ["0", "false", "F", "no", "n", "OFF"] {
            assert_eq!(parse_flag(v), Some(false), "{v}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn overrides_apply_and_invalid_values_are_ignored() {
        let mut cfg = DocentConfig::default();
        apply(
            &mut cfg,
            lookup(&[
                ("DOCENT_GRAPH_ENABLED", "yes"),
                ("DOCENT_RERANK_STRATEGY", "ce"),
                ("DOCENT_MAX_GRAPH_HOPS", "many"),
                ("DOCENT_LLM_RERANK_ENABLED", "perhaps"),
            ]),
        );
        assert!(cfg.features.graph_enabled);
        assert_eq!(cfg.rerank.strategy, RerankStrategy::CrossEncoder);
        assert_eq!(cfg.graph.max_graph_hops, 2);
        assert!(!cfg.features.llm_rerank_enabled);
    }
}
