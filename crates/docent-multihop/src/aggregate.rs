//! Final answer from sub-query answers.

use std::collections::HashSet;

use serde_json::json;

use docent_core::errors::DocentResult;
use docent_core::models::ChatMessage;

use crate::orchestrator::LlmSettings;
use crate::response::{SubQueryCitation, SubQueryResult};

pub const NO_ANSWER: &str = "No answer could be generated.";

const SYNTHESIS_SYSTEM_PROMPT: &str = "You combine sub-query answers of a multi-hop question into one \
well-structured response. Keep citations such as [S1] exactly as given and never invent new ones.";

/// Citations of all sub-queries, first occurrence of each id kept.
pub fn collect_citations(subqueries: &[SubQueryResult]) -> Vec<SubQueryCitation> {
    let mut seen = HashSet::new();
    subqueries
        .iter()
        .flat_map(|s| s.citations.iter())
        .filter(|c| seen.insert(c.id.clone()))
        .cloned()
        .collect()
}

/// Numbered concatenation of sub-query answers.
pub fn aggregate_fallback(subqueries: &[SubQueryResult]) -> (String, Vec<SubQueryCitation>) {
    if subqueries.is_empty() {
        return (NO_ANSWER.to_string(), Vec::new());
    }
    let answer = subqueries
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s.answer))
        .collect::<Vec<_>>()
        .join("\n");
    (answer, collect_citations(subqueries))
}

pub(crate) fn synthesize_llm(
    settings: &LlmSettings,
    model: &str,
    temperature: f32,
    question: &str,
    subqueries: &[SubQueryResult],
) -> DocentResult<String> {
    let payload = json!({
        "question": question,
        "subqueries": subqueries
            .iter()
            .map(|s| json!({
                "query": s.query,
                "answer": s.answer,
                "citations": s.citations.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            }))
            .collect::<Vec<_>>(),
    });
    let messages = vec![
        ChatMessage::system(SYNTHESIS_SYSTEM_PROMPT),
        ChatMessage::user(payload.to_string()),
    ];
    settings.complete("synthesis", messages, model, temperature, settings.synthesis_max_tokens)
}
