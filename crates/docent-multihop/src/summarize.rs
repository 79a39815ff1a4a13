//! Per sub-query summaries: LLM when enabled, extractive otherwise.

use serde_json::json;

use docent_answer::{first_sentence, RetrievedChunk};
use docent_core::errors::DocentResult;
use docent_core::models::ChatMessage;

use crate::orchestrator::LlmSettings;
use crate::response::SubQueryCitation;

/// Citations attached to one sub-query answer.
pub const MAX_CITATIONS: usize = 3;
/// Snippet length handed to the summary LLM.
pub const SNIPPET_CHARS: usize = 600;
const FALLBACK_SNIPPET_CHARS: usize = 160;

const SUMMARY_SYSTEM_PROMPT: &str = "You summarize retrieved context for one step of a multi-hop question. \
Use only the given snippets, answer in two or three sentences, cite snippets as [S1][S2], \
and never make up snippet ids.";

pub fn no_evidence(sub_query: &str) -> String {
    format!("No supporting evidence was found for {sub_query}.")
}

/// `S<rank>` citations for the top retrieved chunks.
pub fn build_citations(retrieved: &[RetrievedChunk]) -> Vec<SubQueryCitation> {
    retrieved
        .iter()
        .take(MAX_CITATIONS)
        .map(|r| SubQueryCitation {
            id: format!("S{}", r.rank),
            doc_id: r.doc_id.clone(),
            chunk_index: r.chunk_index,
            start: r.start,
            end: r.end,
        })
        .collect()
}

/// First sentence of each cited chunk followed by its marker.
pub fn summarize_extractive(
    sub_query: &str,
    retrieved: &[RetrievedChunk],
    citations: &[SubQueryCitation],
) -> String {
    if retrieved.is_empty() || citations.is_empty() {
        return no_evidence(sub_query);
    }
    retrieved
        .iter()
        .zip(citations)
        .map(|(r, c)| {
            let mut sentence = first_sentence(&r.text).to_string();
            if sentence.is_empty() {
                let snippet: String = r.text.chars().take(FALLBACK_SNIPPET_CHARS).collect();
                sentence = snippet.trim().to_string();
            }
            format!("{sentence} [{}]", c.id)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn summarize_llm(
    settings: &LlmSettings,
    model: &str,
    temperature: f32,
    sub_query: &str,
    retrieved: &[RetrievedChunk],
    citations: &[SubQueryCitation],
) -> DocentResult<String> {
    let snippets: Vec<serde_json::Value> = retrieved
        .iter()
        .zip(citations)
        .map(|(r, c)| {
            json!({
                "id": c.id,
                "text": r.text.chars().take(SNIPPET_CHARS).collect::<String>(),
            })
        })
        .collect();
    let payload = json!({
        "sub_query": sub_query,
        "snippets": snippets,
        "instructions": {
            "style": "concise",
            "citations": "Use [S#] referencing the provided snippet ids.",
        },
    });
    let messages = vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(payload.to_string()),
    ];
    settings.complete("summary", messages, model, temperature, settings.summary_max_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(rank: usize, text: &str) -> RetrievedChunk {
        RetrievedChunk {
            rank,
            chunk_index: rank + 10,
            doc_id: format!("d{rank}"),
            start: 0,
            end: text.len(),
            text: text.into(),
            similarity: 0.5,
            lexical_score: 0.0,
            fused_score: 0.0,
            rerank_score: None,
            citation_id: None,
        }
    }

    #[test]
    fn citations_capped_at_three() {
        let retrieved: Vec<RetrievedChunk> = (1..=5).map(|r| chunk(r, "x.")).collect();
        let cites = build_citations(&retrieved);
        let ids: Vec<&str> = cites.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);
        assert_eq!(cites[0].chunk_index, 11);
    }

    #[test]
    fn extractive_uses_first_sentences() {
        let retrieved = vec![
            chunk(1, "Failover needs approval. Then page the team."),
            chunk(2, "Billing exports nightly"),
        ];
        let cites = build_citations(&retrieved);
        assert_eq!(
            summarize_extractive("q", &retrieved, &cites),
            "Failover needs approval. [S1] Billing exports nightly [S2]"
        );
    }

    #[test]
    fn extractive_keeps_version_numbers_whole() {
        let retrieved = vec![chunk(1, "Version 2.0 ships Friday. Rollback is manual.")];
        let cites = build_citations(&retrieved);
        assert_eq!(
            summarize_extractive("q", &retrieved, &cites),
            "Version 2.0 ships Friday. [S1]"
        );
    }

    #[test]
    fn no_evidence_message() {
        assert_eq!(
            summarize_extractive("who owns billing", &[], &[]),
            "No supporting evidence was found for who owns billing."
        );
    }
}
