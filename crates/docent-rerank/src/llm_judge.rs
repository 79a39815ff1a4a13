use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use docent_core::deadline::call_with_deadline;
use docent_core::errors::{DocentResult, RerankError};
use docent_core::models::ChatMessage;
use docent_core::traits::{CompletionRequest, ILlmJudge};

/// Prompt asking the judge for the top `keep` candidate ids.
pub fn build_rerank_prompt(
    query: &str,
    candidates: &[(usize, String)],
    keep: usize,
    max_chars: usize,
) -> String {
    let mut lines = vec![
        "You are ranking context chunks for a retrieval-augmented generation system.".to_string(),
        format!("Return the IDs of the TOP {keep} most relevant chunks in descending relevance."),
        format!("Query: {query}"),
        String::new(),
        "Chunks:".to_string(),
    ];
    for (idx, text) in candidates {
        let snippet: String = text.chars().take(max_chars).collect();
        lines.push(format!("- id={idx} text={snippet}"));
    }
    lines.push(String::new());
    lines.push("Return only a comma-separated list of IDs.".to_string());
    lines.join("\n")
}

/// Integer ids from a comma-separated reply, restricted to `allowed`,
/// deduplicated, in reply order.
pub fn parse_ranked_ids(reply: &str, allowed: &HashSet<usize>) -> Vec<usize> {
    let mut seen = HashSet::new();
    reply
        .replace('\n', "")
        .split(',')
        .filter_map(|token| token.trim().parse::<usize>().ok())
        .filter(|id| allowed.contains(id) && seen.insert(*id))
        .collect()
}

/// Ask the LLM judge to order `candidates`. Score of position `p` among
/// `n` returned ids is `n - p`.
pub fn rerank_llm(
    llm: &Arc<dyn ILlmJudge>,
    model: &str,
    query: &str,
    candidates: &[(usize, String)],
    keep: usize,
    max_chars: usize,
    timeout: Duration,
) -> DocentResult<Vec<(usize, f32)>> {
    if keep == 0 || candidates.is_empty() {
        return Ok(Vec::new());
    }
    let request = CompletionRequest {
        messages: vec![ChatMessage::user(build_rerank_prompt(
            query, candidates, keep, max_chars,
        ))],
        model: model.to_string(),
        temperature: 0.0,
        max_tokens: 64,
    };
    let llm = Arc::clone(llm);
    let reply = call_with_deadline("llm_rerank", timeout, move || {
        llm.complete(&request).map_err(Into::into)
    })?;

    let allowed: HashSet<usize> = candidates.iter().map(|(idx, _)| *idx).collect();
    let mut ids = parse_ranked_ids(&reply, &allowed);
    if ids.is_empty() {
        return Err(RerankError::UnparseableReply.into());
    }
    ids.truncate(keep);
    let n = ids.len();
    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(pos, id)| (id, (n - pos) as f32))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_truncated_candidates() {
        let prompt = build_rerank_prompt(
            "who owns failover",
            &[(3, "abcdef".into()), (8, "xyz".into())],
            2,
            4,
        );
        assert!(prompt.contains("TOP 2"));
        assert!(prompt.contains("- id=3 text=abcd\n"));
        assert!(prompt.contains("- id=8 text=xyz"));
        assert!(prompt.ends_with("Return only a comma-separated list of IDs."));
    }

    #[test]
    fn parse_filters_unknown_and_garbage() {
        let allowed: HashSet<usize> = [1, 4, 7].into_iter().collect();
        assert_eq!(parse_ranked_ids("7, 4,\n 99, x, 4, 1", &allowed), vec![7, 4, 1]);
        assert!(parse_ranked_ids("none of them", &allowed).is_empty());
    }
}
