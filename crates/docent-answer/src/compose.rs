//! Chat messages for the answer LLM and stream post-processing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use docent_core::config::AnswerConfig;
use docent_core::models::{AnswerMode, AnswerSource, ChatMessage};

/// Exact reply required in grounded mode when the sources don't answer the question.
pub const INSUFFICIENT_REPLY: &str = "I don't know from the provided documents.";

static CRLF: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\r\n?").ok());
static EXTRA_NEWLINES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\n{3,}").ok());
static MODEL_PRIOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\*\(model prior\)\*").ok());

const BASE_INSTRUCTIONS: &[&str] = &[
    "You are an analyst answering questions about uploaded documents.",
    "Write natural, precise prose.",
    "Copy product and model names exactly as the documents spell them; never abbreviate them.",
    "End every sentence that uses the documents with its citations, e.g. [1] or [1][2], right after the closing punctuation.",
    "Never invent citations.",
    "Finish with one blank line and a final line `Sources:` followed by the cited ids in ascending order without commas, e.g. Sources: [1][3].",
];

const GROUNDED_INSTRUCTIONS: &[&str] = &[
    "Open with a short summary paragraph that answers the question, without a heading.",
    "Use only the supplied sources.",
    "If the sources are insufficient, reply exactly \"I don't know from the provided documents.\"",
    "Do not add world knowledge or a World notes section.",
];

const BLENDED_INSTRUCTIONS: &[&str] = &[
    "Open with paragraphs grounded in the sources, without a heading.",
    "After the grounded part, add a blank line, a `World notes` line, and bullets that each end with '(model prior)'.",
    "World notes carry no [n] citations.",
    "Never present world knowledge as if it came from the documents.",
];

/// System + user message pair for one answer call.
///
/// The user message is a JSON payload with the question, the numbered
/// sources and the rendering instructions.
pub fn build_messages(
    query: &str,
    sources: &[AnswerSource],
    mode: AnswerMode,
    config: &AnswerConfig,
) -> Vec<ChatMessage> {
    let mut instructions: Vec<String> = BASE_INSTRUCTIONS.iter().map(|s| s.to_string()).collect();
    instructions.insert(
        2,
        if config.markdown {
            "Write Markdown paragraphs separated by blank lines; put a blank line before and after any '- ' bullet list and use bold sparingly.".to_string()
        } else {
            "Write plain sentences with natural spacing.".to_string()
        },
    );
    instructions.push(format!("Adopt a {} tone.", config.tone));
    if sources.is_empty() {
        instructions.push(
            "No sources were found: say you cannot answer from the documents before anything else."
                .to_string(),
        );
    }
    let mode_lines = match mode {
        AnswerMode::Grounded => GROUNDED_INSTRUCTIONS,
        AnswerMode::Blended => BLENDED_INSTRUCTIONS,
    };
    instructions.extend(mode_lines.iter().map(|s| s.to_string()));

    let payload = json!({
        "question": query,
        "sources": sources,
        "instructions": {
            "tone": config.tone,
            "markdown": config.markdown,
            "mode": mode,
            "has_sources": !sources.is_empty(),
        },
    });

    vec![
        ChatMessage::system(instructions.join(" ")),
        ChatMessage::user(payload.to_string()),
    ]
}

/// Normalize one streamed chunk: line endings, runs of blank lines and
/// model-prior markers.
pub fn postprocess_chunk(chunk: &str) -> String {
    if chunk.is_empty() {
        return String::new();
    }
    let mut text = chunk.to_string();
    if let Some(re) = CRLF.as_ref() {
        text = re.replace_all(&text, "\n").into_owned();
    }
    if let Some(re) = EXTRA_NEWLINES.as_ref() {
        text = re.replace_all(&text, "\n\n").into_owned();
    }
    if let Some(re) = MODEL_PRIOR.as_ref() {
        text = re.replace_all(&text, "(model prior)").into_owned();
    }
    text
}
