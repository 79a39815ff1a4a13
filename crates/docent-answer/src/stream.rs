//! Cancellable answer streaming.
//!
//! Tokens are pulled from the LLM stream one at a time; the cancellation
//! token is checked between tokens. A cancelled or failed stream still
//! yields a deterministic fallback built from the prepared context.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use docent_core::models::AnswerMode;
use docent_core::traits::{CompletionRequest, ILlmJudge};

use crate::compose::{postprocess_chunk, INSUFFICIENT_REPLY};
use crate::context::AnswerContext;

/// Sources quoted in the fallback answer.
const FALLBACK_SOURCES: usize = 3;

/// Shared cancel flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed { text: String },
    Cancelled { partial: String, fallback: String },
    Failed { fallback: String },
}

/// Extractive answer from the prepared sources.
///
/// The first sentence of each of the top sources with its citation, then a
/// `Sources:` line. Insufficient contexts get the fixed insufficient reply.
pub fn fallback_message(context: &AnswerContext) -> String {
    if context.insufficient || context.sources.is_empty() {
        return INSUFFICIENT_REPLY.to_string();
    }
    let top = &context.sources[..context.sources.len().min(FALLBACK_SOURCES)];
    let sentences: Vec<String> = top
        .iter()
        .map(|s| format!("{} [{}]", first_sentence(&s.text), s.id))
        .collect();
    let ids: String = top.iter().map(|s| format!("[{}]", s.id)).collect();
    format!("{}\n\nSources: {}", sentences.join(" "), ids)
}

/// Stream the answer into `sink`.
///
/// Grounded contexts flagged insufficient never reach the LLM: the fixed
/// reply is emitted directly.
pub fn stream_answer(
    llm: &dyn ILlmJudge,
    request: &CompletionRequest,
    context: &AnswerContext,
    cancel: &CancellationToken,
    mut sink: impl FnMut(&str),
) -> StreamOutcome {
    if context.insufficient && context.mode == AnswerMode::Grounded {
        sink(INSUFFICIENT_REPLY);
        return StreamOutcome::Completed {
            text: INSUFFICIENT_REPLY.to_string(),
        };
    }

    let tokens = match llm.stream(request) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!(component = "answer_stream", error = %e, "answer stream failed to start");
            return StreamOutcome::Failed {
                fallback: fallback_message(context),
            };
        }
    };

    let mut text = String::new();
    for token in tokens {
        if cancel.is_cancelled() {
            info!(component = "answer_stream", emitted = text.len(), "answer stream cancelled");
            return StreamOutcome::Cancelled {
                partial: text,
                fallback: fallback_message(context),
            };
        }
        match token {
            Ok(chunk) => {
                let chunk = postprocess_chunk(&chunk);
                sink(&chunk);
                text.push_str(&chunk);
            }
            Err(e) => {
                warn!(component = "answer_stream", error = %e, "answer stream broke off");
                return StreamOutcome::Failed {
                    fallback: fallback_message(context),
                };
            }
        }
    }
    if cancel.is_cancelled() {
        return StreamOutcome::Cancelled {
            partial: text,
            fallback: fallback_message(context),
        };
    }
    StreamOutcome::Completed { text }
}

/// Leading sentence of `text`, trimmed. A terminator only ends the sentence
/// when whitespace or the end of text follows it, so "2.0" stays whole.
pub fn first_sentence(text: &str) -> &str {
    let trimmed = text.trim();
    let mut chars = trimmed.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |(_, n)| n.is_whitespace()) {
            return &trimmed[..pos + c.len_utf8()];
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn first_sentence_cuts_at_terminator() {
        assert_eq!(first_sentence("  One. Two."), "One.");
        assert_eq!(first_sentence("no stop"), "no stop");
        assert_eq!(first_sentence("Wait! Really?"), "Wait!");
    }

    #[test]
    fn first_sentence_keeps_inline_dots() {
        assert_eq!(
            first_sentence("Version 2.0 ships Friday. Notes follow."),
            "Version 2.0 ships Friday."
        );
        assert_eq!(first_sentence("See docs/v1.2 for details"), "See docs/v1.2 for details");
        assert_eq!(first_sentence("Ends here.\nNext line."), "Ends here.");
    }
}
