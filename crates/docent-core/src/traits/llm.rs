use serde::{Deserialize, Serialize};

use crate::errors::SynthesisError;
use crate::models::ChatMessage;

/// Parameters of one chat completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Incremental completion tokens.
pub type TokenStream = Box<dyn Iterator<Item = Result<String, SynthesisError>> + Send>;

/// Chat-completion service used for LLM reranking, summaries and synthesis.
pub trait ILlmJudge: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String, SynthesisError>;

    /// Token stream for answer composition. Defaults to the whole completion as one chunk.
    fn stream(&self, request: &CompletionRequest) -> Result<TokenStream, SynthesisError> {
        let text = self.complete(request)?;
        Ok(Box::new(std::iter::once(Ok(text))))
    }

    fn is_available(&self) -> bool {
        true
    }
}
