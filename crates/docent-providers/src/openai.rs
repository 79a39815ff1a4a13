//! OpenAI-compatible HTTP client.
//!
//! Serves both the chat-completion capability (`/chat/completions`, with
//! server-sent-event streaming) and the embedding capability
//! (`/embeddings`). One attempt per call; callers own fallbacks and deadlines.

use std::io::{BufRead, BufReader, Lines};
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use docent_core::errors::{DocentResult, EmbeddingError, SynthesisError};
use docent_core::models::ChatMessage;
use docent_core::traits::{CompletionRequest, IEmbeddingProvider, ILlmJudge, TokenStream};

use crate::http::HttpSettings;

pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    settings: HttpSettings,
    client: Client,
    available: AtomicBool,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbedBody<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiClient {
    pub fn new(settings: HttpSettings) -> DocentResult<Self> {
        let client = settings.client()?;
        Ok(Self {
            settings,
            client,
            available: AtomicBool::new(true),
        })
    }

    /// Settings from `OPENAI_BASE_URL` / `OPENAI_API_KEY`.
    pub fn from_env() -> DocentResult<Self> {
        Self::new(HttpSettings::from_env("OPENAI", DEFAULT_OPENAI_BASE))
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    /// Mark the endpoint usable again after a transport failure.
    pub fn reset_availability(&self) {
        self.available.store(true, Ordering::Relaxed);
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, String> {
        let mut request: RequestBuilder = self.client.post(self.settings.endpoint(path)).json(body);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().map_err(|e| {
            if e.is_connect() {
                warn!(
                    component = "openai",
                    error = %e,
                    "endpoint unreachable, marking unavailable"
                );
                self.available.store(false, Ordering::Relaxed);
            }
            format!("HTTP error: {e}")
        })?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(format!("API returned {status}: {text}"));
        }
        Ok(response)
    }

    fn chat_body<'a>(request: &'a CompletionRequest, stream: bool) -> ChatBody<'a> {
        ChatBody {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream,
        }
    }
}

impl ILlmJudge for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, SynthesisError> {
        let response = self
            .post("chat/completions", &Self::chat_body(request, false))
            .map_err(|reason| SynthesisError::CallFailed { reason })?;
        let parsed: ChatResponse = response.json().map_err(|e| SynthesisError::CallFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
        debug!(component = "openai", model = %request.model, "chat completion received");
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(SynthesisError::EmptyCompletion)
    }

    fn stream(&self, request: &CompletionRequest) -> Result<TokenStream, SynthesisError> {
        let response = self
            .post("chat/completions", &Self::chat_body(request, true))
            .map_err(|reason| SynthesisError::CallFailed { reason })?;
        Ok(Box::new(SseTokens {
            lines: BufReader::new(response).lines(),
            done: false,
        }))
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

impl IEmbeddingProvider for OpenAiClient {
    fn embed_batch(&self, texts: &[String], model: &str) -> DocentResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let response = self
            .post("embeddings", &EmbedBody { model, input: texts })
            .map_err(|reason| EmbeddingError::InferenceFailed { reason })?;
        let mut parsed: EmbedResponse =
            response.json().map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("JSON parse error: {e}"),
            })?;
        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: parsed.data.len(),
            }
            .into());
        }
        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

/// Content deltas of a `text/event-stream` completion.
struct SseTokens {
    lines: Lines<BufReader<Response>>,
    done: bool,
}

impl Iterator for SseTokens {
    type Item = Result<String, SynthesisError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(SynthesisError::CallFailed {
                        reason: format!("stream read error: {e}"),
                    }));
                }
            };
            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data == "[DONE]" {
                self.done = true;
                return None;
            }
            match serde_json::from_str::<StreamChunk>(data) {
                Ok(chunk) => {
                    let text = chunk.choices.into_iter().next().and_then(|c| c.delta.content);
                    if let Some(text) = text.filter(|t| !t.is_empty()) {
                        return Some(Ok(text));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(SynthesisError::CallFailed {
                        reason: format!("malformed stream event: {e}"),
                    }));
                }
            }
        }
        None
    }
}
