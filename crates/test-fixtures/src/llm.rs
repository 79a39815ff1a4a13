use std::sync::Mutex;
use std::time::Duration;

use docent_core::errors::SynthesisError;
use docent_core::traits::{CompletionRequest, ILlmJudge, TokenStream};

type Responder = Box<dyn Fn(&CompletionRequest) -> String + Send + Sync>;

/// Replies through a closure and records every request.
pub struct ScriptedLlm {
    responder: Responder,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn new(responder: impl Fn(&CompletionRequest) -> String + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with `reply`.
    pub fn fixed(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::new(move |_| reply.clone())
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ILlmJudge for ScriptedLlm {
    fn complete(&self, request: &CompletionRequest) -> Result<String, SynthesisError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
        Ok((self.responder)(request))
    }

    /// Streams the reply word by word.
    fn stream(&self, request: &CompletionRequest) -> Result<TokenStream, SynthesisError> {
        let text = self.complete(request)?;
        let tokens: Vec<Result<String, SynthesisError>> = text
            .split_inclusive(' ')
            .map(|t| Ok(t.to_string()))
            .collect();
        Ok(Box::new(tokens.into_iter()))
    }
}

/// Every call fails.
#[derive(Debug, Default)]
pub struct FailingLlm;

impl ILlmJudge for FailingLlm {
    fn complete(&self, _request: &CompletionRequest) -> Result<String, SynthesisError> {
        Err(SynthesisError::CallFailed {
            reason: "fixture failure".into(),
        })
    }
}

/// Sleeps before replying, to exercise deadlines.
#[derive(Debug)]
pub struct SlowLlm {
    pub delay: Duration,
    pub reply: String,
}

impl SlowLlm {
    pub fn new(delay: Duration, reply: &str) -> Self {
        Self {
            delay,
            reply: reply.to_string(),
        }
    }
}

impl ILlmJudge for SlowLlm {
    fn complete(&self, _request: &CompletionRequest) -> Result<String, SynthesisError> {
        std::thread::sleep(self.delay);
        Ok(self.reply.clone())
    }
}
