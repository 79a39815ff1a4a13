//! Cross-encoder served over HTTP.
//!
//! `POST {base}/rerank` with `{model, query, documents}` returns
//! `{"scores": [...]}`, one score per document in request order. The encoder
//! reports unavailable until [`HttpCrossEncoder::probe`] reaches
//! `GET {base}/health`, mirroring a local model that failed to load.

use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use docent_core::errors::{DocentResult, RerankError};
use docent_core::traits::ICrossEncoder;

use crate::http::HttpSettings;

pub struct HttpCrossEncoder {
    settings: HttpSettings,
    model: String,
    client: Client,
    available: AtomicBool,
}

#[derive(Serialize)]
struct RerankBody<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
}

#[derive(Deserialize)]
struct RerankResponse {
    scores: Vec<f32>,
}

impl HttpCrossEncoder {
    pub fn new(settings: HttpSettings, model: impl Into<String>) -> DocentResult<Self> {
        let client = settings.client()?;
        Ok(Self {
            settings,
            model: model.into(),
            client,
            available: AtomicBool::new(false),
        })
    }

    /// Check the health endpoint and record the result.
    pub fn probe(&self) -> bool {
        let ok = match self.client.get(self.settings.endpoint("health")).send() {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(
                    component = "cross_encoder",
                    model = %self.model,
                    status = %resp.status(),
                    "health check failed"
                );
                false
            }
            Err(e) => {
                warn!(
                    component = "cross_encoder",
                    model = %self.model,
                    error = %e,
                    "cross-encoder unreachable"
                );
                false
            }
        };
        self.available.store(ok, Ordering::Relaxed);
        ok
    }
}

impl ICrossEncoder for HttpCrossEncoder {
    fn predict(&self, query: &str, candidates: &[String]) -> Result<Vec<f32>, RerankError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let body = RerankBody {
            model: &self.model,
            query,
            documents: candidates,
        };
        let mut request = self.client.post(self.settings.endpoint("rerank")).json(&body);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().map_err(|e| RerankError::InferenceFailed {
            reason: format!("HTTP error: {e}"),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(RerankError::InferenceFailed {
                reason: format!("rerank endpoint returned {status}"),
            });
        }
        let parsed: RerankResponse = response.json().map_err(|e| RerankError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
        if parsed.scores.len() != candidates.len() {
            return Err(RerankError::ScoreCountMismatch {
                expected: candidates.len(),
                actual: parsed.scores.len(),
            });
        }
        debug!(component = "cross_encoder", candidates = candidates.len(), "scored");
        Ok(parsed.scores)
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
