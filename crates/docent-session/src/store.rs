//! SessionStore: concurrent per-session state via DashMap.
//!
//! Indexes are held as `Arc<SessionIndex>`. A rebuild installs a fresh
//! `Arc`; requests already holding the old one finish against it.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use docent_core::errors::{DocentError, DocentResult};
use docent_core::models::Document;

use crate::index::SessionIndex;

struct SessionEntry {
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    documents: Vec<Document>,
    index: Option<Arc<SessionIndex>>,
    queries_used: u64,
}

/// Cloned summary of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub document_count: usize,
    pub has_index: bool,
    pub queries_used: u64,
}

/// Thread-safe session registry, injected wherever sessions are needed.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session and return its id.
    pub fn create_session(&self) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                created_at: now,
                last_activity: now,
                documents: Vec::new(),
                index: None,
                queries_used: 0,
            },
        );
        debug!(component = "session_store", session_id = %session_id, "session created");
        session_id
    }

    /// Add or replace a document. Takes effect at the next index build.
    pub fn add_document(
        &self,
        session_id: &str,
        doc_id: &str,
        name: Option<String>,
        text: String,
    ) -> DocentResult<()> {
        let mut entry = self.entry_mut(session_id)?;
        let doc = Document {
            doc_id: doc_id.to_string(),
            name,
            text,
        };
        match entry.documents.iter_mut().find(|d| d.doc_id == doc_id) {
            Some(existing) => *existing = doc,
            None => entry.documents.push(doc),
        }
        entry.last_activity = Utc::now();
        Ok(())
    }

    /// Documents in upload order.
    pub fn documents(&self, session_id: &str) -> DocentResult<Vec<Document>> {
        self.sessions
            .get(session_id)
            .map(|e| e.documents.clone())
            .ok_or_else(|| not_found(session_id))
    }

    /// Replace the session's index in one step.
    pub fn install_index(
        &self,
        session_id: &str,
        index: SessionIndex,
    ) -> DocentResult<Arc<SessionIndex>> {
        let index = Arc::new(index);
        let mut entry = self.entry_mut(session_id)?;
        let replaced = entry.index.replace(Arc::clone(&index)).is_some();
        entry.last_activity = Utc::now();
        info!(
            component = "session_store",
            session_id,
            chunks = index.len(),
            replaced,
            "session index installed"
        );
        Ok(index)
    }

    /// Current index of a session.
    pub fn index(&self, session_id: &str) -> DocentResult<Arc<SessionIndex>> {
        let entry = self.sessions.get(session_id).ok_or_else(|| not_found(session_id))?;
        entry.index.clone().ok_or_else(|| DocentError::IndexNotBuilt {
            session_id: session_id.to_string(),
        })
    }

    /// Count one query against the session's allowance.
    pub fn record_query(&self, session_id: &str, limit: u64) -> DocentResult<u64> {
        let mut entry = self.entry_mut(session_id)?;
        if entry.queries_used >= limit {
            return Err(DocentError::QueryLimitReached {
                session_id: session_id.to_string(),
                limit,
            });
        }
        entry.queries_used += 1;
        entry.last_activity = Utc::now();
        Ok(entry.queries_used)
    }

    pub fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        self.sessions.get(session_id).map(|e| SessionSnapshot {
            session_id: session_id.to_string(),
            created_at: e.created_at,
            last_activity: e.last_activity,
            document_count: e.documents.len(),
            has_index: e.index.is_some(),
            queries_used: e.queries_used,
        })
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn remove_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop sessions created more than `ttl` ago, together with their index.
    /// Returns the number removed.
    pub fn cleanup_expired(&self, ttl: Duration) -> usize {
        self.cleanup_expired_at(ttl, Utc::now())
    }

    /// `cleanup_expired` against an explicit clock.
    pub fn cleanup_expired_at(&self, ttl: Duration, now: DateTime<Utc>) -> usize {
        self.expire_at(ttl, now).len()
    }

    /// Remove expired sessions and return their ids.
    pub fn expire_at(&self, ttl: Duration, now: DateTime<Utc>) -> Vec<String> {
        let mut removed = Vec::new();
        self.sessions.retain(|session_id, entry| {
            let keep = now - entry.created_at <= ttl;
            if !keep {
                removed.push(session_id.clone());
            }
            keep
        });
        if !removed.is_empty() {
            info!(
                component = "session_store",
                removed = removed.len(),
                "expired sessions removed"
            );
        }
        removed
    }

    fn entry_mut(
        &self,
        session_id: &str,
    ) -> DocentResult<dashmap::mapref::one::RefMut<'_, String, SessionEntry>> {
        self.sessions.get_mut(session_id).ok_or_else(|| not_found(session_id))
    }
}

fn not_found(session_id: &str) -> DocentError {
    DocentError::SessionNotFound {
        session_id: session_id.to_string(),
    }
}
