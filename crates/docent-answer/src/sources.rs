//! Numbered answer sources and the citation mapping.

use std::collections::HashMap;

use docent_core::models::{AnswerSource, CitationEntry, Chunk, SourceMeta};
use docent_core::RetrievalHit;

/// Sources plus the `chunk_index → citation id` lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedSources {
    pub sources: Vec<AnswerSource>,
    pub lookup: HashMap<usize, usize>,
}

impl PreparedSources {
    pub fn citation_id(&self, chunk_index: usize) -> Option<usize> {
        self.lookup.get(&chunk_index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Assign citation ids 1..=n in first-seen order over `hits`.
///
/// Out-of-range indices are skipped and a chunk seen twice keeps its first
/// id, so ids stay contiguous. At most `limit` sources are produced.
pub fn prepare_sources(hits: &[RetrievalHit], chunks: &[Chunk], limit: usize) -> PreparedSources {
    let mut prepared = PreparedSources::default();
    for hit in hits {
        if prepared.sources.len() >= limit {
            break;
        }
        if prepared.lookup.contains_key(&hit.idx) {
            continue;
        }
        let Some(chunk) = chunks.get(hit.idx) else {
            continue;
        };
        let id = prepared.sources.len() + 1;
        prepared.sources.push(AnswerSource {
            id,
            text: chunk.text.clone(),
            meta: SourceMeta {
                doc_id: chunk.doc_id.clone(),
                span: chunk.span(),
                chunk_index: hit.idx,
            },
        });
        prepared.lookup.insert(hit.idx, id);
    }
    prepared
}

pub fn citation_mapping(sources: &[AnswerSource]) -> Vec<CitationEntry> {
    sources
        .iter()
        .map(|s| CitationEntry {
            id: s.id,
            meta: s.meta.clone(),
        })
        .collect()
}
