use std::collections::HashMap;
use std::sync::Arc;

use docent_core::errors::DocentResult;
use docent_core::traits::{ILexicalIndex, ILexicalIndexBuilder};

const K1: f32 = 1.5;
const B: f32 = 0.75;
/// Negative IDF values are floored at `EPSILON * mean_idf`.
const EPSILON: f32 = 0.25;

/// Okapi BM25 over a pre-tokenized corpus.
#[derive(Debug, Clone)]
pub struct Bm25Index {
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lens: Vec<f32>,
    avg_doc_len: f32,
    idf: HashMap<String, f32>,
}

impl Bm25Index {
    pub fn new(tokenized_corpus: &[Vec<String>]) -> Self {
        let mut term_freqs = Vec::with_capacity(tokenized_corpus.len());
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        let mut doc_lens = Vec::with_capacity(tokenized_corpus.len());

        for doc in tokenized_corpus {
            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in doc {
                *tf.entry(token.clone()).or_default() += 1;
            }
            for term in tf.keys() {
                *doc_freq.entry(term.clone()).or_default() += 1;
            }
            doc_lens.push(doc.len() as f32);
            term_freqs.push(tf);
        }

        let n = tokenized_corpus.len() as f32;
        let total_len: f32 = doc_lens.iter().sum();
        let avg_doc_len = if n > 0.0 { total_len / n } else { 0.0 };

        let mut idf: HashMap<String, f32> = doc_freq
            .into_iter()
            .map(|(term, df)| {
                let df = df as f32;
                (term, ((n - df + 0.5) / (df + 0.5)).ln())
            })
            .collect();
        if !idf.is_empty() {
            let mean = idf.values().sum::<f32>() / idf.len() as f32;
            let floor = EPSILON * mean;
            for value in idf.values_mut() {
                if *value < 0.0 {
                    *value = floor;
                }
            }
        }

        Self {
            term_freqs,
            doc_lens,
            avg_doc_len,
            idf,
        }
    }
}

impl ILexicalIndex for Bm25Index {
    fn score(&self, query_tokens: &[String]) -> Vec<f32> {
        let avg = if self.avg_doc_len > 0.0 {
            self.avg_doc_len
        } else {
            1.0
        };
        self.term_freqs
            .iter()
            .zip(&self.doc_lens)
            .map(|(tf, &dl)| {
                let norm = K1 * (1.0 - B + B * dl / avg);
                query_tokens
                    .iter()
                    .filter_map(|q| {
                        let f = *tf.get(q)? as f32;
                        let idf = self.idf.get(q).copied().unwrap_or(0.0);
                        Some(idf * f * (K1 + 1.0) / (f + norm))
                    })
                    .sum()
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.term_freqs.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Bm25IndexBuilder;

impl ILexicalIndexBuilder for Bm25IndexBuilder {
    fn build(&self, tokenized_corpus: &[Vec<String>]) -> DocentResult<Arc<dyn ILexicalIndex>> {
        Ok(Arc::new(Bm25Index::new(tokenized_corpus)))
    }
}
