//! Candidate entity extraction: capitalized phrases plus frequent tokens.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub const STOPWORDS: [&str; 20] = [
    "the", "a", "an", "and", "of", "in", "to", "for", "on", "with", "by", "is", "are", "be",
    "this", "that", "it", "as", "at", "from",
];

static CAPITALIZED_PHRASE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)\b").ok());
static TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b[\w\-]+\b").ok());

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Counter that remembers first-insertion order for tie-breaking.
#[derive(Debug, Default)]
struct OrderedCounter {
    counts: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl OrderedCounter {
    fn add(&mut self, key: String, by: usize) {
        match self.positions.get(&key) {
            Some(&pos) => self.counts[pos].1 += by,
            None => {
                self.positions.insert(key.clone(), self.counts.len());
                self.counts.push((key, by));
            }
        }
    }

    /// Highest counts first; equal counts keep insertion order.
    fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.counts.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Up to `limit` entity names found in `text`, deduplicated case-insensitively.
///
/// Capitalized phrases are counted first; the `limit` most frequent
/// non-stopword tokens longer than three characters are added on top.
/// Names shorter than three characters are dropped.
pub fn extract_candidate_entities(text: &str, limit: usize) -> Vec<String> {
    if text.is_empty() || limit == 0 {
        return Vec::new();
    }
    let (Some(phrase_re), Some(token_re)) = (CAPITALIZED_PHRASE.as_ref(), TOKEN.as_ref()) else {
        return Vec::new();
    };

    let mut counter = OrderedCounter::default();
    for m in phrase_re.find_iter(text) {
        counter.add(title_case(m.as_str()), 1);
    }

    let lowered = text.to_lowercase();
    let mut tokens = OrderedCounter::default();
    for m in token_re.find_iter(&lowered) {
        let token = m.as_str();
        if !is_stopword(token) && token.chars().count() > 3 {
            tokens.add(token.to_string(), 1);
        }
    }
    for (token, freq) in tokens.most_common(limit) {
        counter.add(capitalize(&token), freq);
    }

    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::with_capacity(limit);
    for (name, _) in counter.most_common(limit) {
        let key = name.to_lowercase();
        if name.chars().count() < 3 || !seen.insert(key) {
            continue;
        }
        result.push(name);
        if result.len() >= limit {
            break;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_are_title_cased_and_merged_with_tokens() {
        let names = extract_candidate_entities(
            "Lag Monitor watches replication. Replication lag pages the DATABASE team.",
            5,
        );
        assert!(names.contains(&"Lag Monitor".to_string()));
        // "Replication" appears as a phrase once and as a token twice.
        assert_eq!(names[0], "Replication");
        let lowered: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        let mut unique = lowered.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), lowered.len());
    }

    #[test]
    fn short_tokens_and_stopwords_are_ignored() {
        let names = extract_candidate_entities("this is and of for with a an it", 5);
        assert!(names.is_empty());
    }

    #[test]
    fn limit_is_respected() {
        let text = "Alpha Beta Gamma Delta Epsilon Zeta Theta Iota Kappa";
        assert!(extract_candidate_entities(text, 3).len() <= 3);
        assert!(extract_candidate_entities(text, 0).is_empty());
    }

    #[test]
    fn capitalize_matches_title_rules() {
        assert_eq!(capitalize("fAILOVER"), "Failover");
        assert_eq!(title_case("incident   COMMANDER"), "Incident Commander");
    }
}
