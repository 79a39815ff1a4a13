use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\w+").ok());

/// Lowercased `\w+` runs, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    match WORD.as_ref() {
        Some(re) => re.find_iter(&lowered).map(|m| m.as_str().to_string()).collect(),
        None => Vec::new(),
    }
}
