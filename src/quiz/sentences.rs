use std::sync::LazyLock;

use regex::Regex;

static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Minimum whitespace-delimited tokens for a sentence to be quiz-worthy.
pub const MIN_TOKENS: usize = 8;

/// Split after sentence-terminal punctuation followed by whitespace.
/// The punctuation stays with its sentence; pieces are trimmed and may be empty.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in BOUNDARY_RE.find_iter(text) {
        // terminal punctuation is a single ASCII byte
        out.push(text[start..m.start() + 1].trim());
        start = m.end();
    }
    out.push(text[start..].trim());
    out
}

pub fn token_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

/// Sentences with at least [`MIN_TOKENS`] tokens, in document order.
pub fn candidates(text: &str) -> Vec<&str> {
    split_sentences(text)
        .into_iter()
        .filter(|s| token_count(s) >= MIN_TOKENS)
        .collect()
}

// ── Tests ──
