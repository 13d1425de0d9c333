// crates/core/src/lexicon.rs
//! Fixed keyword and pattern sets used by the scoring heuristics.
//!
//! Two matching modes are in play and they are not interchangeable:
//!
//! | Set | Mode |
//! |-----|------|
//! | `DEFINITIVE_TERMS`, `VAGUE_TERMS`, `EMPATHY_TERMS` | whole word/phrase (`\b...\b`), counted |
//! | `GREETING_TERMS`, `CLOSING_TERMS`, `ESCALATION_TERMS`, `RESOLUTION_TERMS` | plain substring, any-hit |
//! | `FALLBACK_PATTERNS` | regex alternation, counted |
//!
//! So "this" counts as a greeting (it contains "hi") while "correctness"
//! does not count as "correct". Scores depend on that split.
//!
//! All matching runs against lowercased text. Word boundaries are Unicode
//! aware, so accented letters count as part of a word.

use regex::Regex;
use std::sync::LazyLock;

/// Words signalling a concrete, committed answer.
pub const DEFINITIVE_TERMS: &[&str] = &[
    "yes",
    "no",
    "correct",
    "exactly",
    "specifically",
    "precisely",
];

/// Words and phrases signalling hedging.
pub const VAGUE_TERMS: &[&str] = &["maybe", "perhaps", "possibly", "might", "could be", "not sure"];

pub const GREETING_TERMS: &[&str] = &["hello", "hi", "hey", "greetings"];

pub const CLOSING_TERMS: &[&str] = &["thanks", "thank you", "goodbye", "bye", "appreciate"];

/// Requests for a human, or frustration that should route to one.
pub const ESCALATION_TERMS: &[&str] = &[
    "human agent",
    "speak to someone",
    "escalate",
    "manager",
    "supervisor",
    "not helping",
    "frustrated",
    "angry",
    "unacceptable",
    "complaint",
];

pub const EMPATHY_TERMS: &[&str] = &[
    "understand",
    "sorry",
    "apologize",
    "appreciate",
    "help",
    "support",
    "concern",
    "unfortunate",
    "regret",
    "certainly",
    "happy to",
    "glad to",
];

pub const RESOLUTION_TERMS: &[&str] = &[
    "resolved",
    "solved",
    "fixed",
    "working now",
    "issue resolved",
    "problem solved",
    "all set",
    "good to go",
];

/// Regex fragments for fallback replies. `sorry` followed by
/// understand/help within 20 characters counts once.
pub const FALLBACK_PATTERNS: &[&str] = &[
    r"don'?t know",
    r"can'?t help",
    r"cannot assist",
    r"not sure",
    r"sorry.{0,20}(?:understand|help)",
    r"unable to",
];

pub static DEFINITIVE_RE: LazyLock<Regex> = LazyLock::new(|| whole_word_regex(DEFINITIVE_TERMS));
pub static VAGUE_RE: LazyLock<Regex> = LazyLock::new(|| whole_word_regex(VAGUE_TERMS));
pub static EMPATHY_RE: LazyLock<Regex> = LazyLock::new(|| whole_word_regex(EMPATHY_TERMS));
pub static FALLBACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&FALLBACK_PATTERNS.join("|")).expect("fallback patterns are valid regex")
});

/// Build `\b(?:t1|t2|...)\b` from literal terms, keeping list order so the
/// leftmost-first alternation prefers earlier terms.
pub fn whole_word_regex(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("escaped literals are valid regex")
}

/// Number of non-overlapping matches of `re` in `text`.
pub fn count_matches(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count()
}

/// True if any term occurs anywhere in `text`, word boundaries ignored.
pub fn contains_any(terms: &[&str], text: &str) -> bool {
    terms.iter().any(|term| text.contains(term))
}

pub fn count_fallbacks(text: &str) -> usize {
    count_matches(&FALLBACK_RE, text)
}
