// crates/types/src/lib.rs
//! Value types shared between the scoring engine and the store/CLI crates.
//!
//! Nothing here has behavior beyond construction, labeling and serde.

use serde::{Deserialize, Serialize};

/// Title used when a conversation has no turns.
pub const UNTITLED_CONVERSATION: &str = "Untitled Conversation";

/// Maximum number of characters taken from the first turn for the title.
pub const TITLE_MAX_CHARS: usize = 50;

/// Compound polarity above which a conversation reads as positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound polarity below which a conversation reads as negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// One utterance in a conversation, reduced to its text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
}

impl Turn {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for Turn {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Turn {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Overall sentiment of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Label a compound polarity score. Both thresholds are strict, so
    /// exactly `0.05` and `-0.05` stay neutral.
    pub fn from_compound(compound: f64) -> Self {
        if compound > POSITIVE_THRESHOLD {
            Self::Positive
        } else if compound < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The quality scorecard for one conversation.
///
/// Bounded fields (`accuracy`, `completeness`, `clarity`, `empathy`,
/// `relevance`, `overall`) always lie in `[0.0, 1.0]`. `clarity` and
/// `overall` are rounded to two decimals; the others are left unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    pub sentiment: SentimentLabel,
    pub accuracy: f64,
    pub completeness: f64,
    pub clarity: f64,
    pub empathy: f64,
    pub relevance: f64,
    pub escalation_need: bool,
    pub resolution: bool,
    pub fallback_count: u32,
    pub overall: f64,
}
