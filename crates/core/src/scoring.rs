// crates/core/src/scoring.rs
//! Conversation scoring engine.
//!
//! Maps an ordered list of turns to an [`AnalysisResult`]: seven independent
//! heuristic metrics plus a weighted overall score. Every metric reads the
//! same preprocessed [`TextStats`]; each is a standalone function so it can be
//! tested without the others.
//!
//! ## Overall weights
//!
//! | Component | Weight |
//! |-----------|--------|
//! | accuracy | 0.20 |
//! | completeness | 0.15 |
//! | clarity | 0.15 |
//! | empathy | 0.15 |
//! | relevance | 0.15 |
//! | resolution | 0.20 |
//! | each fallback reply | -0.05 |
//!
//! The fallback penalty is unbounded before the final clamp, so a
//! conversation with enough fallbacks floors at 0.0.

use std::collections::HashSet;

use convo_score_types::{
    AnalysisResult, SentimentLabel, Turn, TITLE_MAX_CHARS, UNTITLED_CONVERSATION,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ReadabilityError;
use crate::lexicon::{
    contains_any, count_fallbacks, count_matches, CLOSING_TERMS, DEFINITIVE_RE, EMPATHY_RE,
    ESCALATION_TERMS, GREETING_TERMS, RESOLUTION_TERMS, VAGUE_RE,
};
use crate::metrics::{clamp01, per_at_least_one, round2};
use crate::polarity::{PolarityEstimator, Vader};
use crate::readability::{FleschKincaid, ReadabilityEstimator};

pub const W_ACCURACY: f64 = 0.2;
pub const W_COMPLETENESS: f64 = 0.15;
pub const W_CLARITY: f64 = 0.15;
pub const W_EMPATHY: f64 = 0.15;
pub const W_RELEVANCE: f64 = 0.15;
pub const W_RESOLUTION: f64 = 0.2;
pub const FALLBACK_PENALTY: f64 = 0.05;

/// Baseline added to the net definitive-minus-vague rate.
pub const ACCURACY_BASELINE: f64 = 0.5;
/// Word count at which the length term of completeness saturates.
pub const COMPLETENESS_WORD_TARGET: f64 = 500.0;
pub const COMPLETENESS_LENGTH_WEIGHT: f64 = 0.6;
pub const COMPLETENESS_MARKER_BONUS: f64 = 0.2;
/// Grade level at which clarity reaches 0.
pub const CLARITY_GRADE_CEILING: f64 = 20.0;
/// Clarity used when the readability estimator fails.
pub const CLARITY_FALLBACK: f64 = 0.5;
pub const RELEVANCE_DIVERSITY_WEIGHT: f64 = 1.2;
pub const RELEVANCE_QUESTION_BONUS: f64 = 0.1;

/// Conversation text after preprocessing.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStats {
    /// All turn texts joined with a single space.
    pub all_text: String,
    /// Lowercased `all_text`; every keyword match runs against this.
    pub all_text_lc: String,
    pub total_responses: usize,
    /// Whitespace-delimited tokens in `all_text`.
    pub word_count: usize,
}

impl TextStats {
    pub fn from_turns(turns: &[Turn]) -> Self {
        let all_text = turns
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let all_text_lc = all_text.to_lowercase();
        let word_count = all_text.split_whitespace().count();
        Self {
            all_text,
            all_text_lc,
            total_responses: turns.len(),
            word_count,
        }
    }
}

/// The seven inputs of the overall combination, before output rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub accuracy: f64,
    pub completeness: f64,
    pub clarity: f64,
    pub empathy: f64,
    pub relevance: f64,
    pub resolution: bool,
    pub fallback_count: u32,
}

/// Intermediate values of one scoring run, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub title: String,
    pub word_count: usize,
    pub total_responses: usize,
    pub compound: f64,
    /// `None` when the readability estimator failed.
    pub grade: Option<f64>,
    pub sentiment: SentimentLabel,
    pub escalation_need: bool,
    pub components: ComponentScores,
}

impl ScoreBreakdown {
    pub fn to_result(&self) -> AnalysisResult {
        let c = &self.components;
        AnalysisResult {
            title: self.title.clone(),
            sentiment: self.sentiment,
            accuracy: c.accuracy,
            completeness: c.completeness,
            clarity: round2(c.clarity),
            empathy: c.empathy,
            relevance: c.relevance,
            escalation_need: self.escalation_need,
            resolution: c.resolution,
            fallback_count: c.fallback_count,
            overall: overall(c),
        }
    }
}

/// Scores conversations with a pluggable polarity and readability estimator.
///
/// Holds no mutable state; one instance can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<P = Vader, R = FleschKincaid> {
    polarity: P,
    readability: R,
}

impl Scorer {
    /// VADER-style polarity with Flesch–Kincaid readability.
    pub const fn standard() -> Self {
        Self::new(Vader, FleschKincaid)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl<P: PolarityEstimator, R: ReadabilityEstimator> Scorer<P, R> {
    pub const fn new(polarity: P, readability: R) -> Self {
        Self {
            polarity,
            readability,
        }
    }

    pub fn score(&self, turns: &[Turn]) -> AnalysisResult {
        let result = self.breakdown(turns).to_result();
        debug!(
            turns = turns.len(),
            sentiment = %result.sentiment,
            fallback_count = result.fallback_count,
            overall = result.overall,
            "Scored conversation"
        );
        result
    }

    pub fn breakdown(&self, turns: &[Turn]) -> ScoreBreakdown {
        let stats = TextStats::from_turns(turns);

        let compound = self.polarity.compound(&stats.all_text);
        let grade = self.readability.grade(&stats.all_text);
        if let Err(e) = &grade {
            debug!(error = %e, "Readability failed, using fallback clarity");
        }
        let clarity = clarity_from_grade(&grade);

        let components = ComponentScores {
            accuracy: accuracy(&stats),
            completeness: completeness(&stats),
            clarity,
            empathy: empathy(&stats),
            relevance: relevance(&stats),
            resolution: resolution(&stats),
            fallback_count: fallback_count(&stats),
        };

        ScoreBreakdown {
            title: title(turns),
            word_count: stats.word_count,
            total_responses: stats.total_responses,
            compound,
            grade: grade.ok(),
            sentiment: SentimentLabel::from_compound(compound),
            escalation_need: escalation_need(&stats),
            components,
        }
    }
}

static STANDARD_SCORER: Scorer = Scorer::standard();

/// Score a conversation with the standard estimators.
pub fn score(turns: &[Turn]) -> AnalysisResult {
    STANDARD_SCORER.score(turns)
}

/// First 50 characters of the first turn, or the placeholder title.
pub fn title(turns: &[Turn]) -> String {
    match turns.first() {
        Some(first) => first.text.chars().take(TITLE_MAX_CHARS).collect(),
        None => UNTITLED_CONVERSATION.to_string(),
    }
}

/// Net rate of definitive over vague wording per turn, around a 0.5 baseline.
/// Whole-word matching.
pub fn accuracy(stats: &TextStats) -> f64 {
    let definitive = count_matches(&DEFINITIVE_RE, &stats.all_text_lc) as f64;
    let vague = count_matches(&VAGUE_RE, &stats.all_text_lc) as f64;
    clamp01(per_at_least_one(definitive - vague, stats.total_responses) + ACCURACY_BASELINE)
}

/// Length term plus greeting and closing bonuses. Greeting/closing use
/// substring containment, so "this" counts as a greeting.
pub fn completeness(stats: &TextStats) -> f64 {
    let length = (stats.word_count as f64 / COMPLETENESS_WORD_TARGET) * COMPLETENESS_LENGTH_WEIGHT;
    let greeting = if contains_any(GREETING_TERMS, &stats.all_text_lc) {
        COMPLETENESS_MARKER_BONUS
    } else {
        0.0
    };
    let closing = if contains_any(CLOSING_TERMS, &stats.all_text_lc) {
        COMPLETENESS_MARKER_BONUS
    } else {
        0.0
    };
    clamp01(length + greeting + closing)
}

/// Substring containment.
pub fn escalation_need(stats: &TextStats) -> bool {
    contains_any(ESCALATION_TERMS, &stats.all_text_lc)
}

/// Inverse readability grade. Not rounded here; rounding happens on output
/// so the overall score sees the exact value.
pub fn clarity_from_grade(grade: &Result<f64, ReadabilityError>) -> f64 {
    match grade {
        Ok(grade) => clamp01(1.0 - grade / CLARITY_GRADE_CEILING),
        Err(_) => CLARITY_FALLBACK,
    }
}

/// Empathy phrases per half-turn. Whole-word matching.
pub fn empathy(stats: &TextStats) -> f64 {
    let hits = count_matches(&EMPATHY_RE, &stats.all_text_lc) as f64;
    clamp01(per_at_least_one(hits, stats.total_responses * 2))
}

/// Lexical diversity with a small bonus when anyone asked a question.
pub fn relevance(stats: &TextStats) -> f64 {
    let unique_words = stats.all_text_lc.split_whitespace().collect::<HashSet<_>>().len();
    let diversity = per_at_least_one(unique_words as f64, stats.word_count);
    let question = if stats.all_text.contains('?') {
        RELEVANCE_QUESTION_BONUS
    } else {
        0.0
    };
    clamp01(diversity * RELEVANCE_DIVERSITY_WEIGHT + question)
}

/// Substring containment.
pub fn resolution(stats: &TextStats) -> bool {
    contains_any(RESOLUTION_TERMS, &stats.all_text_lc)
}

/// Non-overlapping fallback pattern matches.
pub fn fallback_count(stats: &TextStats) -> u32 {
    u32::try_from(count_fallbacks(&stats.all_text_lc)).unwrap_or(u32::MAX)
}

/// Weighted sum before clamping and rounding. Can be negative.
pub fn overall_raw(c: &ComponentScores) -> f64 {
    let resolved = if c.resolution { 1.0 } else { 0.0 };
    c.accuracy * W_ACCURACY
        + c.completeness * W_COMPLETENESS
        + c.clarity * W_CLARITY
        + c.empathy * W_EMPATHY
        + c.relevance * W_RELEVANCE
        + resolved * W_RESOLUTION
        - c.fallback_count as f64 * FALLBACK_PENALTY
}

/// Overall score in `[0, 1]`, rounded to 2 decimals.
pub fn overall(c: &ComponentScores) -> f64 {
    round2(clamp01(overall_raw(c)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedPolarity(f64);

    impl PolarityEstimator for FixedPolarity {
        fn compound(&self, _text: &str) -> f64 {
            self.0
        }
    }

    struct FixedGrade(Result<f64, ReadabilityError>);

    impl ReadabilityEstimator for FixedGrade {
        fn grade(&self, _text: &str) -> Result<f64, ReadabilityError> {
            self.0.clone()
        }
    }

    fn turns(texts: &[&str]) -> Vec<Turn> {
        texts.iter().map(|t| Turn::new(*t)).collect()
    }

    fn stats(texts: &[&str]) -> TextStats {
        TextStats::from_turns(&turns(texts))
    }

    fn perfect_components() -> ComponentScores {
        ComponentScores {
            accuracy: 1.0,
            completeness: 1.0,
            clarity: 1.0,
            empathy: 1.0,
            relevance: 1.0,
            resolution: true,
            fallback_count: 0,
        }
    }

    #[test]
    fn test_text_stats_joins_with_single_space() {
        let s = stats(&["Hello there", "How ARE you?"]);
        assert_eq!(s.all_text, "Hello there How ARE you?");
        assert_eq!(s.all_text_lc, "hello there how are you?");
        assert_eq!(s.word_count, 5);
        assert_eq!(s.total_responses, 2);
    }

    #[test]
    fn test_title_truncates_to_50_chars() {
        let long = "a".repeat(80);
        let t = title(&turns(&[long.as_str(), "second"]));
        assert_eq!(t.chars().count(), 50);
        assert!(long.starts_with(&t));
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let text = "é".repeat(60);
        let t = title(&turns(&[text.as_str()]));
        assert_eq!(t.chars().count(), 50);
    }

    #[test]
    fn test_title_keeps_short_text_and_case() {
        assert_eq!(title(&turns(&["Hello World"])), "Hello World");
        assert_eq!(title(&[]), UNTITLED_CONVERSATION);
    }

    #[test]
    fn test_accuracy_net_rate() {
        assert_eq!(accuracy(&stats(&["Yes", "ok", "fine", "sure"])), 0.75);
        assert_eq!(accuracy(&stats(&["yes", "maybe", "hello", "there"])), 0.5);
        assert_eq!(accuracy(&stats(&["Yes, that is correct."])), 1.0);
        assert_eq!(accuracy(&stats(&["Maybe it works.", "I am not sure, perhaps."])), 0.0);
    }

    #[test]
    fn test_accuracy_ignores_partial_words() {
        assert_eq!(accuracy(&stats(&["Correctness matters"])), 0.5);
        assert_eq!(accuracy(&stats(&["I don't know"])), 0.5);
    }

    #[test]
    fn test_completeness_markers_are_substrings() {
        let s = stats(&["hello", "thanks"]);
        assert!((completeness(&s) - 0.4024).abs() < 1e-12);

        // "this" contains "hi"
        let s = stats(&["this is fine"]);
        assert!((completeness(&s) - 0.2036).abs() < 1e-12);
    }

    #[test]
    fn test_completeness_saturates() {
        let long = "word ".repeat(600);
        assert_eq!(completeness(&stats(&[long.as_str(), "hello", "bye"])), 1.0);
    }

    #[test]
    fn test_escalation_keywords() {
        assert!(escalation_need(&stats(&["I need to speak to a manager"])));
        assert!(escalation_need(&stats(&["This is UNACCEPTABLE"])));
        assert!(!escalation_need(&stats(&["Thanks, that works"])));
    }

    #[test]
    fn test_resolution_keywords() {
        assert!(resolution(&stats(&["the issue is resolved now"])));
        assert!(resolution(&stats(&["You're all set!"])));
        assert!(resolution(&stats(&["It was unsolved"]))); // substring
        assert!(!resolution(&stats(&["still waiting"])));
    }

    #[test]
    fn test_clarity_from_grade() {
        assert_eq!(clarity_from_grade(&Ok(10.0)), 0.5);
        assert_eq!(clarity_from_grade(&Ok(4.0)), 0.8);
        assert_eq!(clarity_from_grade(&Ok(-5.0)), 1.0);
        assert_eq!(clarity_from_grade(&Ok(30.0)), 0.0);
        assert_eq!(clarity_from_grade(&Err(ReadabilityError::NoWords)), CLARITY_FALLBACK);
    }

    #[test]
    fn test_empathy_per_half_turn() {
        assert_eq!(empathy(&stats(&["I understand, sorry about that."])), 1.0);
        assert_eq!(empathy(&stats(&["Sorry", "ok"])), 0.25);
        assert_eq!(empathy(&stats(&["That was helpful"])), 0.0);
        assert_eq!(empathy(&stats(&["sorry sorry sorry sorry sorry"])), 1.0);
    }

    #[test]
    fn test_relevance_diversity() {
        assert_eq!(relevance(&stats(&["a b c d"])), 1.0);
        assert!((relevance(&stats(&["the the the the"])) - 0.3).abs() < 1e-12);
        // "the?" is a distinct token
        assert!((relevance(&stats(&["the the the the?"])) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_count() {
        let s = stats(&["I don't know", "and I can't help.", "Sorry, I do not understand"]);
        assert_eq!(fallback_count(&s), 3);
    }

    #[test]
    fn test_not_sure_counts_as_vague_and_fallback() {
        let s = stats(&["I'm not sure"]);
        assert_eq!(fallback_count(&s), 1);
        assert_eq!(accuracy(&s), 0.0);
    }

    #[test]
    fn test_overall_perfect_components() {
        assert_eq!(overall(&perfect_components()), 1.0);
    }

    #[test]
    fn test_fallback_penalty_is_five_hundredths() {
        let base = ComponentScores {
            fallback_count: 1,
            ..perfect_components()
        };
        let more = ComponentScores {
            fallback_count: 2,
            ..base
        };
        assert!((overall_raw(&base) - overall_raw(&more) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_penalty_saturates_at_zero() {
        let c = ComponentScores {
            fallback_count: 40,
            ..perfect_components()
        };
        assert!(overall_raw(&c) < 0.0);
        assert_eq!(overall(&c), 0.0);
    }

    #[test]
    fn test_overall_rounds_to_two_decimals() {
        let c = ComponentScores {
            accuracy: 0.5,
            completeness: 0.0,
            clarity: 0.5,
            empathy: 0.0,
            relevance: 0.0,
            resolution: false,
            fallback_count: 0,
        };
        // 0.1 + 0.075
        let value = overall(&c);
        assert!(value == 0.17 || value == 0.18, "got {value}");
    }

    #[test]
    fn test_empty_conversation() {
        let result = score(&[]);
        assert_eq!(result.title, UNTITLED_CONVERSATION);
        assert_eq!(result.completeness, 0.0);
        assert_eq!(result.relevance, 0.0);
        assert_eq!(result.empathy, 0.0);
        assert_eq!(result.accuracy, 0.5);
        assert_eq!(result.clarity, CLARITY_FALLBACK);
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
        assert!(!result.escalation_need);
        assert!(!result.resolution);
        assert_eq!(result.fallback_count, 0);

        let breakdown = Scorer::standard().breakdown(&[]);
        assert_eq!(breakdown.word_count, 0);
        assert_eq!(breakdown.grade, None);
    }

    #[test]
    fn test_sentiment_boundaries_through_scorer() {
        let cases = [
            (0.05, SentimentLabel::Neutral),
            (-0.05, SentimentLabel::Neutral),
            (0.06, SentimentLabel::Positive),
            (-0.06, SentimentLabel::Negative),
        ];
        for (compound, expected) in cases {
            let scorer = Scorer::new(FixedPolarity(compound), FleschKincaid);
            assert_eq!(scorer.score(&turns(&["anything"])).sentiment, expected);
        }
    }

    #[test]
    fn test_readability_failure_uses_fallback_clarity() {
        let scorer = Scorer::new(
            Vader,
            FixedGrade(Err(ReadabilityError::NonFinite { grade: f64::NAN })),
        );
        let breakdown = scorer.breakdown(&turns(&["Plain words here."]));
        assert_eq!(breakdown.grade, None);
        assert_eq!(breakdown.components.clarity, CLARITY_FALLBACK);
    }

    #[test]
    fn test_overall_uses_unrounded_clarity() {
        // grade 3.1 -> clarity 0.845, shown as 0.85 (or 0.84 on float noise)
        let scorer = Scorer::new(FixedPolarity(0.0), FixedGrade(Ok(3.1)));
        let breakdown = scorer.breakdown(&turns(&["word"]));
        let result = breakdown.to_result();
        assert!((breakdown.components.clarity - 0.845).abs() < 1e-12);
        assert_eq!(result.clarity, round2(breakdown.components.clarity));
        assert_eq!(result.overall, overall(&breakdown.components));
    }

    #[test]
    fn test_score_is_idempotent() {
        let conversation = turns(&[
            "Hi, my internet keeps dropping.",
            "Sorry to hear that! Could be the router. Please restart it.",
            "That fixed it, thank you!",
        ]);
        assert_eq!(score(&conversation), score(&conversation));
    }
}
