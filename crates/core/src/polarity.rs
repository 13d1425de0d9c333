// crates/core/src/polarity.rs
//! Compound sentiment polarity.
//!
//! [`Vader`] is the published VADER model: the full valence and emoji
//! lexicons plus its booster, ALL-CAPS, negation, "but" and punctuation rules.
//! The compound score is already normalized into `[-1, 1]`.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Maps text to a single polarity scalar in `[-1, 1]`.
pub trait PolarityEstimator {
    fn compound(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Vader;

impl PolarityEstimator for Vader {
    fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let analyzer = SentimentIntensityAnalyzer::new();
        let compound = analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0);
        if compound.is_finite() {
            compound.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}
