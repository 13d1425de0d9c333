// crates/core/src/lib.rs
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod polarity;
pub mod readability;
pub mod scoring;

pub use convo_score_types::{AnalysisResult, SentimentLabel, Turn};
pub use error::*;
pub use polarity::{PolarityEstimator, Vader};
pub use readability::{FleschKincaid, ReadabilityEstimator};
pub use scoring::{score, ComponentScores, ScoreBreakdown, Scorer, TextStats};
