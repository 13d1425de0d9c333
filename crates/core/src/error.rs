// crates/core/src/error.rs
use thiserror::Error;

/// Errors from a readability estimator.
///
/// The scoring engine never propagates these; it substitutes a fixed
/// clarity value instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadabilityError {
    #[error("Text contains no words")]
    NoWords,

    #[error("Readability grade is not a finite number: {grade}")]
    NonFinite { grade: f64 },
}
