// crates/core/src/readability.rs
//! Readability grade estimation.
//!
//! The engine only needs `text -> grade`; [`FleschKincaid`] is the default
//! implementation of the published Flesch–Kincaid grade-level formula:
//!
//! ```text
//! grade = 0.39 * (words / sentences) + 11.8 * (syllables / words) - 15.59
//! ```
//!
//! rounded to one decimal place.

use crate::error::ReadabilityError;

const SENTENCE_WEIGHT: f64 = 0.39;
const SYLLABLE_WEIGHT: f64 = 11.8;
const GRADE_OFFSET: f64 = 15.59;

/// Estimates the US school grade needed to read a text.
pub trait ReadabilityEstimator {
    fn grade(&self, text: &str) -> Result<f64, ReadabilityError>;
}

/// Flesch–Kincaid grade level with heuristic syllable counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleschKincaid;

impl ReadabilityEstimator for FleschKincaid {
    fn grade(&self, text: &str) -> Result<f64, ReadabilityError> {
        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|w| w.chars().any(char::is_alphanumeric))
            .collect();
        if words.is_empty() {
            return Err(ReadabilityError::NoWords);
        }

        let sentences = sentence_count(text).max(1) as f64;
        let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();
        let word_total = words.len() as f64;

        let grade = SENTENCE_WEIGHT * (word_total / sentences)
            + SYLLABLE_WEIGHT * (syllables as f64 / word_total)
            - GRADE_OFFSET;
        if !grade.is_finite() {
            return Err(ReadabilityError::NonFinite { grade });
        }
        Ok((grade * 10.0).round() / 10.0)
    }
}

/// Count runs of text ended by `.`, `!` or `?` that contain at least one
/// alphanumeric character. Trailing text without a terminator counts too.
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|segment| segment.chars().any(char::is_alphanumeric))
        .count()
}

/// Vowel-group syllable estimate for a single word.
///
/// Silent trailing `e` is dropped unless the word ends in consonant + `le`
/// ("table"). Words of three letters or fewer, and words with no letters
/// (numbers), count as one syllable.
pub fn syllable_count(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.len() <= 3 {
        return 1;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    let n = letters.len();
    let ends_with_e = letters[n - 1] == 'e';
    let consonant_le = ends_with_e && letters[n - 2] == 'l' && !is_vowel(letters[n - 3]);
    if ends_with_e && !consonant_le && count > 1 {
        count -= 1;
    }

    count.max(1)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}
