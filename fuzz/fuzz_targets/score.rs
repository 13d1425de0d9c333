#![no_main]

use convo_score_core::{score, Turn};
use libfuzzer_sys::fuzz_target;

// Each NUL-separated chunk of valid UTF-8 is one turn.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let turns: Vec<Turn> = text.split('\0').map(Turn::new).collect();
    let result = score(&turns);

    for value in [
        result.accuracy,
        result.completeness,
        result.clarity,
        result.empathy,
        result.relevance,
        result.overall,
    ] {
        assert!((0.0..=1.0).contains(&value), "out of range: {value}");
    }
    assert!(result.title.chars().count() <= 50);
});
