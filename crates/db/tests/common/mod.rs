// Shared fixtures for the store tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use convo_score_db::{MemoryStore, NewMessage};

/// A store whose clock advances one second per call, starting 2026-02-05 12:00 UTC.
#[allow(dead_code)]
pub fn ticking_store() -> MemoryStore {
    let ticks = Arc::new(AtomicI64::new(0));
    MemoryStore::with_clock(move || {
        let n = ticks.fetch_add(1, Ordering::Relaxed);
        base_time() + chrono::Duration::seconds(n)
    })
}

/// A store whose clock never moves.
#[allow(dead_code)]
pub fn frozen_store() -> MemoryStore {
    MemoryStore::with_clock(base_time)
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 5, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn messages(texts: &[&str]) -> Vec<NewMessage> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let sender = if i % 2 == 0 { "user" } else { "agent" };
            NewMessage::new(sender, *text)
        })
        .collect()
}
