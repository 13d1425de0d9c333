// crates/db/src/lib.rs
//! Storage-side collaborators of the scoring engine.
//!
//! The outer service owns real persistence; this crate defines the three
//! seams it has to provide ([`ConversationSource`], [`AnalysisSink`],
//! [`ReportSource`]), an in-memory [`MemoryStore`] implementing all of them,
//! and the drivers that run the engine against a store.

pub mod analysis;
pub mod store;

pub use analysis::{analyze_conversation, run_daily_analysis, BatchSummary};
pub use store::{MemoryStore, NewMessage, StoredConversation, StoredMessage};

use chrono::{DateTime, Utc};
use convo_score_types::{AnalysisResult, Turn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ConversationId = i64;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Conversation not found: {id}")]
    ConversationNotFound { id: ConversationId },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// A persisted analysis. At most one exists per conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub id: i64,
    pub conversation_id: ConversationId,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

/// Supplies conversation text to the engine.
pub trait ConversationSource {
    /// Turns of one conversation, in message order.
    fn conversation_turns(&self, id: ConversationId) -> DbResult<Vec<Turn>>;

    /// Conversations that have no analysis yet, ascending by id.
    fn pending_conversation_ids(&self) -> DbResult<Vec<ConversationId>>;
}

/// Accepts engine output.
pub trait AnalysisSink {
    /// Insert the analysis for a conversation, or replace the result of the
    /// existing one. A replaced row keeps its id and `created_at`.
    fn upsert_analysis(&self, id: ConversationId, result: AnalysisResult)
        -> DbResult<AnalysisRow>;
}

/// Read side for reporting.
pub trait ReportSource {
    /// All analyses, newest first (ties broken by row id, descending).
    fn list_reports(&self) -> DbResult<Vec<AnalysisRow>>;
}
