// crates/db/src/store.rs
//! In-memory conversation store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use convo_score_types::{AnalysisResult, Turn};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    AnalysisRow, AnalysisSink, ConversationId, ConversationSource, DbError, DbResult,
    ReportSource,
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A message as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(default)]
    pub sender: String,
    pub text: String,
}

impl NewMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredMessage {
    pub id: i64,
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredConversation {
    pub id: ConversationId,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<StoredMessage>,
}

impl StoredConversation {
    pub fn turns(&self) -> Vec<Turn> {
        self.messages.iter().map(|m| Turn::new(m.text.clone())).collect()
    }
}

#[derive(Default)]
struct StoreInner {
    last_conversation_id: i64,
    last_message_id: i64,
    last_analysis_id: i64,
    conversations: BTreeMap<ConversationId, StoredConversation>,
    analyses: HashMap<ConversationId, AnalysisRow>,
}

/// Thread-safe in-memory store. Ids start at 1 and only grow.
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
    clock: Clock,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Use a custom time source for `created_at` stamps.
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            clock: Arc::new(clock),
        }
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| DbError::LockPoisoned)
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| DbError::LockPoisoned)
    }

    /// Create a conversation with its messages and return its id.
    pub fn insert_conversation(&self, messages: Vec<NewMessage>) -> DbResult<ConversationId> {
        let created_at = (self.clock)();
        let mut inner = self.write()?;

        inner.last_conversation_id += 1;
        let id = inner.last_conversation_id;

        let mut stored = Vec::with_capacity(messages.len());
        for message in messages {
            inner.last_message_id += 1;
            stored.push(StoredMessage {
                id: inner.last_message_id,
                sender: message.sender,
                text: message.text,
            });
        }

        debug!(conversation_id = id, messages = stored.len(), "Inserted conversation");
        inner.conversations.insert(
            id,
            StoredConversation {
                id,
                created_at,
                messages: stored,
            },
        );
        Ok(id)
    }

    pub fn conversation(&self, id: ConversationId) -> DbResult<Option<StoredConversation>> {
        Ok(self.read()?.conversations.get(&id).cloned())
    }

    pub fn conversation_count(&self) -> DbResult<usize> {
        Ok(self.read()?.conversations.len())
    }

    pub fn get_analysis(&self, id: ConversationId) -> DbResult<Option<AnalysisRow>> {
        Ok(self.read()?.analyses.get(&id).cloned())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("MemoryStore");
        if let Ok(inner) = self.inner.read() {
            s.field("conversations", &inner.conversations.len())
                .field("analyses", &inner.analyses.len());
        }
        s.finish_non_exhaustive()
    }
}

impl ConversationSource for MemoryStore {
    fn conversation_turns(&self, id: ConversationId) -> DbResult<Vec<Turn>> {
        self.read()?
            .conversations
            .get(&id)
            .map(StoredConversation::turns)
            .ok_or(DbError::ConversationNotFound { id })
    }

    fn pending_conversation_ids(&self) -> DbResult<Vec<ConversationId>> {
        let inner = self.read()?;
        Ok(inner
            .conversations
            .keys()
            .copied()
            .filter(|id| !inner.analyses.contains_key(id))
            .collect())
    }
}

impl AnalysisSink for MemoryStore {
    fn upsert_analysis(
        &self,
        id: ConversationId,
        result: AnalysisResult,
    ) -> DbResult<AnalysisRow> {
        let now = (self.clock)();
        let mut inner = self.write()?;
        if !inner.conversations.contains_key(&id) {
            return Err(DbError::ConversationNotFound { id });
        }

        if let Some(existing) = inner.analyses.get_mut(&id) {
            existing.result = result;
            debug!(conversation_id = id, analysis_id = existing.id, "Replaced analysis");
            return Ok(existing.clone());
        }

        inner.last_analysis_id += 1;
        let row = AnalysisRow {
            id: inner.last_analysis_id,
            conversation_id: id,
            result,
            created_at: now,
        };
        debug!(conversation_id = id, analysis_id = row.id, "Created analysis");
        inner.analyses.insert(id, row.clone());
        Ok(row)
    }
}

impl ReportSource for MemoryStore {
    fn list_reports(&self) -> DbResult<Vec<AnalysisRow>> {
        let mut rows: Vec<AnalysisRow> = self.read()?.analyses.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}
