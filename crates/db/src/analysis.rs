// crates/db/src/analysis.rs
//! Drivers that run the scoring engine against a store.

use std::time::Instant;

use convo_score_core::{PolarityEstimator, ReadabilityEstimator, Scorer};
use serde::Serialize;
use tracing::{info, warn};

use crate::{AnalysisRow, AnalysisSink, ConversationId, ConversationSource, DbResult};

/// Outcome of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub analyzed: usize,
    pub failed: usize,
}

/// Score one conversation and store the result, replacing any previous one.
pub fn analyze_conversation<S, P, R>(
    store: &S,
    scorer: &Scorer<P, R>,
    id: ConversationId,
) -> DbResult<AnalysisRow>
where
    S: ConversationSource + AnalysisSink + ?Sized,
    P: PolarityEstimator,
    R: ReadabilityEstimator,
{
    let turns = store.conversation_turns(id)?;
    let result = scorer.score(&turns);
    store.upsert_analysis(id, result)
}

/// Analyze every conversation that has no analysis yet.
///
/// A failure on one conversation is logged and counted; the run continues.
/// Running it again right away analyzes nothing.
pub fn run_daily_analysis<S, P, R>(store: &S, scorer: &Scorer<P, R>) -> DbResult<BatchSummary>
where
    S: ConversationSource + AnalysisSink + ?Sized,
    P: PolarityEstimator,
    R: ReadabilityEstimator,
{
    let start = Instant::now();
    let pending = store.pending_conversation_ids()?;
    let mut summary = BatchSummary::default();

    for id in pending {
        match analyze_conversation(store, scorer, id) {
            Ok(row) => {
                summary.analyzed += 1;
                tracing::debug!(
                    conversation_id = id,
                    overall = row.result.overall,
                    "Analyzed conversation"
                );
            }
            Err(e) => {
                summary.failed += 1;
                warn!(conversation_id = id, error = %e, "Failed to analyze conversation");
            }
        }
    }

    info!(
        analyzed = summary.analyzed,
        failed = summary.failed,
        duration_ms = start.elapsed().as_millis() as u64,
        "Batch analysis complete"
    );
    Ok(summary)
}
