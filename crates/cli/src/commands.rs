// crates/cli/src/commands.rs
//! Subcommand bodies. Each returns the text to print on stdout.

use std::path::Path;

use anyhow::{Context, Result};
use convo_score_core::{score, Scorer, Turn};
use convo_score_db::{run_daily_analysis, MemoryStore, ReportSource};
use tracing::{info, warn};

use crate::config::OutputFormat;
use crate::input::{discover_conversation_files, read_conversation};
use crate::output::{render_batch, render_result, BatchReport};

pub fn run_score(path: &Path, format: OutputFormat) -> Result<String> {
    let messages = read_conversation(path)?;
    let turns: Vec<Turn> = messages.into_iter().map(|m| Turn::new(m.text)).collect();
    let result = score(&turns);
    info!(
        path = %path.display(),
        turns = turns.len(),
        overall = result.overall,
        "Scored conversation"
    );
    render_result(&result, format).context("Failed to render result")
}

pub fn run_batch(dir: &Path, format: OutputFormat) -> Result<String> {
    let files = discover_conversation_files(dir)?;
    let store = MemoryStore::new();
    let mut skipped = 0;

    for path in &files {
        match read_conversation(path) {
            Ok(messages) => {
                store
                    .insert_conversation(messages)
                    .with_context(|| format!("Failed to store {}", path.display()))?;
            }
            Err(e) => {
                skipped += 1;
                warn!(path = %path.display(), error = %e, "Skipping conversation file");
            }
        }
    }
    info!(
        dir = %dir.display(),
        files = files.len(),
        skipped,
        "Loaded conversation files"
    );

    let summary = run_daily_analysis(&store, &Scorer::standard())
        .context("Batch analysis failed")?;
    let reports = store.list_reports().context("Failed to list reports")?;
    let report = BatchReport {
        summary,
        skipped,
        reports: &reports,
    };
    render_batch(&report, format).context("Failed to render reports")
}
