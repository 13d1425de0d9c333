// crates/cli/src/output.rs
//! Rendering of results for stdout.

use std::fmt::Write;

use convo_score_db::{AnalysisRow, BatchSummary};
use convo_score_types::AnalysisResult;
use serde::Serialize;

use crate::config::OutputFormat;

/// JSON body of a `batch` run.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub skipped: usize,
    pub reports: &'a [AnalysisRow],
}

pub fn render_result(result: &AnalysisResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&result.title);
            out.push('\n');
            write_fields(&mut out, result);
            Ok(out.trim_end().to_string())
        }
    }
}

pub fn render_batch(report: &BatchReport<'_>, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Text => {
            let mut out = format!(
                "Analyzed {} conversation(s), {} failed, {} skipped\n",
                report.summary.analyzed, report.summary.failed, report.skipped
            );
            for row in report.reports {
                let _ = writeln!(
                    out,
                    "\n#{} conversation {} at {}: {}",
                    row.id,
                    row.conversation_id,
                    row.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    row.result.title
                );
                write_fields(&mut out, &row.result);
            }
            Ok(out.trim_end().to_string())
        }
    }
}

fn write_fields(out: &mut String, r: &AnalysisResult) {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let fields: [(&str, String); 10] = [
        ("sentiment", r.sentiment.to_string()),
        ("overall", format!("{:.2}", r.overall)),
        ("accuracy", format!("{:.2}", r.accuracy)),
        ("completeness", format!("{:.2}", r.completeness)),
        ("clarity", format!("{:.2}", r.clarity)),
        ("empathy", format!("{:.2}", r.empathy)),
        ("relevance", format!("{:.2}", r.relevance)),
        ("resolution", yes_no(r.resolution).to_string()),
        ("escalation_need", yes_no(r.escalation_need).to_string()),
        ("fallback_count", r.fallback_count.to_string()),
    ];
    for (name, value) in fields {
        let _ = writeln!(out, "  {name:<16} {value}");
    }
}
