//! Batch scoring of an uploaded table
//!
//! Rows are scored strictly in order, one at a time. The scoring path is
//! chosen once for the whole batch. A failing remote call only marks its own
//! row; it never aborts the batch.

use finsec_domain::{scoring::is_suspicious, score_row, Row, Table};
use finsec_http::{DetectionClient, DetectionOutcome};

/// Status written when the detection API answers with a non-200 code
pub const API_ERROR_STATUS: &str = "API Error";
/// Status written when the detection request fails outright
pub const FAILED_STATUS: &str = "Failed";

/// How every row of a batch is scored
pub enum Scorer<'a> {
    /// One detection API call per row
    Remote(&'a dyn DetectionClient),
    /// Local heuristic against a threshold
    Local {
        /// Score at which a row becomes suspicious
        threshold: f64,
    },
}

impl Scorer<'_> {
    /// Short name used in logs and alerts
    pub fn name(&self) -> &'static str {
        match self {
            Scorer::Remote(_) => "remote",
            Scorer::Local { .. } => "local",
        }
    }
}

/// Per-outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// Rows scored
    pub total: usize,
    /// Rows the detection API answered for
    pub detected: usize,
    /// Rows marked "API Error"
    pub api_errors: usize,
    /// Rows marked "Failed"
    pub failed: usize,
    /// Rows whose status is "Suspicious"
    pub suspicious: usize,
}

/// Scored table plus its summary
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Scored rows in input order
    pub result: Table,
    /// Outcome counts
    pub summary: AnalysisSummary,
}

/// Score every row of `table`.
pub async fn analyze(table: &Table, scorer: Scorer<'_>) -> AnalysisReport {
    let mut summary = AnalysisSummary {
        total: table.len(),
        ..Default::default()
    };
    let mut scored = Vec::with_capacity(table.len());

    for (index, row) in table.rows().iter().enumerate() {
        let mut row = row.clone();
        match &scorer {
            Scorer::Remote(client) => {
                let outcome = client.detect(&row).await;
                apply_outcome(index, &mut row, outcome, &mut summary);
            }
            Scorer::Local { threshold } => {
                score_row(&row, *threshold).apply_to(&mut row);
            }
        }
        scored.push(row);
    }

    summary.suspicious = scored.iter().filter(|row| is_suspicious(row)).count();

    tracing::info!(
        scoring = scorer.name(),
        rows = summary.total,
        detected = summary.detected,
        api_errors = summary.api_errors,
        failed = summary.failed,
        suspicious = summary.suspicious,
        "analysis complete"
    );

    AnalysisReport {
        result: Table::from_rows(scored),
        summary,
    }
}

fn apply_outcome(
    index: usize,
    row: &mut Row,
    outcome: DetectionOutcome,
    summary: &mut AnalysisSummary,
) {
    match outcome {
        DetectionOutcome::Detected(fields) => {
            row.merge_json(fields);
            summary.detected += 1;
        }
        DetectionOutcome::HttpError(status) => {
            tracing::warn!(row = index, %status, "detection API rejected row");
            row.set("status", API_ERROR_STATUS);
            summary.api_errors += 1;
        }
        DetectionOutcome::TransportError(kind) => {
            tracing::warn!(row = index, kind = kind.as_str(), "detection request failed");
            row.set("status", FAILED_STATUS);
            summary.failed += 1;
        }
    }
}
