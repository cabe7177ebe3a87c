//! Local risk heuristic
//!
//! Used when remote detection is switched off for a batch. The score of a row
//! is the sum of absolute values of its numeric fields; text and empty cells
//! carry no weight. Scores at or above the threshold are suspicious.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Row;

/// Threshold used at the default (medium) sensitivity.
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// Heuristic sensitivity chosen in Settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    pub const ALL: [Sensitivity; 3] = [Sensitivity::Low, Sensitivity::Medium, Sensitivity::High];

    /// Score at which a row becomes suspicious. Higher sensitivity flags sooner.
    pub fn threshold(self) -> f64 {
        match self {
            Sensitivity::Low => 250.0,
            Sensitivity::Medium => DEFAULT_THRESHOLD,
            Sensitivity::High => 50.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sensitivity::Low => "Low",
            Sensitivity::Medium => "Medium",
            Sensitivity::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskStatus {
    Normal,
    Suspicious,
}

impl RiskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskStatus::Normal => "Normal",
            RiskStatus::Suspicious => "Suspicious",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Review,
    Monitor,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::Review => "Review",
            Recommendation::Monitor => "Monitor",
        }
    }
}

/// Outcome of scoring one row locally
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicVerdict {
    /// Score rounded to two decimal places
    pub risk_score: f64,
    pub status: RiskStatus,
    pub severity: Severity,
    pub recommendation: Recommendation,
}

impl HeuristicVerdict {
    /// Write the four verdict fields into `row`.
    pub fn apply_to(&self, row: &mut Row) {
        row.set("risk_score", self.risk_score);
        row.set("status", self.status.as_str());
        row.set("severity", self.severity.as_str());
        row.set("recommendation", self.recommendation.as_str());
    }
}

impl fmt::Display for HeuristicVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.risk_score, self.status.as_str())
    }
}

/// Unrounded heuristic score of a row
pub fn heuristic_score(row: &Row) -> f64 {
    row.iter()
        .filter_map(|(_, value)| value.as_number())
        .map(f64::abs)
        .sum()
}

/// Score a row against `threshold`.
///
/// The comparison uses the unrounded score; only the reported value is rounded.
pub fn score_row(row: &Row, threshold: f64) -> HeuristicVerdict {
    let score = heuristic_score(row);
    if score < threshold {
        HeuristicVerdict {
            risk_score: round2(score),
            status: RiskStatus::Normal,
            severity: Severity::Low,
            recommendation: Recommendation::Monitor,
        }
    } else {
        HeuristicVerdict {
            risk_score: round2(score),
            status: RiskStatus::Suspicious,
            severity: Severity::High,
            recommendation: Recommendation::Review,
        }
    }
}

/// Whether a scored row is marked suspicious
pub fn is_suspicious(row: &Row) -> bool {
    row.get("status").and_then(|v| v.as_text()) == Some(RiskStatus::Suspicious.as_str())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
