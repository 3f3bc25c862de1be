// src/assessment/types.rs
// =============================================================================
// The structured assessment returned by the model.
//
// The model is asked for exactly these five fields (see gemini.rs for the
// schema we send). We decode them strictly: a missing field or a wrong type
// is an error, not a half-empty dashboard. The contents themselves are
// trusted text; in particular `score` is shown as-is, never clamped.
// =============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// What the project does, in a few sentences
    pub summary: String,
    pub potential_issues: Vec<String>,
    pub recommendations: Vec<String>,
    /// Health score, intended range 1..=100
    pub score: f64,
    pub tech_stack_insights: Vec<String>,
}

/// Qualitative band for a score, matching the dashboard colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Healthy,
    Fair,
    AtRisk,
}

impl Assessment {
    pub fn score_band(&self) -> ScoreBand {
        if self.score > 70.0 {
            ScoreBand::Healthy
        } else if self.score > 40.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::AtRisk
        }
    }

    /// "67" for whole numbers, "67.5" otherwise
    pub fn score_label(&self) -> String {
        if self.score.fract() == 0.0 && self.score.is_finite() {
            format!("{:.0}", self.score)
        } else {
            format!("{:.1}", self.score)
        }
    }
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Healthy => "healthy",
            ScoreBand::Fair => "fair",
            ScoreBand::AtRisk => "at risk",
        }
    }
}
