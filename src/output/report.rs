//! Match report produced by one analysis

use crate::processing::scorer::KeywordGap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Cosine similarity as a percentage (0-100, two decimals)
    pub match_score: f64,

    /// Qualitative band of the score, used by the gauge
    pub band: ScoreBand,

    /// Full set of job description words absent from the resume
    pub keyword_gap: KeywordGap,

    /// Missing keywords as shown to the user (sorted, at most 10)
    pub displayed_missing_keywords: Vec<String>,

    pub resume: TextSummary,
    pub job_description: TextSummary,
    pub metadata: ReportMetadata,
}

/// One input after extraction and normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSummary {
    pub source: String,
    pub raw_text: String,
    pub normalized_text: String,
    pub token_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub vocabulary_size: usize,
    pub stop_word_count: usize,
    pub version: String,
}

/// Score bands: [0, 50) low, [50, 80) medium, [80, 100] high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::High
        } else if score >= 50.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Low => "Low",
            ScoreBand::Medium => "Medium",
            ScoreBand::High => "High",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl MatchReport {
    pub fn all_keywords_present(&self) -> bool {
        self.keyword_gap.is_empty()
    }

    /// Displayed keywords as one comma-separated line.
    pub fn missing_keywords_line(&self) -> String {
        self.displayed_missing_keywords.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(49.99), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(50.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(79.99), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::High);
    }
}
