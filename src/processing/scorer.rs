//! Match scoring and keyword gap analysis

use crate::error::{Result, ResumeScorerError};
use crate::processing::normalizer::tokens;
use crate::processing::vectorizer::{cosine_similarity, TfidfVectorizer};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of missing keywords shown to the user.
pub const MAX_DISPLAYED_KEYWORDS: usize = 10;

/// Job description words the resume does not contain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGap {
    missing: BTreeSet<String>,
}

impl KeywordGap {
    /// Set difference of the two normalized word sets.
    pub fn between(normalized_resume: &str, normalized_job: &str) -> Self {
        let resume_words: BTreeSet<&str> = tokens(normalized_resume).collect();
        let missing = tokens(normalized_job)
            .filter(|word| !resume_words.contains(word))
            .map(str::to_string)
            .collect();

        Self { missing }
    }

    /// Full missing set in lexicographic order.
    pub fn missing(&self) -> &BTreeSet<String> {
        &self.missing
    }

    /// First [`MAX_DISPLAYED_KEYWORDS`] missing words in lexicographic order.
    pub fn displayed(&self) -> Vec<&str> {
        self.missing
            .iter()
            .take(MAX_DISPLAYED_KEYWORDS)
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn len(&self) -> usize {
        self.missing.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// Cosine similarity as a percentage, two decimals, in [0, 100]
    pub match_score: f64,
    /// Terms in the joint vocabulary; 0 when vectorization was skipped
    pub vocabulary_size: usize,
    pub keyword_gap: KeywordGap,
}

/// Pure scoring over two normalized strings. Holds no state between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scorer {
    vectorizer: TfidfVectorizer,
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(),
        }
    }

    pub fn score(&self, normalized_resume: &str, normalized_job: &str) -> Result<ScoreOutcome> {
        let (match_score, vocabulary_size) = self.similarity(normalized_resume, normalized_job)?;

        Ok(ScoreOutcome {
            match_score,
            vocabulary_size,
            keyword_gap: KeywordGap::between(normalized_resume, normalized_job),
        })
    }

    /// Match score alone.
    pub fn match_score(&self, normalized_resume: &str, normalized_job: &str) -> Result<f64> {
        self.similarity(normalized_resume, normalized_job)
            .map(|(score, _)| score)
    }

    fn similarity(&self, normalized_resume: &str, normalized_job: &str) -> Result<(f64, usize)> {
        if normalized_resume.trim().is_empty() || normalized_job.trim().is_empty() {
            debug!("At least one document is empty after normalization; score is 0");
            return Ok((0.0, 0));
        }

        let matrix = match self.vectorizer.fit_transform(&[normalized_resume, normalized_job]) {
            Ok(matrix) => matrix,
            Err(ResumeScorerError::EmptyVocabulary) => {
                debug!("Empty vocabulary; score is 0");
                return Ok((0.0, 0));
            }
            Err(e) => return Err(e),
        };

        let cosine = cosine_similarity(matrix.row(0), matrix.row(1));
        debug!(
            "Cosine similarity {:.6} over {} terms",
            cosine,
            matrix.vocabulary_size()
        );

        Ok((to_percentage(cosine), matrix.vocabulary_size()))
    }
}

/// Scale to a percentage clamped to [0, 100] and rounded to two decimals.
fn to_percentage(cosine: f64) -> f64 {
    round_to_hundredths((cosine * 100.0).clamp(0.0, 100.0))
}

/// Rounds the exact binary value, so `0.015` (stored just below the tie)
/// becomes `0.01`.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overlap_scenario() {
        let scorer = Scorer::new();
        let resume = "python developer machine learning";
        let job = "python developer data science machine learning cloud";

        let outcome = scorer.score(resume, job).unwrap();

        assert!(outcome.match_score > 0.0 && outcome.match_score < 100.0);
        assert_eq!(
            outcome.keyword_gap.missing().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["cloud", "data", "science"]
        );
        assert_eq!(outcome.vocabulary_size, 7);
        // 4 shared terms at idf 1, 3 job-only terms at idf 1 + ln(1.5)
        let job_only = 1.0 + 1.5f64.ln();
        let expected = 4.0 / (2.0 * (4.0 + 3.0 * job_only * job_only).sqrt());
        assert!((outcome.match_score - expected * 100.0).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn test_empty_resume_scenario() {
        let scorer = Scorer::new();
        let outcome = scorer.score("", "java backend").unwrap();

        assert_eq!(outcome.match_score, 0.0);
        assert_eq!(
            outcome.keyword_gap.missing().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["backend", "java"]
        );
    }

    #[test]
    fn test_identical_texts_scenario() {
        let scorer = Scorer::new();
        let text = "rust tokio distributed systems rust";
        let outcome = scorer.score(text, text).unwrap();

        assert_eq!(outcome.match_score, 100.0);
        assert!(outcome.keyword_gap.is_empty());
    }

    #[test]
    fn test_copy_with_a_multi_character_token_scores_full() {
        let scorer = Scorer::new();
        assert_eq!(scorer.match_score("c go", "c go").unwrap(), 100.0);
    }

    #[test]
    fn test_single_character_tokens_do_not_score() {
        let scorer = Scorer::new();

        let outcome = scorer.score("c r", "c r").unwrap();
        assert_eq!(outcome.match_score, 0.0);
        assert_eq!(outcome.vocabulary_size, 0);
        assert!(outcome.keyword_gap.is_empty());
    }

    #[test]
    fn test_single_character_tokens_stay_in_keyword_gap() {
        let scorer = Scorer::new();
        let outcome = scorer.score("c r 5 years python", "c r java 5 years").unwrap();

        // Only years, python and java are weighted: cos = 1 / (1 + idf^2)
        // with idf = 1 + ln(1.5) for the one-sided terms.
        assert_eq!(outcome.match_score, 33.61);
        assert_eq!(outcome.vocabulary_size, 3);
        assert_eq!(
            outcome.keyword_gap.missing().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["java"]
        );

        let gap = KeywordGap::between("python", "c r python");
        assert_eq!(gap.missing().iter().map(String::as_str).collect::<Vec<_>>(), vec!["c", "r"]);
    }

    #[test]
    fn test_empty_job_scores_zero() {
        let scorer = Scorer::new();
        assert_eq!(scorer.match_score("rust developer", "").unwrap(), 0.0);
        assert_eq!(scorer.match_score("", "").unwrap(), 0.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let scorer = Scorer::new();
        assert_eq!(scorer.match_score("rust tokio", "java spring").unwrap(), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let scorer = Scorer::new();
        let pairs = [
            ("python developer machine learning", "python developer data science cloud"),
            ("rust rust rust async", "async go kubernetes rust"),
            ("sql", "sql sql sql postgres"),
        ];

        for (a, b) in pairs {
            assert_eq!(scorer.match_score(a, b).unwrap(), scorer.match_score(b, a).unwrap());
        }
    }

    #[test]
    fn test_missing_keywords_subset_and_disjoint() {
        let resume = "rust tokio aws docker";
        let job = "rust kubernetes aws terraform docker helm";
        let gap = KeywordGap::between(resume, job);

        let resume_words: BTreeSet<&str> = tokens(resume).collect();
        let job_words: BTreeSet<&str> = tokens(job).collect();
        for word in gap.missing() {
            assert!(job_words.contains(word.as_str()));
            assert!(!resume_words.contains(word.as_str()));
        }
        assert_eq!(gap.len(), 3);
    }

    #[test]
    fn test_displayed_keywords_truncated_and_sorted() {
        let job = "zeta alpha mu beta lambda gamma kappa delta iota epsilon theta eta nu";
        let gap = KeywordGap::between("", job);

        assert_eq!(gap.len(), 13);
        assert_eq!(
            gap.displayed(),
            vec!["alpha", "beta", "delta", "epsilon", "eta", "gamma", "iota", "kappa", "lambda", "mu"]
        );
    }

    #[test]
    fn test_score_is_bounded() {
        assert_eq!(to_percentage(1.000_000_000_1), 100.0);
        assert_eq!(to_percentage(-0.000_1), 0.0);
        assert_eq!(to_percentage(0.634_97), 63.5);
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        assert_eq!(round_to_hundredths(0.015), 0.01);
        assert_eq!(round_to_hundredths(2.675), 2.67);
        assert_eq!(round_to_hundredths(33.609_692), 33.61);
    }
}
