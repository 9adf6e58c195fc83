//! Analysis engine: validation, normalization and scoring for one request

use crate::config::Config;
use crate::error::{Result, ResumeScorerError};
use crate::input::InputManager;
use crate::output::report::{MatchReport, ReportMetadata, ScoreBand, TextSummary};
use crate::processing::document::{AnalysisRequest, Document, DocumentType, InputSource};
use crate::processing::normalizer::{tokens, Normalizer};
use crate::processing::scorer::Scorer;
use crate::processing::stop_words::StopWords;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

/// Runs the extract, normalize and score pipeline. Holds only immutable
/// configuration, so one engine can serve any number of independent requests.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    normalizer: Normalizer,
    scorer: Scorer,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(Arc::new(StopWords::english()))
    }
}

impl AnalysisEngine {
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        Self {
            normalizer: Normalizer::new(stop_words),
            scorer: Scorer::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let stop_words = match &config.processing.extra_stop_words_file {
            Some(path) => StopWords::english_with_file(path)?,
            None => StopWords::english(),
        };
        debug!("Using {} stop words", stop_words.len());
        Ok(Self::new(Arc::new(stop_words)))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Validate the request, load both documents and score them.
    pub async fn run(&self, request: &AnalysisRequest, input_manager: &InputManager) -> Result<MatchReport> {
        request.validate()?;

        let (Some(resume_source), Some(job_source)) = (&request.resume, &request.job_description) else {
            return Err(ResumeScorerError::MissingInput(
                "a resume and a job description are required".to_string(),
            ));
        };

        let resume = load_document(resume_source, DocumentType::Resume, input_manager).await?;
        let job = load_document(job_source, DocumentType::JobDescription, input_manager).await?;

        if job.is_blank() {
            return Err(ResumeScorerError::MissingInput(format!(
                "the job description in {} is empty",
                job.source
            )));
        }

        self.analyze(&resume, &job)
    }

    /// Score two loaded documents. An empty resume is valid and scores 0.
    pub fn analyze(&self, resume: &Document, job: &Document) -> Result<MatchReport> {
        let started = Instant::now();

        let normalized_resume = self.normalizer.normalize(&resume.content);
        let normalized_job = self.normalizer.normalize(&job.content);
        debug!(
            "Normalized resume to {} tokens, job description to {} tokens",
            tokens(&normalized_resume).count(),
            tokens(&normalized_job).count()
        );

        let outcome = self.scorer.score(&normalized_resume, &normalized_job)?;
        info!(
            "Match score {:.2}% with {} missing keywords",
            outcome.match_score,
            outcome.keyword_gap.len()
        );

        let displayed_missing_keywords = outcome
            .keyword_gap
            .displayed()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(MatchReport {
            match_score: outcome.match_score,
            band: ScoreBand::from_score(outcome.match_score),
            keyword_gap: outcome.keyword_gap,
            displayed_missing_keywords,
            resume: summarize(resume, normalized_resume),
            job_description: summarize(job, normalized_job),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms: started.elapsed().as_millis() as u64,
                vocabulary_size: outcome.vocabulary_size,
                stop_word_count: self.normalizer.stop_words().len(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }
}

async fn load_document(
    source: &InputSource,
    document_type: DocumentType,
    input_manager: &InputManager,
) -> Result<Document> {
    let content = match source {
        InputSource::File(path) => input_manager.extract_text(path).await?,
        InputSource::Inline(text) => text.clone(),
    };

    let document = Document::new(content, source.label(), document_type);
    if document.is_blank() {
        info!("No extractable text in {} ({})", document_type, document.source);
    }
    Ok(document)
}

fn summarize(document: &Document, normalized_text: String) -> TextSummary {
    TextSummary {
        source: document.source.clone(),
        raw_text: document.content.clone(),
        token_count: tokens(&normalized_text).count(),
        normalized_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(text: &str) -> Document {
        Document::new(text.to_string(), "resume.txt".to_string(), DocumentType::Resume)
    }

    fn job(text: &str) -> Document {
        Document::new(text.to_string(), "job.txt".to_string(), DocumentType::JobDescription)
    }

    #[test]
    fn test_analyze_partial_match() {
        let engine = AnalysisEngine::default();
        let report = engine
            .analyze(
                &resume("Python developer with Machine Learning experience."),
                &job("We need a Python developer for data science, machine learning and cloud work."),
            )
            .unwrap();

        assert!(report.match_score > 0.0 && report.match_score < 100.0);
        assert!(report.displayed_missing_keywords.contains(&"cloud".to_string()));
        assert!(!report.displayed_missing_keywords.contains(&"python".to_string()));
        assert!(!report.all_keywords_present());
        assert_eq!(report.band, ScoreBand::from_score(report.match_score));
    }

    #[test]
    fn test_identical_documents() {
        let engine = AnalysisEngine::default();
        let text = "Senior Rust engineer: async services, Tokio, PostgreSQL.";
        let report = engine.analyze(&resume(text), &job(text)).unwrap();

        assert_eq!(report.match_score, 100.0);
        assert_eq!(report.band, ScoreBand::High);
        assert!(report.all_keywords_present());
        assert_eq!(report.missing_keywords_line(), "");
    }

    #[test]
    fn test_stop_word_only_resume_scores_zero() {
        let engine = AnalysisEngine::default();
        let report = engine
            .analyze(&resume("The and of it is."), &job("Java backend"))
            .unwrap();

        assert_eq!(report.match_score, 0.0);
        assert_eq!(report.band, ScoreBand::Low);
        assert_eq!(report.resume.normalized_text, "");
        assert_eq!(report.missing_keywords_line(), "backend, java");
        assert_eq!(report.metadata.vocabulary_size, 0);
    }

    #[test]
    fn test_report_keeps_raw_text() {
        let engine = AnalysisEngine::default();
        let report = engine
            .analyze(&resume("Rust, Go & C++!"), &job("Go developer"))
            .unwrap();

        assert_eq!(report.resume.raw_text, "Rust, Go & C++!");
        assert_eq!(report.resume.normalized_text, "rust go c");
        assert_eq!(report.resume.token_count, 3);
        assert_eq!(report.job_description.source, "job.txt");
    }

    #[test]
    fn test_extra_stop_words_change_the_gap() {
        let engine = AnalysisEngine::new(Arc::new(StopWords::english().with_extra_words(["requirements"])));
        let report = engine
            .analyze(&resume("rust"), &job("Requirements: rust, kafka"))
            .unwrap();

        assert_eq!(report.displayed_missing_keywords, vec!["kafka".to_string()]);
    }

    #[tokio::test]
    async fn test_run_rejects_missing_input_before_reading_files() {
        let engine = AnalysisEngine::default();
        let request = AnalysisRequest::new(
            Some(InputSource::File("does/not/exist.pdf".into())),
            None,
        );

        let err = engine.run(&request, &InputManager::new()).await.unwrap_err();
        assert!(matches!(err, ResumeScorerError::MissingInput(_)));
    }

    #[tokio::test]
    async fn test_run_with_inline_inputs() {
        let engine = AnalysisEngine::default();
        let request = AnalysisRequest::new(
            Some(InputSource::Inline("rust tokio".to_string())),
            Some(InputSource::Inline("rust tokio".to_string())),
        );

        let report = engine.run(&request, &InputManager::new()).await.unwrap();
        assert_eq!(report.match_score, 100.0);
        assert_eq!(report.resume.source, "<inline text>");
    }
}
