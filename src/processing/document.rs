//! Document structures and analysis requests

use crate::error::{Result, ResumeScorerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub source: String,
    pub document_type: DocumentType,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub word_count: usize,
    pub character_count: usize,
}

impl Document {
    pub fn new(content: String, source: String, document_type: DocumentType) -> Self {
        let word_count = content.split_whitespace().count();
        let character_count = content.chars().count();

        Self {
            content,
            source,
            document_type,
            metadata: DocumentMetadata {
                word_count,
                character_count,
            },
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "resume"),
            DocumentType::JobDescription => write!(f, "job description"),
        }
    }
}

/// Where an input document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Inline(String),
}

impl InputSource {
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Inline(_) => "<inline text>".to_string(),
        }
    }
}

/// Both inputs of one analysis, as supplied by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume: Option<InputSource>,
    pub job_description: Option<InputSource>,
}

impl AnalysisRequest {
    pub fn new(resume: Option<InputSource>, job_description: Option<InputSource>) -> Self {
        Self {
            resume,
            job_description,
        }
    }

    /// Check that both inputs were supplied before any work is done. Blank
    /// inline job text counts as missing.
    pub fn validate(&self) -> Result<()> {
        let resume_missing = self.resume.is_none();
        let job_missing = match &self.job_description {
            None => true,
            Some(InputSource::Inline(text)) => text.trim().is_empty(),
            Some(InputSource::File(_)) => false,
        };

        let missing = match (resume_missing, job_missing) {
            (false, false) => return Ok(()),
            (true, true) => "a resume and a job description are required",
            (true, false) => "a resume document is required",
            (false, true) => "a job description is required",
        };

        Err(ResumeScorerError::MissingInput(missing.to_string()))
    }
}
