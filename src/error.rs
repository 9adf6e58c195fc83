//! Error handling for the resume scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Raised by the vectorizer when no document contributes a term.
    /// The scorer turns this into a zero score; it never reaches the user.
    #[error("Empty vocabulary: documents contain no terms after normalization")]
    EmptyVocabulary,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeScorerError>;

impl From<pdf_extract::OutputError> for ResumeScorerError {
    fn from(err: pdf_extract::OutputError) -> Self {
        ResumeScorerError::PdfExtraction(format!("{:?}", err))
    }
}
