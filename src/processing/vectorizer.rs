//! TF-IDF vectorization over a small corpus
//!
//! Documents are expected to be normalized already: terms are the
//! whitespace-separated tokens of at least [`MIN_TERM_CHARS`] characters, so
//! fragments such as `c` (from `C++`) or `5` carry no weight. Weighting
//! follows the usual smoothed scheme:
//!
//! - TF is the raw count of a term in a document
//! - IDF is `ln((1 + n) / (1 + df)) + 1` where `n` is the number of documents
//! - every row is scaled to unit L2 norm (all-zero rows stay zero)
//!
//! With the two-document corpus used for scoring, IDF only distinguishes
//! "in both documents" (weight 1.0) from "in one document" (weight ~1.405).

use crate::error::{Result, ResumeScorerError};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::collections::BTreeMap;

/// Shorter tokens are left out of the vocabulary.
pub const MIN_TERM_CHARS: usize = 2;

#[derive(Debug, Default, Clone, Copy)]
pub struct TfidfVectorizer;

/// Fitted vocabulary and the document-term weight matrix (one row per document).
#[derive(Debug, Clone)]
pub struct TermMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
    weights: Array2<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self
    }

    /// Learn the joint vocabulary of `documents` and return their weight rows.
    ///
    /// Fails with [`ResumeScorerError::EmptyVocabulary`] when no document has
    /// a single term, including documents made only of one-character tokens.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TermMatrix> {
        // Sorted vocabulary keeps column order independent of document order.
        let mut vocabulary: BTreeMap<String, usize> = documents
            .iter()
            .copied()
            .flat_map(terms_of)
            .map(|term| (term.to_string(), 0))
            .collect();

        if vocabulary.is_empty() {
            return Err(ResumeScorerError::EmptyVocabulary);
        }

        for (column, index) in vocabulary.values_mut().enumerate() {
            *index = column;
        }

        let mut counts = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
        for (row, doc) in documents.iter().enumerate() {
            for term in terms_of(doc) {
                counts[[row, vocabulary[term]]] += 1.0;
            }
        }

        let n_documents = documents.len() as f64;
        let idf = counts
            .axis_iter(Axis(1))
            .map(|column| {
                let df = column.iter().filter(|&&count| count > 0.0).count() as f64;
                ((1.0 + n_documents) / (1.0 + df)).ln() + 1.0
            })
            .collect::<Array1<f64>>();

        let mut weights = counts * &idf;
        for mut row in weights.axis_iter_mut(Axis(0)) {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }

        Ok(TermMatrix {
            vocabulary,
            idf,
            weights,
        })
    }
}

fn terms_of(document: &str) -> impl Iterator<Item = &str> {
    document
        .split_whitespace()
        .filter(|token| token.chars().nth(MIN_TERM_CHARS - 1).is_some())
}

impl TermMatrix {
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn n_documents(&self) -> usize {
        self.weights.nrows()
    }

    /// Terms in column order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }

    pub fn weight(&self, document: usize, term: &str) -> Option<f64> {
        let column = *self.vocabulary.get(term)?;
        self.weights.get([document, column]).copied()
    }

    pub fn row(&self, document: usize) -> ArrayView1<'_, f64> {
        self.weights.row(document)
    }
}

/// Cosine of the angle between two vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    a.dot(&b) / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_vocabulary_is_joint_and_sorted() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["rust tokio", "python rust"])
            .unwrap();

        assert_eq!(matrix.n_documents(), 2);
        assert_eq!(matrix.terms().collect::<Vec<_>>(), vec!["python", "rust", "tokio"]);
    }

    #[test]
    fn test_smoothed_idf_over_two_documents() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["rust tokio", "python rust"])
            .unwrap();

        assert!((matrix.idf("rust").unwrap() - 1.0).abs() < EPSILON);
        assert!((matrix.idf("tokio").unwrap() - (1.0 + 1.5f64.ln())).abs() < EPSILON);
        assert!(matrix.idf("java").is_none());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["rust rust tokio axum", "python rust"])
            .unwrap();

        for document in 0..matrix.n_documents() {
            let row = matrix.row(document);
            assert!((row.dot(&row).sqrt() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_term_counts_raise_weight() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["rust rust python", "rust python"])
            .unwrap();

        let rust = matrix.weight(0, "rust").unwrap();
        let python = matrix.weight(0, "python").unwrap();
        assert!((rust - 2.0 * python).abs() < EPSILON);
    }

    #[test]
    fn test_empty_document_gives_zero_row() {
        let matrix = TfidfVectorizer::new().fit_transform(&["", "java backend"]).unwrap();
        assert!(matrix.row(0).iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let err = TfidfVectorizer::new().fit_transform(&["", "  "]).unwrap_err();
        assert!(matches!(err, ResumeScorerError::EmptyVocabulary));
    }

    #[test]
    fn test_single_character_tokens_are_not_terms() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["c r 5 years python", "c r java 5 years"])
            .unwrap();

        assert_eq!(matrix.terms().collect::<Vec<_>>(), vec!["java", "python", "years"]);
        assert!(matrix.weight(0, "c").is_none());
    }

    #[test]
    fn test_only_single_character_tokens_is_empty_vocabulary() {
        let err = TfidfVectorizer::new().fit_transform(&["c r", "c 5"]).unwrap_err();
        assert!(matches!(err, ResumeScorerError::EmptyVocabulary));
    }

    #[test]
    fn test_cosine_similarity() {
        let a = Array1::from(vec![1.0, 0.0, 1.0]);
        let b = Array1::from(vec![2.0, 0.0, 2.0]);
        let c = Array1::from(vec![0.0, 3.0, 0.0]);
        let zero = Array1::<f64>::zeros(3);

        assert!((cosine_similarity(a.view(), b.view()) - 1.0).abs() < EPSILON);
        assert!(cosine_similarity(a.view(), c.view()).abs() < EPSILON);
        assert_eq!(cosine_similarity(a.view(), zero.view()), 0.0);
    }
}
