//! Text normalization ahead of vectorization

use crate::processing::stop_words::StopWords;
use regex::Regex;
use std::sync::Arc;

/// Lowercases, strips everything but ASCII alphanumerics and whitespace,
/// drops stop words and rejoins the surviving tokens with single spaces.
///
/// The output is already in normal form: normalizing it again is a no-op.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: Arc<StopWords>,
    strip_regex: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(StopWords::english()))
    }
}

impl Normalizer {
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        // `\s` is Unicode-aware, so non-breaking spaces and the like survive
        // stripping and act as token separators.
        let strip_regex = Regex::new(r"[^a-zA-Z0-9\s]")
            .expect("Invalid strip regex");

        Self {
            stop_words,
            strip_regex,
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.strip_regex.replace_all(&lowered, "");

        stripped
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }
}

/// Tokens of an already-normalized string.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}
