//! English stop-word set

use crate::error::{Result, ResumeScorerError};
use log::info;
use std::collections::HashSet;
use std::path::Path;

/// NLTK's English stop-word list. Contraction fragments (`don`, `t`, `ll`,
/// ...) are included; whole contractions such as `don't` can never match a
/// normalized token because apostrophes are stripped first.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
    "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o",
    "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't",
    "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't",
    "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// Immutable stop-word set, built once and shared by every normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWords {
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOP_WORDS.iter().map(|&s| s.to_string()).collect(),
        }
    }

    /// Merge additional words; entries are trimmed and lowercased, blanks skipped.
    pub fn with_extra_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// English set plus a newline-separated word list; `#` starts a comment line.
    pub fn english_with_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeScorerError::Configuration(format!(
                "Failed to read stop words file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let base = Self::english().len();
        let words = Self::english()
            .with_extra_words(content.lines().filter(|line| !line.trim_start().starts_with('#')));
        info!("Loaded {} extra stop words from {}", words.len() - base, path.display());
        Ok(words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_english_list_size() {
        assert_eq!(StopWords::english().len(), 179);
    }

    #[test]
    fn test_common_words_are_stop_words() {
        let stop_words = StopWords::english();
        for word in ["the", "and", "i", "t", "don", "ourselves"] {
            assert!(stop_words.contains(word), "{} should be a stop word", word);
        }
        for word in ["rust", "python", "dont", "developer"] {
            assert!(!stop_words.contains(word), "{} should not be a stop word", word);
        }
    }

    #[test]
    fn test_extra_words_are_normalized() {
        let stop_words = StopWords::english().with_extra_words(["  Resume ", "", "CV"]);
        assert!(stop_words.contains("resume"));
        assert!(stop_words.contains("cv"));
        assert_eq!(stop_words.len(), 181);
    }

    #[test]
    fn test_extra_words_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# company boilerplate").unwrap();
        writeln!(file, "responsibilities").unwrap();
        writeln!(file, "requirements").unwrap();

        let stop_words = StopWords::english_with_file(file.path()).unwrap();
        assert!(stop_words.contains("responsibilities"));
        assert!(stop_words.contains("requirements"));
        assert!(!stop_words.contains("# company boilerplate"));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = StopWords::english_with_file(Path::new("/nonexistent/stop_words.txt")).unwrap_err();
        assert!(matches!(err, ResumeScorerError::Configuration(_)));
    }
}
