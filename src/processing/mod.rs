//! Text processing and scoring module

pub mod analyzer;
pub mod document;
pub mod normalizer;
pub mod scorer;
pub mod stop_words;
pub mod vectorizer;
