//! localrag-text
//!
//! Lexical term weighting. `analyzer` turns raw text into index terms with a
//! tantivy tokenizer chain; `tfidf` fits and queries the TF-IDF model.
pub mod analyzer;
pub mod tfidf;

pub use analyzer::TermAnalyzer;
pub use tfidf::{TfidfOptions, TfidfVectorizer};
