//! localrag-retrieve
//!
//! Owns the indexed corpus and keeps it aligned with a [`Vectorizer`].

use localrag_core::{Document, Error, Result, Vectorizer};

pub const DEFAULT_TOP_K: usize = 3;

pub struct Retriever<V: Vectorizer> {
    vectorizer: V,
    documents: Vec<Document>,
}

impl<V: Vectorizer> Retriever<V> {
    pub fn new(vectorizer: V) -> Self {
        Self { vectorizer, documents: Vec::new() }
    }

    /// Replace the corpus with `chunks`, one document per chunk in order.
    ///
    /// The vectorizer is fitted before the new documents are installed, so a
    /// failed fit leaves the previous corpus in place.
    pub fn index<S: AsRef<str>>(&mut self, chunks: &[S]) -> Result<()> {
        let documents: Vec<Document> =
            chunks.iter().enumerate().map(|(i, c)| Document::from_chunk(i, c.as_ref())).collect();
        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        self.vectorizer.fit(&texts)?;
        tracing::debug!(documents = documents.len(), "indexed corpus");
        self.documents = documents;
        Ok(())
    }

    /// Up to `k` documents, best match first. An empty corpus never reaches the vectorizer.
    ///
    /// A position outside the corpus is an error, never dropped.
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<&Document>> {
        if self.documents.is_empty() {
            return Ok(Vec::new());
        }
        let texts: Vec<&str> = self.documents.iter().map(|d| d.content.as_str()).collect();
        let positions = self.vectorizer.top_k(query, &texts, k)?;
        tracing::debug!(query, k, hits = positions.len(), "retrieved");
        positions
            .into_iter()
            .map(|position| {
                self.documents.get(position).ok_or(Error::PositionOutOfRange { position, len: self.documents.len() })
            })
            .collect()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vectorizer(&self) -> &V {
        &self.vectorizer
    }
}
