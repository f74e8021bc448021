//! Domain types shared by the index and the retriever.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Meta = BTreeMap<String, usize>;

/// Metadata key holding a document's position in the chunk sequence.
pub const CHUNK_ID_KEY: &str = "chunk_id";

/// A chunk wrapped with positional metadata.
///
/// - `content`: the trimmed chunk text
/// - `metadata`: carries `chunk_id`, the zero-based position of the chunk
///   in the sequence it was indexed from
///
/// Documents are created by the retriever and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: Meta,
}

impl Document {
    pub fn from_chunk(chunk_id: usize, content: impl Into<String>) -> Self {
        let mut metadata = Meta::new();
        metadata.insert(CHUNK_ID_KEY.to_string(), chunk_id);
        Self { content: content.into(), metadata }
    }

    pub fn chunk_id(&self) -> Option<usize> {
        self.metadata.get(CHUNK_ID_KEY).copied()
    }
}
