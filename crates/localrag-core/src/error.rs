use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Index not ready: fit must be called before querying")]
    NotReady,

    #[error("Corpus mismatch: index fitted on {fitted} texts, queried with {given}")]
    CorpusMismatch { fitted: usize, given: usize },

    #[error("Position out of range: vectorizer returned {position} for a corpus of {len}")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
