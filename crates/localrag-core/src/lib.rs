#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod chunker;
pub mod config;
pub mod error;
pub mod loader;
pub mod traits;
pub mod types;

pub use chunker::{split_text_into_chunks, Chunker, Window};
pub use error::{Error, Result};
pub use traits::Vectorizer;
pub use types::{Document, Meta, CHUNK_ID_KEY};
