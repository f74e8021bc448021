use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a whole text file. Invalid UTF-8 is decoded lossily rather than rejected.
pub fn load_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::NotFound(format!("file not found: {}", path.display())));
    }
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            tracing::debug!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned())
        }
        Err(e) => Err(e.into()),
    }
}
