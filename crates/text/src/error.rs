use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to read font file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse font '{name}': {reason}")]
    Parse { name: String, reason: String },
    #[error("Font cache lock poisoned")]
    LockPoisoned,
}
