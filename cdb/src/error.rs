//! Corpus database error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or reading a corpus database
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus has no chunks; refusing to write an empty database")]
    EmptyCorpus,

    #[error("Writer already finished; no further operations allowed")]
    Finished,

    #[error("Not a corpus database: {path} ({reason})")]
    Corrupt { path: PathBuf, reason: String },
}

impl CorpusError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_message_names_path_and_reason() {
        let err = CorpusError::corrupt("/tmp/web.db", "footer magic mismatch");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/web.db"));
        assert!(msg.contains("footer magic mismatch"));
    }

    #[test]
    fn test_io_error_wraps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CorpusError::from(io);
        assert!(err.to_string().contains("denied"));
    }
}
