//! Loader error types
//!
//! Everything that can go wrong between a file selection and a settled
//! data URL. Failures are surfaced through the holder (see
//! [`LoadState::Failed`](crate::loader::LoadState)) instead of being
//! silently dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading an image
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Reading the source failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exceeds the configured size limit
    #[error("File too large: {len} bytes (limit {max})")]
    TooLarge { len: usize, max: usize },

    /// The bytes are not a recognized image format
    #[error("Unrecognized image format")]
    UnrecognizedFormat,

    /// The image is recognized but does not decode (corrupt or truncated)
    #[error("Image decode error: {0}")]
    Decode(String),
}

impl LoaderError {
    /// The cloneable classification of this error, as carried by the
    /// holder's failure state and events
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoaderError::Io(_) => LoadErrorKind::Io,
            LoaderError::TooLarge { .. } => LoadErrorKind::TooLarge,
            LoaderError::UnrecognizedFormat => LoadErrorKind::UnrecognizedFormat,
            LoaderError::Decode(_) => LoadErrorKind::Decode,
        }
    }
}

impl From<image::ImageError> for LoaderError {
    fn from(err: image::ImageError) -> Self {
        LoaderError::Decode(err.to_string())
    }
}

/// Classification of a load failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    Io,
    TooLarge,
    UnrecognizedFormat,
    Decode,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorKind::Io => write!(f, "io"),
            LoadErrorKind::TooLarge => write!(f, "too_large"),
            LoadErrorKind::UnrecognizedFormat => write!(f, "unrecognized_format"),
            LoadErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Result type alias for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoaderError::TooLarge { len: 2048, max: 1024 };
        assert_eq!(err.to_string(), "File too large: 2048 bytes (limit 1024)");

        let err = LoaderError::UnrecognizedFormat;
        assert_eq!(err.to_string(), "Unrecognized image format");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LoaderError = io_err.into();
        assert!(matches!(err, LoaderError::Io(_)));
        assert_eq!(err.kind(), LoadErrorKind::Io);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            LoaderError::TooLarge { len: 1, max: 0 }.kind(),
            LoadErrorKind::TooLarge
        );
        assert_eq!(
            LoaderError::Decode("bad".into()).kind(),
            LoadErrorKind::Decode
        );
        assert_eq!(LoadErrorKind::TooLarge.to_string(), "too_large");
    }
}
