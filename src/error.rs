use crate::constants::{MSG_INPUT_EMPTY, MSG_INPUT_NOT_FOUND, MSG_NO_PNG_FILES};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Input directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Input directory is empty: {0}")]
    Empty(PathBuf),

    #[error("No PNG files found in input directory: {0}")]
    NoImagesFound(PathBuf),

    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error compressing {path}: {message}")]
    Codec { path: PathBuf, message: String },

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl CompressionError {
    /// Wraps any failure raised while converting `path` into a per-file codec error.
    pub fn codec(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        CompressionError::Codec {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    /// The text shown on the status line when this error ends a step.
    ///
    /// Directory-level errors use the fixed messages of the desktop tool;
    /// everything else falls back to the `Display` output.
    pub fn status_message(&self) -> String {
        match self {
            CompressionError::NotFound(_) => MSG_INPUT_NOT_FOUND.to_string(),
            CompressionError::Empty(_) => MSG_INPUT_EMPTY.to_string(),
            CompressionError::NoImagesFound(_) => MSG_NO_PNG_FILES.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
