// ABOUTME: Error types for the showoff slide server
// ABOUTME: Every failure aborts the whole deck build and names the offending artifact

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to fetch remote resource: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Invalid manifest {path:?}: {message}")]
    ManifestError { path: PathBuf, message: String },

    #[error("Error reading section {path:?}: {source}")]
    SectionError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading slide file {path:?}: {source}")]
    SlideFileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid slide type {slide_type:?} in slide {slide}")]
    InvalidSlideType { slide: usize, slide_type: String },

    #[error("Slide {slide} has no body: expected a newline after the slide type")]
    MalformedSegment { slide: usize },

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::ArchiveError(format!("ZIP operation failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
