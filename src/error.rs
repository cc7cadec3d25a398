//! Error taxonomy shared by the loader and the analyzer.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No image loaded")]
    NoImage,

    #[error("Empty region: {0}")]
    EmptyRegion(String),

    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to write {}: {message}", .path.display())]
    Export { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
