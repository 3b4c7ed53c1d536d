use thiserror::Error;

/// Result type for overlay and dissolve operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while overlaying or dissolving features
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Feature not found: {0}")]
    MissingFeature(String),

    #[error("Grouping error: {0}")]
    Grouping(#[from] adjacency_dissolve_core::Error),
}
