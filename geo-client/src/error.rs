use std::result;

use thiserror::Error;

/// Error types for GEO client operations
#[derive(Error, Debug)]
pub enum GeoError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The E-utilities response body carried an explicit error field
    #[error("GEO API error: {message}")]
    RemoteError { message: String },

    /// Dataset not found for the given accession
    #[error("Dataset {accession} not found")]
    DatasetNotFound { accession: String },

    /// A search hit had no corresponding summary record
    #[error("Failed to retrieve details for dataset {accession}")]
    DetailUnavailable { accession: String },
}

pub type Result<T> = result::Result<T, GeoError>;
