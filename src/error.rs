use thiserror::Error;

/// Error types for the geoparam-rs library.
#[derive(Error, Debug)]
pub enum GeoParamError {
    /// Parameter resolution or validation failure.
    #[error("Parameter error: {0}")]
    Parameter(#[from] crate::parameters::ParameterError),

    /// Error for boundary constraint violations.
    #[error("Bounds error: {0}")]
    Bounds(#[from] crate::parameters::BoundsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for geoparam-rs operations.
pub type Result<T> = std::result::Result<T, GeoParamError>;
