/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised at the engine's boundaries.
///
/// The computation core never fails; these cover the checks callers run
/// before handing values to it (exchange rate, tax percentages, configuration)
/// and the catalog lookup collaborator.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Out-of-domain input rejected before reaching the core
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Catalog lookup failures
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors while reading documents
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn catalog(msg: impl Into<String>) -> Self {
        AppError::Catalog(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
