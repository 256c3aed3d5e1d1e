//! Error types for script generation.

use thiserror::Error;

/// Errors that can occur when generating a ritual script.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The generator has not been configured (missing API key).
    #[error("generator not configured: {0}")]
    NotConfigured(String),

    /// The HTTP request to the model endpoint failed.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The model returned a reply that is not a usable script.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// An HTTP-level error from reqwest.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeneratorError::NotConfigured("set OPENAI_API_KEY env var".into());
        assert_eq!(err.to_string(), "generator not configured: set OPENAI_API_KEY env var");

        let err = GeneratorError::InvalidResponse("empty choices".into());
        assert_eq!(err.to_string(), "invalid response: empty choices");
    }
}
