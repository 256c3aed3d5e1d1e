//! Error types for synthesis backends.

use thiserror::Error;

/// Errors that can occur when synthesizing speech.
#[derive(Error, Debug)]
pub enum TtsError {
    /// The backend has no usable credential configured.
    ///
    /// Orchestration checks availability before attempting synthesis and
    /// surfaces this as a call-level failure, never as a per-segment one.
    #[error("backend not configured: {0}")]
    NotConfigured(String),

    /// The upstream API rejected or failed the synthesis request.
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),

    /// The upstream API returned a response that could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// An HTTP-level error from reqwest.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// PCM-to-WAV container encoding failed.
    #[error("wav encode error: {0}")]
    WavEncode(#[from] hound::Error),
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, TtsError>;
