//! Core error taxonomy.

use thiserror::Error;

use stillpoint_types::BackendKind;

/// Errors produced by the core services.
///
/// Per-segment synthesis failures are not represented here: the
/// orchestrator recovers from them locally and they never surface as a
/// call-level error on their own.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No ritual document exists under the given id.
    #[error("ritual not found: {0}")]
    RitualNotFound(String),

    /// The selected synthesis backend has no usable credential.
    #[error("synthesis backend not configured: {0}")]
    BackendUnavailable(BackendKind),

    /// The script generator has no usable credential.
    #[error("script generator not configured: {0}")]
    GeneratorUnavailable(String),

    /// The script generator call failed upstream.
    #[error("script generation failed: {0}")]
    Generation(String),

    /// One segment's synthesis or artifact write failed. The
    /// orchestrator recovers from this locally; it only escapes this
    /// crate for one-shot synthesis calls.
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    /// Underlying I/O error from the document store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, CoreError>;
