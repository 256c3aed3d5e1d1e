//! The closed set of synthesis backends.
//!
//! Backend selection arrives from clients as a string tag; [`BackendKind`]
//! is the typed form. Unknown tags are rejected at the boundary with
//! [`UnknownBackend`] rather than falling through to a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A synthesis backend identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// ElevenLabs text-to-speech (compressed MP3 output).
    Elevenlabs,
    /// Google Gemini text-to-speech (uncompressed WAV output).
    Google,
}

/// The requested backend name matches no known backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown synthesis backend: {0}")]
pub struct UnknownBackend(pub String);

impl BackendKind {
    /// Every known backend.
    pub const ALL: [BackendKind; 2] = [BackendKind::Elevenlabs, BackendKind::Google];

    /// The wire tag for this backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Elevenlabs => "elevenlabs",
            BackendKind::Google => "google",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elevenlabs" => Ok(BackendKind::Elevenlabs),
            "google" => Ok(BackendKind::Google),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}
