//! The core [`SynthesisBackend`] trait.
//!
//! All speech-synthesis backends implement this trait. Backends differ
//! only in their voice table, the wire call they make, the audio encoding
//! they produce, and how they derive a duration from the raw bytes.

use async_trait::async_trait;

use stillpoint_types::{BackendKind, Voice};

use crate::error::Result;

/// Audio encoding of a synthesized artifact.
///
/// The encoding-to-extension and encoding-to-content-type mappings are
/// exact and stable: artifact URLs (`/<ritual-id>/<segment-id>.<ext>`)
/// are derived from them and stored on segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    /// MPEG layer III, 44.1 kHz at 128 kbps.
    Mp3,
    /// RIFF WAV, 16-bit signed PCM, mono, 24 kHz.
    Wav,
}

impl AudioEncoding {
    /// Every supported encoding, in probe order.
    pub const ALL: [AudioEncoding; 2] = [AudioEncoding::Mp3, AudioEncoding::Wav];

    /// MIME content type for this encoding.
    pub fn content_type(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "audio/mpeg",
            AudioEncoding::Wav => "audio/wav",
        }
    }

    /// File extension for this encoding.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::Wav => "wav",
        }
    }

    /// Inverse of [`content_type`](Self::content_type).
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "audio/mpeg" => Some(AudioEncoding::Mp3),
            "audio/wav" => Some(AudioEncoding::Wav),
            _ => None,
        }
    }

    /// The encoding a given backend always produces.
    pub fn for_backend(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Elevenlabs => AudioEncoding::Mp3,
            BackendKind::Google => AudioEncoding::Wav,
        }
    }
}

/// Synthesized audio returned by a backend.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// The encoded audio bytes.
    pub audio: Vec<u8>,
    /// Wall-clock duration of the audio in seconds. Approximate for
    /// compressed encodings, exact for uncompressed ones.
    pub duration_seconds: f64,
    /// The encoding of `audio`.
    pub encoding: AudioEncoding,
}

/// A speech-synthesis backend.
///
/// Implementations map a logical voice id to their own voice identifier;
/// unknown logical ids pass through unchanged, assumed to already be a
/// backend-native id. This lets advanced users bypass the curated voice
/// list.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// True iff the backend has a usable credential configured.
    ///
    /// Callers must check this before synthesizing; a `false` here is a
    /// precondition failure, not a per-segment one.
    fn is_available(&self) -> bool;

    /// The backend's static voice catalog.
    fn voices(&self) -> Vec<Voice>;

    /// Map a logical voice id to the backend-native id, passing unknown
    /// ids through unchanged.
    fn resolve_voice_id(&self, voice_id: &str) -> String;

    /// Produce spoken audio for `text`.
    ///
    /// # Errors
    ///
    /// [`TtsError::NotConfigured`](crate::TtsError::NotConfigured) when no
    /// credential is configured; [`TtsError::SynthesisFailed`] or
    /// [`TtsError::Http`] on any upstream failure.
    ///
    /// [`TtsError::SynthesisFailed`]: crate::TtsError::SynthesisFailed
    /// [`TtsError::Http`]: crate::TtsError::Http
    async fn synthesize(&self, text: &str, voice_id: &str, speed: f64) -> Result<SynthesisResult>;
}
