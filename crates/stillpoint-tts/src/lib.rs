//! Speech-synthesis backend abstraction for Stillpoint.
//!
//! This crate defines the capability contract every text-to-speech
//! provider must satisfy and ships the two real backends:
//!
//! - [`SynthesisBackend`] trait: synthesize / voice catalog / availability
//! - [`ElevenLabsBackend`]: compressed MP3 at 44.1 kHz / 128 kbps
//! - [`GoogleBackend`]: uncompressed 16-bit mono 24 kHz WAV via Gemini
//! - [`BackendRegistry`]: closed-enum dispatch over the fixed backend set
//!
//! Backends are constructed once at process start and shared; they hold no
//! global state. A backend without a usable credential reports
//! `is_available() == false` and fails synthesis with
//! [`TtsError::NotConfigured`] -- callers must treat that as a distinct
//! precondition failure, never as an ordinary synthesis error.

pub mod backend;
pub mod elevenlabs;
pub mod error;
pub mod google;
pub mod registry;

pub use backend::{AudioEncoding, SynthesisBackend, SynthesisResult};
pub use elevenlabs::ElevenLabsBackend;
pub use error::{Result, TtsError};
pub use google::GoogleBackend;
pub use registry::BackendRegistry;
