//! Document storage and audio orchestration for Stillpoint.
//!
//! This crate is the heart of the backend:
//!
//! - [`RitualStore`]: file-backed persistence of ritual documents and
//!   per-segment audio artifacts
//! - [`AudioOrchestrator`]: walks a script, synthesizes audio for every
//!   eligible segment that lacks it, tolerates per-segment failure, and
//!   aggregates a run status
//! - [`StatusReporter`]: read-only audio completeness derived from
//!   artifact existence, independent of any in-document flag
//! - [`GenerationService`]: intention -> script via the LLM collaborator,
//!   with audio URLs pre-assigned
//!
//! Services are constructed once at process start with their
//! collaborators injected; nothing here is a global.

pub mod audio;
pub mod error;
pub mod generation;
pub mod status;
pub mod store;

pub use audio::AudioOrchestrator;
pub use error::{CoreError, Result};
pub use generation::GenerationService;
pub use status::StatusReporter;
pub use store::RitualStore;
