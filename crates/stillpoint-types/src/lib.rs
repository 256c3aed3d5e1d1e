//! # stillpoint-types
//!
//! Core type definitions for the Stillpoint meditation backend.
//!
//! This crate is the foundation of the dependency graph -- all other
//! stillpoint crates depend on it. It contains:
//!
//! - **[`ritual`]** -- The persisted script document model ([`Ritual`],
//!   [`Section`], [`Segment`]) and its closed enums
//! - **[`voice`]** -- The [`Voice`] catalog entry type
//! - **[`backend`]** -- The closed [`BackendKind`] synthesis-backend selector
//! - **[`api`]** -- Wire request/response types shared by the HTTP layer
//!
//! All externally visible field names use the stable camelCase convention
//! (`durationSeconds`, `includeSilence`, ...) that existing clients rely on.

pub mod api;
pub mod backend;
pub mod ritual;
pub mod voice;

pub use api::{
    AudioStatusReport, CompletionStatus, RitualAudioRequest, RitualAudioReport, RitualCreate,
    RitualResponse, RunStatus, SynthesizeRequest, SynthesizeResponse,
};
pub use backend::{BackendKind, UnknownBackend};
pub use ritual::{AudioStatus, Pace, Ritual, Section, SectionKind, Segment, SegmentKind, Soundscape, Tone};
pub use voice::Voice;
