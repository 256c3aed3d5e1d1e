//! LLM-backed ritual script generation.
//!
//! The text-generation collaborator: given a structured
//! [`RitualCreate`](stillpoint_types::RitualCreate) request, an
//! OpenAI-compatible chat completion produces a titled script of
//! intro/body/closing sections whose segments are spoken text or timed
//! silence. This crate owns the prompt, the wire call, and the parse of
//! the model's JSON reply into a draft [`Ritual`](stillpoint_types::Ritual).
//!
//! - [`ScriptGenerator`] trait: the seam the core services depend on
//! - [`OpenAiGenerator`]: the real implementation (reqwest)
//! - [`GeneratorConfig`]: endpoint, credential env var, model

pub mod error;
pub mod generator;
pub mod prompt;
pub mod types;

pub use error::{GeneratorError, Result};
pub use generator::{GeneratorConfig, OpenAiGenerator, ScriptGenerator};
