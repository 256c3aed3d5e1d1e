//! HTTP layer of the Stillpoint backend.
//!
//! - [`api`]: router construction, shared state, handlers, and the
//!   error-to-status mapping
//! - [`config`]: server configuration from the environment
//!
//! The `stillpoint` binary wires these to the real services; tests build
//! the same router over scripted collaborators.

pub mod api;
pub mod config;

pub use api::{ApiState, build_router};
pub use config::Config;
