//! Server configuration from environment variables.
//!
//! API credentials are resolved by the backends themselves
//! (`ELEVENLABS_API_KEY`, `GEMINI_API_KEY`, `OPENAI_API_KEY`); this
//! struct covers the server-level knobs.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind: SocketAddr,
    /// Root directory for ritual documents and audio artifacts.
    pub storage_dir: PathBuf,
    /// Allowed CORS origins; empty means permissive.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// - `STILLPOINT_BIND` -- bind address (default `127.0.0.1:8000`)
    /// - `STILLPOINT_STORAGE` -- storage root (default
    ///   `<platform data dir>/stillpoint/storage`, or `./storage`)
    /// - `STILLPOINT_CORS_ORIGINS` -- comma-separated origin list
    pub fn from_env() -> Self {
        let bind = std::env::var("STILLPOINT_BIND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bind);

        let storage_dir = std::env::var("STILLPOINT_STORAGE")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_dir);

        let cors_origins = std::env::var("STILLPOINT_CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind,
            storage_dir,
            cors_origins,
        }
    }
}

fn default_bind() -> SocketAddr {
    ([127, 0, 0, 1], 8000).into()
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("stillpoint").join("storage"))
        .unwrap_or_else(|| PathBuf::from("storage"))
}
