//! Voice catalog entry type.

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;

/// One entry in a backend's static voice catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    /// Logical voice id used in requests (e.g. "sarah").
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Descriptive label tags (e.g. "calm", "female").
    #[serde(default)]
    pub labels: Vec<String>,
    /// Which backend offers this voice.
    pub provider: BackendKind,
}
