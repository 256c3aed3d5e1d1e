//! Backend registry: one shared instance per backend variant.
//!
//! The registry is constructed once at process start and handed to the
//! services that need synthesis. Dispatch is a closed match over
//! [`BackendKind`]; there is no string lookup and no way to register an
//! unknown backend.

use std::sync::Arc;

use stillpoint_types::{BackendKind, Voice};

use crate::backend::SynthesisBackend;
use crate::elevenlabs::ElevenLabsBackend;
use crate::google::GoogleBackend;

/// Holds one shared instance of every synthesis backend.
#[derive(Clone)]
pub struct BackendRegistry {
    elevenlabs: Arc<dyn SynthesisBackend>,
    google: Arc<dyn SynthesisBackend>,
}

impl BackendRegistry {
    /// Build the registry from explicit backend instances.
    pub fn new(elevenlabs: Arc<dyn SynthesisBackend>, google: Arc<dyn SynthesisBackend>) -> Self {
        Self { elevenlabs, google }
    }

    /// Build the registry with real backends configured from the
    /// environment.
    pub fn from_env() -> Self {
        Self::new(
            Arc::new(ElevenLabsBackend::from_env()),
            Arc::new(GoogleBackend::from_env()),
        )
    }

    /// Resolve a backend by kind.
    pub fn get(&self, kind: BackendKind) -> Arc<dyn SynthesisBackend> {
        match kind {
            BackendKind::Elevenlabs => Arc::clone(&self.elevenlabs),
            BackendKind::Google => Arc::clone(&self.google),
        }
    }

    /// The merged voice catalog of every backend.
    pub fn all_voices(&self) -> Vec<Voice> {
        let mut voices = Vec::new();
        for kind in BackendKind::ALL {
            voices.extend(self.get(kind).voices());
        }
        voices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> BackendRegistry {
        BackendRegistry::new(
            Arc::new(ElevenLabsBackend::with_api_key("xi")),
            Arc::new(GoogleBackend::with_api_key("goog")),
        )
    }

    #[test]
    fn get_dispatches_by_kind() {
        let registry = test_registry();
        assert_eq!(registry.get(BackendKind::Elevenlabs).kind(), BackendKind::Elevenlabs);
        assert_eq!(registry.get(BackendKind::Google).kind(), BackendKind::Google);
    }

    #[test]
    fn all_voices_merges_catalogs() {
        let registry = test_registry();
        let voices = registry.all_voices();
        assert_eq!(voices.len(), 7);
        assert!(voices.iter().any(|v| v.provider == BackendKind::Elevenlabs));
        assert!(voices.iter().any(|v| v.provider == BackendKind::Google));
    }
}
