//! Script generation service.
//!
//! Bridges the LLM collaborator and the store: checks the generator is
//! configured, requests a script for the intention, pre-assigns the
//! audio locator every eligible segment will eventually have (files do
//! not exist yet), records the voice selection, and persists the new
//! document.

use std::sync::Arc;

use tracing::info;

use stillpoint_llm::{GeneratorError, ScriptGenerator};
use stillpoint_tts::AudioEncoding;
use stillpoint_types::{BackendKind, Ritual, RitualCreate};

use crate::error::{CoreError, Result};
use crate::store::RitualStore;

/// Creates new rituals from user intentions.
pub struct GenerationService {
    store: Arc<RitualStore>,
    generator: Arc<dyn ScriptGenerator>,
}

impl GenerationService {
    /// Create a service over the given store and script generator.
    pub fn new(store: Arc<RitualStore>, generator: Arc<dyn ScriptGenerator>) -> Self {
        Self { store, generator }
    }

    /// Generate and persist a new ritual.
    ///
    /// Audio is NOT synthesized here; segments get their future locator
    /// assigned and the document starts with `pending` audio status.
    pub async fn generate(&self, request: &RitualCreate, provider: BackendKind) -> Result<Ritual> {
        if !self.generator.is_available() {
            return Err(CoreError::GeneratorUnavailable(
                "script model API key is not set".into(),
            ));
        }

        let mut ritual = self
            .generator
            .generate_script(request)
            .await
            .map_err(|e| match e {
                GeneratorError::NotConfigured(msg) => CoreError::GeneratorUnavailable(msg),
                other => CoreError::Generation(other.to_string()),
            })?;

        // The artifact extension is fixed by the backend that will render
        // the audio, so the locators can be assigned before any file exists.
        let encoding = AudioEncoding::for_backend(provider);
        let ritual_id = ritual.id.clone();
        let mut assigned = 0usize;
        for section in &mut ritual.sections {
            for segment in &mut section.segments {
                if segment.is_eligible() {
                    segment.audio_url =
                        Some(RitualStore::audio_url(&ritual_id, &segment.id, encoding));
                    assigned += 1;
                }
            }
        }

        ritual.voice_id = Some(request.voice_id.clone());
        self.store.save(&ritual).await?;

        info!(
            ritual = %ritual.id,
            title = %ritual.title,
            sections = ritual.sections.len(),
            audio_urls = assigned,
            "ritual generated and saved"
        );
        Ok(ritual)
    }
}
