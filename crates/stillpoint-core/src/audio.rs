//! Audio generation orchestration.
//!
//! [`AudioOrchestrator::generate_ritual_audio`] walks a script in document
//! order and synthesizes audio for every eligible text segment that does
//! not already have an artifact. One segment's failure never aborts the
//! run: the outcome of each segment is folded into counters and the run
//! ends with an aggregate status. The document is persisted exactly once,
//! after traversal.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use stillpoint_tts::{BackendRegistry, SynthesisBackend};
use stillpoint_types::{AudioStatus, BackendKind, RitualAudioReport, RunStatus, Segment};

use crate::error::{CoreError, Result};
use crate::store::RitualStore;

/// Default narration speed passed to backends.
const DEFAULT_SPEED: f64 = 1.0;

/// Orchestrates per-segment speech synthesis for a ritual.
pub struct AudioOrchestrator {
    store: Arc<RitualStore>,
    backends: Arc<BackendRegistry>,
    /// Per-ritual advisory locks so concurrent runs against the same
    /// ritual serialize instead of racing on save and double-billing
    /// synthesis.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AudioOrchestrator {
    /// Create an orchestrator over the given store and backends.
    pub fn new(store: Arc<RitualStore>, backends: Arc<BackendRegistry>) -> Self {
        Self {
            store,
            backends,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn ritual_lock(&self, ritual_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(
            locks
                .entry(ritual_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Generate audio for every eligible segment of a ritual that lacks it.
    ///
    /// Fatal failures (`RitualNotFound`, `BackendUnavailable`, a failed
    /// final save) abort the call. A per-segment synthesis or artifact
    /// write failure is recorded and the loop continues. Segments that
    /// already have an artifact are skipped untouched, so repeated calls
    /// converge instead of re-synthesizing.
    pub async fn generate_ritual_audio(
        &self,
        ritual_id: &str,
        voice_id: &str,
        backend_kind: BackendKind,
    ) -> Result<RitualAudioReport> {
        let lock = self.ritual_lock(ritual_id).await;
        let _guard = lock.lock().await;

        let mut ritual = self.store.load(ritual_id).await?;

        let backend = self.backends.get(backend_kind);
        if !backend.is_available() {
            return Err(CoreError::BackendUnavailable(backend_kind));
        }

        info!(
            ritual = %ritual_id,
            backend = %backend_kind,
            voice = %voice_id,
            "starting ritual audio generation"
        );

        let mut total = 0usize;
        let mut generated = 0usize;
        let mut skipped = 0usize;

        for section in &mut ritual.sections {
            for segment in &mut section.segments {
                if !segment.is_eligible() {
                    continue;
                }
                total += 1;

                if self.store.audio_exists(ritual_id, &segment.id).await {
                    skipped += 1;
                    continue;
                }

                match self
                    .synthesize_segment(backend.as_ref(), ritual_id, segment, voice_id)
                    .await
                {
                    Ok(()) => generated += 1,
                    Err(e) => {
                        warn!(
                            ritual = %ritual_id,
                            segment = %segment.id,
                            error = %e,
                            "segment synthesis failed, continuing"
                        );
                    }
                }
            }
        }

        let status = run_status(total, generated, skipped);

        ritual.voice_id = Some(voice_id.to_string());
        ritual.audio_status = match status {
            RunStatus::Ready => AudioStatus::Ready,
            // Some audio exists; a re-run is expected to fill the rest.
            RunStatus::Partial => AudioStatus::Generating,
            RunStatus::Error => AudioStatus::Error,
        };
        ritual.touch();
        self.store.save(&ritual).await?;

        info!(
            ritual = %ritual_id,
            generated,
            skipped,
            total,
            status = ?status,
            "ritual audio generation finished"
        );

        Ok(RitualAudioReport {
            ritual_id: ritual_id.to_string(),
            segments_generated: generated,
            segments_total: total,
            segments_skipped: skipped,
            status,
        })
    }

    /// Synthesize one segment and persist its artifact. The segment's
    /// locator and actual duration are only written once the artifact is
    /// durably stored.
    async fn synthesize_segment(
        &self,
        backend: &dyn SynthesisBackend,
        ritual_id: &str,
        segment: &mut Segment,
        voice_id: &str,
    ) -> Result<()> {
        let text = segment.text.as_deref().unwrap_or_default();
        let result = backend
            .synthesize(text, voice_id, DEFAULT_SPEED)
            .await
            .map_err(|e| CoreError::Synthesis(e.to_string()))?;

        let url = self
            .store
            .save_audio(ritual_id, &segment.id, &result.audio, result.encoding)
            .await?;

        segment.audio_url = Some(url);
        segment.actual_duration_seconds = Some(result.duration_seconds);
        Ok(())
    }
}

/// Aggregate status from the run counters.
fn run_status(total: usize, generated: usize, skipped: usize) -> RunStatus {
    let covered = generated + skipped;
    if covered == total {
        RunStatus::Ready
    } else if covered > 0 {
        RunStatus::Partial
    } else {
        RunStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_arithmetic() {
        // Trivially ready with no eligible segments.
        assert_eq!(run_status(0, 0, 0), RunStatus::Ready);
        // Fully covered, whether generated or skipped.
        assert_eq!(run_status(3, 3, 0), RunStatus::Ready);
        assert_eq!(run_status(3, 1, 2), RunStatus::Ready);
        assert_eq!(run_status(3, 0, 3), RunStatus::Ready);
        // Partially covered.
        assert_eq!(run_status(3, 2, 0), RunStatus::Partial);
        assert_eq!(run_status(3, 0, 1), RunStatus::Partial);
        // Nothing covered.
        assert_eq!(run_status(3, 0, 0), RunStatus::Error);
    }
}
