//! Read-only audio completeness reporting.
//!
//! The reporter compares the set of eligible text segments against the
//! artifacts actually on disk. It never consults the document's coarse
//! `audioStatus` flag, never mutates anything, and is safe to call
//! arbitrarily often -- including while a generation run is in flight,
//! in which case it observes whatever mixture of artifacts exists at
//! that moment.

use std::sync::Arc;

use stillpoint_types::{AudioStatusReport, CompletionStatus};

use crate::error::Result;
use crate::store::RitualStore;

/// Derives point-in-time audio completeness for a ritual.
pub struct StatusReporter {
    store: Arc<RitualStore>,
}

impl StatusReporter {
    /// Create a reporter over the given store.
    pub fn new(store: Arc<RitualStore>) -> Self {
        Self { store }
    }

    /// Count eligible segments and their existing artifacts.
    ///
    /// # Errors
    ///
    /// [`CoreError::RitualNotFound`](crate::CoreError::RitualNotFound)
    /// when no document exists under the id.
    pub async fn audio_status(&self, ritual_id: &str) -> Result<AudioStatusReport> {
        let ritual = self.store.load(ritual_id).await?;

        let mut total = 0usize;
        let mut generated = 0usize;
        for segment in ritual.segments().filter(|s| s.is_eligible()) {
            total += 1;
            if self.store.audio_exists(ritual_id, &segment.id).await {
                generated += 1;
            }
        }
        let missing = total - generated;

        let status = if generated == 0 && total > 0 {
            CompletionStatus::None
        } else if missing == 0 {
            CompletionStatus::Ready
        } else {
            CompletionStatus::Partial
        };

        Ok(AudioStatusReport {
            ritual_id: ritual_id.to_string(),
            total,
            generated,
            missing,
            status,
        })
    }
}
