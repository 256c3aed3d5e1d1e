//! File-backed storage for ritual documents and audio artifacts.
//!
//! Layout under the storage root:
//!
//! ```text
//! rituals/<ritual-id>.json
//! audio/<ritual-id>/<segment-id>.<ext>
//! ```
//!
//! Documents are saved whole via a temp file and an atomic rename, so a
//! concurrent reader of the same id never observes a partial write.
//! Artifact existence on disk -- not any in-document flag -- is the
//! source of truth for whether a segment has been synthesized.

use std::path::{Path, PathBuf};

use tracing::warn;

use stillpoint_tts::AudioEncoding;
use stillpoint_types::Ritual;

use crate::error::{CoreError, Result};

/// File-backed store for rituals and their audio artifacts.
pub struct RitualStore {
    root: PathBuf,
}

impl RitualStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory audio artifacts live under (served statically).
    pub fn audio_root(&self) -> PathBuf {
        self.root.join("audio")
    }

    fn rituals_dir(&self) -> PathBuf {
        self.root.join("rituals")
    }

    fn ritual_path(&self, id: &str) -> PathBuf {
        self.rituals_dir().join(format!("{id}.json"))
    }

    fn artifact_path(&self, ritual_id: &str, segment_id: &str, encoding: AudioEncoding) -> PathBuf {
        self.audio_root()
            .join(ritual_id)
            .join(format!("{segment_id}.{}", encoding.extension()))
    }

    /// The public locator for an artifact; also what gets written onto a
    /// segment once audio exists. The mapping is exact and stable.
    pub fn audio_url(ritual_id: &str, segment_id: &str, encoding: AudioEncoding) -> String {
        format!("/api/audio/{ritual_id}/{segment_id}.{}", encoding.extension())
    }

    /// Load a ritual by id.
    pub async fn load(&self, id: &str) -> Result<Ritual> {
        let path = self.ritual_path(id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::RitualNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist a ritual, overwriting any previous document.
    ///
    /// The document is written to a temp file in the same directory and
    /// renamed into place.
    pub async fn save(&self, ritual: &Ritual) -> Result<()> {
        let dir = self.rituals_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let json = serde_json::to_string_pretty(ritual)?;
        let tmp = dir.join(format!("{}.json.{}.tmp", ritual.id, uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, self.ritual_path(&ritual.id)).await?;
        Ok(())
    }

    /// List all rituals, newest first.
    ///
    /// Unreadable or invalid files are skipped with a warning.
    pub async fn list(&self) -> Result<Vec<Ritual>> {
        let dir = self.rituals_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut rituals = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_ritual(&path).await {
                Ok(ritual) => rituals.push(ritual),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping invalid ritual file");
                }
            }
        }

        rituals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rituals)
    }

    /// Delete a ritual document and every audio artifact under its id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        match tokio::fs::remove_file(self.ritual_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        match tokio::fs::remove_dir_all(self.audio_root().join(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// True iff an artifact exists for the pair under any supported
    /// encoding.
    pub async fn audio_exists(&self, ritual_id: &str, segment_id: &str) -> bool {
        for encoding in AudioEncoding::ALL {
            let path = self.artifact_path(ritual_id, segment_id, encoding);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return true;
            }
        }
        false
    }

    /// Write an audio artifact and return its public locator.
    pub async fn save_audio(
        &self,
        ritual_id: &str,
        segment_id: &str,
        audio: &[u8],
        encoding: AudioEncoding,
    ) -> Result<String> {
        let dir = self.audio_root().join(ritual_id);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(self.artifact_path(ritual_id, segment_id, encoding), audio).await?;
        Ok(Self::audio_url(ritual_id, segment_id, encoding))
    }
}

async fn read_ritual(path: &Path) -> Result<Ritual> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillpoint_types::{Section, SectionKind, Segment};

    fn temp_store() -> (RitualStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("stillpoint-test-{}", uuid::Uuid::new_v4()));
        (RitualStore::new(&dir), dir)
    }

    fn make_ritual(title: &str) -> Ritual {
        let mut ritual = Ritual::new(title, 120);
        ritual.sections.push(Section::new(
            SectionKind::Body,
            120.0,
            vec![Segment::text("Breathe.", 10.0)],
        ));
        ritual
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let (store, dir) = temp_store();
        let ritual = make_ritual("Roundtrip");
        store.save(&ritual).await.unwrap();

        let loaded = store.load(&ritual.id).await.unwrap();
        assert_eq!(loaded.id, ritual.id);
        assert_eq!(loaded.title, "Roundtrip");
        assert_eq!(loaded.sections[0].segments[0].text.as_deref(), Some("Breathe."));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn load_missing_is_not_found() {
        let (store, _dir) = temp_store();
        let err = store.load("nope").await.unwrap_err();
        assert!(matches!(err, CoreError::RitualNotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn list_sorts_newest_first_and_skips_garbage() {
        let (store, dir) = temp_store();

        let mut older = make_ritual("Older");
        older.created_at = chrono::Utc::now() - chrono::Duration::hours(1);
        let newer = make_ritual("Newer");
        store.save(&older).await.unwrap();
        store.save(&newer).await.unwrap();

        tokio::fs::write(dir.join("rituals").join("junk.json"), "not json")
            .await
            .unwrap();

        let rituals = store.list().await.unwrap();
        assert_eq!(rituals.len(), 2);
        assert_eq!(rituals[0].title, "Newer");
        assert_eq!(rituals[1].title, "Older");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn list_empty_store() {
        let (store, _dir) = temp_store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn audio_artifacts_roundtrip() {
        let (store, dir) = temp_store();

        assert!(!store.audio_exists("r1", "s1").await);

        let url = store
            .save_audio("r1", "s1", b"mp3-bytes", AudioEncoding::Mp3)
            .await
            .unwrap();
        assert_eq!(url, "/api/audio/r1/s1.mp3");
        assert!(store.audio_exists("r1", "s1").await);

        // A wav artifact counts too.
        let url = store
            .save_audio("r1", "s2", b"wav-bytes", AudioEncoding::Wav)
            .await
            .unwrap();
        assert_eq!(url, "/api/audio/r1/s2.wav");
        assert!(store.audio_exists("r1", "s2").await);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn delete_removes_document_and_artifacts() {
        let (store, dir) = temp_store();

        let ritual = make_ritual("Doomed");
        store.save(&ritual).await.unwrap();
        store
            .save_audio(&ritual.id, "s1", b"bytes", AudioEncoding::Mp3)
            .await
            .unwrap();

        store.delete(&ritual.id).await.unwrap();
        assert!(matches!(
            store.load(&ritual.id).await.unwrap_err(),
            CoreError::RitualNotFound(_)
        ));
        assert!(!store.audio_exists(&ritual.id, "s1").await);

        // Deleting again is fine.
        store.delete(&ritual.id).await.unwrap();

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn save_overwrites_whole_document() {
        let (store, dir) = temp_store();

        let mut ritual = make_ritual("First");
        store.save(&ritual).await.unwrap();
        ritual.title = "Second".into();
        store.save(&ritual).await.unwrap();

        let loaded = store.load(&ritual.id).await.unwrap();
        assert_eq!(loaded.title, "Second");
        assert_eq!(store.list().await.unwrap().len(), 1);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
