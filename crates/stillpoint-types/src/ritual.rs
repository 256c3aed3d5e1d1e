//! The ritual script document model.
//!
//! A [`Ritual`] is the top-level persisted entity: an ordered list of
//! [`Section`]s, each holding an ordered list of [`Segment`]s that are
//! either spoken text or a timed silence. The document is serialized with
//! camelCase field names; that wire format is stable and must not change
//! between create/read/update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a segment contains: spoken narration or a timed pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Spoken guidance; `text` carries what to say.
    Text,
    /// A pause for reflection; never subject to audio generation.
    Silence,
}

/// The smallest unit of a ritual script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Unique segment id, stable once created.
    #[serde(default = "new_id")]
    pub id: String,

    /// Whether this segment is narration or silence.
    #[serde(rename = "type")]
    pub kind: SegmentKind,

    /// Spoken text. Required and non-empty for [`SegmentKind::Text`],
    /// absent for silence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Author-estimated duration in seconds.
    pub duration_seconds: f64,

    /// Public locator of the synthesized artifact, once one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// True rendered length in seconds, set only after successful synthesis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration_seconds: Option<f64>,
}

impl Segment {
    /// Create a text segment with a fresh id.
    pub fn text(text: impl Into<String>, duration_seconds: f64) -> Self {
        Self {
            id: new_id(),
            kind: SegmentKind::Text,
            text: Some(text.into()),
            duration_seconds,
            audio_url: None,
            actual_duration_seconds: None,
        }
    }

    /// Create a silence segment with a fresh id.
    pub fn silence(duration_seconds: f64) -> Self {
        Self {
            id: new_id(),
            kind: SegmentKind::Silence,
            text: None,
            duration_seconds,
            audio_url: None,
            actual_duration_seconds: None,
        }
    }

    /// Whether this segment qualifies for audio generation: kind is
    /// `text` and the text is non-empty.
    pub fn is_eligible(&self) -> bool {
        self.kind == SegmentKind::Text && self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Which phase of the ritual a section represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Opening and settling in.
    Intro,
    /// The main practice.
    Body,
    /// Integration and return.
    Closing,
}

/// An ordered group of segments representing one phase of the ritual.
///
/// Segment order is meaningful: it is the playback order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique section id.
    #[serde(default = "new_id")]
    pub id: String,

    /// The phase this section represents.
    #[serde(rename = "type")]
    pub kind: SectionKind,

    /// Planned duration of the whole section in seconds.
    pub duration_seconds: f64,

    /// Ordered segments.
    #[serde(default)]
    pub segments: Vec<Segment>,

    /// Locator of a stitched per-section render, if a client produced one.
    /// Carried for wire-format stability; the backend never writes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// Duration of the stitched per-section render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_duration_seconds: Option<f64>,

    /// When the stitched per-section render was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_generated_at: Option<String>,
}

impl Section {
    /// Create a section with a fresh id.
    pub fn new(kind: SectionKind, duration_seconds: f64, segments: Vec<Segment>) -> Self {
        Self {
            id: new_id(),
            kind,
            duration_seconds,
            segments,
            audio_url: None,
            audio_duration_seconds: None,
            audio_generated_at: None,
        }
    }
}

/// Emotional register of the narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Soft, nurturing, reassuring.
    Gentle,
    /// Balanced, clear, professional.
    Neutral,
    /// Motivating, direct, encouraging.
    Coach,
}

/// Speaking pace of the narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Slow,
    Medium,
    Fast,
}

/// Background soundscape tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Soundscape {
    Ocean,
    Forest,
    Rain,
    Fire,
    None,
}

/// Coarse document-level audio state.
///
/// This is a single flag distinct from the fine-grained completeness the
/// status reporter computes on demand. `Generating` means some artifacts
/// exist and a re-run is expected to produce the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioStatus {
    /// No audio generation attempted yet.
    Pending,
    /// Some, but not all, eligible segments have audio.
    Generating,
    /// Every eligible segment has audio.
    Ready,
    /// An audio run completed with nothing produced.
    Error,
}

/// The persisted meditation script document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ritual {
    /// Unique ritual id, generated at creation, immutable thereafter.
    #[serde(default = "new_id")]
    pub id: String,

    pub title: String,

    /// Free-text instructions or intention behind the ritual.
    #[serde(default)]
    pub instructions: String,

    /// Total planned duration in seconds.
    pub duration: u32,

    #[serde(default = "default_tone")]
    pub tone: Tone,

    #[serde(default = "default_pace")]
    pub pace: Pace,

    #[serde(default = "default_true")]
    pub include_silence: bool,

    #[serde(default = "default_soundscape")]
    pub soundscape: Soundscape,

    /// Ordered sections, as authored.
    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_template: bool,

    /// The intention this ritual was generated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_from: Option<String>,

    /// The voice selected for narration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,

    #[serde(default = "default_audio_status")]
    pub audio_status: AudioStatus,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Ritual {
    /// Create an empty ritual with fresh id and timestamps.
    pub fn new(title: impl Into<String>, duration: u32) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            title: title.into(),
            instructions: String::new(),
            duration,
            tone: Tone::Gentle,
            pace: Pace::Medium,
            include_silence: true,
            soundscape: Soundscape::None,
            sections: Vec::new(),
            tags: Vec::new(),
            is_template: false,
            generated_from: None,
            voice_id: None,
            audio_status: AudioStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Iterate all segments in document order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.sections.iter().flat_map(|s| s.segments.iter())
    }

    /// Count segments that qualify for audio generation.
    pub fn eligible_count(&self) -> usize {
        self.segments().filter(|s| s.is_eligible()).count()
    }

    /// Refresh the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_tone() -> Tone {
    Tone::Gentle
}

fn default_pace() -> Pace {
    Pace::Medium
}

fn default_soundscape() -> Soundscape {
    Soundscape::None
}

fn default_audio_status() -> AudioStatus {
    AudioStatus::Pending
}

fn default_true() -> bool {
    true
}
