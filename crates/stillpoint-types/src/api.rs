//! Wire request and response types for the HTTP layer.
//!
//! Backend selectors arrive as plain strings here and are parsed into
//! [`BackendKind`](crate::backend::BackendKind) by the handlers, so an
//! unknown tag becomes a 400 with a typed error instead of a generic
//! deserialization failure.

use serde::{Deserialize, Serialize};

use crate::ritual::{Ritual, Tone};

/// Request to generate a new ritual script from an intention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualCreate {
    /// What the user wants from the session.
    pub intention: String,

    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    #[serde(default)]
    pub focus_areas: Vec<String>,

    #[serde(default = "default_tone")]
    pub tone: Tone,

    #[serde(default = "default_true")]
    pub include_silence: bool,

    #[serde(default = "default_voice")]
    pub voice_id: String,

    /// Synthesis backend tag, parsed by the handler.
    #[serde(default = "default_provider")]
    pub provider: String,
}

/// Envelope for single-ritual responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RitualResponse {
    pub ritual: Ritual,
}

/// Request for one-shot text synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    pub text: String,

    #[serde(default = "default_voice")]
    pub voice_id: String,

    #[serde(default = "default_provider")]
    pub provider: String,

    /// When set together with `segment_id`, the artifact is stored under
    /// the ritual; otherwise a temporary id is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ritual_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,

    #[serde(default = "default_speed")]
    pub speed: f64,
}

/// Response for one-shot text synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    pub audio_url: String,
    pub duration_seconds: f64,
}

/// Request to generate audio for every eligible segment of a ritual.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualAudioRequest {
    pub ritual_id: String,

    #[serde(default = "default_voice")]
    pub voice_id: String,

    #[serde(default = "default_provider")]
    pub provider: String,
}

/// Aggregate outcome of one audio-generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every eligible segment has audio (trivially so when none exist).
    Ready,
    /// Some segments have audio, some are still missing.
    Partial,
    /// Eligible segments exist but nothing was produced or found.
    Error,
}

/// Result of an audio-generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualAudioReport {
    pub ritual_id: String,
    /// Segments synthesized in this run.
    pub segments_generated: usize,
    /// Eligible text segments in the document.
    pub segments_total: usize,
    /// Segments skipped because an artifact already existed.
    pub segments_skipped: usize,
    pub status: RunStatus,
}

/// Point-in-time audio completeness, independent of any generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// No eligible segment has audio.
    None,
    /// Some, but not all, eligible segments have audio.
    Partial,
    /// Every eligible segment has audio.
    Ready,
}

/// Response of the audio-status query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStatusReport {
    pub ritual_id: String,
    pub total: usize,
    pub generated: usize,
    pub missing: usize,
    pub status: CompletionStatus,
}

fn default_duration_minutes() -> u32 {
    10
}

fn default_tone() -> Tone {
    Tone::Gentle
}

fn default_voice() -> String {
    "sarah".to_string()
}

fn default_provider() -> String {
    "elevenlabs".to_string()
}

fn default_speed() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ritual_create_defaults() {
        let req: RitualCreate = serde_json::from_str(r#"{"intention": "calm"}"#).unwrap();
        assert_eq!(req.intention, "calm");
        assert_eq!(req.duration_minutes, 10);
        assert_eq!(req.tone, Tone::Gentle);
        assert!(req.include_silence);
        assert_eq!(req.voice_id, "sarah");
        assert_eq!(req.provider, "elevenlabs");
        assert!(req.focus_areas.is_empty());
    }

    #[test]
    fn synthesize_request_wire_names() {
        let req: SynthesizeRequest = serde_json::from_str(
            r#"{"text": "Hi", "voiceId": "lily", "ritualId": "r1", "segmentId": "s1"}"#,
        )
        .unwrap();
        assert_eq!(req.voice_id, "lily");
        assert_eq!(req.ritual_id.as_deref(), Some("r1"));
        assert_eq!(req.segment_id.as_deref(), Some("s1"));
        assert_eq!(req.speed, 1.0);
    }

    #[test]
    fn audio_report_wire_names() {
        let report = RitualAudioReport {
            ritual_id: "r1".into(),
            segments_generated: 3,
            segments_total: 4,
            segments_skipped: 0,
            status: RunStatus::Partial,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["ritualId"], "r1");
        assert_eq!(json["segmentsGenerated"], 3);
        assert_eq!(json["segmentsTotal"], 4);
        assert_eq!(json["segmentsSkipped"], 0);
        assert_eq!(json["status"], "partial");
    }

    #[test]
    fn status_report_wire_names() {
        let report = AudioStatusReport {
            ritual_id: "r1".into(),
            total: 2,
            generated: 0,
            missing: 2,
            status: CompletionStatus::None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "none");
        assert_eq!(json["missing"], 2);
    }
}
