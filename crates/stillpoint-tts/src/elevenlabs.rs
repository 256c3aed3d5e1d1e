//! ElevenLabs synthesis backend.
//!
//! Calls the ElevenLabs text-to-speech REST API and always yields MP3 at
//! 44.1 kHz / 128 kbps. The reported duration is an approximation derived
//! from the byte length and the fixed bitrate; decoding the stream for an
//! exact figure is not worth the cost here.

use async_trait::async_trait;
use tracing::debug;

use stillpoint_types::{BackendKind, Voice};

use crate::backend::{AudioEncoding, SynthesisBackend, SynthesisResult};
use crate::error::{Result, TtsError};

const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
const MODEL_ID: &str = "eleven_multilingual_v2";
const OUTPUT_FORMAT: &str = "mp3_44100_128";

const SAMPLE_RATE_HZ: u32 = 44_100;
const BITRATE_KBPS: u32 = 128;

/// Curated voice table: logical id, native id, name, description, labels.
const VOICES: [(&str, &str, &str, &str, &[&str]); 5] = [
    (
        "sarah",
        "EXAVITQu4vr4xnSDxMaL",
        "Sarah",
        "Soft and calm American female",
        &["calm", "female", "american"],
    ),
    (
        "daniel",
        "onwK4e9ZLuTAKqWW03F9",
        "Daniel",
        "Warm British male",
        &["warm", "male", "british"],
    ),
    (
        "charlotte",
        "XB0fDUnXU5powFXDhCwa",
        "Charlotte",
        "Gentle and soothing female",
        &["gentle", "female", "soothing"],
    ),
    (
        "lily",
        "pFZP5JQG7iQjIQuC4Bku",
        "Lily",
        "Peaceful British female",
        &["peaceful", "female", "british"],
    ),
    (
        "liam",
        "TX3LPaxmHKxFdv7VOQHJ",
        "Liam",
        "Calm American male",
        &["calm", "male", "american"],
    ),
];

/// ElevenLabs text-to-speech backend.
pub struct ElevenLabsBackend {
    base_url: String,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl ElevenLabsBackend {
    /// Create a backend reading the API key from `ELEVENLABS_API_KEY`.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Create a backend with an explicit API key, bypassing the
    /// environment lookup.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
            api_key: Some(api_key.into()),
        }
    }

    /// Override the API base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| TtsError::NotConfigured(format!("set {API_KEY_ENV} env var")))
    }

    /// Approximate duration of an MP3 payload at the fixed output bitrate.
    fn mp3_duration_seconds(byte_len: usize) -> f64 {
        byte_len as f64 / (SAMPLE_RATE_HZ as f64 * BITRATE_KBPS as f64 / 8.0)
    }
}

#[async_trait]
impl SynthesisBackend for ElevenLabsBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Elevenlabs
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn voices(&self) -> Vec<Voice> {
        VOICES
            .iter()
            .map(|(id, _, name, description, labels)| Voice {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                labels: labels.iter().map(|l| l.to_string()).collect(),
                provider: BackendKind::Elevenlabs,
            })
            .collect()
    }

    fn resolve_voice_id(&self, voice_id: &str) -> String {
        let lower = voice_id.to_lowercase();
        VOICES
            .iter()
            .find(|(id, ..)| *id == lower)
            .map(|(_, native, ..)| native.to_string())
            .unwrap_or_else(|| voice_id.to_string())
    }

    async fn synthesize(&self, text: &str, voice_id: &str, speed: f64) -> Result<SynthesisResult> {
        let api_key = self.require_api_key()?;
        let native_voice = self.resolve_voice_id(voice_id);
        let url = format!(
            "{}/v1/text-to-speech/{native_voice}?output_format={OUTPUT_FORMAT}",
            self.base_url.trim_end_matches('/')
        );

        debug!(
            voice = %native_voice,
            chars = text.len(),
            "sending ElevenLabs synthesis request"
        );

        let mut body = serde_json::json!({
            "text": text,
            "model_id": MODEL_ID,
        });
        if speed != 1.0 {
            body["voice_settings"] = serde_json::json!({ "speed": speed });
        }

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::SynthesisFailed(format!("HTTP {status}: {body}")));
        }

        let audio = response.bytes().await?.to_vec();
        let duration_seconds = Self::mp3_duration_seconds(audio.len());

        debug!(
            bytes = audio.len(),
            duration_secs = duration_seconds,
            "ElevenLabs synthesis complete"
        );

        Ok(SynthesisResult {
            audio,
            duration_seconds,
            encoding: AudioEncoding::Mp3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_catalog_is_static() {
        let backend = ElevenLabsBackend::with_api_key("k");
        let voices = backend.voices();
        assert_eq!(voices.len(), 5);
        assert!(voices.iter().all(|v| v.provider == BackendKind::Elevenlabs));
        let sarah = voices.iter().find(|v| v.id == "sarah").unwrap();
        assert_eq!(sarah.name, "Sarah");
        assert!(sarah.labels.contains(&"calm".to_string()));
    }

    #[test]
    fn resolve_known_voice_is_case_insensitive() {
        let backend = ElevenLabsBackend::with_api_key("k");
        assert_eq!(backend.resolve_voice_id("sarah"), "EXAVITQu4vr4xnSDxMaL");
        assert_eq!(backend.resolve_voice_id("Sarah"), "EXAVITQu4vr4xnSDxMaL");
        assert_eq!(backend.resolve_voice_id("LILY"), "pFZP5JQG7iQjIQuC4Bku");
    }

    #[test]
    fn resolve_unknown_voice_passes_through() {
        let backend = ElevenLabsBackend::with_api_key("k");
        assert_eq!(backend.resolve_voice_id("XyzCustomVoice99"), "XyzCustomVoice99");
    }

    #[test]
    fn duration_is_byte_length_over_bitrate() {
        // One second of audio at 44.1 kHz * 128 kbps / 8 = 705 600 bytes.
        let one_second = (44_100 * 128 / 8) as usize;
        let d = ElevenLabsBackend::mp3_duration_seconds(one_second);
        assert!((d - 1.0).abs() < 1e-9);
        assert_eq!(ElevenLabsBackend::mp3_duration_seconds(0), 0.0);
    }

    #[test]
    fn availability_tracks_api_key() {
        assert!(ElevenLabsBackend::with_api_key("k").is_available());
        temp_env::with_var(API_KEY_ENV, None::<&str>, || {
            assert!(!ElevenLabsBackend::from_env().is_available());
        });
        temp_env::with_var(API_KEY_ENV, Some(""), || {
            assert!(!ElevenLabsBackend::from_env().is_available());
        });
        temp_env::with_var(API_KEY_ENV, Some("xi-key"), || {
            assert!(ElevenLabsBackend::from_env().is_available());
        });
    }
}
