//! Google Gemini synthesis backend.
//!
//! Calls the Gemini `generateContent` endpoint with the audio response
//! modality. The API returns raw 16-bit mono 24 kHz PCM (base64-encoded
//! inline), which is wrapped into a RIFF WAV container before storage.
//! Duration is exact: `pcm_bytes / (sample_rate * bytes_per_sample)`.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use stillpoint_types::{BackendKind, Voice};

use crate::backend::{AudioEncoding, SynthesisBackend, SynthesisResult};
use crate::error::{Result, TtsError};

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.5-pro-preview-tts";

const SAMPLE_RATE_HZ: u32 = 24_000;
const BYTES_PER_SAMPLE: u32 = 2;

/// Curated voice table: logical id, native id, name, description, labels.
const VOICES: [(&str, &str, &str, &str, &[&str]); 2] = [
    (
        "aoede",
        "Aoede",
        "Aoede",
        "Warm, gentle female voice",
        &["warm", "gentle", "female"],
    ),
    (
        "charon",
        "Charon",
        "Charon",
        "Deep, grounding male voice",
        &["deep", "grounding", "male"],
    ),
];

/// Google Gemini text-to-speech backend.
pub struct GoogleBackend {
    base_url: String,
    http: reqwest::Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

impl GoogleBackend {
    /// Create a backend reading the API key from `GEMINI_API_KEY`.
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

    /// Wrap the narration text in a meditative style directive; the model
    /// reads delivery cues from the prompt itself.
    fn style_prompt(text: &str) -> String {
        format!("[meditative, slow, hushed, gentle, low pitch]\n\n\"{text}\"")
    }

    /// Exact duration of 16-bit mono PCM at the fixed sample rate.
    fn pcm_duration_seconds(pcm_len: usize) -> f64 {
        pcm_len as f64 / (SAMPLE_RATE_HZ as f64 * BYTES_PER_SAMPLE as f64)
    }

    /// Wrap raw little-endian 16-bit mono PCM into a WAV container.
    fn pcm_to_wav(pcm: &[u8]) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE_HZ,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = std::io::Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for frame in pcm.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([frame[0], frame[1]]))?;
        }
        writer.finalize()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl SynthesisBackend for GoogleBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Google
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
                provider: BackendKind::Google,
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

    async fn synthesize(&self, text: &str, voice_id: &str, _speed: f64) -> Result<SynthesisResult> {
        // The generateContent API has no speed control; pacing is steered
        // through the style prompt instead.
        let api_key = self.require_api_key()?;
        let native_voice = self.resolve_voice_id(voice_id);
        let url = format!(
            "{}/v1beta/models/{MODEL}:generateContent",
            self.base_url.trim_end_matches('/')
        );

        debug!(
            voice = %native_voice,
            chars = text.len(),
            "sending Gemini synthesis request"
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": Self::style_prompt(text) }] }],
            "generationConfig": {
                "temperature": 1,
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": native_voice }
                    }
                }
            }
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::SynthesisFailed(format!("HTTP {status}: {body}")));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| TtsError::InvalidResponse("no candidates in response".into()))?;

        let engine = base64::engine::general_purpose::STANDARD;
        let mut pcm = Vec::new();
        for part in candidate.content.parts {
            if let Some(inline) = part.inline_data {
                let chunk = engine
                    .decode(inline.data.as_bytes())
                    .map_err(|e| TtsError::InvalidResponse(format!("bad base64 audio: {e}")))?;
                pcm.extend_from_slice(&chunk);
            }
        }
        if pcm.is_empty() {
            return Err(TtsError::InvalidResponse("response carried no audio parts".into()));
        }

        let duration_seconds = Self::pcm_duration_seconds(pcm.len());
        let audio = Self::pcm_to_wav(&pcm)?;

        debug!(
            pcm_bytes = pcm.len(),
            duration_secs = duration_seconds,
            "Gemini synthesis complete"
        );

        Ok(SynthesisResult {
            audio,
            duration_seconds,
            encoding: AudioEncoding::Wav,
        })
    }
}
