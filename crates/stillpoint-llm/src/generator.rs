//! The OpenAI-compatible script generator.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use stillpoint_types::{AudioStatus, Ritual, RitualCreate, Section, Segment};

use crate::error::{GeneratorError, Result};
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, DraftScript, ResponseFormat};

/// Configuration for the script model endpoint.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Base URL for the OpenAI-compatible API.
    pub base_url: String,
    /// Environment variable that holds the API key.
    pub api_key_env: String,
    /// Model identifier to request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            model: "gpt-4o".into(),
            temperature: 0.7,
        }
    }
}

/// A collaborator that turns an intention into a ritual script.
///
/// The core services depend on this trait so tests can substitute a
/// scripted double for the real model call.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// True iff the generator has a usable credential configured.
    fn is_available(&self) -> bool;

    /// Generate a complete ritual draft from the request.
    ///
    /// The returned document has fresh ids and `pending` audio status;
    /// voice selection and audio URLs are assigned by the caller.
    async fn generate_script(&self, request: &RitualCreate) -> Result<Ritual>;
}

/// Script generator backed by an OpenAI-compatible chat completion API.
pub struct OpenAiGenerator {
    config: GeneratorConfig,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl OpenAiGenerator {
    /// Create a generator from configuration. The API key is resolved
    /// from `config.api_key_env` at request time.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: None,
        }
    }

    /// Create a generator with the default configuration.
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Create a generator with an explicit API key, bypassing the
    /// environment lookup.
    pub fn with_api_key(config: GeneratorConfig, api_key: String) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: Some(api_key),
        }
    }

    /// Resolve the API key: explicit key > environment variable.
    fn resolve_api_key(&self) -> Result<String> {
        if let Some(ref key) = self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                GeneratorError::NotConfigured(format!("set {} env var", self.config.api_key_env))
            })
    }

    fn completions_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    /// Assemble a persisted-shape ritual from the model's draft.
    fn build_ritual(draft: DraftScript, request: &RitualCreate) -> Ritual {
        let sections = draft
            .sections
            .into_iter()
            .map(|s| {
                let segments = s
                    .segments
                    .into_iter()
                    .map(|seg| Segment {
                        id: uuid::Uuid::new_v4().to_string(),
                        kind: seg.kind,
                        text: seg.text,
                        duration_seconds: seg.duration_seconds,
                        audio_url: None,
                        actual_duration_seconds: None,
                    })
                    .collect();
                Section::new(s.kind, s.duration_seconds, segments)
            })
            .collect();

        let now = Utc::now();
        Ritual {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            instructions: request.intention.clone(),
            duration: request.duration_minutes * 60,
            tone: request.tone,
            pace: stillpoint_types::Pace::Medium,
            include_silence: request.include_silence,
            soundscape: stillpoint_types::Soundscape::None,
            sections,
            tags: draft.tags,
            is_template: false,
            generated_from: Some(request.intention.clone()),
            voice_id: None,
            audio_status: AudioStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl ScriptGenerator for OpenAiGenerator {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
            || std::env::var(&self.config.api_key_env)
                .is_ok_and(|k| !k.is_empty())
    }

    async fn generate_script(&self, request: &RitualCreate) -> Result<Ritual> {
        let api_key = self.resolve_api_key()?;

        let chat = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_user_prompt(request)),
            ],
            temperature: Some(self.config.temperature),
            response_format: Some(ResponseFormat::json_object()),
        };

        debug!(
            model = %self.config.model,
            intention = %request.intention,
            "requesting ritual script"
        );

        let response = self
            .http
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&chat)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::RequestFailed(format!("HTTP {status}: {body}")));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| GeneratorError::InvalidResponse("empty choices".into()))?;

        let draft: DraftScript = serde_json::from_str(content)
            .map_err(|e| GeneratorError::InvalidResponse(format!("script is not valid JSON: {e}")))?;

        let ritual = Self::build_ritual(draft, request);
        debug!(
            ritual = %ritual.id,
            title = %ritual.title,
            sections = ritual.sections.len(),
            "ritual script generated"
        );
        Ok(ritual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillpoint_types::{SectionKind, SegmentKind, Tone};

    fn create_request() -> RitualCreate {
        serde_json::from_str(r#"{"intention": "calm before sleep", "durationMinutes": 3}"#).unwrap()
    }

    #[test]
    fn build_ritual_assigns_ids_and_metadata() {
        let draft: DraftScript = serde_json::from_str(
            r#"{
                "title": "Night Calm",
                "sections": [{
                    "type": "intro",
                    "durationSeconds": 30,
                    "segments": [
                        {"type": "text", "text": "Lie down.", "durationSeconds": 8},
                        {"type": "silence", "durationSeconds": 4}
                    ]
                }],
                "tags": ["sleep"]
            }"#,
        )
        .unwrap();

        let ritual = OpenAiGenerator::build_ritual(draft, &create_request());

        assert_eq!(ritual.title, "Night Calm");
        assert_eq!(ritual.duration, 180);
        assert_eq!(ritual.instructions, "calm before sleep");
        assert_eq!(ritual.generated_from.as_deref(), Some("calm before sleep"));
        assert_eq!(ritual.tone, Tone::Gentle);
        assert_eq!(ritual.audio_status, AudioStatus::Pending);
        assert!(ritual.voice_id.is_none());
        assert!(!ritual.id.is_empty());

        let section = &ritual.sections[0];
        assert_eq!(section.kind, SectionKind::Intro);
        assert!(!section.id.is_empty());
        assert_eq!(section.segments[0].kind, SegmentKind::Text);
        assert_eq!(section.segments[1].kind, SegmentKind::Silence);
        assert!(section.segments[0].audio_url.is_none());
        assert_ne!(section.segments[0].id, section.segments[1].id);
    }

    #[test]
    fn availability_tracks_explicit_key_and_env() {
        let config = GeneratorConfig {
            api_key_env: "STILLPOINT_TEST_OPENAI_KEY".into(),
            ..GeneratorConfig::default()
        };
        let with_key = OpenAiGenerator::with_api_key(config.clone(), "sk-test".into());
        assert!(with_key.is_available());

        temp_env::with_var("STILLPOINT_TEST_OPENAI_KEY", None::<&str>, || {
            assert!(!OpenAiGenerator::new(config.clone()).is_available());
        });
        temp_env::with_var("STILLPOINT_TEST_OPENAI_KEY", Some("sk-env"), || {
            assert!(OpenAiGenerator::new(config.clone()).is_available());
        });
    }

    #[test]
    fn default_config_targets_openai() {
        let config = GeneratorConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.model, "gpt-4o");
    }
}
