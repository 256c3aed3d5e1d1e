//! Wire types for the chat completion call and the model's script reply.
//!
//! The chat types mirror the OpenAI chat completion format. The draft
//! types are lenient: a field the model omits falls back to a sensible
//! default rather than failing the whole generation.

use serde::{Deserialize, Serialize};

use stillpoint_types::{SectionKind, SegmentKind};

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author ("system", "user", "assistant").
    pub role: String,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Forces the model to emit a JSON object reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// The `json_object` response format.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".into(),
        }
    }
}

/// A chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// A chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

/// The model's JSON script reply, before ids and metadata are assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftScript {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<DraftSection>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One section of the model's reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSection {
    #[serde(rename = "type", default = "default_section_kind")]
    pub kind: SectionKind,
    #[serde(default = "default_section_duration")]
    pub duration_seconds: f64,
    #[serde(default)]
    pub segments: Vec<DraftSegment>,
}

/// One segment of the model's reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSegment {
    #[serde(rename = "type", default = "default_segment_kind")]
    pub kind: SegmentKind,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_segment_duration")]
    pub duration_seconds: f64,
}

fn default_title() -> String {
    "Meditation Ritual".to_string()
}

fn default_section_kind() -> SectionKind {
    SectionKind::Body
}

fn default_section_duration() -> f64 {
    60.0
}

fn default_segment_kind() -> SegmentKind {
    SegmentKind::Text
}

fn default_segment_duration() -> f64 {
    10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_script_defaults() {
        let draft: DraftScript = serde_json::from_str("{}").unwrap();
        assert_eq!(draft.title, "Meditation Ritual");
        assert!(draft.sections.is_empty());
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn draft_section_fills_missing_fields() {
        let section: DraftSection = serde_json::from_str(
            r#"{"segments": [{"text": "Settle in.", "durationSeconds": 12}]}"#,
        )
        .unwrap();
        assert_eq!(section.kind, SectionKind::Body);
        assert_eq!(section.duration_seconds, 60.0);
        assert_eq!(section.segments.len(), 1);
        assert_eq!(section.segments[0].kind, SegmentKind::Text);
        assert_eq!(section.segments[0].duration_seconds, 12.0);
    }

    #[test]
    fn chat_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: Some(0.7),
            response_format: Some(ResponseFormat::json_object()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["response_format"]["type"], "json_object");
    }
}
