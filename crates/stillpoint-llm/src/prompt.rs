//! Prompts for the ritual script model.

use stillpoint_types::RitualCreate;

/// System prompt instructing the model to design meditation rituals and
/// reply with JSON only.
pub const SYSTEM_PROMPT: &str = r#"You are a meditation ritual designer. Create personalized meditation rituals based on user intentions.

Output Format: Respond with valid JSON only. No markdown, no explanation.

Structure your ritual with 3 sections:
1. "intro" - Opening and settling in (15-20% of total duration)
2. "body" - Main meditation practice (60-70% of total duration)
3. "closing" - Integration and return (15-20% of total duration)

Each section has segments that are either:
- "text": spoken guidance (with the text field containing what to say)
- "silence": pause for reflection (with durationSeconds for how long)

Example response format:
{
  "title": "Morning Energy Ritual",
  "sections": [
    {
      "type": "intro",
      "durationSeconds": 60,
      "segments": [
        {"type": "text", "text": "Welcome. Find a comfortable position...", "durationSeconds": 15},
        {"type": "silence", "durationSeconds": 5},
        {"type": "text", "text": "Take a deep breath in...", "durationSeconds": 10}
      ]
    }
  ],
  "tags": ["morning", "energy", "focus"]
}

Guidelines:
- Use calming, supportive language appropriate for the tone
- For "gentle" tone: soft, nurturing, reassuring
- For "neutral" tone: balanced, clear, professional
- For "coach" tone: motivating, direct, encouraging
- Include breathing cues and body awareness
- Space out spoken segments with natural pauses
- Text segments should be 10-30 seconds when spoken aloud
- Silence segments should be 3-15 seconds for reflection"#;

/// Build the user prompt from a generation request.
pub fn build_user_prompt(request: &RitualCreate) -> String {
    let duration_seconds = request.duration_minutes * 60;

    let mut prompt = format!(
        "Create a {}-minute meditation ritual.\n\n\
         Intention: {}\n\
         Tone: {}\n\
         Include silence pauses: {}\n",
        request.duration_minutes,
        request.intention,
        serde_variant_name(request.tone),
        if request.include_silence { "Yes" } else { "Minimal" },
    );

    if !request.focus_areas.is_empty() {
        prompt.push_str(&format!("Focus areas: {}\n", request.focus_areas.join(", ")));
    }

    prompt.push_str(&format!(
        "\nTotal duration should be approximately {duration_seconds} seconds.\n\
         Distribute the time naturally across intro, body, and closing sections.\n\n\
         Remember: Output ONLY valid JSON, no other text."
    ));

    prompt
}

/// Wire tag of a tone value.
fn serde_variant_name(tone: stillpoint_types::Tone) -> &'static str {
    match tone {
        stillpoint_types::Tone::Gentle => "gentle",
        stillpoint_types::Tone::Neutral => "neutral",
        stillpoint_types::Tone::Coach => "coach",
    }
}
