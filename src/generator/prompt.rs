//! Prompt text and request body for the `generateContent` call.

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::IDEAS_PER_GENERATION;

/// Field names the model must fill for every idea, in display order.
pub const IDEA_FIELDS: [&str; 7] = [
    "coinName",
    "ticker",
    "concept",
    "mascot",
    "emoji",
    "slogan",
    "communityVibe",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

/// Build the instruction sent to the model. `topic` is expected to be
/// validated already; a blank style is left out of the prompt.
pub fn build_prompt(topic: &str, style: Option<&str>) -> String {
    let mut prompt = format!(
        "You are a witty crypto marketer. Invent {IDEAS_PER_GENERATION} original, satirical \
         meme coin ideas about the topic \"{topic}\"."
    );

    if let Some(style) = style.map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(&format!(" The tone and aesthetic should be \"{style}\"."));
    }

    prompt.push_str(
        " For each idea give a catchy coinName, a ticker of 3 to 5 uppercase letters, \
         a one-sentence concept, a mascot description, a short emoji combination, \
         a punchy slogan and a communityVibe describing the holders. \
         Keep it funny and clearly a joke; never give financial advice.",
    );
    prompt
}

/// Declared output schema: an array of objects with the seven string fields.
pub fn response_schema() -> Value {
    let properties: serde_json::Map<String, Value> = IDEA_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": IDEA_FIELDS,
        }
    })
}

pub fn build_request(topic: &str, style: Option<&str>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: build_prompt(topic, style),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}
