//! Envelope parsing and schema validation of model output.

use serde::Deserialize;

use crate::error::GenerateError;
use crate::types::{IdeaDraft, IDEAS_PER_GENERATION};

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Pull the text payload out of `candidates[0].content.parts[0].text`.
pub fn extract_payload(body: &str) -> Result<String, GenerateError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GenerateError::malformed(format!("envelope is not JSON: {e}")))?;

    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| GenerateError::malformed("no candidate text in response"))
}

/// Validate the payload as exactly three seven-field idea objects.
pub fn parse_ideas(payload: &str) -> Result<Vec<IdeaDraft>, GenerateError> {
    let drafts: Vec<IdeaDraft> = serde_json::from_str(payload)
        .map_err(|e| GenerateError::malformed(format!("payload does not match schema: {e}")))?;

    if drafts.len() != IDEAS_PER_GENERATION {
        return Err(GenerateError::malformed(format!(
            "expected {IDEAS_PER_GENERATION} ideas, got {}",
            drafts.len()
        )));
    }
    Ok(drafts)
}
