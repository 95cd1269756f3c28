use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::http_client::http_client;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    tools: Vec<RequestTool>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestTool {
    // Enables search-grounded generation. Structured-output modes cannot be
    // combined with this tool, hence the free-text reply we parse downstream.
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
    #[serde(rename = "groundingMetadata", default)]
    grounding_metadata: GroundingMetadata,
}

#[derive(Debug, Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize, Default)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding metadata entry. Chunk shapes other than `web` deserialize
/// with `web: None` and are ignored by the normalizer.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// The generated reply text plus the raw grounding chunks that came with it.
#[derive(Debug, Clone)]
pub struct GenerateReply {
    pub text: String,
    pub grounding: Vec<GroundingChunk>,
}

/// Issues a single `generateContent` call with Google Search grounding
/// enabled and returns the reply text and raw citation chunks.
pub fn generate_grounded(api_key: &str, model: &str, prompt: &str) -> Result<GenerateReply> {
    let request = GenerateRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        tools: vec![RequestTool {
            google_search: serde_json::Map::new(),
        }],
    };

    let url = format!("{GEMINI_API_BASE}/{model}:generateContent?key={api_key}");
    let client = http_client()?;
    let resp = client
        .post(&url)
        .json(&request)
        .send()
        .context("gemini request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading gemini body")?;
    if !status.is_success() {
        let snippet = body
            .trim()
            .replace('\n', " ")
            .replace('\r', " ")
            .chars()
            .take(220)
            .collect::<String>();
        return Err(anyhow!("gemini http {}: {}", status, snippet));
    }

    parse_generate_reply_json(&body)
}

/// Deserializes a `generateContent` response body. The reply text is the
/// concatenation of the first candidate's part texts; a body with no
/// candidates is an error (blocked prompt or provider fault).
pub fn parse_generate_reply_json(raw: &str) -> Result<GenerateReply> {
    let parsed: GenerateResponse = serde_json::from_str(raw).context("invalid gemini json")?;
    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Err(anyhow!("gemini reply contained no candidates"));
    };

    let text = candidate
        .content
        .parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join("");

    Ok(GenerateReply {
        text,
        grounding: candidate.grounding_metadata.grounding_chunks,
    })
}
