use std::env;

use crate::gemini;
use crate::parse::{self, PredictionResult};
use crate::teams::Team;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-04-17";

/// Fixed diagnostic for the no-credential short-circuit.
pub const CREDENTIAL_MISSING: &str = "API key not configured. Set GEMINI_API_KEY.";

#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl PredictConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let model = env::var("GEMINI_MODEL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        Self { api_key, model }
    }
}

/// One prediction attempt. Precondition: `home.id != away.id` (the selector
/// refuses identical sides before a request is ever built).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRequest {
    pub home: Team,
    pub away: Team,
}

/// Runs a single prediction attempt end to end: prompt, one provider call,
/// parse. Blocking; call it from the provider thread. Never fails outright —
/// credential and transport problems come back as the hard-failure result
/// shape so the caller's handling stays uniform.
pub fn request_prediction(cfg: &PredictConfig, request: &MatchRequest) -> PredictionResult {
    let Some(api_key) = cfg.api_key.as_deref() else {
        return PredictionResult::failure(CREDENTIAL_MISSING);
    };

    let prompt = build_prompt(request);
    match gemini::generate_grounded(api_key, &cfg.model, &prompt) {
        Ok(reply) => parse::parse_prediction(&reply.text, &reply.grounding),
        Err(err) => PredictionResult::failure(format!(
            "Failed to get prediction from AI model. Details: {err:#}"
        )),
    }
}

pub fn build_prompt(request: &MatchRequest) -> String {
    format!(
        "You are an expert AFL (Australian Football League) analyst. For the upcoming AFL match between {home} and {away}:\n\
         \n\
         1.  **Predicted Winner:** State the team you predict to win.\n\
         2.  **Justification:** Provide a detailed justification for your prediction (around 150-200 words). Consider factors like recent form (last 3-5 games), head-to-head record (last 2-3 encounters), key player matchups, significant injuries or player returns, and general team strengths or weaknesses.\n\
         3.  **Key Stats:** List 3-4 key statistics that specifically support your prediction. For each statistic, briefly explain its relevance to this matchup. Examples: Contested Possessions, Inside 50s, Clearance differential, Scoring accuracy, etc.\n\
         \n\
         Format your response clearly with headings for \"Predicted Winner:\", \"Justification:\", and \"Key Stats:\".\n\
         Use Google Search for the most up-to-date information regarding team form, player injuries, and recent news. Ensure grounding sources are available.\n\
         Do not include any preamble or conversational filler before \"Predicted Winner:\".",
        home = request.home.name,
        away = request.away.name,
    )
}
