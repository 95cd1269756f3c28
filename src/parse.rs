use once_cell::sync::Lazy;
use regex::Regex;

use crate::gemini::GroundingChunk;

/// Fixed note attached when the reply carried none of the expected headings
/// and the raw text is surfaced as the justification instead.
pub const PARSE_FALLBACK_NOTE: &str =
    "Could not fully parse the prediction details. Displaying available information.";

/// A web source cited by the model's grounding metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// Fields recovered from the free-text reply. Each is independently optional;
/// `diagnostic` carries a non-fatal parse-quality note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionResult {
    pub predicted_winner: Option<String>,
    pub justification: Option<String>,
    pub key_stats: Vec<String>,
    pub diagnostic: Option<String>,
    pub citations: Vec<Citation>,
}

impl PredictionResult {
    /// Result shape for the credential-missing and transport-error paths:
    /// diagnostic only, every prediction field absent, no citations.
    pub fn failure(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: Some(diagnostic.into()),
            ..Self::default()
        }
    }

    /// A diagnostic with no recovered content at all. Anything less severe is
    /// a soft outcome: the caller renders whatever fields are present.
    pub fn is_hard_failure(&self) -> bool {
        self.diagnostic.is_some()
            && self.predicted_winner.is_none()
            && self.justification.is_none()
            && self.key_stats.is_empty()
    }
}

static WINNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*predicted winner:[ \t]*(.*)$").unwrap());
static JUSTIFICATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)justification:\s*(.*?)(?:key stats:|sources:|$)").unwrap());
static STATS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)key stats:\s*(.*?)(?:justification:|sources:|$)").unwrap());
// List items start at a line-anchored "<n>." or "-" marker.
static STAT_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*(?:\d+\.\s*|-\s*)").unwrap());

/// Splits the raw model reply into its labelled sections and filters the raw
/// grounding chunks down to usable citations. Pure and infallible: a reply
/// with no recognizable structure degrades to the raw-text-as-justification
/// fallback rather than an error.
pub fn parse_prediction(raw_text: &str, chunks: &[GroundingChunk]) -> PredictionResult {
    let mut result = PredictionResult {
        citations: normalize_citations(chunks),
        ..PredictionResult::default()
    };

    result.predicted_winner = extract_capture(&WINNER_RE, raw_text);
    result.justification = extract_capture(&JUSTIFICATION_RE, raw_text);
    result.key_stats = extract_capture(&STATS_RE, raw_text)
        .map(|block| split_stat_items(&block))
        .unwrap_or_default();

    if result.predicted_winner.is_none()
        && result.justification.is_none()
        && result.key_stats.is_empty()
    {
        let trimmed = raw_text.trim();
        if !trimmed.is_empty() {
            result.justification = Some(trimmed.to_string());
        }
        result.diagnostic = Some(PARSE_FALLBACK_NOTE.to_string());
    }

    result
}

fn extract_capture(re: &Regex, text: &str) -> Option<String> {
    let captured = re.captures(text)?.get(1)?.as_str().trim().to_string();
    if captured.is_empty() {
        None
    } else {
        Some(captured)
    }
}

fn split_stat_items(block: &str) -> Vec<String> {
    STAT_ITEM_RE
        .split(block)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_citations(chunks: &[GroundingChunk]) -> Vec<Citation> {
    let mut citations = Vec::new();
    for chunk in chunks {
        let Some(web) = &chunk.web else {
            continue;
        };
        if web.uri.is_empty() || web.title.is_empty() {
            continue;
        }
        citations.push(Citation {
            uri: web.uri.clone(),
            title: web.title.clone(),
        });
    }
    citations
}
