use std::fs;
use std::path::PathBuf;

use afl_predictor::gemini::{GroundingChunk, WebSource, parse_generate_reply_json};
use afl_predictor::parse::{PARSE_FALLBACK_NOTE, parse_prediction};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn web_chunk(uri: &str, title: &str) -> GroundingChunk {
    GroundingChunk {
        web: Some(WebSource {
            uri: uri.to_string(),
            title: title.to_string(),
        }),
    }
}

#[test]
fn parses_fully_structured_reply() {
    let raw = "Predicted Winner: Team X\nJustification: Because reasons.\nKey Stats:\n1. Stat A: detail\n2. Stat B: detail";
    let result = parse_prediction(raw, &[]);

    assert_eq!(result.predicted_winner.as_deref(), Some("Team X"));
    assert_eq!(result.justification.as_deref(), Some("Because reasons."));
    assert_eq!(result.key_stats, vec!["Stat A: detail", "Stat B: detail"]);
    assert!(result.diagnostic.is_none());
    assert!(result.citations.is_empty());
}

#[test]
fn parse_is_deterministic() {
    let raw = read_fixture("gemini_reply.txt");
    let chunks = vec![web_chunk("https://afl.com.au", "AFL")];
    let first = parse_prediction(&raw, &chunks);
    let second = parse_prediction(&raw, &chunks);
    assert_eq!(first, second);
}

#[test]
fn parses_realistic_reply_fixture() {
    let raw = read_fixture("gemini_reply.txt");
    let result = parse_prediction(&raw, &[]);

    assert_eq!(result.predicted_winner.as_deref(), Some("Geelong Cats"));
    let justification = result.justification.expect("justification should parse");
    assert!(justification.starts_with("Geelong enter this clash"));
    assert!(justification.ends_with("decisive in the final quarter."));
    assert!(!justification.contains("Key Stats"));

    assert_eq!(result.key_stats.len(), 4);
    assert!(result.key_stats[0].starts_with("Contested Possessions:"));
    assert!(result.key_stats[3].starts_with("Scoring accuracy:"));
    // The trailing "Sources:" section must not leak into the stats list.
    assert!(!result.key_stats[3].contains("afl.com.au"));
    assert!(result.diagnostic.is_none());
}

#[test]
fn unstructured_reply_falls_back_to_justification() {
    let raw = "Some unrelated text with no labels at all.";
    let result = parse_prediction(raw, &[]);

    assert!(result.predicted_winner.is_none());
    assert_eq!(result.justification.as_deref(), Some(raw));
    assert!(result.key_stats.is_empty());
    assert_eq!(result.diagnostic.as_deref(), Some(PARSE_FALLBACK_NOTE));
    assert!(!result.is_hard_failure());
}

#[test]
fn fallback_trims_surrounding_whitespace() {
    let result = parse_prediction("\n  plain answer without headings  \n", &[]);
    assert_eq!(
        result.justification.as_deref(),
        Some("plain answer without headings")
    );
    assert_eq!(result.diagnostic.as_deref(), Some(PARSE_FALLBACK_NOTE));
}

#[test]
fn empty_reply_is_hard_failure_shape() {
    let result = parse_prediction("   ", &[]);
    assert!(result.justification.is_none());
    assert!(result.diagnostic.is_some());
    assert!(result.is_hard_failure());
}

#[test]
fn sections_do_not_leak_in_either_order() {
    let stats_first = "Predicted Winner: A\nKey Stats:\n- S1 detail\n- S2 detail\nJustification: The reasoning.";
    let result = parse_prediction(stats_first, &[]);
    assert_eq!(result.justification.as_deref(), Some("The reasoning."));
    assert_eq!(result.key_stats, vec!["S1 detail", "S2 detail"]);

    let justification_first =
        "Predicted Winner: A\nJustification: The reasoning.\nKey Stats:\n- S1 detail\n- S2 detail";
    let result = parse_prediction(justification_first, &[]);
    assert_eq!(result.justification.as_deref(), Some("The reasoning."));
    assert_eq!(result.key_stats, vec!["S1 detail", "S2 detail"]);
}

#[test]
fn labels_match_case_insensitively() {
    let raw = "PREDICTED WINNER: Team Y\nJUSTIFICATION: Loud reasons.\nKEY STATS:\n1. Stat";
    let result = parse_prediction(raw, &[]);
    assert_eq!(result.predicted_winner.as_deref(), Some("Team Y"));
    assert_eq!(result.justification.as_deref(), Some("Loud reasons."));
    assert_eq!(result.key_stats, vec!["Stat"]);
}

#[test]
fn winner_label_is_line_anchored() {
    let raw = "The phrase predicted winner: buried mid-sentence should not count.";
    let result = parse_prediction(raw, &[]);
    // The label sits mid-line after leading prose, so the fallback applies.
    assert!(result.predicted_winner.is_none());
    assert_eq!(result.diagnostic.as_deref(), Some(PARSE_FALLBACK_NOTE));
}

#[test]
fn empty_stat_items_are_dropped() {
    let raw = "Predicted Winner: A\nKey Stats:\n1. First\n2.\n3. Third\n-\n- Fourth";
    let result = parse_prediction(raw, &[]);
    assert_eq!(result.key_stats, vec!["First", "Third", "Fourth"]);
}

#[test]
fn citations_require_uri_and_title() {
    let chunks = vec![
        web_chunk("http://a", "A"),
        web_chunk("", "B"),
        web_chunk("http://c", ""),
        GroundingChunk { web: None },
        web_chunk("http://d", "D"),
    ];
    let result = parse_prediction("Predicted Winner: A", &chunks);

    let pairs: Vec<(&str, &str)> = result
        .citations
        .iter()
        .map(|c| (c.uri.as_str(), c.title.as_str()))
        .collect();
    assert_eq!(pairs, vec![("http://a", "A"), ("http://d", "D")]);
}

#[test]
fn parses_generate_response_fixture() {
    let raw = read_fixture("gemini_response.json");
    let reply = parse_generate_reply_json(&raw).expect("fixture should parse");

    assert!(reply.text.starts_with("Predicted Winner: Sydney Swans"));
    assert_eq!(reply.grounding.len(), 4);

    let result = parse_prediction(&reply.text, &reply.grounding);
    assert_eq!(result.predicted_winner.as_deref(), Some("Sydney Swans"));
    assert_eq!(result.key_stats.len(), 2);
    // Untitled and non-web chunks are dropped; provider order is kept.
    assert_eq!(result.citations.len(), 2);
    assert_eq!(result.citations[0].title, "AFL Round Preview");
    assert_eq!(result.citations[1].title, "AFL Injury List");
}

#[test]
fn generate_response_without_candidates_is_error() {
    assert!(parse_generate_reply_json("{}").is_err());
    assert!(parse_generate_reply_json("not json").is_err());
}
