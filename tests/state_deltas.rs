use afl_predictor::parse::{Citation, PredictionResult};
use afl_predictor::state::{AppState, Delta, SelectorColumn, apply_delta};
use afl_predictor::teams::AFL_TEAMS;

fn soft_result() -> PredictionResult {
    PredictionResult {
        predicted_winner: Some("Geelong Cats".to_string()),
        justification: Some("Strong home form.".to_string()),
        key_stats: vec!["Inside 50s: +9".to_string()],
        diagnostic: None,
        citations: vec![Citation {
            uri: "https://afl.com.au".to_string(),
            title: "AFL".to_string(),
        }],
    }
}

#[test]
fn prediction_delta_sets_result_and_clears_loading() {
    let mut state = AppState::new();
    state.loading = true;
    state.error = Some("stale error".to_string());

    apply_delta(&mut state, Delta::Prediction(soft_result()));

    assert!(!state.loading);
    assert!(state.error.is_none());
    let result = state.result.expect("result should be set");
    assert_eq!(result.predicted_winner.as_deref(), Some("Geelong Cats"));
    assert!(state.logs.iter().any(|log| log.contains("[INFO]")));
}

#[test]
fn partial_prediction_is_rendered_with_a_note() {
    let mut state = AppState::new();
    state.loading = true;

    let mut partial = soft_result();
    partial.diagnostic = Some("Could not fully parse".to_string());
    apply_delta(&mut state, Delta::Prediction(partial));

    assert!(state.error.is_none());
    assert!(state.result.is_some());
    assert!(state.logs.iter().any(|log| log.contains("Partial prediction")));
}

#[test]
fn hard_failure_becomes_error_banner_with_no_result() {
    let mut state = AppState::new();
    state.loading = true;
    state.result = Some(soft_result());

    apply_delta(
        &mut state,
        Delta::Prediction(PredictionResult::failure("provider unavailable")),
    );

    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("provider unavailable"));
    assert!(state.result.is_none());
    assert!(state.logs.iter().any(|log| log.contains("[WARN]")));
}

#[test]
fn log_delta_appends_to_console() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Log("[INFO] hello".to_string()));
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] hello"));
}

#[test]
fn selection_wraps_and_tracks_focus() {
    let mut state = AppState::new();
    assert_eq!(state.focus, SelectorColumn::Home);

    state.home_selected = AFL_TEAMS.len() - 1;
    state.select_next();
    assert_eq!(state.home_selected, 0);
    state.select_prev();
    assert_eq!(state.home_selected, AFL_TEAMS.len() - 1);

    state.toggle_focus();
    assert_eq!(state.focus, SelectorColumn::Away);
    let before = state.away_selected;
    state.select_next();
    assert_eq!(state.away_selected, (before + 1) % AFL_TEAMS.len());
}

#[test]
fn identical_sides_are_invalid() {
    let mut state = AppState::new();
    state.home_selected = 3;
    state.away_selected = 3;
    assert!(!state.selection_valid());
    state.away_selected = 4;
    assert!(state.selection_valid());
}
