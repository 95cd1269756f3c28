use std::collections::VecDeque;

use crate::parse::PredictionResult;
use crate::predict::MatchRequest;
use crate::teams::{AFL_TEAMS, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorColumn {
    Home,
    Away,
}

pub struct AppState {
    pub focus: SelectorColumn,
    pub home_selected: usize,
    pub away_selected: usize,
    pub loading: bool,
    pub result: Option<PredictionResult>,
    pub error: Option<String>,
    pub result_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            focus: SelectorColumn::Home,
            home_selected: 0,
            away_selected: 1,
            loading: false,
            result: None,
            error: None,
            result_scroll: 0,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn home_team(&self) -> Team {
        AFL_TEAMS[self.home_selected]
    }

    pub fn away_team(&self) -> Team {
        AFL_TEAMS[self.away_selected]
    }

    /// The distinctness rule: a request is only buildable for two different
    /// teams. Enforced here, before anything reaches the orchestrator.
    pub fn selection_valid(&self) -> bool {
        self.home_team().id != self.away_team().id
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SelectorColumn::Home => SelectorColumn::Away,
            SelectorColumn::Away => SelectorColumn::Home,
        };
    }

    pub fn select_next(&mut self) {
        let slot = self.focused_slot();
        *slot = (*slot + 1) % AFL_TEAMS.len();
    }

    pub fn select_prev(&mut self) {
        let slot = self.focused_slot();
        *slot = (*slot + AFL_TEAMS.len() - 1) % AFL_TEAMS.len();
    }

    fn focused_slot(&mut self) -> &mut usize {
        match self.focus {
            SelectorColumn::Home => &mut self.home_selected,
            SelectorColumn::Away => &mut self.away_selected,
        }
    }

    pub fn clear_result(&mut self) {
        self.result = None;
        self.error = None;
        self.result_scroll = 0;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub enum Delta {
    Prediction(PredictionResult),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Predict { request: MatchRequest },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Prediction(result) => {
            state.loading = false;
            state.result_scroll = 0;
            if result.is_hard_failure() {
                let diagnostic = result
                    .diagnostic
                    .unwrap_or_else(|| "Prediction failed".to_string());
                state.push_log(format!("[WARN] Prediction failed: {diagnostic}"));
                state.error = Some(diagnostic);
                state.result = None;
            } else {
                if let Some(note) = &result.diagnostic {
                    state.push_log(format!("[WARN] Partial prediction: {note}"));
                } else {
                    state.push_log("[INFO] Prediction received");
                }
                state.error = None;
                state.result = Some(result);
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
