use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use afl_predictor::parse::PredictionResult;
use afl_predictor::predict::{MatchRequest, PredictConfig};
use afl_predictor::provider::spawn_prediction_provider;
use afl_predictor::state::{AppState, Delta, ProviderCommand, SelectorColumn, apply_delta};
use afl_predictor::teams::AFL_TEAMS;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => self.state.toggle_focus(),
            KeyCode::Char('h') => self.state.focus = SelectorColumn::Home,
            KeyCode::Char('l') => self.state.focus = SelectorColumn::Away,
            KeyCode::Char('p') | KeyCode::Enter => self.request_prediction(),
            KeyCode::Char('c') => self.state.clear_result(),
            KeyCode::PageDown => {
                self.state.result_scroll = self.state.result_scroll.saturating_add(3);
            }
            KeyCode::PageUp => {
                self.state.result_scroll = self.state.result_scroll.saturating_sub(3);
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn request_prediction(&mut self) {
        if self.state.loading {
            self.state.push_log("[INFO] Prediction already in flight");
            return;
        }
        if !self.state.selection_valid() {
            self.state
                .push_log("[WARN] Home and away teams cannot be the same");
            return;
        }
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[WARN] Prediction provider unavailable");
            return;
        };

        let request = MatchRequest {
            home: self.state.home_team(),
            away: self.state.away_team(),
        };
        if tx.send(ProviderCommand::Predict { request }).is_err() {
            self.state.push_log("[WARN] Prediction request failed");
            return;
        }
        self.state.clear_result();
        self.state.loading = true;
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_prediction_provider(PredictConfig::from_env(), tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(chunks[1]);

    render_selector(frame, columns[0], &app.state);
    render_prediction(frame, columns[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let status = if state.loading { "PREDICTING..." } else { "READY" };
    let line1 = format!("  .-.  AFL PREDICTOR | {status}");
    let line2 = " /___\\ AI-powered game predictions with live grounding".to_string();
    let line3 = format!(
        "  |_|  {} vs {}",
        state.home_team().name,
        state.away_team().name
    );
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text() -> &'static str {
    "Tab/h/l Column | j/k/↑/↓ Move | Enter/p Predict | c Clear | PgUp/PgDn Scroll | ? Help | q Quit"
}

fn render_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_team_column(
        frame,
        cols[0],
        "Home",
        state.home_selected,
        state.focus == SelectorColumn::Home,
    );
    render_team_column(
        frame,
        cols[1],
        "Away",
        state.away_selected,
        state.focus == SelectorColumn::Away,
    );
}

fn render_team_column(frame: &mut Frame, area: Rect, title: &str, selected: usize, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(selected, AFL_TEAMS.len(), visible);
    let mut lines = Vec::new();
    for idx in start..end {
        let prefix = if idx == selected { "> " } else { "  " };
        lines.push(format!("{prefix}{}", AFL_TEAMS[idx].name));
    }
    let list = Paragraph::new(lines.join("\n"));
    frame.render_widget(list, inner);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_prediction(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Prediction").borders(Borders::ALL);

    if let Some(error) = &state.error {
        let banner = Paragraph::new(format!("ERROR\n\n{error}"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(banner, area);
        return;
    }

    let text = match &state.result {
        Some(result) => prediction_text(result),
        None if state.loading => "Waiting for the AI analyst...".to_string(),
        None => "Select teams and press Enter to get a prediction.".to_string(),
    };

    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll, 0))
        .block(block);
    frame.render_widget(panel, area);
}

fn prediction_text(result: &PredictionResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(note) = &result.diagnostic {
        lines.push(format!("Note: {note}"));
        lines.push(String::new());
    }
    if let Some(winner) = &result.predicted_winner {
        lines.push(format!("Predicted Winner: {winner}"));
        lines.push(String::new());
    }
    if let Some(justification) = &result.justification {
        lines.push("Justification:".to_string());
        lines.push(justification.clone());
        lines.push(String::new());
    }
    if !result.key_stats.is_empty() {
        lines.push("Key Stats:".to_string());
        for (idx, stat) in result.key_stats.iter().enumerate() {
            lines.push(format!("{}. {stat}", idx + 1));
        }
        lines.push(String::new());
    }
    if !result.citations.is_empty() {
        lines.push("Sources:".to_string());
        for citation in &result.citations {
            lines.push(format!("- {} ({})", citation.title, citation.uri));
        }
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "AFL Predictor - Help",
        "",
        "  Tab / ← / →   Switch home/away column",
        "  h / l         Focus home / away column",
        "  j/k or ↑/↓    Move team selection",
        "  Enter / p     Request prediction",
        "  c             Clear current prediction",
        "  PgUp / PgDn   Scroll prediction panel",
        "  ?             Toggle help",
        "  q             Quit",
        "",
        "Predictions are for entertainment purposes only.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
