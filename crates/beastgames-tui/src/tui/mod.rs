// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `AppSnapshot` plus purely
// local state (cursors, open popups, text being typed). The app loop pushes
// `UiUpdate` messages over an mpsc channel; the TUI applies them and
// re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use beastgames_core::draft::PoolEntry;
use beastgames_core::roster::Contestant;
use beastgames_core::{ContestantId, Phase, Team};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};

use layout::{build_layout, draft_panels, scoring_panels, setup_panels};

// ---------------------------------------------------------------------------
// Input mode
// ---------------------------------------------------------------------------

/// What a line of typed text will be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditField {
    TeamName(Team),
    /// Stays open after each Enter so names can be added one after another.
    PoolLine,
    AddContestant(Team),
    Money(ContestantId),
    Episode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing { field: EditField, buffer: String },
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the last snapshot from the app loop plus cursors and
/// overlays that only the TUI cares about.
pub struct ViewState {
    pub snapshot: AppSnapshot,
    /// Shown in the notice line until the next key press.
    pub notice: Option<String>,
    pub mode: InputMode,
    /// Selected row in the pool list.
    pub pool_cursor: usize,
    /// Selected team column during scoring.
    pub team_cursor: Team,
    /// Selected contestant within `team_cursor`.
    pub row_cursor: usize,
    /// Quick-score popup open for the selected contestant.
    pub score_menu: bool,
    pub show_reference: bool,
    pub confirm_reset: bool,
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: AppSnapshot::default(),
            notice: None,
            mode: InputMode::Normal,
            pool_cursor: 0,
            team_cursor: Team::One,
            row_cursor: 0,
            score_menu: false,
            show_reference: true,
            confirm_reset: false,
            confirm_quit: false,
        }
    }
}

impl ViewState {
    /// Replace the snapshot and pull cursors back inside the new bounds.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let phase_changed = snapshot.phase != self.snapshot.phase;
        self.snapshot = snapshot;

        if phase_changed {
            self.pool_cursor = 0;
            self.team_cursor = Team::One;
            self.row_cursor = 0;
            self.score_menu = false;
            if matches!(self.mode, InputMode::Editing { .. }) {
                self.mode = InputMode::Normal;
            }
        }

        self.pool_cursor = clamp_cursor(self.pool_cursor, self.snapshot.pool.len());
        let rows = self.snapshot.team(self.team_cursor).contestants.len();
        self.row_cursor = clamp_cursor(self.row_cursor, rows);
        if self.selected_contestant().is_none() {
            self.score_menu = false;
        }
    }

    pub fn phase(&self) -> Phase {
        self.snapshot.phase
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, InputMode::Editing { .. })
    }

    pub fn selected_pool_entry(&self) -> Option<&PoolEntry> {
        self.snapshot.pool.get(self.pool_cursor)
    }

    pub fn selected_contestant(&self) -> Option<&Contestant> {
        self.snapshot
            .team(self.team_cursor)
            .contestants
            .get(self.row_cursor)
    }

    pub fn start_editing(&mut self, field: EditField, initial: impl Into<String>) {
        self.mode = InputMode::Editing {
            field,
            buffer: initial.into(),
        };
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::Notice(text) => state.notice = Some(text),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);

    match state.phase() {
        Phase::Setup => {
            let (teams, pool) = setup_panels(layout.body);
            widgets::setup::render(frame, teams, state);
            widgets::pool::render(frame, pool, state);
        }
        Phase::Draft => {
            let (pool, teams) = draft_panels(layout.body);
            widgets::pool::render(frame, pool, state);
            for (area, team) in teams.into_iter().zip(Team::BOTH) {
                widgets::teams::render(frame, area, state, team);
            }
        }
        Phase::Scoring => {
            let (teams, reference) = scoring_panels(layout.body, state.show_reference);
            for (area, team) in teams.into_iter().zip(Team::BOTH) {
                widgets::teams::render(frame, area, state, team);
            }
            if let Some(area) = reference {
                widgets::reference::render(frame, area);
            }
        }
    }

    render_notice(frame, layout.notice, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    // Overlays, lowest first.
    if state.score_menu {
        widgets::score_menu::render(frame, layout.body, state);
    }
    if state.is_editing() {
        widgets::prompt::render(frame, layout.body, state);
    }
    if state.confirm_reset {
        widgets::confirm::render(frame, frame.area(), " Reset? ", "Erase the whole session?");
    }
    if state.confirm_quit {
        widgets::confirm::render(frame, frame.area(), " Quit? ", "Really quit?");
    }
}

fn render_notice(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = state.notice.as_deref().unwrap_or("");
    let paragraph = Paragraph::new(format!(" {text}")).style(Style::default().fg(Color::Yellow));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen, bracketed paste).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, terminal input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableBracketedPaste) {
        warn!("Bracketed paste unavailable: {}", e);
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App loop has shut down.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                let cmd = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, &mut view_state),
                    Some(Ok(Event::Paste(text))) => input::handle_paste(&text, &mut view_state),
                    Some(Ok(_)) => None,
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                };
                if let Some(cmd) = cmd {
                    let quit = cmd == UserCommand::Quit;
                    let _ = cmd_tx.send(cmd).await;
                    if quit {
                        break Ok(());
                    }
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
