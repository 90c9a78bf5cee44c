// Keyboard input handling and command dispatch.
//
// Translates crossterm key events (and bracketed pastes) into UserCommand
// messages for the app loop, or into local ViewState changes such as cursor
// movement, opening the score menu, or typing into a prompt.

use beastgames_core::{Phase, ScoringRule, Team};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{EditField, InputMode, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app loop. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // A notice lasts until the next key.
    view_state.notice = None;

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }
    if view_state.confirm_reset {
        return handle_confirm_reset(key_event, view_state);
    }
    if view_state.is_editing() {
        return handle_editing(key_event, view_state);
    }
    if view_state.score_menu {
        if let Some(handled) = handle_score_menu(key_event, view_state) {
            return handled;
        }
    }

    // Keys available in every phase.
    match key_event.code {
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            return None;
        }
        KeyCode::Char('R') => {
            view_state.confirm_reset = true;
            return None;
        }
        _ => {}
    }

    match view_state.phase() {
        Phase::Setup => handle_setup(key_event, view_state),
        Phase::Draft => handle_draft(key_event, view_state),
        Phase::Scoring => handle_scoring(key_event, view_state),
    }
}

/// Handle a bracketed paste.
///
/// Pasting into the pool (setup or draft, outside other prompts) adds one
/// entry per line. Pasting into any other prompt appends the text with line
/// breaks removed.
pub fn handle_paste(text: &str, view_state: &mut ViewState) -> Option<UserCommand> {
    view_state.notice = None;
    view_state.score_menu = false;
    if view_state.confirm_quit || view_state.confirm_reset {
        return None;
    }
    match &mut view_state.mode {
        InputMode::Editing {
            field: EditField::PoolLine,
            ..
        } => Some(UserCommand::AddToPool(text.to_string())),
        InputMode::Editing { buffer, .. } => {
            buffer.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
            None
        }
        InputMode::Normal => match view_state.snapshot.phase {
            Phase::Setup | Phase::Draft => Some(UserCommand::AddToPool(text.to_string())),
            Phase::Scoring => None,
        },
    }
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_confirm_reset(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            view_state.confirm_reset = false;
            Some(UserCommand::Reset)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_reset = false;
            None
        }
        _ => None,
    }
}

/// Typing into a prompt. Enter submits, Esc cancels, Tab switches the team
/// when adding a contestant.
fn handle_editing(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let InputMode::Editing { field, buffer } = &mut view_state.mode else {
        return None;
    };

    match key_event.code {
        KeyCode::Esc => {
            view_state.mode = InputMode::Normal;
            None
        }
        KeyCode::Backspace => {
            buffer.pop();
            None
        }
        KeyCode::Tab => {
            if let EditField::AddContestant(team) = field {
                *team = team.other();
            }
            None
        }
        KeyCode::Enter => submit_edit(view_state),
        KeyCode::Char(c) => {
            buffer.push(c);
            None
        }
        _ => None,
    }
}

fn submit_edit(view_state: &mut ViewState) -> Option<UserCommand> {
    let mode = std::mem::replace(&mut view_state.mode, InputMode::Normal);
    let InputMode::Editing { field, buffer } = mode else {
        return None;
    };

    match field {
        EditField::TeamName(team) => Some(UserCommand::SetTeamName { team, name: buffer }),
        EditField::PoolLine => {
            // Keep the prompt open for the next name.
            view_state.start_editing(EditField::PoolLine, "");
            if buffer.trim().is_empty() {
                None
            } else {
                Some(UserCommand::AddToPool(buffer))
            }
        }
        EditField::AddContestant(team) => Some(UserCommand::AddContestant { name: buffer, team }),
        EditField::Money(id) => Some(UserCommand::RecordMoney { id, input: buffer }),
        EditField::Episode => match buffer.trim().parse::<u32>() {
            Ok(n) => Some(UserCommand::SetEpisode(n)),
            Err(_) => {
                view_state.notice = Some("Episode must be a number".to_string());
                None
            }
        },
    }
}

/// Quick-score popup: `1`-`9` apply a rule, `m` types a prize amount.
///
/// Any other key closes the menu and returns `None` so the caller handles
/// it as a normal key.
fn handle_score_menu(
    key_event: KeyEvent,
    view_state: &mut ViewState,
) -> Option<Option<UserCommand>> {
    view_state.score_menu = false;
    let id = view_state.selected_contestant().map(|c| c.id)?;

    match key_event.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Some(None),
        KeyCode::Char('m') | KeyCode::Char('$') => {
            view_state.start_editing(EditField::Money(id), "");
            Some(None)
        }
        KeyCode::Char(c) => {
            let rule = rule_for_digit(c)?;
            Some(Some(UserCommand::RecordScore { id, rule }))
        }
        _ => None,
    }
}

/// Menu digit `1`..`9` to the rule shown at that position.
pub fn rule_for_digit(c: char) -> Option<ScoringRule> {
    let n = c.to_digit(10)? as usize;
    n.checked_sub(1).and_then(|i| ScoringRule::ALL.get(i).copied())
}

// ---------------------------------------------------------------------------
// Per-phase keys
// ---------------------------------------------------------------------------

fn handle_setup(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('1') | KeyCode::Char('2') => {
            let team = if key_event.code == KeyCode::Char('1') {
                Team::One
            } else {
                Team::Two
            };
            let current = view_state.snapshot.team(team).name.clone();
            view_state.start_editing(EditField::TeamName(team), current);
            None
        }
        KeyCode::Char('s') => Some(UserCommand::StartDraft),
        _ => handle_pool_keys(key_event, view_state),
    }
}

fn handle_draft(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('1') => draft_selected(view_state, Team::One),
        KeyCode::Char('2') => draft_selected(view_state, Team::Two),
        KeyCode::Enter => {
            let team = view_state.snapshot.draft_turn;
            draft_selected(view_state, team)
        }
        KeyCode::Char('c') => {
            let team = view_state.snapshot.draft_turn;
            view_state.start_editing(EditField::AddContestant(team), "");
            None
        }
        KeyCode::Char('s') => Some(UserCommand::StartScoring),
        _ => handle_pool_keys(key_event, view_state),
    }
}

fn draft_selected(view_state: &ViewState, team: Team) -> Option<UserCommand> {
    view_state
        .selected_pool_entry()
        .map(|entry| UserCommand::DraftPick { id: entry.id, team })
}

/// Pool list keys shared by setup and draft.
fn handle_pool_keys(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.pool_cursor = view_state.pool_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.pool_cursor + 1 < view_state.snapshot.pool.len() {
                view_state.pool_cursor += 1;
            }
            None
        }
        KeyCode::Char('a') => {
            view_state.start_editing(EditField::PoolLine, "");
            None
        }
        KeyCode::Char('d') | KeyCode::Delete => view_state
            .selected_pool_entry()
            .map(|entry| UserCommand::RemoveFromPool(entry.id)),
        _ => None,
    }
}

fn handle_scoring(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.row_cursor = view_state.row_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let rows = view_state.snapshot.team(view_state.team_cursor).contestants.len();
            if view_state.row_cursor + 1 < rows {
                view_state.row_cursor += 1;
            }
            None
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Tab => {
            view_state.team_cursor = view_state.team_cursor.other();
            let rows = view_state.snapshot.team(view_state.team_cursor).contestants.len();
            view_state.row_cursor = view_state.row_cursor.min(rows.saturating_sub(1));
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if view_state.selected_contestant().is_some() {
                view_state.score_menu = true;
            }
            None
        }
        KeyCode::Char('e') => view_state
            .selected_contestant()
            .map(|c| UserCommand::ToggleActive(c.id)),
        KeyCode::Char('u') => Some(UserCommand::Undo),
        KeyCode::Char(']') | KeyCode::Char('+') => Some(UserCommand::NextEpisode),
        KeyCode::Char('[') | KeyCode::Char('-') => Some(UserCommand::PreviousEpisode),
        KeyCode::Char('g') => {
            let current = view_state.snapshot.current_episode.to_string();
            view_state.start_editing(EditField::Episode, current);
            None
        }
        KeyCode::Char('c') => {
            let team = view_state.team_cursor;
            view_state.start_editing(EditField::AddContestant(team), "");
            None
        }
        KeyCode::Char('?') => {
            view_state.show_reference = !view_state.show_reference;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
