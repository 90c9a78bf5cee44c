// Help bar widget: key hints for the current phase and mode.

use beastgames_core::Phase;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{EditField, InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hints(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// The hint line for whatever currently has the keyboard.
pub fn hints(state: &ViewState) -> &'static str {
    if state.confirm_quit || state.confirm_reset {
        return " y:Confirm | n/Esc:Cancel";
    }
    if let InputMode::Editing { field, .. } = &state.mode {
        return match field {
            EditField::PoolLine => " Enter:Add name | Esc:Done | paste adds one per line",
            EditField::AddContestant(_) => " Enter:Add | Tab:Switch team | Esc:Cancel",
            _ => " Enter:Save | Esc:Cancel",
        };
    }
    if state.score_menu {
        return " 1-9:Score | m:Prize money | Esc:Close";
    }
    match state.phase() {
        Phase::Setup => " 1/2:Team name | a:Add names | d:Remove | s:Start draft | R:Reset | q:Quit",
        Phase::Draft => {
            " \u{2191}\u{2193}:Select | 1/2:Draft to team | Enter:Draft to turn | a:Add | c:Add to team | s:Start scoring | q:Quit"
        }
        Phase::Scoring => {
            " \u{2190}\u{2192}\u{2191}\u{2193}:Select | Enter:Score | e:Elim/Restore | u:Undo | [/]:Episode | g:Go to | c:Add | ?:Ref | R:Reset | q:Quit"
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
