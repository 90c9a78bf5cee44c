// Text prompt overlay shown while typing a team name, pool names, a new
// contestant, a prize amount, or an episode number.

use beastgames_core::Team;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::{EditField, InputMode, ViewState};

const PROMPT_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let InputMode::Editing { field, buffer } = &state.mode else {
        return;
    };

    // Bottom of the body, full width.
    let [_, prompt_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(PROMPT_HEIGHT)]).areas(area);
    frame.render_widget(Clear, prompt_area);

    let text = Line::from(vec![
        Span::raw(" "),
        Span::raw(buffer.clone()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" {} ", prompt_title(field, state))),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, prompt_area);
}

pub fn prompt_title(field: &EditField, state: &ViewState) -> String {
    let team_name = |team: Team| state.snapshot.team(team).name.clone();
    match field {
        EditField::TeamName(team) => format!("Team {} name", team.number()),
        EditField::PoolLine => "Add to pool (one name per Enter)".to_string(),
        EditField::AddContestant(team) => format!("Add contestant to {}", team_name(*team)),
        EditField::Money(id) => {
            let name = state
                .snapshot
                .teams
                .iter()
                .flat_map(|t| t.contestants.iter())
                .find(|c| c.id == *id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string());
            format!("Prize money won by {name}")
        }
        EditField::Episode => "Go to episode".to_string(),
    }
}
