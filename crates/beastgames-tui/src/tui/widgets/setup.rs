// Setup panel: the two team names and what to do next.

use beastgames_core::Team;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = Vec::new();
    for team in Team::BOTH {
        let name = &state.snapshot.team(team).name;
        let shown = if name.trim().is_empty() {
            Span::styled("(unnamed)", Style::default().fg(Color::Red))
        } else {
            Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD))
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" [{}] ", team.number()), Style::default().fg(Color::Cyan)),
            shown,
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        " Add every contestant to the pool, then press s to start the draft.",
        Style::default().fg(Color::Gray),
    ));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Teams"));
    frame.render_widget(paragraph, area);
}
