// Quick-score popup for the selected contestant.
//
// Lists every scoring rule with its menu digit and points, plus the prize
// money entry. Rules already recorded this episode are dimmed.

use beastgames_core::scoring::{ScoringRule, DOLLARS_PER_POINT};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::tui::ViewState;

const MENU_WIDTH: u16 = 38;
const MENU_HEIGHT: u16 = ScoringRule::ALL.len() as u16 + 4;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(contestant) = state.selected_contestant() else {
        return;
    };
    let episode = state.snapshot.current_episode;
    let popup = centered_rect(MENU_WIDTH, MENU_HEIGHT, area);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = ScoringRule::ALL
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            let done = contestant.has_entry(episode, rule.label());
            let style = if done {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<24}", rule.menu_label()), style),
                Span::styled(format!("{:+}", rule.points()), style.fg(Color::Green)),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(" m ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("Prize money (1 pt / ${DOLLARS_PER_POINT})")),
    ]));

    let title = format!(" {} - Ep{} ", contestant.name, episode);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, popup);
}
