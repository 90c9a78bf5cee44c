// Scoring reference panel. Display only.

use beastgames_core::scoring::reference_table;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for section in reference_table() {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::styled(
            format!(" {}", section.title),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        for line in section.lines {
            let color = if line.points < 0 { Color::Red } else { Color::Green };
            lines.push(Line::from(vec![
                Span::raw(format!("  {}: ", line.label)),
                Span::styled(format!("{:+} pts", line.points), Style::default().fg(color)),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Scoring"));
    frame.render_widget(paragraph, area);
}
