// Confirmation overlay for destructive actions (quit, reset).
//
// Renders a centered y/n dialog on top of the main layout.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

const DIALOG_HEIGHT: u16 = 3;

/// Render a confirmation dialog centered on `area`.
pub fn render(frame: &mut Frame, area: Rect, title: &str, question: &str) {
    let width = dialog_width(question);
    let dialog_area = centered_rect(width, DIALOG_HEIGHT, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Line::from(vec![
        Span::raw(format!(" {question} (")),
        Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("/"),
        Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(")"),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}

/// Question plus " (y/n)", padding and borders.
fn dialog_width(question: &str) -> u16 {
    let chars = question.chars().count() + 8 + 2;
    u16::try_from(chars).unwrap_or(u16::MAX).max(24)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
