// Status bar widget: phase, episode, draft turn, undo depth, last save.

use beastgames_core::Phase;
use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [phase badge] [phase detail] | [undo depth] | [last saved]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snap = &state.snapshot;
    let separator = || Span::styled(" | ", Style::default().fg(Color::Gray));

    let mut spans = vec![
        Span::styled(
            format!(" {} ", phase_label(snap.phase)),
            Style::default()
                .fg(Color::Black)
                .bg(phase_color(snap.phase))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    match snap.phase {
        Phase::Setup => {
            spans.push(Span::styled(
                format!("{} in pool", snap.pool.len()),
                Style::default().fg(Color::White),
            ));
        }
        Phase::Draft => {
            spans.push(Span::styled(
                format!("{} to pick", snap.team(snap.draft_turn).name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            spans.push(separator());
            spans.push(Span::raw(format!("{} left", snap.pool.len())));
        }
        Phase::Scoring => {
            spans.push(Span::styled(
                format!("Episode {}", snap.current_episode),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            spans.push(separator());
            spans.push(Span::raw(format!("Undo: {}", snap.undo_depth)));
        }
    }

    spans.push(separator());
    spans.push(Span::styled(
        saved_label(snap.last_saved),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Setup => "SETUP",
        Phase::Draft => "DRAFT",
        Phase::Scoring => "SCORING",
    }
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Setup => Color::Cyan,
        Phase::Draft => Color::Yellow,
        Phase::Scoring => Color::Green,
    }
}

pub fn saved_label(last_saved: Option<DateTime<Local>>) -> String {
    match last_saved {
        Some(t) => format!("Saved {}", t.format("%H:%M:%S")),
        None => "Not saved yet".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
