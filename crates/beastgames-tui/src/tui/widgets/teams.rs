// Team column widget: one team's contestants as cards with their ledgers.
//
// Card layout:
//   Alice                    15
//     Ep1: Survived (+5)
//     Ep1: Team Win (+10)
// Eliminated contestants are dimmed and tagged OUT. During scoring the
// selected card is highlighted.

use beastgames_core::roster::{Contestant, ScoreEntry};
use beastgames_core::{Phase, Team};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, team: Team) {
    let snap = &state.snapshot;
    let team_snap = snap.team(team);

    let focused = snap.phase == Phase::Scoring && state.team_cursor == team;
    let selected_row = focused.then_some(state.row_cursor);

    let mut title = vec![Span::styled(
        format!(" {} ", team_snap.name),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    title.push(Span::styled(
        format!("{} pts ", team_snap.total),
        Style::default().fg(total_color(team_snap.total)),
    ));
    if snap.phase == Phase::Draft && snap.draft_turn == team {
        title.push(Span::styled("<< turn ", Style::default().fg(Color::Yellow)));
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title));

    if team_snap.contestants.is_empty() {
        let paragraph = Paragraph::new("  No contestants yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    let mut selected_line = 0;
    for (row, contestant) in team_snap.contestants.iter().enumerate() {
        let selected = selected_row == Some(row);
        if selected {
            selected_line = lines.len();
        }
        lines.extend(card_lines(contestant, selected, inner_width));
    }

    // Keep the selected card on screen.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = if selected_line >= visible {
        selected_line.saturating_sub(visible / 2)
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

/// Header line plus one line per ledger entry.
fn card_lines(contestant: &Contestant, selected: bool, width: usize) -> Vec<Line<'static>> {
    let mut name_style = Style::default().add_modifier(Modifier::BOLD);
    if !contestant.active {
        name_style = name_style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
    }
    if selected {
        name_style = name_style.bg(Color::Cyan).fg(Color::Black);
    }

    let marker = if selected { "> " } else { "  " };
    let status = if contestant.active { "" } else { " OUT" };
    let total = contestant.total().to_string();
    let left = format!("{marker}{}{status}", contestant.name);
    let pad = width.saturating_sub(left.chars().count() + total.len() + 1).max(1);

    let mut lines = vec![Line::from(vec![
        Span::styled(left, name_style),
        Span::raw(" ".repeat(pad)),
        Span::styled(total, Style::default().fg(total_color(contestant.total()))),
    ])];

    for (episode, entry) in contestant.entries() {
        lines.push(Line::styled(
            format!("    {}", format_entry(episode, entry)),
            Style::default().fg(entry_color(entry.value)),
        ));
    }
    lines
}

/// `Ep3: Team Win (+10)`
pub fn format_entry(episode: u32, entry: &ScoreEntry) -> String {
    format!("Ep{}: {} ({:+})", episode, entry.kind, entry.value)
}

fn total_color(total: i64) -> Color {
    if total < 0 {
        Color::Red
    } else {
        Color::Green
    }
}

fn entry_color(value: i64) -> Color {
    if value < 0 {
        Color::Red
    } else {
        Color::Gray
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
