// Pool widget: undrafted contestants, selectable, used in setup and draft.

use beastgames_core::Phase;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let pool = &state.snapshot.pool;
    let title = format!("Pool ({})", pool.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if pool.is_empty() {
        let hint = match state.phase() {
            Phase::Draft => "  Everyone has been drafted. Press s to start scoring.",
            _ => "  Pool is empty. Press a to add names.",
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = pool
        .iter()
        .map(|entry| ListItem::new(entry.name.clone()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.pool_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}
