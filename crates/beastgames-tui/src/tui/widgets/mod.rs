// TUI widget modules for each dashboard panel and overlay.

pub mod confirm;
pub mod help_bar;
pub mod pool;
pub mod prompt;
pub mod reference;
pub mod score_menu;
pub mod setup;
pub mod status_bar;
pub mod teams;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the rectangle is clamped to the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}
