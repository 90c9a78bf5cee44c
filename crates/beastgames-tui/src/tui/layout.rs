// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Body (fill, arranged per phase)                   |
// +--------------------------------------------------+
// | Notice (1 row)                                    |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// Body arrangement:
//   setup:   [ teams (40%) | pool (60%) ]
//   draft:   [ pool (30%) | team 1 | team 2 ]
//   scoring: [ team 1 | team 2 | reference (28%, optional) ]

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas shared by every phase.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub body: Rect,
    pub notice: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // body
            Constraint::Length(1), // notice
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        body: vertical[1],
        notice: vertical[2],
        help_bar: vertical[3],
    }
}

/// Setup body: team names on the left, pool on the right.
pub fn setup_panels(body: Rect) -> (Rect, Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body);
    (cols[0], cols[1])
}

/// Draft body: pool list, then the two team columns.
pub fn draft_panels(body: Rect) -> (Rect, [Rect; 2]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(body);
    (cols[0], [cols[1], cols[2]])
}

/// Scoring body: two team columns, plus the reference panel when shown.
pub fn scoring_panels(body: Rect, show_reference: bool) -> ([Rect; 2], Option<Rect>) {
    if show_reference {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(36),
                Constraint::Percentage(36),
                Constraint::Percentage(28),
            ])
            .split(body);
        ([cols[0], cols[1]], Some(cols[2]))
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);
        ([cols[0], cols[1]], None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
