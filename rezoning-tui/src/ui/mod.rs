//! Top-level UI layout — header, tab bar, timeline and status bar, with the
//! decision tree, glossary and blocking notice drawn on top.

pub mod header;
pub mod overlays;
pub mod status_bar;
pub mod timeline;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::AppState;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::render(f, chunks[0], app);
    header::render_tabs(f, chunks[1], app);
    header::render_tab_summary(f, chunks[2], app);
    timeline::render(f, chunks[3], app);
    status_bar::render(f, chunks[4], app);

    let body = Rect {
        y: chunks[1].y,
        height: chunks[1].height + chunks[2].height + chunks[3].height,
        ..chunks[1]
    };
    if app.guide.is_modal_open() {
        overlays::render_decision(f, body, app);
    }
    if app.guide.state().glossary_open {
        overlays::render_glossary(f, body, app);
    }
    if let Some(message) = app.guide.notifications().blocking() {
        overlays::render_notice(f, body, message);
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
