//! Bottom status bar — latest notification, live-region text, key hints.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " Tab:focus Enter:open ^K:search ^G:glossary ?:keys q:quit",
        theme::muted(),
    ));

    if let Some(note) = app.guide.notifications().latest() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("[{}] ", note.created.format("%H:%M:%S")),
            theme::muted(),
        ));
        spans.push(Span::styled(note.message.clone(), theme::notice(note.level)));
    }

    let announcement = app.guide.announcement();
    if !announcement.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(announcement, theme::neutral()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
