//! Header row, tab bar and the active tab's summary.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::view;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let guide = &app.guide;

    let mut title = vec![Span::styled(format!(" {}", view::title(guide)), theme::accent_bold())];
    if let Some(link) = view::skip_link(guide) {
        title.push(Span::raw("  "));
        title.push(Span::styled(format!("[{}]", link.label), theme::focused()));
    }

    let (query, field_focused) = view::search_field(guide);
    let field_style = if field_focused { theme::focused() } else { theme::secondary() };
    let cursor = if field_focused { "▏" } else { "" };
    let mut controls = vec![
        Span::styled(" Search: ", theme::muted()),
        Span::styled(format!("[{query}{cursor}]"), field_style),
    ];
    for control in view::header_controls(guide) {
        controls.push(Span::raw(" "));
        let style = if control.focused { theme::focused() } else { theme::accent() };
        controls.push(Span::styled(format!("[{}]", control.label), style));
    }

    let para = Paragraph::new(vec![Line::from(title), Line::from(controls)]);
    f.render_widget(para, area);
}

pub fn render_tabs(f: &mut Frame, area: Rect, app: &AppState) {
    let (labels, selected) = view::tab_labels(&app.guide);
    let focused = view::tab_has_focus(&app.guide);
    let highlight = if focused { theme::focused() } else { theme::accent_bold() };

    let tabs = Tabs::new(labels)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::panel_border(focused)),
        )
        .style(theme::muted())
        .highlight_style(highlight)
        .select(selected);
    f.render_widget(tabs, area);
}

pub fn render_tab_summary(f: &mut Frame, area: Rect, app: &AppState) {
    let para = Paragraph::new(view::active_tab_summary(&app.guide))
        .style(theme::text())
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
