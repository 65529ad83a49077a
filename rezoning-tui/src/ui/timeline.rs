//! Timeline panel — stage cards, detail triggers and open detail panels.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use rezoning_core::PresentationTree;

use crate::app::AppState;
use crate::theme;
use crate::view::{self, RowKind, TimelineRow};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let main_focused = app.guide.tree().focused() == Some(app.guide.registry().main_content);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(main_focused))
        .title(" Timeline ")
        .title_style(theme::panel_title(main_focused));

    let lines: Vec<Line> = view::timeline_rows(&app.guide).iter().map(row_line).collect();
    let para = Paragraph::new(lines)
        .block(block)
        .scroll((app.timeline_scroll, 0));
    f.render_widget(para, area);
}

fn row_line(row: &TimelineRow) -> Line<'static> {
    let (indent, style) = match row.kind {
        RowKind::Title => (" ", theme::stage(row.opacity).add_modifier(Modifier::BOLD)),
        RowKind::Summary => ("   ", theme::stage(row.opacity)),
        RowKind::Trigger if row.focused => ("   ", theme::focused()),
        RowKind::Trigger => ("   ", theme::accent()),
        RowKind::Detail => ("     ", theme::secondary()),
    };
    let style = if row.highlighted { theme::highlight() } else { style };
    Line::from(vec![Span::raw(indent), Span::styled(row.text.clone(), style)])
}
