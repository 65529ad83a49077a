//! Overlay widgets — decision tree dialog, glossary, blocking notice.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;
use crate::view::{self, ControlView, DecisionView};

fn button(control: &ControlView) -> Span<'static> {
    let style = if control.focused { theme::focused() } else { theme::accent() };
    Span::styled(format!("[{}]", control.label), style)
}

/// Decision tree dialog.
pub fn render_decision(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::neutral())
        .title(" Do I need a rezoning? [Esc]close ")
        .title_style(theme::neutral().add_modifier(Modifier::BOLD));

    let mut lines: Vec<Line> = vec![Line::from("")];
    match view::decision(&app.guide) {
        DecisionView::Question { prompt, choices } => {
            lines.push(Line::from(Span::styled(prompt, theme::text())));
            lines.push(Line::from(""));
            for choice in &choices {
                lines.push(Line::from(vec![Span::raw("  "), button(choice)]));
            }
        }
        DecisionView::Result { title, body } => {
            lines.push(Line::from(Span::styled(title, theme::positive().add_modifier(Modifier::BOLD))));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(body, theme::text())));
        }
        DecisionView::Empty => {
            lines.push(Line::from(Span::styled("Nothing to show for this step.", theme::muted())));
        }
    }

    let (close, back) = view::decision_controls(&app.guide);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![button(&back), Span::raw(" "), button(&close)]));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Glossary overlay with its filter field.
pub fn render_glossary(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let glossary = view::glossary(&app.guide);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" Glossary ({}) [Esc]close ", glossary.entries.len()))
        .title_style(theme::accent_bold());

    let field_style = if glossary.field_focused { theme::focused() } else { theme::secondary() };
    let cursor = if glossary.field_focused { "▏" } else { "" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Filter: ", theme::muted()),
            Span::styled(format!("[{}{cursor}]", glossary.query), field_style),
        ]),
        Line::from(""),
    ];
    if glossary.entries.is_empty() {
        lines.push(Line::from(Span::styled("No matching terms.", theme::muted())));
    }
    for (term, definition) in glossary.entries {
        lines.push(Line::from(Span::styled(term, theme::accent_bold())));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(definition, theme::text()),
        ]));
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Blocking notice. Any key dismisses it.
pub fn render_notice(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning())
        .title(" Notice ")
        .title_style(theme::warning().add_modifier(Modifier::BOLD));

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(
        message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme::text()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss...",
        theme::neutral(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}
