//! Field rendering utilities for forms

use crate::state::{FieldDefinition, FieldError, FieldKind, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw one form field. A visible error turns the border red and is
/// written into the bottom border.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDefinition,
    value: &FieldValue,
    error: Option<&FieldError>,
    is_active: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let border_style = match (is_active, error.is_some()) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let cursor = if is_active && field.accepts_text() {
        "▌"
    } else {
        ""
    };
    let required = if field.required { " *" } else { "" };

    let content = match field.kind {
        FieldKind::Multiline => {
            let mut lines: Vec<Line> = value
                .as_text()
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), style)))
                .collect();
            // `lines()` drops a trailing empty line; keep the cursor on it
            if value.as_text().ends_with('\n') || lines.is_empty() {
                lines.push(Line::default());
            }
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
            Paragraph::new(lines)
        }
        FieldKind::Checkbox => Paragraph::new(Line::from(vec![
            Span::styled(field.display_value(value), style),
            Span::styled(format!(" {}{required}", field.label), style),
        ])),
        _ => Paragraph::new(Line::from(vec![
            Span::styled(field.display_value(value), style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if !matches!(field.kind, FieldKind::Checkbox) {
        block = block.title(format!(" {}{required} ", field.label));
    }
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
