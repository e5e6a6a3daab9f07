//! Layout components (live region, form body, status bar)

use crate::app::App;
use crate::state::FieldKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Height of the live region box
const LIVE_REGION_HEIGHT: u16 = 3;

/// Split the screen into (live region, form body), leaving the last line
/// for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LIVE_REGION_HEIGHT), // Live region
            Constraint::Min(0),                     // Form
            Constraint::Length(1),                  // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Submission state
    let state = if app.form.is_submitting() {
        Span::styled(" ● ", Style::default().fg(Color::Yellow))
    } else if app.form.is_valid() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(state);

    spans.push(Span::styled(
        get_field_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let quit_hint = " Esc:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the focused field
fn get_field_hints(app: &App) -> String {
    let Some(definition) = app.form.active_definition() else {
        return "Enter:submit  Tab:next  Shift+Tab:prev".to_string();
    };
    match definition.kind {
        FieldKind::Text => "Type to edit  Tab:next  ^S:submit".to_string(),
        FieldKind::Multiline => "Type to edit  Enter:newline  Tab:next  ^S:submit".to_string(),
        FieldKind::Choice(_) => "←/→:choose  Tab:next  ^S:submit".to_string(),
        FieldKind::Checkbox => "Space:toggle  Tab:next  ^S:submit".to_string(),
    }
}
