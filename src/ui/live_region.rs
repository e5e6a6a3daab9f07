//! Assertive live region: the single line where errors and success are announced

use crate::app::App;
use crate::state::{AnnouncementChannel, AnnouncementKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let announcement = app.form.channel().current();

    let text_style = match announcement.as_ref().map(|a| a.kind) {
        Some(AnnouncementKind::Error) => Style::default().fg(Color::Red),
        Some(AnnouncementKind::Success) => Style::default().fg(Color::Green),
        None => Style::default(),
    };

    // An announcement asks for focus until the next key press
    let border_style = if app.live_region_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(" Contact Form ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let text = announcement.map(|a| a.text).unwrap_or_default();
    let paragraph = Paragraph::new(text)
        .style(text_style.add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, area);
}
