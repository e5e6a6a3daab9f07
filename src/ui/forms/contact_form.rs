//! Contact form rendering

use super::field_renderer::draw_field;
use crate::app::App;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Fields per row, with the row height
const ROWS: &[(&[&str], u16)] = &[
    (&["subject", "gender", "department"], 3),
    (&["message"], 5),
    (&["firstName", "lastName", "postalCode"], 3),
    (&["city", "street", "email"], 3),
    (&["telephone", "terms"], 3),
];

/// Draw the contact form
pub fn draw_contact_form(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints: Vec<Constraint> = ROWS
        .iter()
        .map(|(_, height)| Constraint::Length(*height))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let registry = app.form.registry();
    let active = app.form.active_definition().map(|d| d.name.as_str());

    for (row, (names, _)) in ROWS.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, names.len() as u32); names.len()])
            .split(chunks[row]);

        for (cell, name) in cells.iter().zip(names.iter()) {
            // Unregistered names are skipped rather than drawn empty
            let (Ok(definition), Ok(value)) =
                (registry.definition(name), registry.get_value(name))
            else {
                continue;
            };
            draw_field(
                frame,
                *cell,
                definition,
                value,
                app.form.visible_error(name),
                active == Some(*name),
            );
        }
    }

    draw_submit_row(frame, chunks[ROWS.len()], app);
}

fn draw_submit_row(frame: &mut Frame, area: Rect, app: &App) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(area);

    let is_enabled = app.form.is_valid() && !app.form.is_submitting();
    let label = if app.form.is_submitting() {
        "Sending..."
    } else {
        "Submit"
    };
    render_button(
        frame,
        cells[0],
        label,
        app.form.is_submit_button_active(),
        is_enabled,
    );

    let help = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("* ", Style::default().fg(Color::Cyan)),
        Span::raw("required"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, cells[1].inner(Margin::new(0, 1)));
}
