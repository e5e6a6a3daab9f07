//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod live_region;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (live_area, form_area) = layout::create_layout(area);

    live_region::draw(frame, live_area, app);
    forms::draw_contact_form(frame, form_area, app);

    // Draw status bar
    layout::draw_status_bar(frame, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::submit::SimulatedSubmitter;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    /// Render the app into an in-memory buffer and return its text
    pub(crate) fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    pub(crate) fn app() -> App {
        let handler = Arc::new(SimulatedSubmitter::new(Duration::ZERO));
        App::new(&FormConfig::default(), handler).unwrap()
    }

    #[test]
    fn test_draws_every_field_label() {
        let screen = render(&app(), 120, 30);
        for label in [
            "Subject",
            "Gender",
            "Department",
            "Message",
            "First Name",
            "Last Name",
            "Postal Code",
            "City",
            "Street",
            "Email",
            "Telephone",
            "I agree to the terms and conditions",
            "Submit",
        ] {
            assert!(screen.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut app = app();
        let screen = render(&app, 120, 30);
        assert!(!screen.contains("Subject is required"));

        app.form.on_blur("subject").unwrap();
        let screen = render(&app, 120, 30);
        assert!(screen.contains("Subject is required"));
    }

    #[test]
    fn test_live_region_shows_announcement() {
        let mut app = app();
        app.form.on_submit().unwrap();
        let screen = render(&app, 200, 30);
        assert!(screen.contains("The form contains errors"));
    }
}
