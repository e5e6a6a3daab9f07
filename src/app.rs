//! Application state and core logic

use crate::config::FormConfig;
use crate::state::{contact_form, FieldKind, FormEngine, FormError, SubmissionResult};
use crate::submit::SubmitHandler;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of one submit callback, as reported back to the event loop
type SubmitOutcome = std::result::Result<(), String>;

/// Main application struct
pub struct App {
    /// The contact form engine; only the event loop mutates it
    pub form: FormEngine,
    /// Submit callback supplied by the embedder
    handler: Arc<dyn SubmitHandler>,
    /// Whether the app should quit
    quit: bool,
    /// Transient status line text
    pub status_message: Option<String>,
    /// Whether the live region should be drawn focused
    pub live_region_focused: bool,
    completion_tx: mpsc::UnboundedSender<SubmitOutcome>,
    completion_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &FormConfig, handler: Arc<dyn SubmitHandler>) -> Result<Self> {
        let rules = config.validation_rules();
        tracing::info!(
            postal_code_digits = rules.postal_code_digits.count(),
            telephone_allows_leading_plus = rules.telephone_allows_leading_plus,
            "building contact form"
        );
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Ok(Self {
            form: contact_form(rules, &config.initial_values)?,
            handler,
            quit: false,
            status_message: None,
            live_region_focused: false,
            completion_tx,
            completion_rx,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.live_region_focused = false;

        let result = match key.code {
            KeyCode::Esc => {
                self.quit = true;
                Ok(())
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit();
                Ok(())
            }
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            // The button is disabled while the form is invalid; Ctrl+S still submits
            KeyCode::Enter if self.form.is_submit_button_active() => {
                if self.form.is_valid() {
                    self.submit();
                }
                Ok(())
            }
            _ => self.edit_active_field(key),
        };

        match result {
            // Read-only while the submit callback runs
            Err(FormError::SubmissionInProgress) => {
                tracing::debug!(?key, "input ignored while submitting");
                Ok(())
            }
            other => other.map_err(Into::into),
        }
    }

    fn edit_active_field(&mut self, key: KeyEvent) -> std::result::Result<(), FormError> {
        let Some(kind) = self.form.active_definition().map(|d| d.kind.clone()) else {
            return Ok(());
        };
        match (kind, key.code) {
            (FieldKind::Choice(_), KeyCode::Right | KeyCode::Char(' ')) => {
                self.form.cycle_choice(true)
            }
            (FieldKind::Choice(_), KeyCode::Left) => self.form.cycle_choice(false),
            (FieldKind::Checkbox, KeyCode::Char(' ') | KeyCode::Enter) => {
                self.form.toggle_checkbox()
            }
            (FieldKind::Multiline, KeyCode::Enter) => self.form.input_char('\n'),
            (FieldKind::Text | FieldKind::Multiline, KeyCode::Char(c))
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.form.input_char(c)
            }
            (FieldKind::Text | FieldKind::Multiline, KeyCode::Backspace) => self.form.backspace(),
            _ => Ok(()),
        }
    }

    /// Attempt a submission. Accepted values go to the submit handler on a
    /// separate task; its outcome comes back through the completion channel.
    pub fn submit(&mut self) {
        match self.form.on_submit() {
            Ok(SubmissionResult::Accepted(values)) => {
                self.status_message = Some("Submitting...".to_string());
                let handler = Arc::clone(&self.handler);
                let tx = self.completion_tx.clone();
                tokio::spawn(async move {
                    // Inner task so a panicking handler still reports back
                    let outcome = match tokio::spawn(async move { handler.submit(values).await })
                        .await
                    {
                        Ok(result) => result.map_err(|e| e.to_string()),
                        Err(e) if e.is_panic() => {
                            tracing::error!("submit handler panicked");
                            Err("submit handler panicked".to_string())
                        }
                        Err(e) => {
                            tracing::warn!("submit handler cancelled: {e}");
                            Err("submission cancelled".to_string())
                        }
                    };
                    // Receiver only goes away when the app shuts down
                    let _ = tx.send(outcome);
                });
            }
            Ok(SubmissionResult::Rejected(_)) => {
                self.status_message = None;
                self.live_region_focused = self.form.channel_mut().take_focus_request();
            }
            Err(FormError::SubmissionInProgress) => {
                tracing::debug!("submit ignored, submission already in progress");
            }
            Err(e) => {
                tracing::warn!("submit failed: {e}");
                self.status_message = Some(format!("Submit failed: {e}"));
            }
        }
    }

    /// Apply any finished submissions. Called once per event loop turn.
    pub fn poll_submission(&mut self) {
        while let Ok(outcome) = self.completion_rx.try_recv() {
            self.apply_submit_outcome(outcome);
        }
    }

    fn apply_submit_outcome(&mut self, outcome: SubmitOutcome) {
        let applied = match outcome {
            Ok(()) => self.form.complete_submission(),
            Err(reason) => self.form.fail_submission(&reason),
        };
        if applied {
            self.status_message = None;
            self.live_region_focused = self.form.channel_mut().take_focus_request();
        }
    }
}
