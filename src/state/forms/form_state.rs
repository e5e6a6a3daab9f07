//! Form engine: registry, validation and submission behind the render boundary

use super::error::FormError;
use super::field::{FieldDefinition, FieldKind, FieldValue};
use super::registry::FieldRegistry;
use super::submission::{
    AnnouncementChannel, LiveRegion, SubmissionController, SubmissionResult, SubmitPhase,
};
use super::validation::{validate_field, FieldError};

/// Trait for common form focus navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FieldDefinition>;
}

/// A single form instance. All mutation goes through `&mut self`, so the
/// event loop that owns it is the only writer.
#[derive(Debug)]
pub struct FormEngine<C = LiveRegion> {
    registry: FieldRegistry,
    controller: SubmissionController,
    channel: C,
    /// Focus index; `registry.len()` is the submit button
    active_field_index: usize,
}

impl FormEngine<LiveRegion> {
    pub fn new(registry: FieldRegistry) -> Self {
        Self::with_channel(registry, LiveRegion::new())
    }
}

impl<C: AnnouncementChannel> FormEngine<C> {
    pub fn with_channel(registry: FieldRegistry, channel: C) -> Self {
        Self {
            registry,
            controller: SubmissionController::new(),
            channel,
            active_field_index: 0,
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn phase(&self) -> SubmitPhase {
        self.controller.phase()
    }

    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    /// No field currently carries an error
    pub fn is_valid(&self) -> bool {
        self.registry.errors().is_empty()
    }

    /// The error to display for `name`: only once the field is touched
    pub fn visible_error(&self, name: &str) -> Option<&FieldError> {
        if self.registry.is_touched(name) {
            self.registry.error(name)
        } else {
            None
        }
    }

    /// Value changed (typing, picking, toggling). Re-validates the field
    /// but leaves the touched flag alone.
    pub fn on_change(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInProgress);
        }
        self.registry.set_value(name, value, false)?;
        self.revalidate(name)
    }

    /// Field lost focus: mark it touched and re-validate
    pub fn on_blur(&mut self, name: &str) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInProgress);
        }
        self.registry.touch(name)?;
        self.revalidate(name)
    }

    /// Submit attempt. `Accepted` hands back the snapshot for the submit
    /// callback; the caller reports its completion through
    /// [`complete_submission`](Self::complete_submission) or
    /// [`fail_submission`](Self::fail_submission).
    pub fn on_submit(&mut self) -> Result<SubmissionResult, FormError> {
        self.controller.begin(&mut self.registry, &mut self.channel)
    }

    pub fn complete_submission(&mut self) -> bool {
        let completed = self
            .controller
            .complete(&mut self.registry, &mut self.channel);
        if completed {
            self.active_field_index = 0;
        }
        completed
    }

    pub fn fail_submission(&mut self, reason: &str) -> bool {
        self.controller.fail(&mut self.channel, reason)
    }

    fn revalidate(&mut self, name: &str) -> Result<(), FormError> {
        let value = self.registry.get_value(name)?;
        let error = validate_field(&self.registry, name, value)?;
        tracing::debug!(field = name, valid = error.is_none(), "field validated");
        self.registry.set_error(name, error)
    }

    /// Returns true if the submit button is focused
    pub fn is_submit_button_active(&self) -> bool {
        self.active_field_index == self.registry.len()
    }

    pub fn active_definition(&self) -> Option<&FieldDefinition> {
        self.get_field(self.active_field_index)
    }

    /// Move focus forward, blurring the field that is left
    pub fn focus_next(&mut self) -> Result<(), FormError> {
        self.blur_active()?;
        self.next_field();
        Ok(())
    }

    /// Move focus backward, blurring the field that is left
    pub fn focus_prev(&mut self) -> Result<(), FormError> {
        self.blur_active()?;
        self.prev_field();
        Ok(())
    }

    fn blur_active(&mut self) -> Result<(), FormError> {
        match self.active_definition().map(|d| d.name.clone()) {
            Some(name) => self.on_blur(&name),
            None => Ok(()),
        }
    }

    fn change_active(
        &mut self,
        edit: impl FnOnce(&FieldDefinition, &FieldValue) -> Option<FieldValue>,
    ) -> Result<(), FormError> {
        let Some(definition) = self.active_definition() else {
            return Ok(());
        };
        let current = self.registry.get_value(&definition.name)?;
        let Some(next) = edit(definition, current) else {
            return Ok(());
        };
        let name = definition.name.clone();
        self.on_change(&name, next)
    }

    /// Type a character into the focused text field
    pub fn input_char(&mut self, c: char) -> Result<(), FormError> {
        self.change_active(|def, value| def.accepts_text().then(|| value.with_char(c)))
    }

    /// Delete the last character of the focused text field
    pub fn backspace(&mut self) -> Result<(), FormError> {
        self.change_active(|def, value| def.accepts_text().then(|| value.without_last_char()))
    }

    /// Step through the options of the focused choice field
    pub fn cycle_choice(&mut self, forward: bool) -> Result<(), FormError> {
        self.change_active(|def, value| def.cycle_choice(value, forward))
    }

    /// Flip the focused checkbox
    pub fn toggle_checkbox(&mut self) -> Result<(), FormError> {
        self.change_active(|def, value| {
            matches!(def.kind, FieldKind::Checkbox).then(|| value.toggled())
        })
    }
}

impl<C: AnnouncementChannel> Form for FormEngine<C> {
    fn field_count(&self) -> usize {
        self.registry.len() + 1 // fields, submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.registry.len());
    }
    fn get_field(&self, index: usize) -> Option<&FieldDefinition> {
        self.registry.definitions().get(index)
    }
}
