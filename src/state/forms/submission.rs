//! Submission controller and the live-announcement channel

use super::error::FormError;
use super::registry::{FieldRegistry, FieldValues};
use super::validation::{aggregate_message, validate_all, ErrorMap};

/// Message shown after the submit callback completes
pub const SUCCESS_MESSAGE: &str = "Your form has been successfully submitted.";

/// Where the controller is in a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Outcome of one submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    /// Every field valid; the snapshot goes to the submit callback
    Accepted(FieldValues),
    /// At least one field invalid; the callback is not invoked
    Rejected(ErrorMap),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub kind: AnnouncementKind,
    pub text: String,
}

impl Announcement {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AnnouncementKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: AnnouncementKind::Success,
            text: text.into(),
        }
    }
}

/// Single-slot sink read aloud by assistive technology.
/// Every announcement replaces the previous one.
#[cfg_attr(test, mockall::automock)]
pub trait AnnouncementChannel: Send {
    fn announce(&mut self, announcement: Announcement);
    fn clear(&mut self);
    fn current(&self) -> Option<Announcement>;
}

/// Default in-memory live region
#[derive(Debug, Clone, Default)]
pub struct LiveRegion {
    current: Option<Announcement>,
    focus_requested: bool,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once after each announcement; the renderer uses it to draw focus
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

impl AnnouncementChannel for LiveRegion {
    fn announce(&mut self, announcement: Announcement) {
        self.current = Some(announcement);
        self.focus_requested = true;
    }

    fn clear(&mut self) {
        self.current = None;
        self.focus_requested = false;
    }

    fn current(&self) -> Option<Announcement> {
        self.current.clone()
    }
}

/// Idle → Validating → (Idle | Submitting) → Idle state machine.
/// Only one submission may be in flight at a time.
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    phase: SubmitPhase,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Start a submit attempt: touch every field, validate, then either
    /// announce the aggregated errors or clear the channel and move to
    /// Submitting. Fails with `SubmissionInProgress` while already submitting.
    pub fn begin(
        &mut self,
        registry: &mut FieldRegistry,
        channel: &mut dyn AnnouncementChannel,
    ) -> Result<SubmissionResult, FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInProgress);
        }

        self.phase = SubmitPhase::Validating;
        registry.touch_all();

        let values = registry.values_snapshot();
        let errors = validate_all(registry, &values);
        registry.set_errors(errors.clone());

        if let Some(message) = aggregate_message(registry, &errors) {
            tracing::info!(error_count = errors.len(), "submission rejected");
            channel.announce(Announcement::error(message));
            self.phase = SubmitPhase::Idle;
            return Ok(SubmissionResult::Rejected(errors));
        }

        tracing::info!("submission accepted, awaiting submit callback");
        channel.clear();
        self.phase = SubmitPhase::Submitting;
        Ok(SubmissionResult::Accepted(values))
    }

    /// The submit callback finished: clear the channel, reset the form and
    /// become Idle again, then announce success.
    /// Returns false when no submission was pending.
    pub fn complete(
        &mut self,
        registry: &mut FieldRegistry,
        channel: &mut dyn AnnouncementChannel,
    ) -> bool {
        if !self.is_submitting() {
            tracing::warn!(phase = ?self.phase, "completion without a pending submission");
            return false;
        }
        channel.clear();
        registry.reset();
        self.phase = SubmitPhase::Idle;
        channel.announce(Announcement::success(SUCCESS_MESSAGE));
        tracing::info!("submission completed, form reset");
        true
    }

    /// The submit callback failed: keep the values, become Idle, announce why
    pub fn fail(&mut self, channel: &mut dyn AnnouncementChannel, reason: &str) -> bool {
        if !self.is_submitting() {
            tracing::warn!(phase = ?self.phase, "failure without a pending submission");
            return false;
        }
        self.phase = SubmitPhase::Idle;
        channel.announce(Announcement::error(format!("Submission failed: {reason}")));
        tracing::warn!(%reason, "submission failed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::FieldDefinition;
    use crate::state::forms::validation::{accepted, required};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn registry() -> FieldRegistry {
        FieldRegistry::from_definitions(vec![
            FieldDefinition::text("city", "City").validated_by(required("City is required")),
            FieldDefinition::checkbox("terms", "Terms")
                .validated_by(accepted("You must accept the terms and conditions")),
        ])
        .unwrap()
    }

    fn fill(registry: &mut FieldRegistry) {
        registry.set_value("city", "Wien".into(), false).unwrap();
        registry.set_value("terms", true.into(), false).unwrap();
    }

    mod live_region {
        use super::*;

        #[test]
        fn test_new_announcement_replaces_previous() {
            let mut region = LiveRegion::new();
            region.announce(Announcement::error("first"));
            region.announce(Announcement::success("second"));
            assert_eq!(region.current(), Some(Announcement::success("second")));
        }

        #[test]
        fn test_focus_request_is_taken_once() {
            let mut region = LiveRegion::new();
            assert!(!region.take_focus_request());
            region.announce(Announcement::error("x"));
            assert!(region.take_focus_request());
            assert!(!region.take_focus_request());
        }

        #[test]
        fn test_clear_empties_slot() {
            let mut region = LiveRegion::new();
            region.announce(Announcement::error("x"));
            region.clear();
            assert!(region.current().is_none());
            assert!(!region.take_focus_request());
        }
    }

    mod controller {
        use super::*;

        #[test]
        fn test_rejected_submit_touches_all_and_announces() {
            let mut registry = registry();
            let mut controller = SubmissionController::new();
            let mut channel = MockAnnouncementChannel::new();
            channel
                .expect_announce()
                .with(eq(Announcement::error(
                    "The form contains errors: City is required, \
                     You must accept the terms and conditions",
                )))
                .times(1)
                .return_const(());
            channel.expect_clear().never();

            let result = controller.begin(&mut registry, &mut channel).unwrap();

            let SubmissionResult::Rejected(errors) = result else {
                panic!("expected rejection");
            };
            assert_eq!(errors.len(), 2);
            assert!(registry.is_touched("city"));
            assert!(registry.is_touched("terms"));
            assert_eq!(registry.errors(), &errors);
            assert_eq!(controller.phase(), SubmitPhase::Idle);
        }

        #[test]
        fn test_accepted_submit_clears_channel() {
            let mut registry = registry();
            fill(&mut registry);
            let mut controller = SubmissionController::new();
            let mut channel = MockAnnouncementChannel::new();
            channel.expect_clear().times(1).return_const(());
            channel.expect_announce().never();

            let result = controller.begin(&mut registry, &mut channel).unwrap();

            let SubmissionResult::Accepted(values) = result else {
                panic!("expected acceptance");
            };
            assert_eq!(values.get("city").unwrap().as_text(), "Wien");
            assert_eq!(controller.phase(), SubmitPhase::Submitting);
        }

        #[test]
        fn test_begin_while_submitting_is_refused() {
            let mut registry = registry();
            fill(&mut registry);
            let mut controller = SubmissionController::new();
            let mut channel = LiveRegion::new();
            controller.begin(&mut registry, &mut channel).unwrap();

            let second = controller.begin(&mut registry, &mut channel);

            assert_eq!(second, Err(FormError::SubmissionInProgress));
            assert!(controller.is_submitting());
        }

        #[test]
        fn test_complete_clears_then_resets_then_announces() {
            let mut registry = registry();
            fill(&mut registry);
            let mut controller = SubmissionController::new();
            let mut region = LiveRegion::new();
            controller.begin(&mut registry, &mut region).unwrap();

            let mut seq = Sequence::new();
            let mut channel = MockAnnouncementChannel::new();
            channel
                .expect_clear()
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
            channel
                .expect_announce()
                .with(eq(Announcement::success(SUCCESS_MESSAGE)))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());

            assert!(controller.complete(&mut registry, &mut channel));
            assert_eq!(controller.phase(), SubmitPhase::Idle);
            assert_eq!(registry.get_value("city").unwrap().as_text(), "");
            assert!(!registry.is_touched("city"));
        }

        #[test]
        fn test_complete_without_pending_submission() {
            let mut registry = registry();
            let mut controller = SubmissionController::new();
            let mut channel = LiveRegion::new();
            assert!(!controller.complete(&mut registry, &mut channel));
            assert!(channel.current().is_none());
        }

        #[test]
        fn test_fail_keeps_values() {
            let mut registry = registry();
            fill(&mut registry);
            let mut controller = SubmissionController::new();
            let mut channel = LiveRegion::new();
            controller.begin(&mut registry, &mut channel).unwrap();

            assert!(controller.fail(&mut channel, "timeout"));

            assert_eq!(controller.phase(), SubmitPhase::Idle);
            assert_eq!(registry.get_value("city").unwrap().as_text(), "Wien");
            assert_eq!(
                channel.current(),
                Some(Announcement::error("Submission failed: timeout"))
            );
        }
    }
}
