//! Errors raised by the form engine itself
//!
//! Field-level validation failures are not errors in this sense; they are
//! reported as [`FieldError`](super::FieldError) values and shown inline.

use thiserror::Error;

/// Misuse of the form engine or a rejected state transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field name that was never registered
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// Two definitions with the same name
    #[error("field `{0}` is already registered")]
    DuplicateField(String),

    /// An initial value of the wrong shape for its field
    #[error("initial value for `{0}` does not fit the field")]
    InitialValueMismatch(String),

    /// Submit or edit attempted while a submission is in flight
    #[error("a submission is already in progress")]
    SubmissionInProgress,
}
