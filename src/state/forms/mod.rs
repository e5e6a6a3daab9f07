//! Form domain layer
//!
//! A small form state engine: the field registry holds values, touched
//! flags and errors; validators are plain functions; the submission
//! controller runs the submit state machine and writes to a live region.

mod contact;
mod error;
mod field;
mod form_state;
mod registry;
mod submission;
mod validation;

pub use contact::{contact_fields, contact_form, DEPARTMENTS, GENDERS};
pub use error::FormError;
pub use field::{ChoiceOption, FieldDefinition, FieldKind, FieldValue};
pub use form_state::{Form, FormEngine};
pub use registry::{FieldRegistry, FieldValues};
pub use submission::{
    Announcement, AnnouncementChannel, AnnouncementKind, LiveRegion, SubmissionController,
    SubmissionResult, SubmitPhase, SUCCESS_MESSAGE,
};
pub use validation::{
    aggregate_message, validate_all, validate_field, ErrorMap, FieldError, FieldErrorKind,
    PostalCodeDigits, ValidationRules, Validator,
};
