//! The contact form: twelve fields and their validation rules

use super::error::FormError;
use super::field::{ChoiceOption, FieldDefinition};
use super::form_state::FormEngine;
use super::registry::{FieldRegistry, FieldValues};
use super::validation::{self as rules, ValidationRules};

pub const GENDERS: &[ChoiceOption] = &[
    ChoiceOption {
        value: "man",
        label: "Man",
    },
    ChoiceOption {
        value: "woman",
        label: "Woman",
    },
    ChoiceOption {
        value: "other",
        label: "Other",
    },
];

pub const DEPARTMENTS: &[ChoiceOption] = &[
    ChoiceOption {
        value: "health",
        label: "Health Department",
    },
    ChoiceOption {
        value: "education",
        label: "Education Department",
    },
    ChoiceOption {
        value: "transport",
        label: "Transport Department",
    },
    ChoiceOption {
        value: "immigration",
        label: "Immigration Office",
    },
];

fn required_text(name: &str, label: &str, message: &str) -> FieldDefinition {
    FieldDefinition::text(name, label)
        .required()
        .validated_by(rules::required(message))
}

/// Field definitions in display and tab order
pub fn contact_fields(strictness: ValidationRules) -> Vec<FieldDefinition> {
    vec![
        required_text("subject", "Subject", "Subject is required"),
        FieldDefinition::choice("gender", "Gender", GENDERS)
            .required()
            .validated_by(rules::required("Gender is required")),
        FieldDefinition::choice("department", "Department", DEPARTMENTS)
            .required()
            .validated_by(rules::required("Please select a department")),
        FieldDefinition::multiline("message", "Message")
            .required()
            .validated_by(rules::required("Message is required")),
        required_text("firstName", "First Name", "First name is required"),
        required_text("lastName", "Last Name", "Last name is required"),
        FieldDefinition::text("postalCode", "Postal Code")
            .required()
            .validated_by(rules::all(vec![
                rules::required("Postal code is required"),
                rules::postal_code(strictness.postal_code_digits),
            ])),
        required_text("city", "City", "City is required"),
        required_text("street", "Street", "Street is required"),
        FieldDefinition::text("email", "Email")
            .required()
            .validated_by(rules::all(vec![
                rules::required("Email is required"),
                rules::email("Invalid email address"),
            ])),
        FieldDefinition::text("telephone", "Telephone")
            .required()
            .validated_by(rules::all(vec![
                rules::required("Telephone is required"),
                rules::telephone(strictness.telephone_allows_leading_plus),
            ])),
        FieldDefinition::checkbox("terms", "I agree to the terms and conditions")
            .required()
            .validated_by(rules::accepted("You must accept the terms and conditions")),
    ]
}

/// A contact form engine whose fields start from, and reset to, `initial`.
///
/// Fields missing from `initial` start blank. Unknown names and values of
/// the wrong shape are rejected.
pub fn contact_form(
    strictness: ValidationRules,
    initial: &FieldValues,
) -> Result<FormEngine, FormError> {
    let definitions = contact_fields(strictness);
    for (name, value) in initial {
        let definition = definitions
            .iter()
            .find(|d| &d.name == name)
            .ok_or_else(|| FormError::UnknownField(name.clone()))?;
        if !definition.accepts_value(value) {
            return Err(FormError::InitialValueMismatch(name.clone()));
        }
    }
    let definitions = definitions
        .into_iter()
        .map(|d| match initial.get(&d.name) {
            Some(value) => d.with_initial(value.clone()),
            None => d,
        });
    let registry = FieldRegistry::from_definitions(definitions)?;
    Ok(FormEngine::new(registry))
}
