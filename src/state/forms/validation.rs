//! Field validators and the validation evaluator
//!
//! Every rule is an independent pure function of a single field value that
//! returns an optional [`FieldError`]. The evaluator runs them in registry
//! order and collects only the failures.

use super::error::FormError;
use super::field::FieldValue;
use super::registry::{FieldRegistry, FieldValues};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Pure check of one field value
pub type Validator = Arc<dyn Fn(&FieldValue) -> Option<FieldError> + Send + Sync>;

/// Field name to error; a missing key means the field is valid
pub type ErrorMap = HashMap<String, FieldError>;

static POSTAL_CODE_4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("postal code pattern"));
static POSTAL_CODE_5: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("postal code pattern"));
static TELEPHONE_WITH_PLUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d+$").expect("telephone pattern"));
static TELEPHONE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("telephone pattern"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[A-Za-z]{2,}$").expect("email pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Empty text, or an unchecked acceptance box
    FieldRequired,
    /// Non-empty value that does not match the expected shape
    FieldFormatInvalid,
}

/// A validation failure with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::FieldRequired,
            message: message.into(),
        }
    }

    pub fn format_invalid(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::FieldFormatInvalid,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Number of digits a postal code must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PostalCodeDigits {
    Four,
    Five,
}

impl PostalCodeDigits {
    pub fn count(self) -> u8 {
        match self {
            PostalCodeDigits::Four => 4,
            PostalCodeDigits::Five => 5,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            PostalCodeDigits::Four => &*POSTAL_CODE_4,
            PostalCodeDigits::Five => &*POSTAL_CODE_5,
        }
    }
}

impl TryFrom<u8> for PostalCodeDigits {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(PostalCodeDigits::Four),
            5 => Ok(PostalCodeDigits::Five),
            n => Err(format!("postal code digits must be 4 or 5, got {n}")),
        }
    }
}

impl From<PostalCodeDigits> for u8 {
    fn from(value: PostalCodeDigits) -> Self {
        value.count()
    }
}

/// Pattern strictness for the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub postal_code_digits: PostalCodeDigits,
    pub telephone_allows_leading_plus: bool,
}

impl ValidationRules {
    /// Four-digit postal codes, telephone may start with `+`
    pub const LENIENT: Self = Self {
        postal_code_digits: PostalCodeDigits::Four,
        telephone_allows_leading_plus: true,
    };

    /// Five-digit postal codes, digits only
    pub const STRICT: Self = Self {
        postal_code_digits: PostalCodeDigits::Five,
        telephone_allows_leading_plus: false,
    };
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::LENIENT
    }
}

/// Empty text or `false` fails with `message`
pub fn required(message: &str) -> Validator {
    let message = message.to_string();
    Arc::new(move |value: &FieldValue| value.is_blank().then(|| FieldError::required(&message)))
}

/// Only `true` passes; used for terms-style checkboxes
pub fn accepted(message: &str) -> Validator {
    let message = message.to_string();
    Arc::new(move |value: &FieldValue| (!value.as_bool()).then(|| FieldError::required(&message)))
}

/// Non-empty text must match `pattern`; empty text is left to [`required`]
pub fn matches(pattern: &'static Regex, message: &str) -> Validator {
    let message = message.to_string();
    Arc::new(move |value: &FieldValue| {
        let text = value.as_text();
        (!text.is_empty() && !pattern.is_match(text)).then(|| FieldError::format_invalid(&message))
    })
}

pub fn email(message: &str) -> Validator {
    matches(&*EMAIL, message)
}

pub fn postal_code(digits: PostalCodeDigits) -> Validator {
    let message = format!("Postal code must be a {}-digit number", digits.count());
    matches(digits.pattern(), &message)
}

pub fn telephone(allow_leading_plus: bool) -> Validator {
    let pattern: &'static Regex = if allow_leading_plus {
        &*TELEPHONE_WITH_PLUS
    } else {
        &*TELEPHONE_DIGITS
    };
    matches(pattern, "Telephone must contain only numbers")
}

/// Run validators in order; the first failure wins
pub fn all(validators: Vec<Validator>) -> Validator {
    Arc::new(move |value: &FieldValue| validators.iter().find_map(|v| v(value)))
}

/// Run the validator registered for `name` against `value`
pub fn validate_field(
    registry: &FieldRegistry,
    name: &str,
    value: &FieldValue,
) -> Result<Option<FieldError>, FormError> {
    let validator = registry.get_validator(name)?;
    Ok(validator(value))
}

/// Run every validator; only failing fields appear in the result.
/// Fields missing from `values` are checked against their initial value.
pub fn validate_all(registry: &FieldRegistry, values: &FieldValues) -> ErrorMap {
    registry
        .definitions()
        .iter()
        .filter_map(|def| {
            let value = values.get(&def.name).unwrap_or(&def.initial);
            def.validate(value).map(|err| (def.name.clone(), err))
        })
        .collect()
}

/// Join every error message in registry order, for the live region
pub fn aggregate_message(registry: &FieldRegistry, errors: &ErrorMap) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    let list: Vec<&str> = registry
        .definitions()
        .iter()
        .filter_map(|def| errors.get(&def.name))
        .map(|err| err.message.as_str())
        .collect();
    Some(format!("The form contains errors: {}", list.join(", ")))
}
