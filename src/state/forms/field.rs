//! Form field value objects and definitions

use super::validation::{FieldError, Validator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for boolean fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Bool(_) => "",
        }
    }

    /// Get the boolean value (returns false for text fields)
    pub fn as_bool(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(_) => false,
        }
    }

    /// True for an empty string or an unchecked box
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Bool(b) => !b,
        }
    }

    /// Return a copy with `c` appended (booleans are unchanged)
    pub fn with_char(&self, c: char) -> Self {
        match self {
            FieldValue::Text(s) => {
                let mut s = s.clone();
                s.push(c);
                FieldValue::Text(s)
            }
            FieldValue::Bool(_) => self.clone(),
        }
    }

    /// Return a copy with the last character removed
    pub fn without_last_char(&self) -> Self {
        match self {
            FieldValue::Text(s) => {
                let mut s = s.clone();
                s.pop();
                FieldValue::Text(s)
            }
            FieldValue::Bool(_) => self.clone(),
        }
    }

    /// Return the negated value for booleans
    pub fn toggled(&self) -> Self {
        match self {
            FieldValue::Bool(b) => FieldValue::Bool(!b),
            FieldValue::Text(_) => self.clone(),
        }
    }
}

/// One selectable option of a choice field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// How a field is edited and rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Pick one of a fixed set; the empty string means nothing chosen yet
    Choice(Vec<ChoiceOption>),
    Checkbox,
}

/// A registered field: its name, presentation, initial value and validator
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub initial: FieldValue,
    pub required: bool,
    validator: Validator,
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("initial", &self.initial)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

impl FieldDefinition {
    fn new(name: &str, label: &str, kind: FieldKind, initial: FieldValue) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            initial,
            required: false,
            validator: Arc::new(|_: &FieldValue| -> Option<FieldError> { None }),
        }
    }

    /// Create a single-line text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text, FieldValue::default())
    }

    /// Create a multiline text field
    pub fn multiline(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Multiline, FieldValue::default())
    }

    /// Create a choice field with nothing selected
    pub fn choice(name: &str, label: &str, options: &[ChoiceOption]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Choice(options.to_vec()),
            FieldValue::default(),
        )
    }

    /// Create an unchecked checkbox
    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox, FieldValue::Bool(false))
    }

    /// Mark the field as required (rendering hint; the rule lives in the validator)
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_initial(mut self, initial: impl Into<FieldValue>) -> Self {
        self.initial = initial.into();
        self
    }

    pub fn validated_by(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Run this field's validator
    pub fn validate(&self, value: &FieldValue) -> Option<FieldError> {
        (self.validator)(value)
    }

    /// Whether `value` has the right shape for this field: a boolean for a
    /// checkbox, text otherwise, and for a choice either nothing or one of
    /// its option values
    pub fn accepts_value(&self, value: &FieldValue) -> bool {
        match (&self.kind, value) {
            (FieldKind::Checkbox, FieldValue::Bool(_)) => true,
            (FieldKind::Text | FieldKind::Multiline, FieldValue::Text(_)) => true,
            (FieldKind::Choice(options), FieldValue::Text(s)) => {
                s.is_empty() || options.iter().any(|o| o.value == s.as_str())
            }
            _ => false,
        }
    }

    pub fn accepts_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Multiline)
    }

    /// The option after (or before) `current`, wrapping around.
    /// Returns None for non-choice fields.
    pub fn cycle_choice(&self, current: &FieldValue, forward: bool) -> Option<FieldValue> {
        let FieldKind::Choice(options) = &self.kind else {
            return None;
        };
        if options.is_empty() {
            return None;
        }
        let count = options.len();
        let next = match options.iter().position(|o| o.value == current.as_text()) {
            Some(i) if forward => (i + 1) % count,
            Some(0) => count - 1,
            Some(i) => i - 1,
            None if forward => 0,
            None => count - 1,
        };
        Some(FieldValue::from(options[next].value))
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &FieldValue) -> String {
        match (&self.kind, value) {
            (FieldKind::Checkbox, v) => {
                if v.as_bool() {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            (FieldKind::Choice(options), v) => options
                .iter()
                .find(|o| o.value == v.as_text())
                .map(|o| format!("< {} >", o.label))
                .unwrap_or_else(|| "< -- Select -- >".to_string()),
            (_, v) => v.as_text().to_string(),
        }
    }
}
