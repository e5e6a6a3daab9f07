//! Field registry: canonical field list plus the live form state
//!
//! Holds the value, touched flag and current error of every registered
//! field. Values and touched flags always carry an entry per field; the error
//! map only carries entries for invalid fields.

use super::error::FormError;
use super::field::{FieldDefinition, FieldValue};
use super::validation::{ErrorMap, FieldError, Validator};
use std::collections::{BTreeMap, HashMap};

/// Snapshot of every field's value, keyed by field name
pub type FieldValues = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    definitions: Vec<FieldDefinition>,
    index: HashMap<String, usize>,
    values: HashMap<String, FieldValue>,
    touched: HashMap<String, bool>,
    errors: ErrorMap,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions, in order
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = FieldDefinition>,
    ) -> Result<Self, FormError> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Add a field with its initial value, untouched and without error
    pub fn register(&mut self, definition: FieldDefinition) -> Result<(), FormError> {
        if self.index.contains_key(&definition.name) {
            return Err(FormError::DuplicateField(definition.name));
        }
        let name = definition.name.clone();
        self.index.insert(name.clone(), self.definitions.len());
        self.values.insert(name.clone(), definition.initial.clone());
        self.touched.insert(name, false);
        self.definitions.push(definition);
        Ok(())
    }

    /// Definitions in registration order
    pub fn definitions(&self) -> &[FieldDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn definition(&self, name: &str) -> Result<&FieldDefinition, FormError> {
        self.index
            .get(name)
            .map(|&i| &self.definitions[i])
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub fn get_value(&self, name: &str) -> Result<&FieldValue, FormError> {
        self.values
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Store a new value. `touch` marks the field touched as well, which
    /// blur and submit do but plain typing does not.
    pub fn set_value(&mut self, name: &str, value: FieldValue, touch: bool) -> Result<(), FormError> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        *slot = value;
        if touch {
            self.touched.insert(name.to_string(), true);
        }
        Ok(())
    }

    pub fn get_validator(&self, name: &str) -> Result<&Validator, FormError> {
        self.definition(name).map(FieldDefinition::validator)
    }

    pub fn touch(&mut self, name: &str) -> Result<(), FormError> {
        let flag = self
            .touched
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        *flag = true;
        Ok(())
    }

    pub fn touch_all(&mut self) {
        for flag in self.touched.values_mut() {
            *flag = true;
        }
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.get(name)
    }

    /// Replace the stored error of one field (None clears it)
    pub fn set_error(&mut self, name: &str, error: Option<FieldError>) -> Result<(), FormError> {
        if !self.index.contains_key(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        match error {
            Some(error) => {
                self.errors.insert(name.to_string(), error);
            }
            None => {
                self.errors.remove(name);
            }
        }
        Ok(())
    }

    /// Replace every stored error; entries for unknown names are dropped
    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.errors = errors
            .into_iter()
            .filter(|(name, _)| self.index.contains_key(name))
            .collect();
    }

    pub fn values_snapshot(&self) -> FieldValues {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Back to initial values, nothing touched, no errors
    pub fn reset(&mut self) {
        for definition in &self.definitions {
            self.values
                .insert(definition.name.clone(), definition.initial.clone());
            self.touched.insert(definition.name.clone(), false);
        }
        self.errors.clear();
    }
}
