//! Field validation.
//!
//! An explicit, ordered list of rules per field, evaluated by a plain
//! accumulator that yields a field-keyed error map. Entities run their
//! rules through a [`Validator`] before assigning any state.

use crate::error::{CatalogError, FieldErrors};

/// Accumulates rule failures keyed by field name.
///
/// Rules are chainable and side-effect free until [`Validator::finish`],
/// which either passes or raises a single `Validation` failure carrying
/// every collected message.
///
/// # Examples
///
/// ```
/// use catalog_core::Validator;
///
/// let mut v = Validator::new();
/// v.required("name", "").max_length("name", "", 255);
/// assert!(v.finish().is_err());
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule: the value must not be the empty string.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.add(field, format!("{field} should not be empty"));
        }
        self
    }

    /// Rule: the value must not exceed `max` characters.
    pub fn max_length(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.add(
                field,
                format!("{field} must be shorter than or equal to {max} characters"),
            );
        }
        self
    }

    /// Record an arbitrary failure message for a field.
    pub fn add(&mut self, field: &str, message: String) -> &mut Self {
        self.errors.entry(field.to_string()).or_default().push(message);
        self
    }

    /// True when no rule has failed so far.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the validator, failing with every collected message.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when at least one rule failed.
    pub fn finish(self) -> Result<(), CatalogError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation(self.errors))
        }
    }
}
