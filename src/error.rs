//! Crate-wide error taxonomy.
//!
//! Every fallible operation in the catalog core surfaces a [`CatalogError`].
//! The taxonomy deliberately separates `Validation` (bad new input) from
//! `Load` (persisted data that no longer passes current validation rules) so
//! callers can alert on data corruption distinctly from rejecting requests.

use std::collections::BTreeMap;
use std::fmt;

/// Field-keyed validation messages.
///
/// A field may carry several simultaneous violations. `BTreeMap` keeps
/// iteration order deterministic for serialization and tests.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error type for all catalog operations
#[derive(Debug)]
pub enum CatalogError {
    /// Entity construction or mutation rejected new input
    Validation(FieldErrors),
    /// A persisted record no longer satisfies current validation rules
    Load(FieldErrors),
    /// An id-targeted repository operation matched no record
    NotFound(String),
    /// An identifier is not a canonical UUID
    InvalidId(String),
    /// Backend/storage failure
    Storage(String),
}

impl CatalogError {
    /// Build a `NotFound` error carrying the offending id.
    pub fn not_found(id: impl fmt::Display) -> Self {
        CatalogError::NotFound(id.to_string())
    }

    /// Build a `Storage` error from any displayable cause.
    pub fn storage(cause: impl fmt::Display) -> Self {
        CatalogError::Storage(cause.to_string())
    }

    /// Reclassify a validation failure raised while reconstructing a
    /// persisted row into a `Load` failure. Other variants pass through.
    pub fn into_load(self) -> Self {
        match self {
            CatalogError::Validation(errors) => CatalogError::Load(errors),
            other => other,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation(errors) => {
                write!(f, "Entity validation error: {}", render_fields(errors))
            }
            CatalogError::Load(errors) => {
                write!(f, "An entity could not be loaded: {}", render_fields(errors))
            }
            CatalogError::NotFound(id) => {
                write!(f, "Entity not found using ID {id}")
            }
            CatalogError::InvalidId(value) => {
                write!(f, "ID must be a valid UUID, got '{value}'")
            }
            CatalogError::Storage(cause) => {
                write!(f, "Storage error: {cause}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

fn render_fields(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: [{}]", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
