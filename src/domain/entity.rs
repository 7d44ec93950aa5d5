//! Entity identity.
//!
//! Every entity carries an [`EntityId`]: a version 4 UUID in its canonical
//! hyphenated form. Identity is assigned at construction and never changes.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

/// Unique entity identifier (UUID v4)
///
/// # Examples
///
/// ```
/// use catalog_core::EntityId;
///
/// let id = EntityId::new();
/// let parsed = EntityId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        EntityId(Uuid::new_v4())
    }

    /// Parse an identifier from its canonical text form.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidId`] when the input is not a valid
    /// hyphenated UUID.
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        Uuid::parse_str(value)
            .map(EntityId)
            .map_err(|_| CatalogError::InvalidId(value.to_string()))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Core trait for domain entities
///
/// An entity has a durable identity distinct from its attribute values.
pub trait Entity: Clone + Send + Sync {
    /// Returns the entity's unique identifier
    fn id(&self) -> &EntityId;
}
