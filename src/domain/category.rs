//! Category entity.
//!
//! A category holds a required `name` (non-empty, at most 255 characters),
//! an optional `description`, an active flag defaulting to `true`, and a
//! creation timestamp defaulting to construction time. Every construction
//! and every `update` call runs validation before assigning any state, so
//! an entity is never left partially mutated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entity::{Entity, EntityId};
use crate::domain::validation::Validator;
use crate::error::CatalogError;

/// Loose property bag for constructing a [`Category`].
///
/// Absent `is_active` defaults to `true`; absent `created_at` defaults to
/// the construction instant.
#[derive(Debug, Clone, Default)]
pub struct CategoryProps {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CategoryProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Category entity
///
/// Identity is immutable once assigned; properties change only through the
/// explicit mutators below.
///
/// # Examples
///
/// ```
/// use catalog_core::{Category, CategoryProps};
///
/// let mut category = Category::new(CategoryProps::new("Movie")).unwrap();
/// category.update("Documentary".to_string(), None).unwrap();
/// category.deactivate();
/// assert!(!category.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    id: EntityId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Create a category with a freshly generated identity.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the properties violate
    /// field rules; no entity is produced in that case.
    pub fn new(props: CategoryProps) -> Result<Self, CatalogError> {
        Self::with_id(EntityId::new(), props)
    }

    /// Reconstruct a category under an existing identity.
    ///
    /// This is the mapping path for persisted rows; it applies exactly the
    /// same validation as [`Category::new`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the properties violate
    /// field rules.
    pub fn with_id(id: EntityId, props: CategoryProps) -> Result<Self, CatalogError> {
        Self::validate(&props.name)?;

        Ok(Self {
            id,
            name: props.name,
            description: props.description,
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        })
    }

    fn validate(name: &str) -> Result<(), CatalogError> {
        let mut validator = Validator::new();
        validator.required("name", name).max_length("name", name, 255);
        validator.finish()
    }

    /// Replace name and description.
    ///
    /// Validation runs first; on failure the entity keeps its previous
    /// state. Passing `None` for `description` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the new name violates
    /// field rules.
    pub fn update(&mut self, name: String, description: Option<String>) -> Result<(), CatalogError> {
        Self::validate(&name)?;

        self.name = name;
        self.description = description;
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Category {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
