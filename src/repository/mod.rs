//! Repository layer: storage contracts and their backends.
//!
//! [`Repository`] covers basic CRUD; [`SearchableRepository`] adds
//! filter+sort+paginate queries. Backends implement both over an
//! in-process collection ([`in_memory`]) or an embedded relational store
//! ([`sqlite`]). The [`Searchable`] capability trait replaces an abstract
//! base class: each entity type declares its sortable fields, filter
//! predicate, and default ordering once, and both backends honor them.

pub mod in_memory;
pub mod pipeline;
pub mod search;
pub mod sqlite;

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::entity::{Entity, EntityId};
use crate::error::CatalogError;
use crate::repository::search::{SearchParams, SearchResult};

/// Basic CRUD contract implemented by every backend
///
/// Id-targeted operations (`find_by_id`, `update`, `delete`) raise
/// [`CatalogError::NotFound`] carrying the offending id when no record
/// matches.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Persist a new entity
    async fn insert(&self, entity: &E) -> Result<(), CatalogError>;

    /// Fetch an entity by id
    async fn find_by_id(&self, id: &EntityId) -> Result<E, CatalogError>;

    /// Fetch every entity
    async fn find_all(&self) -> Result<Vec<E>, CatalogError>;

    /// Replace the stored state of an existing entity
    async fn update(&self, entity: &E) -> Result<(), CatalogError>;

    /// Remove an entity by id
    async fn delete(&self, id: &EntityId) -> Result<(), CatalogError>;
}

/// Extension for backends that support filter+sort+paginate queries
#[async_trait]
pub trait SearchableRepository<E: Entity>: Repository<E> {
    /// Field names eligible for explicit sort
    fn sortable_fields(&self) -> &'static [&'static str];

    /// Run the filter → sort → paginate pipeline for the given parameters
    async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, CatalogError>;
}

/// Search policy an entity type supplies to generic backends
///
/// This is the backend-adapter requirement: the sortable-fields allow-list,
/// a filter predicate, per-field comparison, and the default ordering used
/// when no valid explicit sort is requested.
pub trait Searchable: Entity {
    /// Ordered set of field names eligible for explicit sort
    fn sortable_fields() -> &'static [&'static str];

    /// Filter predicate applied when a filter term is present
    fn matches_filter(&self, filter: &str) -> bool;

    /// Compare two entities on a field from [`Searchable::sortable_fields`]
    fn compare_field(&self, other: &Self, field: &str) -> Ordering;

    /// Default ordering applied when no valid explicit sort is requested
    fn default_compare(&self, other: &Self) -> Ordering;
}

impl Searchable for Category {
    fn sortable_fields() -> &'static [&'static str] {
        &["name", "created_at"]
    }

    /// Case-insensitive substring match against the name.
    fn matches_filter(&self, filter: &str) -> bool {
        self.name().to_lowercase().contains(&filter.to_lowercase())
    }

    fn compare_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self.name().cmp(other.name()),
            "created_at" => self.created_at().cmp(&other.created_at()),
            _ => Ordering::Equal,
        }
    }

    /// Newest first.
    fn default_compare(&self, other: &Self) -> Ordering {
        other.created_at().cmp(&self.created_at())
    }
}
