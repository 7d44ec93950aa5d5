//! # Catalog Core
//!
//! Layered category catalog backend: validated domain entities, a generic
//! searchable repository contract, and interchangeable in-memory and SQLite
//! storage backends behind thin use cases.
//!
//! See [README on GitHub](https://github.com/microscaler/catalog-core) for full architecture.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;

pub use application::{
    CategoryOutput, CreateCategory, CreateCategoryInput, DeleteCategory, GetCategory,
    ListCategories, PaginationOutput, UpdateCategory, UpdateCategoryInput,
};
pub use config::StorageConfig;
pub use domain::category::{Category, CategoryProps};
pub use domain::entity::{Entity, EntityId};
pub use domain::validation::Validator;
pub use error::{CatalogError, FieldErrors};
pub use repository::in_memory::{CategoryInMemoryRepository, InMemoryRepository};
pub use repository::search::{SearchInput, SearchParams, SearchResult, SortDirection};
pub use repository::sqlite::CategorySqliteRepository;
pub use repository::{Repository, Searchable, SearchableRepository};
