//! Application layer: DTOs and use cases.
//!
//! Use cases are thin orchestrators over the repository contracts. Domain
//! rules stay in the entity; the only logic here is wiring input to the
//! entity's mutators and shaping output DTOs.

pub mod dto;
pub mod use_cases;

pub use dto::{CategoryOutput, PaginationOutput};
pub use use_cases::{
    CreateCategory, CreateCategoryInput, DeleteCategory, GetCategory, ListCategories,
    UpdateCategory, UpdateCategoryInput,
};
