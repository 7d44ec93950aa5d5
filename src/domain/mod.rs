//! Domain layer: entity identity, validation, and the category entity.

pub mod category;
pub mod entity;
pub mod validation;

pub use category::{Category, CategoryProps};
pub use entity::{Entity, EntityId};
pub use validation::Validator;
