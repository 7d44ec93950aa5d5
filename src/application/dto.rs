//! Output shapes returned by use cases.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::entity::Entity;
use crate::repository::search::SearchResult;

/// Flat category view handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryOutput {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

/// Paginated list view with metadata lifted from the search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
}

impl PaginationOutput<CategoryOutput> {
    /// Map a search result page into the output shape.
    pub fn from_result(result: SearchResult<Category>) -> Self {
        Self {
            total: result.total(),
            current_page: result.current_page(),
            per_page: result.per_page(),
            last_page: result.last_page(),
            items: result.items().iter().map(CategoryOutput::from).collect(),
        }
    }
}
