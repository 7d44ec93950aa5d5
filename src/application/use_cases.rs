//! Category use cases.
//!
//! Each use case owns a shared repository handle and exposes a single
//! `execute`. Identity strings are parsed at this boundary, so backends
//! only ever see well-formed ids.

use std::sync::Arc;

use log::info;
use serde::Deserialize;

use crate::application::dto::{CategoryOutput, PaginationOutput};
use crate::domain::category::{Category, CategoryProps};
use crate::domain::entity::{Entity, EntityId};
use crate::error::CatalogError;
use crate::repository::search::{SearchInput, SearchParams};
use crate::repository::{Repository, SearchableRepository};

/// Input for [`CreateCategory`]
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Create a category and persist it
pub struct CreateCategory<R> {
    repository: Arc<R>,
}

impl<R: Repository<Category>> CreateCategory<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for invalid properties and
    /// [`CatalogError::Storage`] when persistence fails.
    pub async fn execute(&self, input: CreateCategoryInput) -> Result<CategoryOutput, CatalogError> {
        let category = Category::new(CategoryProps {
            name: input.name,
            description: input.description,
            is_active: input.is_active,
            created_at: None,
        })?;

        self.repository.insert(&category).await?;
        info!("created category {}", category.id());
        Ok(CategoryOutput::from(&category))
    }
}

/// Fetch a single category by id
pub struct GetCategory<R> {
    repository: Arc<R>,
}

impl<R: Repository<Category>> GetCategory<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidId`] for a malformed id and
    /// [`CatalogError::NotFound`] when no category matches.
    pub async fn execute(&self, id: &str) -> Result<CategoryOutput, CatalogError> {
        let id = EntityId::parse(id)?;
        let category = self.repository.find_by_id(&id).await?;
        Ok(CategoryOutput::from(&category))
    }
}

/// Input for [`UpdateCategory`]
///
/// `name` and `description` always replace the stored values (an absent
/// description clears it); `is_active` toggles the flag only when present.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryInput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Update an existing category
pub struct UpdateCategory<R> {
    repository: Arc<R>,
}

impl<R: Repository<Category>> UpdateCategory<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidId`] for a malformed id,
    /// [`CatalogError::NotFound`] when no category matches, and
    /// [`CatalogError::Validation`] when the new properties are invalid.
    pub async fn execute(&self, input: UpdateCategoryInput) -> Result<CategoryOutput, CatalogError> {
        let id = EntityId::parse(&input.id)?;
        let mut category = self.repository.find_by_id(&id).await?;

        category.update(input.name, input.description)?;
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }

        self.repository.update(&category).await?;
        info!("updated category {id}");
        Ok(CategoryOutput::from(&category))
    }
}

/// Delete a category by id
pub struct DeleteCategory<R> {
    repository: Arc<R>,
}

impl<R: Repository<Category>> DeleteCategory<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidId`] for a malformed id and
    /// [`CatalogError::NotFound`] when no category matches.
    pub async fn execute(&self, id: &str) -> Result<(), CatalogError> {
        let id = EntityId::parse(id)?;
        self.repository.delete(&id).await?;
        info!("deleted category {id}");
        Ok(())
    }
}

/// List categories with pagination, sorting, and filtering
pub struct ListCategories<R> {
    repository: Arc<R>,
}

impl<R: SearchableRepository<Category>> ListCategories<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] when the backend query fails.
    /// Malformed search input never fails; it is normalized to defaults.
    pub async fn execute(
        &self,
        input: SearchInput,
    ) -> Result<PaginationOutput<CategoryOutput>, CatalogError> {
        let params = SearchParams::new(input);
        let result = self.repository.search(params).await?;
        Ok(PaginationOutput::from_result(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::in_memory::CategoryInMemoryRepository;
    use serde_json::json;

    fn repo() -> Arc<CategoryInMemoryRepository> {
        Arc::new(CategoryInMemoryRepository::new())
    }

    async fn create(repo: &Arc<CategoryInMemoryRepository>, name: &str) -> CategoryOutput {
        CreateCategory::new(Arc::clone(repo))
            .execute(CreateCategoryInput {
                name: name.to_string(),
                description: None,
                is_active: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_persists_and_returns_output() {
        let repo = repo();
        let output = create(&repo, "Movie").await;

        assert_eq!(output.name, "Movie");
        assert!(output.is_active);

        let stored = repo
            .find_by_id(&EntityId::parse(&output.id).unwrap())
            .await
            .unwrap();
        assert_eq!(stored.name(), "Movie");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_name() {
        let err = CreateCategory::new(repo())
            .execute(CreateCategoryInput {
                name: String::new(),
                description: None,
                is_active: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_returns_stored_category() {
        let repo = repo();
        let created = create(&repo, "Movie").await;

        let output = GetCategory::new(Arc::clone(&repo))
            .execute(&created.id)
            .await
            .unwrap();
        assert_eq!(output, created);
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_id_before_lookup() {
        let err = GetCategory::new(repo()).execute("fake-id").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let err = GetCategory::new(repo())
            .execute(&EntityId::new().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_toggles_flag() {
        let repo = repo();
        let created = create(&repo, "Movie").await;

        let use_case = UpdateCategory::new(Arc::clone(&repo));
        let output = use_case
            .execute(UpdateCategoryInput {
                id: created.id.clone(),
                name: "Documentary".to_string(),
                description: Some("long form".to_string()),
                is_active: Some(false),
            })
            .await
            .unwrap();

        assert_eq!(output.name, "Documentary");
        assert_eq!(output.description.as_deref(), Some("long form"));
        assert!(!output.is_active);

        // absent is_active leaves the flag untouched
        let output = use_case
            .execute(UpdateCategoryInput {
                id: created.id.clone(),
                name: "Documentary".to_string(),
                description: None,
                is_active: None,
            })
            .await
            .unwrap();
        assert!(!output.is_active);
        assert_eq!(output.description, None);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let err = UpdateCategory::new(repo())
            .execute(UpdateCategoryInput {
                id: EntityId::new().to_string(),
                name: "Movie".to_string(),
                description: None,
                is_active: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_category() {
        let repo = repo();
        let created = create(&repo, "Movie").await;

        DeleteCategory::new(Arc::clone(&repo))
            .execute(&created.id)
            .await
            .unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_normalizes_input_and_paginates() {
        let repo = repo();
        for name in ["a", "AAA", "AaA", "b", "c"] {
            create(&repo, name).await;
        }

        let output = ListCategories::new(Arc::clone(&repo))
            .execute(SearchInput {
                page: Some(json!("1")),
                per_page: Some(json!(2)),
                sort: Some(json!("name")),
                sort_dir: Some(json!("ASC")),
                filter: Some(json!("a")),
            })
            .await
            .unwrap();

        let names: Vec<&str> = output.items.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["AAA", "AaA"]);
        assert_eq!(output.total, 3);
        assert_eq!(output.last_page, 2);
    }
}
