//! In-memory backend.
//!
//! [`InMemoryRepository`] keeps entities in an ordered `Vec` behind a
//! `tokio::sync::RwLock` and implements both repository contracts for any
//! [`Searchable`] entity by running the generic pipeline. Useful as a test
//! double and as the reference implementation the relational backend must
//! observably match.

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use crate::domain::entity::EntityId;
use crate::error::CatalogError;
use crate::repository::pipeline::{apply_filter, apply_paginate, apply_sort};
use crate::repository::search::{SearchParams, SearchResult};
use crate::repository::{Repository, Searchable, SearchableRepository};

use crate::domain::category::Category;

/// In-memory repository for categories.
pub type CategoryInMemoryRepository = InMemoryRepository<Category>;

/// Vec-backed repository for any searchable entity
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    items: RwLock<Vec<E>>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<E: Searchable> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<E: Searchable> Repository<E> for InMemoryRepository<E> {
    async fn insert(&self, entity: &E) -> Result<(), CatalogError> {
        let mut items = self.items.write().await;
        items.push(entity.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<E, CatalogError> {
        let items = self.items.read().await;
        items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(id))
    }

    async fn find_all(&self) -> Result<Vec<E>, CatalogError> {
        let items = self.items.read().await;
        Ok(items.clone())
    }

    async fn update(&self, entity: &E) -> Result<(), CatalogError> {
        let mut items = self.items.write().await;
        let position = items
            .iter()
            .position(|item| item.id() == entity.id())
            .ok_or_else(|| CatalogError::not_found(entity.id()))?;
        items[position] = entity.clone();
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CatalogError> {
        let mut items = self.items.write().await;
        let position = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| CatalogError::not_found(id))?;
        items.remove(position);
        Ok(())
    }
}

#[async_trait]
impl<E: Searchable> SearchableRepository<E> for InMemoryRepository<E> {
    fn sortable_fields(&self) -> &'static [&'static str] {
        E::sortable_fields()
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, CatalogError> {
        let items = self.items.read().await;

        let filtered = apply_filter(&items, params.filter(), E::matches_filter);
        let total = filtered.len() as u64;

        let sorted = apply_sort(
            filtered,
            params.sort(),
            params.sort_dir(),
            E::sortable_fields(),
            E::compare_field,
            E::default_compare,
        );
        let page = apply_paginate(sorted, params.page(), params.per_page());

        debug!(
            "in-memory search: total={total} page={} per_page={} returned={}",
            params.page(),
            params.per_page(),
            page.len()
        );

        Ok(SearchResult::new(page, total, &params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::CategoryProps;
    use crate::domain::entity::Entity;
    use crate::repository::search::{SearchInput, SortDirection};
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn category(name: &str) -> Category {
        Category::new(CategoryProps::new(name)).unwrap()
    }

    fn category_created_at(name: &str, offset_secs: i64) -> Category {
        Category::new(CategoryProps {
            name: name.to_string(),
            created_at: Some(Utc::now() + Duration::seconds(offset_secs)),
            ..CategoryProps::default()
        })
        .unwrap()
    }

    async fn seeded(entities: &[Category]) -> CategoryInMemoryRepository {
        let repo = CategoryInMemoryRepository::new();
        for entity in entities {
            repo.insert(entity).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let entity = category("Movie");
        let repo = seeded(std::slice::from_ref(&entity)).await;

        let found = repo.find_by_id(entity.id()).await.unwrap();
        assert_eq!(found, entity);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = CategoryInMemoryRepository::new();
        let id = EntityId::new();
        let err = repo.find_by_id(&id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_update_replaces_stored_state() {
        let mut entity = category("Movie");
        let repo = seeded(std::slice::from_ref(&entity)).await;

        entity.update("Documentary".to_string(), None).unwrap();
        repo.update(&entity).await.unwrap();

        let found = repo.find_by_id(entity.id()).await.unwrap();
        assert_eq!(found.name(), "Documentary");
    }

    #[tokio::test]
    async fn test_update_unknown_entity_fails() {
        let repo = CategoryInMemoryRepository::new();
        let err = repo.update(&category("Movie")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_entity() {
        let entity = category("Movie");
        let repo = seeded(std::slice::from_ref(&entity)).await;

        repo.delete(entity.id()).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());

        let err = repo.delete(entity.id()).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_defaults_to_newest_first() {
        let a = category_created_at("a", -30);
        let b = category_created_at("b", -20);
        let c = category_created_at("c", -10);
        let repo = seeded(&[a, b, c]).await;

        let result = repo.search(SearchParams::default()).await.unwrap();
        let names: Vec<&str> = result.items().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert_eq!(result.total(), 3);
        assert_eq!(result.last_page(), 1);
    }

    #[tokio::test]
    async fn test_search_filters_sorts_and_paginates() {
        let entities: Vec<Category> =
            ["a", "AAA", "AaA", "b", "c"].iter().map(|n| category(n)).collect();
        let repo = seeded(&entities).await;

        let params = SearchParams::new(SearchInput {
            page: Some(json!(1)),
            per_page: Some(json!(2)),
            sort: Some(json!("name")),
            sort_dir: Some(json!("asc")),
            filter: Some(json!("a")),
        });
        let result = repo.search(params.clone()).await.unwrap();
        let names: Vec<&str> = result.items().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["AAA", "AaA"]);
        assert_eq!(result.total(), 3);
        assert_eq!(result.last_page(), 2);
        assert_eq!(result.sort_dir(), Some(SortDirection::Asc));

        let page2 = SearchParams::new(SearchInput {
            page: Some(json!(2)),
            per_page: Some(json!(2)),
            sort: Some(json!("name")),
            sort_dir: Some(json!("asc")),
            filter: Some(json!("a")),
        });
        let result = repo.search(page2).await.unwrap();
        let names: Vec<&str> = result.items().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[tokio::test]
    async fn test_search_page_beyond_last_is_empty() {
        let repo = seeded(&[category("a")]).await;

        let params = SearchParams::new(SearchInput {
            page: Some(json!(5)),
            ..SearchInput::default()
        });
        let result = repo.search(params).await.unwrap();
        assert!(result.items().is_empty());
        assert_eq!(result.total(), 1);
    }

    #[tokio::test]
    async fn test_search_unknown_sort_field_uses_default_order() {
        let a = category_created_at("b-old", -30);
        let b = category_created_at("a-new", -10);
        let repo = seeded(&[a, b]).await;

        let params = SearchParams::new(SearchInput {
            sort: Some(json!("price")),
            sort_dir: Some(json!("asc")),
            ..SearchInput::default()
        });
        let result = repo.search(params).await.unwrap();
        let names: Vec<&str> = result.items().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a-new", "b-old"]);
    }
}
