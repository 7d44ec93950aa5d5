//! Backend equivalence tests.
//!
//! The in-memory and SQLite backends must be observably interchangeable:
//! the same dataset and the same normalized parameters yield the same page
//! of ids, the same total, and the same metadata. Datasets here use
//! distinct names and distinct timestamps so the shared contract fully
//! determines the order.

use chrono::{Duration, Utc};
use serde_json::json;

use catalog_core::{
    Category, CategoryInMemoryRepository, CategoryProps, CategorySqliteRepository, Entity,
    Repository, SearchInput, SearchParams, SearchableRepository,
};

fn dataset() -> Vec<Category> {
    let base = Utc::now();
    ["a", "AAA", "AaA", "b", "c", "Movie", "movie night", "Series"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Category::new(CategoryProps {
                name: name.to_string(),
                created_at: Some(base + Duration::seconds(i as i64)),
                ..CategoryProps::default()
            })
            .unwrap()
        })
        .collect()
}

fn scenarios() -> Vec<SearchInput> {
    vec![
        SearchInput::default(),
        SearchInput {
            sort: Some(json!("name")),
            sort_dir: Some(json!("asc")),
            ..SearchInput::default()
        },
        SearchInput {
            sort: Some(json!("name")),
            sort_dir: Some(json!("desc")),
            ..SearchInput::default()
        },
        SearchInput {
            sort: Some(json!("created_at")),
            sort_dir: Some(json!("asc")),
            ..SearchInput::default()
        },
        SearchInput {
            page: Some(json!(1)),
            per_page: Some(json!(2)),
            sort: Some(json!("name")),
            sort_dir: Some(json!("asc")),
            filter: Some(json!("a")),
        },
        SearchInput {
            page: Some(json!(2)),
            per_page: Some(json!(2)),
            sort: Some(json!("name")),
            sort_dir: Some(json!("asc")),
            filter: Some(json!("a")),
        },
        SearchInput {
            filter: Some(json!("MOVIE")),
            ..SearchInput::default()
        },
        SearchInput {
            filter: Some(json!("no-match")),
            ..SearchInput::default()
        },
        SearchInput {
            page: Some(json!(9)),
            per_page: Some(json!(3)),
            ..SearchInput::default()
        },
        // unknown sort field falls back to the default order on both sides
        SearchInput {
            sort: Some(json!("price")),
            sort_dir: Some(json!("asc")),
            ..SearchInput::default()
        },
        // extreme page math saturates to an empty page on both sides
        SearchInput {
            page: Some(json!(1e19)),
            per_page: Some(json!(1e19)),
            ..SearchInput::default()
        },
    ]
}

async fn observe<R>(repo: &R, input: SearchInput) -> (Vec<String>, u64, u64, u64, u64)
where
    R: SearchableRepository<Category>,
{
    let result = repo.search(SearchParams::new(input)).await.unwrap();
    let ids = result
        .items()
        .iter()
        .map(|e| e.id().to_string())
        .collect();
    (
        ids,
        result.total(),
        result.current_page(),
        result.per_page(),
        result.last_page(),
    )
}

#[tokio::test]
async fn test_search_is_backend_agnostic() {
    let entities = dataset();

    let in_memory = CategoryInMemoryRepository::new();
    let sqlite = CategorySqliteRepository::open_in_memory().unwrap();
    for entity in &entities {
        in_memory.insert(entity).await.unwrap();
        sqlite.insert(entity).await.unwrap();
    }

    for (i, input) in scenarios().into_iter().enumerate() {
        let expected = observe(&in_memory, input.clone()).await;
        let actual = observe(&sqlite, input).await;
        assert_eq!(actual, expected, "scenario {i} diverged across backends");
    }
}

#[tokio::test]
async fn test_crud_is_backend_agnostic() {
    let in_memory = CategoryInMemoryRepository::new();
    let sqlite = CategorySqliteRepository::open_in_memory().unwrap();

    let mut entity = Category::new(CategoryProps::new("Movie")).unwrap();
    in_memory.insert(&entity).await.unwrap();
    sqlite.insert(&entity).await.unwrap();

    entity
        .update("Documentary".to_string(), Some("desc".to_string()))
        .unwrap();
    in_memory.update(&entity).await.unwrap();
    sqlite.update(&entity).await.unwrap();

    assert_eq!(
        in_memory.find_by_id(entity.id()).await.unwrap(),
        sqlite.find_by_id(entity.id()).await.unwrap(),
    );

    in_memory.delete(entity.id()).await.unwrap();
    sqlite.delete(entity.id()).await.unwrap();

    let memory_err = in_memory.find_by_id(entity.id()).await.unwrap_err();
    let sqlite_err = sqlite.find_by_id(entity.id()).await.unwrap_err();
    assert_eq!(memory_err.to_string(), sqlite_err.to_string());
}
