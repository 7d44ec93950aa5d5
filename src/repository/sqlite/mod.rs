//! SQLite backend.
//!
//! [`CategorySqliteRepository`] translates repository calls into sea-query
//! statements executed over an embedded SQLite connection. Search follows
//! the same observable contract as the in-memory backend: LIKE predicate on
//! the lowered name, order-by on a sortable field or `created_at DESC`,
//! `LIMIT`/`OFFSET` page math, and a count of the filtered subset taken
//! from an order-stripped subquery.
//!
//! Row mapping goes back through the entity construction path, so a stored
//! row that no longer passes validation surfaces as a `Load` failure,
//! distinguishable from rejecting bad new input.

mod params;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use rusqlite::Connection;
use sea_query::{
    Asterisk, Expr, ExprTrait, Func, Iden, Order, Query, SelectStatement, SqliteQueryBuilder,
};
use tokio::sync::Mutex;

use crate::config::StorageConfig;
use crate::domain::category::{Category, CategoryProps};
use crate::domain::entity::{Entity, EntityId};
use crate::error::{CatalogError, FieldErrors};
use crate::repository::search::{SearchParams, SearchResult, SortDirection};
use crate::repository::{Repository, Searchable, SearchableRepository};

use params::bind_values;

/// `categories` table identifiers
enum Categories {
    Table,
    Id,
    Name,
    Description,
    IsActive,
    CreatedAt,
}

impl Iden for Categories {
    fn unquoted(&self) -> &str {
        match self {
            Categories::Table => "categories",
            Categories::Id => "id",
            Categories::Name => "name",
            Categories::Description => "description",
            Categories::IsActive => "is_active",
            Categories::CreatedAt => "created_at",
        }
    }
}

/// Schema for the backing table. Migration management stays outside the
/// core; this is just enough for an embedded or test database.
const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    is_active INTEGER NOT NULL,
    created_at TEXT NOT NULL
)";

/// SQLite implementation of the category repository
///
/// # Examples
///
/// ```
/// use catalog_core::{Category, CategoryProps, CategorySqliteRepository, Repository};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), catalog_core::CatalogError> {
/// let repo = CategorySqliteRepository::open_in_memory()?;
/// let category = Category::new(CategoryProps::new("Movie"))?;
/// repo.insert(&category).await?;
/// assert_eq!(repo.find_all().await?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct CategorySqliteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CategorySqliteRepository {
    /// Wrap an existing connection. The schema is assumed to be in place.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Open a database file and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] when the database cannot be opened
    /// or the schema cannot be created.
    pub fn open(path: &str) -> Result<Self, CatalogError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database and ensure the schema exists.
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Open the database named by the storage configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self, CatalogError> {
        if config.database_path == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(&config.database_path)
        }
    }

    fn with_connection(conn: Connection) -> Result<Self, CatalogError> {
        conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// Select with the filter predicate applied, nothing else.
    fn filtered_statement(params: &SearchParams) -> SelectStatement {
        let mut select = Query::select();
        select.column(Asterisk).from(Categories::Table);

        if let Some(filter) = params.filter() {
            let pattern = format!("%{}%", filter.to_lowercase());
            select.cond_where(Expr::expr(Func::lower(Expr::col(Categories::Name))).like(pattern));
        }

        select
    }

    /// Full page statement: filter, order-by translation, and page math.
    fn search_statement(params: &SearchParams) -> SelectStatement {
        let mut select = Self::filtered_statement(params);

        match params.sort() {
            Some(field) if <Category as Searchable>::sortable_fields().contains(&field) => {
                let order = match params.sort_dir() {
                    Some(SortDirection::Desc) => Order::Desc,
                    _ => Order::Asc,
                };
                let column = match field {
                    "name" => Categories::Name,
                    _ => Categories::CreatedAt,
                };
                select.order_by(column, order);
            }
            _ => {
                select.order_by(Categories::CreatedAt, Order::Desc);
            }
        }

        // limit/offset bind as SQLite integers (i64); clamp so extreme
        // pages become an empty window instead of a failed bind
        let limit = Ord::min(params.per_page(), i64::MAX as u64);
        let offset = Ord::min(
            params
                .page()
                .saturating_sub(1)
                .saturating_mul(params.per_page()),
            i64::MAX as u64,
        );
        select.limit(limit).offset(offset);
        select
    }
}

#[async_trait]
impl Repository<Category> for CategorySqliteRepository {
    async fn insert(&self, entity: &Category) -> Result<(), CatalogError> {
        let mut insert = Query::insert();
        insert
            .into_table(Categories::Table)
            .columns([
                Categories::Id,
                Categories::Name,
                Categories::Description,
                Categories::IsActive,
                Categories::CreatedAt,
            ])
            .values([
                entity.id().to_string().into(),
                entity.name().to_string().into(),
                entity.description().map(str::to_string).into(),
                entity.is_active().into(),
                format_created_at(entity.created_at()).into(),
            ])
            .map_err(CatalogError::storage)?;

        let (sql, values) = insert.build(SqliteQueryBuilder);
        debug!("insert category: {sql}");

        let conn = self.conn.lock().await;
        conn.execute(&sql, rusqlite::params_from_iter(bind_values(&values)?))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Category, CatalogError> {
        let mut select = Query::select();
        select
            .column(Asterisk)
            .from(Categories::Table)
            .cond_where(Expr::col(Categories::Id).eq(id.to_string()));

        let (sql, values) = select.build(SqliteQueryBuilder);

        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(bind_values(&values)?))?;

        match rows.next()? {
            Some(row) => CategoryRow::from_row(row)?.into_entity(),
            None => Err(CatalogError::not_found(id)),
        }
    }

    async fn find_all(&self) -> Result<Vec<Category>, CatalogError> {
        let (sql, _) = Query::select()
            .column(Asterisk)
            .from(Categories::Table)
            .build(SqliteQueryBuilder);

        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(CategoryRow::from_row(row)?.into_entity()?);
        }
        Ok(entities)
    }

    async fn update(&self, entity: &Category) -> Result<(), CatalogError> {
        let mut update = Query::update();
        update
            .table(Categories::Table)
            .value(Categories::Name, entity.name().to_string())
            .value(
                Categories::Description,
                entity.description().map(str::to_string),
            )
            .value(Categories::IsActive, entity.is_active())
            .value(
                Categories::CreatedAt,
                format_created_at(entity.created_at()),
            )
            .cond_where(Expr::col(Categories::Id).eq(entity.id().to_string()));

        let (sql, values) = update.build(SqliteQueryBuilder);
        debug!("update category: {sql}");

        let conn = self.conn.lock().await;
        let affected = conn.execute(&sql, rusqlite::params_from_iter(bind_values(&values)?))?;
        if affected == 0 {
            return Err(CatalogError::not_found(entity.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CatalogError> {
        let mut delete = Query::delete();
        delete
            .from_table(Categories::Table)
            .cond_where(Expr::col(Categories::Id).eq(id.to_string()));

        let (sql, values) = delete.build(SqliteQueryBuilder);

        let conn = self.conn.lock().await;
        let affected = conn.execute(&sql, rusqlite::params_from_iter(bind_values(&values)?))?;
        if affected == 0 {
            return Err(CatalogError::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Category> for CategorySqliteRepository {
    fn sortable_fields(&self) -> &'static [&'static str] {
        <Category as Searchable>::sortable_fields()
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResult<Category>, CatalogError> {
        // count the filtered subset from an order-stripped subquery so
        // LIMIT/OFFSET cannot distort the total
        let (filtered_sql, filter_values) =
            Self::filtered_statement(&params).build(SqliteQueryBuilder);
        let count_sql = format!("SELECT COUNT(*) FROM ({filtered_sql}) AS count_subquery");

        let (page_sql, page_values) = Self::search_statement(&params).build(SqliteQueryBuilder);
        debug!("search categories: {page_sql}");

        let conn = self.conn.lock().await;

        let total: i64 = conn.query_row(
            &count_sql,
            rusqlite::params_from_iter(bind_values(&filter_values)?),
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&page_sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(bind_values(&page_values)?))?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(CategoryRow::from_row(row)?.into_entity()?);
        }

        Ok(SearchResult::new(items, total as u64, &params))
    }
}

/// Raw row shape, one step before entity reconstruction.
struct CategoryRow {
    id: String,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: String,
}

impl CategoryRow {
    fn from_row(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            is_active: row.get("is_active")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Rebuild the entity through the normal construction path.
    ///
    /// Any validation failure is reclassified as a `Load` failure: the data
    /// was accepted once and no longer satisfies current rules.
    fn into_entity(self) -> Result<Category, CatalogError> {
        let id = EntityId::parse(&self.id)
            .map_err(|_| load_failure("id", format!("{} is not a valid UUID", self.id)))?;
        let created_at = parse_created_at(&self.created_at)?;

        Category::with_id(
            id,
            CategoryProps {
                name: self.name,
                description: self.description,
                is_active: Some(self.is_active),
                created_at: Some(created_at),
            },
        )
        .map_err(CatalogError::into_load)
    }
}

/// Fixed-width RFC 3339 UTC text: lexicographic order equals chronological
/// order, and reads return the exact stored instant.
fn format_created_at(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_created_at(value: &str) -> Result<DateTime<Utc>, CatalogError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| load_failure("created_at", format!("{value} is not a valid timestamp")))
}

fn load_failure(field: &str, message: String) -> CatalogError {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message]);
    CatalogError::Load(errors)
}
