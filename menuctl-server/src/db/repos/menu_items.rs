//! Menu item repository (PostgreSQL)
//!
//! Constraint enforcement is left to the table definition:
//! - duplicate names hit `menu_items_name_unique` (no check-then-insert race)
//! - check violations come back as `DbError::ConstraintViolation`
//! - list fields travel as JSONB arrays

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::error::ErrorKind;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::migrations::NAME_UNIQUE;
use crate::db::{DbError, DbResult, ListFilter, MenuItemStore};
use crate::models::dietary::wire_names;
use crate::models::{now_utc, Category, DietaryTag, MenuItem, MenuItemFields};

/// Menu item record from database
#[derive(Debug, Clone, FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    dietary_tags: Json<Vec<String>>,
    ingredients: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DbError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let category = Category::from_wire(&row.category).ok_or_else(|| {
            DbError::Corrupt(format!("unknown category '{}' on {}", row.category, row.id))
        })?;

        let dietary_tags = row
            .dietary_tags
            .0
            .iter()
            .map(|tag| {
                DietaryTag::from_wire(tag).ok_or_else(|| {
                    DbError::Corrupt(format!("unknown dietary tag '{}' on {}", tag, row.id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuItem {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category,
            dietary_tags,
            ingredients: row.ingredients.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Translate constraint failures on INSERT/UPDATE.
fn map_write_error(err: sqlx::Error, name: &str) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or_default().to_owned();
        match db_err.kind() {
            ErrorKind::UniqueViolation if constraint == NAME_UNIQUE => {
                return DbError::duplicate_name(name);
            }
            ErrorKind::UniqueViolation | ErrorKind::CheckViolation => {
                return DbError::ConstraintViolation { constraint };
            }
            _ => {}
        }
    }
    DbError::Sqlx(err)
}

/// Menu item repository
#[derive(Debug, Clone)]
pub struct PgMenuItemStore {
    pool: PgPool,
}

impl PgMenuItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MenuItemStore for PgMenuItemStore {
    async fn insert(&self, item: &MenuItem) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, description, price, category,
                dietary_tags, ingredients, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.category.as_str())
        .bind(Json(wire_names(&item.dietary_tags)))
        .bind(Json(&item.ingredients))
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &item.name))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<MenuItem>> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price, category,
                   dietary_tags, ingredients, created_at, updated_at
            FROM menu_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Option<MenuItem>> {
        // Column collation makes this comparison case-insensitive
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price, category,
                   dietary_tags, ingredients, created_at, updated_at
            FROM menu_items
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn list_all(&self, filter: &ListFilter) -> DbResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price, category,
                   dietary_tags, ingredients, created_at, updated_at
            FROM menu_items
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::numeric IS NULL OR price >= $2)
              AND ($3::numeric IS NULL OR price <= $3)
            ORDER BY category, name
            "#,
        )
        .bind(filter.category.map(Category::as_str))
        .bind(filter.min_price)
        .bind(filter.max_price)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn update(&self, id: Uuid, fields: &MenuItemFields) -> DbResult<MenuItem> {
        let row: MenuItemRow = sqlx::query_as(
            r#"
            UPDATE menu_items
            SET name = $2,
                description = $3,
                price = $4,
                category = $5,
                dietary_tags = $6,
                ingredients = $7,
                updated_at = GREATEST($8, created_at)
            WHERE id = $1
            RETURNING id, name, description, price, category,
                      dietary_tags, ingredients, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(fields.name.as_str())
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.category.as_str())
        .bind(Json(wire_names(&fields.dietary_tags)))
        .bind(Json(&fields.ingredients))
        .bind(now_utc())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, fields.name.as_str()))?
        .ok_or_else(|| DbError::item_not_found(id))?;

        MenuItem::try_from(row)
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::item_not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
