//! Store interface consumed by the HTTP layer
//!
//! Any backing engine implements [`MenuItemStore`]. Engines must reject the
//! same records: the check constraints in [`super::migrations`] and the
//! case-insensitive unique name.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Category, MenuItem, MenuItemFields};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("duplicate: {resource} named '{name}' already exists")]
    Duplicate { resource: &'static str, name: String },

    #[error("constraint violated: {constraint}")]
    ConstraintViolation { constraint: String },

    #[error("invalid stored data: {0}")]
    Corrupt(String),
}

impl DbError {
    pub(crate) fn item_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "menu item",
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate_name(name: &str) -> Self {
        Self::Duplicate {
            resource: "menu item",
            name: name.to_owned(),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Optional listing filters, backed by the category/price indexes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub category: Option<Category>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ListFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        self.category.map_or(true, |c| item.category == c)
            && self.min_price.map_or(true, |min| item.price >= min)
            && self.max_price.map_or(true, |max| item.price <= max)
    }
}

/// Persistence operations for menu items.
#[async_trait]
pub trait MenuItemStore: Send + Sync {
    /// Insert a fully formed record. Fails with `ConstraintViolation` on a
    /// non-positive price or blank name, `Duplicate` on a taken name.
    async fn insert(&self, item: &MenuItem) -> DbResult<()>;

    /// Lookup by id; `None` on miss.
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<MenuItem>>;

    /// Exact name lookup, case-insensitive.
    async fn find_by_name(&self, name: &str) -> DbResult<Option<MenuItem>>;

    /// All matching records ordered by (category, name).
    async fn list_all(&self, filter: &ListFilter) -> DbResult<Vec<MenuItem>>;

    /// Replace every mutable field and refresh `updated_at`.
    async fn update(&self, id: Uuid, fields: &MenuItemFields) -> DbResult<MenuItem>;

    /// Hard delete; `NotFound` on miss.
    async fn delete(&self, id: Uuid) -> DbResult<()>;

    /// Number of stored records.
    async fn count(&self) -> DbResult<i64>;
}
