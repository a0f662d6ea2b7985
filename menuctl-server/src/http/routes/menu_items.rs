//! Menu item endpoints
//!
//! Validation and normalization always run before the store is touched, so a
//! rejected request never leaves a partial write behind.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::ListFilter;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidUuid};
use crate::http::server::AppState;
use crate::models::{
    now_utc, Category, DietaryTag, MenuItem, MenuItemInput, ValidationError, ValidationErrors,
};

/// Collection path; single items live at `{MENU_ITEM_PATH}/{id}`
pub const MENU_ITEM_PATH: &str = "/api/menuitem";

/// Menu item response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Category,
    pub dietary_tags: Vec<DietaryTag>,
    pub ingredients: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            dietary_tags: item.dietary_tags,
            ingredients: item.ingredients,
            created_at: timestamp(item.created_at),
            updated_at: timestamp(item.updated_at),
        }
    }
}

/// Optional listing filters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ListQuery {
    fn into_filter(self) -> Result<ListFilter, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let category = self
            .category
            .as_deref()
            .and_then(|c| errors.check(Category::normalize(c)));

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                errors.push(ValidationError::OutOfRange {
                    field: "minPrice",
                    reason: "must not exceed maxPrice",
                });
            }
        }

        errors.into_result()?;
        Ok(ListFilter {
            category,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

/// GET /api/menuitem - every item ordered by category, then name
async fn list_items(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected list query");
        ApiError::from(ValidationError::InvalidFormat {
            field: "query",
            reason: "minPrice and maxPrice must be decimal numbers",
        })
    })?;
    let filter = query.into_filter()?;

    let items = state.store.list_all(&filter).await?;
    Ok(Json(items.into_iter().map(MenuItemResponse::from).collect()))
}

/// POST /api/menuitem - create a new item
async fn create_item(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<MenuItemInput>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<MenuItemResponse>), ApiError> {
    let fields = req.validate()?;

    // The unique name constraint still catches concurrent creates
    if state.store.find_by_name(fields.name.as_str()).await?.is_some() {
        return Err(ApiError::Conflict {
            resource: "menu item",
            name: fields.name.into_string(),
        });
    }

    let item = MenuItem::create(fields, now_utc());
    state.store.insert(&item).await?;
    tracing::info!(id = %item.id, name = %item.name, "Created menu item");

    let location = format!("{}/{}", MENU_ITEM_PATH, item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MenuItemResponse::from(item)),
    ))
}

/// GET /api/menuitem/{id} - get a single item
async fn get_item(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let item = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "menu item",
            id: id.to_string(),
        })?;

    Ok(Json(MenuItemResponse::from(item)))
}

/// PUT /api/menuitem/{id} - replace every mutable field
async fn update_item(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    ValidJson(req): ValidJson<MenuItemInput>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    match req.id {
        Some(body_id) if body_id == id => {}
        Some(_) => {
            return Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must match the id in the request path",
            }
            .into());
        }
        None => return Err(ValidationError::Missing { field: "id" }.into()),
    }

    let fields = req.validate()?;
    let item = state.store.update(id, &fields).await?;
    tracing::info!(id = %item.id, "Updated menu item");

    Ok(Json(MenuItemResponse::from(item)))
}

/// DELETE /api/menuitem/{id} - hard delete
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    tracing::info!(id = %id, "Deleted menu item");
    Ok(StatusCode::NO_CONTENT)
}

/// Menu item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(MENU_ITEM_PATH, get(list_items).post(create_item))
        .route(
            &format!("{}/{{id}}", MENU_ITEM_PATH),
            get(get_item).put(update_item).delete(delete_item),
        )
}
