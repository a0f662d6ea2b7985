//! Menu item record and its validation
//!
//! [`MenuItemInput`] is what arrives over the wire; [`MenuItemInput::validate`]
//! turns it into [`MenuItemFields`] (the mutable part of a record) or a list
//! of every field failure.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::dietary::parse_tags;
use super::{Category, DietaryTag, ValidationError, ValidationErrors};

/// Maximum length for item names
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length for descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum length of the stored category column
pub const MAX_CATEGORY_LEN: usize = 50;

/// Fractional digits kept by the price column (NUMERIC(10,2))
pub const PRICE_SCALE: u32 = 2;

/// Largest value NUMERIC(10,2) holds
pub fn max_price() -> Decimal {
    Decimal::new(99_999_999_99, PRICE_SCALE)
}

/// Current UTC time at storage precision (microseconds).
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Validated item name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Create a new item name.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 100 characters
    ///
    /// # Example
    /// ```
    /// use menuctl_server::models::ItemName;
    ///
    /// assert!(ItemName::new("Veggie Wrap").is_ok());
    /// assert!(ItemName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Missing description becomes the empty string.
pub fn validate_description(s: Option<&str>) -> Result<String, ValidationError> {
    let description = s.unwrap_or_default();

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description",
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(description.to_owned())
}

pub fn validate_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::OutOfRange {
            field: "price",
            reason: "must be greater than 0",
        });
    }

    if price > max_price() {
        return Err(ValidationError::OutOfRange {
            field: "price",
            reason: "must not exceed 99999999.99",
        });
    }

    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::InvalidFormat {
            field: "price",
            reason: "must have at most 2 decimal places",
        });
    }

    Ok(price)
}

/// Menu item request body (create and update)
///
/// Every field is optional at the serde level so that missing fields are
/// reported by [`validate`](Self::validate) instead of a deserializer error.
/// Server-managed fields (`createdAt`, `updatedAt`) are ignored if present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dietary_tags: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

impl MenuItemInput {
    /// Validate and normalize every mutable field, collecting all failures.
    pub fn validate(&self) -> Result<MenuItemFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match &self.name {
            Some(name) => errors.check(ItemName::new(name)),
            None => {
                errors.push(ValidationError::Missing { field: "name" });
                None
            }
        };

        let description = errors.check(validate_description(self.description.as_deref()));

        let price = match self.price {
            Some(price) => errors.check(validate_price(price)),
            None => {
                errors.push(ValidationError::Missing { field: "price" });
                None
            }
        };

        let category = match &self.category {
            Some(category) => errors.check(Category::normalize(category)),
            None => {
                errors.push(ValidationError::Missing { field: "category" });
                None
            }
        };

        let dietary_tags = match parse_tags(self.dietary_tags.as_deref().unwrap_or_default()) {
            Ok(tags) => Some(tags),
            Err(tag_errors) => {
                for e in tag_errors {
                    errors.push(e);
                }
                None
            }
        };

        match (name, description, price, category, dietary_tags) {
            (Some(name), Some(description), Some(price), Some(category), Some(dietary_tags))
                if errors.is_empty() =>
            {
                Ok(MenuItemFields {
                    name,
                    description,
                    price,
                    category,
                    dietary_tags,
                    ingredients: self.ingredients.clone().unwrap_or_default(),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validated mutable fields of a menu item
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemFields {
    pub name: ItemName,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub dietary_tags: Vec<DietaryTag>,
    pub ingredients: Vec<String>,
}

/// Stored menu item
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub dietary_tags: Vec<DietaryTag>,
    pub ingredients: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// New record with a fresh id; `created_at == updated_at == now`.
    pub fn create(fields: MenuItemFields, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), fields, now)
    }

    /// New record with a caller-assigned id (seed data).
    pub fn with_id(id: Uuid, fields: MenuItemFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name.into_string(),
            description: fields.description,
            price: fields.price,
            category: fields.category,
            dietary_tags: fields.dietary_tags,
            ingredients: fields.ingredients,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field. `id` and `created_at` never change and
    /// `updated_at` never falls behind `created_at`.
    pub fn apply(&mut self, fields: MenuItemFields, now: DateTime<Utc>) {
        self.name = fields.name.into_string();
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.dietary_tags = fields.dietary_tags;
        self.ingredients = fields.ingredients;
        self.updated_at = now.max(self.created_at);
    }
}
