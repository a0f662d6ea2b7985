//! Database migrations for the menu catalog
//!
//! All statements are idempotent and run on every startup. A failure here is
//! fatal to the caller.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::DbResult;
use crate::models::menu_item::{MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::models::{MenuItem, CATEGORY_NAMES};

/// Case-insensitive collation for text columns
pub const COLLATION: &str = "menu_ci";

pub const NAME_UNIQUE: &str = "menu_items_name_unique";
pub const NAME_LENGTH: &str = "menu_items_name_length";
pub const DESCRIPTION_LENGTH: &str = "menu_items_description_length";
pub const PRICE_POSITIVE: &str = "menu_items_price_positive";
pub const CATEGORY_LENGTH: &str = "menu_items_category_length";
pub const CATEGORY_VALID: &str = "menu_items_category_valid";
pub const TIMESTAMPS_ORDERED: &str = "menu_items_timestamps_ordered";

/// Run all menu catalog migrations
pub async fn run(pool: &PgPool) -> DbResult<()> {
    tracing::info!("Running menu catalog migrations...");

    // ICU level-2 strength ignores case but not accents
    sqlx::query(&format!(
        r#"
        CREATE COLLATION IF NOT EXISTS {COLLATION} (
            provider = icu,
            locale = 'und-u-ks-level2',
            deterministic = false
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&create_table_sql()).execute(pool).await?;

    create_indexes(pool).await?;

    tracing::info!("Menu catalog migrations complete");
    Ok(())
}

fn create_table_sql() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS menu_items (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT COLLATE {COLLATION} NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price NUMERIC(10, 2) NOT NULL,
            category TEXT COLLATE {COLLATION} NOT NULL,
            dietary_tags JSONB NOT NULL DEFAULT '[]'::jsonb,
            ingredients JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT {NAME_UNIQUE} UNIQUE (name),
            CONSTRAINT {NAME_LENGTH}
                CHECK (char_length(btrim(name)) BETWEEN 1 AND {MAX_NAME_LEN}),
            CONSTRAINT {DESCRIPTION_LENGTH}
                CHECK (char_length(description) <= {MAX_DESCRIPTION_LEN}),
            CONSTRAINT {PRICE_POSITIVE} CHECK (price > 0),
            CONSTRAINT {CATEGORY_LENGTH}
                CHECK (char_length(category) <= {MAX_CATEGORY_LEN}),
            CONSTRAINT {CATEGORY_VALID}
                CHECK ((category COLLATE "C") IN ({categories})),
            CONSTRAINT menu_items_dietary_tags_array
                CHECK (jsonb_typeof(dietary_tags) = 'array'),
            CONSTRAINT menu_items_ingredients_array
                CHECK (jsonb_typeof(ingredients) = 'array'),
            CONSTRAINT {TIMESTAMPS_ORDERED} CHECK (updated_at >= created_at)
        )
        "#,
        categories = category_list_sql(),
    )
}

/// `'appetizers', 'mains', ...` from the same table the application uses
fn category_list_sql() -> String {
    CATEGORY_NAMES
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}

async fn create_indexes(pool: &PgPool) -> DbResult<()> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_menu_items_category ON menu_items(category)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_menu_items_price ON menu_items(price)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_menu_items_name ON menu_items(name)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_menu_items_category_price ON menu_items(category, price)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Name of the check constraint `item` would violate, if any.
///
/// Mirrors the table's CHECK clauses for engines without them. Category
/// membership is guaranteed by the `Category` type.
pub fn violated_constraint(item: &MenuItem) -> Option<&'static str> {
    let name_len = item.name.trim().chars().count();
    if name_len == 0 || name_len > MAX_NAME_LEN {
        return Some(NAME_LENGTH);
    }

    if item.description.chars().count() > MAX_DESCRIPTION_LEN {
        return Some(DESCRIPTION_LENGTH);
    }

    if item.price <= Decimal::ZERO {
        return Some(PRICE_POSITIVE);
    }

    if item.updated_at < item.created_at {
        return Some(TIMESTAMPS_ORDERED);
    }

    None
}
