//! Sample menu inserted into an empty store

use rust_decimal::Decimal;
use uuid::Uuid;

use super::{DbError, DbResult, MenuItemStore};
use crate::models::{now_utc, Category, DietaryTag, ItemName, MenuItem, MenuItemFields};

struct SeedItem {
    id: u128,
    name: &'static str,
    description: &'static str,
    /// Price in cents
    price_cents: i64,
    category: Category,
    dietary_tags: &'static [DietaryTag],
    ingredients: &'static [&'static str],
}

const SEED_ITEMS: [SeedItem; 4] = [
    SeedItem {
        id: 0x6f1c_2a4e_0b1d_4c3a_9e51_7d20_a1b3_c401,
        name: "Bruschetta",
        description: "Grilled bread topped with tomatoes, garlic, and fresh basil",
        price_cents: 850,
        category: Category::Appetizers,
        dietary_tags: &[DietaryTag::Vegetarian, DietaryTag::Vegan],
        ingredients: &["bread", "tomatoes", "garlic", "basil", "olive oil"],
    },
    SeedItem {
        id: 0x6f1c_2a4e_0b1d_4c3a_9e51_7d20_a1b3_c402,
        name: "Margherita Pizza",
        description: "Classic pizza with tomato sauce, mozzarella, and basil",
        price_cents: 1400,
        category: Category::Mains,
        dietary_tags: &[DietaryTag::Vegetarian],
        ingredients: &["pizza dough", "tomato sauce", "mozzarella", "basil"],
    },
    SeedItem {
        id: 0x6f1c_2a4e_0b1d_4c3a_9e51_7d20_a1b3_c403,
        name: "Chocolate Lava Cake",
        description: "Warm chocolate cake with a molten center",
        price_cents: 725,
        category: Category::Desserts,
        dietary_tags: &[DietaryTag::Vegetarian],
        ingredients: &["dark chocolate", "butter", "eggs", "sugar", "flour"],
    },
    SeedItem {
        id: 0x6f1c_2a4e_0b1d_4c3a_9e51_7d20_a1b3_c404,
        name: "Fresh Lemonade",
        description: "House-squeezed lemonade with mint",
        price_cents: 395,
        category: Category::Beverages,
        dietary_tags: &[DietaryTag::Vegan, DietaryTag::GlutenFree],
        ingredients: &["lemons", "sugar", "water", "mint"],
    },
];

/// Ids of the sample records, in insertion order.
pub fn seed_ids() -> Vec<Uuid> {
    SEED_ITEMS.iter().map(|s| Uuid::from_u128(s.id)).collect()
}

/// Insert the sample menu if the store is empty.
///
/// Returns how many records were inserted (0 when the store already had
/// data).
pub async fn seed_if_empty(store: &dyn MenuItemStore) -> DbResult<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        tracing::debug!(existing, "Store already populated, skipping seed");
        return Ok(0);
    }

    let now = now_utc();
    for seed in &SEED_ITEMS {
        let fields = MenuItemFields {
            name: ItemName::new(seed.name).map_err(|e| DbError::Corrupt(e.to_string()))?,
            description: seed.description.to_owned(),
            price: Decimal::new(seed.price_cents, 2),
            category: seed.category,
            dietary_tags: seed.dietary_tags.to_vec(),
            ingredients: seed.ingredients.iter().map(|i| (*i).to_owned()).collect(),
        };
        store
            .insert(&MenuItem::with_id(Uuid::from_u128(seed.id), fields, now))
            .await?;
    }

    tracing::info!(count = SEED_ITEMS.len(), "Seeded sample menu");
    Ok(SEED_ITEMS.len())
}
