//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::migrations::violated_constraint;
use super::{DbError, DbResult, ListFilter, MenuItemStore};
use crate::models::{now_utc, MenuItem, MenuItemFields};

/// In-memory storage backend.
///
/// Applies the same check constraints and case-insensitive unique name as
/// the PostgreSQL table. Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: Arc<RwLock<HashMap<Uuid, MenuItem>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Comparison key matching the `menu_ci` collation closely enough for
/// uniqueness and ordering.
fn fold(name: &str) -> String {
    name.to_lowercase()
}

fn name_taken(items: &HashMap<Uuid, MenuItem>, name: &str, except: Option<Uuid>) -> bool {
    let key = fold(name);
    items
        .values()
        .any(|other| Some(other.id) != except && fold(&other.name) == key)
}

fn check(item: &MenuItem) -> DbResult<()> {
    match violated_constraint(item) {
        Some(constraint) => Err(DbError::ConstraintViolation {
            constraint: constraint.to_owned(),
        }),
        None => Ok(()),
    }
}

#[async_trait]
impl MenuItemStore for InMemoryStore {
    async fn insert(&self, item: &MenuItem) -> DbResult<()> {
        check(item)?;

        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(DbError::ConstraintViolation {
                constraint: "menu_items_pkey".to_owned(),
            });
        }
        if name_taken(&items, &item.name, None) {
            return Err(DbError::duplicate_name(&item.name));
        }

        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<MenuItem>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Option<MenuItem>> {
        let key = fold(name);
        let items = self.items.read().await;
        Ok(items.values().find(|i| fold(&i.name) == key).cloned())
    }

    async fn list_all(&self, filter: &ListFilter) -> DbResult<Vec<MenuItem>> {
        let items = self.items.read().await;
        let mut matching: Vec<MenuItem> = items
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| fold(&a.name).cmp(&fold(&b.name)))
        });
        Ok(matching)
    }

    async fn update(&self, id: Uuid, fields: &MenuItemFields) -> DbResult<MenuItem> {
        let mut items = self.items.write().await;

        let mut updated = items
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::item_not_found(id))?;
        updated.apply(fields.clone(), now_utc());
        check(&updated)?;

        if name_taken(&items, &updated.name, Some(id)) {
            return Err(DbError::duplicate_name(&updated.name));
        }

        items.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        let mut items = self.items.write().await;
        if items.remove(&id).is_none() {
            return Err(DbError::item_not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let items = self.items.read().await;
        Ok(items.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{Category, DietaryTag, MenuItemInput};

    fn fields(name: &str, category: &str) -> MenuItemFields {
        MenuItemInput {
            name: Some(name.to_owned()),
            price: Some(Decimal::new(995, 2)),
            category: Some(category.to_owned()),
            dietary_tags: Some(vec!["vegan".into(), "gluten-free".into()]),
            ingredients: Some(vec!["rice".into(), "beans".into()]),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem::create(fields(name, category), now_utc())
    }

    #[tokio::test]
    async fn insert_and_find() {
        let store = InMemoryStore::new();
        let bowl = item("Rice Bowl", "mains");
        store.insert(&bowl).await.unwrap();

        let loaded = store.find_by_id(bowl.id).await.unwrap().unwrap();
        assert_eq!(loaded, bowl);
        assert_eq!(
            loaded.dietary_tags,
            vec![DietaryTag::Vegan, DietaryTag::GlutenFree]
        );
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_name_ignores_case() {
        let store = InMemoryStore::new();
        let pizza = item("Pizza", "mains");
        store.insert(&pizza).await.unwrap();

        let found = store.find_by_name("pIZZA").await.unwrap().unwrap();
        assert_eq!(found.id, pizza.id);
        assert!(store.find_by_name("Pizzas").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_rejected() {
        let store = InMemoryStore::new();
        store.insert(&item("Pizza", "mains")).await.unwrap();

        let err = store.insert(&item("pizza", "mains")).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate { .. }));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn check_constraints_mirrored() {
        let store = InMemoryStore::new();

        let mut free = item("Water", "beverages");
        free.price = Decimal::ZERO;
        let err = store.insert(&free).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));

        let mut blank = item("Blank", "beverages");
        blank.name = "  ".into();
        assert!(store.insert(&blank).await.is_err());

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_orders_by_category_then_name() {
        let store = InMemoryStore::new();
        for (name, category) in [
            ("tiramisu", "desserts"),
            ("Burger", "mains"),
            ("apple pie", "desserts"),
            ("Lemonade", "beverages"),
            ("Bruschetta", "appetizers"),
            ("Alfredo", "mains"),
        ] {
            store.insert(&item(name, category)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_all(&ListFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();

        assert_eq!(
            names,
            vec!["Bruschetta", "Lemonade", "apple pie", "tiramisu", "Alfredo", "Burger"]
        );
    }

    #[tokio::test]
    async fn list_empty_store() {
        let store = InMemoryStore::new();
        assert!(store.list_all(&ListFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_with_filter() {
        let store = InMemoryStore::new();
        store.insert(&item("Burger", "mains")).await.unwrap();
        store.insert(&item("Lemonade", "beverages")).await.unwrap();

        let filter = ListFilter {
            category: Some(Category::Beverages),
            ..Default::default()
        };
        let items = store.list_all(&filter).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Lemonade");
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_created_at() {
        let store = InMemoryStore::new();
        let original = item("Burger", "mains");
        store.insert(&original).await.unwrap();

        let mut changes = fields("Cheeseburger", "Mains");
        changes.price = Decimal::new(1100, 2);
        changes.dietary_tags = vec![];

        let updated = store.update(original.id, &changes).await.unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "Cheeseburger");
        assert_eq!(updated.price, Decimal::new(1100, 2));
        assert!(updated.dietary_tags.is_empty());
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.created_at);

        let stored = store.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .update(Uuid::new_v4(), &fields("Ghost", "mains"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_onto_taken_name_rejected() {
        let store = InMemoryStore::new();
        let burger = item("Burger", "mains");
        store.insert(&burger).await.unwrap();
        store.insert(&item("Salad", "mains")).await.unwrap();

        let err = store
            .update(burger.id, &fields("SALAD", "mains"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Duplicate { .. }));

        // Renaming to a different case of its own name is allowed
        let renamed = store.update(burger.id, &fields("BURGER", "mains")).await.unwrap();
        assert_eq!(renamed.name, "BURGER");
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let store = InMemoryStore::new();
        let soup = item("Soup", "appetizers");
        store.insert(&soup).await.unwrap();

        store.delete(soup.id).await.unwrap();
        assert!(store.find_by_id(soup.id).await.unwrap().is_none());

        let err = store.delete(soup.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
