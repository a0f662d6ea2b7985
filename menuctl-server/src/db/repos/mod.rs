//! Repository implementations for database access

pub mod menu_items;

pub use menu_items::PgMenuItemStore;
