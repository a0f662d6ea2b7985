//! Database layer - store interface, engines, schema, and seed data
//!
//! # Design Principles
//!
//! - Handlers only see `Arc<dyn MenuItemStore>`
//! - Rely on DB constraints, handle conflicts - no check-then-insert race
//! - The in-memory engine mirrors every table constraint

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;
pub mod store;

pub use memory::InMemoryStore;
pub use pool::{create_pool, PoolConfig};
pub use repos::PgMenuItemStore;
pub use seed::seed_if_empty;
pub use store::{DbError, DbResult, ListFilter, MenuItemStore};
