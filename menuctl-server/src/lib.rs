//! menuctl-server: menu catalog HTTP service
//!
//! A single `menu_items` table exposed as a JSON CRUD API. Input is validated
//! and normalized in [`models`] before [`db`] is touched; [`http`] maps every
//! outcome onto a status code.
//!
//! Two storage engines share the [`db::MenuItemStore`] trait: Postgres for
//! real deployments and an in-memory map for tests and `--in-memory` runs.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, InMemoryStore, MenuItemStore, PgMenuItemStore};
pub use http::{build_router, run_server, ServerConfig};
