//! Command implementations for the menuctl CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Default connection string when neither flag nor environment sets one
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/menuctl";
