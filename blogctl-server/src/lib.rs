//! blogctl-server: HTTP API for blog posts and categories
//!
//! Posts carry a many-to-many set of categories. Categories are created on
//! demand by name when a post is written, and names are unique regardless
//! of case.
//!
//! Storage sits behind [`db::BlogStore`], with a PostgreSQL implementation
//! for production and an in-memory one for tests and demos.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{BlogConfig, DatabaseConfig, ServerConfig};
pub use db::{BlogStore, MemoryStore, PgStore, StoreError};
pub use http::{build_router, run_server, AppState};
