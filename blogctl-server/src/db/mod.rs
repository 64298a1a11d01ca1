//! Database layer - store trait, connection pool and repositories
//!
//! # Design Principles
//!
//! - Handlers depend on `dyn BlogStore`, never on a pool
//! - List operations use JOINs - no N+1 queries
//! - Category names are unique on `LOWER(name)` at the storage layer
//! - Transactions for multi-step operations

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options, run_migrations, MIGRATOR};
pub use postgres::PgStore;
pub use store::BlogStore;
