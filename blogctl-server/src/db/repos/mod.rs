//! Repository implementations for PostgreSQL access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Relies on the `LOWER(name)` unique index for category names
//! - Uses transactions for multi-step operations

pub mod categories;
pub mod posts;
pub mod category_on_posts;

pub use categories::CategoryRepo;
pub use posts::PostRepo;
pub use category_on_posts::CategoryOnPostRepo;
