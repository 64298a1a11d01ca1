//! Domain models with validation at construction
//!
//! User input is validated when these types are built.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod post;
pub mod pagination;
pub mod resolution;

pub use validation::ValidationError;
pub use category::{Category, CategoryName, CategoryOnPostDetail, CategoryWithCount, CategoryWithPosts};
pub use post::{CategoryLink, NewPost, Post, PostUpdate, PostWithCategories};
pub use pagination::{Pagination, PaginationParams};
pub use resolution::{lowercase_names, resolve_categories, CategoryResolution};
