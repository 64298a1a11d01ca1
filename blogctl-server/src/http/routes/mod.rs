//! Route handlers organized by resource

pub mod health;
pub mod posts;
pub mod categories;
pub mod category_on_posts;
