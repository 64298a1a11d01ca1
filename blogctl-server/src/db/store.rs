//! Store trait injected into the HTTP layer
//!
//! Handlers only see `Arc<dyn BlogStore>`, so the Postgres store and the
//! in-memory store are interchangeable.

use async_trait::async_trait;

use super::StoreError;
use crate::models::{
    Category, CategoryName, CategoryOnPostDetail, CategoryWithCount, CategoryWithPosts, NewPost,
    Pagination, PostUpdate, PostWithCategories,
};

/// Persistence operations behind the blog API
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All categories with their post counts, ordered by id.
    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, StoreError>;

    /// One category with its posts, newest first.
    ///
    /// Returns `StoreError::NotFound` for an unknown id.
    async fn get_category(&self, id: i64) -> Result<CategoryWithPosts, StoreError>;

    /// Insert a category.
    ///
    /// Returns `StoreError::Conflict` when a category with the same name,
    /// ignoring case, already exists.
    async fn create_category(&self, name: CategoryName) -> Result<Category, StoreError>;

    /// Join rows with post and category loaded, ordered by (post, category).
    async fn list_category_on_posts(
        &self,
        page: Pagination,
    ) -> Result<Vec<CategoryOnPostDetail>, StoreError>;

    /// Posts newest first, with their categories.
    async fn list_posts(&self, page: Pagination) -> Result<Vec<PostWithCategories>, StoreError>;

    /// One post with its categories.
    async fn get_post(&self, id: i64) -> Result<PostWithCategories, StoreError>;

    /// Insert a post, creating any category it names that does not exist yet.
    async fn create_post(&self, post: NewPost) -> Result<PostWithCategories, StoreError>;

    /// Update a post and replace its whole category set.
    async fn update_post(
        &self,
        id: i64,
        update: PostUpdate,
    ) -> Result<PostWithCategories, StoreError>;
}
