//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{CategoryOnPostRepo, CategoryRepo, PostRepo};
use super::{BlogStore, StoreError};
use crate::models::{
    Category, CategoryName, CategoryOnPostDetail, CategoryWithCount, CategoryWithPosts, NewPost,
    Pagination, PostUpdate, PostWithCategories,
};

/// Store over a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, StoreError> {
        CategoryRepo::new(&self.pool).list_with_counts().await
    }

    async fn get_category(&self, id: i64) -> Result<CategoryWithPosts, StoreError> {
        CategoryRepo::new(&self.pool).get_with_posts(id).await
    }

    async fn create_category(&self, name: CategoryName) -> Result<Category, StoreError> {
        CategoryRepo::new(&self.pool).create(name).await
    }

    async fn list_category_on_posts(
        &self,
        page: Pagination,
    ) -> Result<Vec<CategoryOnPostDetail>, StoreError> {
        CategoryOnPostRepo::new(&self.pool).list(page).await
    }

    async fn list_posts(&self, page: Pagination) -> Result<Vec<PostWithCategories>, StoreError> {
        PostRepo::new(&self.pool).list(page).await
    }

    async fn get_post(&self, id: i64) -> Result<PostWithCategories, StoreError> {
        PostRepo::new(&self.pool).get(id).await
    }

    async fn create_post(&self, post: NewPost) -> Result<PostWithCategories, StoreError> {
        PostRepo::new(&self.pool).create(post).await
    }

    async fn update_post(
        &self,
        id: i64,
        update: PostUpdate,
    ) -> Result<PostWithCategories, StoreError> {
        PostRepo::new(&self.pool).update(id, update).await
    }
}
