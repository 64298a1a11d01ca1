//! Join-row repository

use sqlx::{PgPool, Row};

use crate::db::StoreError;
use crate::models::{Category, CategoryOnPostDetail, Pagination, Post};

/// Repository over `category_on_posts`
pub struct CategoryOnPostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryOnPostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List join rows with post and category in a single query.
    pub async fn list(&self, page: Pagination) -> Result<Vec<CategoryOnPostDetail>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                cp.post_id,
                cp.category_id,
                p.title,
                p.content,
                p.created_at,
                c.name
            FROM category_on_posts cp
            JOIN posts p ON p.id = cp.post_id
            JOIN categories c ON c.id = cp.category_id
            ORDER BY cp.post_id, cp.category_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| {
                let post_id: i64 = r.get("post_id");
                let category_id: i64 = r.get("category_id");
                CategoryOnPostDetail {
                    post_id,
                    category_id,
                    post: Post {
                        id: post_id,
                        title: r.get("title"),
                        content: r.get("content"),
                        created_at: r.get("created_at"),
                    },
                    category: Category {
                        id: category_id,
                        name: r.get("name"),
                    },
                }
            })
            .collect();

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::MIGRATOR;
    use crate::db::repos::PostRepo;
    use crate::models::NewPost;

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn lists_links_with_both_sides(pool: PgPool) {
        let post = NewPost::new(
            Some("Title".into()),
            Some("Body".into()),
            vec!["Rock".into(), "Jazz".into()],
        )
        .unwrap();
        PostRepo::new(&pool).create(post).await.unwrap();

        let rows = CategoryOnPostRepo::new(&pool)
            .list(Pagination::default())
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.post.title == "Title"));
        assert!(rows[0].category_id < rows[1].category_id);
    }
}
