//! Post repository
//!
//! Handles post CRUD with:
//! - Paginated listing, categories loaded with one extra query per page
//! - Atomic creation/update with category resolution (transaction)

use std::collections::HashMap;

use sqlx::{PgConnection, PgExecutor, PgPool, Row};

use super::categories::resolve_names;
use crate::db::StoreError;
use crate::models::{
    Category, CategoryLink, NewPost, Pagination, Post, PostUpdate, PostWithCategories,
};

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List posts newest first with their categories.
    pub async fn list(&self, page: Pagination) -> Result<Vec<PostWithCategories>, StoreError> {
        let posts: Vec<Post> = sqlx::query_as(
            r#"
            SELECT id, title, content, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let links = load_links(self.pool, &ids).await?;
        Ok(Self::attach(posts, links))
    }

    /// Get a single post by ID.
    pub async fn get(&self, id: i64) -> Result<PostWithCategories, StoreError> {
        let post: Post = sqlx::query_as(
            "SELECT id, title, content, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("Post", id))?;

        let mut links = load_links(self.pool, &[id]).await?;
        Ok(PostWithCategories {
            categories: links.remove(&id).unwrap_or_default(),
            post,
        })
    }

    /// Create a post and its category links (atomic).
    ///
    /// Missing categories are created in the same transaction, so a failed
    /// post insert leaves no orphan categories behind.
    pub async fn create(&self, new_post: NewPost) -> Result<PostWithCategories, StoreError> {
        let mut tx = self.pool.begin().await?;

        let category_ids = resolve_names(&mut tx, &new_post.categories).await?;

        let post: Post = sqlx::query_as(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content, created_at
            "#,
        )
        .bind(&new_post.title)
        .bind(&new_post.content)
        .fetch_one(&mut *tx)
        .await?;

        link_categories(&mut tx, post.id, &category_ids).await?;
        let mut links = load_links(&mut *tx, &[post.id]).await?;

        tx.commit().await?;
        tracing::debug!(id = post.id, categories = category_ids.len(), "post created");

        Ok(PostWithCategories {
            categories: links.remove(&post.id).unwrap_or_default(),
            post,
        })
    }

    /// Update title/content and replace the category set (atomic).
    pub async fn update(
        &self,
        id: i64,
        update: PostUpdate,
    ) -> Result<PostWithCategories, StoreError> {
        let mut tx = self.pool.begin().await?;

        let post: Post = sqlx::query_as(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            RETURNING id, title, content, created_at
            "#,
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.content.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::not_found("Post", id))?;

        sqlx::query("DELETE FROM category_on_posts WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let category_ids = resolve_names(&mut tx, &update.categories).await?;
        link_categories(&mut tx, id, &category_ids).await?;
        let mut links = load_links(&mut *tx, &[id]).await?;

        tx.commit().await?;
        tracing::debug!(id, categories = category_ids.len(), "post updated");

        Ok(PostWithCategories {
            categories: links.remove(&id).unwrap_or_default(),
            post,
        })
    }

    /// Pair posts with their loaded links, keeping post order.
    pub(crate) fn attach(
        posts: Vec<Post>,
        mut links: HashMap<i64, Vec<CategoryLink>>,
    ) -> Vec<PostWithCategories> {
        posts
            .into_iter()
            .map(|post| PostWithCategories {
                categories: links.remove(&post.id).unwrap_or_default(),
                post,
            })
            .collect()
    }
}

/// Insert join rows for a post in one statement.
async fn link_categories(
    conn: &mut PgConnection,
    post_id: i64,
    category_ids: &[i64],
) -> Result<(), StoreError> {
    if category_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO category_on_posts (post_id, category_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(category_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Load category links for a set of posts, keyed by post id.
///
/// Links within a post are ordered by category id.
pub(crate) async fn load_links<'e, E>(
    executor: E,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<CategoryLink>>, StoreError>
where
    E: PgExecutor<'e>,
{
    let mut links: HashMap<i64, Vec<CategoryLink>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(links);
    }

    let rows = sqlx::query(
        r#"
        SELECT cp.post_id, cp.category_id, c.name
        FROM category_on_posts cp
        JOIN categories c ON c.id = cp.category_id
        WHERE cp.post_id = ANY($1)
        ORDER BY cp.post_id, cp.category_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(executor)
    .await?;

    for row in rows {
        let post_id: i64 = row.get("post_id");
        let category_id: i64 = row.get("category_id");
        links.entry(post_id).or_default().push(CategoryLink {
            post_id,
            category_id,
            category: Category {
                id: category_id,
                name: row.get("name"),
            },
        });
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::MIGRATOR;

    fn new_post(title: &str, categories: &[&str]) -> NewPost {
        NewPost::new(
            Some(title.to_owned()),
            Some("body".to_owned()),
            categories.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_dedupes_case_variants(pool: PgPool) {
        let post = PostRepo::new(&pool)
            .create(new_post("Riffs", &["Rock", "rock"]))
            .await
            .unwrap();

        assert_eq!(post.category_names(), vec!["Rock"]);
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn update_replaces_category_set(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        let post = repo.create(new_post("Riffs", &["Rock", "Jazz"])).await.unwrap();

        let updated = repo
            .update(post.post.id, PostUpdate::default())
            .await
            .unwrap();

        assert!(updated.categories.is_empty());
        assert_eq!(updated.post.title, "Riffs");
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn update_missing_post_creates_nothing(pool: PgPool) {
        let update = PostUpdate {
            categories: vec!["Ghost".into()],
            ..PostUpdate::default()
        };
        let err = PostRepo::new(&pool).update(999, update).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
