//! Category repository
//!
//! - list: LEFT JOIN with post count (no N+1)
//! - create: existence check and insert in one transaction, backed by
//!   the `LOWER(name)` unique index
//! - resolve_names: find-or-create for post writes, inside the caller's
//!   transaction

use sqlx::{PgConnection, PgPool};

use super::posts::{load_links, PostRepo};
use crate::db::StoreError;
use crate::models::{
    lowercase_names, resolve_categories, Category, CategoryName, CategoryWithCount,
    CategoryWithPosts, Post,
};

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List categories with post counts in a single grouped query.
    pub async fn list_with_counts(&self) -> Result<Vec<CategoryWithCount>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT
                c.id,
                c.name,
                COUNT(cp.post_id) AS post_count
            FROM categories c
            LEFT JOIN category_on_posts cp ON cp.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY c.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a category with its posts (newest first), each with categories.
    pub async fn get_with_posts(&self, id: i64) -> Result<CategoryWithPosts, StoreError> {
        let category: Category = sqlx::query_as("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Category", id))?;

        let posts: Vec<Post> = sqlx::query_as(
            r#"
            SELECT p.id, p.title, p.content, p.created_at
            FROM posts p
            JOIN category_on_posts cp ON cp.post_id = p.id
            WHERE cp.category_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let links = load_links(self.pool, &ids).await?;

        Ok(CategoryWithPosts {
            id: category.id,
            name: category.name,
            posts: PostRepo::attach(posts, links),
        })
    }

    /// Create a category unless one with the same name (ignoring case) exists.
    pub async fn create(&self, name: CategoryName) -> Result<Category, StoreError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE LOWER(name) = LOWER($1))",
        )
        .bind(name.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if exists {
            return Err(StoreError::Conflict {
                resource: "Category",
                name: name.into_string(),
            });
        }

        // The unique index still catches a concurrent insert of the same name
        let category: Category =
            sqlx::query_as("INSERT INTO categories (name) VALUES ($1) RETURNING id, name")
                .bind(name.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StoreError::from_insert(e, "Category", name.as_str()))?;

        tx.commit().await?;
        tracing::debug!(id = category.id, name = %category.name, "category created");
        Ok(category)
    }
}

/// Resolve requested names to category ids, creating missing ones.
///
/// Runs on the caller's connection so it joins the caller's transaction.
/// Missing names are inserted with an upsert on the `LOWER(name)` index, so
/// a name created concurrently resolves to the existing row.
pub(crate) async fn resolve_names(
    conn: &mut PgConnection,
    names: &[String],
) -> Result<Vec<i64>, StoreError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let existing: Vec<Category> =
        sqlx::query_as("SELECT id, name FROM categories WHERE LOWER(name) = ANY($1)")
            .bind(lowercase_names(names))
            .fetch_all(&mut *conn)
            .await?;

    let resolution = resolve_categories(names, &existing);
    let mut ids = resolution.existing_ids;

    for name in resolution.missing {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name) VALUES ($1)
            ON CONFLICT ((LOWER(name))) DO UPDATE SET name = categories.name
            RETURNING id
            "#,
        )
        .bind(&name)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!(id, name = %name, "category created for post");
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::MIGRATOR;

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_rejects_case_insensitive_duplicate(pool: PgPool) {
        let repo = CategoryRepo::new(&pool);
        repo.create(CategoryName::normalize("music")).await.unwrap();

        let err = repo.create(CategoryName::normalize("MUSIC")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn resolve_names_reuses_existing_rows(pool: PgPool) {
        let rock = CategoryRepo::new(&pool)
            .create(CategoryName::normalize("rock"))
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let ids = resolve_names(&mut conn, &["ROCK".to_string(), "Jazz".to_string(), "jazz".to_string()])
            .await
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], rock.id);
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn list_counts_links(pool: PgPool) {
        let repo = CategoryRepo::new(&pool);
        repo.create(CategoryName::normalize("empty")).await.unwrap();

        let listed = repo.list_with_counts().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].post_count, 0);
    }
}
