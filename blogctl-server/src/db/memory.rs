//! In-memory store
//!
//! Same semantics as [`PgStore`](super::PgStore), held in BTreeMaps behind
//! one `RwLock`. Used by tests and by `blogctl serve --memory`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{BlogStore, StoreError};
use crate::models::{
    resolve_categories, Category, CategoryLink, CategoryName, CategoryOnPostDetail,
    CategoryWithCount, CategoryWithPosts, NewPost, Pagination, Post, PostUpdate,
    PostWithCategories,
};

/// In-memory store
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    categories: BTreeMap<i64, Category>,
    /// (post_id, category_id)
    links: BTreeSet<(i64, i64)>,
    last_post_id: i64,
    last_category_id: i64,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail, for exercising error paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a post with an explicit creation time.
    ///
    /// Test helper for ordering scenarios; no categories are linked.
    pub async fn insert_post_at(&self, title: &str, content: &str, created_at: DateTime<Utc>) -> i64 {
        let mut data = self.data.write().await;
        data.insert_post(title.to_owned(), content.to_owned(), created_at)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

impl Tables {
    fn insert_post(&mut self, title: String, content: String, created_at: DateTime<Utc>) -> i64 {
        self.last_post_id += 1;
        let id = self.last_post_id;
        self.posts.insert(
            id,
            Post {
                id,
                title,
                content,
                created_at,
            },
        );
        id
    }

    fn insert_category(&mut self, name: String) -> Category {
        self.last_category_id += 1;
        let category = Category {
            id: self.last_category_id,
            name,
        };
        self.categories.insert(category.id, category.clone());
        category
    }

    fn find_category(&self, name: &str) -> Option<&Category> {
        let key = name.to_lowercase();
        self.categories
            .values()
            .find(|c| c.name.to_lowercase() == key)
    }

    /// Same find-or-create as the Postgres store.
    fn resolve_names(&mut self, names: &[String]) -> Vec<i64> {
        let existing: Vec<Category> = self.categories.values().cloned().collect();
        let resolution = resolve_categories(names, &existing);

        let mut ids = resolution.existing_ids;
        for name in resolution.missing {
            let id = self.insert_category(name).id;
            ids.push(id);
        }
        ids
    }

    fn links_for(&self, post_id: i64) -> Vec<CategoryLink> {
        self.links
            .range((post_id, i64::MIN)..=(post_id, i64::MAX))
            .filter_map(|&(post_id, category_id)| {
                self.categories.get(&category_id).map(|category| CategoryLink {
                    post_id,
                    category_id,
                    category: category.clone(),
                })
            })
            .collect()
    }

    fn with_categories(&self, post: &Post) -> PostWithCategories {
        PostWithCategories {
            post: post.clone(),
            categories: self.links_for(post.id),
        }
    }

    /// Posts newest first, ties broken by id descending.
    fn posts_newest_first(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

fn window<T>(items: impl Iterator<Item = T>, page: Pagination) -> impl Iterator<Item = T> {
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.limit()).unwrap_or(0);
    items.skip(skip).take(take)
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, StoreError> {
        self.check_available()?;
        let data = self.data.read().await;

        Ok(data
            .categories
            .values()
            .map(|c| CategoryWithCount {
                id: c.id,
                name: c.name.clone(),
                post_count: data.links.iter().filter(|(_, cid)| *cid == c.id).count() as i64,
            })
            .collect())
    }

    async fn get_category(&self, id: i64) -> Result<CategoryWithPosts, StoreError> {
        self.check_available()?;
        let data = self.data.read().await;

        let category = data
            .categories
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Category", id))?;

        let posts = data
            .posts_newest_first()
            .into_iter()
            .filter(|p| data.links.contains(&(p.id, id)))
            .map(|p| data.with_categories(p))
            .collect();

        Ok(CategoryWithPosts {
            id: category.id,
            name: category.name.clone(),
            posts,
        })
    }

    async fn create_category(&self, name: CategoryName) -> Result<Category, StoreError> {
        self.check_available()?;
        let mut data = self.data.write().await;

        if data.find_category(name.as_str()).is_some() {
            return Err(StoreError::Conflict {
                resource: "Category",
                name: name.into_string(),
            });
        }

        Ok(data.insert_category(name.into_string()))
    }

    async fn list_category_on_posts(
        &self,
        page: Pagination,
    ) -> Result<Vec<CategoryOnPostDetail>, StoreError> {
        self.check_available()?;
        let data = self.data.read().await;

        let rows = data.links.iter().filter_map(|&(post_id, category_id)| {
            let post = data.posts.get(&post_id)?;
            let category = data.categories.get(&category_id)?;
            Some(CategoryOnPostDetail {
                post_id,
                category_id,
                post: post.clone(),
                category: category.clone(),
            })
        });

        Ok(window(rows, page).collect())
    }

    async fn list_posts(&self, page: Pagination) -> Result<Vec<PostWithCategories>, StoreError> {
        self.check_available()?;
        let data = self.data.read().await;

        let posts = data.posts_newest_first().into_iter();
        Ok(window(posts, page).map(|p| data.with_categories(p)).collect())
    }

    async fn get_post(&self, id: i64) -> Result<PostWithCategories, StoreError> {
        self.check_available()?;
        let data = self.data.read().await;

        data.posts
            .get(&id)
            .map(|p| data.with_categories(p))
            .ok_or_else(|| StoreError::not_found("Post", id))
    }

    async fn create_post(&self, post: NewPost) -> Result<PostWithCategories, StoreError> {
        self.check_available()?;
        let mut data = self.data.write().await;

        let category_ids = data.resolve_names(&post.categories);
        let id = data.insert_post(post.title, post.content, Utc::now());
        for category_id in category_ids {
            data.links.insert((id, category_id));
        }

        let created = &data.posts[&id];
        Ok(data.with_categories(created))
    }

    async fn update_post(
        &self,
        id: i64,
        update: PostUpdate,
    ) -> Result<PostWithCategories, StoreError> {
        self.check_available()?;
        let mut data = self.data.write().await;

        let post = data
            .posts
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Post", id))?;
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(content) = update.content {
            post.content = content;
        }

        data.links.retain(|&(post_id, _)| post_id != id);
        let category_ids = data.resolve_names(&update.categories);
        for category_id in category_ids {
            data.links.insert((id, category_id));
        }

        let updated = &data.posts[&id];
        Ok(data.with_categories(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_post(title: &str, categories: &[&str]) -> NewPost {
        NewPost::new(
            Some(title.to_owned()),
            Some("body".to_owned()),
            categories.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_category_rejects_case_insensitive_duplicate() {
        let store = MemoryStore::new();
        store
            .create_category(CategoryName::normalize("music"))
            .await
            .unwrap();

        let err = store
            .create_category(CategoryName::normalize("Music"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn create_post_reuses_existing_category() {
        let store = MemoryStore::new();
        let rock = store
            .create_category(CategoryName::normalize("rock"))
            .await
            .unwrap();

        let post = store.create_post(new_post("Riffs", &["ROCK", "Blues"])).await.unwrap();

        assert_eq!(post.categories.len(), 2);
        assert_eq!(post.categories[0].category_id, rock.id);
        assert_eq!(store.list_categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_links_and_keeps_fields() {
        let store = MemoryStore::new();
        let post = store.create_post(new_post("Riffs", &["Rock"])).await.unwrap();

        let updated = store
            .update_post(
                post.post.id,
                PostUpdate {
                    content: Some("new body".into()),
                    categories: vec!["Jazz".into()],
                    ..PostUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.post.title, "Riffs");
        assert_eq!(updated.post.content, "new body");
        assert_eq!(updated.category_names(), vec!["Jazz"]);

        let counts = store.list_categories().await.unwrap();
        let rock = counts.iter().find(|c| c.name == "Rock").unwrap();
        assert_eq!(rock.post_count, 0);
    }

    #[tokio::test]
    async fn list_posts_orders_by_creation_time() {
        let store = MemoryStore::new();
        let base = Utc::now();
        let older = store.insert_post_at("older", "x", base - Duration::hours(1)).await;
        let newer = store.insert_post_at("newer", "x", base).await;

        let posts = store.list_posts(Pagination::default()).await.unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p.post.id).collect();
        assert_eq!(ids, vec![newer, older]);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.list_posts(Pagination::default()).await,
            Err(StoreError::Sqlx(_))
        ));
        assert!(store.get_post(1).await.is_err());
    }
}
