//! Post records and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Category, ValidationError};

/// Post record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Join row as seen from a post, with the category loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLink {
    pub post_id: i64,
    pub category_id: i64,
    pub category: Category,
}

/// Post with its category links
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithCategories {
    #[serde(flatten)]
    pub post: Post,
    pub categories: Vec<CategoryLink>,
}

impl PostWithCategories {
    /// Names of the linked categories, in link order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|link| link.category.name.as_str())
            .collect()
    }
}

/// Validated input for post creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub categories: Vec<String>,
}

impl NewPost {
    /// Build a new post from request fields.
    ///
    /// Title and content must both be present and non-empty.
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        categories: Vec<String>,
    ) -> Result<Self, ValidationError> {
        match (title, content) {
            (Some(title), Some(content))
                if !title.is_empty() && !content.is_empty() =>
            {
                Ok(Self {
                    title,
                    content,
                    categories,
                })
            }
            _ => Err(ValidationError::Required {
                fields: "Title and content",
            }),
        }
    }
}

/// Input for post update.
///
/// `None` title/content keep the stored values. `categories` always
/// replaces the full set, so an empty list clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_post_requires_title_and_content() {
        assert!(NewPost::new(Some("t".into()), Some("c".into()), vec![]).is_ok());

        for (title, content) in [
            (None, Some("c")),
            (Some("t"), None),
            (Some(""), Some("c")),
            (Some("t"), Some("")),
        ] {
            let err = NewPost::new(
                title.map(str::to_owned),
                content.map(str::to_owned),
                vec![],
            )
            .unwrap_err();
            assert_eq!(err.to_string(), "Title and content are required");
        }
    }

    #[test]
    fn new_post_keeps_whitespace_only_fields() {
        let post = NewPost::new(Some("   ".into()), Some("body".into()), vec![]).unwrap();
        assert_eq!(post.title, "   ");
    }

    #[test]
    fn post_with_categories_flattens_post_fields() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let post = PostWithCategories {
            post: Post {
                id: 7,
                title: "Hello".into(),
                content: "World".into(),
                created_at,
            },
            categories: vec![CategoryLink {
                post_id: 7,
                category_id: 2,
                category: Category {
                    id: 2,
                    name: "Rock".into(),
                },
            }],
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(value["categories"][0]["categoryId"], 2);
        assert_eq!(value["categories"][0]["category"]["name"], "Rock");
        assert_eq!(post.category_names(), vec!["Rock"]);
    }
}
