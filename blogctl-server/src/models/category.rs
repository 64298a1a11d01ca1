//! Category records and name normalization

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::post::{Post, PostWithCategories};

/// Category record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Category with the number of posts linked to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: i64,
    pub name: String,
    pub post_count: i64,
}

/// Category with its posts, each carrying its own categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithPosts {
    pub id: i64,
    pub name: String,
    pub posts: Vec<PostWithCategories>,
}

/// Join row with both sides loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOnPostDetail {
    pub post_id: i64,
    pub category_id: i64,
    pub post: Post,
    pub category: Category,
}

/// Category name as stored by category creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Normalize a requested name: trim, then upper-case the first letter.
    ///
    /// Empty input stays empty; uniqueness is checked by the store.
    ///
    /// # Example
    /// ```
    /// use blogctl_server::models::CategoryName;
    ///
    /// assert_eq!(CategoryName::normalize("jazz").as_str(), "Jazz");
    /// assert_eq!(CategoryName::normalize("  hip hop ").as_str(), "Hip hop");
    /// assert_eq!(CategoryName::normalize("").as_str(), "");
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self(name)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(CategoryName::normalize("jazz").as_str(), "Jazz");
        assert_eq!(CategoryName::normalize("Rock").as_str(), "Rock");
        assert_eq!(CategoryName::normalize("mUSIC").as_str(), "MUSIC");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(CategoryName::normalize("  blues  ").as_str(), "Blues");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(CategoryName::normalize("   ").as_str(), "");
    }

    #[test]
    fn handles_multibyte_first_char() {
        assert_eq!(CategoryName::normalize("émile").as_str(), "Émile");
    }

    #[test]
    fn serializes_count_as_camel_case() {
        let category = CategoryWithCount {
            id: 1,
            name: "Rock".into(),
            post_count: 3,
        };
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["postCount"], 3);
    }
}
