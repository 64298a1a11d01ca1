//! Store error type

/// Error returned by every [`BlogStore`](super::BlogStore) operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} '{name}' already exists")]
    Conflict { resource: &'static str, name: String },
}

impl StoreError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Map a unique-index violation on insert to `Conflict`.
    pub(crate) fn from_insert(err: sqlx::Error, resource: &'static str, name: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict {
                resource,
                name: name.to_owned(),
            },
            _ => Self::Sqlx(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = StoreError::not_found("Post", 42);
        assert_eq!(err.to_string(), "not found: Post '42'");
    }

    #[test]
    fn non_unique_errors_stay_sqlx() {
        let err = StoreError::from_insert(sqlx::Error::RowNotFound, "Category", "Rock");
        assert!(matches!(err, StoreError::Sqlx(_)));
    }
}
