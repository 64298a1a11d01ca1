//! Custom Axum extractors
//!
//! Rejections are turned into `ApiError` so malformed input still gets the
//! envelope instead of axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::ApiError;
use crate::models::{Pagination, PaginationParams, ValidationError};

/// Extract and validate a numeric id from path
pub struct PathId(pub i64);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationError::InvalidId { value: String::new() })?;

        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidId { value: raw.clone() })?;

        Ok(Self(id))
    }
}

/// Extract `?page=&limit=` as a clamped [`Pagination`]
pub struct Page(pub Pagination);

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::MalformedQuery {
                reason: rejection.body_text(),
            })?;

        Ok(Self(Pagination::try_from(params)?))
    }
}

/// JSON body whose rejection renders as a 400 envelope
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ValidationError::MalformedBody {
                reason: rejection.body_text(),
            }
        })?;

        Ok(Self(value))
    }
}

/// Deserialize a field that should be a string, treating any other JSON
/// type as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Deserialize a field that should be an array of strings.
///
/// A non-array is treated as absent; non-string elements are dropped.
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "lenient_string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "lenient_string_list")]
        tags: Option<Vec<String>>,
    }

    #[test]
    fn lenient_fields_accept_expected_types() {
        let body: Body = serde_json::from_str(r#"{"name": "rock", "tags": ["a", "b"]}"#).unwrap();
        assert_eq!(body.name.as_deref(), Some("rock"));
        assert_eq!(body.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn lenient_fields_ignore_wrong_types() {
        let body: Body = serde_json::from_str(r#"{"name": 5, "tags": "rock"}"#).unwrap();
        assert_eq!(body.name, None);
        assert_eq!(body.tags, None);

        let body: Body = serde_json::from_str(r#"{"tags": ["a", 1, null, "b"]}"#).unwrap();
        assert_eq!(body.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn missing_fields_are_none() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.name, None);
        assert_eq!(body.tags, None);
    }
}
