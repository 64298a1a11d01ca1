//! Post endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::http::envelope::ApiResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{lenient_string, lenient_string_list, JsonBody, Page, PathId};
use crate::http::state::AppState;
use crate::models::{NewPost, PostUpdate, PostWithCategories};

/// Create/update post request
///
/// On update, omitted `categories` means an empty set: the post loses all
/// categories.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub categories: Option<Vec<String>>,
}

/// GET /posts - list posts newest first
async fn list_posts(
    State(state): State<AppState>,
    Page(page): Page,
) -> Result<ApiResponse<Vec<PostWithCategories>>, ApiError> {
    let posts = state
        .store()
        .list_posts(page)
        .await
        .map_err(|e| ApiError::from_store(e, "Error retrieving posts"))?;

    Ok(ApiResponse::success("Posts retrieved successfully", posts))
}

/// POST /posts/create - create a post, creating missing categories
async fn create_post(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PostRequest>,
) -> Result<ApiResponse<PostWithCategories>, ApiError> {
    let new_post = NewPost::new(req.title, req.content, req.categories.unwrap_or_default())?;

    let post = state
        .store()
        .create_post(new_post)
        .await
        .map_err(|e| ApiError::from_store(e, "Error creating post"))?;

    tracing::info!(id = post.post.id, "post created");
    Ok(ApiResponse::success("Post created successfully", post))
}

/// GET /posts/{id} - get a single post
async fn get_post(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<PostWithCategories>, ApiError> {
    let post = state
        .store()
        .get_post(id)
        .await
        .map_err(|e| ApiError::from_store(e, format!("Error retrieving post with ID: {}", id)))?;

    Ok(ApiResponse::success(format!("Detail data post by ID: {}", id), post))
}

/// PUT /posts/{id} - update a post and replace its categories
async fn update_post(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(req): JsonBody<PostRequest>,
) -> Result<ApiResponse<PostWithCategories>, ApiError> {
    let update = PostUpdate {
        title: req.title,
        content: req.content,
        categories: req.categories.unwrap_or_default(),
    };

    let post = state
        .store()
        .update_post(id, update)
        .await
        .map_err(|e| ApiError::from_store(e, format!("Error updating post with ID: {}", id)))?;

    tracing::info!(id, "post updated");
    Ok(ApiResponse::success(
        format!("Post with ID: {} updated successfully", id),
        post,
    ))
}

/// Post routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/create", post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post))
}
