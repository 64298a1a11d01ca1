//! Category endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::http::envelope::ApiResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{lenient_string, JsonBody, PathId};
use crate::http::state::AppState;
use crate::models::{Category, CategoryName, CategoryWithCount, CategoryWithPosts};

/// Create category request
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// GET /categories - list categories with post counts
async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CategoryWithCount>>, ApiError> {
    let categories = state
        .store()
        .list_categories()
        .await
        .map_err(|e| ApiError::from_store(e, "Error retrieving categories"))?;

    Ok(ApiResponse::success(
        "Categories retrieved successfully",
        categories,
    ))
}

/// GET /categories/{id} - get a category with its posts
async fn get_category(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<CategoryWithPosts>, ApiError> {
    let category = state.store().get_category(id).await.map_err(|e| {
        ApiError::from_store(e, format!("Error retrieving category with ID: {}", id))
    })?;

    Ok(ApiResponse::success(
        format!("Detail data category by ID: {}", id),
        category,
    ))
}

/// POST /categories/create - create a category
async fn create_category(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> Result<ApiResponse<Category>, ApiError> {
    let name = CategoryName::normalize(req.name.as_deref().unwrap_or_default());

    let category = state
        .store()
        .create_category(name)
        .await
        .map_err(|e| ApiError::from_store(e, "Error creating category"))?;

    tracing::info!(id = category.id, name = %category.name, "category created");
    Ok(ApiResponse::success("Category created successfully", category))
}

/// Category routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/create", post(create_category))
        .route("/categories/{id}", get(get_category))
}
