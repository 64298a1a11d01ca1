//! Join-row endpoint

use axum::{extract::State, routing::get, Router};

use crate::http::envelope::ApiResponse;
use crate::http::error::ApiError;
use crate::http::extractors::Page;
use crate::http::state::AppState;
use crate::models::CategoryOnPostDetail;

/// GET /category-on-posts - list join rows with both sides
async fn list_category_on_posts(
    State(state): State<AppState>,
    Page(page): Page,
) -> Result<ApiResponse<Vec<CategoryOnPostDetail>>, ApiError> {
    let rows = state
        .store()
        .list_category_on_posts(page)
        .await
        .map_err(|e| ApiError::from_store(e, "Error retrieving category on posts"))?;

    Ok(ApiResponse::success(
        "Category on posts retrieved successfully",
        rows,
    ))
}

/// Join-row routes
pub fn router() -> Router<AppState> {
    Router::new().route("/category-on-posts", get(list_category_on_posts))
}
