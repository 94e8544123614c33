// src/handlers/categories.rs

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};

use crate::{error::AppError, retrieval, store::SharedStore};

/// Lists every category as an `id -> type` mapping.
pub async fn list_categories(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, AppError> {
    let categories = retrieval::list_categories(store.as_ref()).await?;
    Ok(Json(categories))
}

/// Lists all questions of one category. Unknown categories are a 404.
pub async fn list_category_questions(
    State(store): State<SharedStore>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let listing = retrieval::questions_in_category(store.as_ref(), id).await?;
    Ok(Json(listing))
}
