// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::AppError,
    models::question::QuestionsPost,
    retrieval::{self, Page},
    store::SharedStore,
};

/// Query parameters for listing questions.
/// `page` stays a string so that junk input can fall back to page 1.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
}

/// Lists questions ten at a time, with the category mapping and total count.
pub async fn list_questions(
    State(store): State<SharedStore>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = Page::parse(params.page.as_deref());
    let listing = retrieval::list_questions(store.as_ref(), page).await?;
    Ok(Json(listing))
}

/// Creates a question, or searches when the body carries `searchTerm`.
pub async fn create_or_search(
    State(store): State<SharedStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;

    match QuestionsPost::from_body(body)? {
        QuestionsPost::Search(search) => {
            let results = retrieval::search_questions(store.as_ref(), &search).await?;
            Ok(Json(results).into_response())
        }
        QuestionsPost::Create(new_question) => {
            let id = retrieval::create_question(store.as_ref(), &new_question).await?;
            Ok(Json(json!({"success": true, "id": id})).into_response())
        }
    }
}

/// Deletes a question by ID.
pub async fn delete_question(
    State(store): State<SharedStore>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let id = retrieval::delete_question(store.as_ref(), id).await?;
    Ok(Json(json!({"success": true, "id": id})))
}
